use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::{login, use_auth};
use crate::web::router::use_navigate;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let navigate = use_navigate();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 会话恢复未完成时只渲染加载指示
    let is_loading = move || auth.state.get().is_loading;

    view! {
        <Show
            when=move || !is_loading()
            fallback=|| {
                view! {
                    <div class="flex items-center justify-center min-h-screen bg-slate-100">
                        <span class="inline-block h-10 w-10 animate-spin rounded-full border-4 border-slate-300 border-t-[#1a3a6b]"></span>
                    </div>
                }
            }
        >
            {
                let navigate = navigate.clone();
                let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
                    ev.prevent_default();

                    set_is_submitting.set(true);
                    set_error_msg.set(None);

                    let navigate = navigate.clone();
                    spawn_local(async move {
                        match login(auth, email.get_untracked(), password.get_untracked()).await {
                            Ok(()) => navigate("/dashboard"),
                            Err(err) => set_error_msg.set(Some(err.message)),
                        }
                        set_is_submitting.set(false);
                    });
                };

                view! {
                    <div class="flex items-center justify-center min-h-screen bg-slate-100">
                        <div class="w-full max-w-md">
                            <div class="text-center mb-6">
                                <h1 class="text-3xl font-bold text-[#1a3a6b]">"MudraPlus Admin"</h1>
                                <p class="text-slate-500 mt-2">
                                    "Sign in to manage loans and borrowers"
                                </p>
                            </div>

                            <div class="bg-white rounded-xl border border-slate-200 shadow-lg">
                                <form class="p-8 space-y-4" on:submit=on_submit>
                                    <Show when=move || error_msg.get().is_some()>
                                        <div class="p-3 bg-red-50 border border-red-200 rounded-lg text-red-700 text-sm">
                                            {move || error_msg.get().unwrap_or_default()}
                                        </div>
                                    </Show>

                                    <div>
                                        <label class="block text-sm font-medium text-slate-700 mb-1" for="email">
                                            "Email"
                                        </label>
                                        <input
                                            id="email"
                                            type="email"
                                            placeholder="admin@mudraplus.com"
                                            on:input=move |ev| set_email.set(event_target_value(&ev))
                                            prop:value=email
                                            class="w-full px-4 py-2 rounded-lg border border-slate-300 focus:outline-none focus:border-[#1a3a6b]"
                                            required
                                        />
                                    </div>
                                    <div>
                                        <label class="block text-sm font-medium text-slate-700 mb-1" for="password">
                                            "Password"
                                        </label>
                                        <input
                                            id="password"
                                            type="password"
                                            placeholder="••••••••"
                                            on:input=move |ev| set_password.set(event_target_value(&ev))
                                            prop:value=password
                                            class="w-full px-4 py-2 rounded-lg border border-slate-300 focus:outline-none focus:border-[#1a3a6b]"
                                            required
                                        />
                                    </div>
                                    <button
                                        class="w-full bg-[#1a3a6b] hover:bg-[#1a3a6b]/90 text-white font-medium py-2.5 rounded-lg transition disabled:opacity-60"
                                        disabled=move || is_submitting.get()
                                    >
                                        {move || if is_submitting.get() { "Signing in..." } else { "Sign In" }}
                                    </button>
                                </form>
                            </div>
                        </div>
                    </div>
                }
            }
        </Show>
    }
}
