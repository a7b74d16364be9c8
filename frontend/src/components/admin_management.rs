//! 管理员与代理管理（仅 admin 可达）
//!
//! 列表 + 新建表单 + 删除。表单状态集中在 `AdminFormState`，
//! 提交前在客户端完成校验，创建成功后清空表单并整页重拉。

use leptos::prelude::*;
use leptos::task::spawn_local;
use mudra_shared::Role;
use mudra_shared::error::ApiResult;
use mudra_shared::models::Admin;
use mudra_shared::requests::CreateAdminRequest;

use crate::api::admins::AdminApi;
use crate::auth::{api_client, expire_session, use_auth};
use crate::components::ui::{EmptyState, ErrorBanner, Spinner, SuccessBanner};

/// 新建账号表单状态
///
/// 使用 `RwSignal` 因为它实现了 `Copy` trait，便于在闭包间传递。
#[derive(Clone, Copy)]
struct AdminFormState {
    name: RwSignal<String>,
    email: RwSignal<String>,
    phone: RwSignal<String>,
    password: RwSignal<String>,
    confirm_password: RwSignal<String>,
    role: RwSignal<Role>,
}

impl AdminFormState {
    fn new() -> Self {
        Self {
            name: RwSignal::new(String::new()),
            email: RwSignal::new(String::new()),
            phone: RwSignal::new(String::new()),
            password: RwSignal::new(String::new()),
            confirm_password: RwSignal::new(String::new()),
            role: RwSignal::new(Role::Agent),
        }
    }

    fn reset(&self) {
        self.name.set(String::new());
        self.email.set(String::new());
        self.phone.set(String::new());
        self.password.set(String::new());
        self.confirm_password.set(String::new());
        self.role.set(Role::Agent);
    }

    /// 校验并转换为请求对象
    fn to_request(&self) -> ApiResult<CreateAdminRequest> {
        let request = CreateAdminRequest {
            name: self.name.get_untracked().trim().to_string(),
            email: self.email.get_untracked().trim().to_string(),
            phone: self.phone.get_untracked().trim().to_string(),
            password: self.password.get_untracked(),
            confirm_password: self.confirm_password.get_untracked(),
            role: self.role.get_untracked(),
        };
        request.validate()?;
        Ok(request)
    }
}

#[component]
pub fn AdminManagementPage() -> impl IntoView {
    let auth = use_auth();

    let (rows, set_rows) = signal(Vec::<Admin>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);
    let (success, set_success) = signal(Option::<String>::None);
    let (search, set_search) = signal(String::new());
    let (submitting, set_submitting) = signal(false);
    let (deleting, set_deleting) = signal(Option::<i64>::None);
    let form = AdminFormState::new();
    let generation = StoredValue::new(0u64);

    let load = move || {
        let api = AdminApi::new(api_client(&auth.state.get_untracked()));
        let r#gen = generation
            .try_update_value(|g| {
                *g += 1;
                *g
            })
            .unwrap_or(0);
        set_loading.set(true);
        spawn_local(async move {
            let result = api.list(false).await;
            if generation.try_get_value() != Some(r#gen) {
                return;
            }
            match result {
                Ok(admins) => {
                    set_rows.set(admins);
                    set_error.set(None);
                }
                Err(err) => {
                    if err.is_auth_expired() {
                        expire_session(auth);
                        return;
                    }
                    set_error.set(Some(err.message));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load());
    on_cleanup(move || {
        let _ = generation.try_update_value(|g| *g += 1);
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);
        set_success.set(None);

        let request = match form.to_request() {
            Ok(request) => request,
            Err(err) => {
                set_error.set(Some(err.message));
                return;
            }
        };

        let api = AdminApi::new(api_client(&auth.state.get_untracked()));
        set_submitting.set(true);
        spawn_local(async move {
            match api.create(&request).await {
                Ok(res) => {
                    form.reset();
                    set_success.set(Some(
                        res.message
                            .unwrap_or_else(|| "Account created successfully".to_string()),
                    ));
                    load();
                }
                Err(err) => {
                    if err.is_auth_expired() {
                        expire_session(auth);
                        return;
                    }
                    set_error.set(Some(err.message));
                }
            }
            set_submitting.set(false);
        });
    };

    let delete_admin = move |admin_id: i64| {
        let api = AdminApi::new(api_client(&auth.state.get_untracked()));
        set_deleting.set(Some(admin_id));
        spawn_local(async move {
            match api.delete(admin_id).await {
                Ok(_) => load(),
                Err(err) => {
                    if err.is_auth_expired() {
                        expire_session(auth);
                        return;
                    }
                    set_error.set(Some(err.message));
                }
            }
            set_deleting.set(None);
        });
    };

    let visible = move || {
        let term = search.get();
        rows.get()
            .into_iter()
            .filter(|a| a.matches_term(&term))
            .collect::<Vec<_>>()
    };
    let show_spinner = move || loading.get() && rows.with(Vec::is_empty);

    view! {
        <div class="space-y-6">
            <div>
                <h1 class="text-2xl font-bold text-gray-900">"Admin & Agents"</h1>
                <p class="text-gray-500 text-sm">"Manage back-office accounts"</p>
            </div>

            <ErrorBanner message=error on_dismiss=move |_| set_error.set(None) />
            <SuccessBanner message=success />

            <div class="grid grid-cols-1 lg:grid-cols-3 gap-6">
                // 新建表单
                <div class="bg-white rounded-xl border border-slate-200 shadow-sm p-6">
                    <h2 class="text-lg font-bold text-slate-900 mb-4">"Create Account"</h2>
                    <form class="space-y-3" on:submit=on_submit>
                        <input
                            type="text"
                            placeholder="Full name"
                            class="w-full px-4 py-2 rounded-lg border border-slate-300 focus:outline-none focus:border-[#1a3a6b]"
                            on:input=move |ev| form.name.set(event_target_value(&ev))
                            prop:value=form.name
                        />
                        <input
                            type="email"
                            placeholder="Email"
                            class="w-full px-4 py-2 rounded-lg border border-slate-300 focus:outline-none focus:border-[#1a3a6b]"
                            on:input=move |ev| form.email.set(event_target_value(&ev))
                            prop:value=form.email
                        />
                        <input
                            type="text"
                            placeholder="Phone"
                            class="w-full px-4 py-2 rounded-lg border border-slate-300 focus:outline-none focus:border-[#1a3a6b]"
                            on:input=move |ev| form.phone.set(event_target_value(&ev))
                            prop:value=form.phone
                        />
                        <input
                            type="password"
                            placeholder="Password"
                            class="w-full px-4 py-2 rounded-lg border border-slate-300 focus:outline-none focus:border-[#1a3a6b]"
                            on:input=move |ev| form.password.set(event_target_value(&ev))
                            prop:value=form.password
                        />
                        <input
                            type="password"
                            placeholder="Confirm password"
                            class="w-full px-4 py-2 rounded-lg border border-slate-300 focus:outline-none focus:border-[#1a3a6b]"
                            on:input=move |ev| form.confirm_password.set(event_target_value(&ev))
                            prop:value=form.confirm_password
                        />
                        <select
                            class="w-full px-4 py-2 rounded-lg border border-slate-300 bg-white text-sm focus:outline-none focus:border-[#1a3a6b]"
                            on:change=move |ev| {
                                form.role
                                    .set(Role::parse(&event_target_value(&ev)).unwrap_or(Role::Agent));
                            }
                        >
                            <option value="agent" selected=move || form.role.get() == Role::Agent>
                                "Agent"
                            </option>
                            <option value="admin" selected=move || form.role.get() == Role::Admin>
                                "Admin"
                            </option>
                        </select>
                        <button
                            class="w-full bg-[#1a3a6b] hover:bg-[#1a3a6b]/90 text-white font-medium py-2.5 rounded-lg transition disabled:opacity-60"
                            disabled=move || submitting.get()
                        >
                            {move || if submitting.get() { "Creating..." } else { "Create Account" }}
                        </button>
                    </form>
                </div>

                // 账号列表
                <div class="lg:col-span-2 bg-white rounded-xl border border-slate-200 shadow-sm overflow-hidden">
                    <div class="flex items-center justify-between px-6 py-4 border-b border-slate-200">
                        <h2 class="text-lg font-bold text-slate-900">"Accounts"</h2>
                        <input
                            type="text"
                            placeholder="Search name or email..."
                            class="w-64 px-4 py-2 rounded-lg border border-slate-300 focus:outline-none focus:border-[#1a3a6b]"
                            on:input=move |ev| set_search.set(event_target_value(&ev))
                            prop:value=search
                        />
                    </div>

                    <Show when=move || !show_spinner() fallback=|| view! { <Spinner /> }>
                        <Show
                            when=move || !visible().is_empty()
                            fallback=|| view! { <EmptyState message="No accounts found." /> }
                        >
                            <div class="overflow-x-auto">
                                <table class="w-full">
                                    <thead class="bg-slate-50 border-b border-slate-200">
                                        <tr>
                                            <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"Name"</th>
                                            <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"Email"</th>
                                            <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"Role"</th>
                                            <th class="px-6 py-3 text-right text-xs font-semibold text-slate-500 uppercase">"Actions"</th>
                                        </tr>
                                    </thead>
                                    <tbody>
                                        <For each=visible key=|admin| admin.id let:admin>
                                            {
                                                let admin_id = admin.id;
                                                let role_class = if admin.role.is_admin() {
                                                    "px-2 py-1 text-xs font-semibold rounded bg-indigo-100 text-indigo-800"
                                                } else {
                                                    "px-2 py-1 text-xs font-semibold rounded bg-slate-100 text-slate-700"
                                                };
                                                view! {
                                                    <tr class="border-b border-slate-100 hover:bg-slate-50">
                                                        <td class="px-6 py-3 text-sm font-medium text-gray-900">{admin.name.clone()}</td>
                                                        <td class="px-6 py-3 text-sm text-gray-600">{admin.email.clone()}</td>
                                                        <td class="px-6 py-3">
                                                            <span class=role_class>{admin.role.as_str().to_uppercase()}</span>
                                                        </td>
                                                        <td class="px-6 py-3 text-right">
                                                            <button
                                                                class="text-sm font-medium text-red-600 hover:underline disabled:opacity-40"
                                                                disabled=move || deleting.get() == Some(admin_id)
                                                                on:click=move |_| delete_admin(admin_id)
                                                            >
                                                                {move || if deleting.get() == Some(admin_id) {
                                                                    "Deleting..."
                                                                } else {
                                                                    "Delete"
                                                                }}
                                                            </button>
                                                        </td>
                                                    </tr>
                                                }
                                            }
                                        </For>
                                    </tbody>
                                </table>
                            </div>
                        </Show>
                    </Show>
                </div>
            </div>
        </div>
    }
}
