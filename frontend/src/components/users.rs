//! 全部用户列表
//!
//! 分页由服务端完成；搜索框只做本地过滤，不发请求。
//! 每次 query 变化恰好触发一次拉取，过期响应按代号丢弃。

use leptos::prelude::*;
use leptos::task::spawn_local;
use mudra_shared::models::User;
use mudra_shared::query::{ListQuery, UserScope};

use crate::api::users::UserApi;
use crate::auth::{api_client, expire_session, use_auth};
use crate::components::ui::{EmptyState, ErrorBanner, Pagination, Spinner, kyc_badge_class};
use crate::web::router::use_router;

#[component]
pub fn UsersPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let query = RwSignal::new(ListQuery::new(UserScope::All));
    let (rows, set_rows) = signal(Vec::<User>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);
    let (search, set_search) = signal(String::new());
    // 请求代号：响应回来时代号已变则丢弃
    let generation = StoredValue::new(0u64);

    let load = move || {
        let q = query.get_untracked();
        let api = UserApi::new(api_client(&auth.state.get_untracked()));
        let r#gen = generation
            .try_update_value(|g| {
                *g += 1;
                *g
            })
            .unwrap_or(0);
        set_loading.set(true);
        spawn_local(async move {
            let result = api.list(&q).await;
            if generation.try_get_value() != Some(r#gen) {
                return;
            }
            match result {
                Ok(data) => {
                    set_rows.set(data.users);
                    set_error.set(None);
                }
                Err(err) => {
                    if err.is_auth_expired() {
                        expire_session(auth);
                        return;
                    }
                    // 已展示的数据保留，错误以横幅叠加
                    set_error.set(Some(err.message));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        query.track();
        load();
    });
    on_cleanup(move || {
        let _ = generation.try_update_value(|g| *g += 1);
    });

    let visible = move || {
        let term = search.get();
        rows.get()
            .into_iter()
            .filter(|u| u.matches_term(&term))
            .collect::<Vec<_>>()
    };
    let has_next = Signal::derive(move || query.get().has_next(rows.with(Vec::len)));
    let show_spinner = move || loading.get() && rows.with(Vec::is_empty);

    view! {
        <div class="space-y-6">
            <div class="flex flex-col md:flex-row md:items-center justify-between gap-4">
                <div>
                    <h1 class="text-2xl font-bold text-gray-900">"Users"</h1>
                    <p class="text-gray-500 text-sm">"All registered borrowers"</p>
                </div>
                <input
                    type="text"
                    placeholder="Search name, email or phone..."
                    class="w-full md:w-72 px-4 py-2 rounded-lg border border-slate-300 focus:outline-none focus:border-[#1a3a6b]"
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                    prop:value=search
                />
            </div>

            <ErrorBanner message=error on_dismiss=move |_| set_error.set(None) />

            <div class="bg-white rounded-xl border border-slate-200 shadow-sm overflow-hidden">
                <Show when=move || !show_spinner() fallback=|| view! { <Spinner /> }>
                    <Show
                        when=move || !visible().is_empty()
                        fallback=|| view! { <EmptyState message="No users found." /> }
                    >
                        <div class="overflow-x-auto">
                            <table class="w-full">
                                <thead class="bg-slate-50 border-b border-slate-200">
                                    <tr>
                                        <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"Name"</th>
                                        <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"Email"</th>
                                        <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"Phone"</th>
                                        <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"KYC"</th>
                                        <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"Verified"</th>
                                        <th class="px-6 py-3 text-right text-xs font-semibold text-slate-500 uppercase">"Actions"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For each=visible key=|user| user.id let:user>
                                        {
                                            let user_path = format!("/user/{}", user.id);
                                            let verified_class = if user.is_verified {
                                                "px-2 py-1 text-xs font-semibold rounded bg-green-100 text-green-800"
                                            } else {
                                                "px-2 py-1 text-xs font-semibold rounded bg-red-100 text-red-800"
                                            };
                                            view! {
                                                <tr class="border-b border-slate-100 hover:bg-slate-50">
                                                    <td class="px-6 py-3 text-sm font-medium text-gray-900">{user.name.clone()}</td>
                                                    <td class="px-6 py-3 text-sm text-gray-600">{user.email.clone()}</td>
                                                    <td class="px-6 py-3 text-sm text-gray-600">{user.phone.clone()}</td>
                                                    <td class="px-6 py-3">
                                                        <span class=kyc_badge_class(user.kyc_status)>
                                                            {user.kyc_status.label()}
                                                        </span>
                                                    </td>
                                                    <td class="px-6 py-3">
                                                        <span class=verified_class>
                                                            {if user.is_verified { "Verified" } else { "Not Verified" }}
                                                        </span>
                                                    </td>
                                                    <td class="px-6 py-3 text-right">
                                                        <button
                                                            class="text-sm font-medium text-[#1a3a6b] hover:underline"
                                                            on:click=move |_| router.navigate(&user_path)
                                                        >
                                                            "View"
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

                <Pagination
                    page=Signal::derive(move || query.get().page)
                    has_next=has_next
                    on_prev=move |_| {
                        if query.get_untracked().page > 1 {
                            query.update(|q| q.prev_page());
                        }
                    }
                    on_next=move |_| query.update(|q| q.next_page())
                />
            </div>
        </div>
    }
}
