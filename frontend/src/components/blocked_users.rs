//! 已拉黑用户列表
//!
//! 与全量用户页同一套控制器，范围固定为 isblocked=true，
//! 额外提供就地恢复操作。恢复成功后整页重拉，不做乐观更新。

use leptos::prelude::*;
use leptos::task::spawn_local;
use mudra_shared::models::User;
use mudra_shared::query::{ListQuery, UserScope};

use crate::api::users::UserApi;
use crate::auth::{api_client, expire_session, use_auth};
use crate::components::ui::{EmptyState, ErrorBanner, Pagination, Spinner};
use crate::web::router::use_router;

#[component]
pub fn BlockedUsersPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let query = RwSignal::new(ListQuery::new(UserScope::Blocked));
    let (rows, set_rows) = signal(Vec::<User>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);
    let (search, set_search) = signal(String::new());
    // 正在恢复中的用户 id
    let (restoring, set_restoring) = signal(Option::<i64>::None);
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

    let restore_user = move |user_id: i64| {
        let api = UserApi::new(api_client(&auth.state.get_untracked()));
        set_restoring.set(Some(user_id));
        spawn_local(async move {
            match api.restore(user_id).await {
                Ok(_) => load(),
                Err(err) => {
                    if err.is_auth_expired() {
                        expire_session(auth);
                        return;
                    }
                    set_error.set(Some(err.message));
                }
            }
            set_restoring.set(None);
        });
    };

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
                    <h1 class="text-2xl font-bold text-gray-900">"Blocked Users"</h1>
                    <p class="text-gray-500 text-sm">"Accounts suspended from the platform"</p>
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
                        fallback=|| view! { <EmptyState message="No blocked users." /> }
                    >
                        <div class="overflow-x-auto">
                            <table class="w-full">
                                <thead class="bg-slate-50 border-b border-slate-200">
                                    <tr>
                                        <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"Name"</th>
                                        <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"Email"</th>
                                        <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"Phone"</th>
                                        <th class="px-6 py-3 text-right text-xs font-semibold text-slate-500 uppercase">"Actions"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For each=visible key=|user| user.id let:user>
                                        {
                                            let user_id = user.id;
                                            let user_path = format!("/user/{user_id}");
                                            view! {
                                                <tr class="border-b border-slate-100 hover:bg-slate-50">
                                                    <td class="px-6 py-3 text-sm font-medium text-gray-900">{user.name.clone()}</td>
                                                    <td class="px-6 py-3 text-sm text-gray-600">{user.email.clone()}</td>
                                                    <td class="px-6 py-3 text-sm text-gray-600">{user.phone.clone()}</td>
                                                    <td class="px-6 py-3 text-right space-x-3">
                                                        <button
                                                            class="text-sm font-medium text-[#1a3a6b] hover:underline"
                                                            on:click=move |_| router.navigate(&user_path)
                                                        >
                                                            "View"
                                                        </button>
                                                        <button
                                                            class="text-sm font-medium text-emerald-600 hover:underline disabled:opacity-40"
                                                            disabled=move || restoring.get() == Some(user_id)
                                                            on:click=move |_| restore_user(user_id)
                                                        >
                                                            {move || if restoring.get() == Some(user_id) {
                                                                "Restoring..."
                                                            } else {
                                                                "Restore"
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
