//! KYC 审核队列
//!
//! 顶部一排状态标签是服务端过滤器：切换标签重置到第一页并
//! 恰好重拉一次。默认停在 pending。

use leptos::prelude::*;
use leptos::task::spawn_local;
use mudra_shared::models::{KycStatus, User};
use mudra_shared::query::{ListQuery, UserScope};

use crate::api::users::UserApi;
use crate::auth::{api_client, expire_session, use_auth};
use crate::components::ui::{EmptyState, ErrorBanner, Pagination, Spinner, kyc_badge_class};
use crate::web::router::use_router;

#[component]
pub fn KycUsersPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let query = RwSignal::new(ListQuery::new(UserScope::Kyc(KycStatus::Pending)));
    let (rows, set_rows) = signal(Vec::<User>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);
    let (search, set_search) = signal(String::new());
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

    let active_filter = move || match query.get().filter {
        UserScope::Kyc(status) => status,
        _ => KycStatus::Pending,
    };
    let set_filter = move |status: KycStatus| {
        if active_filter() != status {
            query.update(|q| q.set_filter(UserScope::Kyc(status)));
        }
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
                    <h1 class="text-2xl font-bold text-gray-900">"KYC Verification"</h1>
                    <p class="text-gray-500 text-sm">"Review borrower identity submissions"</p>
                </div>
                <input
                    type="text"
                    placeholder="Search name, email or phone..."
                    class="w-full md:w-72 px-4 py-2 rounded-lg border border-slate-300 focus:outline-none focus:border-[#1a3a6b]"
                    on:input=move |ev| set_search.set(event_target_value(&ev))
                    prop:value=search
                />
            </div>

            <div class="flex flex-wrap gap-2">
                {KycStatus::ALL
                    .iter()
                    .map(|status| {
                        let status = *status;
                        let is_active = move || active_filter() == status;
                        view! {
                            <button
                                class="px-4 py-2 rounded-lg text-sm font-medium border border-slate-300 bg-white text-slate-600 transition"
                                class=("!bg-[#1a3a6b]", is_active)
                                class=("!text-white", is_active)
                                on:click=move |_| set_filter(status)
                            >
                                {status.label()}
                            </button>
                        }
                    })
                    .collect_view()}
            </div>

            <ErrorBanner message=error on_dismiss=move |_| set_error.set(None) />

            <div class="bg-white rounded-xl border border-slate-200 shadow-sm overflow-hidden">
                <Show when=move || !show_spinner() fallback=|| view! { <Spinner /> }>
                    <Show
                        when=move || !visible().is_empty()
                        fallback=move || {
                            view! {
                                <EmptyState message=format!(
                                    "No {} KYC submissions.",
                                    active_filter().as_str(),
                                ) />
                            }
                        }
                    >
                        <div class="overflow-x-auto">
                            <table class="w-full">
                                <thead class="bg-slate-50 border-b border-slate-200">
                                    <tr>
                                        <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"Name"</th>
                                        <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"Email"</th>
                                        <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"Phone"</th>
                                        <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"KYC Status"</th>
                                        <th class="px-6 py-3 text-right text-xs font-semibold text-slate-500 uppercase">"Actions"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For each=visible key=|user| user.id let:user>
                                        {
                                            let user_path = format!("/user/{}", user.id);
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
                                                    <td class="px-6 py-3 text-right">
                                                        <button
                                                            class="text-sm font-medium text-[#1a3a6b] hover:underline"
                                                            on:click=move |_| router.navigate(&user_path)
                                                        >
                                                            "Review"
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
