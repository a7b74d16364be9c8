//! 贷款列表
//!
//! 一个组件服务三个入口：全部贷款、申请中、存续中。后两者把
//! 状态过滤固定死并隐藏下拉。状态过滤走服务端，搜索框只做
//! 本地过滤（贷款编号或 id）。

use leptos::prelude::*;
use leptos::task::spawn_local;
use mudra_shared::format;
use mudra_shared::models::{Loan, LoanStatus};
use mudra_shared::query::{ListQuery, LoanScope};

use crate::api::loans::LoanApi;
use crate::auth::{api_client, expire_session, use_auth};
use crate::components::ui::{EmptyState, ErrorBanner, Pagination, Spinner, loan_badge_class};
use crate::web::router::use_router;

#[component]
pub fn LoansPage(
    #[prop(default = "Loans")] title: &'static str,
    #[prop(default = "All loans across the portfolio")] subtitle: &'static str,
    /// 固定的状态过滤；Some 时隐藏状态下拉
    #[prop(optional)]
    fixed_status: Option<LoanStatus>,
) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let query = RwSignal::new(ListQuery::new(LoanScope(fixed_status)));
    let (rows, set_rows) = signal(Vec::<Loan>::new());
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);
    let (search, set_search) = signal(String::new());
    let generation = StoredValue::new(0u64);

    let load = move || {
        let q = query.get_untracked();
        let api = LoanApi::new(api_client(&auth.state.get_untracked()));
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
                    set_rows.set(data.loans);
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

    let on_status_change = move |ev: leptos::web_sys::Event| {
        let value = event_target_value(&ev);
        let next = LoanStatus::ALL
            .iter()
            .copied()
            .find(|s| s.as_str() == value);
        if query.get_untracked().filter != LoanScope(next) {
            query.update(|q| q.set_filter(LoanScope(next)));
        }
    };

    let visible = move || {
        let term = search.get();
        rows.get()
            .into_iter()
            .filter(|l| l.matches_term(&term))
            .collect::<Vec<_>>()
    };
    let has_next = Signal::derive(move || query.get().has_next(rows.with(Vec::len)));
    let show_spinner = move || loading.get() && rows.with(Vec::is_empty);

    // 本页数据的口径统计
    let count_of = move |status: LoanStatus| {
        rows.with(|rows| rows.iter().filter(|l| l.status == status).count())
    };

    view! {
        <div class="space-y-6">
            <div class="flex flex-col md:flex-row md:items-center justify-between gap-4">
                <div>
                    <h1 class="text-2xl font-bold text-gray-900">{title}</h1>
                    <p class="text-gray-500 text-sm">{subtitle}</p>
                </div>
                <div class="flex flex-col md:flex-row gap-3">
                    <Show when=move || fixed_status.is_none()>
                        <select
                            class="px-4 py-2 rounded-lg border border-slate-300 bg-white text-sm focus:outline-none focus:border-[#1a3a6b]"
                            on:change=on_status_change
                        >
                            <option value="">"All statuses"</option>
                            {LoanStatus::ALL
                                .iter()
                                .map(|status| {
                                    view! { <option value=status.as_str()>{status.label()}</option> }
                                })
                                .collect_view()}
                        </select>
                    </Show>
                    <input
                        type="text"
                        placeholder="Search loan number or id..."
                        class="w-full md:w-72 px-4 py-2 rounded-lg border border-slate-300 focus:outline-none focus:border-[#1a3a6b]"
                        on:input=move |ev| set_search.set(event_target_value(&ev))
                        prop:value=search
                    />
                </div>
            </div>

            <div class="grid grid-cols-2 lg:grid-cols-4 gap-4">
                <div class="bg-white rounded-xl p-4 border border-slate-200 shadow-sm">
                    <p class="text-xs text-slate-500 font-medium">"Loans on page"</p>
                    <p class="text-2xl font-bold text-slate-900">{move || rows.with(Vec::len)}</p>
                </div>
                <div class="bg-white rounded-xl p-4 border border-slate-200 shadow-sm">
                    <p class="text-xs text-slate-500 font-medium">"Active"</p>
                    <p class="text-2xl font-bold text-green-600">
                        {move || count_of(LoanStatus::Active)}
                    </p>
                </div>
                <div class="bg-white rounded-xl p-4 border border-slate-200 shadow-sm">
                    <p class="text-xs text-slate-500 font-medium">"Closed"</p>
                    <p class="text-2xl font-bold text-slate-600">
                        {move || count_of(LoanStatus::Closed)}
                    </p>
                </div>
                <div class="bg-white rounded-xl p-4 border border-slate-200 shadow-sm">
                    <p class="text-xs text-slate-500 font-medium">"Pending Review"</p>
                    <p class="text-2xl font-bold text-amber-600">
                        {move || count_of(LoanStatus::Requested)}
                    </p>
                </div>
            </div>

            <ErrorBanner message=error on_dismiss=move |_| set_error.set(None) />

            <div class="bg-white rounded-xl border border-slate-200 shadow-sm overflow-hidden">
                <Show when=move || !show_spinner() fallback=|| view! { <Spinner /> }>
                    <Show
                        when=move || !visible().is_empty()
                        fallback=|| view! { <EmptyState message="No loans found." /> }
                    >
                        <div class="overflow-x-auto">
                            <table class="w-full">
                                <thead class="bg-slate-50 border-b border-slate-200">
                                    <tr>
                                        <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"Loan Number"</th>
                                        <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"Borrower"</th>
                                        <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"Principal"</th>
                                        <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"Total Payable"</th>
                                        <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"Remaining"</th>
                                        <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"Status"</th>
                                        <th class="px-6 py-3 text-right text-xs font-semibold text-slate-500 uppercase">"Actions"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For each=visible key=|loan| loan.id let:loan>
                                        {
                                            let loan_path = format!("/loan/{}", loan.id);
                                            let borrower = loan
                                                .user
                                                .as_ref()
                                                .map(|u| u.name.clone())
                                                .unwrap_or_else(|| "-".to_string());
                                            let money = |v: Option<f64>| match v {
                                                Some(v) => format::inr(v),
                                                None => "-".to_string(),
                                            };
                                            view! {
                                                <tr class="border-b border-slate-100 hover:bg-slate-50">
                                                    <td class="px-6 py-3 text-sm font-medium text-gray-900">{loan.loan_number.clone()}</td>
                                                    <td class="px-6 py-3 text-sm text-gray-600">{borrower}</td>
                                                    <td class="px-6 py-3 text-sm text-gray-600">{money(loan.principal_amount)}</td>
                                                    <td class="px-6 py-3 text-sm text-gray-600">{money(loan.total_amount_payable)}</td>
                                                    <td class="px-6 py-3 text-sm text-gray-600">{money(loan.remaining_amount)}</td>
                                                    <td class="px-6 py-3">
                                                        <span class=loan_badge_class(loan.status)>{loan.status.label()}</span>
                                                    </td>
                                                    <td class="px-6 py-3 text-right">
                                                        <button
                                                            class="text-sm font-medium text-[#1a3a6b] hover:underline"
                                                            on:click=move |_| router.navigate(&loan_path)
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
