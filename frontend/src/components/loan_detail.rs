//! 贷款详情
//!
//! 整单一次拉取，标签页随贷款状态收缩：审批表单只在
//! requested 状态出现，跟进只在 active 状态出现。每次写操作
//! 成功后整单重拉。

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use mudra_shared::error::{ApiError, ApiResult};
use mudra_shared::format;
use mudra_shared::loan_math;
use mudra_shared::models::{FollowUpType, InterestType, Loan};
use mudra_shared::requests::{FollowUpRequest, PaymentLinkRequest, ReviewLoanRequest};

use crate::api::loans::LoanApi;
use crate::auth::{api_client, expire_session, use_auth};
use crate::components::ui::{
    EmptyState, ErrorBanner, Spinner, SuccessBanner, loan_badge_class,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoanTab {
    Details,
    Payment,
    Transactions,
    Review,
    FollowUp,
    PaymentLink,
}

impl LoanTab {
    fn label(&self) -> &'static str {
        match self {
            LoanTab::Details => "Details",
            LoanTab::Payment => "Payment",
            LoanTab::Transactions => "Transactions",
            LoanTab::Review => "Review",
            LoanTab::FollowUp => "Follow-ups",
            LoanTab::PaymentLink => "Payment Link",
        }
    }

    /// 当前贷款状态下可见的标签
    fn visible(loan: &Loan) -> Vec<LoanTab> {
        let mut tabs = vec![LoanTab::Details, LoanTab::Payment, LoanTab::Transactions];
        if loan.status.can_review() {
            tabs.push(LoanTab::Review);
        }
        if loan.status.can_follow_up() {
            tabs.push(LoanTab::FollowUp);
        }
        tabs.push(LoanTab::PaymentLink);
        tabs
    }
}

/// 审批表单状态，输入一律先收成字符串，提交时再解析
#[derive(Clone, Copy)]
struct ReviewFormState {
    principal_amount: RwSignal<String>,
    tenure: RwSignal<String>,
    intrest_type: RwSignal<InterestType>,
    intrest_rate: RwSignal<String>,
    total_intrest: RwSignal<String>,
    total_amount_payable: RwSignal<String>,
    expiry_days: RwSignal<String>,
    prefilled: RwSignal<bool>,
}

impl ReviewFormState {
    fn new() -> Self {
        Self {
            principal_amount: RwSignal::new(String::new()),
            tenure: RwSignal::new(String::new()),
            intrest_type: RwSignal::new(InterestType::Flat),
            intrest_rate: RwSignal::new(String::new()),
            total_intrest: RwSignal::new(String::new()),
            total_amount_payable: RwSignal::new(String::new()),
            expiry_days: RwSignal::new("7".to_string()),
            prefilled: RwSignal::new(false),
        }
    }

    /// 一次性把申请金额和期限抄进表单，之后不再覆盖人工输入
    fn prefill_from(&self, loan: &Loan) {
        if self.prefilled.get_untracked() {
            return;
        }
        if let Some(amount) = loan.principal_amount {
            self.principal_amount.set(format!("{amount}"));
        }
        if let Some(tenure) = loan.tenure {
            self.tenure.set(tenure.to_string());
        }
        self.prefilled.set(true);
    }

    fn parse_positive_f64(value: &str, label: &str) -> ApiResult<f64> {
        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| *v > 0.0)
            .ok_or_else(|| ApiError::validation(format!("Please enter a valid {label}")))
    }

    fn parse_positive_u32(value: &str, label: &str) -> ApiResult<u32> {
        value
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|v| *v > 0)
            .ok_or_else(|| ApiError::validation(format!("Please enter a valid {label}")))
    }

    /// 按当前本金、利率、期限算平息并回填两个合计字段
    fn calculate(&self) -> ApiResult<()> {
        let principal =
            Self::parse_positive_f64(&self.principal_amount.get_untracked(), "principal amount")?;
        let rate = Self::parse_positive_f64(&self.intrest_rate.get_untracked(), "interest rate")?;
        let tenure = Self::parse_positive_u32(&self.tenure.get_untracked(), "tenure")?;
        let interest = loan_math::flat_interest(principal, rate, tenure);
        self.total_intrest.set(format!("{interest}"));
        self.total_amount_payable
            .set(format!("{}", loan_math::total_payable(principal, interest)));
        Ok(())
    }

    fn to_request(&self) -> ApiResult<ReviewLoanRequest> {
        Ok(ReviewLoanRequest {
            principal_amount: Self::parse_positive_f64(
                &self.principal_amount.get_untracked(),
                "principal amount",
            )?,
            tenure: Self::parse_positive_u32(&self.tenure.get_untracked(), "tenure")?,
            intrest_type: self.intrest_type.get_untracked(),
            intrest_rate: Self::parse_positive_f64(
                &self.intrest_rate.get_untracked(),
                "interest rate",
            )?,
            total_intrest: Self::parse_positive_f64(
                &self.total_intrest.get_untracked(),
                "total interest",
            )?,
            total_amount_payable: Self::parse_positive_f64(
                &self.total_amount_payable.get_untracked(),
                "total amount payable",
            )?,
            expiry_days: Self::parse_positive_u32(
                &self.expiry_days.get_untracked(),
                "expiry days",
            )?,
        })
    }
}

fn money(value: Option<f64>) -> String {
    value.map(format::inr).unwrap_or_else(|| "-".to_string())
}

fn date_or_dash(value: &Option<String>) -> String {
    value
        .as_deref()
        .map(format::short_date)
        .unwrap_or_else(|| "-".to_string())
}

#[component]
fn DetailCard(#[prop(into)] label: String, #[prop(into)] value: String) -> impl IntoView {
    view! {
        <div class="p-4 rounded-lg border border-slate-200 bg-slate-50">
            <p class="text-xs text-slate-500 font-medium">{label}</p>
            <p class="text-sm font-semibold text-slate-900 mt-1">{value}</p>
        </div>
    }
}

#[component]
pub fn LoanDetailPage(loan_id: i64) -> impl IntoView {
    let auth = use_auth();

    let loan = RwSignal::new(Option::<Loan>::None);
    let active_tab = RwSignal::new(LoanTab::Details);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);
    let (success, set_success) = signal(Option::<String>::None);
    let (action_busy, set_action_busy) = signal(false);
    let generation = StoredValue::new(0u64);

    let review_form = ReviewFormState::new();

    // 跟进表单
    let note = RwSignal::new(String::new());
    let follow_up_type = RwSignal::new(FollowUpType::Call);
    let follow_up_date = RwSignal::new(String::new());
    let next_follow_up_date = RwSignal::new(String::new());

    // 收款链接
    let link_amount = RwSignal::new(String::new());
    let (payment_link, set_payment_link) = signal(Option::<String>::None);
    let (copied, set_copied) = signal(false);
    let copied_timer = StoredValue::new_local(Option::<Timeout>::None);

    let load = move || {
        let api = LoanApi::new(api_client(&auth.state.get_untracked()));
        let r#gen = generation
            .try_update_value(|g| {
                *g += 1;
                *g
            })
            .unwrap_or(0);
        set_loading.set(true);
        spawn_local(async move {
            let result = api.detail(loan_id).await;
            if generation.try_get_value() != Some(r#gen) {
                return;
            }
            match result {
                Ok(data) => {
                    // 状态变化可能让当前标签失效，回落到详情页
                    if !LoanTab::visible(&data).contains(&active_tab.get_untracked()) {
                        active_tab.set(LoanTab::Details);
                    }
                    loan.set(Some(data));
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

    // ------------------------------------------------------------------
    // 写操作
    // ------------------------------------------------------------------

    let approve = move |_| {
        let api = LoanApi::new(api_client(&auth.state.get_untracked()));
        set_action_busy.set(true);
        spawn_local(async move {
            match api.approve(loan_id).await {
                Ok(res) => {
                    set_success
                        .set(Some(res.message.unwrap_or_else(|| "Loan approved".to_string())));
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
            set_action_busy.set(false);
        });
    };

    let mark_defaulted = move |_| {
        let api = LoanApi::new(api_client(&auth.state.get_untracked()));
        set_action_busy.set(true);
        spawn_local(async move {
            match api.mark_defaulted(loan_id).await {
                Ok(res) => {
                    set_success.set(Some(
                        res.message
                            .unwrap_or_else(|| "Loan marked as defaulted".to_string()),
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
            set_action_busy.set(false);
        });
    };

    let on_calculate = move |_| {
        if let Err(err) = review_form.calculate() {
            set_error.set(Some(err.message));
        } else {
            set_error.set(None);
        }
    };

    let submit_review = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);
        let request = match review_form.to_request() {
            Ok(request) => request,
            Err(err) => {
                set_error.set(Some(err.message));
                return;
            }
        };
        let api = LoanApi::new(api_client(&auth.state.get_untracked()));
        set_action_busy.set(true);
        spawn_local(async move {
            match api.review(loan_id, &request).await {
                Ok(res) => {
                    set_success.set(Some(
                        res.message
                            .unwrap_or_else(|| "Review terms saved".to_string()),
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
            set_action_busy.set(false);
        });
    };

    let submit_follow_up = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);
        let next = next_follow_up_date.get_untracked();
        let request = FollowUpRequest {
            note: note.get_untracked().trim().to_string(),
            follow_up_type: follow_up_type.get_untracked(),
            follow_up_date: follow_up_date.get_untracked(),
            next_follow_up_date: (!next.is_empty()).then_some(next),
        };
        if let Err(err) = request.validate() {
            set_error.set(Some(err.message));
            return;
        }
        let api = LoanApi::new(api_client(&auth.state.get_untracked()));
        set_action_busy.set(true);
        spawn_local(async move {
            match api.add_follow_up(loan_id, &request).await {
                Ok(res) => {
                    note.set(String::new());
                    follow_up_date.set(String::new());
                    next_follow_up_date.set(String::new());
                    set_success.set(Some(
                        res.message.unwrap_or_else(|| "Follow-up recorded".to_string()),
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
            set_action_busy.set(false);
        });
    };

    let submit_payment_link = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_error.set(None);
        let amount = match ReviewFormState::parse_positive_f64(
            &link_amount.get_untracked(),
            "amount",
        ) {
            Ok(amount) => amount,
            Err(err) => {
                set_error.set(Some(err.message));
                return;
            }
        };
        let api = LoanApi::new(api_client(&auth.state.get_untracked()));
        set_action_busy.set(true);
        spawn_local(async move {
            let request = PaymentLinkRequest { amount, loan_id };
            match api.create_payment_link(&request).await {
                Ok(res) => {
                    set_payment_link.set(Some(res.link));
                }
                Err(err) => {
                    if err.is_auth_expired() {
                        expire_session(auth);
                        return;
                    }
                    set_error.set(Some(err.message));
                }
            }
            set_action_busy.set(false);
        });
    };

    let copy_link = move |_| {
        let Some(link) = payment_link.get_untracked() else {
            return;
        };
        if let Some(window) = leptos::web_sys::window() {
            // 剪贴板 Promise 的结果不关心
            let _ = window.navigator().clipboard().write_text(&link);
            set_copied.set(true);
            copied_timer.set_value(Some(Timeout::new(2000, move || {
                set_copied.set(false);
            })));
        }
    };

    // ------------------------------------------------------------------
    // 标签内容
    // ------------------------------------------------------------------

    let tab_content = move || {
        let Some(data) = loan.get() else {
            return view! { <Spinner /> }.into_any();
        };
        match active_tab.get() {
            LoanTab::Details => {
                let borrower_name = data
                    .user
                    .as_ref()
                    .map(|u| u.name.clone())
                    .unwrap_or_else(|| "-".to_string());
                let borrower_phone = data
                    .user
                    .as_ref()
                    .map(|u| u.phone.clone())
                    .unwrap_or_else(|| "-".to_string());
                let borrower_email = data
                    .user
                    .as_ref()
                    .map(|u| u.email.clone())
                    .unwrap_or_else(|| "-".to_string());
                let interest_type = data
                    .intrest_type
                    .map(|t| t.as_str().to_uppercase())
                    .unwrap_or_else(|| "-".to_string());
                view! {
                    <div class="space-y-6">
                        <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                            <DetailCard label="Borrower" value=borrower_name />
                            <DetailCard label="Phone" value=borrower_phone />
                            <DetailCard label="Email" value=borrower_email />
                            <DetailCard label="Principal" value=money(data.principal_amount) />
                            <DetailCard
                                label="Tenure"
                                value=data
                                    .tenure
                                    .map(|t| format!("{t} days"))
                                    .unwrap_or_else(|| "-".to_string())
                            />
                            <DetailCard label="Interest Type" value=interest_type />
                            <DetailCard
                                label="Interest Rate"
                                value=data
                                    .intrest_rate
                                    .map(|r| format!("{r}%"))
                                    .unwrap_or_else(|| "-".to_string())
                            />
                            <DetailCard label="Start Date" value=date_or_dash(&data.start_date) />
                            <DetailCard
                                label="Next Payment"
                                value=date_or_dash(&data.next_payment_date)
                            />
                        </div>

                        <div class="flex flex-wrap gap-3">
                            <Show when=move || {
                                loan.get().map(|l| l.status.can_approve()).unwrap_or(false)
                            }>
                                <button
                                    class="px-4 py-2 rounded-lg text-sm font-semibold bg-emerald-600 text-white hover:bg-emerald-700 disabled:opacity-60"
                                    disabled=move || action_busy.get()
                                    on:click=approve
                                >
                                    "Approve Loan"
                                </button>
                            </Show>
                            <Show when=move || {
                                loan.get().map(|l| l.status.can_mark_defaulted()).unwrap_or(false)
                            }>
                                <button
                                    class="px-4 py-2 rounded-lg text-sm font-semibold bg-red-600 text-white hover:bg-red-700 disabled:opacity-60"
                                    disabled=move || action_busy.get()
                                    on:click=mark_defaulted
                                >
                                    "Mark as Defaulted"
                                </button>
                            </Show>
                        </div>
                    </div>
                }
                .into_any()
            }
            LoanTab::Payment => {
                let bank_name = data
                    .bank
                    .as_ref()
                    .and_then(|b| b.bank_name.clone())
                    .unwrap_or_else(|| "-".to_string());
                let account = data
                    .bank
                    .as_ref()
                    .and_then(|b| b.account_number.as_deref().map(format::mask_account))
                    .unwrap_or_else(|| "-".to_string());
                let ifsc = data
                    .bank
                    .as_ref()
                    .and_then(|b| b.ifsc_code.clone())
                    .unwrap_or_else(|| "-".to_string());
                view! {
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
                        <DetailCard label="Total Payable" value=money(data.total_amount_payable) />
                        <DetailCard label="Total Interest" value=money(data.total_intrest) />
                        <DetailCard label="Amount Paid" value=money(data.amount_paid) />
                        <DetailCard label="Outstanding" value=format::inr(data.outstanding()) />
                        <DetailCard label="Bank" value=bank_name />
                        <DetailCard label="Account" value=account />
                        <DetailCard label="IFSC Code" value=ifsc />
                    </div>
                }
                .into_any()
            }
            LoanTab::Transactions => {
                let transactions = data.transactions.clone().unwrap_or_default();
                if transactions.is_empty() {
                    return view! { <EmptyState message="No transactions for this loan." /> }
                        .into_any();
                }
                view! {
                    <div class="overflow-x-auto">
                        <table class="w-full">
                            <thead class="bg-slate-50 border-b border-slate-200">
                                <tr>
                                    <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"Type"</th>
                                    <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"Amount"</th>
                                    <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"Date"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {transactions
                                    .into_iter()
                                    .map(|tx| {
                                        let type_label = match tx.transaction_type {
                                            Some(t) => format!("{t:?}"),
                                            None => "-".to_string(),
                                        };
                                        view! {
                                            <tr class="border-b border-slate-100">
                                                <td class="px-6 py-3 text-sm text-gray-900">{type_label}</td>
                                                <td class="px-6 py-3 text-sm text-gray-600">{money(tx.amount)}</td>
                                                <td class="px-6 py-3 text-sm text-gray-600">
                                                    {tx
                                                        .created_at
                                                        .as_deref()
                                                        .map(format::short_date_time)
                                                        .unwrap_or_else(|| "-".to_string())}
                                                </td>
                                            </tr>
                                        }
                                    })
                                    .collect_view()}
                            </tbody>
                        </table>
                    </div>
                }
                .into_any()
            }
            LoanTab::Review => {
                view! {
                    <form class="space-y-4 max-w-2xl" on:submit=submit_review>
                        <label class="flex items-center gap-2 text-sm text-slate-600">
                            <input
                                type="checkbox"
                                prop:checked=review_form.prefilled
                                on:change=move |_| {
                                    // 只抄一次，之后的人工修改不再被覆盖
                                    if let Some(data) = loan.get_untracked() {
                                        review_form.prefill_from(&data);
                                    }
                                }
                            />
                            "Use requested amount and tenure"
                        </label>
                        <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                            <div>
                                <label class="block text-xs font-medium text-slate-500 mb-1">
                                    "Principal Amount"
                                </label>
                                <input
                                    type="number"
                                    step="any"
                                    class="w-full px-4 py-2 rounded-lg border border-slate-300 focus:outline-none focus:border-[#1a3a6b]"
                                    on:input=move |ev| {
                                        review_form.principal_amount.set(event_target_value(&ev))
                                    }
                                    prop:value=review_form.principal_amount
                                />
                            </div>
                            <div>
                                <label class="block text-xs font-medium text-slate-500 mb-1">
                                    "Tenure (days)"
                                </label>
                                <input
                                    type="number"
                                    class="w-full px-4 py-2 rounded-lg border border-slate-300 focus:outline-none focus:border-[#1a3a6b]"
                                    on:input=move |ev| review_form.tenure.set(event_target_value(&ev))
                                    prop:value=review_form.tenure
                                />
                            </div>
                            <div>
                                <label class="block text-xs font-medium text-slate-500 mb-1">
                                    "Interest Type"
                                </label>
                                <select
                                    class="w-full px-4 py-2 rounded-lg border border-slate-300 bg-white focus:outline-none focus:border-[#1a3a6b]"
                                    on:change=move |ev| {
                                        let next = if event_target_value(&ev) == "reducing" {
                                            InterestType::Reducing
                                        } else {
                                            InterestType::Flat
                                        };
                                        review_form.intrest_type.set(next);
                                    }
                                >
                                    <option
                                        value="flat"
                                        selected=move || {
                                            review_form.intrest_type.get() == InterestType::Flat
                                        }
                                    >
                                        "Flat"
                                    </option>
                                    <option
                                        value="reducing"
                                        selected=move || {
                                            review_form.intrest_type.get() == InterestType::Reducing
                                        }
                                    >
                                        "Reducing"
                                    </option>
                                </select>
                            </div>
                            <div>
                                <label class="block text-xs font-medium text-slate-500 mb-1">
                                    "Interest Rate (% p.a.)"
                                </label>
                                <input
                                    type="number"
                                    step="any"
                                    class="w-full px-4 py-2 rounded-lg border border-slate-300 focus:outline-none focus:border-[#1a3a6b]"
                                    on:input=move |ev| {
                                        review_form.intrest_rate.set(event_target_value(&ev))
                                    }
                                    prop:value=review_form.intrest_rate
                                />
                            </div>
                            <div>
                                <label class="block text-xs font-medium text-slate-500 mb-1">
                                    "Total Interest"
                                </label>
                                <input
                                    type="number"
                                    step="any"
                                    class="w-full px-4 py-2 rounded-lg border border-slate-300 focus:outline-none focus:border-[#1a3a6b]"
                                    on:input=move |ev| {
                                        review_form.total_intrest.set(event_target_value(&ev))
                                    }
                                    prop:value=review_form.total_intrest
                                />
                            </div>
                            <div>
                                <label class="block text-xs font-medium text-slate-500 mb-1">
                                    "Total Amount Payable"
                                </label>
                                <input
                                    type="number"
                                    step="any"
                                    class="w-full px-4 py-2 rounded-lg border border-slate-300 focus:outline-none focus:border-[#1a3a6b]"
                                    on:input=move |ev| {
                                        review_form.total_amount_payable.set(event_target_value(&ev))
                                    }
                                    prop:value=review_form.total_amount_payable
                                />
                            </div>
                            <div>
                                <label class="block text-xs font-medium text-slate-500 mb-1">
                                    "Offer Expiry (days)"
                                </label>
                                <input
                                    type="number"
                                    class="w-full px-4 py-2 rounded-lg border border-slate-300 focus:outline-none focus:border-[#1a3a6b]"
                                    on:input=move |ev| {
                                        review_form.expiry_days.set(event_target_value(&ev))
                                    }
                                    prop:value=review_form.expiry_days
                                />
                            </div>
                        </div>
                        <div class="flex gap-3">
                            <button
                                type="button"
                                class="px-4 py-2 rounded-lg text-sm font-semibold border border-[#1a3a6b] text-[#1a3a6b] hover:bg-[#1a3a6b]/5"
                                on:click=on_calculate
                            >
                                "Calculate"
                            </button>
                            <button
                                type="submit"
                                class="px-4 py-2 rounded-lg text-sm font-semibold bg-[#1a3a6b] text-white hover:bg-[#1a3a6b]/90 disabled:opacity-60"
                                disabled=move || action_busy.get()
                            >
                                {move || if action_busy.get() { "Saving..." } else { "Save Review Terms" }}
                            </button>
                        </div>
                    </form>
                }
                .into_any()
            }
            LoanTab::FollowUp => {
                let follow_ups = data.follow_ups.clone().unwrap_or_default();
                view! {
                    <div class="space-y-6">
                        <form class="space-y-3 max-w-2xl" on:submit=submit_follow_up>
                            <div class="grid grid-cols-1 md:grid-cols-3 gap-3">
                                <select
                                    class="px-4 py-2 rounded-lg border border-slate-300 bg-white focus:outline-none focus:border-[#1a3a6b]"
                                    on:change=move |ev| {
                                        let value = event_target_value(&ev);
                                        if let Some(next) = FollowUpType::ALL
                                            .iter()
                                            .copied()
                                            .find(|t| t.as_str() == value)
                                        {
                                            follow_up_type.set(next);
                                        }
                                    }
                                >
                                    {FollowUpType::ALL
                                        .iter()
                                        .map(|t| {
                                            view! { <option value=t.as_str()>{t.label()}</option> }
                                        })
                                        .collect_view()}
                                </select>
                                <input
                                    type="date"
                                    class="px-4 py-2 rounded-lg border border-slate-300 focus:outline-none focus:border-[#1a3a6b]"
                                    on:input=move |ev| follow_up_date.set(event_target_value(&ev))
                                    prop:value=follow_up_date
                                />
                                <input
                                    type="date"
                                    class="px-4 py-2 rounded-lg border border-slate-300 focus:outline-none focus:border-[#1a3a6b]"
                                    on:input=move |ev| next_follow_up_date.set(event_target_value(&ev))
                                    prop:value=next_follow_up_date
                                />
                            </div>
                            <textarea
                                placeholder="Follow-up note..."
                                class="w-full px-4 py-2 rounded-lg border border-slate-300 focus:outline-none focus:border-[#1a3a6b]"
                                rows="3"
                                on:input=move |ev| note.set(event_target_value(&ev))
                                prop:value=note
                            ></textarea>
                            <button
                                type="submit"
                                class="px-4 py-2 rounded-lg text-sm font-semibold bg-[#1a3a6b] text-white hover:bg-[#1a3a6b]/90 disabled:opacity-60"
                                disabled=move || action_busy.get()
                            >
                                {move || if action_busy.get() { "Saving..." } else { "Add Follow-up" }}
                            </button>
                        </form>

                        {if follow_ups.is_empty() {
                            view! { <EmptyState message="No follow-ups yet." /> }.into_any()
                        } else {
                            follow_ups
                                .into_iter()
                                .map(|f| {
                                    let type_label =
                                        f.follow_up_type.map(|t| t.label()).unwrap_or("Other");
                                    view! {
                                        <div class="p-4 rounded-lg border border-slate-200">
                                            <div class="flex items-center justify-between mb-1">
                                                <span class="text-xs font-semibold uppercase text-[#1a3a6b]">
                                                    {type_label}
                                                </span>
                                                <span class="text-xs text-slate-400">
                                                    {f
                                                        .follow_up_date
                                                        .as_deref()
                                                        .map(format::short_date)
                                                        .unwrap_or_default()}
                                                </span>
                                            </div>
                                            <p class="text-sm text-slate-700">
                                                {f.note.clone().unwrap_or_else(|| "-".to_string())}
                                            </p>
                                            {f
                                                .next_follow_up_date
                                                .as_deref()
                                                .map(|next| {
                                                    view! {
                                                        <p class="text-xs text-slate-400 mt-1">
                                                            {format!("Next: {}", format::short_date(next))}
                                                        </p>
                                                    }
                                                })}
                                        </div>
                                    }
                                })
                                .collect_view()
                                .into_any()
                        }}
                    </div>
                }
                .into_any()
            }
            LoanTab::PaymentLink => view! {
                <div class="space-y-4 max-w-xl">
                    <form class="flex gap-3" on:submit=submit_payment_link>
                        <input
                            type="number"
                            step="any"
                            placeholder="Amount"
                            class="flex-1 px-4 py-2 rounded-lg border border-slate-300 focus:outline-none focus:border-[#1a3a6b]"
                            on:input=move |ev| link_amount.set(event_target_value(&ev))
                            prop:value=link_amount
                        />
                        <button
                            type="submit"
                            class="px-4 py-2 rounded-lg text-sm font-semibold bg-[#1a3a6b] text-white hover:bg-[#1a3a6b]/90 disabled:opacity-60"
                            disabled=move || action_busy.get()
                        >
                            {move || if action_busy.get() { "Generating..." } else { "Generate Link" }}
                        </button>
                    </form>

                    {move || {
                        payment_link
                            .get()
                            .map(|link| {
                                view! {
                                    <div class="flex items-center justify-between gap-3 p-4 rounded-lg border border-emerald-200 bg-emerald-50">
                                        <a
                                            class="text-sm text-emerald-700 font-medium break-all hover:underline"
                                            href=link.clone()
                                            target="_blank"
                                        >
                                            {link.clone()}
                                        </a>
                                        <button
                                            class="shrink-0 px-3 py-1.5 rounded-lg text-xs font-semibold border border-emerald-600 text-emerald-700 hover:bg-emerald-100"
                                            on:click=copy_link
                                        >
                                            {move || if copied.get() { "Copied!" } else { "Copy" }}
                                        </button>
                                    </div>
                                }
                            })
                    }}
                </div>
            }
            .into_any(),
        }
    };

    // ------------------------------------------------------------------
    // 页面
    // ------------------------------------------------------------------

    view! {
        <div class="space-y-6">
            <ErrorBanner message=error on_dismiss=move |_| set_error.set(None) />
            <SuccessBanner message=success />

            <Show
                when=move || loan.get().is_some()
                fallback=move || {
                    if loading.get() {
                        view! { <Spinner /> }.into_any()
                    } else {
                        view! { <EmptyState message="Loan not found." /> }.into_any()
                    }
                }
            >
                {move || {
                    loan.get()
                        .map(|data| {
                            view! {
                                <div class="bg-white rounded-xl border border-slate-200 shadow-sm p-6">
                                    <div class="flex flex-col md:flex-row md:items-center justify-between gap-4">
                                        <div>
                                            <h1 class="text-2xl font-bold text-gray-900">
                                                {data.loan_number.clone()}
                                            </h1>
                                            <p class="text-gray-500 text-sm">
                                                {format!("Created {}", date_or_dash(&data.created_at))}
                                            </p>
                                        </div>
                                        <span class=loan_badge_class(data.status)>
                                            {data.status.label()}
                                        </span>
                                    </div>
                                </div>
                            }
                        })
                }}

                <div class="bg-white rounded-xl border border-slate-200 shadow-sm overflow-hidden">
                    <div class="flex flex-wrap border-b border-slate-200">
                        {move || {
                            let tabs = loan
                                .get()
                                .map(|l| LoanTab::visible(&l))
                                .unwrap_or_default();
                            tabs.into_iter()
                                .map(|tab| {
                                    let is_active = move || active_tab.get() == tab;
                                    view! {
                                        <button
                                            class="px-4 py-3 text-sm font-medium text-slate-600 border-b-2 border-transparent hover:text-[#1a3a6b] transition"
                                            class=("!border-[#1a3a6b]", is_active)
                                            class=("!text-[#1a3a6b]", is_active)
                                            on:click=move |_| {
                                                if active_tab.get_untracked() != tab {
                                                    active_tab.set(tab);
                                                }
                                            }
                                        >
                                            {tab.label()}
                                        </button>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                    <div class="p-6">{tab_content}</div>
                </div>
            </Show>
        </div>
    }
}
