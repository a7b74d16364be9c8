//! 用户详情
//!
//! 标签页按需拉取切片：basic 之外的每个标签对应一次
//! `?field=` 请求，切换标签即重拉。代理标签里带一个 500ms
//! 防抖的代理搜索，用于新增分配。

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use mudra_shared::format;
use mudra_shared::models::{Admin, KycStatus, UserDetail, UserDetailField};
use mudra_shared::requests::{AssignAgentRequest, KycUpdateRequest};

use crate::api::admins::AdminApi;
use crate::api::users::UserApi;
use crate::auth::{api_client, expire_session, use_auth};
use crate::components::ui::{
    EmptyState, ErrorBanner, Spinner, SuccessBanner, kyc_badge_class, loan_badge_class,
};

/// 详情页标签
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UserTab {
    Basic,
    Bank,
    Addresses,
    Documents,
    Loans,
    Activity,
    Transactions,
    Agents,
    Contacts,
    FollowUps,
}

impl UserTab {
    const ALL: [UserTab; 10] = [
        UserTab::Basic,
        UserTab::Bank,
        UserTab::Addresses,
        UserTab::Documents,
        UserTab::Loans,
        UserTab::Activity,
        UserTab::Transactions,
        UserTab::Agents,
        UserTab::Contacts,
        UserTab::FollowUps,
    ];

    fn label(&self) -> &'static str {
        match self {
            UserTab::Basic => "Basic Info",
            UserTab::Bank => "Bank Details",
            UserTab::Addresses => "Addresses",
            UserTab::Documents => "Documents",
            UserTab::Loans => "Loans",
            UserTab::Activity => "Activity",
            UserTab::Transactions => "Transactions",
            UserTab::Agents => "Agents",
            UserTab::Contacts => "Contacts",
            UserTab::FollowUps => "Follow-ups",
        }
    }

    /// 标签对应的服务端切片；basic 只要用户本体
    fn field(&self) -> Option<UserDetailField> {
        match self {
            UserTab::Basic => None,
            UserTab::Bank => Some(UserDetailField::BankDetails),
            UserTab::Addresses => Some(UserDetailField::Addresses),
            UserTab::Documents => Some(UserDetailField::Documents),
            UserTab::Loans => Some(UserDetailField::Loans),
            UserTab::Activity => Some(UserDetailField::Activity),
            UserTab::Transactions => Some(UserDetailField::Transactions),
            UserTab::Agents => Some(UserDetailField::Agents),
            UserTab::Contacts => Some(UserDetailField::ContactsList),
            UserTab::FollowUps => Some(UserDetailField::FollowUps),
        }
    }
}

/// 搜索已结束且无命中时展示空态，进行中或未搜索时不展示
fn show_no_agent_matches(search_done: bool, search_busy: bool, match_count: usize) -> bool {
    search_done && !search_busy && match_count == 0
}

fn value_or_dash(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| "-".to_string())
}

#[component]
fn InfoCard(#[prop(into)] label: String, #[prop(into)] value: String) -> impl IntoView {
    view! {
        <div class="p-4 rounded-lg border border-slate-200 bg-slate-50">
            <p class="text-xs text-slate-500 font-medium">{label}</p>
            <p class="text-sm font-semibold text-slate-900 mt-1">{value}</p>
        </div>
    }
}

#[component]
pub fn UserDetailPage(user_id: i64) -> impl IntoView {
    let auth = use_auth();

    let detail = RwSignal::new(Option::<UserDetail>::None);
    let active_tab = RwSignal::new(UserTab::Basic);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal(Option::<String>::None);
    let (success, set_success) = signal(Option::<String>::None);
    let (action_busy, set_action_busy) = signal(false);
    // KYC 驳回原因输入
    let (reject_reason, set_reject_reason) = signal(String::new());
    let (show_reject, set_show_reject) = signal(false);
    // 代理搜索（500ms 防抖）
    let (agent_search, set_agent_search) = signal(String::new());
    let (available_agents, set_available_agents) = signal(Vec::<Admin>::new());
    let (agent_search_busy, set_agent_search_busy) = signal(false);
    let (agent_search_done, set_agent_search_done) = signal(false);
    let debounce = StoredValue::new_local(Option::<Timeout>::None);
    let generation = StoredValue::new(0u64);
    let agent_generation = StoredValue::new(0u64);

    let load = move || {
        let tab = active_tab.get_untracked();
        let api = UserApi::new(api_client(&auth.state.get_untracked()));
        let r#gen = generation
            .try_update_value(|g| {
                *g += 1;
                *g
            })
            .unwrap_or(0);
        set_loading.set(true);
        spawn_local(async move {
            let result = api.detail(user_id, tab.field()).await;
            if generation.try_get_value() != Some(r#gen) {
                return;
            }
            match result {
                Ok(data) => {
                    detail.set(Some(data));
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
        active_tab.track();
        load();
    });
    on_cleanup(move || {
        let _ = generation.try_update_value(|g| *g += 1);
        let _ = agent_generation.try_update_value(|g| *g += 1);
    });

    // ------------------------------------------------------------------
    // 操作
    // ------------------------------------------------------------------

    let toggle_block = move |_| {
        let Some(current) = detail.get_untracked() else {
            return;
        };
        let api = UserApi::new(api_client(&auth.state.get_untracked()));
        let is_blocked = current.user.is_blocked;
        set_action_busy.set(true);
        spawn_local(async move {
            let result = if is_blocked {
                api.restore(user_id).await
            } else {
                api.block(user_id).await
            };
            match result {
                Ok(_) => load(),
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

    let submit_kyc = move |request: KycUpdateRequest| {
        let api = UserApi::new(api_client(&auth.state.get_untracked()));
        set_action_busy.set(true);
        spawn_local(async move {
            match api.update_kyc(user_id, &request).await {
                Ok(res) => {
                    set_show_reject.set(false);
                    set_reject_reason.set(String::new());
                    set_success.set(Some(
                        res.message
                            .unwrap_or_else(|| "KYC status updated".to_string()),
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

    let verify_kyc = move |_| submit_kyc(KycUpdateRequest::verify());
    let reject_kyc = move |_| match KycUpdateRequest::reject(&reject_reason.get_untracked()) {
        Ok(request) => submit_kyc(request),
        Err(err) => set_error.set(Some(err.message)),
    };

    // 防抖搜索可分配的代理
    let on_agent_search = move |ev: leptos::web_sys::Event| {
        let term = event_target_value(&ev);
        set_agent_search.set(term.clone());
        if term.trim().is_empty() {
            set_available_agents.set(Vec::new());
            set_agent_search_done.set(false);
            debounce.set_value(None);
            return;
        }
        let api = AdminApi::new(api_client(&auth.state.get_untracked()));
        // 旧计时器随赋值 Drop 取消
        debounce.set_value(Some(Timeout::new(500, move || {
            let r#gen = agent_generation
                .try_update_value(|g| {
                    *g += 1;
                    *g
                })
                .unwrap_or(0);
            set_agent_search_busy.set(true);
            let api = api.clone();
            spawn_local(async move {
                let result = api.list(true).await;
                if agent_generation.try_get_value() != Some(r#gen) {
                    return;
                }
                match result {
                    Ok(agents) => {
                        let term = agent_search.get_untracked();
                        set_available_agents.set(
                            agents
                                .into_iter()
                                .filter(|a| a.matches_term(&term))
                                .collect(),
                        );
                        set_agent_search_done.set(true);
                    }
                    Err(err) => {
                        if err.is_auth_expired() {
                            expire_session(auth);
                            return;
                        }
                        set_error.set(Some(err.message));
                    }
                }
                set_agent_search_busy.set(false);
            });
        })));
    };

    let assign_agent = move |agent_id: i64| {
        let api = AdminApi::new(api_client(&auth.state.get_untracked()));
        set_action_busy.set(true);
        spawn_local(async move {
            let request = AssignAgentRequest { user_id, agent_id };
            match api.assign_agent(&request).await {
                Ok(_) => {
                    set_agent_search.set(String::new());
                    set_available_agents.set(Vec::new());
                    set_agent_search_done.set(false);
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

    let unassign_agent = move |agent_id: i64| {
        let api = AdminApi::new(api_client(&auth.state.get_untracked()));
        set_action_busy.set(true);
        spawn_local(async move {
            let request = AssignAgentRequest { user_id, agent_id };
            match api.unassign_agent(&request).await {
                Ok(_) => load(),
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

    // ------------------------------------------------------------------
    // 标签内容
    // ------------------------------------------------------------------

    let tab_content = move || {
        let Some(data) = detail.get() else {
            return view! { <Spinner /> }.into_any();
        };
        match active_tab.get() {
            UserTab::Basic => {
                let user = data.user.clone();
                view! {
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        <InfoCard label="Name" value=user.name.clone() />
                        <InfoCard label="Email" value=user.email.clone() />
                        <InfoCard label="Phone" value=user.phone.clone() />
                        <InfoCard label="Gender" value=value_or_dash(&user.gender) />
                        <InfoCard label="Date of Birth" value=value_or_dash(&user.dob) />
                        <InfoCard
                            label="Employment"
                            value=value_or_dash(&user.employment_type)
                        />
                        <InfoCard label="Company" value=value_or_dash(&user.company_name) />
                        <InfoCard
                            label="Monthly Income"
                            value=user
                                .net_monthly_income
                                .map(format::inr)
                                .unwrap_or_else(|| "-".to_string())
                        />
                    </div>
                }
                .into_any()
            }
            UserTab::Bank => {
                let banks = data.bank_details.clone().unwrap_or_default();
                if banks.is_empty() {
                    return view! { <EmptyState message="No bank details on file." /> }.into_any();
                }
                view! {
                    <div class="space-y-4">
                        {banks
                            .into_iter()
                            .map(|bank| {
                                view! {
                                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4 p-4 rounded-lg border border-slate-200">
                                        <InfoCard label="Bank" value=value_or_dash(&bank.bank_name) />
                                        <InfoCard
                                            label="Account Holder"
                                            value=value_or_dash(&bank.account_holder_name)
                                        />
                                        <InfoCard
                                            label="Account Number"
                                            value=bank
                                                .account_number
                                                .as_deref()
                                                .map(format::mask_account)
                                                .unwrap_or_else(|| "-".to_string())
                                        />
                                        <InfoCard label="IFSC Code" value=value_or_dash(&bank.ifsc_code) />
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                }
                .into_any()
            }
            UserTab::Addresses => {
                let addresses = data.addresses.clone().unwrap_or_default();
                if addresses.is_empty() {
                    return view! { <EmptyState message="No addresses on file." /> }.into_any();
                }
                view! {
                    <div class="space-y-4">
                        {addresses
                            .into_iter()
                            .map(|addr| {
                                let line = [&addr.street, &addr.city, &addr.state, &addr.pin_code]
                                    .iter()
                                    .filter_map(|part| part.as_deref())
                                    .filter(|part| !part.is_empty())
                                    .collect::<Vec<_>>()
                                    .join(", ");
                                view! {
                                    <div class="p-4 rounded-lg border border-slate-200">
                                        <p class="text-xs text-slate-500 font-medium uppercase">
                                            {value_or_dash(&addr.address_type)}
                                        </p>
                                        <p class="text-sm text-slate-900 mt-1">{line}</p>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                }
                .into_any()
            }
            UserTab::Documents => {
                let documents = data.documents.clone().unwrap_or_default();
                if documents.is_empty() {
                    return view! { <EmptyState message="No documents uploaded." /> }.into_any();
                }
                view! {
                    <div class="grid grid-cols-1 md:grid-cols-2 gap-4">
                        {documents
                            .into_iter()
                            .map(|doc| {
                                view! {
                                    <div class="flex items-center justify-between p-4 rounded-lg border border-slate-200">
                                        <div>
                                            <p class="text-sm font-semibold text-slate-900">
                                                {value_or_dash(&doc.document_type)}
                                            </p>
                                            <p class="text-xs text-slate-500 mt-1">
                                                {doc
                                                    .created_at
                                                    .as_deref()
                                                    .map(format::short_date)
                                                    .unwrap_or_else(|| "-".to_string())}
                                            </p>
                                        </div>
                                        {doc
                                            .document_url
                                            .map(|url| {
                                                view! {
                                                    <a
                                                        class="text-sm font-medium text-[#1a3a6b] hover:underline"
                                                        href=url
                                                        target="_blank"
                                                    >
                                                        "Open"
                                                    </a>
                                                }
                                            })}
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                }
                .into_any()
            }
            UserTab::Loans => {
                let loans = data.loans.clone().unwrap_or_default();
                if loans.is_empty() {
                    return view! { <EmptyState message="No loans for this user." /> }.into_any();
                }
                view! {
                    <div class="space-y-4">
                        {loans
                            .into_iter()
                            .map(|loan| {
                                let money = |v: Option<f64>| {
                                    v.map(format::inr).unwrap_or_else(|| "-".to_string())
                                };
                                view! {
                                    <div class="p-4 rounded-lg border border-slate-200">
                                        <div class="flex items-center justify-between mb-3">
                                            <h3 class="font-semibold text-gray-900">{loan.loan_number.clone()}</h3>
                                            <span class=loan_badge_class(loan.status)>{loan.status.label()}</span>
                                        </div>
                                        <div class="grid grid-cols-2 md:grid-cols-4 gap-4">
                                            <InfoCard label="Principal" value=money(loan.principal_amount) />
                                            <InfoCard label="Total Payable" value=money(loan.total_amount_payable) />
                                            <InfoCard label="Paid" value=money(loan.amount_paid) />
                                            <InfoCard label="Remaining" value=format::inr(loan.outstanding()) />
                                        </div>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                }
                .into_any()
            }
            UserTab::Activity => {
                let events = data.activity.clone().unwrap_or_default();
                if events.is_empty() {
                    return view! { <EmptyState message="No recent activity." /> }.into_any();
                }
                view! {
                    <div class="space-y-3">
                        {events
                            .into_iter()
                            .map(|event| {
                                view! {
                                    <div class="flex items-start justify-between p-4 rounded-lg border border-slate-200">
                                        <div>
                                            <p class="text-sm font-semibold text-slate-900">
                                                {value_or_dash(&event.action)}
                                            </p>
                                            <p class="text-sm text-slate-500 mt-1">
                                                {value_or_dash(&event.description)}
                                            </p>
                                        </div>
                                        <span class="text-xs text-slate-400">
                                            {event
                                                .created_at
                                                .as_deref()
                                                .map(format::short_date_time)
                                                .unwrap_or_default()}
                                        </span>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                }
                .into_any()
            }
            UserTab::Transactions => {
                let transactions = data.transactions.clone().unwrap_or_default();
                if transactions.is_empty() {
                    return view! { <EmptyState message="No transactions recorded." /> }.into_any();
                }
                view! {
                    <div class="overflow-x-auto">
                        <table class="w-full">
                            <thead class="bg-slate-50 border-b border-slate-200">
                                <tr>
                                    <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"Type"</th>
                                    <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"Amount"</th>
                                    <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"Loan"</th>
                                    <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"Date"</th>
                                </tr>
                            </thead>
                            <tbody>
                                {transactions
                                    .into_iter()
                                    .map(|tx| {
                                        let type_label = tx
                                            .transaction_type
                                            .map(|t| format!("{t:?}"))
                                            .unwrap_or_else(|| "-".to_string());
                                        view! {
                                            <tr class="border-b border-slate-100">
                                                <td class="px-6 py-3 text-sm text-gray-900">{type_label}</td>
                                                <td class="px-6 py-3 text-sm text-gray-600">
                                                    {tx.amount.map(format::inr).unwrap_or_else(|| "-".to_string())}
                                                </td>
                                                <td class="px-6 py-3 text-sm text-gray-600">
                                                    {tx
                                                        .loan
                                                        .and_then(|l| l.loan_number)
                                                        .unwrap_or_else(|| "-".to_string())}
                                                </td>
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
            UserTab::Agents => {
                let agents = data.agents.clone().unwrap_or_default();
                view! {
                    <div class="space-y-6">
                        <div>
                            <h3 class="text-sm font-semibold text-slate-700 mb-3">"Assigned Agents"</h3>
                            {if agents.is_empty() {
                                view! { <EmptyState message="No agents assigned." /> }.into_any()
                            } else {
                                agents
                                    .into_iter()
                                    .map(|agent| {
                                        let agent_id = agent.id;
                                        view! {
                                            <div class="flex items-center justify-between p-4 rounded-lg border border-slate-200 mb-2">
                                                <div>
                                                    <p class="text-sm font-semibold text-slate-900">{agent.name.clone()}</p>
                                                    <p class="text-xs text-slate-500">{agent.email.clone()}</p>
                                                </div>
                                                <button
                                                    class="text-sm font-medium text-red-600 hover:underline disabled:opacity-40"
                                                    disabled=move || action_busy.get()
                                                    on:click=move |_| unassign_agent(agent_id)
                                                >
                                                    "Unassign"
                                                </button>
                                            </div>
                                        }
                                    })
                                    .collect_view()
                                    .into_any()
                            }}
                        </div>

                        <div>
                            <h3 class="text-sm font-semibold text-slate-700 mb-3">"Assign New Agent"</h3>
                            <input
                                type="text"
                                placeholder="Search agents by name or email..."
                                class="w-full px-4 py-2 rounded-lg border border-slate-300 focus:outline-none focus:border-[#1a3a6b]"
                                on:input=on_agent_search
                                prop:value=agent_search
                            />
                            <Show when=move || agent_search_busy.get()>
                                <p class="text-xs text-slate-400 mt-2">"Searching..."</p>
                            </Show>
                            <Show when=move || {
                                show_no_agent_matches(
                                    agent_search_done.get(),
                                    agent_search_busy.get(),
                                    available_agents.with(Vec::len),
                                )
                            }>
                                <EmptyState message="No agents match your search." />
                            </Show>
                            <div class="mt-3 space-y-2">
                                <For each=move || available_agents.get() key=|agent| agent.id let:agent>
                                    {
                                        let agent_id = agent.id;
                                        view! {
                                            <div class="flex items-center justify-between p-3 rounded-lg border border-slate-200 hover:bg-slate-50">
                                                <div>
                                                    <p class="text-sm font-semibold text-slate-900">{agent.name.clone()}</p>
                                                    <p class="text-xs text-slate-500">{agent.email.clone()}</p>
                                                </div>
                                                <button
                                                    class="text-sm font-medium text-[#1a3a6b] hover:underline disabled:opacity-40"
                                                    disabled=move || action_busy.get()
                                                    on:click=move |_| assign_agent(agent_id)
                                                >
                                                    "Assign"
                                                </button>
                                            </div>
                                        }
                                    }
                                </For>
                            </div>
                        </div>
                    </div>
                }
                .into_any()
            }
            UserTab::Contacts => {
                let contacts = data.contactslist.clone().unwrap_or_default();
                if contacts.is_empty() {
                    return view! { <EmptyState message="No contacts shared." /> }.into_any();
                }
                view! {
                    <div class="grid grid-cols-1 md:grid-cols-3 gap-3">
                        {contacts
                            .into_iter()
                            .map(|contact| {
                                view! {
                                    <div class="p-3 rounded-lg border border-slate-200">
                                        <p class="text-sm font-semibold text-slate-900">
                                            {value_or_dash(&contact.name)}
                                        </p>
                                        <p class="text-xs text-slate-500">{value_or_dash(&contact.phone)}</p>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                }
                .into_any()
            }
            UserTab::FollowUps => {
                let follow_ups = data.follow_ups.clone().unwrap_or_default();
                if follow_ups.is_empty() {
                    return view! { <EmptyState message="No follow-ups recorded." /> }.into_any();
                }
                view! {
                    <div class="space-y-3">
                        {follow_ups
                            .into_iter()
                            .map(|f| {
                                let type_label = f
                                    .follow_up_type
                                    .map(|t| t.label())
                                    .unwrap_or("Other");
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
                                        <p class="text-sm text-slate-700">{value_or_dash(&f.note)}</p>
                                    </div>
                                }
                            })
                            .collect_view()}
                    </div>
                }
                .into_any()
            }
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
                when=move || detail.get().is_some()
                fallback=move || {
                    if loading.get() {
                        view! { <Spinner /> }.into_any()
                    } else {
                        view! { <EmptyState message="User not found." /> }.into_any()
                    }
                }
            >
                // 头部：姓名 + 状态卡 + 拉黑/恢复
                {move || {
                    detail
                        .get()
                        .map(|data| {
                            let user = data.user.clone();
                            let blocked = user.is_blocked;
                            view! {
                                <div class="bg-white rounded-xl border border-slate-200 shadow-sm p-6">
                                    <div class="flex flex-col md:flex-row md:items-center justify-between gap-4">
                                        <div>
                                            <h1 class="text-2xl font-bold text-gray-900">{user.name.clone()}</h1>
                                            <p class="text-gray-500 text-sm">{user.email.clone()}</p>
                                        </div>
                                        <button
                                            class=if blocked {
                                                "px-4 py-2 rounded-lg font-semibold text-sm bg-emerald-600 text-white hover:bg-emerald-700 transition disabled:opacity-60"
                                            } else {
                                                "px-4 py-2 rounded-lg font-semibold text-sm bg-red-600 text-white hover:bg-red-700 transition disabled:opacity-60"
                                            }
                                            disabled=move || action_busy.get()
                                            on:click=toggle_block
                                        >
                                            {if blocked { "Restore/Unblock User" } else { "Block User" }}
                                        </button>
                                    </div>

                                    <div class="grid grid-cols-1 md:grid-cols-3 gap-4 mt-6">
                                        <div class="p-4 rounded-lg border border-slate-200">
                                            <p class="text-xs text-slate-500 font-medium">"KYC Status"</p>
                                            <span class=kyc_badge_class(user.kyc_status)>
                                                {user.kyc_status.label()}
                                            </span>
                                        </div>
                                        <InfoCard
                                            label="Verified"
                                            value=if user.is_verified { "Yes" } else { "No" }
                                        />
                                        <InfoCard label="Blocked" value=if blocked { "Yes" } else { "No" } />
                                    </div>

                                    // KYC 审核结论，仅 submitted 状态可操作
                                    <Show when=move || {
                                        detail
                                            .get()
                                            .map(|d| d.user.kyc_status == KycStatus::Submitted)
                                            .unwrap_or(false)
                                    }>
                                        <div class="mt-6 p-4 rounded-lg border border-blue-200 bg-blue-50">
                                            <p class="text-sm font-semibold text-slate-800 mb-3">
                                                "KYC submission awaiting decision"
                                            </p>
                                            <div class="flex flex-wrap items-center gap-3">
                                                <button
                                                    class="px-4 py-2 rounded-lg text-sm font-semibold bg-emerald-600 text-white hover:bg-emerald-700 disabled:opacity-60"
                                                    disabled=move || action_busy.get()
                                                    on:click=verify_kyc
                                                >
                                                    "Verify"
                                                </button>
                                                <button
                                                    class="px-4 py-2 rounded-lg text-sm font-semibold bg-red-600 text-white hover:bg-red-700 disabled:opacity-60"
                                                    disabled=move || action_busy.get()
                                                    on:click=move |_| set_show_reject.update(|v| *v = !*v)
                                                >
                                                    "Reject"
                                                </button>
                                            </div>
                                            <Show when=move || show_reject.get()>
                                                <div class="mt-3 flex flex-col md:flex-row gap-3">
                                                    <input
                                                        type="text"
                                                        placeholder="Reason for rejection (required)"
                                                        class="flex-1 px-4 py-2 rounded-lg border border-slate-300 focus:outline-none focus:border-[#1a3a6b]"
                                                        on:input=move |ev| set_reject_reason.set(event_target_value(&ev))
                                                        prop:value=reject_reason
                                                    />
                                                    <button
                                                        class="px-4 py-2 rounded-lg text-sm font-semibold bg-red-600 text-white hover:bg-red-700 disabled:opacity-60"
                                                        disabled=move || action_busy.get()
                                                        on:click=reject_kyc
                                                    >
                                                        "Confirm Rejection"
                                                    </button>
                                                </div>
                                            </Show>
                                        </div>
                                    </Show>
                                </div>
                            }
                        })
                }}

                // 标签栏
                <div class="bg-white rounded-xl border border-slate-200 shadow-sm overflow-hidden">
                    <div class="flex flex-wrap border-b border-slate-200">
                        {UserTab::ALL
                            .iter()
                            .map(|tab| {
                                let tab = *tab;
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
                            .collect_view()}
                    </div>
                    <div class="p-6">
                        <Show when=move || !loading.get() fallback=|| view! { <Spinner /> }>
                            {tab_content}
                        </Show>
                    </div>
                </div>
            </Show>
        </div>
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_state_only_after_completed_search() {
        // 搜索结束且零命中才展示空态
        assert!(show_no_agent_matches(true, false, 0));
        // 有命中不展示
        assert!(!show_no_agent_matches(true, false, 3));
        // 请求还在途不展示
        assert!(!show_no_agent_matches(true, true, 0));
        // 尚未搜索（输入被清空）不展示
        assert!(!show_no_agent_matches(false, false, 0));
    }
}
