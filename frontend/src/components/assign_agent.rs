//! 用户-代理分配（仅 admin 可达）
//!
//! 两步操作：先选代理，再勾选一批用户，一次提交逐个调用
//! 分配端点。用户与代理各有一个本地搜索框，数据在进入页面时
//! 一次性拉齐。

use std::collections::HashSet;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use leptos::task::spawn_local;
use mudra_shared::models::{Admin, User};
use mudra_shared::query::{ListQuery, UserScope};
use mudra_shared::requests::AssignAgentRequest;

use crate::api::admins::AdminApi;
use crate::api::users::UserApi;
use crate::auth::{api_client, expire_session, use_auth};
use crate::components::ui::{EmptyState, ErrorBanner, Spinner, SuccessBanner, kyc_badge_class};

#[component]
pub fn AssignAgentPage() -> impl IntoView {
    let auth = use_auth();

    let (users, set_users) = signal(Vec::<User>::new());
    let (agents, set_agents) = signal(Vec::<Admin>::new());
    let (selected_agent, set_selected_agent) = signal(Option::<Admin>::None);
    let selected_users = RwSignal::new(HashSet::<i64>::new());
    let (search, set_search) = signal(String::new());
    let (agent_search, set_agent_search) = signal(String::new());
    let (loading, set_loading) = signal(true);
    let (assigning, set_assigning) = signal(false);
    let (error, set_error) = signal(Option::<String>::None);
    let (success, set_success) = signal(Option::<String>::None);
    let generation = StoredValue::new(0u64);
    // 成功横幅的自动消隐，重新赋值时旧计时器随 Drop 取消
    let success_timer = StoredValue::new_local(Option::<Timeout>::None);

    let load = move || {
        let state = auth.state.get_untracked();
        let user_api = UserApi::new(api_client(&state));
        let admin_api = AdminApi::new(api_client(&state));
        let r#gen = generation
            .try_update_value(|g| {
                *g += 1;
                *g
            })
            .unwrap_or(0);
        set_loading.set(true);
        spawn_local(async move {
            let users_result = user_api.list(&ListQuery::new(UserScope::All)).await;
            let agents_result = admin_api.list(true).await;
            if generation.try_get_value() != Some(r#gen) {
                return;
            }
            match (users_result, agents_result) {
                (Ok(users), Ok(agents)) => {
                    set_users.set(users.users);
                    set_agents.set(agents);
                    set_error.set(None);
                }
                (Err(err), _) | (_, Err(err)) => {
                    if err.is_auth_expired() {
                        expire_session(auth);
                        return;
                    }
                    set_error.set(Some(format!("Failed to load data: {}", err.message)));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| load());
    on_cleanup(move || {
        let _ = generation.try_update_value(|g| *g += 1);
    });

    let toggle_user = move |user_id: i64| {
        selected_users.update(|selected| {
            if !selected.remove(&user_id) {
                selected.insert(user_id);
            }
        });
    };

    let assign_selected = move |_| {
        let Some(agent) = selected_agent.get_untracked() else {
            return;
        };
        let user_ids: Vec<i64> = selected_users.get_untracked().into_iter().collect();
        if user_ids.is_empty() {
            return;
        }

        let api = AdminApi::new(api_client(&auth.state.get_untracked()));
        set_assigning.set(true);
        set_error.set(None);
        spawn_local(async move {
            let mut failed = None;
            for user_id in &user_ids {
                let request = AssignAgentRequest {
                    user_id: *user_id,
                    agent_id: agent.id,
                };
                if let Err(err) = api.assign_agent(&request).await {
                    if err.is_auth_expired() {
                        expire_session(auth);
                        return;
                    }
                    failed = Some(err);
                    break;
                }
            }

            match failed {
                None => {
                    set_success.set(Some(format!(
                        "Successfully assigned {} users to {}",
                        user_ids.len(),
                        agent.name
                    )));
                    selected_users.set(HashSet::new());
                    set_selected_agent.set(None);
                    load();
                    success_timer.set_value(Some(Timeout::new(3000, move || {
                        set_success.set(None);
                    })));
                }
                Some(err) => {
                    set_error.set(Some(format!("Failed to assign: {}", err.message)));
                }
            }
            set_assigning.set(false);
        });
    };

    let filtered_users = move || {
        let term = search.get();
        users
            .get()
            .into_iter()
            .filter(|u| u.matches_term(&term))
            .collect::<Vec<_>>()
    };
    let filtered_agents = move || {
        let term = agent_search.get();
        agents
            .get()
            .into_iter()
            .filter(|a| a.matches_term(&term))
            .collect::<Vec<_>>()
    };
    let selection_count = move || selected_users.with(HashSet::len);

    view! {
        <Show when=move || !loading.get() fallback=|| view! { <Spinner /> }>
            <div class="space-y-6">
                <div class="flex flex-col md:flex-row md:items-center justify-between gap-4 bg-white p-6 rounded-xl border border-slate-200 shadow-sm">
                    <div>
                        <h1 class="text-2xl font-bold text-gray-900">"Agent Assignment"</h1>
                        <p class="text-gray-500 text-sm">
                            "Map multiple users to a dedicated service agent"
                        </p>
                    </div>
                    <button
                        class="px-6 py-2.5 bg-[#1a3a6b] text-white rounded-lg hover:bg-[#1a3a6b]/90 disabled:opacity-40 transition font-semibold"
                        disabled=move || {
                            assigning.get() || selected_agent.get().is_none() || selection_count() == 0
                        }
                        on:click=assign_selected
                    >
                        {move || {
                            if assigning.get() {
                                "Assigning...".to_string()
                            } else if selection_count() > 0 {
                                format!("Assign {} Users", selection_count())
                            } else {
                                "Assign Selected".to_string()
                            }
                        }}
                    </button>
                </div>

                <ErrorBanner message=error on_dismiss=move |_| set_error.set(None) />
                <SuccessBanner message=success />

                // 第一步：选择代理
                <div class="bg-white rounded-xl border border-slate-200 shadow-sm overflow-hidden">
                    <div class="px-6 py-4 border-b border-slate-100 bg-slate-50">
                        <h2 class="text-sm font-semibold text-slate-700 uppercase tracking-wider">
                            "Step 1: Select Target Agent"
                        </h2>
                    </div>
                    <div class="p-6">
                        <Show
                            when=move || selected_agent.get().is_none()
                            fallback=move || {
                                view! {
                                    {move || {
                                        selected_agent
                                            .get()
                                            .map(|agent| {
                                                view! {
                                                    <div class="flex items-center justify-between p-4 rounded-lg border border-[#1a3a6b]/30 bg-[#1a3a6b]/5">
                                                        <div>
                                                            <p class="font-semibold text-slate-900">{agent.name.clone()}</p>
                                                            <p class="text-sm text-slate-500">{agent.email.clone()}</p>
                                                        </div>
                                                        <button
                                                            class="text-sm font-medium text-red-600 hover:underline"
                                                            on:click=move |_| set_selected_agent.set(None)
                                                        >
                                                            "Change"
                                                        </button>
                                                    </div>
                                                }
                                            })
                                    }}
                                }
                            }
                        >
                            <input
                                type="text"
                                placeholder="Search agents by name, email or phone..."
                                class="w-full px-4 py-2 rounded-lg border border-slate-300 focus:outline-none focus:border-[#1a3a6b] mb-4"
                                on:input=move |ev| set_agent_search.set(event_target_value(&ev))
                                prop:value=agent_search
                            />
                            <Show
                                when=move || !filtered_agents().is_empty()
                                fallback=|| view! { <EmptyState message="No agents match your search." /> }
                            >
                                <div class="grid grid-cols-1 md:grid-cols-3 gap-3">
                                    <For each=filtered_agents key=|agent| agent.id let:agent>
                                        {
                                            let pick = agent.clone();
                                            view! {
                                                <button
                                                    class="text-left p-4 rounded-lg border border-slate-200 hover:border-[#1a3a6b] hover:bg-slate-50 transition"
                                                    on:click=move |_| set_selected_agent.set(Some(pick.clone()))
                                                >
                                                    <p class="font-semibold text-slate-900">{agent.name.clone()}</p>
                                                    <p class="text-sm text-slate-500">{agent.email.clone()}</p>
                                                </button>
                                            }
                                        }
                                    </For>
                                </div>
                            </Show>
                        </Show>
                    </div>
                </div>

                // 第二步：勾选用户
                <div class="bg-white rounded-xl border border-slate-200 shadow-sm overflow-hidden">
                    <div class="flex items-center justify-between px-6 py-4 border-b border-slate-100 bg-slate-50">
                        <h2 class="text-sm font-semibold text-slate-700 uppercase tracking-wider">
                            "Step 2: Select Users"
                        </h2>
                        <input
                            type="text"
                            placeholder="Search users..."
                            class="w-64 px-4 py-2 rounded-lg border border-slate-300 focus:outline-none focus:border-[#1a3a6b]"
                            on:input=move |ev| set_search.set(event_target_value(&ev))
                            prop:value=search
                        />
                    </div>
                    <Show
                        when=move || !filtered_users().is_empty()
                        fallback=|| view! { <EmptyState message="No users match your search." /> }
                    >
                        <div class="overflow-x-auto">
                            <table class="w-full">
                                <thead class="bg-slate-50 border-b border-slate-200">
                                    <tr>
                                        <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"Select"</th>
                                        <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"Name"</th>
                                        <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"Email"</th>
                                        <th class="px-6 py-3 text-left text-xs font-semibold text-slate-500 uppercase">"KYC"</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    <For each=filtered_users key=|user| user.id let:user>
                                        {
                                            let user_id = user.id;
                                            let checked = move || selected_users.with(|s| s.contains(&user_id));
                                            view! {
                                                <tr
                                                    class="border-b border-slate-100 hover:bg-slate-50 cursor-pointer"
                                                    on:click=move |_| toggle_user(user_id)
                                                >
                                                    <td class="px-6 py-3">
                                                        <input type="checkbox" prop:checked=checked />
                                                    </td>
                                                    <td class="px-6 py-3 text-sm font-medium text-gray-900">{user.name.clone()}</td>
                                                    <td class="px-6 py-3 text-sm text-gray-600">{user.email.clone()}</td>
                                                    <td class="px-6 py-3">
                                                        <span class=kyc_badge_class(user.kyc_status)>
                                                            {user.kyc_status.label()}
                                                        </span>
                                                    </td>
                                                </tr>
                                            }
                                        }
                                    </For>
                                </tbody>
                            </table>
                        </div>
                    </Show>
                </div>
            </div>
        </Show>
    }
}
