//! 控制面板落地页
//!
//! 欢迎卡 + 固定口径的指标卡 + 常用入口。指标为静态展示，
//! 实时数字以各列表页为准。

use leptos::prelude::*;

use crate::auth::use_auth;
use crate::web::router::use_router;

struct StatCard {
    label: &'static str,
    value: &'static str,
    change: &'static str,
    positive: bool,
}

const STATS: [StatCard; 4] = [
    StatCard {
        label: "Total Applications",
        value: "2,456",
        change: "+12.5%",
        positive: true,
    },
    StatCard {
        label: "Active Borrowers",
        value: "1,892",
        change: "+8.2%",
        positive: true,
    },
    StatCard {
        label: "Approved Loans",
        value: "₹45.2Cr",
        change: "+15.3%",
        positive: true,
    },
    StatCard {
        label: "Pending Review",
        value: "234",
        change: "-5.1%",
        positive: false,
    },
];

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let welcome = move || {
        let name = auth
            .state
            .get()
            .session
            .as_ref()
            .map(|s| s.admin_name.clone())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Admin".to_string());
        format!("Welcome back, {name}!")
    };

    view! {
        <div class="space-y-8">
            <div class="rounded-2xl bg-[#1a3a6b] p-8 text-white shadow-lg">
                <h1 class="text-3xl font-bold mb-2">{welcome}</h1>
                <p class="text-slate-200">
                    "Here's what's happening with your loan portfolio today."
                </p>
            </div>

            <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-4 gap-6">
                {STATS
                    .iter()
                    .map(|stat| {
                        let change_class = if stat.positive {
                            "text-green-600 font-medium"
                        } else {
                            "text-red-600 font-medium"
                        };
                        view! {
                            <div class="bg-white rounded-xl p-6 border border-slate-200 shadow-sm">
                                <p class="text-sm text-slate-500 font-medium mb-1">{stat.label}</p>
                                <p class="text-3xl font-bold text-slate-900 mb-3">{stat.value}</p>
                                <div class="flex items-center gap-1 text-sm">
                                    <span class=change_class>{stat.change}</span>
                                    <span class="text-slate-500 ml-1">"from last month"</span>
                                </div>
                            </div>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="bg-white rounded-xl p-6 border border-slate-200 shadow-sm">
                <h2 class="text-lg font-bold text-slate-900 mb-6">"Quick Actions"</h2>
                <div class="grid grid-cols-1 md:grid-cols-3 gap-3">
                    <button
                        class="bg-[#1a3a6b] hover:bg-[#1a3a6b]/90 text-white font-medium py-3 rounded-lg transition"
                        on:click=move |_| router.navigate("/requested-loans")
                    >
                        "Review Applications"
                    </button>
                    <button
                        class="border-2 border-[#1a3a6b] text-[#1a3a6b] hover:bg-[#1a3a6b]/10 font-medium py-3 rounded-lg transition"
                        on:click=move |_| router.navigate("/users")
                    >
                        "Browse Borrowers"
                    </button>
                    <button
                        class="border-2 border-slate-300 text-slate-700 hover:bg-slate-50 font-medium py-3 rounded-lg transition"
                        on:click=move |_| router.navigate("/users/kyc")
                    >
                        "KYC Queue"
                    </button>
                </div>
            </div>
        </div>
    }
}
