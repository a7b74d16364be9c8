//! Mudra 管理后台前端
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 认证状态管理
//! - `api`: 接口客户端层
//! - `components`: UI 组件层

mod api;
mod auth;
mod components {
    pub mod admin_management;
    pub mod assign_agent;
    pub mod blocked_users;
    pub mod dashboard;
    mod header;
    pub mod kyc_users;
    pub mod layout;
    pub mod loan_detail;
    pub mod loans;
    pub mod login;
    mod sidebar;
    mod ui;
    pub mod user_detail;
    pub mod users;
}

pub(crate) mod web {
    pub mod route;
    pub mod router;
}

use leptos::prelude::*;
use mudra_shared::models::LoanStatus;

use crate::auth::{AuthContext, init_auth};
use crate::components::admin_management::AdminManagementPage;
use crate::components::assign_agent::AssignAgentPage;
use crate::components::blocked_users::BlockedUsersPage;
use crate::components::dashboard::DashboardPage;
use crate::components::kyc_users::KycUsersPage;
use crate::components::layout::DashboardLayout;
use crate::components::loan_detail::LoanDetailPage;
use crate::components::loans::LoansPage;
use crate::components::login::LoginPage;
use crate::components::user_detail::UserDetailPage;
use crate::components::users::UsersPage;
use crate::web::route::AppRoute;
use crate::web::router::{Router, RouterOutlet};

/// 受保护页面统一套后台布局
macro_rules! in_layout {
    ($body:expr) => {
        view! { <DashboardLayout>{$body}</DashboardLayout> }.into_any()
    };
}

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Dashboard => in_layout!(view! { <DashboardPage /> }),
        AppRoute::Loans => in_layout!(view! { <LoansPage /> }),
        AppRoute::RequestedLoans => in_layout!(view! {
            <LoansPage
                title="Requested Loans"
                subtitle="Applications awaiting review"
                fixed_status=LoanStatus::Requested
            />
        }),
        AppRoute::ActiveLoans => in_layout!(view! {
            <LoansPage
                title="Active Loans"
                subtitle="Loans currently being repaid"
                fixed_status=LoanStatus::Active
            />
        }),
        AppRoute::LoanDetail(loan_id) => in_layout!(view! { <LoanDetailPage loan_id=loan_id /> }),
        AppRoute::Users => in_layout!(view! { <UsersPage /> }),
        AppRoute::BlockedUsers => in_layout!(view! { <BlockedUsersPage /> }),
        AppRoute::KycUsers => in_layout!(view! { <KycUsersPage /> }),
        AppRoute::UserDetail(user_id) => in_layout!(view! { <UserDetailPage user_id=user_id /> }),
        AppRoute::Admins => in_layout!(view! { <AdminManagementPage /> }),
        AppRoute::Assignments => in_layout!(view! { <AssignAgentPage /> }),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-slate-100">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-[#1a3a6b]">"404"</h1>
                    <p class="text-xl mt-4 text-slate-600">"Page not found"</p>
                    <a class="inline-block mt-6 text-sm font-medium text-[#1a3a6b] hover:underline" href="/dashboard">
                        "Back to dashboard"
                    </a>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. 初始化认证状态（从 LocalStorage 恢复会话）
    init_auth(&auth_ctx);

    // 3. 获取认证与角色信号，注入路由服务做守卫（解耦！）
    let is_authenticated = auth_ctx.is_authenticated_signal();
    let role = auth_ctx.role_signal();

    view! {
        <Router is_authenticated=is_authenticated role=role>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
