//! 路由定义模块 - 领域模型
//!
//! 纯业务逻辑层，不依赖 DOM 或 web_sys。
//! 路由的认证要求、角色白名单和侧边栏菜单共用这一张表，
//! 菜单上看不到的入口在守卫层同样进不去。

use std::fmt::Display;

use mudra_shared::Role;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由)
    #[default]
    Login,
    /// 控制面板 (需要认证)
    Dashboard,
    /// 全部贷款
    Loans,
    /// 申请中的贷款
    RequestedLoans,
    /// 存续中的贷款
    ActiveLoans,
    /// 贷款详情
    LoanDetail(i64),
    /// 全部用户
    Users,
    /// 已拉黑用户
    BlockedUsers,
    /// KYC 审核队列
    KycUsers,
    /// 用户详情
    UserDetail(i64),
    /// 管理员与代理管理（仅 admin）
    Admins,
    /// 用户-代理分配（仅 admin）
    Assignments,
    /// 页面未找到
    NotFound,
}

/// 全角色可见
const ALL_ROLES: &[Role] = &[Role::Admin, Role::Agent];
/// 仅管理员可见
const ADMIN_ONLY: &[Role] = &[Role::Admin];

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let path = path.trim_end_matches('/');
        let path = if path.is_empty() { "/" } else { path };
        match path {
            "/" | "/login" => Self::Login,
            "/dashboard" => Self::Dashboard,
            "/loans" => Self::Loans,
            "/requested-loans" => Self::RequestedLoans,
            "/active-loans" => Self::ActiveLoans,
            "/users" => Self::Users,
            "/users/blocked" => Self::BlockedUsers,
            "/users/kyc" => Self::KycUsers,
            "/admins" => Self::Admins,
            "/assignments" => Self::Assignments,
            _ => {
                if let Some(id) = path.strip_prefix("/loan/") {
                    return match id.parse::<i64>() {
                        Ok(id) => Self::LoanDetail(id),
                        Err(_) => Self::NotFound,
                    };
                }
                if let Some(id) = path.strip_prefix("/user/") {
                    return match id.parse::<i64>() {
                        Ok(id) => Self::UserDetail(id),
                        Err(_) => Self::NotFound,
                    };
                }
                Self::NotFound
            }
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Loans => "/loans".to_string(),
            Self::RequestedLoans => "/requested-loans".to_string(),
            Self::ActiveLoans => "/active-loans".to_string(),
            Self::LoanDetail(id) => format!("/loan/{id}"),
            Self::Users => "/users".to_string(),
            Self::BlockedUsers => "/users/blocked".to_string(),
            Self::KycUsers => "/users/kyc".to_string(),
            Self::UserDetail(id) => format!("/user/{id}"),
            Self::Admins => "/admins".to_string(),
            Self::Assignments => "/assignments".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login | Self::NotFound)
    }

    /// 允许访问该路由的角色
    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Self::Admins | Self::Assignments => ADMIN_ONLY,
            _ => ALL_ROLES,
        }
    }

    /// 当前角色是否可以进入该路由
    ///
    /// 无需认证的路由对任何人放行；受保护路由要求角色在白名单内。
    pub fn role_allows(&self, role: Option<Role>) -> bool {
        if !self.requires_auth() {
            return true;
        }
        match role {
            Some(role) => self.allowed_roles().contains(&role),
            None => false,
        }
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }

    /// 角色不在白名单时的重定向目标
    pub fn forbidden_redirect() -> Self {
        Self::Dashboard
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

// ============================================================================
// 侧边栏菜单表
// ============================================================================

/// 子菜单项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavChild {
    pub label: &'static str,
    pub path: &'static str,
}

/// 顶层菜单项，`children` 非空时渲染为可展开分组
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    pub label: &'static str,
    pub path: &'static str,
    pub children: &'static [NavChild],
}

impl NavEntry {
    /// 菜单项对角色是否可见，与路由守卫共用同一张角色表
    pub fn visible_for(&self, role: Role) -> bool {
        AppRoute::from_path(self.path).allowed_roles().contains(&role)
    }
}

/// 侧边栏菜单，声明顺序即展示顺序
pub const NAV_ENTRIES: &[NavEntry] = &[
    NavEntry {
        label: "Dashboard",
        path: "/dashboard",
        children: &[],
    },
    NavEntry {
        label: "Loans",
        path: "/loans",
        children: &[
            NavChild {
                label: "All Loans",
                path: "/loans",
            },
            NavChild {
                label: "Requested Loans",
                path: "/requested-loans",
            },
            NavChild {
                label: "Active Loans",
                path: "/active-loans",
            },
        ],
    },
    NavEntry {
        label: "Users",
        path: "/users",
        children: &[
            NavChild {
                label: "All Users",
                path: "/users",
            },
            NavChild {
                label: "Blocked Users",
                path: "/users/blocked",
            },
            NavChild {
                label: "Pending KYC",
                path: "/users/kyc",
            },
        ],
    },
    NavEntry {
        label: "Admin & Agents",
        path: "/admins",
        children: &[],
    },
    NavEntry {
        label: "User Assignments",
        path: "/assignments",
        children: &[],
    },
];

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_round_trip() {
        let routes = [
            AppRoute::Login,
            AppRoute::Dashboard,
            AppRoute::Loans,
            AppRoute::RequestedLoans,
            AppRoute::ActiveLoans,
            AppRoute::LoanDetail(42),
            AppRoute::Users,
            AppRoute::BlockedUsers,
            AppRoute::KycUsers,
            AppRoute::UserDetail(7),
            AppRoute::Admins,
            AppRoute::Assignments,
        ];
        for route in routes {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn login_aliases() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(AppRoute::from_path("/reports"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/loan/abc"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/user/"), AppRoute::NotFound);
    }

    #[test]
    fn trailing_slash_is_ignored() {
        assert_eq!(AppRoute::from_path("/users/"), AppRoute::Users);
        assert_eq!(AppRoute::from_path("/loan/42/"), AppRoute::LoanDetail(42));
    }

    #[test]
    fn everything_but_login_requires_auth() {
        assert!(!AppRoute::Login.requires_auth());
        assert!(!AppRoute::NotFound.requires_auth());
        assert!(AppRoute::Dashboard.requires_auth());
        assert!(AppRoute::UserDetail(1).requires_auth());
    }

    #[test]
    fn admin_only_routes_reject_agents() {
        // 同一张角色表同时供守卫和菜单使用
        assert!(AppRoute::Admins.role_allows(Some(Role::Admin)));
        assert!(!AppRoute::Admins.role_allows(Some(Role::Agent)));
        assert!(!AppRoute::Assignments.role_allows(Some(Role::Agent)));
        assert!(AppRoute::Loans.role_allows(Some(Role::Agent)));
        assert!(AppRoute::UserDetail(3).role_allows(Some(Role::Agent)));
    }

    #[test]
    fn missing_role_blocks_protected_routes() {
        assert!(!AppRoute::Dashboard.role_allows(None));
        assert!(AppRoute::Login.role_allows(None));
    }

    #[test]
    fn nav_visibility_follows_role_table() {
        let visible_for_agent: Vec<&str> = NAV_ENTRIES
            .iter()
            .filter(|e| e.visible_for(Role::Agent))
            .map(|e| e.label)
            .collect();
        assert_eq!(visible_for_agent, ["Dashboard", "Loans", "Users"]);

        let visible_for_admin: Vec<&str> = NAV_ENTRIES
            .iter()
            .filter(|e| e.visible_for(Role::Admin))
            .map(|e| e.label)
            .collect();
        assert_eq!(
            visible_for_admin,
            [
                "Dashboard",
                "Loans",
                "Users",
                "Admin & Agents",
                "User Assignments"
            ]
        );
    }
}
