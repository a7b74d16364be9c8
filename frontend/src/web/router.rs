//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作
//! 都集中在此模块。导航流程为"监听 -> 验证 -> 处理 -> 加载"，
//! 验证分两步：认证守卫，然后角色守卫。

use leptos::prelude::*;
use mudra_shared::Role;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 认证与角色均为注入的信号，路由层不持有会话本体。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 认证状态检查（注入的信号，实现解耦）
    is_authenticated: Signal<bool>,
    /// 当前角色（注入的信号）
    role: Signal<Option<Role>>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>, role: Signal<Option<Role>>) -> Self {
        // 初始化当前路由（从 URL 解析），深链也要先过守卫再落地
        let path = current_path();
        let target = AppRoute::from_path(&path);
        let is_auth = is_authenticated.get_untracked();
        let initial_route = Self::resolve(target, is_auth, role.get_untracked());
        Self::log_resolution(target, initial_route, is_auth);
        if initial_route.to_path() != path {
            replace_history_state(&initial_route.to_path());
        }
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            is_authenticated,
            role,
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    pub fn navigate(&self, path: &str) {
        let target_route = AppRoute::from_path(path);
        self.navigate_to_route(target_route, true);
    }

    /// 导航到指定路由
    ///
    /// # Arguments
    /// * `target_route` - 目标路由
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        let is_auth = self.is_authenticated.get_untracked();
        let role = self.role.get_untracked();

        let resolved = Self::resolve(target_route, is_auth, role);
        Self::log_resolution(target_route, resolved, is_auth);
        if use_push {
            push_history_state(&resolved.to_path());
        } else {
            replace_history_state(&resolved.to_path());
        }
        self.set_route.set(resolved);
    }

    /// 守卫判定：把目标路由换算成真正要落地的路由
    fn resolve(target: AppRoute, is_auth: bool, role: Option<Role>) -> AppRoute {
        // 需要认证但未认证
        if target.requires_auth() && !is_auth {
            return AppRoute::auth_failure_redirect();
        }

        // 已认证用户访问登录页
        if target.should_redirect_when_authenticated() && is_auth {
            return AppRoute::auth_success_redirect();
        }

        // 角色不在该路由的白名单内
        if is_auth && !target.role_allows(role) {
            return AppRoute::forbidden_redirect();
        }

        target
    }

    /// 守卫触发重定向时输出控制台日志
    fn log_resolution(target: AppRoute, resolved: AppRoute, is_auth: bool) {
        if resolved == target {
            return;
        }
        let message = if !is_auth {
            "[Router] Access denied. Redirecting to login."
        } else if target.should_redirect_when_authenticated() {
            "[Router] Already authenticated. Redirecting to dashboard."
        } else {
            "[Router] Role not permitted for this route. Redirecting to dashboard."
        };
        web_sys::console::log_1(&message.into());
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;
        let role = self.role;

        let closure = Closure::<dyn Fn()>::new(move || {
            let path = current_path();
            let target_route = AppRoute::from_path(&path);
            let is_auth = is_authenticated.get_untracked();

            // popstate 时也执行守卫逻辑
            let resolved = Self::resolve(target_route, is_auth, role.get_untracked());
            Self::log_resolution(target_route, resolved, is_auth);
            if resolved.to_path() != path {
                replace_history_state(&resolved.to_path());
            }
            set_route.set(resolved);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 设置认证状态变化时的自动重定向
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;
        let role = self.role;

        Effect::new(move |_| {
            let is_auth = is_authenticated.get();
            let role = role.get();
            let route = current_route.get_untracked();

            if is_auth {
                // 用户刚登录，如果在登录页则重定向到面板
                if route.should_redirect_when_authenticated() {
                    let redirect = AppRoute::auth_success_redirect();
                    push_history_state(&redirect.to_path());
                    set_route.set(redirect);
                    web_sys::console::log_1(
                        &"[Router] Auth state changed: logged in, redirecting to dashboard.".into(),
                    );
                } else if !route.role_allows(role) {
                    // 会话恢复后发现当前角色进不了停留页
                    let redirect = AppRoute::forbidden_redirect();
                    replace_history_state(&redirect.to_path());
                    set_route.set(redirect);
                }
            } else {
                // 用户登出，如果在受保护页面则重定向到登录
                if route.requires_auth() {
                    let redirect = AppRoute::auth_failure_redirect();
                    push_history_state(&redirect.to_path());
                    set_route.set(redirect);
                    web_sys::console::log_1(
                        &"[Router] Auth state changed: logged out, redirecting to login.".into(),
                    );
                }
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(is_authenticated: Signal<bool>, role: Signal<Option<Role>>) -> RouterService {
    let router = RouterService::new(is_authenticated, role);

    // 初始化监听器
    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

/// 导航函数（返回一个可调用的闭包）
pub fn use_navigate() -> impl Fn(&str) + Clone {
    let router = use_router();
    move |to: &str| {
        router.navigate(to);
    }
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    /// 当前角色信号
    role: Signal<Option<Role>>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    // 提供路由服务到 Context
    provide_router(is_authenticated, role);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_deep_link_resolves_to_login() {
        // 未认证访问受保护页，落地到登录页
        assert_eq!(
            RouterService::resolve(AppRoute::Dashboard, false, None),
            AppRoute::Login
        );
        assert_eq!(
            RouterService::resolve(AppRoute::LoanDetail(7), false, None),
            AppRoute::Login
        );
    }

    #[test]
    fn authenticated_login_resolves_to_dashboard() {
        assert_eq!(
            RouterService::resolve(AppRoute::Login, true, Some(Role::Admin)),
            AppRoute::Dashboard
        );
    }

    #[test]
    fn agent_blocked_from_admin_only_routes() {
        // 代理直链管理员专属页，落地到面板
        assert_eq!(
            RouterService::resolve(AppRoute::Admins, true, Some(Role::Agent)),
            AppRoute::Dashboard
        );
        assert_eq!(
            RouterService::resolve(AppRoute::Assignments, true, Some(Role::Agent)),
            AppRoute::Dashboard
        );
    }

    #[test]
    fn allowed_route_passes_through() {
        assert_eq!(
            RouterService::resolve(AppRoute::Loans, true, Some(Role::Agent)),
            AppRoute::Loans
        );
        assert_eq!(
            RouterService::resolve(AppRoute::Admins, true, Some(Role::Admin)),
            AppRoute::Admins
        );
    }
}
