//! 认证模块
//!
//! 管理会话状态，与路由系统解耦。
//! 路由服务通过注入的认证/角色信号来做守卫判断；
//! localStorage 是会话的唯一持久层，内存信号是唯一事实源。

use gloo_storage::errors::StorageError;
use gloo_storage::{LocalStorage, Storage};
use leptos::prelude::*;
use mudra_shared::error::{ApiError, ApiResult};
use mudra_shared::requests::LoginRequest;
use mudra_shared::token::{Freshness, freshness};
use mudra_shared::{
    KEY_ADMIN_EMAIL, KEY_ADMIN_ID, KEY_ADMIN_NAME, KEY_ROLE, KEY_TOKEN, LEGACY_KEYS, Role,
};

use crate::api::{ApiClient, admin_login};

/// 已登录账号的会话
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub role: Role,
    pub admin_id: String,
    pub admin_name: String,
    pub admin_email: String,
}

/// 认证状态
#[derive(Clone, PartialEq)]
pub struct AuthState {
    /// 当前会话（仅在认证成功后存在）
    pub session: Option<Session>,
    /// 启动恢复尚未完成时为 true，期间不渲染任何页面
    pub is_loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            session: None,
            is_loading: true,
        }
    }
}

/// 认证上下文
///
/// 包含读写信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 认证状态（只读）
    pub state: ReadSignal<AuthState>,
    /// 设置认证状态（写入）
    pub set_state: WriteSignal<AuthState>,
}

impl AuthContext {
    /// 创建新的认证上下文
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState::default());
        Self { state, set_state }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.get().session.is_some())
    }

    /// 获取角色信号（用于路由服务注入）
    pub fn role_signal(&self) -> Signal<Option<Role>> {
        let state = self.state;
        Signal::derive(move || state.get().session.as_ref().map(|s| s.role))
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 由当前会话构造 API 客户端，未认证时不带令牌
pub fn api_client(state: &AuthState) -> ApiClient {
    ApiClient::new(state.session.as_ref().map(|s| s.token.clone()))
}

/// 当前 Unix 秒
fn now_secs() -> u64 {
    (js_sys::Date::now() / 1000.0) as u64
}

/// 初始化认证状态
///
/// 从 localStorage 恢复会话：令牌过期或畸形时就地清除，
/// 完整可用时直接进入已认证状态，不访问网络。
pub fn init_auth(ctx: &AuthContext) {
    let session = restore_session();
    ctx.set_state.update(|state| {
        state.session = session;
        state.is_loading = false;
    });
}

fn restore_session() -> Option<Session> {
    let token: String = LocalStorage::get(KEY_TOKEN).ok()?;
    match freshness(&token, now_secs()) {
        Freshness::Valid => {}
        Freshness::Expired | Freshness::Malformed => {
            // 过期令牌不留在存储里
            purge_session_keys();
            return None;
        }
    }

    let role: String = LocalStorage::get(KEY_ROLE).ok()?;
    let Some(role) = Role::parse(&role) else {
        purge_session_keys();
        return None;
    };

    Some(Session {
        token,
        role,
        admin_id: LocalStorage::get(KEY_ADMIN_ID).unwrap_or_default(),
        admin_name: LocalStorage::get(KEY_ADMIN_NAME).unwrap_or_default(),
        admin_email: LocalStorage::get(KEY_ADMIN_EMAIL).unwrap_or_default(),
    })
}

/// 登录并保存状态
///
/// 校验、请求、落盘、更新信号一次完成；任何一步失败时
/// 既不写存储也不改内存状态。
pub async fn login(ctx: AuthContext, email: String, password: String) -> ApiResult<()> {
    let request = LoginRequest { email, password };
    request.validate()?;

    let response = admin_login(&request).await?;

    let session = Session {
        token: response.token,
        role: response.admin.role,
        admin_id: response.admin.id.to_string(),
        admin_name: response.admin.name,
        admin_email: response.admin.email,
    };

    if let Err(err) = persist_session(&session) {
        // 写到一半失败不能留下残缺的键集合
        purge_session_keys();
        return Err(persist_error(err));
    }

    ctx.set_state.update(|state| {
        state.session = Some(session);
        state.is_loading = false;
    });
    Ok(())
}

/// 注销并清除状态
///
/// 导航由路由服务的认证状态监听自动处理。
pub fn logout(ctx: AuthContext) {
    purge_session_keys();
    ctx.set_state.update(|state| {
        state.session = None;
    });
}

/// 服务端以 401 拒绝后的本地处理：等同登出
pub fn expire_session(ctx: AuthContext) {
    logout(ctx);
}

/// 五个会话键全部落盘，任一失败即返回
fn persist_session(session: &Session) -> Result<(), StorageError> {
    LocalStorage::set(KEY_TOKEN, &session.token)?;
    LocalStorage::set(KEY_ROLE, session.role.as_str())?;
    LocalStorage::set(KEY_ADMIN_ID, &session.admin_id)?;
    LocalStorage::set(KEY_ADMIN_NAME, &session.admin_name)?;
    LocalStorage::set(KEY_ADMIN_EMAIL, &session.admin_email)?;
    Ok(())
}

fn persist_error(err: StorageError) -> ApiError {
    ApiError::serialization(format!("Failed to persist session: {err}"))
}

fn purge_session_keys() {
    for key in [
        KEY_TOKEN,
        KEY_ROLE,
        KEY_ADMIN_ID,
        KEY_ADMIN_NAME,
        KEY_ADMIN_EMAIL,
    ] {
        LocalStorage::delete(key);
    }
    // 旧版本写过的键一并清掉
    for key in LEGACY_KEYS {
        LocalStorage::delete(key);
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use mudra_shared::error::ApiErrorKind;

    #[test]
    fn persist_failure_maps_to_api_error() {
        // 落盘失败要以带原因的错误上抛，而不是被吞掉
        let err = persist_error(StorageError::KeyNotFound("mudra_token".into()));
        assert_eq!(err.kind, ApiErrorKind::Serialization);
        assert!(err.message.contains("Failed to persist session"));
        assert!(err.message.contains("mudra_token"));
    }
}
