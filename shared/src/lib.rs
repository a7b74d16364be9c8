//! MudraPlus 管理后台共享层
//!
//! 前端各页面共用的领域模型、请求体、查询状态与纯逻辑。
//! 这里不依赖任何浏览器 API，全部逻辑可在宿主机上直接测试。

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod error;
pub mod format;
pub mod loan_math;
pub mod models;
pub mod query;
pub mod requests;
pub mod token;

// ============================================================================
// 会话存储键
// ============================================================================

/// localStorage 中保存 JWT 的键
pub const KEY_TOKEN: &str = "token";
/// 当前管理员角色
pub const KEY_ROLE: &str = "role";
/// 当前管理员显示名
pub const KEY_ADMIN_NAME: &str = "admin_name";
/// 当前管理员邮箱
pub const KEY_ADMIN_EMAIL: &str = "admin_email";
/// 当前管理员 id
pub const KEY_ADMIN_ID: &str = "admin_id";

/// 旧版本写入过的会话键，登出时一并清除
pub const LEGACY_KEYS: &[&str] = &["admin", "user"];

/// 列表页默认每页条数
pub const DEFAULT_PAGE_SIZE: u32 = 10;

// ============================================================================
// 角色
// ============================================================================

/// 后台账号角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Agent,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Agent => "agent",
        }
    }

    /// 从存储值解析角色，未知值返回 `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Role::Admin),
            "agent" => Some(Role::Agent),
            _ => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trip() {
        // 存储值与枚举互转
        assert_eq!(Role::parse("admin"), Some(Role::Admin));
        assert_eq!(Role::parse("agent"), Some(Role::Agent));
        assert_eq!(Role::parse("superuser"), None);
        assert_eq!(Role::Admin.as_str(), "admin");
        assert_eq!(Role::Agent.to_string(), "agent");
    }

    #[test]
    fn role_serde_uses_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Agent).unwrap(), "\"agent\"");
        let parsed: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(parsed, Role::Admin);
    }
}
