//! 前端统一错误类型
//!
//! 所有 API 调用与表单校验共用 `ApiError`，页面层只需要展示
//! `message` 并按 `kind` 决定是否触发登出等副作用。

use std::fmt;

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 令牌缺失、过期或被服务端以 401 拒绝
    AuthExpired,
    /// 服务端返回非 2xx
    RequestFailed,
    /// 提交前的客户端校验失败
    Validation,
    /// 请求根本没有到达服务端
    Network,
    /// 响应体不是预期的 JSON 结构
    Serialization,
}

impl ApiErrorKind {
    pub fn code(&self) -> &'static str {
        match self {
            ApiErrorKind::AuthExpired => "AUTH_EXPIRED",
            ApiErrorKind::RequestFailed => "REQUEST_FAILED",
            ApiErrorKind::Validation => "VALIDATION",
            ApiErrorKind::Network => "NETWORK",
            ApiErrorKind::Serialization => "SERIALIZATION",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    /// 非 2xx 响应时的 HTTP 状态码
    pub status: Option<u16>,
    pub message: String,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn auth_expired(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::AuthExpired,
            status: Some(401),
            message: message.into(),
        }
    }

    pub fn request_failed(status: u16, message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::RequestFailed,
            status: Some(status),
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Validation,
            status: None,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            status: None,
            message: message.into(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Serialization,
            status: None,
            message: message.into(),
        }
    }

    /// 由非 2xx 响应构造错误
    ///
    /// 优先采用响应体中的 `message` 字段；拿不到时退回
    /// `"Request failed with status {status}"`。401 归入 `AuthExpired`。
    pub fn from_response_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("message")?.as_str().map(str::to_owned))
            .unwrap_or_else(|| format!("Request failed with status {status}"));

        if status == 401 {
            Self::auth_expired(message)
        } else {
            Self {
                kind: ApiErrorKind::RequestFailed,
                status: Some(status),
                message,
            }
        }
    }

    pub fn is_auth_expired(&self) -> bool {
        self.kind == ApiErrorKind::AuthExpired
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_body_message_wins() {
        let err = ApiError::from_response_body(400, r#"{"message":"Loan already reviewed"}"#);
        assert_eq!(err.kind, ApiErrorKind::RequestFailed);
        assert_eq!(err.status, Some(400));
        assert_eq!(err.message, "Loan already reviewed");
    }

    #[test]
    fn fallback_message_on_unparseable_body() {
        let err = ApiError::from_response_body(502, "<html>Bad Gateway</html>");
        assert_eq!(err.message, "Request failed with status 502");
    }

    #[test]
    fn status_401_maps_to_auth_expired() {
        let err = ApiError::from_response_body(401, r#"{"message":"jwt expired"}"#);
        assert!(err.is_auth_expired());
        assert_eq!(err.message, "jwt expired");
    }

    #[test]
    fn message_field_must_be_a_string() {
        // message 不是字符串时同样走兜底文案
        let err = ApiError::from_response_body(422, r#"{"message":{"field":"email"}}"#);
        assert_eq!(err.message, "Request failed with status 422");
    }
}
