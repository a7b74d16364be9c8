//! 请求体与客户端校验
//!
//! 每个表单对应一个请求结构体；校验失败返回 `ApiError::validation`，
//! 文案与页面直接展示的一致。

use serde::{Deserialize, Serialize};

use crate::Role;
use crate::error::{ApiError, ApiResult};
use crate::models::{FollowUpType, InterestType, KycStatus, LoanStatus};

/// 粗粒度的邮箱形状检查：local@domain.tld，不含空白
pub fn is_valid_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let mut parts = email.splitn(2, '@');
    let (Some(local), Some(domain)) = (parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

// ============================================================================
// 认证
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> ApiResult<()> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            return Err(ApiError::validation("Please fill in all fields"));
        }
        if !is_valid_email(self.email.trim()) {
            return Err(ApiError::validation("Please enter a valid email address"));
        }
        if self.password.len() < 6 {
            return Err(ApiError::validation(
                "Password must be at least 6 characters",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub admin: AdminProfile,
}

/// 登录响应里的账号画像，落入 localStorage
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: Role,
}

// ============================================================================
// 用户管理
// ============================================================================

/// `PATCH /admin/update-kyc-status/:id` 的请求体
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KycUpdateRequest {
    pub status: KycStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl KycUpdateRequest {
    /// 审核通过
    pub fn verify() -> Self {
        Self {
            status: KycStatus::Verified,
            reason: None,
        }
    }

    /// 驳回必须带非空原因
    pub fn reject(reason: &str) -> ApiResult<Self> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(ApiError::validation("Please enter a reason for rejection."));
        }
        Ok(Self {
            status: KycStatus::Rejected,
            reason: Some(reason.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignAgentRequest {
    pub user_id: i64,
    pub agent_id: i64,
}

// ============================================================================
// 贷款
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewLoanRequest {
    pub principal_amount: f64,
    pub tenure: u32,
    pub intrest_type: InterestType,
    pub intrest_rate: f64,
    pub total_intrest: f64,
    pub total_amount_payable: f64,
    pub expiry_days: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUpRequest {
    pub note: String,
    pub follow_up_type: FollowUpType,
    pub follow_up_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_follow_up_date: Option<String>,
}

impl FollowUpRequest {
    pub fn validate(&self) -> ApiResult<()> {
        if self.note.trim().is_empty() {
            return Err(ApiError::validation("Please enter a follow-up note"));
        }
        if self.follow_up_date.trim().is_empty() {
            return Err(ApiError::validation("Please pick a follow-up date"));
        }
        Ok(())
    }
}

/// `PATCH /admin/loan/change-status/:id` 的请求体
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeLoanStatusRequest {
    pub status: LoanStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentLinkRequest {
    pub amount: f64,
    pub loan_id: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PaymentLinkResponse {
    pub link: String,
}

// ============================================================================
// 管理员
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
}

impl CreateAdminRequest {
    pub fn validate(&self) -> ApiResult<()> {
        if self.name.trim().is_empty()
            || self.email.trim().is_empty()
            || self.password.is_empty()
        {
            return Err(ApiError::validation("Please fill in all required fields"));
        }
        if !is_valid_email(self.email.trim()) {
            return Err(ApiError::validation("Please enter a valid email address"));
        }
        if self.password.len() < 6 {
            return Err(ApiError::validation(
                "Password must be at least 6 characters",
            ));
        }
        if self.password != self.confirm_password {
            return Err(ApiError::validation("Passwords don't match"));
        }
        Ok(())
    }
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiErrorKind;

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn email_shape_check() {
        assert!(is_valid_email("admin@mudraplus.com"));
        assert!(is_valid_email("a.b+c@sub.domain.in"));
        assert!(!is_valid_email("plainaddress"));
        assert!(!is_valid_email("@missing-local.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@nodot"));
        assert!(!is_valid_email("user@domain."));
        assert!(!is_valid_email("us er@domain.com"));
    }

    #[test]
    fn login_validation_messages() {
        let err = login("", "").validate().unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Validation);
        assert_eq!(err.message, "Please fill in all fields");

        let err = login("not-an-email", "secret1").validate().unwrap_err();
        assert_eq!(err.message, "Please enter a valid email address");

        let err = login("a@b.co", "12345").validate().unwrap_err();
        assert_eq!(err.message, "Password must be at least 6 characters");

        assert!(login("a@b.co", "123456").validate().is_ok());
    }

    #[test]
    fn kyc_rejection_requires_reason() {
        assert!(KycUpdateRequest::reject("  ").is_err());
        let req = KycUpdateRequest::reject(" incomplete documents ").unwrap();
        assert_eq!(req.status, KycStatus::Rejected);
        assert_eq!(req.reason.as_deref(), Some("incomplete documents"));
    }

    #[test]
    fn kyc_verify_omits_reason_on_the_wire() {
        let body = serde_json::to_string(&KycUpdateRequest::verify()).unwrap();
        assert_eq!(body, r#"{"status":"verified"}"#);
    }

    #[test]
    fn create_admin_password_rules() {
        let mut req = CreateAdminRequest {
            name: "New Agent".into(),
            email: "agent@mudraplus.com".into(),
            phone: "9876543210".into(),
            password: "secret123".into(),
            confirm_password: "secret124".into(),
            role: Role::Agent,
        };
        assert_eq!(
            req.validate().unwrap_err().message,
            "Passwords don't match"
        );
        req.confirm_password = "secret123".into();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn review_request_uses_backend_spellings() {
        let req = ReviewLoanRequest {
            principal_amount: 50000.0,
            tenure: 12,
            intrest_type: InterestType::Flat,
            intrest_rate: 12.0,
            total_intrest: 6000.0,
            total_amount_payable: 56000.0,
            expiry_days: 30,
        };
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(body["intrestRate"], 12.0);
        assert_eq!(body["intrestType"], "flat");
        assert_eq!(body["totalIntrest"], 6000.0);
        assert_eq!(body["expiryDays"], 30);
    }

    #[test]
    fn follow_up_validation() {
        let mut req = FollowUpRequest {
            note: "".into(),
            follow_up_type: FollowUpType::Call,
            follow_up_date: "2026-08-20".into(),
            next_follow_up_date: None,
        };
        assert!(req.validate().is_err());
        req.note = "Spoke with borrower".into();
        assert!(req.validate().is_ok());
    }
}
