//! 后端契约的数据模型
//!
//! 字段名按后端的 camelCase 命名序列化，包括 `intrestRate` 一类
//! 历史拼写，这里保持与线上契约一致，不做纠正。
//! 搜索谓词与状态门控也放在这里，方便直接测试。

use serde::{Deserialize, Serialize};

use crate::Role;

// ============================================================================
// 状态枚举
// ============================================================================

/// 用户 KYC 状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KycStatus {
    Pending,
    Submitted,
    Verified,
    Rejected,
}

impl KycStatus {
    /// KYC 页过滤标签的展示顺序
    pub const ALL: [KycStatus; 4] = [
        KycStatus::Pending,
        KycStatus::Submitted,
        KycStatus::Verified,
        KycStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KycStatus::Pending => "pending",
            KycStatus::Submitted => "submitted",
            KycStatus::Verified => "verified",
            KycStatus::Rejected => "rejected",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            KycStatus::Pending => "Pending",
            KycStatus::Submitted => "Submitted",
            KycStatus::Verified => "Verified",
            KycStatus::Rejected => "Rejected",
        }
    }
}

/// 贷款生命周期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Requested,
    Applied,
    Approve,
    Active,
    Closed,
    Defaulted,
}

impl LoanStatus {
    /// 状态过滤下拉的展示顺序
    pub const ALL: [LoanStatus; 6] = [
        LoanStatus::Requested,
        LoanStatus::Applied,
        LoanStatus::Approve,
        LoanStatus::Active,
        LoanStatus::Closed,
        LoanStatus::Defaulted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Requested => "requested",
            LoanStatus::Applied => "applied",
            LoanStatus::Approve => "approve",
            LoanStatus::Active => "active",
            LoanStatus::Closed => "closed",
            LoanStatus::Defaulted => "defaulted",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LoanStatus::Requested => "Requested",
            LoanStatus::Applied => "Applied",
            LoanStatus::Approve => "Approved",
            LoanStatus::Active => "Active",
            LoanStatus::Closed => "Closed",
            LoanStatus::Defaulted => "Defaulted",
        }
    }

    /// 审核表单只对申请中的贷款开放
    pub fn can_review(&self) -> bool {
        matches!(self, LoanStatus::Requested)
    }

    /// 放款审批同样只对申请中的贷款开放
    pub fn can_approve(&self) -> bool {
        matches!(self, LoanStatus::Requested)
    }

    /// 跟进记录只在放款后的存续期内可新增
    pub fn can_follow_up(&self) -> bool {
        matches!(self, LoanStatus::Active)
    }

    /// 已违约或尚未走完申请流程的贷款不能再标记违约
    pub fn can_mark_defaulted(&self) -> bool {
        !matches!(self, LoanStatus::Applied | LoanStatus::Defaulted)
    }
}

/// 利息计算方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestType {
    Flat,
    Reducing,
}

impl InterestType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterestType::Flat => "flat",
            InterestType::Reducing => "reducing",
        }
    }
}

/// 交易方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Disbursement,
    Repayment,
}

/// 跟进方式，线上值为 camelCase（`fieldVisit`）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FollowUpType {
    Call,
    Sms,
    Email,
    FieldVisit,
}

impl FollowUpType {
    pub const ALL: [FollowUpType; 4] = [
        FollowUpType::Call,
        FollowUpType::Sms,
        FollowUpType::Email,
        FollowUpType::FieldVisit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FollowUpType::Call => "call",
            FollowUpType::Sms => "sms",
            FollowUpType::Email => "email",
            FollowUpType::FieldVisit => "fieldVisit",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FollowUpType::Call => "Call",
            FollowUpType::Sms => "SMS",
            FollowUpType::Email => "Email",
            FollowUpType::FieldVisit => "Field Visit",
        }
    }
}

// ============================================================================
// 用户
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default = "default_kyc_status")]
    pub kyc_status: KycStatus,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub is_blocked: bool,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub dob: Option<String>,
    #[serde(default)]
    pub employment_type: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub net_monthly_income: Option<f64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

fn default_kyc_status() -> KycStatus {
    KycStatus::Pending
}

impl User {
    /// 客户端搜索：姓名、邮箱不区分大小写，手机号按原样包含
    pub fn matches_term(&self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return true;
        }
        let lower = term.to_lowercase();
        self.name.to_lowercase().contains(&lower)
            || self.email.to_lowercase().contains(&lower)
            || self.phone.contains(term)
    }
}

/// 用户详情的各标签页切片
///
/// `GET /admin/user/:id?field=...` 返回用户本体加所请求的切片，
/// 未请求的切片缺省为 `None`。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDetail {
    #[serde(flatten)]
    pub user: User,
    #[serde(default)]
    pub bank_details: Option<Vec<BankDetail>>,
    #[serde(default)]
    pub addresses: Option<Vec<Address>>,
    #[serde(default)]
    pub documents: Option<Vec<Document>>,
    #[serde(default)]
    pub loans: Option<Vec<Loan>>,
    #[serde(default)]
    pub activity: Option<Vec<ActivityEvent>>,
    #[serde(default)]
    pub transactions: Option<Vec<Transaction>>,
    #[serde(default)]
    pub agents: Option<Vec<Admin>>,
    #[serde(default)]
    pub follow_ups: Option<Vec<FollowUp>>,
    #[serde(default)]
    pub contactslist: Option<Vec<Contact>>,
}

/// `?field=` 支持的切片名
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserDetailField {
    BankDetails,
    Addresses,
    Documents,
    Loans,
    Activity,
    Transactions,
    Agents,
    FollowUps,
    ContactsList,
}

impl UserDetailField {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserDetailField::BankDetails => "bankDetails",
            UserDetailField::Addresses => "addresses",
            UserDetailField::Documents => "documents",
            UserDetailField::Loans => "loans",
            UserDetailField::Activity => "activity",
            UserDetailField::Transactions => "transactions",
            UserDetailField::Agents => "agents",
            UserDetailField::FollowUps => "followUps",
            UserDetailField::ContactsList => "contactslist",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankDetail {
    pub id: i64,
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub account_holder_name: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub ifsc_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub id: i64,
    #[serde(default)]
    pub address_type: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub pin_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: i64,
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub document_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    pub id: i64,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

// ============================================================================
// 管理员 / 代理
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Admin {
    pub fn matches_term(&self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return true;
        }
        let lower = term.to_lowercase();
        self.name.to_lowercase().contains(&lower) || self.email.to_lowercase().contains(&lower)
    }
}

// ============================================================================
// 贷款
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: i64,
    #[serde(default)]
    pub loan_number: String,
    pub status: LoanStatus,
    #[serde(default)]
    pub principal_amount: Option<f64>,
    #[serde(default)]
    pub tenure: Option<u32>,
    #[serde(default)]
    pub intrest_type: Option<InterestType>,
    #[serde(default)]
    pub intrest_rate: Option<f64>,
    #[serde(default)]
    pub total_intrest: Option<f64>,
    #[serde(default)]
    pub total_amount_payable: Option<f64>,
    #[serde(default)]
    pub amount_paid: Option<f64>,
    #[serde(default)]
    pub remaining_amount: Option<f64>,
    #[serde(default)]
    pub expiry_days: Option<u32>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub next_payment_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub user: Option<LoanUser>,
    #[serde(default)]
    pub bank: Option<LoanBank>,
    #[serde(default)]
    pub transactions: Option<Vec<Transaction>>,
    #[serde(default)]
    pub follow_ups: Option<Vec<FollowUp>>,
}

impl Loan {
    /// 客户端搜索：贷款编号不区分大小写，或 id 精确前缀
    pub fn matches_term(&self, term: &str) -> bool {
        let term = term.trim();
        if term.is_empty() {
            return true;
        }
        let lower = term.to_lowercase();
        self.loan_number.to_lowercase().contains(&lower) || self.id.to_string().contains(term)
    }

    /// 已还之外剩余应还，后端字段缺失时就地补算
    pub fn outstanding(&self) -> f64 {
        match self.remaining_amount {
            Some(v) => v,
            None => {
                self.total_amount_payable.unwrap_or(0.0) - self.amount_paid.unwrap_or(0.0)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanUser {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanBank {
    #[serde(default)]
    pub bank_name: Option<String>,
    #[serde(default)]
    pub account_holder_name: Option<String>,
    #[serde(default)]
    pub account_number: Option<String>,
    #[serde(default)]
    pub ifsc_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub transaction_type: Option<TransactionType>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub loan: Option<TransactionLoanRef>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionLoanRef {
    #[serde(default)]
    pub loan_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUp {
    pub id: i64,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub follow_up_type: Option<FollowUpType>,
    #[serde(default)]
    pub follow_up_date: Option<String>,
    #[serde(default)]
    pub next_follow_up_date: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

// ============================================================================
// 列表响应信封
// ============================================================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserListResponse {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub total: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoanListResponse {
    #[serde(default)]
    pub loans: Vec<Loan>,
}

/// 只关心 `message` 的变更类响应
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

// ============================================================================
// 测试
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn loan(status: LoanStatus) -> Loan {
        serde_json::from_value(serde_json::json!({
            "id": 7,
            "loanNumber": "LN-2024-0007",
            "status": status.as_str(),
        }))
        .unwrap()
    }

    #[test]
    fn review_only_while_requested() {
        assert!(LoanStatus::Requested.can_review());
        for status in [
            LoanStatus::Applied,
            LoanStatus::Approve,
            LoanStatus::Active,
            LoanStatus::Closed,
            LoanStatus::Defaulted,
        ] {
            assert!(!status.can_review(), "{status:?} must not be reviewable");
        }
    }

    #[test]
    fn follow_up_only_while_active() {
        assert!(LoanStatus::Active.can_follow_up());
        assert!(!LoanStatus::Requested.can_follow_up());
        assert!(!LoanStatus::Closed.can_follow_up());
    }

    #[test]
    fn defaulting_gate() {
        // 已违约或 applied 状态下不能再标记违约
        assert!(!LoanStatus::Defaulted.can_mark_defaulted());
        assert!(!LoanStatus::Applied.can_mark_defaulted());
        assert!(LoanStatus::Active.can_mark_defaulted());
        assert!(LoanStatus::Requested.can_mark_defaulted());
    }

    #[test]
    fn loan_wire_field_spellings() {
        // 后端契约保留的历史拼写
        let parsed: Loan = serde_json::from_str(
            r#"{
                "id": 1,
                "loanNumber": "LN-1",
                "status": "active",
                "principalAmount": 50000.0,
                "intrestType": "flat",
                "intrestRate": 12.5,
                "totalIntrest": 6250.0,
                "totalAmountPayable": 56250.0
            }"#,
        )
        .unwrap();
        assert_eq!(parsed.intrest_rate, Some(12.5));
        assert_eq!(parsed.intrest_type, Some(InterestType::Flat));
        assert_eq!(parsed.total_intrest, Some(6250.0));
    }

    #[test]
    fn loan_search_matches_number_or_id() {
        let l = loan(LoanStatus::Active);
        assert!(l.matches_term("ln-2024"));
        assert!(l.matches_term("0007"));
        assert!(l.matches_term("7"));
        assert!(l.matches_term(""));
        assert!(!l.matches_term("LN-2025"));
    }

    #[test]
    fn outstanding_prefers_server_value() {
        let mut l = loan(LoanStatus::Active);
        l.total_amount_payable = Some(1000.0);
        l.amount_paid = Some(250.0);
        assert_eq!(l.outstanding(), 750.0);
        l.remaining_amount = Some(600.0);
        assert_eq!(l.outstanding(), 600.0);
    }

    #[test]
    fn user_search_is_case_insensitive_on_name_and_email() {
        let user: User = serde_json::from_value(serde_json::json!({
            "id": 1,
            "name": "Asha Verma",
            "email": "asha@example.com",
            "phone": "9876543210",
        }))
        .unwrap();
        assert!(user.matches_term("ASHA"));
        assert!(user.matches_term("example.COM"));
        assert!(user.matches_term("98765"));
        assert!(!user.matches_term("rahul"));
    }

    #[test]
    fn user_detail_slices_are_optional() {
        let detail: UserDetail = serde_json::from_value(serde_json::json!({
            "id": 3,
            "name": "Asha",
            "email": "a@b.c",
            "phone": "1",
            "kycStatus": "submitted",
            "bankDetails": [
                {"id": 1, "bankName": "SBI", "accountNumber": "000111222333"}
            ],
        }))
        .unwrap();
        assert_eq!(detail.user.kyc_status, KycStatus::Submitted);
        assert_eq!(detail.bank_details.as_ref().map(Vec::len), Some(1));
        assert!(detail.loans.is_none());
        assert!(detail.agents.is_none());
    }

    #[test]
    fn follow_up_type_wire_values() {
        assert_eq!(
            serde_json::to_string(&FollowUpType::FieldVisit).unwrap(),
            "\"fieldVisit\""
        );
        let parsed: FollowUpType = serde_json::from_str("\"call\"").unwrap();
        assert_eq!(parsed, FollowUpType::Call);
    }

    #[test]
    fn detail_field_names_match_backend() {
        assert_eq!(UserDetailField::BankDetails.as_str(), "bankDetails");
        assert_eq!(UserDetailField::FollowUps.as_str(), "followUps");
        assert_eq!(UserDetailField::ContactsList.as_str(), "contactslist");
    }
}
