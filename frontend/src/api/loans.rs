//! 贷款资源端点

use gloo_net::http::Method;
use mudra_shared::error::ApiResult;
use mudra_shared::models::{Loan, LoanListResponse, LoanStatus, MessageResponse};
use mudra_shared::query::{ListQuery, LoanScope};
use mudra_shared::requests::{
    ChangeLoanStatusRequest, FollowUpRequest, PaymentLinkRequest, PaymentLinkResponse,
    ReviewLoanRequest,
};

use super::ApiClient;

#[derive(Clone, Debug, PartialEq)]
pub struct LoanApi {
    http: ApiClient,
}

impl LoanApi {
    pub fn new(http: ApiClient) -> Self {
        Self { http }
    }

    pub async fn list(&self, query: &ListQuery<LoanScope>) -> ApiResult<LoanListResponse> {
        self.http
            .get_admin(&format!("/loans?{}", query.query_string()))
            .await
    }

    pub async fn detail(&self, loan_id: i64) -> ApiResult<Loan> {
        self.http.get_admin(&format!("/loan/{loan_id}")).await
    }

    /// 提交审核条款，仅对 requested 状态的贷款有意义
    pub async fn review(
        &self,
        loan_id: i64,
        request: &ReviewLoanRequest,
    ) -> ApiResult<MessageResponse> {
        self.http
            .send_admin_json(Method::PATCH, &format!("/loan/review/{loan_id}"), request)
            .await
    }

    pub async fn approve(&self, loan_id: i64) -> ApiResult<MessageResponse> {
        self.http
            .send_admin(Method::PATCH, &format!("/loan/approve/{loan_id}"))
            .await
    }

    pub async fn add_follow_up(
        &self,
        loan_id: i64,
        request: &FollowUpRequest,
    ) -> ApiResult<MessageResponse> {
        self.http
            .send_admin_json(Method::PATCH, &format!("/loan/followup/{loan_id}"), request)
            .await
    }

    /// 标记违约走通用的状态变更端点
    pub async fn mark_defaulted(&self, loan_id: i64) -> ApiResult<MessageResponse> {
        let body = ChangeLoanStatusRequest {
            status: LoanStatus::Defaulted,
        };
        self.http
            .send_admin_json(
                Method::PATCH,
                &format!("/loan/change-status/{loan_id}"),
                &body,
            )
            .await
    }

    pub async fn create_payment_link(
        &self,
        request: &PaymentLinkRequest,
    ) -> ApiResult<PaymentLinkResponse> {
        self.http
            .send_admin_json(Method::POST, "/loan/create-payment-link", request)
            .await
    }
}
