//! 用户资源端点

use gloo_net::http::Method;
use mudra_shared::error::ApiResult;
use mudra_shared::models::{MessageResponse, UserDetail, UserDetailField, UserListResponse};
use mudra_shared::query::{ListQuery, UserScope};
use mudra_shared::requests::KycUpdateRequest;

use super::ApiClient;

#[derive(Clone, Debug, PartialEq)]
pub struct UserApi {
    http: ApiClient,
}

impl UserApi {
    pub fn new(http: ApiClient) -> Self {
        Self { http }
    }

    /// 分页用户列表，过滤范围由 `UserScope` 决定
    pub async fn list(&self, query: &ListQuery<UserScope>) -> ApiResult<UserListResponse> {
        self.http
            .get_admin(&format!("/users?{}", query.query_string()))
            .await
    }

    /// 用户详情；`field` 指定需要附带的切片
    pub async fn detail(
        &self,
        user_id: i64,
        field: Option<UserDetailField>,
    ) -> ApiResult<UserDetail> {
        let path = match field {
            Some(field) => format!("/user/{user_id}?field={}", field.as_str()),
            None => format!("/user/{user_id}"),
        };
        self.http.get_admin(&path).await
    }

    pub async fn block(&self, user_id: i64) -> ApiResult<MessageResponse> {
        self.http
            .send_admin(Method::PATCH, &format!("/block-user/{user_id}"))
            .await
    }

    pub async fn restore(&self, user_id: i64) -> ApiResult<MessageResponse> {
        self.http
            .send_admin(Method::PATCH, &format!("/restore-user/{user_id}"))
            .await
    }

    /// KYC 审核结论，驳回时带原因
    pub async fn update_kyc(
        &self,
        user_id: i64,
        request: &KycUpdateRequest,
    ) -> ApiResult<MessageResponse> {
        self.http
            .send_admin_json(
                Method::PATCH,
                &format!("/update-kyc-status/{user_id}"),
                request,
            )
            .await
    }
}
