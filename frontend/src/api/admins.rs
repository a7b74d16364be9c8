//! 管理员 / 代理资源端点
//!
//! `getalladmins` 直接返回数组；`assingn-agent` / `unassingn-agent`
//! 的拼写来自线上契约，保持原样。

use gloo_net::http::Method;
use mudra_shared::error::ApiResult;
use mudra_shared::models::{Admin, MessageResponse};
use mudra_shared::requests::{AssignAgentRequest, CreateAdminRequest};

use super::ApiClient;

#[derive(Clone, Debug, PartialEq)]
pub struct AdminApi {
    http: ApiClient,
}

impl AdminApi {
    pub fn new(http: ApiClient) -> Self {
        Self { http }
    }

    /// 全部后台账号；`only_agents` 时服务端按 type=agent 过滤
    pub async fn list(&self, only_agents: bool) -> ApiResult<Vec<Admin>> {
        let path = if only_agents {
            "/getalladmins?type=agent"
        } else {
            "/getalladmins"
        };
        self.http.get_admin(path).await
    }

    pub async fn create(&self, request: &CreateAdminRequest) -> ApiResult<MessageResponse> {
        self.http
            .send_admin_json(Method::POST, "/create-admin", request)
            .await
    }

    pub async fn delete(&self, admin_id: i64) -> ApiResult<MessageResponse> {
        self.http
            .send_admin(Method::DELETE, &format!("/delete-admin/{admin_id}"))
            .await
    }

    pub async fn assign_agent(&self, request: &AssignAgentRequest) -> ApiResult<MessageResponse> {
        self.http
            .send_admin_json(Method::POST, "/assingn-agent", request)
            .await
    }

    pub async fn unassign_agent(&self, request: &AssignAgentRequest) -> ApiResult<MessageResponse> {
        self.http
            .send_admin_json(Method::DELETE, "/unassingn-agent", request)
            .await
    }
}
