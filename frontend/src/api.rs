//! API 客户端基座
//!
//! 统一处理 base URL 拼接、Bearer 头、网络错误与非 2xx 响应的
//! 错误映射。各资源族的端点在 `api::users` / `api::loans` /
//! `api::admins` 里各自成一个客户端。

use gloo_net::http::{Method, Request, RequestBuilder, Response};
use mudra_shared::error::{ApiError, ApiResult};
use mudra_shared::requests::{LoginRequest, LoginResponse};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub mod admins;
pub mod loans;
pub mod users;

/// 部署时通过 `MUDRA_API_BASE_URL` 指定后端地址，缺省同源
pub fn api_base_url() -> &'static str {
    option_env!("MUDRA_API_BASE_URL").unwrap_or("")
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(token: Option<String>) -> Self {
        Self::with_base_url(api_base_url(), token)
    }

    pub fn with_base_url(base_url: &str, token: Option<String>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 管理端路径统一挂在 /api/v1/admin 下
    fn admin_url(&self, path: &str) -> String {
        self.url(&format!("/api/v1/admin{path}"))
    }

    fn builder(&self, method: Method, url: &str) -> RequestBuilder {
        let mut builder = RequestBuilder::new(url).method(method);
        if let Some(token) = &self.token {
            builder = builder.header("Authorization", &format!("Bearer {token}"));
        }
        builder
    }

    /// GET 管理端资源
    pub(crate) async fn get_admin<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let res = self
            .builder(Method::GET, &self.admin_url(path))
            .send()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;
        parse_response(res).await
    }

    /// 无请求体的变更（block/restore/approve 一类）
    pub(crate) async fn send_admin<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
    ) -> ApiResult<T> {
        let res = self
            .builder(method, &self.admin_url(path))
            .send()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;
        parse_response(res).await
    }

    /// 带 JSON 请求体的变更
    pub(crate) async fn send_admin_json<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let res = self
            .builder(method, &self.admin_url(path))
            .header("Content-Type", "application/json")
            .json(body)
            .map_err(|e| ApiError::serialization(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::network(e.to_string()))?;
        parse_response(res).await
    }
}

/// 非 2xx 一律转成错误，优先取响应体里的 message 字段
async fn parse_response<T: DeserializeOwned>(res: Response) -> ApiResult<T> {
    if !res.ok() {
        let status = res.status();
        let body = res.text().await.unwrap_or_default();
        return Err(ApiError::from_response_body(status, &body));
    }
    res.json::<T>()
        .await
        .map_err(|e| ApiError::serialization(e.to_string()))
}

/// 登录端点不挂在 /admin 前缀下，也不带 Bearer 头
pub async fn admin_login(request: &LoginRequest) -> ApiResult<LoginResponse> {
    let url = format!(
        "{}/api/v1/auth/adminlogin",
        api_base_url().trim_end_matches('/')
    );
    let res = Request::post(&url)
        .header("Content-Type", "application/json")
        .json(request)
        .map_err(|e| ApiError::serialization(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::network(e.to_string()))?;
    parse_response(res).await
}
