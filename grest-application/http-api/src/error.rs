//! HTTP 错误响应

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use grest_gluster::GlusterError;
use serde_json::json;
use thiserror::Error;

/// 处理函数结果类型
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// API 错误
///
/// 统一渲染为 `{"message": "..."}`。gluster 的诊断信息原样透传。
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Gluster(#[from] GlusterError),

    /// 请求体或参数不合法
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Gluster(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!("请求失败: {}", self);
        }
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

impl From<axum::extract::rejection::JsonRejection> for ApiError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::BadRequest(format!("无效的请求体: {}", err))
    }
}
