//! 核心错误处理模块
//!
//! 所有业务错误最终都会转换成统一的 [`Envelope`] 响应，
//! `success` 为 `false`，`statusCode` 与 HTTP 状态码一致。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{debug, error};

use super::response::Envelope;

/// 核心错误类型
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Request timed out")]
    RequestTimeout,
    #[error("Request body too large")]
    PayloadTooLarge,
    #[error("{0}")]
    InternalServerError(String),
}

impl CoreError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        CoreError::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        CoreError::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        CoreError::InternalServerError(msg.into())
    }

    /// 错误对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            CoreError::BadRequest(_) => StatusCode::BAD_REQUEST,
            CoreError::NotFound(_) => StatusCode::NOT_FOUND,
            CoreError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            CoreError::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            CoreError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            CoreError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for CoreError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!("请求处理失败: {}", self);
        } else {
            debug!("请求被拒绝: {} - {}", status, self);
        }

        Envelope::<()>::failure(self.to_string(), status).into_response()
    }
}
