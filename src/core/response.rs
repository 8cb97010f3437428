//! 核心响应处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;

/// 统一的 JSON 响应包装
///
/// 序列化形态：
/// `{"data": <T|省略>, "success": bool, "message": <string|省略>, "statusCode": int}`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    pub success: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub message: String,
    pub status_code: u16,
}

impl<T> Envelope<T> {
    /// 带数据的成功响应
    pub fn success(data: T, message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            data: Some(data),
            success: true,
            message: message.into(),
            status_code: status.as_u16(),
        }
    }

    /// 不带数据的成功响应
    pub fn message(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            data: None,
            success: true,
            message: message.into(),
            status_code: status.as_u16(),
        }
    }

    pub fn failure(message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            data: None,
            success: false,
            message: message.into(),
            status_code: status.as_u16(),
        }
    }
}

impl<T> Envelope<Vec<T>> {
    /// 列表响应，列表为空时省略 `data`
    pub fn collection(items: Vec<T>, message: impl Into<String>, status: StatusCode) -> Self {
        Self {
            data: (!items.is_empty()).then_some(items),
            success: true,
            message: message.into(),
            status_code: status.as_u16(),
        }
    }
}

impl<T: Serialize> IntoResponse for Envelope<T> {
    fn into_response(self) -> Response {
        // statusCode 字段和实际状态码保持一致
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
