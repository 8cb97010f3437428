//! Items 处理器
//!
//! 每个处理器只做三件事：解析查询参数或请求体、调用 [`ItemService`]、
//! 把结果包装成 [`Envelope`]。所有失败路径都通过 [`CoreError`] 返回。

use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::debug;

use super::{model::Item, service::ItemService};
use crate::app::AppState;
use crate::core::{error::CoreError, response::Envelope};

pub const MISSING_ID: &str = "Missing 'id' query parameter";
pub const INVALID_ID: &str = "Invalid 'id' parameter";
pub const INVALID_PAYLOAD: &str = "Invalid request payload";

/// 原始查询参数，保留顺序和重复的键
type QueryPairs = Vec<(String, String)>;

/// `GET /items`
///
/// 查询串中带 `id` 键时按 ID 查询，否则返回全部条目。
pub async fn list_or_get_items(
    State(state): State<AppState>,
    Query(params): Query<QueryPairs>,
) -> Result<Response, CoreError> {
    if params.iter().any(|(key, _)| key == "id") {
        get_item(&state.item_service, &params).map(IntoResponse::into_response)
    } else {
        list_items(&state.item_service).map(IntoResponse::into_response)
    }
}

pub fn list_items(service: &ItemService) -> Result<Envelope<Vec<Item>>, CoreError> {
    let items = service.list_items()?;
    Ok(Envelope::collection(
        items,
        "Items retrieved successfully",
        StatusCode::OK,
    ))
}

pub fn get_item(
    service: &ItemService,
    params: &[(String, String)],
) -> Result<Envelope<Item>, CoreError> {
    let id = parse_id(params)?;
    let item = service.get_item(id)?;
    Ok(Envelope::success(
        item,
        "Item retrieved successfully",
        StatusCode::OK,
    ))
}

/// `POST /items`
pub async fn create_item(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Envelope<Item>, CoreError> {
    let item = decode_item(&read_body(body)?)?;
    let created = state.item_service.create_item(item)?;
    Ok(Envelope::success(
        created,
        "Item created successfully",
        StatusCode::CREATED,
    ))
}

/// `PUT /items`
pub async fn update_item(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Envelope<Item>, CoreError> {
    let item = decode_item(&read_body(body)?)?;
    let updated = state.item_service.update_item(item)?;
    Ok(Envelope::success(
        updated,
        "Item updated successfully",
        StatusCode::OK,
    ))
}

/// `DELETE /items?id=<int>`
pub async fn delete_item(
    State(state): State<AppState>,
    Query(params): Query<QueryPairs>,
) -> Result<Envelope<()>, CoreError> {
    let id = parse_id(&params)?;
    state.item_service.delete_item(id)?;
    Ok(Envelope::message("Item deleted successfully", StatusCode::OK))
}

/// 取第一个 `id` 参数；缺失或为空视为缺少参数
fn parse_id(params: &[(String, String)]) -> Result<i64, CoreError> {
    let raw = params
        .iter()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.as_str())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| CoreError::bad_request(MISSING_ID))?;

    raw.parse::<i64>().map_err(|_| CoreError::bad_request(INVALID_ID))
}

/// 读取请求体失败时也返回统一响应
fn read_body(body: Result<Bytes, BytesRejection>) -> Result<Bytes, CoreError> {
    body.map_err(|rejection| {
        debug!("读取请求体失败: {}", rejection);
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            CoreError::PayloadTooLarge
        } else {
            CoreError::bad_request(INVALID_PAYLOAD)
        }
    })
}

/// 请求体按 JSON 解析，不检查 Content-Type
fn decode_item(body: &[u8]) -> Result<Item, CoreError> {
    Item::from_json_slice(body).map_err(|e| {
        debug!("请求体解析失败: {}", e);
        CoreError::bad_request(INVALID_PAYLOAD)
    })
}
