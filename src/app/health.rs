//! 健康检查

use axum::{extract::State, response::Json};

use super::AppState;
use crate::core::error::CoreError;

pub async fn health_check(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, CoreError> {
    let items = state.item_service.count()?;

    Ok(Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "items": items,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    })))
}
