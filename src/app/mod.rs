//! 应用层：路由、共享状态和各个业务模块

pub mod health;
pub mod items;

use axum::{
    error_handling::HandleErrorLayer, extract::DefaultBodyLimit, middleware, routing::get,
    BoxError, Router,
};
use std::sync::Arc;
use tower::{timeout::error::Elapsed, ServiceBuilder};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::core::{error::CoreError, middleware::request_logging_middleware};
use crate::infrastructure::config::HttpConfig;
use items::{handler, service::ItemService, store::ItemStore};

/// 所有处理器共享的应用状态
#[derive(Clone)]
pub struct AppState {
    pub item_service: ItemService,
}

impl AppState {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self {
            item_service: ItemService::new(store),
        }
    }
}

/// 构建完整的路由，包含全部中间件
pub fn create_router(state: AppState, http: &HttpConfig) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/items",
            get(handler::list_or_get_items)
                .post(handler::create_item)
                .put(handler::update_item)
                .delete(handler::delete_item)
                .fallback(method_not_allowed),
        )
        .fallback(route_not_found)
        .layer(DefaultBodyLimit::max(http.body_limit_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_logging_middleware))
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                )
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .timeout(http.request_timeout()),
        )
        .with_state(state)
}

async fn route_not_found() -> CoreError {
    CoreError::not_found("Route not found")
}

async fn method_not_allowed() -> CoreError {
    CoreError::MethodNotAllowed
}

/// 把中间件层的错误（目前只有超时）转换成统一响应
async fn handle_middleware_error(err: BoxError) -> CoreError {
    if err.is::<Elapsed>() {
        CoreError::RequestTimeout
    } else {
        CoreError::internal(format!("Unhandled middleware error: {}", err))
    }
}
