//! # Items Service
//!
//! 基于 Axum 的内存 CRUD 服务，对外只暴露一个 `items` 资源集合，
//! 所有响应都包装在统一的 JSON 信封中：
//!
//! ```json
//! {"data": ..., "success": true, "message": "...", "statusCode": 200}
//! ```
//!
//! 分层结构：
//! - [`app`]：路由、处理器、业务服务和存储
//! - [`core`]：错误类型、统一响应、中间件
//! - [`infrastructure`]：配置加载、日志初始化

pub mod app;
pub mod core;
pub mod infrastructure;

use std::sync::Arc;

use app::items::{model::sample_items, store::MemoryItemStore};
use infrastructure::config::StoreConfig;

pub use app::{create_router, AppState};

/// 按配置创建内存存储
pub fn build_store(config: &StoreConfig) -> Arc<MemoryItemStore> {
    let items = if config.seed_sample_items {
        sample_items()
    } else {
        Vec::new()
    };
    Arc::new(MemoryItemStore::with_items(items, config.id_strategy))
}
