//! Items 资源：模型、存储、服务和处理器

pub mod handler;
pub mod model;
pub mod service;
pub mod store;

pub use model::Item;
pub use service::ItemService;
pub use store::{IdStrategy, ItemStore, MemoryItemStore};
