//! Items 业务服务

use std::sync::Arc;

use super::{model::Item, store::ItemStore};
use crate::core::error::CoreError;

pub const ITEM_NOT_FOUND: &str = "Item not found";

#[derive(Clone)]
pub struct ItemService {
    store: Arc<dyn ItemStore>,
}

impl ItemService {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    pub fn list_items(&self) -> Result<Vec<Item>, CoreError> {
        self.store.list()
    }

    pub fn get_item(&self, id: i64) -> Result<Item, CoreError> {
        self.store
            .find(id)?
            .ok_or_else(|| CoreError::not_found(ITEM_NOT_FOUND))
    }

    pub fn create_item(&self, item: Item) -> Result<Item, CoreError> {
        let created = self.store.append(item)?;
        tracing::info!("创建条目 id={} name={:?}", created.id, created.name);
        Ok(created)
    }

    pub fn update_item(&self, item: Item) -> Result<Item, CoreError> {
        let updated = self
            .store
            .replace(item)?
            .ok_or_else(|| CoreError::not_found(ITEM_NOT_FOUND))?;
        tracing::info!("更新条目 id={}", updated.id);
        Ok(updated)
    }

    pub fn delete_item(&self, id: i64) -> Result<Item, CoreError> {
        let removed = self
            .store
            .remove(id)?
            .ok_or_else(|| CoreError::not_found(ITEM_NOT_FOUND))?;
        tracing::info!("删除条目 id={}", removed.id);
        Ok(removed)
    }

    pub fn count(&self) -> Result<usize, CoreError> {
        self.store.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::items::model::sample_items;
    use crate::app::items::store::{IdStrategy, MemoryItemStore};

    fn service() -> ItemService {
        ItemService::new(Arc::new(MemoryItemStore::with_items(
            sample_items(),
            IdStrategy::Length,
        )))
    }

    #[test]
    fn test_get_missing_item_is_not_found() {
        let err = service().get_item(99).unwrap_err();
        assert!(matches!(err, CoreError::NotFound(ref msg) if msg == ITEM_NOT_FOUND));
    }

    #[test]
    fn test_update_unknown_id_is_not_found() {
        let err = service()
            .update_item(Item::new(77, "Ghost", 1.0))
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[test]
    fn test_delete_then_get() {
        let service = service();
        assert_eq!(service.delete_item(1).unwrap().id, 1);
        assert!(service.get_item(1).is_err());
        assert_eq!(service.count().unwrap(), 1);
    }
}
