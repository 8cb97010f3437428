//! Items 存储层
//!
//! [`ItemStore`] 是处理器访问数据的唯一入口，默认实现 [`MemoryItemStore`]
//! 把条目按创建顺序保存在进程内存中，所有操作都是线性扫描。

use serde::{Deserialize, Serialize};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::model::Item;
use crate::core::error::CoreError;

/// 新条目 ID 的分配方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// ID = 当前条目数 + 1，删除之后可能与现有 ID 冲突
    #[default]
    Length,
    /// ID = 历史最大 ID + 1，不会重复使用
    Monotonic,
}

/// 条目存储抽象
pub trait ItemStore: Send + Sync {
    /// 按插入顺序返回全部条目
    fn list(&self) -> Result<Vec<Item>, CoreError>;

    /// 返回第一个 ID 匹配的条目
    fn find(&self, id: i64) -> Result<Option<Item>, CoreError>;

    /// 分配新 ID 并追加到末尾，客户端传入的 ID 会被忽略
    fn append(&self, item: Item) -> Result<Item, CoreError>;

    /// 用 `item` 覆盖第一个 ID 相同的条目，未找到时返回 `None`
    fn replace(&self, item: Item) -> Result<Option<Item>, CoreError>;

    /// 删除第一个 ID 匹配的条目，其余条目保持原有顺序
    fn remove(&self, id: i64) -> Result<Option<Item>, CoreError>;

    fn len(&self) -> Result<usize, CoreError>;

    fn is_empty(&self) -> Result<bool, CoreError> {
        Ok(self.len()? == 0)
    }
}

#[derive(Debug, Default)]
struct StoreState {
    items: Vec<Item>,
    // 已出现过的最大 ID，只用于 Monotonic
    highest_id: i64,
}

/// 基于 `RwLock<Vec<Item>>` 的内存存储
#[derive(Debug, Default)]
pub struct MemoryItemStore {
    state: RwLock<StoreState>,
    strategy: IdStrategy,
}

impl MemoryItemStore {
    pub fn new(strategy: IdStrategy) -> Self {
        Self::with_items(Vec::new(), strategy)
    }

    /// 使用给定的初始数据创建存储，初始数据的 ID 原样保留
    pub fn with_items(items: Vec<Item>, strategy: IdStrategy) -> Self {
        let highest_id = items.iter().map(|item| item.id).max().unwrap_or(0);
        Self {
            state: RwLock::new(StoreState { items, highest_id }),
            strategy,
        }
    }

    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, CoreError> {
        self.state
            .read()
            .map_err(|_| CoreError::internal("Item store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>, CoreError> {
        self.state
            .write()
            .map_err(|_| CoreError::internal("Item store lock poisoned"))
    }
}

impl ItemStore for MemoryItemStore {
    fn list(&self) -> Result<Vec<Item>, CoreError> {
        Ok(self.read()?.items.clone())
    }

    fn find(&self, id: i64) -> Result<Option<Item>, CoreError> {
        Ok(self.read()?.items.iter().find(|item| item.id == id).cloned())
    }

    fn append(&self, mut item: Item) -> Result<Item, CoreError> {
        let mut state = self.write()?;

        item.id = match self.strategy {
            IdStrategy::Length => state.items.len() as i64 + 1,
            IdStrategy::Monotonic => state.highest_id + 1,
        };
        state.highest_id = state.highest_id.max(item.id);
        state.items.push(item.clone());

        Ok(item)
    }

    fn replace(&self, item: Item) -> Result<Option<Item>, CoreError> {
        let mut state = self.write()?;

        match state.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(slot) => {
                *slot = item.clone();
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    fn remove(&self, id: i64) -> Result<Option<Item>, CoreError> {
        let mut state = self.write()?;

        match state.items.iter().position(|item| item.id == id) {
            Some(index) => Ok(Some(state.items.remove(index))),
            None => Ok(None),
        }
    }

    fn len(&self) -> Result<usize, CoreError> {
        Ok(self.read()?.items.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::items::model::sample_items;

    fn seeded(strategy: IdStrategy) -> MemoryItemStore {
        MemoryItemStore::with_items(sample_items(), strategy)
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        let store = seeded(IdStrategy::Length);
        store.append(Item::new(0, "Third", 1.0)).unwrap();

        let names: Vec<String> = store.list().unwrap().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Item One", "Item Two", "Third"]);
    }

    #[test]
    fn test_append_ignores_client_id() {
        let store = seeded(IdStrategy::Length);
        let created = store.append(Item::new(42, "Widget", 5.5)).unwrap();

        assert_eq!(created, Item::new(3, "Widget", 5.5));
        assert_eq!(store.find(3).unwrap(), Some(created));
        assert_eq!(store.find(42).unwrap(), None);
    }

    #[test]
    fn test_length_strategy_reuses_ids_after_delete() {
        let store = seeded(IdStrategy::Length);
        store.append(Item::new(0, "Third", 3.0)).unwrap();
        store.remove(1).unwrap();

        // 长度为 2，新 ID 为 3，与现有条目冲突
        let created = store.append(Item::new(0, "Fourth", 4.0)).unwrap();
        assert_eq!(created.id, 3);
        assert_eq!(store.list().unwrap().iter().filter(|i| i.id == 3).count(), 2);
        assert_eq!(store.find(3).unwrap().unwrap().name, "Third");
    }

    #[test]
    fn test_monotonic_strategy_never_reuses_ids() {
        let store = seeded(IdStrategy::Monotonic);
        let third = store.append(Item::new(0, "Third", 3.0)).unwrap();
        store.remove(third.id).unwrap();

        let fourth = store.append(Item::new(0, "Fourth", 4.0)).unwrap();
        assert_eq!(third.id, 3);
        assert_eq!(fourth.id, 4);
    }

    #[test]
    fn test_replace_overwrites_in_place() {
        let store = seeded(IdStrategy::Length);
        let updated = store.replace(Item::new(1, "Renamed", 0.5)).unwrap();

        assert_eq!(updated, Some(Item::new(1, "Renamed", 0.5)));
        assert_eq!(store.list().unwrap()[0], Item::new(1, "Renamed", 0.5));
        assert_eq!(store.replace(Item::new(9, "Nope", 1.0)).unwrap(), None);
    }

    #[test]
    fn test_remove_preserves_remaining_order() {
        let store = seeded(IdStrategy::Length);
        store.append(Item::new(0, "Third", 3.0)).unwrap();

        let removed = store.remove(2).unwrap();
        assert_eq!(removed.map(|i| i.name), Some("Item Two".to_string()));

        let ids: Vec<i64> = store.list().unwrap().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(store.remove(2).unwrap(), None);
    }

    #[test]
    fn test_empty_store() {
        let store = MemoryItemStore::new(IdStrategy::Length);
        assert!(store.is_empty().unwrap());
        assert_eq!(store.append(Item::default()).unwrap().id, 1);
        assert_eq!(store.len().unwrap(), 1);
    }
}
