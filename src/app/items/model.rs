//! Items 数据模型

use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// 商品条目
///
/// 反序列化时所有字段都可以缺省或为 `null`（取零值），类型不匹配才算解析失败。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub price: f64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl Item {
    pub fn new(id: i64, name: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }

    /// 从请求体解析条目
    ///
    /// - 只读取第一个 JSON 值，其后的内容忽略
    /// - 顶层为 `null` 时得到零值条目
    /// - 字段名大小写不敏感，完全匹配的字段优先于大小写不同的字段
    pub fn from_json_slice(body: &[u8]) -> serde_json::Result<Self> {
        let first = serde_json::Deserializer::from_slice(body)
            .into_iter::<Value>()
            .next()
            .ok_or_else(|| <serde_json::Error as de::Error>::custom("empty request body"))??;

        match first {
            Value::Null => Ok(Item::default()),
            Value::Object(fields) => serde_json::from_value(Value::Object(fold_keys(fields))),
            other => serde_json::from_value(other),
        }
    }
}

fn fold_keys(fields: Map<String, Value>) -> Map<String, Value> {
    let (exact, other): (Vec<_>, Vec<_>) = fields
        .into_iter()
        .partition(|(key, _)| key.to_lowercase() == *key);

    let mut folded: Map<String, Value> = exact.into_iter().collect();
    for (key, value) in other {
        folded.entry(key.to_lowercase()).or_insert(value);
    }
    folded
}

/// 启动时预置的示例数据
pub fn sample_items() -> Vec<Item> {
    vec![
        Item::new(1, "Item One", 10.99),
        Item::new(2, "Item Two", 20.99),
    ]
}
