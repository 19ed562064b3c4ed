//! 宽松反序列化
//!
//! 模型回复只要是 JSON 对象就接受：`null` 取默认值，非字符串标量
//! 保留其 JSON 文本，类型不符的数组与元素取默认值。

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn text_of(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_of(Value::deserialize(deserializer)?).unwrap_or_default())
}

pub fn optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_of(Value::deserialize(deserializer)?))
}

pub fn seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .map(|item| serde_json::from_value(item).unwrap_or_default())
            .collect()),
        _ => Ok(Vec::new()),
    }
}
