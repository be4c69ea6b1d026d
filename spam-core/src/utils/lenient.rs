//! 宽松的反序列化工具
//!
//! 后端是弱类型实现：布尔标志可能以 `0`/`1`、`"0"`/`"1"` 或 JSON 布尔给出，
//! 表格单元格可能是字符串、数字或 `null`。

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 反序列化布尔标志：接受 bool、数字或数字字符串，缺省/`null` 为 `false`
pub fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .as_ref()
        .is_some_and(truthy))
}

/// 按后端的约定判断一个 JSON 值是否为真
pub fn truthy(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Null => false,
        Value::Array(a) => !a.is_empty(),
        Value::Object(_) => true,
    }
}

/// 把单元格值转换为显示文本
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// 反序列化可选字符串：数字会被转成文本，空字符串视为缺省
pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(deserializer)?
        .map(|v| cell_text(&v))
        .filter(|s| !s.is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "flag")]
        stale: bool,
        #[serde(default, deserialize_with = "opt_text")]
        outlet: Option<String>,
    }

    #[test]
    fn flag_accepts_numbers_and_strings() {
        let p: Probe = serde_json::from_value(json!({"stale": 1})).unwrap();
        assert!(p.stale);
        let p: Probe = serde_json::from_value(json!({"stale": "0"})).unwrap();
        assert!(!p.stale);
        let p: Probe = serde_json::from_value(json!({})).unwrap();
        assert!(!p.stale);
    }

    #[test]
    fn opt_text_converts_numbers_and_drops_empty() {
        let p: Probe = serde_json::from_value(json!({"outlet": 1042})).unwrap();
        assert_eq!(p.outlet.as_deref(), Some("1042"));
        let p: Probe = serde_json::from_value(json!({"outlet": ""})).unwrap();
        assert_eq!(p.outlet, None);
    }

    #[test]
    fn cell_text_renders_null_as_empty() {
        assert_eq!(cell_text(&Value::Null), "");
        assert_eq!(cell_text(&json!("ge1/0/1")), "ge1/0/1");
        assert_eq!(cell_text(&json!(12)), "12");
    }
}
