//! Fallback sheet for systems without a dedicated layout.
//!
//! The data is kept as raw JSON and displayed as a tree.

use serde_json::{Map, Value};

pub const NULL_LABEL: &str = "未設定";
pub const EMPTY_LIST_LABEL: &str = "なし";
pub const EMPTY_SHEET_LABEL: &str = "シートデータがありません";

/// A display tree built from arbitrary JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum GenericNode {
    /// A leaf rendered as text (null, booleans, numbers, strings, empty lists).
    Leaf(String),
    List(Vec<GenericNode>),
    Object(Vec<(String, GenericNode)>),
}

impl GenericNode {
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => GenericNode::Leaf(NULL_LABEL.to_string()),
            Value::Bool(true) => GenericNode::Leaf("✓".to_string()),
            Value::Bool(false) => GenericNode::Leaf("✗".to_string()),
            Value::Number(n) => GenericNode::Leaf(n.to_string()),
            Value::String(s) => GenericNode::Leaf(s.clone()),
            Value::Array(items) if items.is_empty() => {
                GenericNode::Leaf(EMPTY_LIST_LABEL.to_string())
            }
            Value::Array(items) => GenericNode::List(items.iter().map(Self::from_value).collect()),
            Value::Object(map) => GenericNode::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from_value(v)))
                    .collect(),
            ),
        }
    }

    pub fn as_leaf(&self) -> Option<&str> {
        match self {
            GenericNode::Leaf(text) => Some(text),
            _ => None,
        }
    }
}

/// A sheet with no content: null, or an empty object.
pub fn is_empty_sheet(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Top-level entries of a sheet, or `None` when there is nothing to show.
pub fn sheet_entries(value: &Value) -> Option<Vec<(String, GenericNode)>> {
    if is_empty_sheet(value) {
        return None;
    }
    match GenericNode::from_value(value) {
        GenericNode::Object(entries) => Some(entries),
        other => Some(vec![(String::new(), other)]),
    }
}

/// Parses JSON text typed into the generic editor. Only objects are accepted.
pub fn parse_sheet_text(text: &str) -> Result<Value, String> {
    match serde_json::from_str::<Value>(text) {
        Ok(value @ Value::Object(_)) => Ok(value),
        Ok(_) => Err("JSONオブジェクトを入力してください".to_string()),
        Err(e) => Err(format!("JSONの形式が正しくありません: {e}")),
    }
}

/// Pretty-printed JSON for the generic editor.
pub fn sheet_text(value: &Value) -> String {
    let value = if value.is_null() {
        Value::Object(Map::new())
    } else {
        value.clone()
    };
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
}
