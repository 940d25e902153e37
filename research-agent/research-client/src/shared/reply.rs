/// Structured replies and per-field defaulting
///
/// A [`StructuredReply`] is always a JSON object: either what the model
/// produced, or the fallback record describing why nothing could be
/// recovered. Consumers read fields through the `*_or` accessors so a missing
/// or mistyped key degrades to a default instead of an error.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// `error` value carried by the fallback record
pub const PARSE_FAILURE: &str = "Failed to parse JSON";

/// Characters of the raw reply kept in the fallback record
pub const RAW_TEXT_LIMIT: usize = 500;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructuredReply(Map<String, Value>);

impl StructuredReply {
    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// `{"error": "Failed to parse JSON", "raw_text": <first 500 chars + "...">}`
    pub fn fallback(raw: &str) -> Self {
        let raw_text = if raw.chars().count() > RAW_TEXT_LIMIT {
            let mut cut: String = raw.chars().take(RAW_TEXT_LIMIT).collect();
            cut.push_str("...");
            cut
        } else {
            raw.to_string()
        };

        let mut map = Map::new();
        map.insert("error".to_string(), Value::String(PARSE_FAILURE.to_string()));
        map.insert("raw_text".to_string(), Value::String(raw_text));
        Self(map)
    }

    pub fn is_fallback(&self) -> bool {
        self.0.get("error").and_then(Value::as_str) == Some(PARSE_FAILURE)
            && self.0.contains_key("raw_text")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    pub fn text_or(&self, key: &str, default: impl Into<String>) -> String {
        text_field(&self.0, key).unwrap_or_else(|| default.into())
    }

    pub fn prose_or(&self, key: &str, default: impl Into<String>) -> String {
        prose_field(&self.0, key).unwrap_or_else(|| default.into())
    }

    pub fn strings_or(&self, key: &str, default: Vec<String>) -> Vec<String> {
        string_list_field(&self.0, key).unwrap_or(default)
    }

    pub fn objects(&self, key: &str) -> Vec<&Map<String, Value>> {
        object_list_field(&self.0, key)
    }

    pub fn object(&self, key: &str) -> Option<&Map<String, Value>> {
        self.0.get(key).and_then(Value::as_object)
    }
}

impl From<StructuredReply> for Value {
    fn from(reply: StructuredReply) -> Self {
        Value::Object(reply.0)
    }
}

/// A present, non-blank string
pub fn text_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// Like [`text_field`], but a list of strings is accepted and rendered as
/// `- item` lines
pub fn prose_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    if let Some(text) = text_field(map, key) {
        return Some(text);
    }
    let items = string_list_field(map, key)?;
    if items.is_empty() {
        return None;
    }
    Some(
        items
            .iter()
            .map(|item| format!("- {}", item))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

/// Array items that are strings or numbers; anything else in the array is dropped
pub fn string_list_field(map: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    let items = map.get(key)?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
    )
}

pub fn number_field(map: &Map<String, Value>, key: &str) -> Option<f64> {
    map.get(key).and_then(Value::as_f64)
}

pub fn object_list_field<'a>(map: &'a Map<String, Value>, key: &str) -> Vec<&'a Map<String, Value>> {
    map.get(key)
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_object).collect())
        .unwrap_or_default()
}
