//! Content items as published in the JSON index.
//!
//! The index shape is not controlled here: every item is an open mapping of
//! field name to value. Scalars are kept as text, arrays as lists of text,
//! and `null` or nested objects are treated as absent.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A single field value on a content item.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Scalar value rendered as text.
    Text(String),
    /// List of scalar values.
    List(Vec<String>),
}

impl FieldValue {
    /// Convert a JSON value, or `None` for null and objects.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Array(values) => Some(Self::List(
                values.iter().filter_map(scalar_text).collect(),
            )),
            other => scalar_text(other).map(Self::Text),
        }
    }

    /// Display form: text as-is, lists joined with `", "`.
    pub fn display(&self) -> String {
        match self {
            Self::Text(s) => s.clone(),
            Self::List(values) => values.join(", "),
        }
    }

    /// Individual values: one for text, every element for lists.
    pub fn values(&self) -> Vec<&str> {
        match self {
            Self::Text(s) => vec![s.as_str()],
            Self::List(values) => values.iter().map(String::as_str).collect(),
        }
    }

    /// Whether any value equals `wanted`, ignoring case.
    pub fn matches_ignore_case(&self, wanted: &str) -> bool {
        let wanted = wanted.to_lowercase();
        self.values().iter().any(|v| v.to_lowercase() == wanted)
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// One entry from the index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ContentItem {
    fields: BTreeMap<String, FieldValue>,
}

impl ContentItem {
    /// Create an empty item.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style text field setter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), FieldValue::Text(value.into()));
        self
    }

    /// Builder-style list field setter.
    pub fn with_list<I, S>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.insert(
            name.into(),
            FieldValue::List(values.into_iter().map(Into::into).collect()),
        );
        self
    }

    /// Build an item from a JSON object.
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        Self {
            fields: object
                .iter()
                .filter_map(|(k, v)| FieldValue::from_json(v).map(|fv| (k.clone(), fv)))
                .collect(),
        }
    }

    /// Raw field value.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Text of a scalar field, or `None` for lists and absent fields.
    pub fn text(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(FieldValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The item's `path` field, or `""`.
    pub fn path(&self) -> &str {
        self.text("path").unwrap_or("")
    }

    /// First non-empty text among `names`.
    pub fn first_text(&self, names: &[&str]) -> Option<&str> {
        names
            .iter()
            .filter_map(|n| self.text(n))
            .find(|s| !s.is_empty())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_object_types() {
        let value = json!({
            "title": "Dunes",
            "views": 42,
            "featured": true,
            "tags": ["Beach", 7, null],
            "image": null,
            "meta": {"a": 1}
        });
        let item = ContentItem::from_json_object(value.as_object().unwrap());

        assert_eq!(item.text("title"), Some("Dunes"));
        assert_eq!(item.text("views"), Some("42"));
        assert_eq!(item.text("featured"), Some("true"));
        assert_eq!(
            item.get("tags"),
            Some(&FieldValue::List(vec!["Beach".into(), "7".into()]))
        );
        assert!(item.get("image").is_none());
        assert!(item.get("meta").is_none());
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Text("a".into()).display(), "a");
        assert_eq!(
            FieldValue::List(vec!["a".into(), "b".into()]).display(),
            "a, b"
        );
    }

    #[test]
    fn test_matches_ignore_case() {
        let text = FieldValue::Text("Beach".into());
        assert!(text.matches_ignore_case("beach"));
        assert!(!text.matches_ignore_case("surf"));

        let list = FieldValue::List(vec!["Surf".into(), "BEACH".into()]);
        assert!(list.matches_ignore_case("beach"));
    }

    #[test]
    fn test_path_default() {
        assert_eq!(ContentItem::new().path(), "");
        assert_eq!(ContentItem::new().with("path", "/a").path(), "/a");
    }

    #[test]
    fn test_first_text_skips_empty() {
        let item = ContentItem::new()
            .with("publishDate", "")
            .with("lastModified", "1700000000");
        assert_eq!(
            item.first_text(&["publishDate", "lastModified"]),
            Some("1700000000")
        );
    }

    #[test]
    fn test_serialize_transparent() {
        let item = ContentItem::new()
            .with("title", "A")
            .with_list("tags", ["x"]);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json, json!({"tags": ["x"], "title": "A"}));
    }
}
