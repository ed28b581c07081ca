//! Open property bag for type-specific widget attributes.
//!
//! Every input-document key that is not one of the fixed widget fields folds
//! into this map. Accessors fail closed: a missing or wrong-typed value yields
//! the caller's fallback, never an error.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// String-keyed map of free-form widget properties (`placeholder`, `checked`,
/// `min`/`max`/`step`, `header`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Props(BTreeMap<String, Value>);

impl Props {
    /// Raw value lookup.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// String property; empty string when absent or not a string.
    #[must_use]
    pub fn string(&self, key: &str) -> String {
        self.get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    /// Integer property with an explicit fallback.
    #[must_use]
    pub fn integer(&self, key: &str, fallback: i64) -> i64 {
        self.get(key).and_then(Value::as_i64).unwrap_or(fallback)
    }

    /// Boolean property; false when absent or not a boolean.
    #[must_use]
    pub fn flag(&self, key: &str) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Array property; `None` when absent or not an array.
    #[must_use]
    pub fn array(&self, key: &str) -> Option<&Vec<Value>> {
        self.get(key).and_then(Value::as_array)
    }

    /// Insert or replace a property. Used by synthetic widgets and tests.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.0.insert(key.into(), value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a Props {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, Value)> for Props {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Props {
        let mut props = Props::default();
        props.insert("placeholder", json!("type here"));
        props.insert("checked", json!(true));
        props.insert("min", json!(10));
        props.insert("header", json!(["a", "b"]));
        props
    }

    #[test]
    fn typed_accessors_return_values() {
        let props = sample();
        assert_eq!(props.string("placeholder"), "type here");
        assert!(props.flag("checked"));
        assert_eq!(props.integer("min", 0), 10);
        assert_eq!(props.array("header").map(Vec::len), Some(2));
    }

    #[test]
    fn accessors_fail_closed_on_missing_keys() {
        let props = sample();
        assert_eq!(props.string("missing"), "");
        assert!(!props.flag("missing"));
        assert_eq!(props.integer("missing", 99), 99);
        assert!(props.array("missing").is_none());
    }

    #[test]
    fn accessors_fail_closed_on_wrong_types() {
        let props = sample();
        // "checked" is a bool, not a string; "min" is a number, not a bool.
        assert_eq!(props.string("checked"), "");
        assert!(!props.flag("min"));
        assert_eq!(props.integer("placeholder", -1), -1);
        assert!(props.array("checked").is_none());
    }

    #[test]
    fn serde_is_transparent() {
        let props = sample();
        let encoded = serde_json::to_value(&props).expect("encode");
        assert_eq!(encoded["min"], json!(10));

        let decoded: Props = serde_json::from_value(encoded).expect("decode");
        assert_eq!(decoded, props);
    }
}
