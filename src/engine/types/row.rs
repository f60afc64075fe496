use indexmap::IndexMap;
use indexmap::map::Iter;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use super::ScalarValue;

/// Synthetic dimension holding the contributing dataset's display name.
pub const SOURCE_COLUMN: &str = "_source";

/// One schema-less result row, ordered by column insertion.
///
/// All column reads go through the accessors below so the missing-value
/// defaults (`0` for metrics, `""` for key parts) are applied in one place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    values: IndexMap<String, ScalarValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, column: impl Into<String>, value: impl Into<ScalarValue>) -> Self {
        self.set(column, value);
        self
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<ScalarValue>) {
        self.values.insert(column.into(), value.into());
    }

    pub fn set_number(&mut self, column: &str, value: f64) {
        self.values
            .insert(column.to_string(), ScalarValue::from_f64(value));
    }

    pub fn get(&self, column: &str) -> Option<&ScalarValue> {
        self.values.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &String> {
        self.values.keys()
    }

    pub fn iter(&self) -> Iter<'_, String, ScalarValue> {
        self.values.iter()
    }

    /// Metric view: missing or non-numeric values read as `0`.
    pub fn number(&self, column: &str) -> f64 {
        self.values
            .get(column)
            .and_then(ScalarValue::as_f64)
            .unwrap_or(0.0)
    }

    /// Dimension view: missing values read as the empty string.
    pub fn key_part(&self, column: &str) -> String {
        self.values
            .get(column)
            .map(ScalarValue::to_string_repr)
            .unwrap_or_default()
    }

    pub fn text(&self, column: &str) -> Option<&str> {
        self.values.get(column).and_then(ScalarValue::as_str)
    }

    pub fn source(&self) -> Option<&str> {
        self.text(SOURCE_COLUMN)
    }

    /// Builds a row from a JSON object; any other JSON value yields `None`.
    pub fn from_json(value: JsonValue) -> Option<Self> {
        match value {
            JsonValue::Object(map) => Some(
                map.into_iter()
                    .map(|(k, v)| (k, ScalarValue::from(v)))
                    .collect(),
            ),
            _ => None,
        }
    }

    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.clone(), v.to_json()))
                .collect(),
        )
    }
}

impl FromIterator<(String, ScalarValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, ScalarValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = (&'a String, &'a ScalarValue);
    type IntoIter = Iter<'a, String, ScalarValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
