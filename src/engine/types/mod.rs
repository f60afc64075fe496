mod dataset;
mod row;


pub use dataset::DatasetResult;
pub use row::{Row, SOURCE_COLUMN};

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Number, Value as JsonValue};

/// Largest magnitude at which every integer is exactly representable as f64.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Null,
    Boolean(bool),
    Int64(i64),
    Float64(f64),
    Utf8(String),
}

impl ScalarValue {
    /// Builds a numeric scalar, folding integral values back to `Int64` so
    /// sums of integer metrics render as JSON integers.
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() && value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER {
            ScalarValue::Int64(value as i64)
        } else {
            ScalarValue::Float64(value)
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            ScalarValue::Null => JsonValue::Null,
            ScalarValue::Boolean(b) => JsonValue::Bool(*b),
            ScalarValue::Int64(i) => JsonValue::Number(Number::from(*i)),
            ScalarValue::Float64(f) => Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            ScalarValue::Utf8(s) => JsonValue::String(s.clone()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, ScalarValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ScalarValue::Utf8(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Numeric view of the value. Numeric strings are accepted because
    /// executors backed by decimal columns report aggregates as text.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ScalarValue::Float64(f) => Some(*f),
            ScalarValue::Int64(i) => Some(*i as f64),
            ScalarValue::Utf8(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            _ => None,
        }
    }

    /// String form used for grouping keys and labels; `Null` is empty.
    pub fn to_string_repr(&self) -> String {
        match self {
            ScalarValue::Null => String::new(),
            ScalarValue::Boolean(b) => b.to_string(),
            ScalarValue::Int64(i) => i.to_string(),
            ScalarValue::Float64(f) => f.to_string(),
            ScalarValue::Utf8(s) => s.clone(),
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_repr())
    }
}

impl From<JsonValue> for ScalarValue {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => ScalarValue::Null,
            JsonValue::Bool(b) => ScalarValue::Boolean(b),
            JsonValue::Number(num) => {
                if let Some(i) = num.as_i64() {
                    ScalarValue::Int64(i)
                } else if let Some(f) = num.as_f64() {
                    ScalarValue::Float64(f)
                } else {
                    ScalarValue::Utf8(num.to_string())
                }
            }
            JsonValue::String(s) => ScalarValue::Utf8(s),
            // Rows are flat; nested values are kept as their JSON text.
            JsonValue::Array(_) | JsonValue::Object(_) => ScalarValue::Utf8(value.to_string()),
        }
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        ScalarValue::Utf8(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        ScalarValue::Utf8(value)
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        ScalarValue::Int64(value)
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        ScalarValue::Float64(value)
    }
}

impl From<&ScalarValue> for JsonValue {
    fn from(value: &ScalarValue) -> Self {
        value.to_json()
    }
}

impl Serialize for ScalarValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ScalarValue::Null => serializer.serialize_unit(),
            ScalarValue::Boolean(b) => serializer.serialize_bool(*b),
            ScalarValue::Int64(i) => serializer.serialize_i64(*i),
            ScalarValue::Float64(f) if f.is_finite() => serializer.serialize_f64(*f),
            ScalarValue::Float64(_) => serializer.serialize_unit(),
            ScalarValue::Utf8(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for ScalarValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let json = JsonValue::deserialize(deserializer)?;
        Ok(ScalarValue::from(json))
    }
}
