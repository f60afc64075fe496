use std::fmt;

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::engine::types::{Row, ScalarValue};

/// HTTP-style status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    BadRequest,
    InternalError,
}

impl StatusCode {
    pub fn code(&self) -> u16 {
        match self {
            StatusCode::BadRequest => 400,
            StatusCode::InternalError => 500,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            StatusCode::BadRequest => "Bad Request",
            StatusCode::InternalError => "Internal Error",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.message())
    }
}

/// Key holding the x label in a serialized point.
pub const POINT_LABEL_KEY: &str = "name";

/// One render-ready x position: its label plus one value per series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartPoint {
    pub name: String,
    pub values: IndexMap<String, f64>,
}

impl ChartPoint {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: IndexMap::new(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: f64) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Adds `value` to the series, starting from zero.
    pub fn accumulate(&mut self, key: &str, value: f64) {
        *self.values.entry(key.to_string()).or_insert(0.0) += value;
    }

    pub fn value(&self, key: &str) -> f64 {
        self.values.get(key).copied().unwrap_or(0.0)
    }
}

// Flattens to `{"name": ..., "<series>": <number>, ...}`; a series keyed
// `name` is never written over the label.
impl Serialize for ChartPoint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let series: Vec<(&String, &f64)> = self
            .values
            .iter()
            .filter(|(key, _)| *key != POINT_LABEL_KEY)
            .collect();
        let mut map = serializer.serialize_map(Some(series.len() + 1))?;
        map.serialize_entry(POINT_LABEL_KEY, &self.name)?;
        for (key, value) in series {
            map.serialize_entry(key, &ScalarValue::from_f64(*value))?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMeta {
    pub transformed: bool,
    pub original_row_count: usize,
    pub sampled_row_count: usize,
    pub x_axis_is_date: bool,
    pub data_keys: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartResponse {
    pub data: Vec<ChartPoint>,
    pub meta: ChartMeta,
}

/// Pipeline output: bare blended rows (legacy shape) or a chart payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BlendResponse {
    Rows(Vec<Row>),
    Chart(ChartResponse),
}

impl BlendResponse {
    pub fn rows(&self) -> Option<&[Row]> {
        match self {
            BlendResponse::Rows(rows) => Some(rows),
            BlendResponse::Chart(_) => None,
        }
    }

    pub fn chart(&self) -> Option<&ChartResponse> {
        match self {
            BlendResponse::Chart(chart) => Some(chart),
            BlendResponse::Rows(_) => None,
        }
    }
}
