//! The canonical profile document produced by the profiling backend.
//!
//! A [`Profile`] is created once per upload response and never mutated. Every
//! derived view reads it through the accessors below, which treat a missing
//! mapping entry as "absent" rather than an error.
//!
//! The wire format is the JSON object the backend returns:
//!
//! ```json
//! {
//!   "shape": [4, 2],
//!   "columns": ["a", "b"],
//!   "data_types": {"a": "int64", "b": "object"},
//!   "null_values": {"a": 1, "b": 0},
//!   "null_rate": {"a": 0.25, "b": 0.0},
//!   "basic_stats": {"a": {"count": 3.0, "mean": 2.0, "std": 1.0}},
//!   "skewness": {"a": 0.0},
//!   "kurtosis": {"a": -1.5},
//!   "histogram": {"a": {"bins": [1.0, 2.0, 3.0], "counts": [1, 2]}}
//! }
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

use crate::error::{ProfileError, Result};

/// Dataset dimensions as reported by the backend.
///
/// Serialized as a two-element array `[rows, columns]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(u64, u64)", into = "(u64, u64)")]
pub struct Shape {
    pub rows: u64,
    pub columns: u64,
}

impl Shape {
    pub fn new(rows: u64, columns: u64) -> Self {
        Self { rows, columns }
    }
}

impl From<(u64, u64)> for Shape {
    fn from((rows, columns): (u64, u64)) -> Self {
        Self { rows, columns }
    }
}

impl From<Shape> for (u64, u64) {
    fn from(shape: Shape) -> Self {
        (shape.rows, shape.columns)
    }
}

/// Descriptive statistics for one column, in the shape of a pandas `describe()`.
///
/// Numeric columns carry `mean`/`std` and the quantiles, categorical columns
/// carry `unique`/`top`/`freq`. Any field may be absent. Datetime columns
/// report `mean`, `min`, the quantiles and `max` as timestamp strings; those
/// are dropped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicStats {
    #[serde(default, deserialize_with = "lenient_count")]
    pub count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub unique: Option<u64>,
    #[serde(default, deserialize_with = "lenient_scalar")]
    pub top: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub freq: Option<u64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub mean: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub std: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub min: Option<f64>,
    #[serde(default, rename = "25%", deserialize_with = "lenient_number")]
    pub q1: Option<f64>,
    #[serde(default, rename = "50%", deserialize_with = "lenient_number")]
    pub median: Option<f64>,
    #[serde(default, rename = "75%", deserialize_with = "lenient_number")]
    pub q3: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub max: Option<f64>,
}

/// Pre-computed histogram for a numeric column.
///
/// `bins` holds the `N + 1` edges and `counts` the `N` bucket counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub bins: Vec<f64>,
    pub counts: Vec<u64>,
}

impl Histogram {
    pub fn new(bins: Vec<f64>, counts: Vec<u64>) -> Self {
        Self { bins, counts }
    }

    /// Returns true when `counts` has exactly one entry fewer than `bins`.
    pub fn is_well_formed(&self) -> bool {
        !self.bins.is_empty() && self.counts.len() + 1 == self.bins.len()
    }
}

/// One profiling result for one uploaded dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub shape: Shape,
    #[serde(default)]
    pub columns: Vec<String>,
    #[serde(default)]
    pub data_types: HashMap<String, String>,
    #[serde(default, deserialize_with = "lenient_count_map")]
    pub null_values: HashMap<String, u64>,
    #[serde(default)]
    pub null_rate: HashMap<String, f64>,
    #[serde(default)]
    pub basic_stats: HashMap<String, Option<BasicStats>>,
    #[serde(default)]
    pub skewness: HashMap<String, Option<f64>>,
    #[serde(default)]
    pub kurtosis: HashMap<String, Option<f64>>,
    #[serde(default)]
    pub histogram: HashMap<String, Option<Histogram>>,
}

/// What the backend may send back for an upload.
#[derive(Deserialize)]
#[serde(untagged)]
enum BackendResponse {
    Failure { error: String },
    Success(Box<Profile>),
}

impl Profile {
    /// Decodes a backend response body.
    ///
    /// A body of the form `{"error": "..."}` is reported as
    /// [`ProfileError::Backend`] rather than decoded into an empty profile.
    pub fn from_json(body: &str) -> Result<Self> {
        Self::from_slice(body.as_bytes())
    }

    /// Same as [`Profile::from_json`] for raw bytes.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        match serde_json::from_slice::<BackendResponse>(body) {
            Ok(BackendResponse::Failure { error }) => Err(ProfileError::backend(error)),
            Ok(BackendResponse::Success(profile)) => Ok(*profile),
            // Re-decode directly so the caller sees the real field-level error.
            Err(_) => Ok(serde_json::from_slice::<Profile>(body)?),
        }
    }

    /// Encodes the profile back into its wire form.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn row_count(&self) -> u64 {
        self.shape.rows
    }

    pub fn column_count(&self) -> u64 {
        self.shape.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn data_type(&self, column: &str) -> Option<&str> {
        self.data_types.get(column).map(String::as_str)
    }

    /// Null count for `column`, 0 when the backend did not report one.
    pub fn null_count(&self, column: &str) -> u64 {
        self.null_values.get(column).copied().unwrap_or(0)
    }

    pub fn null_rate(&self, column: &str) -> Option<f64> {
        self.null_rate.get(column).copied()
    }

    pub fn basic_stats(&self, column: &str) -> Option<&BasicStats> {
        self.basic_stats.get(column).and_then(Option::as_ref)
    }

    pub fn skewness(&self, column: &str) -> Option<f64> {
        self.skewness.get(column).copied().flatten()
    }

    pub fn kurtosis(&self, column: &str) -> Option<f64> {
        self.kurtosis.get(column).copied().flatten()
    }

    pub fn histogram(&self, column: &str) -> Option<&Histogram> {
        self.histogram.get(column).and_then(Option::as_ref)
    }

    /// Columns that have a histogram, in `columns` order.
    pub fn histogram_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| self.histogram(c).is_some())
            .map(String::as_str)
            .collect()
    }
}

/// Accepts `4`, `4.0` or `null`; anything non-integral becomes absent.
fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_number(deserializer)?.and_then(integral))
}

/// Any JSON number; strings, booleans and `null` become absent.
fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()))
}

fn lenient_count_map<'de, D>(
    deserializer: D,
) -> std::result::Result<HashMap<String, u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = HashMap::<String, Option<f64>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(column, value)| value.and_then(integral).map(|n| (column, n)))
        .collect())
}

/// `top` is the most frequent value, which can be any JSON scalar.
fn lenient_scalar<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

fn integral(value: f64) -> Option<u64> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
        Some(value as u64)
    } else {
        None
    }
}
