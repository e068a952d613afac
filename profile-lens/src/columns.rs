//! Per-column rows for the details table and the exports.
//!
//! A [`ColumnRow`] carries the raw values pulled from the profile at full
//! precision. [`ColumnRow::display`] turns it into a [`DisplayRow`] of
//! [`Cell`]s with the fixed presentation precision:
//!
//! | field                              | precision   |
//! |------------------------------------|-------------|
//! | null percentage                    | 1 decimal   |
//! | null rate                          | 3 decimals  |
//! | mean, std, skewness, kurtosis      | 3 decimals  |
//! | count, unique, freq, null count    | integer     |
//!
//! The JSON export serializes the raw row; the CSV export and the Markdown
//! table use the display row.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::instrument;

use crate::profile::Profile;

/// Flattened, raw statistics for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnRow {
    pub column: String,
    pub data_type: Option<String>,
    pub null_count: u64,
    /// `100 * null_count / rows`, `0.0` when the dataset has no rows.
    pub null_percentage: f64,
    pub null_rate: Option<f64>,
    pub skewness: Option<f64>,
    pub kurtosis: Option<f64>,
    pub count: Option<u64>,
    pub unique: Option<u64>,
    pub top: Option<String>,
    pub freq: Option<u64>,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    #[serde(rename = "25%")]
    pub q1: Option<f64>,
    pub median: Option<f64>,
    #[serde(rename = "75%")]
    pub q3: Option<f64>,
    pub max: Option<f64>,
}

/// A rendered table cell.
///
/// Absence is explicit so consumers never have to branch on `Option`s:
/// statistics the backend left out are [`Cell::NotAvailable`], shape
/// statistics that do not apply to the column are [`Cell::NotApplicable`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Value(String),
    NotAvailable,
    NotApplicable,
}

/// Digits printed past the requested precision to detect an exact tie.
const TIE_CHECK_DIGITS: usize = 25;

/// Formats `value` with `decimals` fraction digits, rounding exact ties away
/// from zero.
///
/// `format!` rounds exact ties to even (`12.25` prints as `12.2`); this prints
/// `12.3`. Values that are not exact ties format as `format!("{:.N}")` does.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let rounded = format!("{value:.decimals$}");
    if !value.is_finite() {
        return rounded;
    }

    let exact = format!("{:.*}", decimals + TIE_CHECK_DIGITS, value.abs());
    let (head, tail) = exact.split_at(exact.len() - TIE_CHECK_DIGITS);
    let is_tie = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');
    if !is_tie {
        return rounded;
    }

    let magnitude = increment_last_digit(head.trim_end_matches('.'));
    if value.is_sign_negative() {
        format!("-{magnitude}")
    } else {
        magnitude
    }
}

/// Adds one unit in the last place of a plain decimal string.
fn increment_last_digit(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();
    let mut i = bytes.len();
    loop {
        if i == 0 {
            bytes.insert(0, b'1');
            break;
        }
        i -= 1;
        match bytes[i] {
            b'.' => continue,
            b'9' => bytes[i] = b'0',
            _ => {
                bytes[i] += 1;
                break;
            }
        }
    }
    bytes.into_iter().map(char::from).collect()
}

impl Cell {
    fn fixed(value: Option<f64>, decimals: usize, missing: Cell) -> Self {
        match value {
            Some(v) => Cell::Value(format_fixed(v, decimals)),
            None => missing,
        }
    }

    fn integer(value: Option<u64>) -> Self {
        value.map_or(Cell::NotAvailable, |v| Cell::Value(v.to_string()))
    }

    fn text(value: Option<&str>) -> Self {
        value.map_or(Cell::NotAvailable, |v| Cell::Value(v.to_string()))
    }

    pub fn is_value(&self) -> bool {
        matches!(self, Cell::Value(_))
    }

    /// The cell as a CSV field: sentinels become the empty string.
    pub fn as_field(&self) -> &str {
        match self {
            Cell::Value(v) => v,
            Cell::NotAvailable | Cell::NotApplicable => "",
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Value(v) => f.write_str(v),
            Cell::NotAvailable => f.write_str("-"),
            Cell::NotApplicable => f.write_str("N/A"),
        }
    }
}

/// Display-formatted projection of a [`ColumnRow`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayRow {
    pub column: String,
    pub data_type: Cell,
    pub null_count: Cell,
    pub null_percentage: Cell,
    pub null_rate: Cell,
    pub skewness: Cell,
    pub kurtosis: Cell,
    pub count: Cell,
    pub unique: Cell,
    pub top: Cell,
    pub freq: Cell,
    pub mean: Cell,
    pub std: Cell,
}

impl ColumnRow {
    /// Builds the row for `column`, reading every mapping defensively.
    pub fn from_profile(profile: &Profile, column: &str) -> Self {
        let null_count = profile.null_count(column);
        let rows = profile.row_count();
        let null_percentage = if rows > 0 {
            100.0 * null_count as f64 / rows as f64
        } else {
            0.0
        };
        let stats = profile.basic_stats(column);

        Self {
            column: column.to_string(),
            data_type: profile.data_type(column).map(str::to_string),
            null_count,
            null_percentage,
            null_rate: profile.null_rate(column),
            skewness: profile.skewness(column),
            kurtosis: profile.kurtosis(column),
            count: stats.and_then(|s| s.count),
            unique: stats.and_then(|s| s.unique),
            top: stats.and_then(|s| s.top.clone()),
            freq: stats.and_then(|s| s.freq),
            mean: stats.and_then(|s| s.mean),
            std: stats.and_then(|s| s.std),
            min: stats.and_then(|s| s.min),
            q1: stats.and_then(|s| s.q1),
            median: stats.and_then(|s| s.median),
            q3: stats.and_then(|s| s.q3),
            max: stats.and_then(|s| s.max),
        }
    }

    /// Applies the presentation precision and sentinels.
    pub fn display(&self) -> DisplayRow {
        DisplayRow {
            column: self.column.clone(),
            data_type: Cell::text(self.data_type.as_deref()),
            null_count: Cell::Value(self.null_count.to_string()),
            null_percentage: Cell::fixed(Some(self.null_percentage), 1, Cell::NotAvailable),
            null_rate: Cell::fixed(self.null_rate, 3, Cell::NotAvailable),
            skewness: Cell::fixed(self.skewness, 3, Cell::NotApplicable),
            kurtosis: Cell::fixed(self.kurtosis, 3, Cell::NotApplicable),
            count: Cell::integer(self.count),
            unique: Cell::integer(self.unique),
            top: Cell::text(self.top.as_deref()),
            freq: Cell::integer(self.freq),
            mean: Cell::fixed(self.mean, 3, Cell::NotAvailable),
            std: Cell::fixed(self.std, 3, Cell::NotAvailable),
        }
    }
}

/// One row per entry of `profile.columns`, in that order.
#[instrument(skip(profile), fields(columns = profile.columns.len()))]
pub fn project_columns(profile: &Profile) -> Vec<ColumnRow> {
    profile
        .columns
        .iter()
        .map(|column| ColumnRow::from_profile(profile, column))
        .collect()
}
