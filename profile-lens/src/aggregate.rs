//! Dataset-wide aggregates: summary tiles and the type distribution.
//!
//! Every function here is a pure read over a [`Profile`] snapshot. Missing
//! mapping entries count as zero and degenerate denominators yield `0.0`,
//! so an empty profile produces an all-zero summary instead of an error.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::instrument;

use crate::columns::format_fixed;
use crate::profile::Profile;

/// Group label for columns whose type the backend did not report.
pub const UNKNOWN_TYPE: &str = "unknown";

/// Number of columns sharing one type label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeCount {
    #[serde(rename = "type")]
    pub data_type: String,
    pub count: usize,
}

/// The scalar tiles shown above the column table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub row_count: u64,
    pub column_count: u64,
    pub total_nulls: u64,
    /// Share of null cells over the whole dataset, in percent.
    pub null_percentage: f64,
}

impl DatasetSummary {
    /// Null percentage rendered with one decimal place, e.g. `"12.5%"`.
    pub fn null_percentage_display(&self) -> String {
        format!("{}%", format_fixed(self.null_percentage, 1))
    }
}

/// Sum of null counts over `columns`; columns without an entry count as 0.
pub fn total_nulls(profile: &Profile) -> u64 {
    profile
        .columns
        .iter()
        .map(|c| profile.null_count(c))
        .sum()
}

/// `100 * total_nulls / (rows * column_count)`, or `0.0` for an empty shape.
pub fn null_percentage(profile: &Profile) -> f64 {
    let cells = profile.row_count() as f64 * profile.column_count() as f64;
    if cells > 0.0 {
        100.0 * total_nulls(profile) as f64 / cells
    } else {
        0.0
    }
}

/// Groups columns by type label, in the order each label is first seen.
pub fn type_distribution(profile: &Profile) -> Vec<TypeCount> {
    let mut groups: Vec<TypeCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for column in &profile.columns {
        let label = profile.data_type(column).unwrap_or(UNKNOWN_TYPE);
        match index.get(label) {
            Some(&i) => groups[i].count += 1,
            None => {
                index.insert(label, groups.len());
                groups.push(TypeCount {
                    data_type: label.to_string(),
                    count: 1,
                });
            }
        }
    }

    groups
}

/// Computes all summary tiles in one pass over the snapshot.
#[instrument(skip(profile), fields(columns = profile.columns.len()))]
pub fn summarize(profile: &Profile) -> DatasetSummary {
    let summary = DatasetSummary {
        row_count: profile.row_count(),
        column_count: profile.column_count(),
        total_nulls: total_nulls(profile),
        null_percentage: null_percentage(profile),
    };
    tracing::debug!(
        total_nulls = summary.total_nulls,
        null_percentage = summary.null_percentage,
        "Summarized profile"
    );
    summary
}
