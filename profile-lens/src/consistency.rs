//! Consistency checks for a received profile.
//!
//! The projections never reject a profile; they read around gaps. This module
//! reports where a profile departs from the data model so the session can log
//! it. It inspects the profile document only, never the uploaded file.

use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::profile::Profile;

/// Absolute tolerance when comparing a reported null rate with its counts.
pub const NULL_RATE_TOLERANCE: f64 = 1e-9;

/// A single departure from the profile data model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProfileIssue {
    /// A column name appears more than once in `columns`.
    DuplicateColumn { column: String },
    /// A mapping has an entry for a name not listed in `columns`.
    UnknownColumn { mapping: &'static str, column: String },
    /// More nulls than rows.
    NullCountExceedsRows { column: String, nulls: u64, rows: u64 },
    /// `null_rate` disagrees with `null_values / rows`.
    NullRateMismatch {
        column: String,
        reported: f64,
        expected: f64,
    },
    /// `counts` is not exactly one shorter than `bins`.
    MalformedHistogram {
        column: String,
        bins: usize,
        counts: usize,
    },
}

impl fmt::Display for ProfileIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateColumn { column } => write!(f, "column '{column}' is listed twice"),
            Self::UnknownColumn { mapping, column } => {
                write!(f, "{mapping} has an entry for unlisted column '{column}'")
            }
            Self::NullCountExceedsRows {
                column,
                nulls,
                rows,
            } => write!(f, "column '{column}' has {nulls} nulls but only {rows} rows"),
            Self::NullRateMismatch {
                column,
                reported,
                expected,
            } => write!(
                f,
                "column '{column}' reports null rate {reported} but counts give {expected}"
            ),
            Self::MalformedHistogram {
                column,
                bins,
                counts,
            } => write!(
                f,
                "histogram of '{column}' has {bins} edges for {counts} counts"
            ),
        }
    }
}

/// Lists every consistency issue in `profile`, in a stable order.
pub fn check_profile(profile: &Profile) -> Vec<ProfileIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for column in &profile.columns {
        if !seen.insert(column.as_str()) {
            issues.push(ProfileIssue::DuplicateColumn {
                column: column.clone(),
            });
        }
    }

    let mut unknown = |mapping: &'static str, keys: Vec<&String>| {
        let mut keys: Vec<&String> = keys
            .into_iter()
            .filter(|k| !seen.contains(k.as_str()))
            .collect();
        keys.sort();
        issues.extend(keys.into_iter().map(|column| ProfileIssue::UnknownColumn {
            mapping,
            column: column.clone(),
        }));
    };
    unknown("data_types", profile.data_types.keys().collect());
    unknown("null_values", profile.null_values.keys().collect());
    unknown("null_rate", profile.null_rate.keys().collect());
    unknown("basic_stats", profile.basic_stats.keys().collect());
    unknown("skewness", profile.skewness.keys().collect());
    unknown("kurtosis", profile.kurtosis.keys().collect());
    unknown("histogram", profile.histogram.keys().collect());

    let rows = profile.row_count();
    for column in &profile.columns {
        let nulls = profile.null_count(column);
        if nulls > rows {
            issues.push(ProfileIssue::NullCountExceedsRows {
                column: column.clone(),
                nulls,
                rows,
            });
        }

        if let Some(reported) = profile.null_rate(column) {
            let expected = if rows > 0 {
                nulls as f64 / rows as f64
            } else {
                0.0
            };
            if (reported - expected).abs() > NULL_RATE_TOLERANCE {
                issues.push(ProfileIssue::NullRateMismatch {
                    column: column.clone(),
                    reported,
                    expected,
                });
            }
        }

        if let Some(histogram) = profile.histogram(column) {
            if !histogram.is_well_formed() {
                issues.push(ProfileIssue::MalformedHistogram {
                    column: column.clone(),
                    bins: histogram.bins.len(),
                    counts: histogram.counts.len(),
                });
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Histogram;
    use crate::test_fixtures::{mixed_profile, two_column_profile};

    #[test]
    fn test_fixtures_are_consistent() {
        assert!(check_profile(&mixed_profile()).is_empty());
        assert!(check_profile(&two_column_profile()).is_empty());
        assert!(check_profile(&Profile::default()).is_empty());
    }

    #[test]
    fn test_duplicate_and_unknown_columns() {
        let mut profile = two_column_profile();
        profile.columns.push("a".to_string());
        profile
            .data_types
            .insert("zzz".to_string(), "int64".to_string());

        let issues = check_profile(&profile);
        assert_eq!(
            issues,
            vec![
                ProfileIssue::DuplicateColumn {
                    column: "a".to_string()
                },
                ProfileIssue::UnknownColumn {
                    mapping: "data_types",
                    column: "zzz".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_null_rate_mismatch() {
        let mut profile = two_column_profile();
        profile.null_rate.insert("a".to_string(), 0.5);
        let issues = check_profile(&profile);
        assert_eq!(issues.len(), 1);
        assert!(matches!(
            issues[0],
            ProfileIssue::NullRateMismatch { expected, .. } if expected == 0.25
        ));
    }

    #[test]
    fn test_null_count_exceeds_rows() {
        let mut profile = two_column_profile();
        profile.null_values.insert("b".to_string(), 9);
        profile.null_rate.remove("b");
        let issues = check_profile(&profile);
        assert_eq!(
            issues,
            vec![ProfileIssue::NullCountExceedsRows {
                column: "b".to_string(),
                nulls: 9,
                rows: 4
            }]
        );
    }

    #[test]
    fn test_malformed_histogram() {
        let mut profile = two_column_profile();
        profile.histogram.insert(
            "a".to_string(),
            Some(Histogram::new(vec![0.0, 1.0], vec![1, 2])),
        );
        let issues = check_profile(&profile);
        assert_eq!(issues.len(), 1);
        assert_eq!(
            issues[0].to_string(),
            "histogram of 'a' has 2 edges for 2 counts"
        );
    }
}
