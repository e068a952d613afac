//! Chartable histogram series for a single column.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::columns::format_fixed;
use crate::logging::truncate_field;
use crate::profile::Profile;

/// Longest column name put into a log field.
const LOGGED_NAME_LENGTH: usize = 64;

/// One bar of the histogram chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// `"{lower:.1}–{upper:.1}"`
    pub bin_label: String,
    pub count: u64,
    pub lower: f64,
    pub upper: f64,
}

/// Result of projecting a column's histogram.
///
/// `Unavailable` is a normal state (categorical column, all-null column,
/// unknown column) and renders as an empty chart.
#[derive(Debug, Clone, PartialEq)]
pub enum HistogramSeries {
    Available(Vec<HistogramBin>),
    Unavailable { column: String },
}

impl HistogramSeries {
    pub fn is_available(&self) -> bool {
        matches!(self, HistogramSeries::Available(_))
    }

    /// The bins to draw; empty when no histogram exists.
    pub fn bins(&self) -> &[HistogramBin] {
        match self {
            HistogramSeries::Available(bins) => bins,
            HistogramSeries::Unavailable { .. } => &[],
        }
    }

    pub fn into_bins(self) -> Option<Vec<HistogramBin>> {
        match self {
            HistogramSeries::Available(bins) => Some(bins),
            HistogramSeries::Unavailable { .. } => None,
        }
    }
}

/// Formats a bin range with one decimal per edge.
pub fn bin_label(lower: f64, upper: f64) -> String {
    format!("{}–{}", format_fixed(lower, 1), format_fixed(upper, 1))
}

/// Projects the histogram of `column` into labelled bins.
///
/// Pairs consecutive edges with counts; if the backend sent mismatched
/// lengths only the complete pairs are kept.
#[instrument(skip_all, fields(column = %truncate_field(column, LOGGED_NAME_LENGTH)))]
pub fn project_histogram(profile: &Profile, column: &str) -> HistogramSeries {
    let Some(histogram) = profile.histogram(column) else {
        tracing::debug!("No histogram available");
        return HistogramSeries::Unavailable {
            column: column.to_string(),
        };
    };

    if !histogram.is_well_formed() {
        tracing::warn!(
            bins = histogram.bins.len(),
            counts = histogram.counts.len(),
            "Histogram edges and counts disagree"
        );
    }

    let bins = histogram
        .bins
        .windows(2)
        .zip(&histogram.counts)
        .map(|(edges, &count)| HistogramBin {
            bin_label: bin_label(edges[0], edges[1]),
            count,
            lower: edges[0],
            upper: edges[1],
        })
        .collect();

    HistogramSeries::Available(bins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::Histogram;
    use crate::test_fixtures::{mixed_profile, two_column_profile};

    #[test]
    fn test_labels_and_counts() {
        let series = project_histogram(&two_column_profile(), "a");
        let bins = series.bins();
        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].bin_label, "0.0–1.0");
        assert_eq!(bins[0].count, 3);
        assert_eq!(bins[1].bin_label, "1.0–2.0");
        assert_eq!(bins[1].count, 5);
    }

    #[test]
    fn test_fractional_edges_round_to_one_decimal() {
        let series = project_histogram(&mixed_profile(), "score");
        let labels: Vec<&str> = series.bins().iter().map(|b| b.bin_label.as_str()).collect();
        assert_eq!(labels, vec!["3.0–5.5", "5.5–8.0"]);
    }

    #[test]
    fn test_tied_edges_round_up() {
        assert_eq!(bin_label(11.75, 12.25), "11.8–12.3");
        assert_eq!(bin_label(-0.25, 0.25), "-0.3–0.3");
    }

    #[test]
    fn test_categorical_column_unavailable() {
        let series = project_histogram(&mixed_profile(), "city");
        assert!(!series.is_available());
        assert!(series.bins().is_empty());
        assert_eq!(
            series,
            HistogramSeries::Unavailable {
                column: "city".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_column_unavailable() {
        let series = project_histogram(&mixed_profile(), "nope");
        assert_eq!(series.into_bins(), None);
    }

    #[test]
    fn test_mismatched_lengths_keep_complete_pairs() {
        let mut profile = two_column_profile();
        profile.histogram.insert(
            "a".to_string(),
            Some(Histogram::new(vec![0.0, 1.0, 2.0, 3.0], vec![4])),
        );
        let series = project_histogram(&profile, "a");
        assert_eq!(series.bins().len(), 1);
        assert_eq!(series.bins()[0].bin_label, "0.0–1.0");
    }

    #[test]
    fn test_single_edge_has_no_bins() {
        let mut profile = two_column_profile();
        profile
            .histogram
            .insert("a".to_string(), Some(Histogram::new(vec![5.0], vec![])));
        let series = project_histogram(&profile, "a");
        assert!(series.is_available());
        assert!(series.bins().is_empty());
    }
}
