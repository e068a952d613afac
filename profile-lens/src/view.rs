//! Everything the dashboard draws, derived in one call.

use serde::Serialize;
use tracing::instrument;

use crate::aggregate::{summarize, type_distribution, DatasetSummary, TypeCount};
use crate::columns::{project_columns, ColumnRow};
use crate::histogram::{project_histogram, HistogramBin, HistogramSeries};
use crate::profile::Profile;

/// Histogram series for one column of the view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnHistogram {
    pub column: String,
    pub bins: Vec<HistogramBin>,
}

/// Summary tiles, type chart, details table and histograms for one snapshot.
///
/// Built from `None` (no profile yet, upload in flight, upload failed) every
/// part is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProfileView {
    pub summary: DatasetSummary,
    pub type_distribution: Vec<TypeCount>,
    pub rows: Vec<ColumnRow>,
    pub histograms: Vec<ColumnHistogram>,
}

impl ProfileView {
    #[instrument(skip(profile), fields(present = profile.is_some()))]
    pub fn build(profile: Option<&Profile>) -> Self {
        let Some(profile) = profile else {
            return Self::default();
        };

        let histograms = profile
            .histogram_columns()
            .into_iter()
            .filter_map(|column| {
                project_histogram(profile, column)
                    .into_bins()
                    .map(|bins| ColumnHistogram {
                        column: column.to_string(),
                        bins,
                    })
            })
            .collect();

        Self {
            summary: summarize(profile),
            type_distribution: type_distribution(profile),
            rows: project_columns(profile),
            histograms,
        }
    }

    /// Columns that can be picked in the histogram selector.
    pub fn histogram_columns(&self) -> impl Iterator<Item = &str> {
        self.histograms.iter().map(|h| h.column.as_str())
    }

    /// The series for a selected column.
    pub fn histogram(&self, column: &str) -> HistogramSeries {
        self.histograms
            .iter()
            .find(|h| h.column == column)
            .map(|h| HistogramSeries::Available(h.bins.clone()))
            .unwrap_or_else(|| HistogramSeries::Unavailable {
                column: column.to_string(),
            })
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::mixed_profile;

    #[test]
    fn test_absent_profile_gives_empty_view() {
        let view = ProfileView::build(None);
        assert!(view.is_empty());
        assert_eq!(view.summary, DatasetSummary::default());
        assert!(view.histogram("age").bins().is_empty());
    }

    #[test]
    fn test_view_matches_individual_projections() {
        let profile = mixed_profile();
        let view = ProfileView::build(Some(&profile));
        assert_eq!(view.rows, project_columns(&profile));
        assert_eq!(view.type_distribution, type_distribution(&profile));
        assert_eq!(view.histogram("score"), project_histogram(&profile, "score"));
        assert_eq!(view.histogram("city"), project_histogram(&profile, "city"));
    }

    #[test]
    fn test_histogram_selector() {
        let view = ProfileView::build(Some(&mixed_profile()));
        let columns: Vec<&str> = view.histogram_columns().collect();
        assert_eq!(columns, vec!["age", "score"]);
    }

    #[test]
    fn test_build_is_idempotent() {
        let profile = mixed_profile();
        assert_eq!(
            ProfileView::build(Some(&profile)),
            ProfileView::build(Some(&profile))
        );
    }
}
