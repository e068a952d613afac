//! Prelude for commonly used types and functions in profile-lens.

pub use crate::aggregate::{
    null_percentage, summarize, total_nulls, type_distribution, DatasetSummary, TypeCount,
};
pub use crate::columns::{project_columns, Cell, ColumnRow, DisplayRow};
pub use crate::error::{ErrorContext, ProfileError, Result};
pub use crate::export::{
    to_csv_export, to_json_export, CsvExporter, ExportConfig, JsonExporter, MarkdownExporter,
    RowExporter,
};
pub use crate::histogram::{project_histogram, HistogramBin, HistogramSeries};
pub use crate::profile::{BasicStats, Histogram, Profile, Shape};
pub use crate::session::ProfileSession;
pub use crate::view::ProfileView;
