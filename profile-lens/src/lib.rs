//! # profile-lens - Views and exports over dataset profiles
//!
//! profile-lens consumes a pre-computed dataset profile (column types, null
//! counts, descriptive statistics, histograms) produced by an external
//! profiling service and derives everything a summary dashboard needs from
//! it: dataset-wide tiles, a type-distribution series, a per-column details
//! table, per-column histogram series, and JSON / CSV exports.
//!
//! The crate never computes statistics itself. Every derivation is a pure
//! function over an immutable [`Profile`](profile::Profile) snapshot, so the
//! projections can run in any order against the same snapshot and always
//! agree.
//!
//! ## Quick Start
//!
//! ```rust
//! use profile_lens::prelude::*;
//!
//! # fn main() -> profile_lens::error::Result<()> {
//! let profile = Profile::from_json(r#"{
//!     "shape": [4, 2],
//!     "columns": ["a", "b"],
//!     "data_types": {"a": "int64", "b": "object"},
//!     "null_values": {"a": 1, "b": 0},
//!     "histogram": {"a": {"bins": [0, 1, 2], "counts": [3, 5]}}
//! }"#)?;
//!
//! let summary = summarize(&profile);
//! assert_eq!(summary.total_nulls, 1);
//! assert_eq!(summary.null_percentage, 12.5);
//!
//! let rows = project_columns(&profile);
//! assert_eq!(rows.len(), 2);
//!
//! let series = project_histogram(&profile, "a");
//! assert_eq!(series.bins()[0].bin_label, "0.0–1.0");
//!
//! let csv = to_csv_export(&rows)?;
//! assert_eq!(String::from_utf8_lossy(&csv).lines().count(), 3);
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **`profile`**: the profile document and its lenient JSON decoding
//! - **`aggregate`**: total nulls, null percentage, type distribution
//! - **`columns`**: per-column rows with raw values and display cells
//! - **`histogram`**: labelled bin series for one column
//! - **`export`**: JSON, CSV and Markdown exporters
//! - **`view`**: all of the above bundled for one snapshot
//! - **`session`**: the current snapshot and last-response-wins uploads
//! - **`consistency`**: data-model checks on a received profile
//! - **`client`**: multipart upload to the profiling backend (`client` feature)
//! - **`logging`**: `tracing-subscriber` setup helpers

pub mod aggregate;
#[cfg(feature = "client")]
pub mod client;
pub mod columns;
pub mod consistency;
pub mod error;
pub mod export;
pub mod histogram;
pub mod logging;
pub mod prelude;
pub mod profile;
pub mod session;
pub mod view;

#[cfg(test)]
mod test_fixtures;
