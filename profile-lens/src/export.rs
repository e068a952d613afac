//! Export serializers for projected column rows.
//!
//! Three exporters share the [`RowExporter`] trait:
//!
//! - [`JsonExporter`]: the raw rows, full numeric precision (`profile.json`)
//! - [`CsvExporter`]: the fixed 9-column table with display precision
//!   (`column_profile.csv`)
//! - [`MarkdownExporter`]: the details table as rendered on screen
//!
//! All exporters are deterministic: the same rows always produce the same
//! bytes.
//!
//! # Examples
//!
//! ```rust
//! use profile_lens::columns::project_columns;
//! use profile_lens::export::{to_csv_export, to_json_export};
//! use profile_lens::profile::Profile;
//!
//! let profile = Profile::from_json(r#"{"shape": [0, 0], "columns": []}"#).unwrap();
//! let rows = project_columns(&profile);
//!
//! assert_eq!(to_json_export(&rows).unwrap(), b"[]");
//! assert_eq!(
//!     to_csv_export(&rows).unwrap(),
//!     b"Column,Type,Null %,Null Rate,Skewness,Kurtosis,Count,Mean,Std"
//! );
//! ```

use std::fmt::Write;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::columns::ColumnRow;
use crate::error::{ErrorContext, ProfileError, Result};

/// File name used for the JSON export.
pub const JSON_FILE_NAME: &str = "profile.json";

/// File name used for the CSV export.
pub const CSV_FILE_NAME: &str = "column_profile.csv";

/// Header line of the CSV export, in field order.
pub const CSV_HEADER: [&str; 9] = [
    "Column",
    "Type",
    "Null %",
    "Null Rate",
    "Skewness",
    "Kurtosis",
    "Count",
    "Mean",
    "Std",
];

/// How CSV fields containing delimiters, quotes or newlines are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CsvQuoting {
    /// Quote a field only when it would otherwise break the row.
    #[default]
    Necessary,
    /// Never quote; a comma inside a column name shifts the row.
    Never,
}

impl From<CsvQuoting> for QuoteStyle {
    fn from(quoting: CsvQuoting) -> Self {
        match quoting {
            CsvQuoting::Necessary => QuoteStyle::Necessary,
            CsvQuoting::Never => QuoteStyle::Never,
        }
    }
}

/// Configuration options for exporters.
#[derive(Debug, Clone, Default)]
pub struct ExportConfig {
    /// Pretty-print the JSON export
    pub pretty_json: bool,
    /// Quoting policy for the CSV export
    pub csv_quoting: CsvQuoting,
}

impl ExportConfig {
    /// Compact JSON and unquoted CSV, byte-compatible with the web frontend.
    pub fn verbatim() -> Self {
        Self {
            pretty_json: false,
            csv_quoting: CsvQuoting::Never,
        }
    }

    /// Indented JSON for reading by hand.
    pub fn readable() -> Self {
        Self {
            pretty_json: true,
            csv_quoting: CsvQuoting::Necessary,
        }
    }

    pub fn with_pretty_json(mut self, pretty: bool) -> Self {
        self.pretty_json = pretty;
        self
    }

    pub fn with_csv_quoting(mut self, quoting: CsvQuoting) -> Self {
        self.csv_quoting = quoting;
        self
    }
}

/// Serialized export ready to be saved or downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub file_name: &'static str,
    pub media_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Writes the artifact into `dir` under its conventional file name.
    pub fn write_into(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.file_name);
        std::fs::write(&path, &self.bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), bytes = self.bytes.len(), "Wrote export");
        Ok(path)
    }
}

/// Trait for turning projected rows into an export document.
pub trait RowExporter {
    /// Conventional file name of the export.
    fn file_name(&self) -> &'static str;

    /// MIME type of the export.
    fn media_type(&self) -> &'static str;

    /// Serializes the rows.
    fn export(&self, rows: &[ColumnRow]) -> Result<Vec<u8>>;

    /// Serializes the rows and attaches the file metadata.
    fn artifact(&self, rows: &[ColumnRow]) -> Result<ExportArtifact> {
        Ok(ExportArtifact {
            file_name: self.file_name(),
            media_type: self.media_type(),
            bytes: self.export(rows)?,
        })
    }
}

/// Exports rows as a JSON array with raw values.
#[derive(Debug, Clone, Default)]
pub struct JsonExporter {
    pretty: bool,
}

impl JsonExporter {
    /// Creates a compact JSON exporter.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &ExportConfig) -> Self {
        Self {
            pretty: config.pretty_json,
        }
    }

    /// Sets whether to use pretty-printed JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl RowExporter for JsonExporter {
    fn file_name(&self) -> &'static str {
        JSON_FILE_NAME
    }

    fn media_type(&self) -> &'static str {
        "application/json"
    }

    fn export(&self, rows: &[ColumnRow]) -> Result<Vec<u8>> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(rows)
        } else {
            serde_json::to_vec(rows)
        };
        bytes.map_err(|e| ProfileError::Serialization(format!("Failed to export rows: {e}")))
    }
}

/// Exports rows as the 9-column CSV table.
///
/// Lines are joined by `\n` with no terminator after the last line; absent
/// values are empty fields.
#[derive(Debug, Clone, Default)]
pub struct CsvExporter {
    quoting: CsvQuoting,
}

impl CsvExporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: &ExportConfig) -> Self {
        Self {
            quoting: config.csv_quoting,
        }
    }

    pub fn with_quoting(mut self, quoting: CsvQuoting) -> Self {
        self.quoting = quoting;
        self
    }
}

impl RowExporter for CsvExporter {
    fn file_name(&self) -> &'static str {
        CSV_FILE_NAME
    }

    fn media_type(&self) -> &'static str {
        "text/csv"
    }

    fn export(&self, rows: &[ColumnRow]) -> Result<Vec<u8>> {
        let mut writer = WriterBuilder::new()
            .quote_style(self.quoting.into())
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(CSV_HEADER)?;
        for row in rows {
            let cells = row.display();
            writer.write_record([
                cells.column.as_str(),
                cells.data_type.as_field(),
                cells.null_percentage.as_field(),
                cells.null_rate.as_field(),
                cells.skewness.as_field(),
                cells.kurtosis.as_field(),
                cells.count.as_field(),
                cells.mean.as_field(),
                cells.std.as_field(),
            ])?;
        }

        let mut bytes = writer
            .into_inner()
            .map_err(|e| ProfileError::Io(e.into_error()))?;
        if bytes.last() == Some(&b'\n') {
            bytes.pop();
        }
        Ok(bytes)
    }
}

/// Renders rows as a Markdown table using display precision and sentinels.
#[derive(Debug, Clone)]
pub struct MarkdownExporter {
    heading_level: u8,
    title: Option<String>,
}

impl MarkdownExporter {
    pub fn new() -> Self {
        Self {
            heading_level: 2,
            title: None,
        }
    }

    /// Adds a heading above the table.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Sets the heading level for the title.
    pub fn with_heading_level(mut self, level: u8) -> Self {
        self.heading_level = level.clamp(1, 6);
        self
    }

    /// Renders the table as a string.
    pub fn render(&self, rows: &[ColumnRow]) -> String {
        let mut output = String::new();

        if let Some(title) = &self.title {
            let h = "#".repeat(self.heading_level as usize);
            let _ = writeln!(output, "{h} {title}");
            let _ = writeln!(output);
        }

        let _ = writeln!(
            output,
            "| Column | Type | Nulls | Null % | Null Rate | Skewness | Kurtosis | Count | Unique | Top | Freq | Mean | Std |"
        );
        let _ = writeln!(output, "|{}", "---|".repeat(13));

        for row in rows {
            let d = row.display();
            let _ = writeln!(
                output,
                "| {} | {} | {} | {} | {} | {} | {} | {} | {} | {} | {} | {} | {} |",
                escape_pipes(&d.column),
                d.data_type,
                d.null_count,
                d.null_percentage,
                d.null_rate,
                d.skewness,
                d.kurtosis,
                d.count,
                d.unique,
                escape_pipes(&d.top.to_string()),
                d.freq,
                d.mean,
                d.std,
            );
        }

        output
    }
}

impl Default for MarkdownExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RowExporter for MarkdownExporter {
    fn file_name(&self) -> &'static str {
        "column_profile.md"
    }

    fn media_type(&self) -> &'static str {
        "text/markdown"
    }

    fn export(&self, rows: &[ColumnRow]) -> Result<Vec<u8>> {
        Ok(self.render(rows).into_bytes())
    }
}

fn escape_pipes(value: &str) -> String {
    value.replace('|', "\\|")
}

/// JSON export with the default (compact) settings.
pub fn to_json_export(rows: &[ColumnRow]) -> Result<Vec<u8>> {
    JsonExporter::new().export(rows)
}

/// CSV export with the default quoting policy.
pub fn to_csv_export(rows: &[ColumnRow]) -> Result<Vec<u8>> {
    CsvExporter::new().export(rows)
}
