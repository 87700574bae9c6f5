pub mod csv_sink;
pub mod json_sink;

pub use csv_sink::CsvSink;
pub use json_sink::JsonSink;

use indexmap::IndexSet;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::config::OutputFormat;
use crate::models::{CategoryResult, ProductRecord};
use crate::utils::error::Result;

/// Longest table name spreadsheet tools accept.
pub const MAX_SHEET_NAME_LEN: usize = 31;

/// Where a multi-table write landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetsWritten {
    pub tables: usize,
    /// File or directory actually written, which may differ from the requested path
    pub destination: PathBuf,
}

/// Destination for crawled records. Write failures are always returned to the caller.
pub trait TabularSink {
    fn name(&self) -> &str;

    /// Write one flat table whose columns are the union of all record keys.
    fn write(&self, records: &[ProductRecord], path: &Path) -> Result<()>;

    /// Write one table per non-empty category.
    fn write_sheets(&self, results: &[CategoryResult], path: &Path) -> Result<SheetsWritten>;
}

pub fn sink_for(format: OutputFormat) -> Box<dyn TabularSink> {
    match format {
        OutputFormat::Csv => Box::new(CsvSink),
        OutputFormat::Json => Box::new(JsonSink),
    }
}

/// Column names in order of first appearance across `records`.
pub fn columns(records: &[ProductRecord]) -> Vec<String> {
    let mut columns = IndexSet::new();
    for record in records {
        for key in record.keys() {
            columns.insert(key.to_string());
        }
    }
    columns.into_iter().collect()
}

/// Category name truncated to [`MAX_SHEET_NAME_LEN`] characters, with characters
/// that are illegal in sheet or file names replaced by `_`. Distinct categories
/// may collapse to the same name; the later table then replaces the earlier one.
pub fn sheet_name(category: &str) -> String {
    category
        .chars()
        .take(MAX_SHEET_NAME_LEN)
        .map(|c| match c {
            '/' | '\\' | '?' | '*' | '[' | ']' | ':' => '_',
            c => c,
        })
        .collect()
}

pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            info!("Created directory: {}", parent.display());
        }
    }
    Ok(())
}
