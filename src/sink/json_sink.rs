use indexmap::IndexMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use super::{SheetsWritten, TabularSink, ensure_parent_dir, sheet_name};
use crate::models::{CategoryResult, ProductRecord};
use crate::utils::error::Result;

/// Writes pretty-printed JSON: an array of objects, or an object of arrays keyed
/// by sheet name.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSink;

impl JsonSink {
    fn write_json<T: serde::Serialize>(value: &T, path: &Path) -> Result<()> {
        ensure_parent_dir(path)?;
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush()?;
        Ok(())
    }
}

impl TabularSink for JsonSink {
    fn name(&self) -> &str {
        "json"
    }

    fn write(&self, records: &[ProductRecord], path: &Path) -> Result<()> {
        Self::write_json(&records, path)?;
        info!("Data saved to {} ({} records)", path.display(), records.len());
        Ok(())
    }

    fn write_sheets(&self, results: &[CategoryResult], path: &Path) -> Result<SheetsWritten> {
        let sheets: IndexMap<String, &[ProductRecord]> = results
            .iter()
            .filter(|r| !r.is_empty())
            .map(|r| (sheet_name(&r.name), r.records.as_slice()))
            .collect();

        Self::write_json(&sheets, path)?;
        info!("Data saved to {} with {} sheets.", path.display(), sheets.len());
        Ok(SheetsWritten {
            tables: sheets.len(),
            destination: path.to_path_buf(),
        })
    }
}
