use std::path::{Path, PathBuf};
use tracing::info;

use super::{SheetsWritten, TabularSink, columns, ensure_parent_dir, sheet_name};
use crate::models::{CategoryResult, ProductRecord};
use crate::utils::error::Result;

/// Writes CSV. Multiple tables go into a directory named after the output file
/// stem, one `<sheet>.csv` per category.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvSink;

impl CsvSink {
    pub fn sheets_dir(path: &Path) -> PathBuf {
        path.with_extension("")
    }
}

impl TabularSink for CsvSink {
    fn name(&self) -> &str {
        "csv"
    }

    fn write(&self, records: &[ProductRecord], path: &Path) -> Result<()> {
        ensure_parent_dir(path)?;

        let columns = columns(records);
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&columns)?;
        for record in records {
            writer.write_record(columns.iter().map(|c| record.get(c).unwrap_or("")))?;
        }
        writer.flush()?;

        info!("Data saved to {} ({} rows)", path.display(), records.len());
        Ok(())
    }

    fn write_sheets(&self, results: &[CategoryResult], path: &Path) -> Result<SheetsWritten> {
        let dir = Self::sheets_dir(path);
        let mut written = 0;

        for result in results.iter().filter(|r| !r.is_empty()) {
            let sheet = sheet_name(&result.name);
            info!("Writing data for category: {}", sheet);
            self.write(&result.records, &dir.join(format!("{}.csv", sheet)))?;
            written += 1;
        }

        info!("Data saved to {} with {} sheets.", dir.display(), written);
        Ok(SheetsWritten {
            tables: written,
            destination: dir,
        })
    }
}
