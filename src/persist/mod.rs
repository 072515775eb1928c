// src/persist/mod.rs

pub mod columnar;
pub mod text;

use anyhow::Result;
use clap::ValueEnum;
use std::path::Path;
use tracing::info;

use crate::table::MergedTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Comma separated text with a header row
    Csv,
    /// Parquet file, SNAPPY compressed
    Parquet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOutcome {
    /// No table, or a table without rows; nothing was written.
    Skipped,
    Written { rows: usize },
}

/// Write `table` to `dest`, replacing any existing file. The destination
/// directory is not created.
pub fn persist(
    table: Option<&MergedTable>,
    dest: &Path,
    format: OutputFormat,
) -> Result<PersistOutcome> {
    let table = match table {
        Some(t) if !t.is_empty() => t,
        _ => {
            info!("nothing to persist");
            return Ok(PersistOutcome::Skipped);
        }
    };

    info!(path = %dest.display(), ?format, "saving dataset");
    match format {
        OutputFormat::Csv => text::write_csv(table, dest)?,
        OutputFormat::Parquet => columnar::write_parquet(table, dest)?,
    }
    info!(rows = table.rows.len(), "saved");
    Ok(PersistOutcome::Written {
        rows: table.rows.len(),
    })
}
