// src/persist/text.rs

use anyhow::{Context, Result};
use csv::Writer;
use std::path::Path;

use crate::table::MergedTable;

/// Header row, then one line per merged row; unset cells are left blank.
pub fn write_csv(table: &MergedTable, dest: &Path) -> Result<()> {
    let mut wtr =
        Writer::from_path(dest).with_context(|| format!("creating {}", dest.display()))?;

    wtr.write_record(table.header()).context("writing CSV header")?;

    for row in &table.rows {
        let year = row.year.to_string();
        let record = [row.country.as_str(), year.as_str()]
            .into_iter()
            .chain(row.values.iter().map(|v| v.as_deref().unwrap_or("")));
        wtr.write_record(record)
            .with_context(|| format!("writing row {} {}", row.country, row.year))?;
    }

    wtr.flush().with_context(|| format!("flushing {}", dest.display()))?;
    Ok(())
}
