// src/persist/columnar.rs

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use std::{fs::File, path::Path, sync::Arc};

use crate::table::MergedTable;

/// Infer Arrow dtype from a single cell.
fn infer_arrow_dtype_from_str(s: &str) -> DataType {
    if s.trim().parse::<f64>().is_ok() {
        DataType::Float64
    } else {
        DataType::Utf8
    }
}

/// Float64 when every set cell of the column is numeric, Utf8 otherwise.
/// A column with no set cells is Float64.
fn column_dtype(table: &MergedTable, col: usize) -> DataType {
    let numeric = table
        .rows
        .iter()
        .filter_map(|r| r.values[col].as_deref())
        .all(|s| infer_arrow_dtype_from_str(s) == DataType::Float64);
    if numeric {
        DataType::Float64
    } else {
        DataType::Utf8
    }
}

fn column_array(table: &MergedTable, col: usize, dtype: &DataType) -> ArrayRef {
    let cells = table.rows.iter().map(|r| r.values[col].as_deref());
    match dtype {
        DataType::Float64 => Arc::new(
            cells
                .map(|c| c.and_then(|s| s.trim().parse::<f64>().ok()))
                .collect::<Float64Array>(),
        ),
        _ => Arc::new(cells.collect::<StringArray>()),
    }
}

/// Build the Arrow schema and single record batch for `table`.
pub fn to_record_batch(table: &MergedTable) -> Result<RecordBatch> {
    let mut fields = vec![
        Field::new("Country", DataType::Utf8, false),
        Field::new("Year", DataType::Int32, false),
    ];
    let mut columns: Vec<ArrayRef> = vec![
        Arc::new(
            table
                .rows
                .iter()
                .map(|r| Some(r.country.as_str()))
                .collect::<StringArray>(),
        ),
        Arc::new(Int32Array::from_iter_values(
            table.rows.iter().map(|r| r.year),
        )),
    ];

    for (col, label) in table.labels.iter().enumerate() {
        let dtype = column_dtype(table, col);
        columns.push(column_array(table, col, &dtype));
        fields.push(Field::new(label, dtype, true));
    }

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
        .context("building merged record batch")
}

pub fn write_parquet(table: &MergedTable, dest: &Path) -> Result<()> {
    let batch = to_record_batch(table)?;
    let file = File::create(dest).with_context(|| format!("creating {}", dest.display()))?;
    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))
        .context("creating Arrow writer")?;
    writer.write(&batch).context("writing merged batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}
