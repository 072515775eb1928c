// src/assemble.rs

use futures::{stream, StreamExt};
use tracing::{info, instrument, warn};

use crate::config::{Catalog, IndicatorSpec};
use crate::fetch::{collect_indicator, CollectOptions, PageFetcher};
use crate::table::{outer_join, IndicatorTable, MergedTable};

#[derive(Debug, Clone)]
pub struct AssembleOptions {
    pub collect: CollectOptions,
    /// Indicators collected at once. Tables are still merged in catalog order.
    pub concurrency: usize,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            collect: CollectOptions::default(),
            concurrency: 1,
        }
    }
}

/// Fetch and normalize one indicator. Always produces a table, possibly empty.
async fn indicator_table<F: PageFetcher>(
    fetcher: &F,
    spec: &IndicatorSpec,
    opts: &CollectOptions,
) -> IndicatorTable {
    info!(code = %spec.code, label = %spec.label, "fetching indicator");
    let records = collect_indicator(fetcher, spec, opts).await;
    let table = IndicatorTable::from_records(spec.label.clone(), &records);
    if table.is_empty() {
        warn!(code = %spec.code, "no usable observations; column will be empty");
    }
    info!(code = %spec.code, records = records.len(), rows = table.len(), "indicator done");
    table
}

/// Build the merged `(Country, Year)` table for the whole catalog.
///
/// Returns `None` only for an empty catalog. Indicators that fail to fetch
/// still contribute their (empty) column.
#[instrument(level = "info", skip_all, fields(indicators = catalog.len()))]
pub async fn assemble<F: PageFetcher>(
    fetcher: &F,
    catalog: &Catalog,
    opts: &AssembleOptions,
) -> Option<MergedTable> {
    let mut tables = stream::iter(catalog.iter())
        .map(|spec| indicator_table(fetcher, spec, &opts.collect))
        .buffered(opts.concurrency.max(1));

    let mut merged: Option<MergedTable> = None;
    while let Some(table) = tables.next().await {
        merged = Some(match merged {
            None => MergedTable::seed(table),
            Some(acc) => outer_join(acc, &table),
        });
    }

    let mut merged = merged?;
    merged.sort();
    let (rows, columns) = merged.shape();
    info!(rows, columns, "dataset assembled");
    Some(merged)
}
