// src/fetch/collect.rs

use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

use super::envelope::RawRecord;
use super::page::PageFetcher;
use crate::config::IndicatorSpec;

pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone)]
pub struct CollectOptions {
    /// Pause between consecutive page requests of one indicator.
    pub page_delay: Duration,
}

impl Default for CollectOptions {
    fn default() -> Self {
        Self {
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }
}

/// Walk every page of one indicator and return all records seen.
///
/// Stops on the first empty page, once the reported page count is reached,
/// or at the first failed fetch. A failure keeps whatever was already
/// collected, so the result may be partial or empty but is never an error.
#[instrument(level = "info", skip(fetcher, spec, opts), fields(code = %spec.code))]
pub async fn collect_indicator<F: PageFetcher>(
    fetcher: &F,
    spec: &IndicatorSpec,
    opts: &CollectOptions,
) -> Vec<RawRecord> {
    let mut records = Vec::new();
    let mut page: u32 = 1;

    loop {
        let envelope = match fetcher.fetch(&spec.code, page).await {
            Ok(envelope) => envelope,
            Err(e) => {
                warn!(page, kept = records.len(), error = %e, "fetch failed; stopping indicator");
                break;
            }
        };

        if envelope.is_empty() {
            debug!(page, "no records; end of data");
            break;
        }

        debug!(
            page,
            entries = envelope.entries,
            records = envelope.records.len(),
            "page fetched"
        );
        records.extend(envelope.records);

        let Some(info) = envelope.page_info else {
            warn!(page, "page count missing; stopping indicator");
            break;
        };
        if page >= info.total_pages {
            break;
        }

        page += 1;
        sleep(opts.page_delay).await;
    }

    records
}
