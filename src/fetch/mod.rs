// src/fetch/mod.rs

pub mod collect;
pub mod envelope;
pub mod page;

#[cfg(test)]
pub(crate) mod testing;

pub use collect::{collect_indicator, CollectOptions};
pub use envelope::{decode_envelope, CountryRef, PageEnvelope, PageInfo, RawRecord};
pub use page::{FetchSettings, HttpPageFetcher, PageFetcher};
