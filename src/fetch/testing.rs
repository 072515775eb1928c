// src/fetch/testing.rs

use std::{collections::HashMap, sync::Mutex};

use super::envelope::{CountryRef, PageEnvelope, RawRecord};
use super::page::PageFetcher;
use crate::error::FetchError;

pub fn record(country: Option<&str>, date: Option<&str>, value: Option<&str>) -> RawRecord {
    RawRecord {
        value: value.map(str::to_string),
        date: date.map(str::to_string),
        country: country.map(|name| CountryRef {
            value: Some(name.to_string()),
        }),
    }
}

pub fn page(total_pages: u32, records: Vec<RawRecord>) -> PageEnvelope {
    PageEnvelope::new(Some(total_pages), records)
}

/// In-memory fetcher answering from a fixed script of `(code, page)` pages.
/// Pages not in the script fail with a decode error.
#[derive(Default)]
pub struct ScriptedFetcher {
    pages: HashMap<(String, u32), PageEnvelope>,
    calls: Mutex<Vec<(String, u32)>>,
}

impl ScriptedFetcher {
    pub fn with_page(mut self, code: &str, page: u32, envelope: PageEnvelope) -> Self {
        self.pages.insert((code.to_string(), page), envelope);
        self
    }

    pub fn calls(&self) -> Vec<(String, u32)> {
        self.calls.lock().unwrap().clone()
    }
}

impl PageFetcher for ScriptedFetcher {
    async fn fetch(&self, code: &str, page: u32) -> Result<PageEnvelope, FetchError> {
        self.calls.lock().unwrap().push((code.to_string(), page));
        match self.pages.get(&(code.to_string(), page)) {
            Some(envelope) => Ok(envelope.clone()),
            None => Err(FetchError::Decode {
                url: format!("scripted://{}/{}", code, page),
                source: serde_json::from_str::<serde_json::Value>("{").unwrap_err(),
            }),
        }
    }
}
