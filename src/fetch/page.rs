// src/fetch/page.rs

use anyhow::{bail, Context, Result};
use reqwest::Client;
use std::{future::Future, time::Duration};
use tracing::debug;
use url::Url;

use super::envelope::{decode_envelope, PageEnvelope};
use crate::error::FetchError;

pub const DEFAULT_BASE_URL: &str = "https://api.worldbank.org/v2";
pub const DEFAULT_PER_PAGE: u32 = 20_000;
pub const DEFAULT_DATE_RANGE: &str = "1960:2025";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches a single page of one indicator.
pub trait PageFetcher {
    fn fetch(
        &self,
        code: &str,
        page: u32,
    ) -> impl Future<Output = Result<PageEnvelope, FetchError>> + Send;
}

/// Fixed request parameters shared by every page request.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub base_url: Url,
    pub per_page: u32,
    /// Inclusive year filter in the API's `start:end` form.
    pub date_range: String,
    pub timeout: Duration,
}

impl FetchSettings {
    /// Settings for `base_url` with the default paging, year range and timeout.
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            per_page: DEFAULT_PER_PAGE,
            date_range: DEFAULT_DATE_RANGE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// `PageFetcher` over the World Bank HTTP API.
pub struct HttpPageFetcher {
    client: Client,
    settings: FetchSettings,
}

impl HttpPageFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self> {
        if settings.base_url.cannot_be_a_base() {
            bail!("base URL {} cannot carry a path", settings.base_url);
        }
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .context("building HTTP client")?;
        Ok(Self { client, settings })
    }

    /// `{base}/country/all/indicator/{code}`
    pub fn indicator_url(&self, code: &str) -> Url {
        let mut url = self.settings.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["country", "all", "indicator", code]);
        }
        url
    }
}

impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, code: &str, page: u32) -> Result<PageEnvelope, FetchError> {
        let url = self.indicator_url(code);
        let per_page = self.settings.per_page.to_string();
        let page_param = page.to_string();
        debug!(%url, page, "GET page");

        let resp = self
            .client
            .get(url.clone())
            .query(&[
                ("format", "json"),
                ("per_page", per_page.as_str()),
                ("date", self.settings.date_range.as_str()),
                ("page", page_param.as_str()),
            ])
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = resp.bytes().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

        decode_envelope(&body).map_err(|source| FetchError::Decode {
            url: url.to_string(),
            source,
        })
    }
}
