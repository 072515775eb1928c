// src/config.rs

use clap::Parser;
use serde::Deserialize;
use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
    time::Duration,
};
use url::Url;

use crate::assemble::AssembleOptions;
use crate::error::CatalogError;
use crate::fetch::{page, CollectOptions, FetchSettings};
use crate::persist::OutputFormat;

pub const DEFAULT_OUTPUT: &str = "Datasets/world_data.csv";

/// One series to fetch: the API code and the column name it gets.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IndicatorSpec {
    pub code: String,
    pub label: String,
}

impl IndicatorSpec {
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
        }
    }
}

static DEFAULT_INDICATORS: &[(&str, &str)] = &[
    // Economy
    ("NY.GDP.MKTP.CD", "GDP (Current US$)"),
    ("NY.GDP.MKTP.KD.ZG", "GDP Growth (Annual %)"),
    ("NY.GDP.PCAP.CD", "GDP Per Capita (Current US$)"),
    ("FP.CPI.TOTL.ZG", "Inflation (CPI %)"),
    ("NE.TRD.GNFS.ZS", "Trade (% of GDP)"),
    ("BX.KLT.DINV.WD.GD.ZS", "FDI Net Inflows (% of GDP)"),
    // Society & inequality
    ("SI.POV.GINI", "Gini Index"),
    ("SL.UEM.TOTL.ZS", "Unemployment Rate (% total)"),
    ("SI.POV.DDAY", "Poverty Headcount Ratio ($2.15 a day)"),
    // Demographics & health
    ("SP.POP.TOTL", "Population Total"),
    ("SP.DYN.LE00.IN", "Life Expectancy at Birth"),
    ("SP.DYN.TFRT.IN", "Fertility Rate"),
    ("SP.URB.TOTL.IN.ZS", "Urban Population (% of Total)"),
    // Education & innovation
    ("SE.ADT.LITR.ZS", "Literacy Rate (Adult %)"),
    ("GB.XPD.RSDV.GD.ZS", "R&D Expenditure (% of GDP)"),
    // Governance & conflict proxies
    ("MS.MIL.XPND.GD.ZS", "Military Expenditure (% of GDP)"),
    ("VC.IHR.PSRC.P5", "Intentional Homicides (per 100k)"),
];

/// Ordered, read-only list of indicators for a run. Order is join order and
/// output column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    indicators: Vec<IndicatorSpec>,
}

impl Catalog {
    /// The built-in socioeconomic catalog.
    pub fn builtin() -> Self {
        DEFAULT_INDICATORS
            .iter()
            .map(|&(code, label)| IndicatorSpec::new(code, label))
            .collect::<Vec<_>>()
            .into()
    }

    /// Parse a YAML sequence of `{code, label}` mappings.
    ///
    /// Labels become column names, so each must be unique.
    pub fn from_yaml_str(text: &str) -> Result<Self, CatalogError> {
        let indicators: Vec<IndicatorSpec> = serde_yaml::from_str(text)?;
        if indicators.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut labels = HashSet::new();
        for (index, spec) in indicators.iter().enumerate() {
            if spec.code.trim().is_empty() {
                return Err(CatalogError::BlankField { index, field: "code" });
            }
            if spec.label.trim().is_empty() {
                return Err(CatalogError::BlankField { index, field: "label" });
            }
            if !labels.insert(spec.label.as_str()) {
                return Err(CatalogError::DuplicateLabel {
                    index,
                    label: spec.label.clone(),
                });
            }
        }
        Ok(indicators.into())
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, IndicatorSpec> {
        self.indicators.iter()
    }

    pub fn len(&self) -> usize {
        self.indicators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }
}

impl From<Vec<IndicatorSpec>> for Catalog {
    fn from(indicators: Vec<IndicatorSpec>) -> Self {
        Self { indicators }
    }
}

/// Run configuration. Every flag can also come from the environment.
#[derive(Parser, Debug, Clone)]
#[command(name = "indicator_scraper")]
#[command(version, about = "Fetch World Bank indicators into one country/year table")]
pub struct Config {
    /// Output file; its directory must already exist
    #[arg(long, env = "INDICATORS_OUTPUT", default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Output file format
    #[arg(long, env = "INDICATORS_FORMAT", value_enum, default_value_t = OutputFormat::Csv)]
    pub format: OutputFormat,

    /// YAML catalog of `{code, label}` entries replacing the built-in list
    #[arg(long, env = "INDICATORS_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// API root the indicator path is appended to
    #[arg(long, env = "INDICATORS_BASE_URL", default_value = page::DEFAULT_BASE_URL)]
    pub base_url: Url,

    /// Inclusive year range, `start:end`
    #[arg(long, env = "INDICATORS_DATE_RANGE", default_value = page::DEFAULT_DATE_RANGE)]
    pub date_range: String,

    /// Page size hint sent with each request
    #[arg(long, env = "INDICATORS_PER_PAGE", default_value_t = page::DEFAULT_PER_PAGE)]
    pub per_page: u32,

    /// Per-request timeout in seconds
    #[arg(long, env = "INDICATORS_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Pause between page requests of one indicator, in milliseconds
    #[arg(long, env = "INDICATORS_DELAY_MS", default_value_t = 500)]
    pub delay_ms: u64,

    /// Indicators collected at the same time
    #[arg(
        long,
        env = "INDICATORS_CONCURRENCY",
        default_value_t = 1,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub concurrency: u16,
}

impl Config {
    pub fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        match &self.catalog {
            Some(path) => Catalog::load(path),
            None => Ok(Catalog::builtin()),
        }
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            base_url: self.base_url.clone(),
            per_page: self.per_page,
            date_range: self.date_range.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    pub fn assemble_options(&self) -> AssembleOptions {
        AssembleOptions {
            collect: CollectOptions {
                page_delay: Duration::from_millis(self.delay_ms),
            },
            concurrency: usize::from(self.concurrency),
        }
    }
}
