// src/table/normalize.rs

use crate::fetch::RawRecord;

/// A usable data point for one indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub country: String,
    pub year: i32,
    /// Passed through as received; `None` when the API reported no value.
    pub value: Option<String>,
}

/// Turn a raw record into an observation, or `None` when it has no country
/// name, no date, or a date that is not an integer year.
pub fn normalize(record: &RawRecord) -> Option<Observation> {
    let country = record.country_name().filter(|c| !c.is_empty())?;
    let year = record.date.as_deref()?.trim().parse::<i32>().ok()?;
    Some(Observation {
        country: country.to_string(),
        year,
        value: record.value.clone(),
    })
}

/// `Country, Year, <label>` rows for a single indicator.
///
/// Duplicate `(country, year)` rows from the source are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorTable {
    pub label: String,
    pub observations: Vec<Observation>,
}

impl IndicatorTable {
    pub fn empty(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            observations: Vec::new(),
        }
    }

    pub fn from_records(label: impl Into<String>, records: &[RawRecord]) -> Self {
        Self {
            label: label.into(),
            observations: records.iter().filter_map(normalize).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
}
