// src/fetch/envelope.rs

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;

/// Pagination metadata from element 0 of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PageInfo {
    #[serde(rename = "pages", deserialize_with = "page_count")]
    pub total_pages: u32,
}

/// The `country` object nested in each record; only its display name matters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryRef {
    pub value: Option<String>,
}

/// One entry of a records page. Every field is optional; whether the record
/// is usable is decided later by the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawRecord {
    /// Indicator value as the API sent it. Non-string values keep their
    /// JSON text.
    #[serde(default, deserialize_with = "lenient_text")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "country_ref")]
    pub country: Option<CountryRef>,
}

impl RawRecord {
    pub fn country_name(&self) -> Option<&str> {
        self.country.as_ref().and_then(|c| c.value.as_deref())
    }
}

/// Decoded `[metadata, records]` response for one page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageEnvelope {
    pub page_info: Option<PageInfo>,
    pub records: Vec<RawRecord>,
    /// Entries in the raw records list, including any that were not objects.
    pub entries: usize,
}

impl PageEnvelope {
    pub fn new(total_pages: Option<u32>, records: Vec<RawRecord>) -> Self {
        Self {
            page_info: total_pages.map(|total_pages| PageInfo { total_pages }),
            entries: records.len(),
            records,
        }
    }

    /// True when the API sent no entries at all. A page of unusable entries
    /// is not empty.
    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }
}

/// Decode a response body.
///
/// Only invalid JSON is an error. A body that is valid JSON but not a
/// two-element array (the API answers unknown indicators with a one-element
/// message array) decodes to an empty envelope. Entries that are not record
/// objects are skipped.
pub fn decode_envelope(body: &[u8]) -> Result<PageEnvelope, serde_json::Error> {
    let parsed: Value = serde_json::from_slice(body)?;
    let parts = match parsed {
        Value::Array(parts) if parts.len() == 2 => parts,
        _ => return Ok(PageEnvelope::default()),
    };

    let mut parts = parts.into_iter();
    let meta = parts.next().unwrap_or(Value::Null);
    let items = parts.next().unwrap_or(Value::Null);

    let page_info = serde_json::from_value::<PageInfo>(meta).ok();
    let items = match items {
        Value::Array(items) => items,
        _ => Vec::new(),
    };
    let entries = items.len();
    let records = items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<RawRecord>(item).ok())
        .collect();

    Ok(PageEnvelope {
        page_info,
        records,
        entries,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

fn text_of(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Any JSON value: `null` is unset, strings as-is, everything else as JSON text.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_of(Value::deserialize(deserializer)?))
}

/// `{"value": ..}` gives a country; any other shape counts as no country.
fn country_ref<'de, D>(deserializer: D) -> Result<Option<CountryRef>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(mut fields) => Some(CountryRef {
            value: fields.remove("value").and_then(text_of),
        }),
        _ => None,
    })
}

fn page_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    match Scalar::deserialize(deserializer)? {
        Scalar::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| de::Error::custom(format!("invalid page count {}", n))),
        Scalar::Text(t) => t
            .trim()
            .parse::<u32>()
            .map_err(|e| de::Error::custom(format!("invalid page count {:?}: {}", t, e))),
    }
}
