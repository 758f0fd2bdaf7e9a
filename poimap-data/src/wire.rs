//! Wire format of the POI dataset.
//!
//! The dataset is a JSON array of loosely typed objects. Key spellings such
//! as `offical` and `eamil` are part of the published format and must be
//! read as-is.

use geo::Coord;
use log::debug;
use poimap_core::{LoadError, PoiRecord, Tier};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Coordinate pair as published.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Cartographic {
    /// Longitude in degrees.
    pub longitude: f64,
    /// Latitude in degrees.
    pub latitude: f64,
}

/// One raw dataset entry.
///
/// Display fields accept strings and numbers; any other JSON type reads as
/// absent rather than rejecting the entry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PoiEntry {
    /// Display name.
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    /// Street address.
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: Option<String>,
    /// City name.
    #[serde(default, deserialize_with = "lenient_text")]
    pub cityname: Option<String>,
    /// Location; entries without one are dropped.
    pub cartographic: Option<Cartographic>,
    /// Official website.
    #[serde(default, deserialize_with = "lenient_text")]
    pub offical: Option<String>,
    /// Classification; numeric, occasionally quoted.
    pub class: Option<Value>,
    /// Contact email.
    #[serde(default, deserialize_with = "lenient_text")]
    pub eamil: Option<String>,
    /// Contact phone number.
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    /// Visiting guidance.
    #[serde(default, deserialize_with = "lenient_text")]
    pub guide: Option<String>,
}

impl PoiEntry {
    /// Validate the entry into a record.
    ///
    /// Returns `None` when the coordinates are missing. A missing name
    /// becomes the empty string.
    #[must_use]
    pub fn into_record(self) -> Option<PoiRecord> {
        let location = self.cartographic?;
        Some(PoiRecord {
            tier: self.class.as_ref().and_then(tier_from_value),
            address: self.address,
            cityname: self.cityname,
            official_url: self.offical,
            email: self.eamil,
            phone: self.phone,
            guide: self.guide,
            ..PoiRecord::new(
                self.name.unwrap_or_default(),
                Coord {
                    x: location.longitude,
                    y: location.latitude,
                },
            )
        })
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_from_value(Value::deserialize(deserializer)?))
}

fn text_from_value(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

fn tier_from_value(value: &Value) -> Option<Tier> {
    let raw = match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    };
    raw.and_then(Tier::from_wire)
}

/// Decode a dataset payload fetched from `url`.
///
/// Array items that are not usable entries are skipped with a debug log;
/// a payload that is not a JSON array fails as a whole.
///
/// # Errors
///
/// [`LoadError::Parse`] when the payload is not a JSON array.
pub fn parse_records(payload: &[u8], url: &str) -> Result<Vec<PoiRecord>, LoadError> {
    let items: Vec<Value> = serde_json::from_slice(payload).map_err(|err| LoadError::Parse {
        url: url.to_owned(),
        message: err.to_string(),
    })?;
    let total = items.len();
    let records: Vec<PoiRecord> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| decode_item(index, item))
        .collect();
    if records.len() < total {
        debug!(
            "kept {} of {total} entries from {url}; the rest lack coordinates",
            records.len()
        );
    }
    Ok(records)
}

fn decode_item(index: usize, item: Value) -> Option<PoiRecord> {
    if !item.is_object() {
        debug!("skipping entry {index}: not an object");
        return None;
    }
    match serde_json::from_value::<PoiEntry>(item) {
        Ok(entry) => {
            let record = entry.into_record();
            if record.is_none() {
                debug!("skipping entry {index}: missing coordinates");
            }
            record
        }
        Err(err) => {
            debug!("skipping entry {index}: {err}");
            None
        }
    }
}
