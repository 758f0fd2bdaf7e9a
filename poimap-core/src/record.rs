//! Validated point-of-interest records.
//!
//! Records only exist once the ingestion boundary has confirmed a name and a
//! coordinate pair, so downstream stages never filter again.

use geo::Coord;
use serde::Serialize;

/// Sort key assigned to records without a tier.
///
/// Unclassified records sort after tier 3 so every classified record takes
/// precedence over them.
pub const UNCLASSIFIED_SORT_KEY: u8 = 4;

/// Prominence classification of a point of interest.
///
/// Tier 0 is the most prominent. Only `0..=3` are representable; anything else
/// on the wire is treated as unclassified.
///
/// # Examples
/// ```
/// use poimap_core::Tier;
///
/// assert_eq!(Tier::new(2).map(Tier::value), Some(2));
/// assert!(Tier::new(4).is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Tier(u8);

impl Tier {
    /// Highest tier value accepted.
    pub const MAX: u8 = 3;

    /// Construct a tier, rejecting values above [`Tier::MAX`].
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Interpret a raw wire integer as a tier.
    ///
    /// Negative and out-of-range values yield `None`.
    #[must_use]
    pub fn from_wire(value: i64) -> Option<Self> {
        u8::try_from(value).ok().and_then(Self::new)
    }

    /// Numeric tier value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Numeric draw-order key for an optional tier.
///
/// Lower keys are placed first and win symbol collisions.
#[must_use]
pub fn sort_key(tier: Option<Tier>) -> u8 {
    tier.map_or(UNCLASSIFIED_SORT_KEY, Tier::value)
}

/// A single named location ready for rendering.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use poimap_core::{PoiRecord, Tier};
///
/// let record = PoiRecord {
///     tier: Tier::new(1),
///     email: Some("office@example.edu".into()),
///     ..PoiRecord::new("Harbour College", Coord { x: 114.05, y: 22.61 })
/// };
///
/// assert_eq!(record.name, "Harbour College");
/// assert_eq!(record.tier.map(Tier::value), Some(1));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PoiRecord {
    /// Display name, also used as the label text.
    pub name: String,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Classification; `None` when unclassified.
    pub tier: Option<Tier>,
    /// Street address.
    pub address: Option<String>,
    /// City the location belongs to.
    pub cityname: Option<String>,
    /// Official website.
    pub official_url: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Free-form visiting guidance.
    pub guide: Option<String>,
}

impl PoiRecord {
    /// Construct an unclassified record with no optional details.
    #[must_use]
    pub fn new(name: impl Into<String>, location: Coord<f64>) -> Self {
        Self {
            name: name.into(),
            location,
            tier: None,
            address: None,
            cityname: None,
            official_url: None,
            email: None,
            phone: None,
            guide: None,
        }
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }
}
