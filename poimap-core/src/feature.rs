//! GeoJSON-shaped feature collection built from validated records.

use geo::Coord;
use serde::Serialize;

use crate::record::{PoiRecord, Tier, sort_key};
use crate::style::{StyleAttributes, style_for};

/// Point geometry with coordinates ordered `[longitude, latitude]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Point")]
pub struct PointGeometry {
    /// `[longitude, latitude]` in degrees.
    pub coordinates: [f64; 2],
}

impl PointGeometry {
    /// Build a geometry from a WGS84 coordinate.
    #[must_use]
    pub const fn from_coord(coord: Coord<f64>) -> Self {
        Self {
            coordinates: [coord.x, coord.y],
        }
    }

    /// Convert back into a coordinate.
    #[must_use]
    pub const fn coord(&self) -> Coord<f64> {
        let [x, y] = self.coordinates;
        Coord { x, y }
    }
}

/// Display fields and style attributes attached to a feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureProperties {
    /// Display name.
    pub name: String,
    /// Street address.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// City name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cityname: Option<String>,
    /// Official website.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub official_url: Option<String>,
    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Contact phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Visiting guidance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guide: Option<String>,
    /// Classification, omitted when unclassified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<Tier>,
    /// Style derived from `tier`.
    #[serde(flatten)]
    pub style: StyleAttributes,
}

/// One renderable point of interest.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    /// Point location.
    pub geometry: PointGeometry,
    /// Display and style properties.
    pub properties: FeatureProperties,
}

impl Feature {
    /// Draw-order key; lower keys take precedence.
    #[must_use]
    pub fn sort_key(&self) -> u8 {
        sort_key(self.properties.tier)
    }
}

/// Ordered features bound to both render layers.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use poimap_core::{FeatureCollection, PoiRecord};
///
/// let records = vec![PoiRecord::new("Library", Coord { x: 114.05, y: 22.61 })];
/// let collection = FeatureCollection::from_records(&records);
///
/// assert_eq!(collection.len(), 1);
/// assert_eq!(collection.features[0].geometry.coordinates, [114.05, 22.61]);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    /// Features in input order.
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Build a collection using the default tier styles.
    #[must_use]
    pub fn from_records(records: &[PoiRecord]) -> Self {
        FeatureCollectionBuilder::new().build(records)
    }

    /// Number of features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the collection has no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Iterate over features in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Feature> {
        self.features.iter()
    }
}

/// Converts records into features through a style mapper.
///
/// The mapping is one-to-one: no deduplication, reordering or aggregation.
#[derive(Debug, Clone, Copy)]
pub struct FeatureCollectionBuilder {
    mapper: fn(Option<Tier>) -> StyleAttributes,
}

impl Default for FeatureCollectionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureCollectionBuilder {
    /// Builder using [`style_for`].
    #[must_use]
    pub const fn new() -> Self {
        Self { mapper: style_for }
    }

    /// Builder using a custom style mapper.
    #[must_use]
    pub const fn with_mapper(mapper: fn(Option<Tier>) -> StyleAttributes) -> Self {
        Self { mapper }
    }

    /// Build one feature.
    #[must_use]
    pub fn feature(&self, record: &PoiRecord) -> Feature {
        Feature {
            geometry: PointGeometry::from_coord(record.location),
            properties: FeatureProperties {
                name: record.name.clone(),
                address: record.address.clone(),
                cityname: record.cityname.clone(),
                official_url: record.official_url.clone(),
                email: record.email.clone(),
                phone: record.phone.clone(),
                guide: record.guide.clone(),
                tier: record.tier,
                style: (self.mapper)(record.tier),
            },
        }
    }

    /// Build the whole collection.
    #[must_use]
    pub fn build(&self, records: &[PoiRecord]) -> FeatureCollection {
        FeatureCollection {
            features: records.iter().map(|record| self.feature(record)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{BASE_ICON, DUAL_SCRIPT_ICON, UNCLASSIFIED_STYLE};
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn records() -> Vec<PoiRecord> {
        vec![
            PoiRecord {
                tier: Tier::new(0),
                official_url: Some("https://north.example.edu".into()),
                ..PoiRecord::new("North", Coord { x: 114.05, y: 22.61 })
            },
            PoiRecord::new("South", Coord { x: 113.9, y: 22.5 }),
            PoiRecord {
                tier: Tier::new(3),
                ..PoiRecord::new("East", Coord { x: 114.1, y: 22.7 })
            },
        ]
    }

    #[rstest]
    fn emits_one_feature_per_record_in_order(records: Vec<PoiRecord>) {
        let collection = FeatureCollection::from_records(&records);
        let names: Vec<_> = collection
            .iter()
            .map(|feature| feature.properties.name.as_str())
            .collect();
        assert_eq!(names, ["North", "South", "East"]);
    }

    #[rstest]
    fn geometry_puts_longitude_first(records: Vec<PoiRecord>) {
        let collection = FeatureCollection::from_records(&records);
        let first = collection.features.first().expect("one feature");
        assert_eq!(first.geometry.coordinates, [114.05, 22.61]);
        assert_eq!(first.geometry.coord(), Coord { x: 114.05, y: 22.61 });
    }

    #[rstest]
    fn attaches_tier_styles(records: Vec<PoiRecord>) {
        let collection = FeatureCollection::from_records(&records);
        let icons: Vec<_> = collection
            .iter()
            .map(|feature| feature.properties.style.icon_id)
            .collect();
        assert_eq!(icons, [DUAL_SCRIPT_ICON, BASE_ICON, BASE_ICON]);
    }

    #[rstest]
    fn custom_mapper_is_applied(records: Vec<PoiRecord>) {
        let builder = FeatureCollectionBuilder::with_mapper(|_| UNCLASSIFIED_STYLE);
        let collection = builder.build(&records);
        assert!(
            collection
                .iter()
                .all(|feature| feature.properties.style == UNCLASSIFIED_STYLE)
        );
    }

    #[rstest]
    fn empty_input_builds_empty_collection() {
        let collection = FeatureCollection::from_records(&[]);
        assert!(collection.is_empty());
    }

    #[rstest]
    fn serialises_as_geojson(records: Vec<PoiRecord>) {
        let collection = FeatureCollection::from_records(&records);
        let value = serde_json::to_value(&collection).expect("collection should serialise");
        let first = value
            .get("features")
            .and_then(|features| features.get(0))
            .cloned()
            .expect("first feature");
        assert_eq!(value.get("type"), Some(&json!("FeatureCollection")));
        assert_eq!(
            first,
            json!({
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [114.05, 22.61] },
                "properties": {
                    "name": "North",
                    "officialUrl": "https://north.example.edu",
                    "tier": 0,
                    "icon": "dual-script-icon",
                    "iconSize": 0.6,
                    "fontSize": 13,
                    "fontColor": "#ff00ff",
                },
            })
        );
    }
}
