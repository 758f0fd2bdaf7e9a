//! In-memory render surface that records every command as a style document.
//!
//! The document is what the CLI writes out, and what tests inspect to check
//! the pipeline's effect on the map.

use std::collections::BTreeMap;

use log::warn;
use serde::Serialize;

use crate::camera::{FitBounds, FlyTo, Popup};
use crate::feature::FeatureCollection;
use crate::icon::IconImage;
use crate::layer::SymbolLayer;
use crate::surface::{MapOptions, MapSurface, SurfaceFactory};

/// GeoJSON source entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoJsonSource {
    /// Source type; always `geojson`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Current source data.
    pub data: FeatureCollection,
}

impl GeoJsonSource {
    fn new(data: FeatureCollection) -> Self {
        Self {
            kind: "geojson",
            data,
        }
    }
}

/// Camera command in issue order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum CameraCommand {
    /// Flight towards a clicked feature.
    FlyTo(FlyTo),
    /// Fit to the dataset extent.
    FitBounds(FitBounds),
}

/// Recorded map state.
///
/// # Examples
///
/// ```rust
/// use poimap_core::{FeatureCollection, IconImage, MapOptions, MapSurface, StyleDocument};
///
/// let mut document = StyleDocument::new(MapOptions::default());
/// document.add_source("poi-source", &FeatureCollection::default());
/// document.add_image("base-icon", IconImage::new(vec![0; 8]));
///
/// assert!(document.has_image("base-icon"));
/// assert_eq!(document.images.get("base-icon"), Some(&8));
/// assert!(document.sources.contains_key("poi-source"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleDocument {
    /// Options the surface was mounted with.
    pub options: MapOptions,
    /// Sources by id.
    pub sources: BTreeMap<String, GeoJsonSource>,
    /// Layers in declaration order.
    pub layers: Vec<SymbolLayer>,
    /// Registered images: id to encoded byte length.
    pub images: BTreeMap<String, usize>,
    /// Layers with click forwarding enabled.
    pub click_layers: Vec<String>,
    /// Popups opened so far.
    pub popups: Vec<Popup>,
    /// Camera commands in issue order.
    pub camera: Vec<CameraCommand>,
}

impl StyleDocument {
    /// Empty document mounted with `options`.
    #[must_use]
    pub const fn new(options: MapOptions) -> Self {
        Self {
            options,
            sources: BTreeMap::new(),
            layers: Vec::new(),
            images: BTreeMap::new(),
            click_layers: Vec::new(),
            popups: Vec::new(),
            camera: Vec::new(),
        }
    }

    /// Data currently bound to `source_id`.
    #[must_use]
    pub fn source_data(&self, source_id: &str) -> Option<&FeatureCollection> {
        self.sources.get(source_id).map(|source| &source.data)
    }
}

impl MapSurface for StyleDocument {
    fn add_source(&mut self, source_id: &str, data: &FeatureCollection) {
        self.sources
            .insert(source_id.to_owned(), GeoJsonSource::new(data.clone()));
    }

    fn set_source_data(&mut self, source_id: &str, data: &FeatureCollection) {
        match self.sources.get_mut(source_id) {
            Some(source) => source.data = data.clone(),
            None => warn!("ignoring data for unknown source {source_id}"),
        }
    }

    fn add_layer(&mut self, layer: &SymbolLayer) {
        self.layers.push(layer.clone());
    }

    fn has_image(&self, icon_id: &str) -> bool {
        self.images.contains_key(icon_id)
    }

    fn add_image(&mut self, icon_id: &str, image: IconImage) {
        self.images.insert(icon_id.to_owned(), image.len());
    }

    fn subscribe_click(&mut self, layer_id: &str) {
        self.click_layers.push(layer_id.to_owned());
    }

    fn open_popup(&mut self, popup: Popup) {
        self.popups.push(popup);
    }

    fn fly_to(&mut self, command: FlyTo) {
        self.camera.push(CameraCommand::FlyTo(command));
    }

    fn fit_bounds(&mut self, command: FitBounds) {
        self.camera.push(CameraCommand::FitBounds(command));
    }
}

/// Factory producing empty [`StyleDocument`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct StyleDocumentFactory;

impl SurfaceFactory for StyleDocumentFactory {
    type Surface = StyleDocument;

    fn create(&mut self, options: &MapOptions) -> StyleDocument {
        StyleDocument::new(options.clone())
    }
}
