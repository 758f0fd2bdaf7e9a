//! Source binding and symbol layer declarations.
//!
//! Both layers read from the single POI source and share the tier sort key,
//! so icons and labels agree on which feature wins a collision.

use log::debug;
use serde::Serialize;
use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::feature::FeatureCollection;
use crate::record::UNCLASSIFIED_SORT_KEY;
use crate::surface::MapSurface;

/// Id of the GeoJSON source holding every POI feature.
pub const POI_SOURCE_ID: &str = "poi-source";
/// Id of the icon layer.
pub const ICON_LAYER_ID: &str = "poi-icons";
/// Id of the label layer.
pub const LABEL_LAYER_ID: &str = "poi-labels";

/// Vertical label offset below the icon, in ems.
pub const LABEL_OFFSET: [f64; 2] = [0.0, 1.5];
/// Label halo colour.
pub const LABEL_HALO_COLOR: &str = "#000000";
/// Label halo width in pixels.
pub const LABEL_HALO_WIDTH: f64 = 2.0;

/// Errors raised when layer operations run out of order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderPreconditionError {
    /// A layer was added before the POI source was bound.
    #[error("layer {layer_id} requires the POI source to be bound first")]
    SourceNotBound {
        /// Layer that was being added.
        layer_id: &'static str,
    },
    /// The POI source was bound a second time.
    #[error("the POI source is already bound; replace its data instead")]
    SourceAlreadyBound,
    /// A layer was added twice.
    #[error("layer {layer_id} has already been added")]
    LayerAlreadyAdded {
        /// Layer that was being added.
        layer_id: &'static str,
    },
    /// Click handlers were bound before both layers existed.
    #[error("click handlers require both POI layers to exist")]
    LayersNotReady,
}

/// Declarative symbol layer in the engine's style format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolLayer {
    /// Layer id.
    pub id: &'static str,
    /// Layer type; always `symbol`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Source the layer reads from.
    pub source: &'static str,
    /// Layout properties keyed by style property name.
    pub layout: Map<String, Value>,
    /// Paint properties keyed by style property name.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub paint: Map<String, Value>,
}

/// Sort-key expression shared by both layers.
///
/// Unclassified features have no `tier` property and fall back to
/// [`UNCLASSIFIED_SORT_KEY`] (4), so they draw after every ranked tier.
/// Coercing the missing class to a number would give 0 and place them
/// first; the explicit key keeps ranked features ahead of them.
#[must_use]
pub fn sort_key_expression() -> Value {
    json!(["coalesce", ["get", "tier"], UNCLASSIFIED_SORT_KEY])
}

fn properties(entries: Vec<(&str, Value)>) -> Map<String, Value> {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value))
        .collect()
}

/// Icon layer: per-feature image and size.
#[must_use]
pub fn icon_layer() -> SymbolLayer {
    SymbolLayer {
        id: ICON_LAYER_ID,
        kind: "symbol",
        source: POI_SOURCE_ID,
        layout: properties(vec![
            ("icon-image", json!(["get", "icon"])),
            ("icon-size", json!(["get", "iconSize"])),
            ("symbol-sort-key", sort_key_expression()),
        ]),
        paint: Map::new(),
    }
}

/// Label layer: per-feature name, size and colour with a fixed halo.
#[must_use]
pub fn label_layer() -> SymbolLayer {
    SymbolLayer {
        id: LABEL_LAYER_ID,
        kind: "symbol",
        source: POI_SOURCE_ID,
        layout: properties(vec![
            ("text-field", json!(["get", "name"])),
            ("text-size", json!(["get", "fontSize"])),
            ("text-anchor", json!("top")),
            ("text-offset", json!(LABEL_OFFSET)),
            ("symbol-sort-key", sort_key_expression()),
        ]),
        paint: properties(vec![
            ("text-color", json!(["get", "fontColor"])),
            ("text-halo-color", json!(LABEL_HALO_COLOR)),
            ("text-halo-width", json!(LABEL_HALO_WIDTH)),
        ]),
    }
}

/// Whether the POI source has been bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceState {
    /// Nothing bound yet.
    #[default]
    Unbound,
    /// Bound for the lifetime of the surface.
    Bound,
}

/// Binds the POI source and declares the two symbol layers.
///
/// The source moves from unbound to bound once and never back; layers are
/// never removed.
#[derive(Debug, Default)]
pub struct LayerManager {
    source: SourceState,
    icon_layer: bool,
    label_layer: bool,
}

impl LayerManager {
    /// Manager with nothing bound.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current source state.
    #[must_use]
    pub const fn source_state(&self) -> SourceState {
        self.source
    }

    /// Whether both layers have been added.
    #[must_use]
    pub const fn layers_ready(&self) -> bool {
        self.icon_layer && self.label_layer
    }

    /// Ids of the layers this manager declares.
    #[must_use]
    pub const fn layer_ids() -> [&'static str; 2] {
        [ICON_LAYER_ID, LABEL_LAYER_ID]
    }

    /// Bind `collection` as the POI source.
    ///
    /// # Errors
    ///
    /// [`RenderPreconditionError::SourceAlreadyBound`] on a second bind.
    pub fn bind_source<S>(
        &mut self,
        surface: &mut S,
        collection: &FeatureCollection,
    ) -> Result<(), RenderPreconditionError>
    where
        S: MapSurface + ?Sized,
    {
        if self.source == SourceState::Bound {
            return Err(RenderPreconditionError::SourceAlreadyBound);
        }
        surface.add_source(POI_SOURCE_ID, collection);
        self.source = SourceState::Bound;
        debug!("bound {} features to {POI_SOURCE_ID}", collection.len());
        Ok(())
    }

    /// Replace the bound source's data wholesale.
    ///
    /// # Errors
    ///
    /// [`RenderPreconditionError::SourceNotBound`] when nothing is bound yet.
    pub fn replace_data<S>(
        &self,
        surface: &mut S,
        collection: &FeatureCollection,
    ) -> Result<(), RenderPreconditionError>
    where
        S: MapSurface + ?Sized,
    {
        if self.source != SourceState::Bound {
            return Err(RenderPreconditionError::SourceNotBound {
                layer_id: POI_SOURCE_ID,
            });
        }
        surface.set_source_data(POI_SOURCE_ID, collection);
        debug!("replaced {POI_SOURCE_ID} with {} features", collection.len());
        Ok(())
    }

    /// Declare the icon layer.
    ///
    /// # Errors
    ///
    /// Fails when the source is unbound or the layer already exists.
    pub fn add_icon_layer<S>(&mut self, surface: &mut S) -> Result<(), RenderPreconditionError>
    where
        S: MapSurface + ?Sized,
    {
        self.check_can_add(ICON_LAYER_ID, self.icon_layer)?;
        surface.add_layer(&icon_layer());
        self.icon_layer = true;
        Ok(())
    }

    /// Declare the label layer.
    ///
    /// # Errors
    ///
    /// Fails when the source is unbound or the layer already exists.
    pub fn add_label_layer<S>(&mut self, surface: &mut S) -> Result<(), RenderPreconditionError>
    where
        S: MapSurface + ?Sized,
    {
        self.check_can_add(LABEL_LAYER_ID, self.label_layer)?;
        surface.add_layer(&label_layer());
        self.label_layer = true;
        Ok(())
    }

    fn check_can_add(
        &self,
        layer_id: &'static str,
        already_added: bool,
    ) -> Result<(), RenderPreconditionError> {
        if self.source != SourceState::Bound {
            return Err(RenderPreconditionError::SourceNotBound { layer_id });
        }
        if already_added {
            return Err(RenderPreconditionError::LayerAlreadyAdded { layer_id });
        }
        Ok(())
    }
}
