//! Boundary between the pipeline and the map engine.
//!
//! [`MapSurface`] is the single mutable resource the pipeline drives. Its
//! methods are declarative commands; the engine decides when to draw. An
//! engine must accept layers that reference icon ids which are not yet
//! registered and redraw once [`MapSurface::add_image`] supplies them.

use serde::Serialize;

use crate::camera::{FitBounds, FlyTo, Popup};
use crate::feature::{Feature, FeatureCollection};
use crate::icon::IconImage;
use crate::layer::SymbolLayer;
use crate::style::{BASE_ICON, DUAL_SCRIPT_ICON};

/// Commands understood by a map engine.
///
/// # Examples
///
/// ```rust
/// use poimap_core::{
///     FeatureCollection, FitBounds, FlyTo, IconImage, MapSurface, Popup, SymbolLayer,
/// };
///
/// #[derive(Default)]
/// struct CountingSurface {
///     layers: usize,
/// }
///
/// impl MapSurface for CountingSurface {
///     fn add_source(&mut self, _source_id: &str, _data: &FeatureCollection) {}
///     fn set_source_data(&mut self, _source_id: &str, _data: &FeatureCollection) {}
///     fn add_layer(&mut self, _layer: &SymbolLayer) {
///         self.layers += 1;
///     }
///     fn has_image(&self, _icon_id: &str) -> bool {
///         false
///     }
///     fn add_image(&mut self, _icon_id: &str, _image: IconImage) {}
///     fn subscribe_click(&mut self, _layer_id: &str) {}
///     fn open_popup(&mut self, _popup: Popup) {}
///     fn fly_to(&mut self, _command: FlyTo) {}
///     fn fit_bounds(&mut self, _command: FitBounds) {}
/// }
///
/// let mut surface = CountingSurface::default();
/// surface.add_layer(&poimap_core::layer::icon_layer());
/// assert_eq!(surface.layers, 1);
/// ```
pub trait MapSurface {
    /// Register a GeoJSON source under `source_id`.
    fn add_source(&mut self, source_id: &str, data: &FeatureCollection);
    /// Replace the data of an existing source wholesale.
    fn set_source_data(&mut self, source_id: &str, data: &FeatureCollection);
    /// Declare a symbol layer.
    fn add_layer(&mut self, layer: &SymbolLayer);
    /// Whether an image is registered under `icon_id`.
    fn has_image(&self, icon_id: &str) -> bool;
    /// Register an image under `icon_id`.
    fn add_image(&mut self, icon_id: &str, image: IconImage);
    /// Start forwarding clicks on `layer_id` to the host.
    fn subscribe_click(&mut self, layer_id: &str);
    /// Show a popup.
    fn open_popup(&mut self, popup: Popup);
    /// Animate the camera towards a point.
    fn fly_to(&mut self, command: FlyTo);
    /// Fit the camera to a rectangle.
    fn fit_bounds(&mut self, command: FitBounds);
}

/// Creates render surfaces.
///
/// A [`crate::MapSession`] calls this at most once.
pub trait SurfaceFactory {
    /// Surface type produced by this factory.
    type Surface: MapSurface;

    /// Create a surface mounted according to `options`.
    fn create(&mut self, options: &MapOptions) -> Self::Surface;
}

/// Logical icon id paired with the resource it loads from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconSource {
    /// Id referenced by the `icon` feature property.
    pub id: String,
    /// Resource path, relative to the asset root.
    pub path: String,
}

impl IconSource {
    /// Pair an icon id with its resource path.
    #[must_use]
    pub fn new(id: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            path: path.into(),
        }
    }
}

/// Path of the single-script pin.
pub const BASE_ICON_PATH: &str = "/icon/school_pinlet-2-medium.png";
/// Path of the dual-script pin used for the top tiers.
pub const DUAL_SCRIPT_ICON_PATH: &str = "/icon/school_cn_jp_pinlet-2-medium.png";

/// Initial mount parameters for the render surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    /// Id of the host container element.
    pub container: String,
    /// Initial centre as `[longitude, latitude]`.
    pub center: [f64; 2],
    /// Initial zoom level.
    pub zoom: f64,
    /// Map projection name.
    pub projection: String,
    /// Whether the engine should antialias.
    pub antialias: bool,
    /// Engine access token, serialised as `accessToken` only when set so a
    /// host page can hand it to the engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Icons requested during the pipeline.
    pub icons: Vec<IconSource>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            container: "map".to_owned(),
            center: [114.0, 22.6],
            zoom: 18.0,
            projection: "mercator".to_owned(),
            antialias: false,
            access_token: None,
            icons: vec![
                IconSource::new(BASE_ICON, BASE_ICON_PATH),
                IconSource::new(DUAL_SCRIPT_ICON, DUAL_SCRIPT_ICON_PATH),
            ],
        }
    }
}

impl MapOptions {
    /// Set the engine access token.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Replace the icon list.
    #[must_use]
    pub fn with_icons(mut self, icons: Vec<IconSource>) -> Self {
        self.icons = icons;
        self
    }
}

/// Click resolved by the engine against one layer.
///
/// `features` lists every feature under the pointer in the engine's hit
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickEvent {
    /// Layer the click was resolved against.
    pub layer_id: String,
    /// Features under the pointer.
    pub features: Vec<Feature>,
}

impl ClickEvent {
    /// Build a click event.
    #[must_use]
    pub fn new(layer_id: impl Into<String>, features: Vec<Feature>) -> Self {
        Self {
            layer_id: layer_id.into(),
            features,
        }
    }
}
