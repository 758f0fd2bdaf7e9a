//! Core pipeline for rendering points of interest onto an interactive map.
//!
//! The crate turns validated [`PoiRecord`] values into a styled
//! [`FeatureCollection`], declares the icon and label [`SymbolLayer`]s,
//! registers icon assets, wires click interaction and fits the camera to the
//! data. The map engine itself stays behind the [`MapSurface`] trait so the
//! pipeline can drive a browser renderer, a native one, or the serialisable
//! [`StyleDocument`].
//!
//! Execution is single-threaded and cooperative: async traits are declared
//! `?Send` and the pipeline never spawns tasks.

#![forbid(unsafe_code)]

pub mod camera;
pub mod document;
pub mod feature;
pub mod icon;
pub mod interaction;
pub mod layer;
pub mod record;
pub mod session;
pub mod source;
pub mod style;
pub mod surface;
pub mod viewport;

#[cfg(any(test, feature = "test-support"))]
#[doc(hidden)]
pub mod test_support;

pub use camera::{FitBounds, FlyTo, Popup};
pub use document::{CameraCommand, StyleDocument, StyleDocumentFactory};
pub use feature::{Feature, FeatureCollection, FeatureCollectionBuilder, FeatureProperties};
pub use icon::{IconImage, IconLoadError, IconLoader, IconOutcome, IconRegistry, IconState};
pub use interaction::{ClickResponse, InteractionController};
pub use layer::{LayerManager, RenderPreconditionError, SymbolLayer};
pub use record::{PoiRecord, Tier};
pub use session::{InitState, MapSession, MountOutcome, PipelineReport, SessionError};
pub use source::{LoadError, PoiSource};
pub use style::{StyleAttributes, style_for};
pub use surface::{ClickEvent, IconSource, MapOptions, MapSurface, SurfaceFactory};
pub use viewport::{ViewportFitter, compute_bounds};
