//! Facade crate for the poimap rendering pipeline.
//!
//! This crate re-exports the core pipeline types and exposes the HTTP and
//! filesystem adapters behind the `data` feature flag.

#![forbid(unsafe_code)]

pub use poimap_core::{
    ClickEvent, ClickResponse, Feature, FeatureCollection, FeatureCollectionBuilder, FitBounds,
    FlyTo, IconImage, IconLoadError, IconLoader, IconRegistry, IconState, InitState,
    InteractionController, LayerManager, LoadError, MapOptions, MapSession, MapSurface,
    MountOutcome, PoiRecord, PoiSource, Popup, RenderPreconditionError, SessionError,
    StyleAttributes, StyleDocument, SurfaceFactory, SymbolLayer, Tier, ViewportFitter, style_for,
};

#[cfg(feature = "data")]
pub use poimap_data::{FilePoiSource, FsIconLoader, HttpIconLoader, HttpPoiSource};
