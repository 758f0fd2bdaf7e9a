//! Dataset and icon adapters for the poimap pipeline.
//!
//! Responsibilities:
//! - Decode the published POI wire format into validated records.
//! - Fetch datasets and icons over HTTP with `reqwest`.
//! - Read datasets and icons from local directories through `poimap-fs`.
//!
//! Boundaries:
//! - Styling, layers and interaction live in `poimap-core`.
//! - No retries and no caching; every load hits the backing store once.
#![forbid(unsafe_code)]

pub mod icons;
pub mod source;
pub mod wire;

pub use icons::{FsIconLoader, HttpIconLoader};
pub use source::{
    DEFAULT_BASE_URL, DEFAULT_DATASET, DEFAULT_USER_AGENT, FilePoiSource, HttpPoiSource,
    HttpPoiSourceConfig, SourceBuildError,
};
pub use wire::{PoiEntry, parse_records};
