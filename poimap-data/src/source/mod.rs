//! [`PoiSource`](poimap_core::PoiSource) adapters for HTTP and local files.

mod file;
mod http;

pub use file::FilePoiSource;
pub use http::{
    DEFAULT_BASE_URL, DEFAULT_DATASET, DEFAULT_USER_AGENT, HttpPoiSource, HttpPoiSourceConfig,
    SourceBuildError,
};
