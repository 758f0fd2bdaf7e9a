//! Local dataset source.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use poimap_core::{LoadError, PoiRecord, PoiSource};

use crate::wire::parse_records;

/// Dataset source reading the published wire format from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePoiSource {
    path: Utf8PathBuf,
}

impl FilePoiSource {
    /// Source reading `path`.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Dataset path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

#[async_trait(?Send)]
impl PoiSource for FilePoiSource {
    async fn load(&self) -> Result<Vec<PoiRecord>, LoadError> {
        debug!("reading POI dataset from {}", self.path);
        let payload = poimap_fs::read_bytes(&self.path).map_err(|err| LoadError::Fetch {
            url: self.path.to_string(),
            status: None,
            message: err.to_string(),
        })?;
        parse_records(&payload, self.path.as_str())
    }
}
