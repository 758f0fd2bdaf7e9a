//! Loading POI records from a dataset.

use async_trait::async_trait;
use thiserror::Error;

use crate::record::PoiRecord;

/// Errors raised while loading a dataset.
///
/// The session logs these once and renders an empty map; they are never
/// retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The dataset could not be retrieved.
    #[error("failed to fetch {url}{}: {message}", status_suffix(.status))]
    Fetch {
        /// Location that was requested.
        url: String,
        /// HTTP status when the server answered.
        status: Option<u16>,
        /// Transport or server description.
        message: String,
    },
    /// The payload was retrieved but is not a POI array.
    #[error("failed to parse {url}: {message}")]
    Parse {
        /// Location the payload came from.
        url: String,
        /// Decoder description.
        message: String,
    },
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map_or_else(String::new, |code| format!(" (status {code})"))
}

impl LoadError {
    /// Location associated with the error.
    #[must_use]
    pub fn url(&self) -> &str {
        match self {
            Self::Fetch { url, .. } | Self::Parse { url, .. } => url,
        }
    }
}

/// Produce validated POI records.
///
/// Implementations decode their payload, drop entries without coordinates
/// and preserve the order of the rest.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use geo::Coord;
/// use poimap_core::{LoadError, PoiRecord, PoiSource};
///
/// struct Fixed;
///
/// #[async_trait(?Send)]
/// impl PoiSource for Fixed {
///     async fn load(&self) -> Result<Vec<PoiRecord>, LoadError> {
///         Ok(vec![PoiRecord::new("Library", Coord { x: 114.05, y: 22.61 })])
///     }
/// }
/// ```
#[async_trait(?Send)]
pub trait PoiSource {
    /// Load every record in the dataset.
    async fn load(&self) -> Result<Vec<PoiRecord>, LoadError>;
}
