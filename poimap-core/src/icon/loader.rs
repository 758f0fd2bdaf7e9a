//! Icon loader trait and the image payload it produces.

use async_trait::async_trait;

use super::error::IconLoadError;

/// Encoded image bytes as fetched from the asset store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconImage {
    bytes: Vec<u8>,
}

impl IconImage {
    /// Wrap encoded image bytes.
    #[must_use]
    pub const fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Encoded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size of the encoded image in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Fetch icon images by resource path.
///
/// # Examples
///
/// ```rust
/// use async_trait::async_trait;
/// use poimap_core::{IconImage, IconLoadError, IconLoader};
///
/// struct PixelLoader;
///
/// #[async_trait(?Send)]
/// impl IconLoader for PixelLoader {
///     async fn load(&self, path: &str) -> Result<IconImage, IconLoadError> {
///         if path.is_empty() {
///             return Err(IconLoadError::Empty { path: path.to_owned() });
///         }
///         Ok(IconImage::new(vec![0x89, 0x50, 0x4e, 0x47]))
///     }
/// }
/// ```
#[async_trait(?Send)]
pub trait IconLoader {
    /// Load the image stored at `path`.
    async fn load(&self, path: &str) -> Result<IconImage, IconLoadError>;
}
