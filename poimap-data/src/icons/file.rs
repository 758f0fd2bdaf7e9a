//! Icons read from a local directory.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use poimap_core::{IconImage, IconLoadError, IconLoader};

/// Resolves icon paths by file name inside a directory.
///
/// `/icon/school_pinlet-2-medium.png` is read from
/// `{dir}/school_pinlet-2-medium.png`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsIconLoader {
    dir: Utf8PathBuf,
}

impl FsIconLoader {
    /// Loader reading from `dir`.
    #[must_use]
    pub fn new(dir: impl Into<Utf8PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Icon directory.
    #[must_use]
    pub fn dir(&self) -> &Utf8Path {
        &self.dir
    }

    /// Local file an icon path resolves to, if it names a file.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<Utf8PathBuf> {
        Utf8Path::new(path)
            .file_name()
            .map(|name| self.dir.join(name))
    }
}

#[async_trait(?Send)]
impl IconLoader for FsIconLoader {
    async fn load(&self, path: &str) -> Result<IconImage, IconLoadError> {
        let file = self.resolve(path).ok_or_else(|| IconLoadError::Unavailable {
            path: path.to_owned(),
            message: "path does not name a file".to_owned(),
        })?;
        let bytes = poimap_fs::read_bytes(&file).map_err(|err| IconLoadError::Unavailable {
            path: path.to_owned(),
            message: format!("{file}: {err}"),
        })?;
        if bytes.is_empty() {
            return Err(IconLoadError::Empty {
                path: path.to_owned(),
            });
        }
        Ok(IconImage::new(bytes))
    }
}
