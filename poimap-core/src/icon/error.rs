use thiserror::Error;

/// Errors from [`crate::icon::IconLoader::load`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IconLoadError {
    /// The resource could not be retrieved.
    #[error("failed to load icon from {path}: {message}")]
    Unavailable {
        /// Resource path that was requested.
        path: String,
        /// Transport or filesystem error description.
        message: String,
    },
    /// The resource was retrieved but contained no bytes.
    #[error("icon at {path} is empty")]
    Empty {
        /// Resource path that was requested.
        path: String,
    },
}
