//! Error types emitted by the poimap CLI.

use std::sync::Arc;

use camino::Utf8PathBuf;
use poimap_core::SessionError;
use poimap_data::SourceBuildError;
use thiserror::Error;

/// Errors emitted by the poimap CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A supplied input path does not exist or has the wrong type.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
    },
    /// A supplied input path could not be inspected.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag naming the path.
        field: &'static str,
        /// Offending path.
        path: Utf8PathBuf,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
    /// The HTTP adapters could not be constructed.
    #[error(transparent)]
    BuildSource(#[from] SourceBuildError),
    /// The async runtime could not be started.
    #[error("failed to start runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// The render pipeline ran out of order.
    #[error(transparent)]
    Session(#[from] SessionError),
    /// Serialising the style document failed.
    #[error("failed to serialise style document: {0}")]
    SerializeDocument(#[source] serde_json::Error),
    /// Writing the style document failed.
    #[error("failed to write style document to {target}: {source}")]
    WriteOutput {
        /// Output file, or `stdout`.
        target: String,
        /// Underlying IO failure.
        #[source]
        source: std::io::Error,
    },
}
