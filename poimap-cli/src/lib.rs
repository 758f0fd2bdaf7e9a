//! Command-line interface rendering POI datasets into style documents.
//!
//! `poimap render` loads a dataset over HTTP or from disk, runs the mount
//! pipeline against a [`poimap_core::StyleDocument`] and writes the result
//! as JSON.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod error;
mod render;

pub use error::CliError;

use render::RenderArgs;

pub(crate) const ARG_BASE_URL: &str = "base-url";
pub(crate) const ARG_DATASET: &str = "dataset";
pub(crate) const ARG_DATA_FILE: &str = "data-file";
pub(crate) const ARG_ICON_DIR: &str = "icon-dir";
pub(crate) const ARG_ACCESS_TOKEN: &str = "access-token";
pub(crate) const ARG_OUTPUT: &str = "output";

/// Run the poimap CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns [`CliError`] when arguments or configuration are invalid, or the
/// document cannot be written. A dataset that fails to load is not an
/// error: the empty document is written instead.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    dispatch(cli)
}

fn dispatch(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Render(args) => render::run_render(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "poimap",
    about = "Render point-of-interest datasets into map style documents",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load a dataset and write the rendered style document as JSON.
    Render(RenderArgs),
}

#[cfg(test)]
mod tests;
