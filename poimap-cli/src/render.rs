//! Render command implementation for the poimap CLI.

use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use log::{info, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use poimap_core::{
    IconLoader, MapOptions, MapSession, MountOutcome, PoiSource, SessionError, StyleDocument,
    StyleDocumentFactory,
};
use poimap_data::{
    DEFAULT_BASE_URL, DEFAULT_DATASET, FilePoiSource, FsIconLoader, HttpIconLoader, HttpPoiSource,
    HttpPoiSourceConfig,
};
use serde::{Deserialize, Serialize};

use crate::{
    ARG_ACCESS_TOKEN, ARG_BASE_URL, ARG_DATA_FILE, ARG_DATASET, ARG_ICON_DIR, ARG_OUTPUT, CliError,
};

/// CLI arguments for the `render` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Load a POI dataset, run the render pipeline and write the \
                 resulting style document as JSON. Options can come from CLI \
                 flags, configuration files, or POIMAP_* environment \
                 variables.",
    about = "Render a POI dataset into a style document"
)]
#[ortho_config(prefix = "POIMAP")]
pub(crate) struct RenderArgs {
    /// Server root publishing `/data/<dataset>.json` and `/icon/*`.
    #[arg(long = ARG_BASE_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) base_url: Option<String>,
    /// Dataset name fetched from the server.
    #[arg(long = ARG_DATASET, value_name = "name")]
    #[serde(default)]
    pub(crate) dataset: Option<String>,
    /// Read the dataset from a local JSON file instead of the server.
    #[arg(long = ARG_DATA_FILE, value_name = "path")]
    #[serde(default)]
    pub(crate) data_file: Option<Utf8PathBuf>,
    /// Read icons from a local directory instead of the server.
    #[arg(long = ARG_ICON_DIR, value_name = "dir")]
    #[serde(default)]
    pub(crate) icon_dir: Option<Utf8PathBuf>,
    /// Access token written to `options.accessToken` for the host page.
    #[arg(long = ARG_ACCESS_TOKEN, value_name = "token")]
    #[serde(default)]
    pub(crate) access_token: Option<String>,
    /// Write the document to this file; stdout when absent.
    #[arg(long = ARG_OUTPUT, value_name = "path")]
    #[serde(default)]
    pub(crate) output: Option<Utf8PathBuf>,
}

impl RenderArgs {
    pub(crate) fn into_config(self) -> Result<RenderConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RenderConfig::try_from(merged)
    }
}

/// Where the dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum DataInput {
    Http { dataset: String },
    File(Utf8PathBuf),
}

/// Resolved `render` command configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RenderConfig {
    /// Server root for datasets and icons.
    pub(crate) base_url: String,
    pub(crate) input: DataInput,
    pub(crate) icon_dir: Option<Utf8PathBuf>,
    pub(crate) access_token: Option<String>,
    pub(crate) output: Option<Utf8PathBuf>,
}

impl TryFrom<RenderArgs> for RenderConfig {
    type Error = CliError;

    fn try_from(args: RenderArgs) -> Result<Self, Self::Error> {
        let base_url = args
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_owned());
        let input = args.data_file.map_or_else(
            || DataInput::Http {
                dataset: args.dataset.unwrap_or_else(|| DEFAULT_DATASET.to_owned()),
            },
            DataInput::File,
        );
        Ok(Self {
            base_url,
            input,
            icon_dir: args.icon_dir,
            access_token: args.access_token,
            output: args.output,
        })
    }
}

impl RenderConfig {
    pub(crate) fn validate_sources(&self) -> Result<(), CliError> {
        if let DataInput::File(path) = &self.input {
            require_existing(path, ARG_DATA_FILE, poimap_fs::is_file)?;
        }
        if let Some(dir) = &self.icon_dir {
            require_existing(dir, ARG_ICON_DIR, poimap_fs::is_dir)?;
        }
        Ok(())
    }

    pub(crate) fn map_options(&self) -> MapOptions {
        self.access_token
            .as_deref()
            .map_or_else(MapOptions::default, |token| {
                MapOptions::default().with_access_token(token)
            })
    }

    pub(crate) fn build_source(&self) -> Result<Box<dyn PoiSource>, CliError> {
        Ok(match &self.input {
            DataInput::File(path) => Box::new(FilePoiSource::new(path.clone())),
            DataInput::Http { dataset } => {
                let config = HttpPoiSourceConfig::new(self.base_url.as_str())
                    .with_dataset(dataset.as_str());
                Box::new(HttpPoiSource::with_config(config)?)
            }
        })
    }

    pub(crate) fn build_loader(&self) -> Result<Box<dyn IconLoader>, CliError> {
        if let Some(dir) = &self.icon_dir {
            return Ok(Box::new(FsIconLoader::new(dir.clone())));
        }
        Ok(Box::new(HttpIconLoader::new(self.base_url.as_str())?))
    }
}

fn require_existing(
    path: &Utf8Path,
    field: &'static str,
    exists: fn(&Utf8Path) -> std::io::Result<bool>,
) -> Result<(), CliError> {
    match exists(path) {
        Ok(true) => Ok(()),
        Ok(false) => Err(CliError::MissingSourceFile {
            field,
            path: path.to_path_buf(),
        }),
        Err(source) => Err(CliError::InspectSourcePath {
            field,
            path: path.to_path_buf(),
            source,
        }),
    }
}

pub(crate) fn run_render(args: RenderArgs) -> Result<(), CliError> {
    let config = args.into_config()?;
    config.validate_sources()?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    let document = runtime.block_on(render_document(&config))?;
    emit(&config, &document)
}

/// Mount a fresh session against a [`StyleDocument`] and return it.
///
/// A dataset that fails to load yields the empty document.
pub(crate) async fn render_document(config: &RenderConfig) -> Result<StyleDocument, CliError> {
    let source = config.build_source()?;
    let loader = config.build_loader()?;
    let mut session = MapSession::new(config.map_options());
    let outcome = session
        .mount(&mut StyleDocumentFactory, source.as_ref(), loader.as_ref())
        .await?;
    match outcome {
        MountOutcome::Rendered(report) => {
            info!(
                "rendered {} features with {} camera command(s)",
                report.features,
                usize::from(report.fit.is_some())
            );
            if !report.failed_icons.is_empty() {
                warn!("icons unavailable: {}", report.failed_icons.join(", "));
            }
        }
        MountOutcome::Empty(err) => info!("writing an empty map after: {err}"),
        MountOutcome::AlreadyMounted => {}
    }
    session
        .into_surface()
        .ok_or(CliError::Session(SessionError::NotMounted))
}

fn emit(config: &RenderConfig, document: &StyleDocument) -> Result<(), CliError> {
    let Some(path) = &config.output else {
        return write_document(&mut std::io::stdout().lock(), document);
    };
    let payload = to_json(document)?;
    poimap_fs::write_bytes(path, &payload).map_err(|source| CliError::WriteOutput {
        target: path.to_string(),
        source,
    })?;
    info!("wrote style document to {path}");
    Ok(())
}

/// Write `document` as pretty JSON followed by a newline.
pub(crate) fn write_document(
    writer: &mut dyn Write,
    document: &StyleDocument,
) -> Result<(), CliError> {
    let payload = to_json(document)?;
    writer
        .write_all(&payload)
        .and_then(|()| writer.flush())
        .map_err(|source| CliError::WriteOutput {
            target: "stdout".to_owned(),
            source,
        })
}

fn to_json(document: &StyleDocument) -> Result<Vec<u8>, CliError> {
    let mut payload =
        serde_json::to_vec_pretty(document).map_err(CliError::SerializeDocument)?;
    payload.push(b'\n');
    Ok(payload)
}
