//! Guarded, single-surface orchestration of the render pipeline.
//!
//! A [`MapSession`] creates at most one surface, loads the dataset, binds the
//! layers, fits the camera and finally drives the icon loads it requested
//! along the way. Layers therefore always reference icons that are not
//! registered yet; the surface picks them up when [`MapSurface::add_image`]
//! lands.

use futures_util::future::join_all;
use log::{debug, error, info};
use thiserror::Error;

use crate::camera::FitBounds;
use crate::feature::FeatureCollectionBuilder;
use crate::icon::{IconLoader, IconRegistry, IconState, PendingIcon};
use crate::interaction::{ClickResponse, InteractionController};
use crate::layer::{LayerManager, RenderPreconditionError, SourceState};
use crate::record::PoiRecord;
use crate::source::{LoadError, PoiSource};
use crate::surface::{ClickEvent, MapOptions, MapSurface, SurfaceFactory};
use crate::viewport::ViewportFitter;

/// Initialisation guard. Moves forward only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitState {
    /// No surface exists.
    #[default]
    Uninitialized,
    /// A mount is in progress.
    Initializing,
    /// The surface exists and the first load has finished.
    Ready,
}

/// Errors returned by session operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    /// The operation needs a mounted surface.
    #[error("the map has not been mounted")]
    NotMounted,
    /// Reloading the dataset failed.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// Pipeline steps ran out of order.
    #[error(transparent)]
    Render(#[from] RenderPreconditionError),
}

/// Summary of one pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineReport {
    /// Features bound to the POI source.
    pub features: usize,
    /// Camera fit, when the dataset had coordinates.
    pub fit: Option<FitBounds>,
    /// Icon ids whose load failed during this run.
    pub failed_icons: Vec<String>,
}

/// Result of [`MapSession::mount`].
#[derive(Debug, Clone, PartialEq)]
pub enum MountOutcome {
    /// The pipeline ran to completion.
    Rendered(PipelineReport),
    /// The dataset failed to load; the surface stays live without layers.
    Empty(LoadError),
    /// A surface already exists; nothing was created.
    AlreadyMounted,
}

struct MapView<S> {
    surface: S,
    layers: LayerManager,
    icons: IconRegistry,
    interaction: InteractionController,
}

impl<S: MapSurface> MapView<S> {
    fn new(surface: S) -> Self {
        Self {
            surface,
            layers: LayerManager::new(),
            icons: IconRegistry::new(),
            interaction: InteractionController::new(),
        }
    }

    /// Synchronous part of the pipeline; returns the icon loads to drive.
    fn render<'l, L>(
        &mut self,
        options: &MapOptions,
        builder: &FeatureCollectionBuilder,
        fitter: &ViewportFitter,
        records: &[PoiRecord],
        loader: &'l L,
    ) -> Result<(Option<FitBounds>, Vec<PendingIcon<'l>>), RenderPreconditionError>
    where
        L: IconLoader + ?Sized,
    {
        let collection = builder.build(records);
        let first_render = self.layers.source_state() == SourceState::Unbound;
        if first_render {
            self.layers.bind_source(&mut self.surface, &collection)?;
        } else {
            self.layers.replace_data(&mut self.surface, &collection)?;
        }

        let pending: Vec<PendingIcon<'l>> = options
            .icons
            .iter()
            .filter_map(|icon| {
                self.icons
                    .ensure_loaded(&self.surface, &icon.id, &icon.path, loader)
            })
            .collect();

        if first_render {
            self.layers.add_icon_layer(&mut self.surface)?;
            self.layers.add_label_layer(&mut self.surface)?;
            self.interaction
                .bind_click(&mut self.surface, &self.layers)?;
        }

        let fit = fitter.fit(&mut self.surface, records);
        Ok((fit, pending))
    }

    async fn settle_icons(&mut self, pending: Vec<PendingIcon<'_>>) -> Vec<String> {
        let mut failed = Vec::new();
        for outcome in join_all(pending).await {
            let icon_id = outcome.icon_id.clone();
            if self.icons.settle(&mut self.surface, outcome) == IconState::Failed {
                failed.push(icon_id);
            }
        }
        failed
    }
}

/// Owns the render surface and its pipeline components.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use poimap_core::test_support::{StubIconLoader, StubPoiSource};
/// use poimap_core::{MapOptions, MapSession, MountOutcome, PoiRecord, StyleDocumentFactory};
///
/// # tokio::runtime::Builder::new_current_thread()
/// #     .build()
/// #     .expect("runtime")
/// #     .block_on(async {
/// let source = StubPoiSource::with_records(vec![PoiRecord::new(
///     "Library",
///     Coord { x: 114.05, y: 22.61 },
/// )]);
/// let mut session = MapSession::new(MapOptions::default());
/// let outcome = session
///     .mount(&mut StyleDocumentFactory, &source, &StubIconLoader::new())
///     .await
///     .expect("pipeline should run");
///
/// assert!(matches!(outcome, MountOutcome::Rendered(report) if report.features == 1));
/// # });
/// ```
pub struct MapSession<S> {
    options: MapOptions,
    state: InitState,
    builder: FeatureCollectionBuilder,
    fitter: ViewportFitter,
    view: Option<MapView<S>>,
}

impl<S: MapSurface> MapSession<S> {
    /// Unmounted session.
    #[must_use]
    pub fn new(options: MapOptions) -> Self {
        Self {
            options,
            state: InitState::Uninitialized,
            builder: FeatureCollectionBuilder::new(),
            fitter: ViewportFitter::default(),
            view: None,
        }
    }

    /// Use a custom feature builder.
    #[must_use]
    pub const fn with_builder(mut self, builder: FeatureCollectionBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// Use custom viewport fit parameters.
    #[must_use]
    pub const fn with_fitter(mut self, fitter: ViewportFitter) -> Self {
        self.fitter = fitter;
        self
    }

    /// Current guard state.
    #[must_use]
    pub const fn state(&self) -> InitState {
        self.state
    }

    /// Options the surface is mounted with.
    #[must_use]
    pub const fn options(&self) -> &MapOptions {
        &self.options
    }

    /// The mounted surface.
    #[must_use]
    pub fn surface(&self) -> Option<&S> {
        self.view.as_ref().map(|view| &view.surface)
    }

    /// Icon registry of the mounted surface.
    #[must_use]
    pub fn icons(&self) -> Option<&IconRegistry> {
        self.view.as_ref().map(|view| &view.icons)
    }

    /// Consume the session and return the surface.
    #[must_use]
    pub fn into_surface(self) -> Option<S> {
        self.view.map(|view| view.surface)
    }

    /// Create the surface and run the pipeline once.
    ///
    /// Later calls return [`MountOutcome::AlreadyMounted`] without creating
    /// anything, even when the first mount is still in flight or ended
    /// with an empty map.
    ///
    /// # Errors
    ///
    /// [`SessionError::Render`] if pipeline steps run out of order. Load
    /// failures are not errors; they yield [`MountOutcome::Empty`].
    pub async fn mount<F, P, L>(
        &mut self,
        factory: &mut F,
        source: &P,
        loader: &L,
    ) -> Result<MountOutcome, SessionError>
    where
        F: SurfaceFactory<Surface = S> + ?Sized,
        P: PoiSource + ?Sized,
        L: IconLoader + ?Sized,
    {
        if self.state != InitState::Uninitialized {
            debug!("map already mounted ({:?}); skipping", self.state);
            return Ok(MountOutcome::AlreadyMounted);
        }
        self.state = InitState::Initializing;
        let surface = factory.create(&self.options);
        info!("mounted map surface in #{}", self.options.container);
        self.view = Some(MapView::new(surface));

        let outcome = match source.load().await {
            Ok(records) => MountOutcome::Rendered(self.run_pipeline(&records, loader).await?),
            Err(err) => {
                error!("failed to load POI data, rendering an empty map: {err}");
                MountOutcome::Empty(err)
            }
        };
        self.state = InitState::Ready;
        Ok(outcome)
    }

    /// Re-fetch the dataset and replace the bound data wholesale.
    ///
    /// After a mount that ended empty this performs the full layer setup.
    ///
    /// # Errors
    ///
    /// [`SessionError::NotMounted`] before a successful mount, or
    /// [`SessionError::Load`] when the fetch fails; the previous data then
    /// stays bound.
    pub async fn reload<P, L>(&mut self, source: &P, loader: &L) -> Result<PipelineReport, SessionError>
    where
        P: PoiSource + ?Sized,
        L: IconLoader + ?Sized,
    {
        if self.view.is_none() {
            return Err(SessionError::NotMounted);
        }
        let records = source.load().await.inspect_err(|err| {
            error!("failed to reload POI data, keeping the current map: {err}");
        })?;
        self.run_pipeline(&records, loader).await
    }

    /// Forward a host click to the interaction controller.
    ///
    /// Returns `None` when unmounted or when the click selects nothing.
    pub fn dispatch_click(&mut self, event: &ClickEvent) -> Option<ClickResponse> {
        let view = self.view.as_mut()?;
        view.interaction.handle_click(&mut view.surface, event)
    }

    async fn run_pipeline<L>(
        &mut self,
        records: &[PoiRecord],
        loader: &L,
    ) -> Result<PipelineReport, SessionError>
    where
        L: IconLoader + ?Sized,
    {
        let view = self.view.as_mut().ok_or(SessionError::NotMounted)?;
        let (fit, pending) =
            view.render(&self.options, &self.builder, &self.fitter, records, loader)?;
        let failed_icons = view.settle_icons(pending).await;
        info!(
            "rendered {} POI features ({} icon loads failed)",
            records.len(),
            failed_icons.len()
        );
        Ok(PipelineReport {
            features: records.len(),
            fit,
            failed_icons,
        })
    }
}
