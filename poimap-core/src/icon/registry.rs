//! Idempotent icon registration.

use std::collections::HashMap;

use futures_util::future::LocalBoxFuture;
use log::{debug, warn};

use super::error::IconLoadError;
use super::loader::{IconImage, IconLoader};
use crate::surface::MapSurface;

/// Lifecycle of an icon id. Unregistered ids have no state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconState {
    /// A load has been handed out and not yet settled.
    Loading,
    /// The image is available on the surface.
    Registered,
    /// The load failed; the id stays unregistered for the map's lifetime.
    Failed,
}

/// Result of one icon load, ready to be settled into the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconOutcome {
    /// Icon id the load was requested for.
    pub icon_id: String,
    /// Resource path that was loaded.
    pub path: String,
    /// Loaded image or the failure.
    pub result: Result<IconImage, IconLoadError>,
}

/// A load that has not started yet; it runs when first polled.
pub type PendingIcon<'l> = LocalBoxFuture<'l, IconOutcome>;

/// Tracks which icon ids have been requested, registered or failed.
///
/// # Examples
///
/// ```rust
/// use poimap_core::test_support::StubIconLoader;
/// use poimap_core::{IconRegistry, IconState, MapOptions, StyleDocument};
///
/// let mut surface = StyleDocument::new(MapOptions::default());
/// let loader = StubIconLoader::new();
/// let mut registry = IconRegistry::new();
///
/// let first = registry.ensure_loaded(&surface, "base-icon", "/icon/base.png", &loader);
/// let second = registry.ensure_loaded(&surface, "base-icon", "/icon/base.png", &loader);
/// assert!(first.is_some());
/// assert!(second.is_none());
/// assert_eq!(registry.state("base-icon"), Some(IconState::Loading));
/// ```
#[derive(Debug, Default)]
pub struct IconRegistry {
    states: HashMap<String, IconState>,
}

impl IconRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state of `icon_id`, or `None` when never requested.
    #[must_use]
    pub fn state(&self, icon_id: &str) -> Option<IconState> {
        self.states.get(icon_id).copied()
    }

    /// Whether `icon_id` is available on the surface.
    #[must_use]
    pub fn is_registered(&self, icon_id: &str) -> bool {
        self.state(icon_id) == Some(IconState::Registered)
    }

    /// Request `icon_id` from `path` unless it is already known.
    ///
    /// Returns `None` when the id is loading, registered, failed, or already
    /// present on the surface. Otherwise the id is marked loading and the
    /// returned future performs the load when polled; pass its output to
    /// [`IconRegistry::settle`].
    pub fn ensure_loaded<'l, S, L>(
        &mut self,
        surface: &S,
        icon_id: &str,
        path: &str,
        loader: &'l L,
    ) -> Option<PendingIcon<'l>>
    where
        S: MapSurface + ?Sized,
        L: IconLoader + ?Sized,
    {
        if let Some(state) = self.state(icon_id) {
            debug!("icon {icon_id} already requested ({state:?}); skipping load");
            return None;
        }
        if surface.has_image(icon_id) {
            debug!("icon {icon_id} already present on the surface");
            self.states.insert(icon_id.to_owned(), IconState::Registered);
            return None;
        }

        self.states.insert(icon_id.to_owned(), IconState::Loading);
        let owned_id = icon_id.to_owned();
        let owned_path = path.to_owned();
        Some(Box::pin(async move {
            let result = loader.load(&owned_path).await;
            IconOutcome {
                icon_id: owned_id,
                path: owned_path,
                result,
            }
        }))
    }

    /// Record a finished load, registering the image on success.
    ///
    /// Failures are logged and leave the id in [`IconState::Failed`]; they
    /// never propagate.
    pub fn settle<S>(&mut self, surface: &mut S, outcome: IconOutcome) -> IconState
    where
        S: MapSurface + ?Sized,
    {
        let IconOutcome {
            icon_id,
            path,
            result,
        } = outcome;
        let state = match result {
            Ok(image) => {
                if !surface.has_image(&icon_id) {
                    surface.add_image(&icon_id, image);
                }
                IconState::Registered
            }
            Err(err) => {
                warn!("icon {icon_id} unavailable, rendering without it: {err}");
                IconState::Failed
            }
        };
        debug!("icon {icon_id} from {path} settled as {state:?}");
        self.states.insert(icon_id, state);
        state
    }
}
