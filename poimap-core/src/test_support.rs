//! In-memory stubs for the pipeline's async seams.
//!
//! Used by unit and behaviour tests across the workspace. Gated behind the
//! `test-support` feature (and `cfg(test)`).

use std::cell::{Cell, RefCell};
use std::collections::HashSet;

use async_trait::async_trait;

use crate::document::{StyleDocument, StyleDocumentFactory};
use crate::icon::{IconImage, IconLoadError, IconLoader};
use crate::record::PoiRecord;
use crate::source::{LoadError, PoiSource};
use crate::surface::{MapOptions, SurfaceFactory};

/// PNG signature; enough to stand in for an icon.
pub const STUB_ICON_BYTES: [u8; 4] = [0x89, 0x50, 0x4e, 0x47];

/// [`PoiSource`] returning fixed records or a fixed error.
#[derive(Debug)]
pub struct StubPoiSource {
    result: Result<Vec<PoiRecord>, LoadError>,
    calls: Cell<usize>,
}

impl StubPoiSource {
    /// Source yielding `records`.
    #[must_use]
    pub const fn with_records(records: Vec<PoiRecord>) -> Self {
        Self {
            result: Ok(records),
            calls: Cell::new(0),
        }
    }

    /// Source failing with `error`.
    #[must_use]
    pub const fn failing(error: LoadError) -> Self {
        Self {
            result: Err(error),
            calls: Cell::new(0),
        }
    }

    /// Number of loads performed.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

#[async_trait(?Send)]
impl PoiSource for StubPoiSource {
    async fn load(&self) -> Result<Vec<PoiRecord>, LoadError> {
        self.calls.set(self.calls.get().saturating_add(1));
        self.result.clone()
    }
}

/// [`IconLoader`] serving [`STUB_ICON_BYTES`] and recording each request.
#[derive(Debug, Default)]
pub struct StubIconLoader {
    failing: HashSet<String>,
    requested: RefCell<Vec<String>>,
}

impl StubIconLoader {
    /// Loader that serves every path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make loads of `path` fail.
    #[must_use]
    pub fn failing(mut self, path: impl Into<String>) -> Self {
        self.failing.insert(path.into());
        self
    }

    /// Paths requested so far, in order.
    #[must_use]
    pub fn requested(&self) -> Vec<String> {
        self.requested.borrow().clone()
    }
}

#[async_trait(?Send)]
impl IconLoader for StubIconLoader {
    async fn load(&self, path: &str) -> Result<IconImage, IconLoadError> {
        self.requested.borrow_mut().push(path.to_owned());
        if self.failing.contains(path) {
            return Err(IconLoadError::Unavailable {
                path: path.to_owned(),
                message: "stubbed failure".to_owned(),
            });
        }
        Ok(IconImage::new(STUB_ICON_BYTES.to_vec()))
    }
}

/// [`SurfaceFactory`] counting how many surfaces it has created.
#[derive(Debug, Default)]
pub struct CountingFactory {
    created: usize,
}

impl CountingFactory {
    /// Surfaces created so far.
    #[must_use]
    pub const fn created(&self) -> usize {
        self.created
    }
}

impl SurfaceFactory for CountingFactory {
    type Surface = StyleDocument;

    fn create(&mut self, options: &MapOptions) -> StyleDocument {
        self.created = self.created.saturating_add(1);
        StyleDocumentFactory.create(options)
    }
}

/// Drive `future` to completion on a current-thread runtime.
#[cfg(test)]
#[expect(clippy::expect_used, reason = "tests should fail fast without a runtime")]
pub fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build test runtime")
        .block_on(future)
}
