//! Icon asset loading and registration.
//!
//! [`IconRegistry`] hands out lazy loads through
//! [`IconRegistry::ensure_loaded`] and records each id as loading, registered
//! or failed. Loads are not awaited before layers are declared, so a layer
//! may reference an id that only becomes available later.

mod error;
mod loader;
mod registry;

pub use error::IconLoadError;
pub use loader::{IconImage, IconLoader};
pub use registry::{IconOutcome, IconRegistry, IconState, PendingIcon};
