//! Application state and dependency injection.

mod config;

use coderefactor_core::inference::InferenceService;
use coderefactor_core::storage::ArtifactStore;

pub use crate::service::config::{DEFAULT_PRIMARY_MODEL, DEFAULT_SECONDARY_MODEL, ServiceConfig};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    // External services:
    pub inference: InferenceService,
    pub artifacts: ArtifactStore,

    // Configuration:
    pub config: ServiceConfig,
}

impl ServiceState {
    /// Assembles application state from already connected services.
    pub fn new(
        config: ServiceConfig,
        inference: InferenceService,
        artifacts: ArtifactStore,
    ) -> Self {
        Self {
            inference,
            artifacts,
            config,
        }
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

// External services:
impl_di!(inference: InferenceService);
impl_di!(artifacts: ArtifactStore);

// Configuration:
impl_di!(config: ServiceConfig);
