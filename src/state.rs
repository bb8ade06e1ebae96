//! Shared application state for request handlers.

use std::sync::Arc;

use crate::cache::CacheProbe;
use crate::config::{EnvSnapshot, ServiceSettings};
use crate::status::StatusResponder;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<ServiceSettings>,
    pub snapshot: Arc<EnvSnapshot>,
    pub responder: StatusResponder,
}

impl AppState {
    /// Creates the state from settings, the active snapshot and a cache probe.
    pub fn new(
        settings: ServiceSettings,
        snapshot: EnvSnapshot,
        probe: Arc<dyn CacheProbe>,
    ) -> Self {
        let responder = StatusResponder::new(settings.layout, probe);
        Self {
            settings: Arc::new(settings),
            snapshot: Arc::new(snapshot),
            responder,
        }
    }
}
