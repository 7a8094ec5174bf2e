use std::sync::Arc;

use crate::ats::advisory::AdvisoryBlender;
use crate::ats::engine::AtsEngine;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup; requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<AtsEngine>,
    /// Optional relevance bonus. Disabled via ADVISORY_ENABLED=false.
    pub advisory: AdvisoryBlender,
    pub config: Config,
}
