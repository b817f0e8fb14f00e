//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::analysis::AnalysisService;
use crate::config::Config;
use std::sync::Arc;
use trendlens_core::ports::ProfileStore;

//=========================================================================================
// AppState (Shared Across All Connections)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
///
/// Both services are injected here rather than reached through globals, so
/// tests can stand up a fresh store per case.
#[derive(Clone)]
pub struct AppState {
    pub profiles: Arc<dyn ProfileStore>,
    pub analysis: Arc<AnalysisService>,
    pub config: Arc<Config>,
}
