//! services/web/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use house_numbers_core::ports::{AuthService, SummarizationService};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
///
/// Nothing in here is mutated after startup; per-page view state is rebuilt on
/// every request from the submitted form.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth: Arc<dyn AuthService>,
    pub summarizer: Arc<dyn SummarizationService>,
}
