use std::sync::Arc;

use crate::services::{BroadcastService, TemplateStore};

pub mod broadcasts;
pub mod middleware;
pub mod router;
pub mod templates;

pub use middleware::*;

/// Shared application state, cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    pub templates: Arc<TemplateStore>,
    pub broadcast_service: BroadcastService,
}
