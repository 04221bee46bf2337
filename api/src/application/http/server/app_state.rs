use std::sync::Arc;

use healthtrack_core::application::HealthTrackService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: HealthTrackService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: HealthTrackService) -> Self {
        Self { args, service }
    }
}
