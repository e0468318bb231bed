//! Application state.
//!
//! The only global is [`AppState`], an immutable handle to the backend service
//! and the loaded configuration. Each view owns its own reducer state from the
//! submodules and nothing else is shared.

pub mod gallery;
pub mod generator;
pub mod shell;
pub mod text_field;

use crate::api::MemeForgeService;
use crate::config::Config;
use gpui::*;
use std::sync::Arc;

pub struct AppState {
    pub service: Arc<MemeForgeService>,
    pub config: Config,
}

impl Global for AppState {}

impl AppState {
    pub fn new(service: MemeForgeService, config: Config) -> Self {
        Self {
            service: Arc::new(service),
            config,
        }
    }
}
