//! Shared application state handed to every handler.

use crate::config::PortalConfig;
use crate::drafts::DraftStore;
use crate::letters::RenderEngine;
use crate::render::AssetStore;

pub struct AppState {
    pub engine: RenderEngine,
    pub drafts: DraftStore,
}

impl AppState {
    pub fn new(config: &PortalConfig) -> Self {
        log::info!("Letterhead assets: {}", config.assets_dir.display());
        Self {
            engine: RenderEngine::new(AssetStore::new(&config.assets_dir)),
            drafts: DraftStore::new(config.draft_ttl, config.draft_capacity),
        }
    }
}
