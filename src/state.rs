use std::sync::Arc;

use crate::business_logic::config::LevelsConfig;
use crate::services::hyperliquid::HyperliquidClient;
use crate::services::levels::LevelService;

#[derive(Clone)]
pub struct AppState {
    pub hyperliquid: Arc<HyperliquidClient>,
    pub levels_config: LevelsConfig,
}

impl AppState {
    pub fn level_service(&self) -> LevelService<HyperliquidClient> {
        LevelService::new(self.hyperliquid.clone(), self.levels_config.clone())
    }
}
