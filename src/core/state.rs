use super::config::AppConfig;
use crate::screen::HoldingsScreen;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub screen: Arc<HoldingsScreen>,
}
