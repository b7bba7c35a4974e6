use std::sync::Arc;

use crate::config::Settings;
use crate::error::Result;
use crate::services::Analyzer;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self> {
        let analyzer = Analyzer::from_settings(&settings)?;
        Ok(Self {
            analyzer: Arc::new(analyzer),
            settings: Arc::new(settings),
        })
    }
}
