//! Shared handler state

use std::sync::Arc;

use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

/// State injected into every handler through axum `State`
///
/// Cloning is cheap: the pool is reference counted and the config is behind an `Arc`.
#[derive(Clone)]
pub struct ServerState {
    pub config: Arc<Config>,
    pub db: DbService,
}

impl ServerState {
    pub fn new(config: Config, db: DbService) -> Self {
        Self {
            config: Arc::new(config),
            db,
        }
    }

    /// Open the configured database and build the state around it
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.db_file).await?;
        Ok(Self::new(config.clone(), db))
    }
}
