use std::sync::Arc;

use common::storage::BlobStore;
use sea_orm::DatabaseConnection;

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    pub blob_store: Arc<dyn BlobStore>,
}

impl AppState {
    /// Base URL for hypermedia links.
    pub fn api_base(&self) -> String {
        self.config.api_base()
    }
}
