//! Repository for the single application configuration document.

use crate::models::config::AppConfigDoc;
use crate::Store;

pub struct ConfigRepo;

impl ConfigRepo {
    pub async fn get(store: &Store) -> Option<AppConfigDoc> {
        store.app_config.read().await.clone()
    }

    pub async fn set(store: &Store, config: AppConfigDoc) {
        *store.app_config.write().await = Some(config);
    }
}
