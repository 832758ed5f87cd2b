use std::sync::Arc;

use cache::{CacheStore, DirectoryCache};
use config::Config;
use sankhya::{DirectoryService, Endpoints, SettleDelays};

pub mod cache;
pub mod config;
pub mod error;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod sankhya;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub directory: Arc<DirectoryService>,
    pub directory_cache: DirectoryCache,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn CacheStore>, endpoints: Endpoints) -> Self {
        let settle = SettleDelays {
            manager: config.settle_delay_manager(),
            seller: config.settle_delay_seller(),
        };
        let directory = Arc::new(DirectoryService::new(
            config.credentials.clone(),
            endpoints,
            settle,
        ));
        let directory_cache = DirectoryCache::new(store, directory.clone(), config.cache_ttl());

        Self {
            config,
            directory,
            directory_cache,
        }
    }
}
