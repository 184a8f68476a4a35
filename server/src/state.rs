use std::sync::Arc;

use crate::{
    config::Config,
    database::{PersonStore, RedisPersons, init_redis},
};

pub struct AppState {
    pub persons: Arc<dyn PersonStore>,
}

impl AppState {
    pub async fn new(config: &Config) -> Arc<Self> {
        let connection = init_redis(&config.redis_url).await;

        Arc::new(Self {
            persons: Arc::new(RedisPersons::new(connection)),
        })
    }

    pub fn with_store(store: Arc<dyn PersonStore>) -> Arc<Self> {
        Arc::new(Self { persons: store })
    }
}
