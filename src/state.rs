use std::{sync::Arc, time::Duration};

use redis::aio::ConnectionManager;

use super::{
    checkout::{CheckoutResolver, RedisClickStore},
    config::Config,
    database::init_redis,
};

pub struct AppState {
    pub config: Config,
    pub redis_connection: ConnectionManager,
    pub checkout: CheckoutResolver<RedisClickStore>,
}

impl AppState {
    pub async fn new() -> Arc<Self> {
        let config = Config::load();

        let redis_connection = init_redis(&config.redis_url).await;

        let checkout = CheckoutResolver::new(
            RedisClickStore::new(redis_connection.clone()),
            config.checkout_url.clone(),
            Duration::from_millis(config.checkout_delay_ms),
        );

        Arc::new(Self {
            config,
            redis_connection,
            checkout,
        })
    }
}
