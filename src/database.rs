//! # Redis
//!
//! RAM database.
//!
//! Core purpose is the checkout click counter and the funnel event log.
//!
//! ## Requirements
//!
//! - Atomic increments for the click counter, absent key behaves as 0
//! - Newest-first event reads for the admin metrics reduce
//! - Small dataset, the log is capped at the last 5000 events
//!
//! ## Implementation
//!
//! - Click counter: single string key + 64-bit int, INCR advances it by
//!   exactly one per checkout call even under concurrent double-fires
//! - Events: one list, LPUSH newest first, LTRIM keeps the cap, LRANGE
//!   serves bounded newest-first reads
//! - Estimated memory usage: 5000 events x ~200 bytes = roughly 1 MB
use std::time::Duration;

use redis::{
    AsyncCommands, Client,
    aio::{ConnectionManager, ConnectionManagerConfig},
};

use crate::{analytics::FunnelEvent, error::AppError};

pub const CLICK_COUNTER_KEY: &str = "checkout:clicks";
pub const EVENTS_KEY: &str = "quiz:events";
pub const EVENT_LIMIT: usize = 5000;

pub async fn init_redis(redis_url: &str) -> ConnectionManager {
    let config = ConnectionManagerConfig::new()
        .set_number_of_retries(1)
        .set_connection_timeout(Duration::from_millis(100));

    let client = Client::open(redis_url).unwrap();
    let connection_manager = client
        .get_connection_manager_with_config(config)
        .await
        .unwrap();

    connection_manager
}

pub async fn push_event(
    connection: &ConnectionManager,
    event: &FunnelEvent,
) -> Result<(), AppError> {
    let mut connection = connection.clone();
    let encoded = serde_json::to_string(event)?;

    #[cfg(feature = "verbose")]
    tracing::info!("Recording {:?} for session {}", event.event_type, event.session_id);

    connection.lpush::<_, _, ()>(EVENTS_KEY, encoded).await?;
    connection
        .ltrim::<_, ()>(EVENTS_KEY, 0, EVENT_LIMIT as isize - 1)
        .await?;

    Ok(())
}

pub async fn recent_events(
    connection: &ConnectionManager,
    limit: usize,
) -> Result<Vec<FunnelEvent>, AppError> {
    let mut connection = connection.clone();

    let raw: Vec<String> = connection
        .lrange(EVENTS_KEY, 0, limit as isize - 1)
        .await?;

    // Entries that fail to decode are skipped rather than poisoning the read
    Ok(raw
        .iter()
        .filter_map(|line| serde_json::from_str(line).ok())
        .collect())
}
