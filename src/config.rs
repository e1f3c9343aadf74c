use std::{env, fmt::Display, fs::read_to_string, str::FromStr};

use tracing::{info, warn};
use url::Url;

use crate::checkout::official_checkout_url;

pub struct Config {
    pub port: u16,
    pub redis_url: String,
    pub checkout_url: String,
    pub checkout_delay_ms: u64,
    pub admin_key: String,
}

impl Config {
    pub fn load() -> Self {
        let checkout_url: String = try_load("CHECKOUT_URL", &official_checkout_url());

        Url::parse(&checkout_url).expect("CHECKOUT_URL misconfigured!");

        Self {
            port: try_load("RUST_PORT", "1111"),
            redis_url: try_load("REDIS_URL", "redis://127.0.0.1:6379"),
            checkout_url,
            checkout_delay_ms: try_load("CHECKOUT_DELAY_MS", "800"),
            admin_key: read_secret("ADMIN_KEY"),
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}

fn read_secret(secret_name: &str) -> String {
    let path = format!("/run/secrets/{secret_name}");

    read_to_string(&path)
        .map(|s| s.trim().to_string())
        .map_err(|e| {
            warn!("Failed to read {secret_name} from file: {e}");
        })
        .expect("Secrets misconfigured!")
}
