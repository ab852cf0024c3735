use std::{env, fmt::Display, str::FromStr};

use anyhow::{anyhow, Result};
use tracing::info;

/// Upper bound on JSON request bodies
pub const JSON_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Upper bound on multipart upload bodies
pub const UPLOAD_LIMIT_BYTES: usize = 64 * 1024 * 1024;

pub struct ServerConfig {
    pub port: u16,
    pub allowed_origin: String,
    pub json_limit_bytes: usize,
    pub upload_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 4000,
            allowed_origin: "http://localhost:5173".to_string(),
            json_limit_bytes: JSON_LIMIT_BYTES,
            upload_limit_bytes: UPLOAD_LIMIT_BYTES,
        }
    }
}

impl ServerConfig {
    /// Listening port comes from `PORT`; everything else is fixed
    pub fn load() -> Result<Self> {
        Ok(Self {
            port: try_load("PORT", "4000")?,
            ..Self::default()
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| anyhow!("Invalid {key} value: {e}"))
}
