use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::{env, time::Duration};

use crate::models::calendar::WorkingCalendar;

pub const DEFAULT_HOLIDAYS_URL: &str = "https://content.capta.co/Recruitment/WorkingDays.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub holidays_url: String,
    pub port: u16,
    pub holidays_cache_ttl_seconds: u64,
    pub holidays_fetch_timeout_seconds: u64,
    pub cors_allow_origins: Vec<String>,
    pub calendar: WorkingCalendar,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            holidays_url: DEFAULT_HOLIDAYS_URL.to_string(),
            port: 3000,
            holidays_cache_ttl_seconds: 12 * 60 * 60,
            holidays_fetch_timeout_seconds: 10,
            cors_allow_origins: vec!["*".to_string()],
            calendar: WorkingCalendar::default(),
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let holidays_url = lookup("HOLIDAYS_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.holidays_url);

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| anyhow!("Invalid PORT value: {}", raw))?,
            None => defaults.port,
        };

        let holidays_cache_ttl_seconds = lookup("HOLIDAYS_CACHE_TTL_SECONDS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.holidays_cache_ttl_seconds);

        let holidays_fetch_timeout_seconds = lookup("HOLIDAYS_FETCH_TIMEOUT_SECONDS")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.holidays_fetch_timeout_seconds);

        let cors_allow_origins = lookup("CORS_ALLOW_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect::<Vec<_>>()
            })
            .filter(|origins| !origins.is_empty())
            .unwrap_or(defaults.cors_allow_origins);

        Ok(Config {
            holidays_url,
            port,
            holidays_cache_ttl_seconds,
            holidays_fetch_timeout_seconds,
            cors_allow_origins,
            calendar: defaults.calendar,
        })
    }

    pub fn holidays_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.holidays_cache_ttl_seconds)
    }

    pub fn holidays_fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.holidays_fetch_timeout_seconds)
    }
}
