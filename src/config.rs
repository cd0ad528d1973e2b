use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

/// Simulated latency of backend calls (login, social login)
pub const DEFAULT_LATENCY_MS: u64 = 1500;

/// Simulated session check at startup
pub const DEFAULT_STARTUP_MS: u64 = 1000;

pub const DEFAULT_USER_HANDLE: &str = "@johndoe";

/// Maximum post length, also applied to listing descriptions
pub const MAX_POST_CHARS: usize = 280;

/// Counter turns to "near limit" at this many remaining characters
pub const NEAR_LIMIT_CHARS: i64 = 20;

pub const MIN_PASSWORD_CHARS: usize = 6;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub latency: Duration,
    pub startup_delay: Duration,
    pub user_handle: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            latency: Duration::from_millis(DEFAULT_LATENCY_MS),
            startup_delay: Duration::from_millis(DEFAULT_STARTUP_MS),
            user_handle: DEFAULT_USER_HANDLE.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            latency: millis_var("CHIRP_LATENCY_MS", DEFAULT_LATENCY_MS)?,
            startup_delay: millis_var("CHIRP_STARTUP_MS", DEFAULT_STARTUP_MS)?,
            user_handle: env::var("CHIRP_USER_HANDLE")
                .unwrap_or_else(|_| DEFAULT_USER_HANDLE.to_string()),
        })
    }

    /// No simulated delays; used by tests
    pub fn instant() -> Self {
        Self {
            latency: Duration::ZERO,
            startup_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}

fn millis_var(name: &str, default: u64) -> Result<Duration> {
    let ms = match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("{} must be a whole number of milliseconds", name))?,
        Err(_) => default,
    };
    Ok(Duration::from_millis(ms))
}
