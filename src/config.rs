//! Runtime settings read from the environment (after `.env` is loaded).

use anyhow::{Context, Result, bail};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:8001/api/v1";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    /// `PARKING_API_URL`
    pub api_url: String,
    /// `PARKING_API_TOKEN`, sent as a bearer token when set.
    pub api_token: Option<String>,
    /// `PARKING_HTTP_TIMEOUT_SECS`
    pub timeout: Duration,
    /// `PARKING_ZONES_FILE`, JSON zone list replacing the built-in one.
    pub zones_file: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            zones_file: None,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup. Empty values count as
    /// unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let timeout = match get("PARKING_HTTP_TIMEOUT_SECS") {
            Some(v) => {
                let secs: u64 = v
                    .trim()
                    .parse()
                    .with_context(|| format!("PARKING_HTTP_TIMEOUT_SECS is not a number: '{v}'"))?;
                if secs == 0 {
                    bail!("PARKING_HTTP_TIMEOUT_SECS must be at least 1");
                }
                Duration::from_secs(secs)
            }
            None => defaults.timeout,
        };

        Ok(Self {
            api_url: get("PARKING_API_URL").unwrap_or(defaults.api_url),
            api_token: get("PARKING_API_TOKEN"),
            timeout,
            zones_file: get("PARKING_ZONES_FILE"),
        })
    }
}
