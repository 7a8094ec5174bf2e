use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::ats::classifier::SignalWindow;
use crate::llm_client::{DEFAULT_ENDPOINT, DEFAULT_MODEL};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub advisory_enabled: bool,
    pub advisory_url: String,
    pub advisory_model: String,
    pub advisory_timeout: Duration,
    pub signal_window: SignalWindow,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let advisory_timeout_ms = match get("ADVISORY_TIMEOUT_MS") {
            Some(v) => v
                .parse::<u64>()
                .context("ADVISORY_TIMEOUT_MS must be a positive integer")?,
            None => 8000,
        };
        if advisory_timeout_ms == 0 {
            bail!("ADVISORY_TIMEOUT_MS must be a positive integer");
        }

        let signal_window = match get("REQUIREMENT_WINDOW_BYTES") {
            Some(v) => SignalWindow::Within(
                v.parse::<usize>()
                    .context("REQUIREMENT_WINDOW_BYTES must be a non-negative integer")?,
            ),
            None => SignalWindow::Unbounded,
        };

        Ok(Config {
            port: get("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: get("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            advisory_enabled: match get("ADVISORY_ENABLED") {
                Some(v) => parse_bool(&v).context("ADVISORY_ENABLED must be true or false")?,
                None => true,
            },
            advisory_url: get("ADVISORY_URL").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            advisory_model: get("ADVISORY_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            advisory_timeout: Duration::from_millis(advisory_timeout_ms),
            signal_window,
        })
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("unrecognized boolean '{other}'"),
    }
}
