use crate::i18n::Language;
use anyhow::{Context, Result};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,

    // Dataset (embedded fixture when unset)
    pub events_fixture: Option<String>,

    // Localization
    pub default_language: Language,

    // Simulated latency
    pub query_latency: Duration,
    pub booking_latency: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let default_locale =
            std::env::var("DEFAULT_LOCALE").unwrap_or_else(|_| "en".to_string());

        Ok(Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),

            events_fixture: std::env::var("EVENTS_FIXTURE")
                .ok()
                .filter(|v| !v.trim().is_empty()),

            default_language: Language::from_code(&default_locale)
                .context("DEFAULT_LOCALE must be a supported language")?,

            query_latency: Duration::from_millis(
                std::env::var("QUERY_LATENCY_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(0),
            ),
            booking_latency: Duration::from_millis(
                std::env::var("BOOKING_LATENCY_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(1000),
            ),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            events_fixture: None,
            default_language: Language::canonical(),
            query_latency: Duration::ZERO,
            booking_latency: Duration::from_millis(1000),
        }
    }
}
