//! Query events binary - runs a filter query against the fixture and prints JSON
//!
//! Usage:
//!   cargo run --bin query-events                                  # All events, default locale
//!   cargo run --bin query-events -- --locale ar --country uae     # Arabic, UAE only
//!   cargo run --bin query-events -- --search jazz --price free
//!   cargo run --bin query-events -- --slug tech-summit-dubai-2025 # Single event
//!   cargo run --bin query-events -- --remote http://localhost:3000 --category Music
//!
//! Flags: --locale, --search, --category, --location, --country, --price,
//!        --from, --to, --slug, --remote
//!
//! Optional environment:
//! - EVENTS_FIXTURE (defaults to the embedded fixture)
//! - DEFAULT_LOCALE (defaults to en)

use anyhow::{bail, Context, Result};
use event_discovery::client::ApiClient;
use event_discovery::config::Config;
use event_discovery::query::FilterParams;
use event_discovery::{EventFilters, FixtureDataset, Language, QueryEngine};
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Default)]
struct Args {
    locale: Option<String>,
    slug: Option<String>,
    remote: Option<String>,
    filters: FilterParams,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut parsed = Args::default();
    let mut iter = args.iter();

    while let Some(flag) = iter.next() {
        let mut value = || {
            iter.next()
                .cloned()
                .with_context(|| format!("Missing value for {}", flag))
        };

        match flag.as_str() {
            "--locale" => parsed.locale = Some(value()?),
            "--slug" => parsed.slug = Some(value()?),
            "--remote" => parsed.remote = Some(value()?),
            "--search" => parsed.filters.search = Some(value()?),
            "--category" => parsed.filters.category = Some(value()?),
            "--location" => parsed.filters.location = Some(value()?),
            "--country" => parsed.filters.country = Some(value()?),
            "--price" => parsed.filters.price_range = Some(value()?),
            "--from" => parsed.filters.start_date = Some(value()?),
            "--to" => parsed.filters.end_date = Some(value()?),
            other => bail!("Unknown argument: {}", other),
        }
    }

    Ok(parsed)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("event_discovery=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    // Load environment from .env file
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&args)?;

    let config = Config::from_env()?;
    let language = match &args.locale {
        Some(code) => Language::from_code(code)?,
        None => config.default_language,
    };

    let output = if let Some(base_url) = &args.remote {
        info!("Querying {} ({})", base_url, language);
        let client = ApiClient::new(base_url.as_str()).with_locale(language);

        match &args.slug {
            Some(slug) => serde_json::to_string_pretty(&client.fetch_event(slug).await?)?,
            None => serde_json::to_string_pretty(&client.fetch_events(&args.filters).await?)?,
        }
    } else {
        let dataset = FixtureDataset::load(config.events_fixture.as_deref())
            .context("Failed to load event fixture")?;
        let engine = QueryEngine::new(Arc::new(dataset));

        match &args.slug {
            Some(slug) => {
                serde_json::to_string_pretty(&engine.get_event_by_slug(slug, language))?
            }
            None => {
                let filters = EventFilters::from_params(&args.filters)?;
                let events = engine.list_events(&filters, language);
                info!("{} events matched", events.len());
                serde_json::to_string_pretty(&events)?
            }
        }
    };

    println!("{}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_filters() {
        let args = parse_args(&strings(&[
            "--locale", "ar", "--country", "uae", "--price", "paid", "--from", "2025-12-01",
        ]))
        .unwrap();

        assert_eq!(args.locale.as_deref(), Some("ar"));
        assert_eq!(args.filters.country.as_deref(), Some("uae"));
        assert_eq!(args.filters.price_range.as_deref(), Some("paid"));
        assert_eq!(args.filters.start_date.as_deref(), Some("2025-12-01"));
        assert!(args.slug.is_none());
    }

    #[test]
    fn test_missing_value_is_error() {
        let err = parse_args(&strings(&["--search"])).unwrap_err();
        assert!(err.to_string().contains("Missing value for --search"));
    }

    #[test]
    fn test_unknown_flag_is_error() {
        assert!(parse_args(&strings(&["--verbose"])).is_err());
    }
}
