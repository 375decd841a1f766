//! Localized (English/Arabic) event discovery.
//!
//! A static fixture of events, each carrying its text in both languages, is
//! loaded once and served read-only. The query engine projects it onto the
//! requested language, filters and sorts it; the `api` module exposes that
//! over HTTP together with a mock booking endpoint.

pub mod api;
pub mod booking;
pub mod client;
pub mod config;
pub mod dataset;
pub mod i18n;
pub mod localize;
pub mod model;
pub mod query;

pub use dataset::{EventSource, FixtureDataset};
pub use i18n::Language;
pub use model::{Event, LocalizedEvent, Price};
pub use query::{EventFilters, PriceRange, QueryEngine};
