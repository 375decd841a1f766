//! Event query engine.
//!
//! Every operation localizes the source records for the requested language
//! and derives a fresh result; the source is never mutated.
//!
//! ```text
//! EventSource ──localize(lang)──> Vec<Event> ──predicates (AND)──> sort by date ──> result
//! ```

pub mod countries;
pub mod filters;

pub use countries::{CountryGroup, COUNTRY_GROUPS};
pub use filters::{EventFilters, FilterError, FilterParams, Predicate, PriceRange};

use crate::dataset::EventSource;
use crate::i18n::Language;
use crate::model::Event;
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// A distinct country value, with the filter key and display label of its
/// group when one matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryOption {
    pub key: Option<&'static str>,
    pub label: Option<&'static str>,
    pub name: String,
}

#[derive(Clone)]
pub struct QueryEngine {
    source: Arc<dyn EventSource>,
}

impl QueryEngine {
    pub fn new(source: Arc<dyn EventSource>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &dyn EventSource {
        self.source.as_ref()
    }

    fn localized(&self, language: Language) -> impl Iterator<Item = Event> + '_ {
        self.source
            .all()
            .iter()
            .map(move |record| record.localize(language))
    }

    /// Filter and sort the catalogue.
    ///
    /// Filters narrow the set in a fixed order and combine with AND. The
    /// result is ordered by start time, earliest first; ties keep fixture
    /// order. An empty result is not an error.
    pub fn list_events(&self, filters: &EventFilters, language: Language) -> Vec<Event> {
        let mut events: Vec<Event> = self.localized(language).collect();

        for predicate in filters.predicates() {
            events.retain(|event| predicate.matches(event));
        }

        // Stable, so equal start times keep their fixture order
        events.sort_by_key(|event| event.date);

        debug!(
            "Listed {} events for {} with {:?}",
            events.len(),
            language,
            filters
        );

        events
    }

    /// Find one event by slug (in either language, percent-decoded) or, failing
    /// that, by id. `None` is the ordinary not-found outcome.
    pub fn get_event_by_slug(&self, slug: &str, language: Language) -> Option<Event> {
        self.source
            .find_by_slug(slug)
            .or_else(|| self.source.get(slug))
            .map(|record| record.localize(language))
    }

    /// Featured events in fixture order.
    pub fn featured_events(&self, language: Language) -> Vec<Event> {
        self.localized(language)
            .filter(|event| event.featured)
            .collect()
    }

    /// Distinct categories, sorted.
    pub fn categories(&self, language: Language) -> Vec<String> {
        self.localized(language)
            .map(|event| event.category)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct cities, sorted.
    pub fn locations(&self, language: Language) -> Vec<String> {
        self.localized(language)
            .map(|event| event.location.city)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Distinct countries, sorted, each tagged with its country-group key.
    pub fn countries(&self, language: Language) -> Vec<CountryOption> {
        self.localized(language)
            .map(|event| event.location.country)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|name| {
                let group = countries::group_for_country(&name);
                CountryOption {
                    key: group.map(|g| g.key),
                    label: group.map(|g| g.name(language)),
                    name,
                }
            })
            .collect()
    }
}
