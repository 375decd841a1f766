//! Event filters and the predicates they compile to.

use crate::model::Event;
use crate::query::countries::{self, CountryGroup};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Filter value meaning "no constraint".
pub const ALL: &str = "all";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("invalid {field} '{value}': expected YYYY-MM-DD or an RFC 3339 timestamp")]
    InvalidDate { field: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PriceRange {
    #[default]
    All,
    Free,
    Paid,
}

impl PriceRange {
    /// Unknown values impose no constraint.
    pub fn from_param(value: &str) -> Self {
        match value.trim() {
            "free" => PriceRange::Free,
            "paid" => PriceRange::Paid,
            _ => PriceRange::All,
        }
    }
}

/// Raw filter values as they arrive in a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

/// A set of independent constraints. Unset fields impose nothing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventFilters {
    pub search: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub country: Option<String>,
    pub price_range: PriceRange,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

impl EventFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build filters from query parameters. Blank values and the `"all"`
    /// sentinel (for category and country) are dropped.
    pub fn from_params(params: &FilterParams) -> Result<Self, FilterError> {
        Ok(Self {
            search: present(params.search.as_deref()),
            category: present(params.category.as_deref()).filter(|c| c != ALL),
            location: present(params.location.as_deref()),
            country: present(params.country.as_deref()).filter(|c| c != ALL),
            price_range: params
                .price_range
                .as_deref()
                .map(PriceRange::from_param)
                .unwrap_or_default(),
            start_date: parse_bound("startDate", params.start_date.as_deref())?,
            end_date: parse_bound("endDate", params.end_date.as_deref())?,
        })
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_country(mut self, key: impl Into<String>) -> Self {
        self.country = Some(key.into());
        self
    }

    pub fn with_price_range(mut self, price_range: PriceRange) -> Self {
        self.price_range = price_range;
        self
    }

    pub fn with_date_range(
        mut self,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Compile to predicates in evaluation order: search, category, location,
    /// country, price, start bound, end bound. Text values are trimmed; blank
    /// ones, and `"all"` for category and country, compile to nothing.
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::new();

        if let Some(search) = constraint(&self.search) {
            predicates.push(Predicate::Search(search.to_lowercase()));
        }
        if let Some(category) = constraint(&self.category).filter(|c| *c != ALL) {
            predicates.push(Predicate::Category(category.to_string()));
        }
        if let Some(location) = constraint(&self.location) {
            predicates.push(Predicate::Location(location.to_lowercase()));
        }
        if let Some(key) = constraint(&self.country).filter(|c| *c != ALL) {
            predicates.push(Predicate::Country(countries::find_group(key)));
        }
        match self.price_range {
            PriceRange::All => {}
            range => predicates.push(Predicate::Price(range)),
        }
        if let Some(start) = self.start_date {
            predicates.push(Predicate::StartsOnOrAfter(start));
        }
        if let Some(end) = self.end_date {
            predicates.push(Predicate::StartsOnOrBefore(end));
        }

        predicates
    }
}

/// A single constraint over a projected event.
#[derive(Debug, Clone)]
pub enum Predicate {
    /// Lowercased term found in title, description, any tag or category.
    Search(String),
    /// Exact, case-sensitive category.
    Category(String),
    /// Lowercased term found in city, country or venue.
    Location(String),
    /// Country group; `None` for an unknown key, which matches nothing.
    Country(Option<&'static CountryGroup>),
    Price(PriceRange),
    StartsOnOrAfter(DateTime<Utc>),
    StartsOnOrBefore(DateTime<Utc>),
}

impl Predicate {
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            Predicate::Search(term) => {
                contains(&event.title, term)
                    || contains(&event.description, term)
                    || event.tags.iter().any(|tag| contains(tag, term))
                    || contains(&event.category, term)
            }
            Predicate::Category(category) => event.category == *category,
            Predicate::Location(term) => {
                contains(&event.location.city, term)
                    || contains(&event.location.country, term)
                    || contains(&event.location.venue, term)
            }
            Predicate::Country(group) => group.is_some_and(|g| g.matches(&event.location.country)),
            Predicate::Price(PriceRange::Free) => event.price.is_free(),
            Predicate::Price(PriceRange::Paid) => !event.price.is_free(),
            Predicate::Price(PriceRange::All) => true,
            Predicate::StartsOnOrAfter(start) => event.date >= *start,
            Predicate::StartsOnOrBefore(end) => event.date <= *end,
        }
    }
}

/// `needle` must already be lowercase.
fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn constraint(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn present(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Date-only values mean midnight UTC of that day.
fn parse_bound(field: &'static str, value: Option<&str>) -> Result<Option<DateTime<Utc>>, FilterError> {
    let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc()));
    }

    DateTime::parse_from_rfc3339(value)
        .map(|dt| Some(dt.with_timezone(&Utc)))
        .map_err(|_| FilterError::InvalidDate {
            field,
            value: value.to_string(),
        })
}
