//! Read-only event fixture.
//!
//! The whole fixture is loaded and validated once at startup, then served
//! through the narrow [`EventSource`] accessor. Nothing writes to it afterwards.

use crate::i18n::Language;
use crate::model::LocalizedEvent;
use serde::Serialize;
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Fixture compiled into the binary, used when no path is configured.
pub const EMBEDDED_FIXTURE: &str = include_str!("../data/events.json");

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read fixture {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed fixture: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("event has an empty id")]
    EmptyId,

    #[error("duplicate event id '{0}'")]
    DuplicateId(String),

    #[error("event '{id}' has an empty slug for '{language}'")]
    EmptySlug { id: String, language: Language },

    #[error("slug '{slug}' is used by both '{first}' and '{second}'")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },

    #[error("event '{id}' ends before it starts")]
    EndBeforeStart { id: String },

    #[error("event '{id}' has {attendees} attendees but room for {capacity}")]
    OverCapacity {
        id: String,
        attendees: u32,
        capacity: u32,
    },
}

/// Read access to the event records, independent of where they are stored.
pub trait EventSource: Send + Sync {
    /// Every record, in fixture order.
    fn all(&self) -> &[LocalizedEvent];

    fn get(&self, id: &str) -> Option<&LocalizedEvent>;

    /// Find a record by its slug in any language. Both the stored slugs and
    /// `slug` are percent-decoded before comparison.
    fn find_by_slug(&self, slug: &str) -> Option<&LocalizedEvent>;

    /// Every slug in every language, used to enumerate detail pages.
    fn slugs(&self) -> Vec<SlugEntry> {
        self.all()
            .iter()
            .flat_map(|event| {
                event.slug.iter().map(|(locale, slug)| SlugEntry {
                    slug: slug.clone(),
                    locale,
                })
            })
            .collect()
    }
}

/// A slug together with the language it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlugEntry {
    pub slug: String,
    pub locale: Language,
}

/// In-memory fixture indexed by id and by decoded slug.
#[derive(Debug, Clone)]
pub struct FixtureDataset {
    events: Vec<LocalizedEvent>,
    by_id: HashMap<String, usize>,
    by_slug: HashMap<String, usize>,
}

impl FixtureDataset {
    /// Validate `events` and build the lookup indexes.
    pub fn new(events: Vec<LocalizedEvent>) -> Result<Self, DatasetError> {
        let mut by_id = HashMap::with_capacity(events.len());
        let mut by_slug: HashMap<String, usize> = HashMap::with_capacity(events.len() * 2);

        for (index, event) in events.iter().enumerate() {
            validate_record(event)?;

            if by_id.insert(event.id.clone(), index).is_some() {
                return Err(DatasetError::DuplicateId(event.id.clone()));
            }

            for (language, slug) in event.slug.iter() {
                if slug.trim().is_empty() {
                    return Err(DatasetError::EmptySlug {
                        id: event.id.clone(),
                        language,
                    });
                }

                let key = normalize_slug(slug).into_owned();
                match by_slug.get(&key) {
                    // Same slug in both languages of one record is fine
                    Some(&existing) if existing == index => {}
                    Some(&existing) => {
                        return Err(DatasetError::DuplicateSlug {
                            slug: key,
                            first: events[existing].id.clone(),
                            second: event.id.clone(),
                        });
                    }
                    None => {
                        by_slug.insert(key, index);
                    }
                }
            }
        }

        Ok(Self {
            events,
            by_id,
            by_slug,
        })
    }

    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let events: Vec<LocalizedEvent> = serde_json::from_str(json)?;
        Self::new(events)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let dataset = Self::from_json(&json)?;
        info!("Loaded {} events from {}", dataset.len(), path.display());
        Ok(dataset)
    }

    /// Load the fixture compiled into the binary.
    pub fn embedded() -> Result<Self, DatasetError> {
        let dataset = Self::from_json(EMBEDDED_FIXTURE)?;
        info!("Loaded {} events from embedded fixture", dataset.len());
        Ok(dataset)
    }

    /// Load from `path` when given, otherwise the embedded fixture.
    pub fn load(path: Option<&str>) -> Result<Self, DatasetError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::embedded(),
        }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSource for FixtureDataset {
    fn all(&self) -> &[LocalizedEvent] {
        &self.events
    }

    fn get(&self, id: &str) -> Option<&LocalizedEvent> {
        self.by_id.get(id).map(|&index| &self.events[index])
    }

    fn find_by_slug(&self, slug: &str) -> Option<&LocalizedEvent> {
        self.by_slug
            .get(normalize_slug(slug).as_ref())
            .map(|&index| &self.events[index])
    }
}

/// Percent-decode a slug. Input that does not decode to UTF-8 is used as is.
pub fn normalize_slug(slug: &str) -> Cow<'_, str> {
    urlencoding::decode(slug).unwrap_or(Cow::Borrowed(slug))
}

fn validate_record(event: &LocalizedEvent) -> Result<(), DatasetError> {
    if event.id.trim().is_empty() {
        return Err(DatasetError::EmptyId);
    }

    if matches!(event.end_date, Some(end) if end < event.date) {
        return Err(DatasetError::EndBeforeStart {
            id: event.id.clone(),
        });
    }

    if event.attendee_count > event.max_attendees {
        return Err(DatasetError::OverCapacity {
            id: event.id.clone(),
            attendees: event.attendee_count,
            capacity: event.max_attendees,
        });
    }

    Ok(())
}
