use crate::i18n::Localized;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker the fixture uses in place of a numeric price.
pub const FREE_MARKER: &str = "free";

/// Ticket price: a number, or the `"free"` marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PriceRepr", into = "PriceRepr")]
pub enum Price {
    Free,
    Amount(f64),
}

impl Price {
    pub fn is_free(&self) -> bool {
        matches!(self, Price::Free)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum PriceRepr {
    Amount(f64),
    Marker(String),
}

impl TryFrom<PriceRepr> for Price {
    type Error = String;

    fn try_from(repr: PriceRepr) -> Result<Self, Self::Error> {
        match repr {
            PriceRepr::Marker(marker) if marker == FREE_MARKER => Ok(Price::Free),
            PriceRepr::Marker(other) => Err(format!(
                "invalid price '{}': expected a number or \"{}\"",
                other, FREE_MARKER
            )),
            PriceRepr::Amount(amount) if amount < 0.0 => {
                Err(format!("invalid price {}: must not be negative", amount))
            }
            PriceRepr::Amount(amount) => Ok(Price::Amount(amount)),
        }
    }
}

impl From<Price> for PriceRepr {
    fn from(price: Price) -> Self {
        match price {
            Price::Free => PriceRepr::Marker(FREE_MARKER.to_string()),
            Price::Amount(amount) => PriceRepr::Amount(amount),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Free => f.write_str(FREE_MARKER),
            Price::Amount(amount) => write!(f, "{}", amount),
        }
    }
}

// ==================== Fixture (all languages) ====================

/// An event as stored in the fixture, with every text field per language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedEvent {
    pub id: String,
    pub slug: Localized<String>,
    pub title: Localized<String>,
    pub description: Localized<String>,
    pub long_description: Localized<String>,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    pub location: LocalizedLocation,
    pub category: Localized<String>,
    pub tags: Localized<Vec<String>>,
    pub image_url: String,
    pub price: Price,
    pub attendee_count: u32,
    pub max_attendees: u32,
    pub organizer: LocalizedOrganizer,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedLocation {
    pub venue: Localized<String>,
    pub city: Localized<String>,
    pub state: Localized<String>,
    pub country: Localized<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedOrganizer {
    pub name: Localized<String>,
    pub avatar: String,
}

// ==================== Projection (one language) ====================

/// An event flattened to a single language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub description: String,
    pub long_description: String,
    pub date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    pub location: Location,
    pub category: String,
    pub tags: Vec<String>,
    pub image_url: String,
    pub price: Price,
    pub attendee_count: u32,
    pub max_attendees: u32,
    pub organizer: Organizer,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub venue: String,
    pub city: String,
    pub state: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Organizer {
    pub name: String,
    pub avatar: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_free_marker() {
        let price: Price = serde_json::from_str("\"free\"").unwrap();
        assert_eq!(price, Price::Free);
        assert!(price.is_free());
        assert_eq!(serde_json::to_string(&price).unwrap(), "\"free\"");
    }

    #[test]
    fn test_price_amount() {
        let price: Price = serde_json::from_str("250").unwrap();
        assert_eq!(price, Price::Amount(250.0));
        assert!(!price.is_free());
        assert_eq!(price.to_string(), "250");
    }

    #[test]
    fn test_price_rejects_unknown_marker() {
        let err = serde_json::from_str::<Price>("\"gratis\"").unwrap_err();
        assert!(err.to_string().contains("gratis"));
    }

    #[test]
    fn test_price_rejects_negative() {
        assert!(serde_json::from_str::<Price>("-5").is_err());
    }

    #[test]
    fn test_event_json_shape() {
        let event = sample_event();
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["longDescription"], "Long");
        assert_eq!(json["imageUrl"], "https://img.example.com/1.jpg");
        assert_eq!(json["date"], "2025-12-20T19:00:00Z");
        assert!(json.get("endDate").is_none());
        assert_eq!(json["price"], "free");
    }

    fn sample_event() -> Event {
        Event {
            id: "1".to_string(),
            slug: "jazz-night".to_string(),
            title: "Jazz Night".to_string(),
            description: "Short".to_string(),
            long_description: "Long".to_string(),
            date: "2025-12-20T19:00:00Z".parse().unwrap(),
            end_date: None,
            location: Location {
                venue: "Opera House".to_string(),
                city: "Cairo".to_string(),
                state: "Cairo".to_string(),
                country: "Egypt".to_string(),
            },
            category: "Music".to_string(),
            tags: vec!["jazz".to_string()],
            image_url: "https://img.example.com/1.jpg".to_string(),
            price: Price::Free,
            attendee_count: 10,
            max_attendees: 100,
            organizer: Organizer {
                name: "Cairo Jazz Club".to_string(),
                avatar: "https://img.example.com/a.jpg".to_string(),
            },
            featured: false,
            created_at: "2025-10-01T00:00:00Z".parse().unwrap(),
        }
    }
}
