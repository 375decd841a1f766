//! HTTP client for the event API, used by front-ends and tooling that talk
//! to a running server instead of embedding the query engine.

use crate::booking::{Booking, BookingRequest};
use crate::i18n::Language;
use crate::model::Event;
use crate::query::FilterParams;
use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct EventsEnvelope {
    events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
struct EventEnvelope {
    event: Event,
}

#[derive(Debug, Deserialize)]
struct CategoriesEnvelope {
    categories: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CountriesEnvelope {
    countries: Vec<Country>,
}

#[derive(Debug, Deserialize)]
struct BookingEnvelope {
    booking: Booking,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: String,
    #[serde(default)]
    details: Vec<String>,
}

/// A country option as returned by `/api/countries`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Country {
    pub key: Option<String>,
    /// Group display name in the requested language
    pub label: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    locale: Option<Language>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            locale: None,
        }
    }

    /// Send `?locale=` with every request instead of relying on server defaults.
    pub fn with_locale(mut self, locale: Language) -> Self {
        self.locale = Some(locale);
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        let request = self.http.get(self.url(path));
        match self.locale {
            Some(locale) => request.query(&[("locale", locale.code())]),
            None => request,
        }
    }

    pub async fn fetch_events(&self, filters: &FilterParams) -> Result<Vec<Event>> {
        let response = self
            .get("/api/events")
            .query(filters)
            .send()
            .await
            .context("Failed to send request to event API")?;

        let envelope: EventsEnvelope = parse(response, "events").await?;
        Ok(envelope.events)
    }

    pub async fn fetch_featured(&self) -> Result<Vec<Event>> {
        let response = self
            .get("/api/events/featured")
            .send()
            .await
            .context("Failed to send request to event API")?;

        let envelope: EventsEnvelope = parse(response, "featured events").await?;
        Ok(envelope.events)
    }

    /// `Ok(None)` when the server reports the event does not exist.
    pub async fn fetch_event(&self, slug: &str) -> Result<Option<Event>> {
        let path = format!("/api/events/{}", urlencoding::encode(slug));
        let response = self
            .get(&path)
            .send()
            .await
            .context("Failed to send request to event API")?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let envelope: EventEnvelope = parse(response, "event").await?;
        Ok(Some(envelope.event))
    }

    pub async fn fetch_categories(&self) -> Result<Vec<String>> {
        let response = self
            .get("/api/categories")
            .send()
            .await
            .context("Failed to send request to event API")?;

        let envelope: CategoriesEnvelope = parse(response, "categories").await?;
        Ok(envelope.categories)
    }

    pub async fn fetch_countries(&self) -> Result<Vec<Country>> {
        let response = self
            .get("/api/countries")
            .send()
            .await
            .context("Failed to send request to event API")?;

        let envelope: CountriesEnvelope = parse(response, "countries").await?;
        Ok(envelope.countries)
    }

    pub async fn create_booking(&self, request: &BookingRequest) -> Result<Booking> {
        let response = self
            .http
            .post(self.url("/api/bookings"))
            .json(request)
            .send()
            .await
            .context("Failed to send booking request")?;

        let envelope: BookingEnvelope = parse(response, "booking").await?;
        Ok(envelope.booking)
    }
}

/// Decode a success envelope, or turn an error envelope into an error.
async fn parse<T: DeserializeOwned>(response: reqwest::Response, what: &str) -> Result<T> {
    let status = response.status();

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(envelope) if envelope.details.is_empty() => envelope.error,
            Ok(envelope) => format!("{} ({})", envelope.error, envelope.details.join("; ")),
            Err(_) => body,
        };
        anyhow::bail!("Event API error ({}): {}", status, message);
    }

    response
        .json()
        .await
        .with_context(|| format!("Failed to parse {} response", what))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn event_json(id: &str, slug: &str) -> serde_json::Value {
        json!({
            "id": id,
            "slug": slug,
            "title": "Doha Art Week",
            "description": "Contemporary art",
            "longDescription": "Galleries open their doors",
            "date": "2025-11-22T10:00:00Z",
            "location": { "venue": "MIA", "city": "Doha", "state": "Doha", "country": "Qatar" },
            "category": "Art",
            "tags": ["Exhibition"],
            "imageUrl": "https://img.example.com/doha.jpg",
            "price": "free",
            "attendeeCount": 640,
            "maxAttendees": 2000,
            "organizer": { "name": "Qatar Museums", "avatar": "https://img.example.com/qm.png" },
            "featured": false,
            "createdAt": "2025-09-28T14:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_fetch_events_sends_filters_and_locale() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/events"))
            .and(query_param("locale", "ar"))
            .and(query_param("category", "Art"))
            .and(query_param("priceRange", "free"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "events": [event_json("5", "doha-art-week")],
                "count": 1
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri()).with_locale(Language::ARABIC);
        let filters = FilterParams {
            category: Some("Art".to_string()),
            price_range: Some("free".to_string()),
            ..FilterParams::default()
        };

        let events = client.fetch_events(&filters).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id, "5");
        assert!(events[0].price.is_free());
    }

    #[tokio::test]
    async fn test_fetch_event_not_found_is_none() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/events/missing"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "success": false,
                "error": "Event not found"
            })))
            .mount(&server)
            .await;

        let client = ApiClient::new(format!("{}/", server.uri()));
        assert!(client.fetch_event("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_fetch_event_found() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/events/doha-art-week"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "event": event_json("5", "doha-art-week")
            })))
            .mount(&server)
            .await;

        let event = ApiClient::new(server.uri())
            .fetch_event("doha-art-week")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event.location.city, "Doha");
    }

    #[tokio::test]
    async fn test_server_error_is_reported() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/categories"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({
                "success": false,
                "error": "Failed to fetch categories"
            })))
            .mount(&server)
            .await;

        let err = ApiClient::new(server.uri())
            .fetch_categories()
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("Failed to fetch categories"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/countries"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = ApiClient::new(server.uri())
            .fetch_countries()
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to parse countries response"));
    }

    #[tokio::test]
    async fn test_fetch_countries() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/countries"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "countries": [
                    { "key": "qatar", "label": "Qatar", "name": "Qatar" },
                    { "key": null, "name": "Atlantis" }
                ],
                "count": 2
            })))
            .mount(&server)
            .await;

        let countries = ApiClient::new(server.uri()).fetch_countries().await.unwrap();
        assert_eq!(countries[0].key.as_deref(), Some("qatar"));
        assert_eq!(countries[0].label.as_deref(), Some("Qatar"));
        assert!(countries[1].key.is_none());
        assert!(countries[1].label.is_none());
    }

    #[tokio::test]
    async fn test_create_booking_validation_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/bookings"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "success": false,
                "error": "Missing required fields",
                "details": ["email"]
            })))
            .mount(&server)
            .await;

        let err = ApiClient::new(server.uri())
            .create_booking(&BookingRequest::default())
            .await
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("400"));
        assert!(message.contains("Missing required fields (email)"));
    }
}
