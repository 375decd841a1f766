//! Route handlers. Each resolves the request language, runs one query
//! engine operation and wraps the result in a `{ "success": true, ... }`
//! envelope.

use crate::api::error::ApiError;
use crate::api::AppState;
use crate::booking::{self, Booking, BookingRequest, Ticket};
use crate::dataset::SlugEntry;
use crate::i18n::{negotiate, Language};
use crate::model::Event;
use crate::query::{CountryOption, EventFilters, FilterParams};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

const LIST_CACHE: &str = "public, s-maxage=60, stale-while-revalidate=30";
const DETAIL_CACHE: &str = "public, s-maxage=300, stale-while-revalidate=60";
const SLUGS_CACHE: &str = "public, s-maxage=3600, stale-while-revalidate=600";

#[derive(Debug, Default, Deserialize)]
pub struct LocaleQuery {
    pub locale: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EventsQuery {
    pub locale: Option<String>,
    #[serde(flatten)]
    pub filters: FilterParams,
}

#[derive(Debug, Serialize)]
pub struct EventsResponse {
    pub success: bool,
    pub events: Vec<Event>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub success: bool,
    pub event: Event,
}

#[derive(Debug, Serialize)]
pub struct SlugsResponse {
    pub success: bool,
    pub slugs: Vec<SlugEntry>,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct CountriesResponse {
    pub success: bool,
    pub countries: Vec<CountryOption>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct LocationsResponse {
    pub success: bool,
    pub locations: Vec<String>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub success: bool,
    pub booking: Booking,
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocaleInfo {
    pub code: Language,
    pub name: &'static str,
    pub native_name: &'static str,
    pub dir: &'static str,
    pub is_default: bool,
}

#[derive(Debug, Serialize)]
pub struct LocalesResponse {
    pub success: bool,
    pub locales: Vec<LocaleInfo>,
}

#[derive(Debug, Serialize)]
pub struct TicketsResponse {
    pub success: bool,
    pub tickets: Vec<Ticket>,
    pub count: usize,
}

/// Language from `?locale=`, the locale cookie, `Accept-Language`, or the
/// configured default, in that order.
fn request_language(
    state: &AppState,
    headers: &HeaderMap,
    explicit: Option<&str>,
) -> Result<Language, ApiError> {
    let cookie = headers.get(header::COOKIE).and_then(|v| v.to_str().ok());
    let accept = headers
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|v| v.to_str().ok());

    negotiate(explicit, cookie, accept, state.config.default_language)
        .map_err(|e| ApiError::bad_request(format!("{:#}", e)))
}

fn cache_headers(value: &'static str) -> [(header::HeaderName, HeaderValue); 2] {
    [
        (header::CACHE_CONTROL, HeaderValue::from_static(value)),
        (header::VARY, HeaderValue::from_static("accept-language, cookie")),
    ]
}

/// `GET /api/events`
pub async fn list_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<EventsQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let language = request_language(&state, &headers, query.locale.as_deref())?;
    let filters = EventFilters::from_params(&query.filters)?;

    state.simulate_latency().await;
    let events = state.engine.list_events(&filters, language);

    Ok((
        cache_headers(LIST_CACHE),
        Json(EventsResponse {
            success: true,
            count: events.len(),
            events,
        }),
    ))
}

/// `GET /api/events/featured`
pub async fn featured_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<LocaleQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let language = request_language(&state, &headers, query.locale.as_deref())?;

    state.simulate_latency().await;
    let events = state.engine.featured_events(language);

    Ok((
        cache_headers(LIST_CACHE),
        Json(EventsResponse {
            success: true,
            count: events.len(),
            events,
        }),
    ))
}

/// `GET /api/events/slugs`
pub async fn event_slugs(State(state): State<AppState>) -> impl IntoResponse {
    let slugs = state.engine.source().slugs();

    (
        [(header::CACHE_CONTROL, HeaderValue::from_static(SLUGS_CACHE))],
        Json(SlugsResponse {
            success: true,
            slugs,
        }),
    )
}

/// `GET /api/locales`
pub async fn locales(State(state): State<AppState>) -> impl IntoResponse {
    let locales = Language::all()
        .into_iter()
        .map(|language| LocaleInfo {
            code: language,
            name: language.name(),
            native_name: language.native_name(),
            dir: language.direction().as_str(),
            is_default: language == state.config.default_language,
        })
        .collect();

    (
        [(header::CACHE_CONTROL, HeaderValue::from_static(SLUGS_CACHE))],
        Json(LocalesResponse {
            success: true,
            locales,
        }),
    )
}

/// `GET /api/events/:slug`
pub async fn get_event(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(slug): Path<String>,
    Query(query): Query<LocaleQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let language = request_language(&state, &headers, query.locale.as_deref())?;

    state.simulate_latency().await;
    let event = state
        .engine
        .get_event_by_slug(&slug, language)
        .ok_or_else(|| ApiError::not_found("Event not found"))?;

    Ok((
        cache_headers(DETAIL_CACHE),
        Json(EventResponse {
            success: true,
            event,
        }),
    ))
}

/// `GET /api/categories`
pub async fn categories(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<LocaleQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let language = request_language(&state, &headers, query.locale.as_deref())?;
    let categories = state.engine.categories(language);

    Ok((
        cache_headers(DETAIL_CACHE),
        Json(CategoriesResponse {
            success: true,
            count: categories.len(),
            categories,
        }),
    ))
}

/// `GET /api/countries`
pub async fn countries(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<LocaleQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let language = request_language(&state, &headers, query.locale.as_deref())?;
    let countries = state.engine.countries(language);

    Ok((
        cache_headers(DETAIL_CACHE),
        Json(CountriesResponse {
            success: true,
            count: countries.len(),
            countries,
        }),
    ))
}

/// `GET /api/locations`
pub async fn locations(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<LocaleQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let language = request_language(&state, &headers, query.locale.as_deref())?;
    let locations = state.engine.locations(language);

    Ok((
        cache_headers(DETAIL_CACHE),
        Json(LocationsResponse {
            success: true,
            count: locations.len(),
            locations,
        }),
    ))
}

/// `POST /api/bookings`
pub async fn create_booking(
    State(state): State<AppState>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Result<Json<BookingResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected booking body: {}", rejection.body_text());
        ApiError::bad_request("Invalid request body")
    })?;

    if let Some(event_id) = request.event_id.as_deref() {
        info!("Booking requested for event {}", event_id);
    }

    let booking = booking::create_booking(request, state.config.booking_latency).await?;

    Ok(Json(BookingResponse {
        success: true,
        booking,
        message: "Booking confirmed successfully!",
    }))
}

/// `GET /api/tickets`
pub async fn tickets(State(state): State<AppState>) -> Json<TicketsResponse> {
    state.simulate_latency().await;
    let tickets = booking::sample_tickets();

    Json(TicketsResponse {
        success: true,
        count: tickets.len(),
        tickets,
    })
}

/// `GET /health`
pub async fn health_check() -> &'static str {
    "ok"
}
