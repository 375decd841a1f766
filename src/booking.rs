//! Mock ticket booking.
//!
//! Bookings are validated, held for a simulated processing delay and then
//! confirmed with a generated ticket number. Nothing is persisted.

use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BookingError {
    #[error("Missing required fields")]
    MissingFields(Vec<&'static str>),

    #[error("Invalid booking: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

/// Booking form as submitted. Every field is required.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub mobile: Option<String>,
    pub date: Option<String>,
    pub event_id: Option<String>,
}

/// A booking request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingForm {
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub date: String,
    pub event_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Confirmed,
    Cancelled,
    Pending,
}

/// Confirmation returned for a successful booking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    #[serde(flatten)]
    pub form: BookingForm,
    pub ticket_number: String,
    pub status: TicketStatus,
    pub booking_date: DateTime<Utc>,
}

/// A ticket as shown in the "my tickets" list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub event_title: String,
    pub event_date: DateTime<Utc>,
    pub booking_date: DateTime<Utc>,
    pub attendee_name: String,
    pub attendee_email: String,
    pub ticket_number: String,
    pub status: TicketStatus,
}

static NAME_REGEX: OnceLock<Regex> = OnceLock::new();
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
static MOBILE_REGEX: OnceLock<Regex> = OnceLock::new();

fn name_regex() -> &'static Regex {
    // Latin letters, Arabic block, whitespace
    NAME_REGEX.get_or_init(|| Regex::new(r"^[a-zA-Z\s\x{0600}-\x{06FF}]+$").unwrap())
}

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

fn mobile_regex() -> &'static Regex {
    MOBILE_REGEX.get_or_init(|| Regex::new(r"^\+?[1-9]\d{1,14}$").unwrap())
}

impl BookingRequest {
    /// Check the request against the booking form rules. `today` is the
    /// earliest date that may be booked.
    pub fn validate(self, today: NaiveDate) -> Result<BookingForm, BookingError> {
        let (name, email, mobile, date, event_id) = match (
            required(self.name),
            required(self.email),
            required(self.mobile),
            required(self.date),
            required(self.event_id),
        ) {
            (Some(name), Some(email), Some(mobile), Some(date), Some(event_id)) => {
                (name, email, mobile, date, event_id)
            }
            (name, email, mobile, date, event_id) => {
                let missing = [
                    ("name", name.is_none()),
                    ("email", email.is_none()),
                    ("mobile", mobile.is_none()),
                    ("date", date.is_none()),
                    ("eventId", event_id.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, absent)| absent.then_some(field))
                .collect();
                return Err(BookingError::MissingFields(missing));
            }
        };

        let mut errors = Vec::new();

        let name_len = name.chars().count();
        if name_len < 2 {
            errors.push("Name must be at least 2 characters".to_string());
        } else if name_len > 100 {
            errors.push("Name must be less than 100 characters".to_string());
        }
        if !name_regex().is_match(&name) {
            errors.push("Name can only contain letters and spaces".to_string());
        }

        if !email_regex().is_match(&email) {
            errors.push("Please enter a valid email address".to_string());
        }

        if !mobile_regex().is_match(&mobile) {
            errors.push("Please enter a valid phone number (e.g., +1234567890)".to_string());
        }

        match parse_booking_date(&date) {
            Some(day) if day < today => errors.push("Please select a future date".to_string()),
            Some(_) => {}
            None => errors.push("Please select a date".to_string()),
        }

        if !errors.is_empty() {
            return Err(BookingError::Invalid(errors));
        }

        Ok(BookingForm {
            name,
            email: email.to_lowercase(),
            mobile,
            date,
            event_id,
        })
    }
}

/// Validate, wait out the simulated processing time, and confirm.
pub async fn create_booking(
    request: BookingRequest,
    processing_delay: Duration,
) -> Result<Booking, BookingError> {
    let now = Utc::now();
    let form = request.validate(now.date_naive())?;

    if !processing_delay.is_zero() {
        tokio::time::sleep(processing_delay).await;
    }

    let booking = confirm(form, Utc::now());
    info!(
        "Booking {} confirmed for event {} ({})",
        booking.id, booking.form.event_id, booking.ticket_number
    );
    Ok(booking)
}

/// Issue a confirmed booking for a validated form.
pub fn confirm(form: BookingForm, now: DateTime<Utc>) -> Booking {
    let id = Uuid::new_v4().simple().to_string()[..8].to_string();

    Booking {
        id,
        form,
        ticket_number: ticket_number(now),
        status: TicketStatus::Confirmed,
        booking_date: now,
    }
}

/// `TKT-<unix millis>-<5 uppercase alphanumerics>`
pub fn ticket_number(now: DateTime<Utc>) -> String {
    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(5)
        .collect::<String>()
        .to_uppercase();

    format!("TKT-{}-{}", now.timestamp_millis(), suffix)
}

/// Demonstration tickets for the "my tickets" page.
pub fn sample_tickets() -> Vec<Ticket> {
    let ticket = |id: &str, title: &str, event: &str, booked: &str, name: &str, email: &str, number: &str| Ticket {
        id: id.to_string(),
        event_title: title.to_string(),
        event_date: event.parse().unwrap_or_default(),
        booking_date: booked.parse().unwrap_or_default(),
        attendee_name: name.to_string(),
        attendee_email: email.to_string(),
        ticket_number: number.to_string(),
        status: TicketStatus::Confirmed,
    };

    vec![
        ticket(
            "1",
            "Tech Summit Dubai 2025",
            "2025-12-15T09:00:00Z",
            "2025-11-10T14:30:00Z",
            "Ahmed Mohammed",
            "ahmed@example.com",
            "TKT-1731597234-AB3D5",
        ),
        ticket(
            "2",
            "Arabic Music Festival",
            "2025-12-20T19:00:00Z",
            "2025-11-12T10:15:00Z",
            "Fatima Ali",
            "fatima@example.com",
            "TKT-1731683421-XY9K2",
        ),
        ticket(
            "3",
            "Dubai Fashion Week",
            "2025-12-03T19:00:00Z",
            "2025-11-08T16:45:00Z",
            "Sara Hassan",
            "sara@example.com",
            "TKT-1731425678-LM7P4",
        ),
    ]
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_booking_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value.trim())
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
}
