//! Reservation data models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Represents a reservation record from the database.
///
/// Reservations are created outside this service; they are only read here.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct Reservation {
    pub id: i32,
    pub guest_id: i32,
    pub property_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// One row of a guest's reservation history.
///
/// The reservation joined with the summary of the booked property and that
/// property's review average.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct GuestReservation {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub reservation: Reservation,

    pub title: String,
    pub thumbnail_photo_url: String,

    /// Nightly price in cents
    pub cost_per_night: i32,

    pub number_of_bedrooms: i32,
    pub number_of_bathrooms: i32,
    pub parking_spaces: i32,
    pub city: String,

    pub average_rating: Option<f64>,
}

/// Options for listing a guest's reservations.
///
/// # Query Example
///
/// `GET /api/users/3/reservations?limit=5&past_only=true`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ReservationQuery {
    /// Maximum number of rows, defaults to 10
    #[serde(default = "default_limit")]
    pub limit: i64,

    /// Only stays whose `end_date` is before today
    #[serde(default)]
    pub past_only: bool,
}

fn default_limit() -> i64 {
    crate::services::DEFAULT_LIMIT
}

impl Default for ReservationQuery {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            past_only: false,
        }
    }
}
