//! Reservation HTTP handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::{
    db::DbPool,
    error::AppError,
    models::reservation::{GuestReservation, ReservationQuery},
    services::reservations,
};

/// List a guest's reservations.
///
/// # Endpoint
///
/// `GET /api/users/{id}/reservations?limit=5&past_only=true`
///
/// An unknown guest is not an error here; the list is simply empty.
pub async fn list_guest_reservations(
    State(pool): State<DbPool>,
    Path(guest_id): Path<i32>,
    Query(query): Query<ReservationQuery>,
) -> Result<Json<Vec<GuestReservation>>, AppError> {
    let rows = reservations::get_all_reservations(&pool, guest_id, query).await?;

    Ok(Json(rows))
}
