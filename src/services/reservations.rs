//! Guest reservation history.

use crate::{
    db::DbPool,
    error::AppError,
    models::reservation::{GuestReservation, ReservationQuery},
    services::validate_limit,
};

/// List a guest's reservations, oldest stay first.
///
/// Each row carries the booked property's summary and its review average.
/// With `past_only` set, only stays that ended before today are returned.
///
/// # Errors
///
/// - `InvalidRequest`: `limit` is outside `1..=100`
/// - `Unavailable` / `Database`: the query failed
pub async fn get_all_reservations(
    pool: &DbPool,
    guest_id: i32,
    query: ReservationQuery,
) -> Result<Vec<GuestReservation>, AppError> {
    validate_limit(query.limit)?;

    // $2 = FALSE lists every stay
    let reservations = sqlx::query_as::<_, GuestReservation>(
        r#"
        SELECT
            reservations.id,
            reservations.guest_id,
            reservations.property_id,
            reservations.start_date,
            reservations.end_date,
            properties.title,
            properties.thumbnail_photo_url,
            properties.cost_per_night,
            properties.number_of_bedrooms,
            properties.number_of_bathrooms,
            properties.parking_spaces,
            properties.city,
            AVG(property_reviews.rating)::float8 AS average_rating
        FROM reservations
        JOIN properties ON properties.id = reservations.property_id
        LEFT JOIN property_reviews ON property_reviews.property_id = properties.id
        WHERE reservations.guest_id = $1
          AND ($2 = FALSE OR reservations.end_date < CURRENT_DATE)
        GROUP BY reservations.id, properties.id
        ORDER BY reservations.start_date ASC, reservations.id ASC
        LIMIT $3
        "#,
    )
    .bind(guest_id)
    .bind(query.past_only)
    .bind(query.limit)
    .fetch_all(pool)
    .await?;

    Ok(reservations)
}
