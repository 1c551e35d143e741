//! Property HTTP handlers.
//!
//! - GET /api/properties - Search with optional filters
//! - POST /api/properties - List a new property

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    db::DbPool,
    error::AppError,
    models::property::{NewProperty, PropertyListing, PropertySearchParams},
    services::{DEFAULT_LIMIT, properties},
};

/// Search properties.
///
/// # Query Parameters
///
/// All optional: `city`, `owner_id`, `minimum_price_per_night`,
/// `maximum_price_per_night` (whole dollars), `minimum_rating`, `limit`
/// (defaults to 10).
///
/// # Response (200 OK)
///
/// ```json
/// [
///   {
///     "id": 2,
///     "owner_id": 1,
///     "title": "Blank corner",
///     "cost_per_night": 8500,
///     "city": "Vancouver",
///     "average_rating": 4.25
///   }
/// ]
/// ```
///
/// (Abbreviated; every property column is included.)
pub async fn search_properties(
    State(pool): State<DbPool>,
    Query(params): Query<PropertySearchParams>,
) -> Result<Json<Vec<PropertyListing>>, AppError> {
    let (filter, limit) = params.into_parts();
    let listings =
        properties::get_all_properties(&pool, &filter, limit.unwrap_or(DEFAULT_LIMIT)).await?;

    Ok(Json(listings))
}

/// List a new property.
///
/// # Response
///
/// - **201 Created**: the stored property with its new id
/// - **400**: blank title or negative price/count
/// - **409**: `owner_id` is not a registered user
pub async fn create_property(
    State(pool): State<DbPool>,
    Json(request): Json<NewProperty>,
) -> Result<impl IntoResponse, AppError> {
    let property = properties::add_property(&pool, request).await?;

    Ok((StatusCode::CREATED, Json(property)))
}
