//! Property search and listing.

use crate::{
    db::DbPool,
    error::AppError,
    models::property::{NewProperty, Property, PropertyFilter, PropertyListing},
    services::property_filter::{PropertySearch, SqlParam},
};

/// Search listed properties, cheapest first.
///
/// Only the filters present in `filter` narrow the result; an empty filter
/// returns the `limit` cheapest properties. See `PropertySearch` for how the
/// statement is assembled.
///
/// # Errors
///
/// - `InvalidRequest`: the filter or limit failed validation
/// - `Unavailable` / `Database`: the query failed
pub async fn get_all_properties(
    pool: &DbPool,
    filter: &PropertyFilter,
    limit: i64,
) -> Result<Vec<PropertyListing>, AppError> {
    let built = PropertySearch::new(filter, limit).build()?;
    tracing::debug!(sql = %built.sql, params = built.params.len(), "Searching properties");

    let mut query = sqlx::query_as::<_, PropertyListing>(&built.sql);
    for param in built.params {
        query = match param {
            SqlParam::Text(value) => query.bind(value),
            SqlParam::Int(value) => query.bind(value),
            SqlParam::BigInt(value) => query.bind(value),
            SqlParam::Float(value) => query.bind(value),
        };
    }

    let properties = query.fetch_all(pool).await?;

    Ok(properties)
}

/// List a new property.
///
/// # Returns
///
/// The stored row: every input field as given, plus the generated id.
///
/// # Errors
///
/// - `InvalidRequest`: blank title, or a negative price or count
/// - `ConstraintViolation`: `owner_id` does not reference a user
/// - `Unavailable` / `Database`: the insert failed
pub async fn add_property(pool: &DbPool, new_property: NewProperty) -> Result<Property, AppError> {
    validate_new_property(&new_property)?;

    let property = sqlx::query_as::<_, Property>(
        r#"
        INSERT INTO properties (
            owner_id,
            title,
            description,
            thumbnail_photo_url,
            cover_photo_url,
            cost_per_night,
            parking_spaces,
            number_of_bathrooms,
            number_of_bedrooms,
            country,
            street,
            city,
            province,
            post_code
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        RETURNING *
        "#,
    )
    .bind(new_property.owner_id)
    .bind(new_property.title)
    .bind(new_property.description)
    .bind(new_property.thumbnail_photo_url)
    .bind(new_property.cover_photo_url)
    .bind(new_property.cost_per_night)
    .bind(new_property.parking_spaces)
    .bind(new_property.number_of_bathrooms)
    .bind(new_property.number_of_bedrooms)
    .bind(new_property.country)
    .bind(new_property.street)
    .bind(new_property.city)
    .bind(new_property.province)
    .bind(new_property.post_code)
    .fetch_one(pool)
    .await?;

    tracing::info!("Listed property {} for owner {}", property.id, property.owner_id);

    Ok(property)
}

fn validate_new_property(new_property: &NewProperty) -> Result<(), AppError> {
    if new_property.title.trim().is_empty() {
        return Err(AppError::InvalidRequest("title is required".to_string()));
    }

    let counts = [
        ("cost_per_night", new_property.cost_per_night),
        ("parking_spaces", new_property.parking_spaces),
        ("number_of_bathrooms", new_property.number_of_bathrooms),
        ("number_of_bedrooms", new_property.number_of_bedrooms),
    ];
    for (field, value) in counts {
        if value < 0 {
            return Err(AppError::InvalidRequest(format!(
                "{} must not be negative",
                field
            )));
        }
    }

    Ok(())
}
