//! Property data models, search filters and search results.

use serde::{Deserialize, Serialize};

/// Represents a property record from the database.
///
/// # Price Storage
///
/// `cost_per_night` is stored in cents (minor currency units) so that no
/// price ever passes through a float. $85.00 is stored as 8500.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow, Serialize)]
pub struct Property {
    pub id: i32,

    /// Foreign key to the user who lists this property
    pub owner_id: i32,

    pub title: String,
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,

    /// Nightly price in cents
    pub cost_per_night: i32,

    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,

    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
}

/// A property as returned by search, with its review average.
///
/// `average_rating` is computed per query and is `None` for properties
/// that have never been reviewed.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct PropertyListing {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub property: Property,

    pub average_rating: Option<f64>,
}

/// Fields required to list a new property.
///
/// `cost_per_night` is already in cents; it is stored as given.
///
/// # JSON Example
///
/// ```json
/// {
///   "owner_id": 1,
///   "title": "Speed lamp",
///   "description": "description",
///   "thumbnail_photo_url": "https://images.pexels.com/photos/2086676/pexels-photo-2086676.jpeg",
///   "cover_photo_url": "https://images.pexels.com/photos/2086676/pexels-photo-2086676.jpeg",
///   "cost_per_night": 93061,
///   "parking_spaces": 6,
///   "number_of_bathrooms": 4,
///   "number_of_bedrooms": 8,
///   "country": "Canada",
///   "street": "536 Namsub Highway",
///   "city": "Sotboske",
///   "province": "Quebec",
///   "post_code": "28142"
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct NewProperty {
    pub owner_id: i32,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub thumbnail_photo_url: String,
    #[serde(default)]
    pub cover_photo_url: String,
    pub cost_per_night: i32,
    #[serde(default)]
    pub parking_spaces: i32,
    #[serde(default)]
    pub number_of_bathrooms: i32,
    #[serde(default)]
    pub number_of_bedrooms: i32,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
}

/// Optional criteria narrowing a property search.
///
/// Every field is independent; an absent field adds no clause.
/// Prices are whole currency units (dollars) and are converted to cents
/// before they reach the database.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyFilter {
    /// Case-insensitive substring of the city name
    pub city: Option<String>,

    pub owner_id: Option<i32>,

    /// Inclusive lower bound, in dollars
    pub minimum_price_per_night: Option<i64>,

    /// Inclusive upper bound, in dollars
    pub maximum_price_per_night: Option<i64>,

    /// Inclusive lower bound on the review average
    pub minimum_rating: Option<f64>,
}

/// Query string for `GET /api/properties`.
///
/// Kept separate from `PropertyFilter` because `#[serde(flatten)]` does not
/// parse numbers out of URL-encoded strings.
#[derive(Debug, Default, Deserialize)]
pub struct PropertySearchParams {
    pub city: Option<String>,
    pub owner_id: Option<i32>,
    pub minimum_price_per_night: Option<i64>,
    pub maximum_price_per_night: Option<i64>,
    pub minimum_rating: Option<f64>,
    pub limit: Option<i64>,
}

impl PropertySearchParams {
    /// Split into the filter and the requested page size.
    pub fn into_parts(self) -> (PropertyFilter, Option<i64>) {
        let filter = PropertyFilter {
            city: self.city,
            owner_id: self.owner_id,
            minimum_price_per_night: self.minimum_price_per_night,
            maximum_price_per_night: self.maximum_price_per_night,
            minimum_rating: self.minimum_rating,
        };

        (filter, self.limit)
    }
}
