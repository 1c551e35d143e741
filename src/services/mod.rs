//! Query layer.
//!
//! Each operation sends one parameterized statement on the shared pool and
//! maps the rows to models. Lookups return `Option`, listings return a
//! possibly empty `Vec`, and failures come back as a classified `AppError`.

use crate::error::AppError;

pub mod properties;
pub mod property_filter;
pub mod reservations;
pub mod users;

/// Page size used when a caller does not supply one.
pub const DEFAULT_LIMIT: i64 = 10;

/// Largest page size a caller may request.
pub const MAX_LIMIT: i64 = 100;

/// Reject page sizes outside `1..=MAX_LIMIT`.
pub fn validate_limit(limit: i64) -> Result<(), AppError> {
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(AppError::InvalidRequest(format!(
            "limit must be between 1 and {}",
            MAX_LIMIT
        )));
    }

    Ok(())
}

pub use properties::{add_property, get_all_properties};
pub use reservations::get_all_reservations;
pub use users::{add_user, get_user_with_email, get_user_with_id};
