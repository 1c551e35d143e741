//! User data models and API request/response types.

use serde::{Deserialize, Serialize};

/// Represents a user record from the database.
///
/// # Database Table
///
/// Maps to the `users` table. `email` carries a UNIQUE constraint, so it
/// identifies a user on its own.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    pub id: i32,

    pub name: String,

    pub email: String,

    /// Opaque credential hash supplied by the caller at registration.
    ///
    /// Never serialized; see `UserResponse`.
    pub password: String,
}

/// Fields required to create a user.
///
/// # JSON Example
///
/// ```json
/// {
///   "name": "Devin Sanders",
///   "email": "tristanjacobs@gmail.com",
///   "password": "$2a$10$FB/BOAVhpuLvpOREQVmvmezD4ED/.JBIDRh70tGevYzYzQgFId2u."
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Query string for `GET /api/users?email=...`.
#[derive(Debug, Deserialize)]
pub struct UserLookupParams {
    pub email: String,
}

/// Response body for user endpoints.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub name: String,
    pub email: String,
}

/// Drops the password hash before the user leaves the service.
impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}
