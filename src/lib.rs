//! lightbnb data-access layer.
//!
//! Typed queries over the `users`, `properties`, `reservations` and
//! `property_reviews` tables of a short-term rental listing app, with a thin
//! JSON API in front of them.
//!
//! # Architecture
//!
//! - **Database**: PostgreSQL with sqlx (async, pooled, parameterized)
//! - **Queries**: `services`, one statement per operation; property search
//!   assembles its `WHERE`/`HAVING` clauses from the filters present
//! - **Errors**: `AppError`, which keeps "no such row" (`None`) apart from
//!   constraint violations, connectivity failures and bad input
//! - **Web Framework**: Axum, in `handlers` and `routes`

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;

pub use error::AppError;
