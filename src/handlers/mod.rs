//! HTTP request handlers.
//!
//! Handlers only extract arguments, call into `services`, and shape the
//! response. Errors convert to HTTP responses through `AppError`.

/// Service health probe
pub mod health;
/// Property search and listing endpoints
pub mod properties;
/// Guest reservation endpoints
pub mod reservations;
/// User registration and lookup endpoints
pub mod users;
