//! Data models representing database entities.
//!
//! This module contains all data structures that map to database tables,
//! plus the request types that create them.

/// Listed properties and search filters
pub mod property;
/// Guest reservations
pub mod reservation;
/// Registered users
pub mod user;
