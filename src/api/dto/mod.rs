//! Data Transfer Objects for API requests and responses.
//!
//! Scan responses serialize the domain payloads from
//! [`crate::domain::entities`] directly; only the request body and the
//! health report live here.

pub mod health;
pub mod scan;
