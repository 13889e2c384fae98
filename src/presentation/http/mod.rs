//! HTTP API
//!
//! Axum handlers, extractors, and route configuration.

pub mod extractors;
pub mod handlers;
pub mod routes;
