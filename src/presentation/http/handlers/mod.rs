//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints. Each module maps its service's
//! error enum onto [`AppError`](crate::shared::error::AppError) and counts
//! the use-case outcome.

pub mod addresses;
pub mod auth;
pub mod banners;
pub mod classes;
pub mod enrollments;
pub mod feedback;
pub mod health;
pub mod heritage;
pub mod justifications;
pub mod late_entries;
pub mod menus;
pub mod news;
pub mod points;
pub mod roles;
pub mod simulation;
pub mod tags;
pub mod tourists;
