//! Infrastructure Layer
//!
//! Contains implementations for external concerns:
//! - In-memory repositories behind simulated server links
//! - Demo data seeding
//! - Prometheus metrics

pub mod metrics;
pub mod repositories;
pub mod seed;
pub mod simulation;
