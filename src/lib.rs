//! # Use Case Desk Library
//!
//! Small use cases of two exercise systems, each run over an in-memory
//! repository bound to a simulated server link:
//! - **eTour**: news, banners, cultural heritage, tourists, menus, feedback
//! - **SMOS**: addresses, enrollment, late entries, justifications, logins
//!
//! Every use case is reachable through a RESTful HTTP API and through
//! console controllers that drive the linear load, validate, confirm, save
//! workflow and report the outcome to a notifier.
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Entities and repository traits
//! - **Application Layer**: Validating services and DTOs
//! - **Infrastructure Layer**: In-memory repositories, server links, seed data
//! - **Presentation Layer**: HTTP handlers and console controllers
//!
//! ## Module Structure
//!
//! ```text
//! usecase_desk/
//! +-- config/         Configuration management
//! +-- domain/         Entities, value objects, and repository traits
//! +-- application/    Services and DTOs
//! +-- infrastructure/ Repositories, simulation, seed data, metrics
//! +-- presentation/   HTTP routes, middleware, console controllers
//! +-- shared/         Common utilities (errors, validation, passwords)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP and console front ends
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
