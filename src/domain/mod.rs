//! # Domain Layer
//!
//! Entities of the eTour and SMOS use cases together with the repository
//! traits that give access to them.
//!
//! ## Structure
//!
//! - **entities**: Use-case entities (News, Banner, Address, LateEntry, etc.)
//! - **value_objects**: Immutable value types (Role, ImageFormat)
//!
//! ## Design Principles
//!
//! - No dependencies on infrastructure or presentation layers
//! - Repository traits define data access contracts
//! - The only repository failure is a simulated server connection loss

pub mod entities;
pub mod value_objects;

// Re-export commonly used types
pub use entities::*;
pub use value_objects::*;
