//! Shared utilities and common types

pub mod error;
pub mod password;
pub mod validation;
