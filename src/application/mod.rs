//! Application Layer
//!
//! One service per use case area. Services validate forms, enforce the
//! use-case refusals and return a tagged error enum; DTOs are the forms they
//! accept and the bodies the HTTP layer returns.

pub mod dto;
pub mod services;
