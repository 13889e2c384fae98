//! Presentation Layer
//!
//! HTTP routes and the console controllers that drive the use cases from a
//! terminal.

pub mod console;
pub mod http;
pub mod middleware;
