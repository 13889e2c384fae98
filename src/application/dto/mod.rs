//! Data Transfer Objects
//!
//! Forms accepted by the services and bodies returned over HTTP.

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
