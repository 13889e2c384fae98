//! Value Objects
//!
//! Small immutable types shared by several entities.

pub mod image;
mod role;

pub use image::ImageFormat;
pub use role::Role;
