//! HTTP handlers for the parts API.

pub mod parts;
pub use parts::*;
