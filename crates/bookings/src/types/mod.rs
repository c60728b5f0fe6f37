//! Shared types for the booking domain.

pub mod errors;
pub mod requests;

pub use errors::{SalonError, SalonResult};
pub use requests::*;
