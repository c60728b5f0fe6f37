//! Internal utilities.

pub mod password;
pub mod validation;
