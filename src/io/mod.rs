//! Input/output helpers.
//!
//! - outlook JSON read/write (`outlook`)

pub mod outlook;

pub use outlook::*;
