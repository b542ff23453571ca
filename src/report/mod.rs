//! Reporting utilities: formatted terminal output for single and batch runs.

pub mod format;

pub use format::{format_batch, format_outlook};
