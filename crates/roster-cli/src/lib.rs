//! CLI library components for the roster validator.

pub mod logging;
pub mod pipeline;
