//! CLI library components for the airport statistics tool.

pub mod logging;
pub mod pipeline;
pub mod report;
