//! CLI library components for the catalog export tool.

pub mod logging;
pub mod pipeline;
