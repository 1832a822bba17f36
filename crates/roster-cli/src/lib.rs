//! CLI library components for the roster tally tool.

pub mod logging;
