//! Extraction and aggregation pipeline for schedule cells.

pub mod aggregate;
pub mod normalize;
pub mod parser;
pub mod pipeline;

pub use aggregate::TallyAggregator;
pub use normalize::{EQUIPMENT_ONLY_CODE, clean};
pub use parser::EntryParser;
pub use pipeline::{RunStats, TallyOutcome, run_tally};
