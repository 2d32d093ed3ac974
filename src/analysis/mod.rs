//! Cross-zone aggregation: trigger/payout collapse and summary statistics

mod engine;
mod stats;

pub use engine::{AggregationMode, AnalysisConfig, AnalysisEngine};
pub use stats::{AggregateStatistics, EventPayoutRow, ZoneStatistics};
