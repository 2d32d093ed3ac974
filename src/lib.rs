//! Catrisk - Trigger-zone risk and payout aggregation engine for
//! parametric catastrophe analytics
//!
//! This library provides:
//! - Geometric containment and great-circle distance primitives
//! - Peril-specific trigger criteria evaluation against hazard events
//! - Tiered/percentage/binary payout calculation
//! - Cross-zone payout aggregation and annualized trigger statistics
//! - Zone clustering, boundary extension, and stress-test comparison

pub mod analysis;
pub mod event;
pub mod exposure;
pub mod geometry;
pub mod payout;
pub mod runner;
pub mod stress;
pub mod trigger;
pub mod zone;

// Re-export commonly used types
pub use analysis::{AggregateStatistics, AggregationMode, AnalysisConfig, AnalysisEngine};
pub use event::{Event, EventCatalog, HazardDetails, Peril};
pub use runner::AnalysisRunner;
pub use stress::{StressComparison, StressConfig, StressTester};
pub use trigger::TriggerResult;
pub use zone::{PayoutStructure, PayoutTier, TriggerCriteria, Zone, ZoneError};
