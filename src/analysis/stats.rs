//! Aggregate statistics output structures

use serde::{Deserialize, Serialize};

use crate::event::Peril;

/// One qualifying event collapsed to a single payout under the
/// aggregation mode (detailed output only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventPayoutRow {
    pub event_id: String,
    pub peril: Peril,
    pub intensity: f64,

    /// Ids of every zone this event triggered
    pub zones_triggered: Vec<String>,

    /// Per-zone payouts (zone id, amount) for zones that resolved one
    pub zone_payouts: Vec<(String, f64)>,

    /// Collapsed event payout under the aggregation mode
    pub payout: Option<f64>,
}

/// Per-zone statistics for one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneStatistics {
    pub zone_id: String,

    /// Events that triggered this zone
    pub qualifying_events: u32,

    /// Qualifying events per year analyzed
    pub annual_frequency: f64,

    /// Poisson estimate of at least one trigger per year: 1 - e^(-freq)
    pub trigger_probability: f64,

    /// Sum of this zone's own payouts across the catalog
    pub total_payout: f64,

    /// total_payout / years analyzed
    pub expected_annual_payout: f64,

    /// Largest single-event payout from this zone
    pub max_event_payout: f64,
}

/// Cross-zone statistics for one analysis run
///
/// Recomputed from scratch on every input change; never patched
/// incrementally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateStatistics {
    pub total_zones: u32,
    pub total_events: u32,

    /// Events that triggered at least one zone
    pub qualifying_events: u32,

    /// Analysis window in years
    pub years_analyzed: f64,

    /// Qualifying events per year
    pub annual_frequency: f64,

    /// Poisson estimate 1 - e^(-annual_frequency); the same transform is
    /// applied to the overall and per-zone statistics
    pub trigger_probability: f64,

    /// Total historical payout / years analyzed
    pub expected_annual_payout: f64,

    /// Largest collapsed single-event payout
    pub max_event_payout: f64,

    /// Sum of collapsed event payouts across the catalog
    pub total_payout: f64,

    /// total_payout / qualifying events (0 when none qualify)
    pub avg_payout_per_event: f64,

    /// Events that qualified in more than one zone
    pub multi_zone_events: u32,

    /// Average zones triggered per qualifying event (0 when none qualify)
    pub avg_zones_per_event: f64,

    /// Per-zone breakdown
    pub zone_stats: Vec<ZoneStatistics>,

    /// Per-event rows, populated only with detailed output enabled
    pub event_rows: Vec<EventPayoutRow>,
}
