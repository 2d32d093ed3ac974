//! Snapshot runner for efficient batch analyses
//!
//! Loads an event catalog once, then allows running many zone-set and
//! config combinations without re-reading files. Each run takes an
//! explicit snapshot and returns a fresh result; the runner never holds
//! mutable analysis state.

use crate::analysis::{AggregateStatistics, AnalysisConfig, AnalysisEngine};
use crate::event::{loader, EventCatalog};
use crate::stress::{StressComparison, StressConfig, StressError, StressTester};
use crate::zone::Zone;

/// Pre-loaded analysis runner
///
/// # Example
/// ```ignore
/// let runner = AnalysisRunner::from_csv_path("events.csv")?;
///
/// for mode in [AggregationMode::WorstOnly, AggregationMode::SumAll] {
///     let config = AnalysisConfig { mode, ..Default::default() };
///     let stats = runner.run(&zones, config);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AnalysisRunner {
    /// Immutable event-catalog snapshot
    catalog: EventCatalog,
}

impl AnalysisRunner {
    /// Create a runner over an already-materialized catalog
    pub fn new(catalog: EventCatalog) -> Self {
        Self { catalog }
    }

    /// Create a runner by loading an event catalog from CSV
    pub fn from_csv_path<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Self {
            catalog: loader::load_events(path)?,
        })
    }

    /// Run a single analysis with the given config
    pub fn run(&self, zones: &[Zone], config: AnalysisConfig) -> AggregateStatistics {
        AnalysisEngine::new(config).analyze(zones, &self.catalog)
    }

    /// Run multiple configs against the same zone set
    pub fn run_scenarios(
        &self,
        zones: &[Zone],
        configs: &[AnalysisConfig],
    ) -> Vec<AggregateStatistics> {
        configs
            .iter()
            .map(|config| self.run(zones, config.clone()))
            .collect()
    }

    /// Run a baseline-vs-extended stress comparison
    pub fn run_stress(
        &self,
        zones: &[Zone],
        config: &StressConfig,
    ) -> Result<StressComparison, StressError> {
        StressTester::new().run(zones, &self.catalog, config)
    }

    /// Get reference to the catalog snapshot
    pub fn catalog(&self) -> &EventCatalog {
        &self.catalog
    }
}
