//! Stress-test orchestration: baseline vs. extended comparison runs
//! and per-zone scenario sweeps

use log::info;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::extension::{extend_zones, ClusterEnvelope, ExtensionMode, ExtensionPolicy};
use crate::analysis::{AggregateStatistics, AnalysisConfig, AnalysisEngine};
use crate::event::EventCatalog;
use crate::zone::{TriggerCriteria, Zone, ZoneError};

/// Intensity-threshold deltas for the scenario sweep
/// (magnitude steps; category thresholds shift by the same amounts)
pub const SWEEP_INTENSITY_DELTAS: [f64; 5] = [-1.0, -0.5, 0.0, 0.5, 1.0];

/// Boundary extensions for the scenario sweep, km
pub const SWEEP_EXTENSIONS_KM: [f64; 4] = [0.0, 25.0, 50.0, 100.0];

/// Orchestrator state; a run either completes or errors back to `Idle`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
}

/// Errors that abort a stress run before any result is produced
#[derive(Debug, Error)]
pub enum StressError {
    #[error("stress test already running")]
    AlreadyRunning,

    #[error(transparent)]
    InvalidZone(#[from] ZoneError),

    #[error("zone {0} not found in zone set")]
    UnknownZone(String),
}

/// Configuration for a stress run
#[derive(Debug, Clone)]
pub struct StressConfig {
    /// How far to grow zone rectangles
    pub policy: ExtensionPolicy,

    /// Per-zone or cluster extension
    pub mode: ExtensionMode,

    /// Aggregation settings shared by the baseline and extended runs
    pub analysis: AnalysisConfig,
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            policy: ExtensionPolicy::FixedKm(50.0),
            mode: ExtensionMode::PerZone,
            analysis: AnalysisConfig::default(),
        }
    }
}

/// Absolute and percentage change of one statistic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Delta {
    pub baseline: f64,
    pub extended: f64,
    pub absolute: f64,
    pub percent: f64,
}

impl Delta {
    fn between(baseline: f64, extended: f64) -> Self {
        let absolute = extended - baseline;
        let percent = if baseline != 0.0 {
            absolute / baseline * 100.0
        } else {
            0.0
        };
        Self {
            baseline,
            extended,
            absolute,
            percent,
        }
    }
}

/// Baseline vs. extended comparison output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StressComparison {
    pub baseline: AggregateStatistics,
    pub extended: AggregateStatistics,
    pub trigger_probability: Delta,
    pub expected_annual_payout: Delta,
    pub qualifying_events: Delta,

    /// Shared cluster envelopes from cluster-mode extension, for display
    pub envelopes: Vec<ClusterEnvelope>,
}

/// One cell of a per-zone scenario sweep
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepCell {
    /// Shift applied to the zone's minimum intensity thresholds
    pub intensity_delta: f64,

    /// Boundary extension applied, km
    pub extension_km: f64,

    pub qualifying_events: u32,
    pub trigger_probability: f64,
    pub expected_annual_payout: f64,

    /// Percent change vs. the zone's own unmodified baseline
    pub probability_change_pct: f64,
    pub payout_change_pct: f64,
}

/// Full sweep matrix for one zone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepReport {
    pub zone_id: String,
    pub baseline: AggregateStatistics,
    pub cells: Vec<SweepCell>,
}

/// Stress-test orchestrator
///
/// Two states only; no partial results. Failures surface as errors and
/// the orchestrator returns to `Idle`.
#[derive(Debug)]
pub struct StressTester {
    state: RunState,
}

impl StressTester {
    pub fn new() -> Self {
        Self {
            state: RunState::Idle,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Run the baseline and extended pipelines and compute deltas
    pub fn run(
        &mut self,
        zones: &[Zone],
        catalog: &EventCatalog,
        config: &StressConfig,
    ) -> Result<StressComparison, StressError> {
        self.begin()?;
        let result = self.run_inner(zones, catalog, config);
        self.state = RunState::Idle;
        result
    }

    fn run_inner(
        &self,
        zones: &[Zone],
        catalog: &EventCatalog,
        config: &StressConfig,
    ) -> Result<StressComparison, StressError> {
        for zone in zones {
            zone.validate()?;
        }

        info!(
            "stress test: {} zones, {} events, {:?} / {:?}",
            zones.len(),
            catalog.len(),
            config.policy,
            config.mode
        );

        let engine = AnalysisEngine::new(config.analysis.clone());
        let baseline = engine.analyze(zones, catalog);

        let extended_set = extend_zones(zones, config.policy, config.mode);
        let extended = engine.analyze(&extended_set.zones, catalog);

        Ok(StressComparison {
            trigger_probability: Delta::between(
                baseline.trigger_probability,
                extended.trigger_probability,
            ),
            expected_annual_payout: Delta::between(
                baseline.expected_annual_payout,
                extended.expected_annual_payout,
            ),
            qualifying_events: Delta::between(
                baseline.qualifying_events as f64,
                extended.qualifying_events as f64,
            ),
            baseline,
            extended,
            envelopes: extended_set.envelopes,
        })
    }

    /// Scenario sweep for one zone: intensity deltas crossed with
    /// boundary extensions, each cell relative to the zone's own baseline
    pub fn sweep(
        &mut self,
        zone: &Zone,
        catalog: &EventCatalog,
        analysis: &AnalysisConfig,
    ) -> Result<SweepReport, StressError> {
        self.begin()?;
        let result = self.sweep_inner(zone, catalog, analysis);
        self.state = RunState::Idle;
        result
    }

    fn sweep_inner(
        &self,
        zone: &Zone,
        catalog: &EventCatalog,
        analysis: &AnalysisConfig,
    ) -> Result<SweepReport, StressError> {
        zone.validate()?;

        let engine = AnalysisEngine::new(analysis.clone());
        let baseline = engine.analyze(std::slice::from_ref(zone), catalog);

        let mut cells = Vec::with_capacity(SWEEP_INTENSITY_DELTAS.len() * SWEEP_EXTENSIONS_KM.len());
        for &delta in &SWEEP_INTENSITY_DELTAS {
            for &extension in &SWEEP_EXTENSIONS_KM {
                let scenario = sweep_zone(zone, delta, extension);
                let stats = engine.analyze(std::slice::from_ref(&scenario), catalog);
                cells.push(SweepCell {
                    intensity_delta: delta,
                    extension_km: extension,
                    qualifying_events: stats.qualifying_events,
                    trigger_probability: stats.trigger_probability,
                    expected_annual_payout: stats.expected_annual_payout,
                    probability_change_pct: percent_change(
                        baseline.trigger_probability,
                        stats.trigger_probability,
                    ),
                    payout_change_pct: percent_change(
                        baseline.expected_annual_payout,
                        stats.expected_annual_payout,
                    ),
                });
            }
        }

        Ok(SweepReport {
            zone_id: zone.id.clone(),
            baseline,
            cells,
        })
    }

    fn begin(&mut self) -> Result<(), StressError> {
        if self.state == RunState::Running {
            return Err(StressError::AlreadyRunning);
        }
        self.state = RunState::Running;
        Ok(())
    }
}

impl Default for StressTester {
    fn default() -> Self {
        Self::new()
    }
}

/// Zone copy with shifted intensity thresholds and extended bounds
fn sweep_zone(zone: &Zone, intensity_delta: f64, extension_km: f64) -> Zone {
    let mut scenario = zone.clone();
    if let Some(criteria) = &zone.criteria {
        scenario.criteria = Some(shift_intensity_thresholds(criteria, intensity_delta));
    }
    if extension_km > 0.0 {
        let extended = extend_zones(
            std::slice::from_ref(&scenario),
            ExtensionPolicy::FixedKm(extension_km),
            ExtensionMode::PerZone,
        );
        scenario = extended.zones.into_iter().next().unwrap_or(scenario);
    }
    scenario
}

/// Shift the minimum primary-intensity thresholds by a delta
fn shift_intensity_thresholds(criteria: &TriggerCriteria, delta: f64) -> TriggerCriteria {
    TriggerCriteria {
        min_magnitude: criteria.min_magnitude.map(|m| m + delta),
        min_category: criteria.min_category.map(|c| c + delta),
        ..criteria.clone()
    }
}

fn percent_change(baseline: f64, value: f64) -> f64 {
    if baseline != 0.0 {
        (value - baseline) / baseline * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::AggregationMode;
    use crate::event::{Event, HazardDetails};
    use crate::zone::{PayoutModel, PayoutStructure};
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};

    fn cyclone(id: &str, lat: f64, lon: f64, category: f64) -> Event {
        Event {
            id: id.to_string(),
            latitude: lat,
            longitude: lon,
            time: Utc.with_ymd_and_hms(2020, 9, 1, 0, 0, 0).unwrap(),
            hazard: HazardDetails::TropicalCyclone {
                category,
                wind_speed_kt: None,
                pressure_mb: None,
            },
        }
    }

    fn gulf_zone() -> Zone {
        Zone::new("gulf", "Gulf Coast", 24.0, 30.0, -88.0, -80.0)
            .unwrap()
            .with_criteria(TriggerCriteria {
                min_category: Some(3.0),
                ..Default::default()
            })
            .with_payout(PayoutStructure {
                base_amount: 1_000_000.0,
                currency: "USD".to_string(),
                model: PayoutModel::Binary,
                tiers: Vec::new(),
            })
    }

    fn test_config() -> StressConfig {
        StressConfig {
            policy: ExtensionPolicy::FixedKm(100.0),
            mode: ExtensionMode::PerZone,
            analysis: AnalysisConfig {
                mode: AggregationMode::WorstOnly,
                years_analyzed: Some(10.0),
                detailed_output: false,
            },
        }
    }

    #[test]
    fn test_extension_captures_nearby_event() {
        let zones = vec![gulf_zone()];
        // Just north of the zone boundary; a 100 km extension reaches it
        let catalog = EventCatalog::new(vec![
            cyclone("inside", 27.0, -84.0, 4.0),
            cyclone("nearby", 30.5, -84.0, 4.0),
        ]);

        let mut tester = StressTester::new();
        let comparison = tester.run(&zones, &catalog, &test_config()).unwrap();

        assert_eq!(comparison.baseline.qualifying_events, 1);
        assert_eq!(comparison.extended.qualifying_events, 2);
        assert_relative_eq!(comparison.qualifying_events.absolute, 1.0);
        assert_relative_eq!(comparison.qualifying_events.percent, 100.0);
        assert!(comparison.trigger_probability.absolute > 0.0);
        assert!(comparison.expected_annual_payout.percent > 0.0);
        assert_eq!(tester.state(), RunState::Idle);
    }

    #[test]
    fn test_identical_runs_have_zero_deltas() {
        let zones = vec![gulf_zone()];
        let catalog = EventCatalog::new(vec![cyclone("inside", 27.0, -84.0, 4.0)]);

        let mut config = test_config();
        config.policy = ExtensionPolicy::FixedKm(0.0);

        let mut tester = StressTester::new();
        let comparison = tester.run(&zones, &catalog, &config).unwrap();
        assert_relative_eq!(comparison.trigger_probability.absolute, 0.0);
        assert_relative_eq!(comparison.expected_annual_payout.percent, 0.0);
    }

    #[test]
    fn test_invalid_zone_errors_back_to_idle() {
        let mut bad = gulf_zone();
        bad.north = bad.south - 1.0;

        let mut tester = StressTester::new();
        let result = tester.run(&[bad], &EventCatalog::default(), &test_config());
        assert!(matches!(result, Err(StressError::InvalidZone(_))));
        assert_eq!(tester.state(), RunState::Idle);
    }

    #[test]
    fn test_sweep_matrix_shape_and_baseline_cell() {
        let zone = gulf_zone();
        let catalog = EventCatalog::new(vec![
            cyclone("tc1", 27.0, -84.0, 3.0),
            cyclone("tc2", 27.0, -84.0, 4.0),
        ]);

        let analysis = AnalysisConfig {
            mode: AggregationMode::WorstOnly,
            years_analyzed: Some(10.0),
            detailed_output: false,
        };

        let mut tester = StressTester::new();
        let report = tester.sweep(&zone, &catalog, &analysis).unwrap();
        assert_eq!(
            report.cells.len(),
            SWEEP_INTENSITY_DELTAS.len() * SWEEP_EXTENSIONS_KM.len()
        );

        // The unmodified cell matches the baseline exactly
        let unmodified = report
            .cells
            .iter()
            .find(|c| c.intensity_delta == 0.0 && c.extension_km == 0.0)
            .unwrap();
        assert_eq!(unmodified.qualifying_events, report.baseline.qualifying_events);
        assert_relative_eq!(unmodified.probability_change_pct, 0.0);

        // Raising the threshold by +1 drops the Cat 3 event
        let stricter = report
            .cells
            .iter()
            .find(|c| c.intensity_delta == 1.0 && c.extension_km == 0.0)
            .unwrap();
        assert_eq!(stricter.qualifying_events, 1);
        assert!(stricter.probability_change_pct < 0.0);
    }
}
