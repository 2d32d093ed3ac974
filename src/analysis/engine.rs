//! Aggregation engine: collapses per-zone trigger results into
//! cross-zone statistics under a selectable aggregation mode

use log::debug;
use serde::{Deserialize, Serialize};

use super::stats::{AggregateStatistics, EventPayoutRow, ZoneStatistics};
use crate::event::EventCatalog;
use crate::trigger::{evaluate, TriggerResult};
use crate::zone::Zone;

/// Policy for combining one event's payouts across multiple triggered zones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationMode {
    /// Event payout = maximum per-zone payout (at most one zone counts)
    WorstOnly,
    /// Event payout = sum of per-zone payouts, capped at the largest
    /// single zone's base amount across the zone set
    Capped100,
    /// Event payout = unclamped sum across all triggering zones
    SumAll,
}

impl AggregationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AggregationMode::WorstOnly => "worst_only",
            AggregationMode::Capped100 => "capped_100",
            AggregationMode::SumAll => "sum_all",
        }
    }
}

/// Configuration for an analysis run
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Cross-zone payout aggregation policy
    pub mode: AggregationMode,

    /// Analysis window override; defaults to the catalog's own span
    pub years_analyzed: Option<f64>,

    /// Whether to keep per-event rows in the result
    pub detailed_output: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            mode: AggregationMode::WorstOnly,
            years_analyzed: None,
            detailed_output: true,
        }
    }
}

/// Working accumulator for one zone during a run
#[derive(Debug, Default)]
struct ZoneAccumulator {
    qualifying_events: u32,
    total_payout: f64,
    max_event_payout: f64,
}

/// Main aggregation engine
///
/// Each run takes an explicit snapshot of zones and events and returns a
/// fresh result; the engine holds no state between runs beyond its config.
pub struct AnalysisEngine {
    config: AnalysisConfig,
}

impl AnalysisEngine {
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Run the full trigger/payout/aggregation pipeline
    pub fn analyze(&self, zones: &[Zone], catalog: &EventCatalog) -> AggregateStatistics {
        let years = self
            .config
            .years_analyzed
            .unwrap_or_else(|| catalog.span_years());

        debug!(
            "analyzing {} events against {} zones ({} mode, {:.2} years)",
            catalog.len(),
            zones.len(),
            self.config.mode.as_str(),
            years
        );

        // Ceiling for capped_100: the largest single zone's base amount
        // across the whole zone set
        let payout_cap = zones
            .iter()
            .filter_map(|z| z.payout.as_ref().map(|p| p.base_amount))
            .fold(0.0_f64, f64::max);

        let mut zone_accs: Vec<ZoneAccumulator> =
            zones.iter().map(|_| ZoneAccumulator::default()).collect();

        let mut qualifying_events = 0u32;
        let mut multi_zone_events = 0u32;
        let mut zones_triggered_sum = 0u64;
        let mut total_payout = 0.0;
        let mut max_event_payout = 0.0_f64;
        let mut event_rows = Vec::new();

        for event in &catalog.events {
            let results: Vec<TriggerResult> =
                zones.iter().map(|zone| evaluate(event, zone)).collect();

            let triggered: Vec<(usize, &TriggerResult)> = results
                .iter()
                .enumerate()
                .filter(|(_, r)| r.triggered)
                .collect();

            if triggered.is_empty() {
                continue;
            }

            qualifying_events += 1;
            zones_triggered_sum += triggered.len() as u64;
            if triggered.len() > 1 {
                multi_zone_events += 1;
            }

            for (idx, result) in &triggered {
                let acc = &mut zone_accs[*idx];
                acc.qualifying_events += 1;
                if let Some(amount) = result.payout {
                    acc.total_payout += amount;
                    acc.max_event_payout = acc.max_event_payout.max(amount);
                }
            }

            let event_payout = self.collapse_event_payout(&triggered, payout_cap);
            if let Some(amount) = event_payout {
                total_payout += amount;
                max_event_payout = max_event_payout.max(amount);
            }

            if self.config.detailed_output {
                event_rows.push(EventPayoutRow {
                    event_id: event.id.clone(),
                    peril: event.peril(),
                    intensity: event.intensity(),
                    zones_triggered: triggered
                        .iter()
                        .map(|(_, r)| r.zone_id.clone())
                        .collect(),
                    zone_payouts: triggered
                        .iter()
                        .filter_map(|(_, r)| r.payout.map(|a| (r.zone_id.clone(), a)))
                        .collect(),
                    payout: event_payout,
                });
            }
        }

        let annual_frequency = safe_div(qualifying_events as f64, years);

        let zone_stats = zones
            .iter()
            .zip(&zone_accs)
            .map(|(zone, acc)| {
                let freq = safe_div(acc.qualifying_events as f64, years);
                ZoneStatistics {
                    zone_id: zone.id.clone(),
                    qualifying_events: acc.qualifying_events,
                    annual_frequency: freq,
                    trigger_probability: poisson_probability(freq),
                    total_payout: acc.total_payout,
                    expected_annual_payout: safe_div(acc.total_payout, years),
                    max_event_payout: acc.max_event_payout,
                }
            })
            .collect();

        AggregateStatistics {
            total_zones: zones.len() as u32,
            total_events: catalog.len() as u32,
            qualifying_events,
            years_analyzed: years,
            annual_frequency,
            trigger_probability: poisson_probability(annual_frequency),
            expected_annual_payout: safe_div(total_payout, years),
            max_event_payout,
            total_payout,
            avg_payout_per_event: safe_div(total_payout, qualifying_events as f64),
            multi_zone_events,
            avg_zones_per_event: safe_div(zones_triggered_sum as f64, qualifying_events as f64),
            zone_stats,
            event_rows,
        }
    }

    /// Collapse one event's per-zone payouts to a single amount
    fn collapse_event_payout(
        &self,
        triggered: &[(usize, &TriggerResult)],
        payout_cap: f64,
    ) -> Option<f64> {
        let amounts: Vec<f64> = triggered.iter().filter_map(|(_, r)| r.payout).collect();
        if amounts.is_empty() {
            return None;
        }
        let collapsed = match self.config.mode {
            AggregationMode::WorstOnly => amounts.iter().copied().fold(0.0_f64, f64::max),
            AggregationMode::SumAll => amounts.iter().sum(),
            AggregationMode::Capped100 => {
                // The ceiling never undercuts the worst single-zone payout:
                // a tier can resolve above any base amount (fixed amount or
                // multiplier > 1), and capped_100 must stay >= worst_only
                let worst = amounts.iter().copied().fold(0.0_f64, f64::max);
                let sum: f64 = amounts.iter().sum();
                sum.min(payout_cap).max(worst)
            }
        };
        Some(collapsed)
    }
}

/// Guarded division: 0 when the denominator is not strictly positive
fn safe_div(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Annualized trigger probability under a Poisson arrival assumption
fn poisson_probability(annual_frequency: f64) -> f64 {
    1.0 - (-annual_frequency).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Event, HazardDetails};
    use crate::zone::{PayoutModel, PayoutStructure, PayoutTier, TriggerCriteria};
    use approx::assert_relative_eq;
    use chrono::{TimeZone, Utc};

    fn cyclone(id: &str, year: i32, lat: f64, lon: f64, category: f64) -> Event {
        Event {
            id: id.to_string(),
            latitude: lat,
            longitude: lon,
            time: Utc.with_ymd_and_hms(year, 9, 1, 0, 0, 0).unwrap(),
            hazard: HazardDetails::TropicalCyclone {
                category,
                wind_speed_kt: None,
                pressure_mb: None,
            },
        }
    }

    fn binary_zone(id: &str, base: f64) -> Zone {
        Zone::new(id, id, 24.0, 30.0, -88.0, -80.0)
            .unwrap()
            .with_criteria(TriggerCriteria {
                min_category: Some(3.0),
                ..Default::default()
            })
            .with_payout(PayoutStructure {
                base_amount: base,
                currency: "USD".to_string(),
                model: PayoutModel::Binary,
                tiers: Vec::new(),
            })
    }

    fn tiered_zone(id: &str) -> Zone {
        Zone::new(id, id, 24.0, 30.0, -88.0, -80.0)
            .unwrap()
            .with_criteria(TriggerCriteria {
                min_category: Some(3.0),
                ..Default::default()
            })
            .with_payout(PayoutStructure {
                base_amount: 1_000_000.0,
                currency: "USD".to_string(),
                model: PayoutModel::Tiered,
                tiers: vec![
                    PayoutTier {
                        name: "Cat 3".to_string(),
                        min_intensity: 3.0,
                        max_intensity: Some(3.0),
                        amount: None,
                        percent: None,
                        multiplier: Some(0.6),
                    },
                    PayoutTier {
                        name: "Cat 4".to_string(),
                        min_intensity: 4.0,
                        max_intensity: Some(4.0),
                        amount: None,
                        percent: None,
                        multiplier: Some(0.8),
                    },
                    PayoutTier {
                        name: "Cat 5".to_string(),
                        min_intensity: 5.0,
                        max_intensity: None,
                        amount: None,
                        percent: None,
                        multiplier: Some(1.0),
                    },
                ],
            })
    }

    fn ten_year_config(mode: AggregationMode) -> AnalysisConfig {
        AnalysisConfig {
            mode,
            years_analyzed: Some(10.0),
            detailed_output: true,
        }
    }

    #[test]
    fn test_single_zone_statistics() {
        let zones = vec![tiered_zone("gulf")];
        let catalog = EventCatalog::new(vec![
            cyclone("tc1", 2015, 27.0, -84.0, 4.0), // triggers, 800k
            cyclone("tc2", 2018, 27.0, -84.0, 2.0), // fails criteria
            cyclone("tc3", 2021, 27.0, -84.0, 5.0), // triggers, 1M
            cyclone("tc4", 2022, 35.0, -84.0, 5.0), // outside zone
        ]);

        let engine = AnalysisEngine::new(ten_year_config(AggregationMode::WorstOnly));
        let stats = engine.analyze(&zones, &catalog);

        assert_eq!(stats.total_events, 4);
        assert_eq!(stats.qualifying_events, 2);
        assert_relative_eq!(stats.annual_frequency, 0.2);
        assert_relative_eq!(stats.trigger_probability, 1.0 - (-0.2_f64).exp());
        assert_relative_eq!(stats.total_payout, 1_800_000.0);
        assert_relative_eq!(stats.expected_annual_payout, 180_000.0);
        assert_relative_eq!(stats.max_event_payout, 1_000_000.0);
        assert_relative_eq!(stats.avg_payout_per_event, 900_000.0);
        assert_eq!(stats.multi_zone_events, 0);
        assert_relative_eq!(stats.avg_zones_per_event, 1.0);

        let zs = &stats.zone_stats[0];
        assert_eq!(zs.qualifying_events, 2);
        assert_relative_eq!(zs.trigger_probability, stats.trigger_probability);
    }

    #[test]
    fn test_worst_only_takes_maximum() {
        let zones = vec![binary_zone("a", 500_000.0), binary_zone("b", 700_000.0)];
        let catalog = EventCatalog::new(vec![cyclone("tc1", 2020, 27.0, -84.0, 4.0)]);

        let engine = AnalysisEngine::new(ten_year_config(AggregationMode::WorstOnly));
        let stats = engine.analyze(&zones, &catalog);

        assert_eq!(stats.qualifying_events, 1);
        assert_eq!(stats.multi_zone_events, 1);
        assert_relative_eq!(stats.avg_zones_per_event, 2.0);
        assert_relative_eq!(stats.total_payout, 700_000.0);
    }

    #[test]
    fn test_sum_all_is_unclamped() {
        let zones = vec![binary_zone("a", 500_000.0), binary_zone("b", 700_000.0)];
        let catalog = EventCatalog::new(vec![cyclone("tc1", 2020, 27.0, -84.0, 4.0)]);

        let engine = AnalysisEngine::new(ten_year_config(AggregationMode::SumAll));
        let stats = engine.analyze(&zones, &catalog);
        assert_relative_eq!(stats.total_payout, 1_200_000.0);
    }

    #[test]
    fn test_capped_100_ceiling() {
        let zones = vec![binary_zone("a", 500_000.0), binary_zone("b", 700_000.0)];
        let catalog = EventCatalog::new(vec![cyclone("tc1", 2020, 27.0, -84.0, 4.0)]);

        let engine = AnalysisEngine::new(ten_year_config(AggregationMode::Capped100));
        let stats = engine.analyze(&zones, &catalog);
        // Sum 1.2M capped at the largest base amount across zones (700k)
        assert_relative_eq!(stats.total_payout, 700_000.0);
    }

    #[test]
    fn test_capped_100_never_undercuts_worst() {
        // Zone b's fixed tier pays above every base amount in the set, so
        // the ceiling alone would drop capped_100 below worst_only
        let over_base = Zone::new("b", "b", 24.0, 30.0, -88.0, -80.0)
            .unwrap()
            .with_criteria(TriggerCriteria {
                min_category: Some(3.0),
                ..Default::default()
            })
            .with_payout(PayoutStructure {
                base_amount: 1_000_000.0,
                currency: "USD".to_string(),
                model: PayoutModel::Tiered,
                tiers: vec![PayoutTier {
                    name: "Cat 4+".to_string(),
                    min_intensity: 4.0,
                    max_intensity: None,
                    amount: Some(2_000_000.0),
                    percent: None,
                    multiplier: None,
                }],
            });
        let zones = vec![binary_zone("a", 100_000.0), over_base];
        let catalog = EventCatalog::new(vec![cyclone("tc1", 2020, 27.0, -84.0, 4.0)]);

        let run = |mode| {
            AnalysisEngine::new(ten_year_config(mode))
                .analyze(&zones, &catalog)
                .total_payout
        };
        let worst = run(AggregationMode::WorstOnly);
        let capped = run(AggregationMode::Capped100);
        let sum = run(AggregationMode::SumAll);

        assert_relative_eq!(worst, 2_000_000.0);
        assert_relative_eq!(sum, 2_100_000.0);
        // Capped floors at the worst single-zone payout instead of the
        // (smaller) largest base amount
        assert_relative_eq!(capped, 2_000_000.0);
        assert!(sum >= capped && capped >= worst);
    }

    #[test]
    fn test_mode_ordering_property() {
        let zones = vec![
            binary_zone("a", 500_000.0),
            binary_zone("b", 700_000.0),
            tiered_zone("c"),
        ];
        let catalog = EventCatalog::new(vec![
            cyclone("tc1", 2014, 27.0, -84.0, 3.0),
            cyclone("tc2", 2017, 26.0, -85.0, 4.0),
            cyclone("tc3", 2021, 29.0, -81.0, 5.0),
        ]);

        let run = |mode| {
            AnalysisEngine::new(ten_year_config(mode))
                .analyze(&zones, &catalog)
                .total_payout
        };
        let worst = run(AggregationMode::WorstOnly);
        let capped = run(AggregationMode::Capped100);
        let sum = run(AggregationMode::SumAll);
        assert!(sum >= capped);
        assert!(capped >= worst);
    }

    #[test]
    fn test_empty_catalog_yields_zero_statistics() {
        let zones = vec![tiered_zone("gulf")];
        let engine = AnalysisEngine::new(AnalysisConfig::default());
        let stats = engine.analyze(&zones, &EventCatalog::default());

        assert_eq!(stats.qualifying_events, 0);
        assert_eq!(stats.annual_frequency, 0.0);
        assert_eq!(stats.avg_payout_per_event, 0.0);
        assert_eq!(stats.expected_annual_payout, 0.0);
    }

    #[test]
    fn test_triggered_without_payout_still_qualifies() {
        let open = Zone::new("open", "Open", 24.0, 30.0, -88.0, -80.0).unwrap();
        let catalog = EventCatalog::new(vec![cyclone("tc1", 2020, 27.0, -84.0, 1.0)]);

        let engine = AnalysisEngine::new(ten_year_config(AggregationMode::SumAll));
        let stats = engine.analyze(&[open], &catalog);

        assert_eq!(stats.qualifying_events, 1);
        assert_eq!(stats.total_payout, 0.0);
        assert_eq!(stats.event_rows[0].payout, None);
    }

    #[test]
    fn test_detailed_output_toggle() {
        let zones = vec![tiered_zone("gulf")];
        let catalog = EventCatalog::new(vec![cyclone("tc1", 2020, 27.0, -84.0, 4.0)]);

        let mut config = ten_year_config(AggregationMode::WorstOnly);
        config.detailed_output = false;
        let stats = AnalysisEngine::new(config).analyze(&zones, &catalog);
        assert!(stats.event_rows.is_empty());
        assert_eq!(stats.qualifying_events, 1);
    }
}
