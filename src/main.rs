//! Catrisk CLI
//!
//! Demo run of the trigger-zone analysis pipeline against a small
//! built-in Gulf Coast hurricane scenario

use catrisk::{
    AggregationMode, AnalysisConfig, AnalysisEngine, Event, EventCatalog, HazardDetails,
    StressConfig, StressTester, TriggerCriteria, Zone,
};
use catrisk::stress::{ExtensionMode, ExtensionPolicy};
use catrisk::zone::{PayoutModel, PayoutStructure, PayoutTier};
use chrono::{TimeZone, Utc};
use std::fs::File;
use std::io::Write;

fn tier(name: &str, min: f64, max: Option<f64>, multiplier: f64) -> PayoutTier {
    PayoutTier {
        name: name.to_string(),
        min_intensity: min,
        max_intensity: max,
        amount: None,
        percent: None,
        multiplier: Some(multiplier),
    }
}

fn cyclone(id: &str, year: i32, month: u32, lat: f64, lon: f64, category: f64) -> Event {
    Event {
        id: id.to_string(),
        latitude: lat,
        longitude: lon,
        time: Utc.with_ymd_and_hms(year, month, 15, 12, 0, 0).unwrap(),
        hazard: HazardDetails::TropicalCyclone {
            category,
            wind_speed_kt: None,
            pressure_mb: None,
        },
    }
}

fn main() {
    env_logger::init();

    println!("Catrisk v0.1.0");
    println!("==============\n");

    // Gulf Coast trigger zone: Cat 3+ with a tiered payout schedule
    let gulf = Zone::new("gulf", "Gulf Coast", 24.0, 30.0, -88.0, -80.0)
        .expect("valid zone bounds")
        .with_criteria(TriggerCriteria {
            min_category: Some(3.0),
            ..Default::default()
        })
        .with_payout(PayoutStructure {
            base_amount: 1_000_000.0,
            currency: "USD".to_string(),
            model: PayoutModel::Tiered,
            tiers: vec![
                tier("Cat 3", 3.0, Some(3.0), 0.6),
                tier("Cat 4", 4.0, Some(4.0), 0.8),
                tier("Cat 5", 5.0, None, 1.0),
            ],
        });

    // Atlantic seaboard zone: binary payout on any Cat 4+
    let seaboard = Zone::new("seaboard", "Atlantic Seaboard", 30.0, 36.0, -82.0, -75.0)
        .expect("valid zone bounds")
        .with_criteria(TriggerCriteria {
            min_category: Some(4.0),
            ..Default::default()
        })
        .with_payout(PayoutStructure {
            base_amount: 750_000.0,
            currency: "USD".to_string(),
            model: PayoutModel::Binary,
            tiers: Vec::new(),
        });

    let zones = vec![gulf, seaboard];

    // Ten seasons of landfalling storms
    let catalog = EventCatalog::new(vec![
        cyclone("charley_2004", 2004, 8, 26.9, -82.2, 4.0),
        cyclone("katrina_2005", 2005, 8, 29.3, -89.6, 3.0),
        cyclone("wilma_2005", 2005, 10, 25.9, -81.7, 3.0),
        cyclone("ike_2008", 2008, 9, 29.3, -94.7, 2.0),
        cyclone("irma_2017", 2017, 9, 25.9, -81.7, 4.0),
        cyclone("michael_2018", 2018, 10, 30.0, -85.4, 5.0),
        cyclone("ian_2022", 2022, 9, 26.7, -82.2, 4.0),
        cyclone("idalia_2023", 2023, 8, 29.8, -83.4, 3.0),
    ]);

    println!("Zones: {}", zones.len());
    for zone in &zones {
        println!(
            "  {} [{:.1}..{:.1}N, {:.1}..{:.1}E]",
            zone.name, zone.south, zone.north, zone.west, zone.east
        );
    }
    println!("Events: {} ({:.1} year span)\n", catalog.len(), catalog.span_years());

    let config = AnalysisConfig {
        mode: AggregationMode::WorstOnly,
        years_analyzed: Some(20.0),
        detailed_output: true,
    };
    let engine = AnalysisEngine::new(config.clone());
    let stats = engine.analyze(&zones, &catalog);

    // Per-event table
    println!(
        "{:>16} {:>10} {:>6} {:>14}",
        "Event", "Intensity", "Zones", "Payout"
    );
    println!("{}", "-".repeat(50));
    for row in &stats.event_rows {
        println!(
            "{:>16} {:>10.1} {:>6} {:>14}",
            row.event_id,
            row.intensity,
            row.zones_triggered.len(),
            row.payout
                .map(|p| format!("${:.0}", p))
                .unwrap_or_else(|| "-".to_string()),
        );
    }

    // Write per-event results to CSV
    let csv_path = "analysis_output.csv";
    let mut file = File::create(csv_path).expect("Unable to create CSV file");
    writeln!(file, "EventID,Peril,Intensity,ZonesTriggered,Payout").unwrap();
    for row in &stats.event_rows {
        writeln!(
            file,
            "{},{},{:.2},{},{}",
            row.event_id,
            row.peril.as_str(),
            row.intensity,
            row.zones_triggered.join(";"),
            row.payout.map(|p| format!("{:.2}", p)).unwrap_or_default(),
        )
        .unwrap();
    }
    println!("\nPer-event results written to: {}", csv_path);

    // Summary
    println!("\nSummary ({} aggregation):", engine.config().mode.as_str());
    println!("  Qualifying Events: {} / {}", stats.qualifying_events, stats.total_events);
    println!("  Annual Frequency: {:.3}", stats.annual_frequency);
    println!("  Trigger Probability: {:.1}%", stats.trigger_probability * 100.0);
    println!("  Expected Annual Payout: ${:.0}", stats.expected_annual_payout);
    println!("  Max Single-Event Payout: ${:.0}", stats.max_event_payout);
    println!("  Total Historical Payout: ${:.0}", stats.total_payout);
    println!("  Multi-Zone Events: {}", stats.multi_zone_events);

    // Stress test: 50 km per-zone boundary extension
    let stress_config = StressConfig {
        policy: ExtensionPolicy::FixedKm(50.0),
        mode: ExtensionMode::PerZone,
        analysis: AnalysisConfig {
            detailed_output: false,
            ..config
        },
    };
    let mut tester = StressTester::new();
    let comparison = tester
        .run(&zones, &catalog, &stress_config)
        .expect("stress run");

    println!("\nStress Test (50 km per-zone extension):");
    println!(
        "  Qualifying Events: {} -> {} ({:+.1}%)",
        comparison.baseline.qualifying_events,
        comparison.extended.qualifying_events,
        comparison.qualifying_events.percent,
    );
    println!(
        "  Trigger Probability: {:.1}% -> {:.1}% ({:+.1}%)",
        comparison.trigger_probability.baseline * 100.0,
        comparison.trigger_probability.extended * 100.0,
        comparison.trigger_probability.percent,
    );
    println!(
        "  Expected Annual Payout: ${:.0} -> ${:.0} ({:+.1}%)",
        comparison.expected_annual_payout.baseline,
        comparison.expected_annual_payout.extended,
        comparison.expected_annual_payout.percent,
    );
}
