//! Run the full aggregation pipeline for a zone file and event catalog
//!
//! Prints the aggregate summary, writes per-event rows to CSV and the
//! full statistics record to JSON for downstream panels.

use anyhow::{anyhow, Context, Result};
use catrisk::analysis::{AggregationMode, AnalysisConfig};
use catrisk::event::load_events;
use catrisk::zone::load_zones;
use catrisk::AnalysisRunner;
use clap::Parser;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Trigger-zone catalog analysis")]
struct Args {
    /// Zone definitions (JSON array)
    #[arg(long)]
    zones: PathBuf,

    /// Event catalog (CSV)
    #[arg(long)]
    events: PathBuf,

    /// Aggregation mode: worst_only, capped_100, or sum_all
    #[arg(long, default_value = "worst_only")]
    mode: String,

    /// Analysis window in years; defaults to the catalog span
    #[arg(long)]
    years: Option<f64>,

    /// Per-event CSV output path
    #[arg(long, default_value = "catalog_events.csv")]
    csv: PathBuf,

    /// Statistics JSON output path
    #[arg(long, default_value = "catalog_stats.json")]
    json: PathBuf,
}

fn parse_mode(raw: &str) -> Result<AggregationMode> {
    match raw {
        "worst_only" => Ok(AggregationMode::WorstOnly),
        "capped_100" => Ok(AggregationMode::Capped100),
        "sum_all" => Ok(AggregationMode::SumAll),
        other => Err(anyhow!("unknown aggregation mode: {}", other)),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let zones = load_zones(&args.zones)
        .map_err(|e| anyhow!("{}", e))
        .with_context(|| format!("loading zones from {}", args.zones.display()))?;
    let runner = AnalysisRunner::from_csv_path(&args.events)
        .map_err(|e| anyhow!("{}", e))
        .with_context(|| format!("loading events from {}", args.events.display()))?;

    let config = AnalysisConfig {
        mode: parse_mode(&args.mode)?,
        years_analyzed: args.years,
        detailed_output: true,
    };
    let stats = runner.run(&zones, config);

    println!("Zones: {}  Events: {}", stats.total_zones, stats.total_events);
    println!("Qualifying Events: {}", stats.qualifying_events);
    println!("Years Analyzed: {:.1}", stats.years_analyzed);
    println!("Annual Frequency: {:.3}", stats.annual_frequency);
    println!("Trigger Probability: {:.1}%", stats.trigger_probability * 100.0);
    println!("Expected Annual Payout: ${:.0}", stats.expected_annual_payout);
    println!("Total Historical Payout: ${:.0}", stats.total_payout);
    println!("Avg Payout / Event: ${:.0}", stats.avg_payout_per_event);
    println!(
        "Multi-Zone Events: {} (avg {:.2} zones/event)",
        stats.multi_zone_events, stats.avg_zones_per_event
    );

    println!("\nPer-zone:");
    for zs in &stats.zone_stats {
        println!(
            "  {:>16}: {:>3} events, p={:.1}%, E[annual]=${:.0}",
            zs.zone_id,
            zs.qualifying_events,
            zs.trigger_probability * 100.0,
            zs.expected_annual_payout,
        );
    }

    let mut csv = std::fs::File::create(&args.csv)
        .with_context(|| format!("creating {}", args.csv.display()))?;
    writeln!(csv, "EventID,Peril,Intensity,ZonesTriggered,Payout")?;
    for row in &stats.event_rows {
        writeln!(
            csv,
            "{},{},{:.2},{},{}",
            row.event_id,
            row.peril.as_str(),
            row.intensity,
            row.zones_triggered.join(";"),
            row.payout.map(|p| format!("{:.2}", p)).unwrap_or_default(),
        )?;
    }

    std::fs::write(&args.json, serde_json::to_string_pretty(&stats)?)
        .with_context(|| format!("writing {}", args.json.display()))?;

    println!("\nPer-event rows written to: {}", args.csv.display());
    println!("Statistics written to: {}", args.json.display());

    Ok(())
}
