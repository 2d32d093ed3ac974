//! Run the per-zone scenario sweep for every zone in a zone file
//!
//! Sweeps a fixed matrix of intensity-threshold deltas crossed with
//! boundary extensions, one matrix per zone, and writes the reports as
//! JSON. Zones sweep independently, so the matrix runs in parallel.

use anyhow::{anyhow, Context, Result};
use catrisk::analysis::{AggregationMode, AnalysisConfig};
use catrisk::event::load_events;
use catrisk::stress::{StressTester, SweepReport};
use catrisk::zone::load_zones;
use clap::Parser;
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(about = "Per-zone stress sensitivity sweep")]
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

    /// Output path for the JSON report
    #[arg(long, default_value = "sweep_output.json")]
    output: PathBuf,
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
    let catalog = load_events(&args.events)
        .map_err(|e| anyhow!("{}", e))
        .with_context(|| format!("loading events from {}", args.events.display()))?;

    println!(
        "Loaded {} zones, {} events ({:.1} year span)",
        zones.len(),
        catalog.len(),
        catalog.span_years()
    );

    let analysis = AnalysisConfig {
        mode: parse_mode(&args.mode)?,
        years_analyzed: args.years,
        detailed_output: false,
    };

    let start = Instant::now();
    let reports: Vec<SweepReport> = zones
        .par_iter()
        .map(|zone| {
            let mut tester = StressTester::new();
            tester
                .sweep(zone, &catalog, &analysis)
                .map_err(|e| anyhow!("zone {}: {}", zone.id, e))
        })
        .collect::<Result<_>>()?;
    println!("Swept {} zones in {:?}", reports.len(), start.elapsed());

    for report in &reports {
        let worst = report
            .cells
            .iter()
            .max_by(|a, b| {
                a.probability_change_pct
                    .abs()
                    .total_cmp(&b.probability_change_pct.abs())
            })
            .expect("sweep matrix is never empty");
        println!(
            "  {}: baseline p={:.1}%, most sensitive cell (delta {:+.1}, +{} km) -> {:+.1}%",
            report.zone_id,
            report.baseline.trigger_probability * 100.0,
            worst.intensity_delta,
            worst.extension_km,
            worst.probability_change_pct,
        );
    }

    let json = serde_json::to_string_pretty(&reports)?;
    std::fs::write(&args.output, json)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("Sweep reports written to: {}", args.output.display());

    Ok(())
}
