//! Stress testing: clustering, boundary extension, and baseline vs.
//! extended comparison runs

mod cluster;
mod extension;
mod orchestrator;

pub use cluster::{cluster_zones, ZoneCluster, DEFAULT_PROXIMITY_KM};
pub use extension::{
    extend_zones, ClusterEnvelope, ExtendedZoneSet, ExtensionMode, ExtensionPolicy,
};
pub use orchestrator::{
    Delta, RunState, StressComparison, StressConfig, StressError, StressTester, SweepCell,
    SweepReport, SWEEP_EXTENSIONS_KM, SWEEP_INTENSITY_DELTAS,
};
