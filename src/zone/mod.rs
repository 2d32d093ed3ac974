//! Zone definitions: trigger regions, criteria, payout schedules, and loading

mod data;
pub mod loader;

pub use data::{PayoutModel, PayoutStructure, PayoutTier, TriggerCriteria, Zone, ZoneError};
pub use loader::{load_zones, load_zones_from_reader};
