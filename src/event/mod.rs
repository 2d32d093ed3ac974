//! Hazard events: peril-tagged records and catalog loading

mod data;
pub mod loader;

pub use data::{Event, EventCatalog, HazardDetails, Peril};
pub use loader::{load_events, load_events_from_reader};
