//! Load event catalogs from CSV files
//!
//! Catalogs arrive flat (one row per event, peril-specific columns left
//! blank where not applicable) and are shaped into the tagged event type.

use super::{Event, EventCatalog, HazardDetails};
use chrono::{DateTime, Utc};
use csv::Reader;
use std::error::Error;
use std::path::Path;

/// Raw CSV row for one event
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    id: String,
    peril: String,
    time: DateTime<Utc>,
    latitude: f64,
    longitude: f64,
    /// Primary intensity (magnitude, category, or peril scalar)
    intensity: f64,
    #[serde(default)]
    depth_km: Option<f64>,
    #[serde(default)]
    wind_speed_kt: Option<f64>,
    #[serde(default)]
    pressure_mb: Option<f64>,
}

impl CsvRow {
    fn to_event(self) -> Result<Event, Box<dyn Error>> {
        let hazard = match self.peril.as_str() {
            "earthquake" => HazardDetails::Earthquake {
                magnitude: self.intensity,
                depth_km: self.depth_km,
            },
            "tropical_cyclone" => HazardDetails::TropicalCyclone {
                category: self.intensity,
                wind_speed_kt: self.wind_speed_kt,
                pressure_mb: self.pressure_mb,
            },
            "wildfire" => HazardDetails::Wildfire {
                intensity: self.intensity,
            },
            "severe_weather" => HazardDetails::SevereWeather {
                magnitude: self.intensity,
            },
            other => return Err(format!("Unknown peril: {}", other).into()),
        };

        Ok(Event {
            id: self.id,
            latitude: self.latitude,
            longitude: self.longitude,
            time: self.time,
            hazard,
        })
    }
}

/// Load an event catalog from a CSV file
pub fn load_events<P: AsRef<Path>>(path: P) -> Result<EventCatalog, Box<dyn Error>> {
    let mut reader = Reader::from_path(path)?;
    let mut events = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        events.push(row.to_event()?);
    }

    Ok(EventCatalog::new(events))
}

/// Load an event catalog from any reader (e.g., string buffer, network stream)
pub fn load_events_from_reader<R: std::io::Read>(reader: R) -> Result<EventCatalog, Box<dyn Error>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut events = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        events.push(row.to_event()?);
    }

    Ok(EventCatalog::new(events))
}
