//! Hazard event data structures
//!
//! Events are externally supplied, immutable, read-only inputs. Each peril
//! is a closed variant carrying only the fields that peril defines; the
//! trigger evaluator dispatches on the tag rather than probing for keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Peril classification for a hazard event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Peril {
    Earthquake,
    TropicalCyclone,
    Wildfire,
    SevereWeather,
}

impl Peril {
    pub fn as_str(&self) -> &'static str {
        match self {
            Peril::Earthquake => "earthquake",
            Peril::TropicalCyclone => "tropical_cyclone",
            Peril::Wildfire => "wildfire",
            Peril::SevereWeather => "severe_weather",
        }
    }
}

/// Peril-specific hazard attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "peril", rename_all = "snake_case")]
pub enum HazardDetails {
    Earthquake {
        /// Moment magnitude
        magnitude: f64,
        /// Hypocenter depth in km
        #[serde(default)]
        depth_km: Option<f64>,
    },
    TropicalCyclone {
        /// Saffir-Simpson category (fractional for interpolated fixes)
        category: f64,
        /// Maximum sustained wind in knots
        #[serde(default)]
        wind_speed_kt: Option<f64>,
        /// Central pressure in millibars
        #[serde(default)]
        pressure_mb: Option<f64>,
    },
    Wildfire {
        /// Fire intensity scalar (radiative power index)
        intensity: f64,
    },
    SevereWeather {
        /// Report magnitude (hail size, gust speed, EF rating)
        magnitude: f64,
    },
}

impl HazardDetails {
    /// Peril tag for this variant
    pub fn peril(&self) -> Peril {
        match self {
            HazardDetails::Earthquake { .. } => Peril::Earthquake,
            HazardDetails::TropicalCyclone { .. } => Peril::TropicalCyclone,
            HazardDetails::Wildfire { .. } => Peril::Wildfire,
            HazardDetails::SevereWeather { .. } => Peril::SevereWeather,
        }
    }

    /// Primary intensity scalar used for payout tier resolution
    pub fn intensity(&self) -> f64 {
        match self {
            HazardDetails::Earthquake { magnitude, .. } => *magnitude,
            HazardDetails::TropicalCyclone { category, .. } => *category,
            HazardDetails::Wildfire { intensity } => *intensity,
            HazardDetails::SevereWeather { magnitude } => *magnitude,
        }
    }

    /// Magnitude attribute, defined for earthquakes and severe weather
    pub fn magnitude(&self) -> Option<f64> {
        match self {
            HazardDetails::Earthquake { magnitude, .. } => Some(*magnitude),
            HazardDetails::SevereWeather { magnitude } => Some(*magnitude),
            _ => None,
        }
    }

    /// Hypocenter depth, defined for earthquakes only
    pub fn depth_km(&self) -> Option<f64> {
        match self {
            HazardDetails::Earthquake { depth_km, .. } => *depth_km,
            _ => None,
        }
    }

    /// Saffir-Simpson category, defined for tropical cyclones only
    pub fn category(&self) -> Option<f64> {
        match self {
            HazardDetails::TropicalCyclone { category, .. } => Some(*category),
            _ => None,
        }
    }

    /// Sustained wind speed, defined for tropical cyclones only
    pub fn wind_speed_kt(&self) -> Option<f64> {
        match self {
            HazardDetails::TropicalCyclone { wind_speed_kt, .. } => *wind_speed_kt,
            _ => None,
        }
    }

    /// Central pressure, defined for tropical cyclones only
    pub fn pressure_mb(&self) -> Option<f64> {
        match self {
            HazardDetails::TropicalCyclone { pressure_mb, .. } => *pressure_mb,
            _ => None,
        }
    }
}

/// A single hazard occurrence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    /// Unique event identifier
    pub id: String,

    /// Epicenter / center latitude, degrees
    pub latitude: f64,

    /// Epicenter / center longitude, degrees
    pub longitude: f64,

    /// Occurrence time, UTC
    pub time: DateTime<Utc>,

    /// Peril-specific attributes
    #[serde(flatten)]
    pub hazard: HazardDetails,
}

impl Event {
    pub fn peril(&self) -> Peril {
        self.hazard.peril()
    }

    pub fn intensity(&self) -> f64 {
        self.hazard.intensity()
    }
}

/// An immutable catalog of historical or live events
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventCatalog {
    pub events: Vec<Event>,
}

impl EventCatalog {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Time span of the catalog in years (earliest to latest event)
    ///
    /// Returns 0.0 for catalogs with fewer than two events; callers that
    /// need a different analysis window supply it via config instead.
    pub fn span_years(&self) -> f64 {
        let earliest = self.events.iter().map(|e| e.time).min();
        let latest = self.events.iter().map(|e| e.time).max();
        match (earliest, latest) {
            (Some(start), Some(end)) => (end - start).num_days() as f64 / 365.25,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn quake(id: &str, year: i32, magnitude: f64) -> Event {
        Event {
            id: id.to_string(),
            latitude: 35.0,
            longitude: -118.0,
            time: Utc.with_ymd_and_hms(year, 6, 1, 0, 0, 0).unwrap(),
            hazard: HazardDetails::Earthquake {
                magnitude,
                depth_km: Some(10.0),
            },
        }
    }

    #[test]
    fn test_intensity_dispatch() {
        let eq = quake("eq1", 2020, 6.5);
        assert_eq!(eq.intensity(), 6.5);
        assert_eq!(eq.peril(), Peril::Earthquake);

        let tc = Event {
            id: "tc1".to_string(),
            latitude: 27.0,
            longitude: -84.0,
            time: Utc.with_ymd_and_hms(2022, 9, 28, 0, 0, 0).unwrap(),
            hazard: HazardDetails::TropicalCyclone {
                category: 4.0,
                wind_speed_kt: Some(130.0),
                pressure_mb: Some(940.0),
            },
        };
        assert_eq!(tc.intensity(), 4.0);
        assert_eq!(tc.hazard.wind_speed_kt(), Some(130.0));
        // Attributes a peril does not define stay undefined
        assert_eq!(tc.hazard.magnitude(), None);
        assert_eq!(eq.hazard.category(), None);
    }

    #[test]
    fn test_catalog_span_years() {
        let catalog = EventCatalog::new(vec![
            quake("a", 2010, 5.0),
            quake("b", 2020, 6.0),
            quake("c", 2015, 5.5),
        ]);
        let span = catalog.span_years();
        assert!((span - 10.0).abs() < 0.02);

        assert_eq!(EventCatalog::default().span_years(), 0.0);
        assert_eq!(EventCatalog::new(vec![quake("a", 2010, 5.0)]).span_years(), 0.0);
    }

    #[test]
    fn test_event_json_tagging() {
        let eq = quake("eq1", 2020, 6.5);
        let json = serde_json::to_string(&eq).unwrap();
        assert!(json.contains(r#""peril":"earthquake""#));
        let back: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(back.intensity(), 6.5);
    }
}
