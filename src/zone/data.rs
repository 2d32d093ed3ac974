//! Zone data structures: trigger regions, criteria, and payout schedules

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when zone geometry fails validation
///
/// Invalid geometry is a programmer/import error, not a data-dependent
/// edge case; zones are rejected at construction rather than repaired.
#[derive(Debug, Error)]
pub enum ZoneError {
    #[error("zone {id}: non-finite bound {field} = {value}")]
    NonFiniteBound {
        id: String,
        field: &'static str,
        value: f64,
    },

    #[error("zone {id}: inverted latitude bounds (south {south} >= north {north})")]
    InvertedLatitude { id: String, south: f64, north: f64 },

    #[error("zone {id}: inverted longitude bounds (west {west} >= east {east})")]
    InvertedLongitude { id: String, west: f64, east: f64 },

    #[error("zone {id}: latitude bound {field} = {value} outside [-90, 90]")]
    LatitudeOutOfRange {
        id: String,
        field: &'static str,
        value: f64,
    },
}

/// Peril-specific trigger thresholds, AND-combined
///
/// An absent field places no constraint on that attribute. A present
/// field that the event's peril does not define fails closed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TriggerCriteria {
    /// Minimum earthquake magnitude (also matches severe-weather magnitude)
    #[serde(default)]
    pub min_magnitude: Option<f64>,

    /// Minimum hypocenter depth in km
    #[serde(default)]
    pub min_depth_km: Option<f64>,

    /// Maximum hypocenter depth in km (shallow-quake triggers)
    #[serde(default)]
    pub max_depth_km: Option<f64>,

    /// Minimum Saffir-Simpson category
    #[serde(default)]
    pub min_category: Option<f64>,

    /// Minimum sustained wind speed in knots
    #[serde(default)]
    pub min_wind_speed_kt: Option<f64>,

    /// Maximum central pressure in millibars
    #[serde(default)]
    pub max_pressure_mb: Option<f64>,
}

impl TriggerCriteria {
    /// True when no threshold is defined (open zone)
    pub fn is_unconstrained(&self) -> bool {
        self.min_magnitude.is_none()
            && self.min_depth_km.is_none()
            && self.max_depth_km.is_none()
            && self.min_category.is_none()
            && self.min_wind_speed_kt.is_none()
            && self.max_pressure_mb.is_none()
    }
}

/// Payout model tag for a zone's payout structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutModel {
    /// Base amount pays in full whenever the zone triggers; tiers ignored
    Binary,
    /// Matched tier pays a percentage of the base amount
    Percentage,
    /// Matched tier pays a multiplier of the base amount
    Tiered,
}

impl PayoutModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayoutModel::Binary => "binary",
            PayoutModel::Percentage => "percentage",
            PayoutModel::Tiered => "tiered",
        }
    }
}

/// One row of a payout schedule
///
/// Tiers may overlap in intensity range; the tier with the highest
/// `min_intensity` among matches wins, ties broken by input order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutTier {
    /// Display name, e.g. "Cat 4"
    pub name: String,

    /// Minimum intensity, inclusive
    pub min_intensity: f64,

    /// Maximum intensity, inclusive; unbounded above when absent
    #[serde(default)]
    pub max_intensity: Option<f64>,

    /// Fixed payout amount; takes precedence over percent/multiplier
    #[serde(default)]
    pub amount: Option<f64>,

    /// Percentage of the base amount (percentage model)
    #[serde(default)]
    pub percent: Option<f64>,

    /// Multiplier of the base amount (tiered model)
    #[serde(default)]
    pub multiplier: Option<f64>,
}

impl PayoutTier {
    /// Whether an intensity falls in this tier's inclusive range
    pub fn matches(&self, intensity: f64) -> bool {
        intensity >= self.min_intensity
            && self.max_intensity.map_or(true, |max| intensity <= max)
    }
}

/// Payout structure attached to a zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutStructure {
    /// Base payout amount in `currency`
    pub base_amount: f64,

    /// ISO currency code, e.g. "USD"
    pub currency: String,

    /// Payout model tag
    pub model: PayoutModel,

    /// Ordered payout schedule (order is the tie-break for equal minimums)
    #[serde(default)]
    pub tiers: Vec<PayoutTier>,
}

/// A user-defined rectangular trigger region
///
/// Bounds are plain latitude/longitude degrees with `north > south` and
/// `east > west`; longitude is treated as a simple numeric range with no
/// antimeridian handling. Zones are immutable during a statistics run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Zone {
    /// Stable unique identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Southern latitude bound, degrees
    pub south: f64,

    /// Northern latitude bound, degrees
    pub north: f64,

    /// Western longitude bound, degrees
    pub west: f64,

    /// Eastern longitude bound, degrees
    pub east: f64,

    /// Optional trigger criteria; absent = open zone (containment only)
    #[serde(default)]
    pub criteria: Option<TriggerCriteria>,

    /// Optional payout structure; absent = zone qualifies events but pays nothing
    #[serde(default)]
    pub payout: Option<PayoutStructure>,
}

impl Zone {
    /// Construct a zone, rejecting malformed geometry
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        south: f64,
        north: f64,
        west: f64,
        east: f64,
    ) -> Result<Self, ZoneError> {
        let zone = Self {
            id: id.into(),
            name: name.into(),
            south,
            north,
            west,
            east,
            criteria: None,
            payout: None,
        };
        zone.validate()?;
        Ok(zone)
    }

    /// Attach trigger criteria (builder style)
    pub fn with_criteria(mut self, criteria: TriggerCriteria) -> Self {
        self.criteria = Some(criteria);
        self
    }

    /// Attach a payout structure (builder style)
    pub fn with_payout(mut self, payout: PayoutStructure) -> Self {
        self.payout = Some(payout);
        self
    }

    /// Validate geometry; used both by `new` and on deserialized zones
    pub fn validate(&self) -> Result<(), ZoneError> {
        let bounds = [
            ("south", self.south),
            ("north", self.north),
            ("west", self.west),
            ("east", self.east),
        ];
        for (field, value) in bounds {
            if !value.is_finite() {
                return Err(ZoneError::NonFiniteBound {
                    id: self.id.clone(),
                    field,
                    value,
                });
            }
        }
        for (field, value) in [("south", self.south), ("north", self.north)] {
            if !(-90.0..=90.0).contains(&value) {
                return Err(ZoneError::LatitudeOutOfRange {
                    id: self.id.clone(),
                    field,
                    value,
                });
            }
        }
        if self.south >= self.north {
            return Err(ZoneError::InvertedLatitude {
                id: self.id.clone(),
                south: self.south,
                north: self.north,
            });
        }
        if self.west >= self.east {
            return Err(ZoneError::InvertedLongitude {
                id: self.id.clone(),
                west: self.west,
                east: self.east,
            });
        }
        Ok(())
    }

    /// Midpoint latitude, used for km-to-degree longitude conversion
    pub fn avg_latitude(&self) -> f64 {
        (self.south + self.north) / 2.0
    }

    /// North-south extent in degrees
    pub fn lat_span(&self) -> f64 {
        self.north - self.south
    }

    /// East-west extent in degrees
    pub fn lon_span(&self) -> f64 {
        self.east - self.west
    }
}
