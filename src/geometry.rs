//! Geometry primitives: containment tests and great-circle distance

use crate::event::Peril;
use crate::zone::Zone;

/// Mean Earth radius in km (haversine)
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometers per degree of latitude (and of longitude at the equator)
pub const KM_PER_DEGREE: f64 = 111.0;

/// Impact radius for seismic events in the indemnity exposure check
pub const SEISMIC_IMPACT_RADIUS_KM: f64 = 200.0;

/// Impact radius for cyclonic events in the indemnity exposure check
pub const CYCLONE_IMPACT_RADIUS_KM: f64 = 300.0;

/// Impact radius for localized perils (wildfire, severe weather)
pub const LOCAL_IMPACT_RADIUS_KM: f64 = 50.0;

/// Boundary-inclusive axis-aligned containment test
///
/// Longitude is a simple numeric range; no antimeridian handling.
pub fn point_in_zone(lat: f64, lon: f64, zone: &Zone) -> bool {
    lat >= zone.south && lat <= zone.north && lon >= zone.west && lon <= zone.east
}

/// Great-circle distance between two points via the haversine formula
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();
    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Impact radius used by the indemnity-exposure check, per peril
pub fn impact_radius_km(peril: Peril) -> f64 {
    match peril {
        Peril::Earthquake => SEISMIC_IMPACT_RADIUS_KM,
        Peril::TropicalCyclone => CYCLONE_IMPACT_RADIUS_KM,
        Peril::Wildfire | Peril::SevereWeather => LOCAL_IMPACT_RADIUS_KM,
    }
}
