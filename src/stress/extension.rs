//! Boundary extension: spatially enlarged zone copies for stress testing

use serde::{Deserialize, Serialize};

use super::cluster::cluster_zones;
use crate::geometry::KM_PER_DEGREE;
use crate::zone::Zone;

/// How far to grow a zone's rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionPolicy {
    /// Fixed distance in kilometers
    FixedKm(f64),
    /// Percentage of the zone's own average span
    PercentOfSpan(f64),
}

/// Which rectangles get extended
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionMode {
    /// Every zone grown independently
    PerZone,
    /// Zones clustered first; singletons grow directly, larger clusters
    /// get a shared extended envelope for display only
    Cluster { proximity_km: f64 },
}

/// Extended outer rectangle of a multi-zone cluster
///
/// Diagnostic/display output only; the envelope is not itself a
/// triggerable zone, and member zones keep their original bounds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterEnvelope {
    /// Ids of the member zones
    pub members: Vec<String>,
    pub south: f64,
    pub north: f64,
    pub west: f64,
    pub east: f64,
}

/// Result of a boundary extension pass
#[derive(Debug, Clone)]
pub struct ExtendedZoneSet {
    /// Zones to feed through the trigger pipeline
    pub zones: Vec<Zone>,

    /// Shared envelopes for multi-zone clusters (cluster mode only)
    pub envelopes: Vec<ClusterEnvelope>,
}

/// Kilometer extension for a rectangle under the policy
///
/// Percent-of-span converts the rectangle's average span to km at its
/// own midpoint latitude, then takes the percentage of that.
fn extension_km(south: f64, north: f64, west: f64, east: f64, policy: ExtensionPolicy) -> f64 {
    match policy {
        ExtensionPolicy::FixedKm(km) => km,
        ExtensionPolicy::PercentOfSpan(pct) => {
            let avg_lat = (south + north) / 2.0;
            let lat_span_km = (north - south) * KM_PER_DEGREE;
            let lon_span_km = (east - west) * KM_PER_DEGREE * avg_lat.to_radians().cos();
            (lat_span_km + lon_span_km) / 2.0 * pct / 100.0
        }
    }
}

/// Grow a rectangle outward by `km`, clamping latitude to [-90, 90]
fn extend_bounds(south: f64, north: f64, west: f64, east: f64, km: f64) -> (f64, f64, f64, f64) {
    let avg_lat = (south + north) / 2.0;
    let dlat = km / KM_PER_DEGREE;
    let dlon = km / (KM_PER_DEGREE * (avg_lat * std::f64::consts::PI / 180.0).cos());
    (
        (south - dlat).max(-90.0),
        (north + dlat).min(90.0),
        west - dlon,
        east + dlon,
    )
}

/// Independently grown copy of one zone
fn extend_zone(zone: &Zone, policy: ExtensionPolicy) -> Zone {
    let km = extension_km(zone.south, zone.north, zone.west, zone.east, policy);
    let (south, north, west, east) = extend_bounds(zone.south, zone.north, zone.west, zone.east, km);
    let mut extended = zone.clone();
    extended.south = south;
    extended.north = north;
    extended.west = west;
    extended.east = east;
    extended
}

/// Produce the extended zone set for a stress run
pub fn extend_zones(zones: &[Zone], policy: ExtensionPolicy, mode: ExtensionMode) -> ExtendedZoneSet {
    match mode {
        ExtensionMode::PerZone => ExtendedZoneSet {
            zones: zones.iter().map(|z| extend_zone(z, policy)).collect(),
            envelopes: Vec::new(),
        },
        ExtensionMode::Cluster { proximity_km } => {
            let clusters = cluster_zones(zones, proximity_km);
            let mut extended: Vec<Zone> = zones.to_vec();
            let mut envelopes = Vec::new();

            for cluster in &clusters {
                if cluster.is_singleton() {
                    let idx = cluster.members[0];
                    extended[idx] = extend_zone(&zones[idx], policy);
                } else {
                    let (south, north, west, east) = cluster.envelope(zones);
                    let km = extension_km(south, north, west, east, policy);
                    let (south, north, west, east) = extend_bounds(south, north, west, east, km);
                    envelopes.push(ClusterEnvelope {
                        members: cluster.members.iter().map(|&i| zones[i].id.clone()).collect(),
                        south,
                        north,
                        west,
                        east,
                    });
                }
            }

            ExtendedZoneSet {
                zones: extended,
                envelopes,
            }
        }
    }
}
