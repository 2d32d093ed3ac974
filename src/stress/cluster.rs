//! Zone clustering: connected components under a proximity threshold
//!
//! Two zones share a cluster when their bounding boxes, each expanded by
//! the threshold, overlap. Traversal is an iterative depth-first search
//! with an explicit stack.

use serde::{Deserialize, Serialize};

use crate::geometry::KM_PER_DEGREE;
use crate::zone::Zone;

/// Default proximity threshold for clustering
pub const DEFAULT_PROXIMITY_KM: f64 = 100.0;

/// A maximal set of zones connected by pairwise proximity/overlap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneCluster {
    /// Indices into the zone slice the clustering ran over
    pub members: Vec<usize>,
}

impl ZoneCluster {
    pub fn is_singleton(&self) -> bool {
        self.members.len() == 1
    }

    /// Outer bounding rectangle across member zones
    /// (south, north, west, east)
    pub fn envelope(&self, zones: &[Zone]) -> (f64, f64, f64, f64) {
        let mut south = f64::INFINITY;
        let mut north = f64::NEG_INFINITY;
        let mut west = f64::INFINITY;
        let mut east = f64::NEG_INFINITY;
        for &idx in &self.members {
            let zone = &zones[idx];
            south = south.min(zone.south);
            north = north.max(zone.north);
            west = west.min(zone.west);
            east = east.max(zone.east);
        }
        (south, north, west, east)
    }
}

/// Bounding box expanded outward by the threshold, degrees
fn expanded_bounds(zone: &Zone, threshold_km: f64) -> (f64, f64, f64, f64) {
    let dlat = threshold_km / KM_PER_DEGREE;
    let dlon = threshold_km / (KM_PER_DEGREE * zone.avg_latitude().to_radians().cos());
    (
        zone.south - dlat,
        zone.north + dlat,
        zone.west - dlon,
        zone.east + dlon,
    )
}

/// Whether two threshold-expanded boxes overlap
fn proximate(a: &Zone, b: &Zone, threshold_km: f64) -> bool {
    let (a_s, a_n, a_w, a_e) = expanded_bounds(a, threshold_km);
    let (b_s, b_n, b_w, b_e) = expanded_bounds(b, threshold_km);
    a_s <= b_n && b_s <= a_n && a_w <= b_e && b_w <= a_e
}

/// Partition the zone set into disjoint clusters (singletons included)
pub fn cluster_zones(zones: &[Zone], threshold_km: f64) -> Vec<ZoneCluster> {
    let mut visited = vec![false; zones.len()];
    let mut clusters = Vec::new();

    for start in 0..zones.len() {
        if visited[start] {
            continue;
        }
        let mut members = Vec::new();
        let mut stack = vec![start];
        visited[start] = true;

        while let Some(current) = stack.pop() {
            members.push(current);
            for next in 0..zones.len() {
                if !visited[next] && proximate(&zones[current], &zones[next], threshold_km) {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }

        members.sort_unstable();
        clusters.push(ZoneCluster { members });
    }

    clusters
}
