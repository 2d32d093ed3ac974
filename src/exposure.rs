//! Indemnity-mode exposure overlay: insured sites impacted by events
//! within a peril-specific radius

use serde::{Deserialize, Serialize};

use crate::event::EventCatalog;
use crate::geometry::{haversine_km, impact_radius_km};

/// An insured location with an exposure value
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExposureSite {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,

    /// Insured value at the site
    pub insured_value: f64,
}

/// Impact assessment for one site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteImpact {
    pub site_id: String,

    /// Events within the impact radius of this site
    pub impacting_events: u32,

    /// Id of the nearest impacting event, if any
    pub nearest_event: Option<String>,

    /// Distance to the nearest impacting event, km
    pub nearest_distance_km: Option<f64>,
}

/// Exposure summary across a site portfolio
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExposureSummary {
    pub total_sites: u32,

    /// Sites with at least one impacting event
    pub impacted_sites: u32,

    /// Sum of insured values across all sites
    pub total_insured_value: f64,

    /// Sum of insured values at impacted sites
    pub impacted_value: f64,

    pub site_impacts: Vec<SiteImpact>,
}

/// Assess which sites fall inside any event's impact radius
///
/// Radius is fixed per peril (200 km seismic, 300 km cyclonic); this is
/// the only consumer of the great-circle distance primitive.
pub fn assess_exposure(sites: &[ExposureSite], catalog: &EventCatalog) -> ExposureSummary {
    let mut impacted_sites = 0u32;
    let mut impacted_value = 0.0;
    let mut site_impacts = Vec::with_capacity(sites.len());

    for site in sites {
        let mut impacting_events = 0u32;
        let mut nearest: Option<(String, f64)> = None;

        for event in &catalog.events {
            let distance =
                haversine_km(site.latitude, site.longitude, event.latitude, event.longitude);
            if distance <= impact_radius_km(event.peril()) {
                impacting_events += 1;
                if nearest.as_ref().map_or(true, |(_, d)| distance < *d) {
                    nearest = Some((event.id.clone(), distance));
                }
            }
        }

        if impacting_events > 0 {
            impacted_sites += 1;
            impacted_value += site.insured_value;
        }

        let (nearest_event, nearest_distance_km) = match nearest {
            Some((id, d)) => (Some(id), Some(d)),
            None => (None, None),
        };
        site_impacts.push(SiteImpact {
            site_id: site.id.clone(),
            impacting_events,
            nearest_event,
            nearest_distance_km,
        });
    }

    ExposureSummary {
        total_sites: sites.len() as u32,
        impacted_sites,
        total_insured_value: sites.iter().map(|s| s.insured_value).sum(),
        impacted_value,
        site_impacts,
    }
}
