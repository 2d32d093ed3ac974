//! Trigger evaluation: zone membership plus peril-specific criteria
//!
//! A criterion whose attribute the event's peril does not define fails
//! closed; it is never skipped.

use serde::{Deserialize, Serialize};

use crate::event::Event;
use crate::geometry::point_in_zone;
use crate::payout::{resolve_payout, PayoutOutcome};
use crate::zone::{TriggerCriteria, Zone};

/// Derived, ephemeral evaluation record for one (zone, event) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerResult {
    pub zone_id: String,
    pub event_id: String,

    /// Event lies within the zone rectangle
    pub in_zone: bool,

    /// Event satisfies every defined criterion threshold
    pub criteria_met: bool,

    /// `in_zone && criteria_met`
    pub triggered: bool,

    /// Matched payout tier, when one resolved
    pub tier_name: Option<String>,

    /// Resolved payout amount; `None` when untriggered, no payout
    /// structure, or no matching tier
    pub payout: Option<f64>,
}

/// Minimum-threshold check: passes when no threshold is set, fails closed
/// when the event lacks the attribute
fn passes_min(threshold: Option<f64>, attribute: Option<f64>) -> bool {
    match threshold {
        None => true,
        Some(t) => matches!(attribute, Some(v) if v >= t),
    }
}

/// Maximum-threshold check, same fail-closed behavior
fn passes_max(threshold: Option<f64>, attribute: Option<f64>) -> bool {
    match threshold {
        None => true,
        Some(t) => matches!(attribute, Some(v) if v <= t),
    }
}

/// Evaluate AND-combined trigger criteria against one event
pub fn meets_criteria(event: &Event, criteria: &TriggerCriteria) -> bool {
    passes_min(criteria.min_magnitude, event.hazard.magnitude())
        && passes_min(criteria.min_depth_km, event.hazard.depth_km())
        && passes_max(criteria.max_depth_km, event.hazard.depth_km())
        && passes_min(criteria.min_category, event.hazard.category())
        && passes_min(criteria.min_wind_speed_kt, event.hazard.wind_speed_kt())
        && passes_max(criteria.max_pressure_mb, event.hazard.pressure_mb())
}

/// Combined trigger test: containment AND criteria (open zones pass)
pub fn triggered(event: &Event, zone: &Zone) -> bool {
    point_in_zone(event.latitude, event.longitude, zone)
        && zone.criteria.as_ref().map_or(true, |c| meets_criteria(event, c))
}

/// Full per-pair evaluation including payout resolution
pub fn evaluate(event: &Event, zone: &Zone) -> TriggerResult {
    let in_zone = point_in_zone(event.latitude, event.longitude, zone);
    let criteria_met = zone
        .criteria
        .as_ref()
        .map_or(true, |c| meets_criteria(event, c));
    let is_triggered = in_zone && criteria_met;

    let outcome = if is_triggered {
        zone.payout
            .as_ref()
            .map_or_else(PayoutOutcome::none, |p| resolve_payout(event.intensity(), p))
    } else {
        PayoutOutcome::none()
    };

    TriggerResult {
        zone_id: zone.id.clone(),
        event_id: event.id.clone(),
        in_zone,
        criteria_met,
        triggered: is_triggered,
        tier_name: outcome.tier_name,
        payout: outcome.amount,
    }
}
