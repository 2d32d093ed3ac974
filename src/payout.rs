//! Payout calculation: tier resolution and monetary amounts
//!
//! "No payout" (`None`) is a distinct outcome from a zero payout; an event
//! can trigger a zone whose schedule has no tier for its intensity.

use crate::zone::{PayoutModel, PayoutStructure, PayoutTier};

/// Resolved payout for one (event, zone) pair
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PayoutOutcome {
    /// Monetary amount; `None` when no tier matched
    pub amount: Option<f64>,

    /// Name of the matched tier (binary payouts have no tier)
    pub tier_name: Option<String>,
}

impl PayoutOutcome {
    pub fn none() -> Self {
        Self::default()
    }
}

/// Resolve the payout for a triggered event's intensity
///
/// Callers guarantee the event is triggered; binary payouts pay the base
/// amount unconditionally from here.
pub fn resolve_payout(intensity: f64, structure: &PayoutStructure) -> PayoutOutcome {
    match structure.model {
        PayoutModel::Binary => PayoutOutcome {
            amount: Some(structure.base_amount),
            tier_name: None,
        },
        PayoutModel::Percentage | PayoutModel::Tiered => {
            match select_tier(intensity, &structure.tiers) {
                None => PayoutOutcome::none(),
                Some(tier) => PayoutOutcome {
                    amount: tier_amount(tier, structure),
                    tier_name: Some(tier.name.clone()),
                },
            }
        }
    }
}

/// Select the matching tier with the greatest minimum intensity
///
/// Ties on `min_intensity` go to the first occurrence in input order.
fn select_tier(intensity: f64, tiers: &[PayoutTier]) -> Option<&PayoutTier> {
    let mut best: Option<&PayoutTier> = None;
    for tier in tiers {
        if !tier.matches(intensity) {
            continue;
        }
        match best {
            Some(current) if tier.min_intensity <= current.min_intensity => {}
            _ => best = Some(tier),
        }
    }
    best
}

/// Monetary amount for a matched tier under the structure's model
fn tier_amount(tier: &PayoutTier, structure: &PayoutStructure) -> Option<f64> {
    if let Some(amount) = tier.amount {
        return Some(amount);
    }
    match structure.model {
        PayoutModel::Percentage => tier.percent.map(|p| structure.base_amount * p / 100.0),
        PayoutModel::Tiered => tier.multiplier.map(|m| structure.base_amount * m),
        PayoutModel::Binary => Some(structure.base_amount),
    }
}
