//! Per-class tariff resolution.
//!
//! This module computes a single class's raw pay amount from its effective
//! attendance figures and a category's payment parameters: full-house rate,
//! tiered rate lookup, fixed quota, and the minimum/maximum clamps.

use rust_decimal::Decimal;

use crate::config::BonusPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::PaymentParameters;

/// Label used when the full-house rate applies.
pub const FULL_HOUSE_LABEL: &str = "Full House";

/// The result of resolving one class's tariff.
#[derive(Debug, Clone)]
pub struct TariffOutcome {
    /// The class amount after quota and clamps.
    pub amount: Decimal,
    /// The per-reservation rate that was selected.
    pub rate_applied: Decimal,
    /// Which tier (or "Full House") supplied the rate.
    pub tier_label: String,
    /// Whether the minimum-guaranteed clamp raised the amount.
    pub minimum_applied: bool,
    /// Whether the maximum clamp lowered the amount.
    pub maximum_applied: bool,
    /// Per-reservation bonus, tracked separately from the clamped amount.
    pub bonus: Option<Decimal>,
    /// Human-readable calculation trail.
    pub trace: String,
}

/// Resolves the tariff for one class.
///
/// The attendance figures must already be adjusted for full-house overrides
/// and versus scaling (see the adjuster module). Resolution order:
///
/// 1. Full house (reservations ≥ capacity, capacity > 0) selects the
///    full-house rate.
/// 2. Otherwise the first tier, ascending by threshold, whose threshold
///    covers the reservation count supplies the rate.
/// 3. A count above every threshold uses the highest-defined tier's rate;
///    this overflow is a policy, not an error.
/// 4. The fixed quota, when set, is added unconditionally.
/// 5. The minimum-guaranteed clamp is checked before the maximum clamp and
///    the two are mutually exclusive in a single pass.
///
/// Under [`BonusPolicy::FoldedIn`] the per-reservation bonus is added to the
/// amount after clamping; under [`BonusPolicy::Separate`] it is only
/// reported in the `bonus` field. The field is populated either way.
pub fn resolve_tariff(
    reservations: u32,
    capacity: u32,
    params: &PaymentParameters,
    bonus_policy: BonusPolicy,
) -> EngineResult<TariffOutcome> {
    let reservations_dec = Decimal::from(reservations);

    let (rate, tier_label) = select_rate(reservations, capacity, params)?;

    let mut amount = rate * reservations_dec;
    let mut trace = format!(
        "{} × {} = {} [{}]",
        reservations, rate, amount, tier_label
    );

    if let Some(quota) = params.fixed_quota {
        amount += quota;
        trace.push_str(&format!(" + quota {} = {}", quota, amount));
    }

    let mut minimum_applied = false;
    let mut maximum_applied = false;
    if amount < params.minimum_guaranteed {
        amount = params.minimum_guaranteed;
        minimum_applied = true;
        trace.push_str(&format!("; minimum applied → {}", amount));
    } else if params.maximum > Decimal::ZERO && amount > params.maximum {
        amount = params.maximum;
        maximum_applied = true;
        trace.push_str(&format!("; maximum applied → {}", amount));
    }

    let bonus = params
        .per_reservation_bonus
        .map(|per_reservation| per_reservation * reservations_dec);
    if let Some(bonus_amount) = bonus {
        match bonus_policy {
            BonusPolicy::FoldedIn => {
                amount += bonus_amount;
                trace.push_str(&format!("; bonus folded in {} → {}", bonus_amount, amount));
            }
            BonusPolicy::Separate => {
                trace.push_str(&format!("; bonus (separate) {}", bonus_amount));
            }
        }
    }

    Ok(TariffOutcome {
        amount,
        rate_applied: rate,
        tier_label,
        minimum_applied,
        maximum_applied,
        bonus,
        trace,
    })
}

/// Selects the per-reservation rate and its label.
fn select_rate(
    reservations: u32,
    capacity: u32,
    params: &PaymentParameters,
) -> EngineResult<(Decimal, String)> {
    if capacity > 0 && reservations >= capacity {
        return Ok((params.full_house_rate, FULL_HOUSE_LABEL.to_string()));
    }

    let tiers = params.sorted_tiers();
    if let Some(tier) = tiers
        .iter()
        .find(|t| t.reservation_threshold >= reservations)
    {
        return Ok((
            tier.rate,
            format!("Tier ≤{}", tier.reservation_threshold),
        ));
    }

    // Overflow: the count exceeds every threshold, keep the top tier's rate.
    match tiers.last() {
        Some(top) => Ok((
            top.rate,
            format!("Tier >{} (overflow)", top.reservation_threshold),
        )),
        None => Err(EngineError::CalculationError {
            message: "payment parameters define no tariff tiers".to_string(),
        }),
    }
}
