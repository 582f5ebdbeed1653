//! Versus and full-house attendance adjustment.
//!
//! This module wraps the tariff resolver with the two per-class
//! adjustments: forcing a class full when it carries an explicit full-house
//! override, and scaling/splitting co-taught "versus" classes. The
//! full-house override is applied first, then versus scaling on top.

use rust_decimal::Decimal;

use crate::config::BonusPolicy;
use crate::error::{EngineError, EngineResult};
use crate::models::{ClassSession, PaymentParameters};

use super::tariff::{resolve_tariff, TariffOutcome};

/// Attendance figures after full-house and versus adjustments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjustedAttendance {
    /// Effective reservations fed to the tariff resolver.
    pub reservations: u32,
    /// Effective capacity fed to the tariff resolver.
    pub capacity: u32,
    /// Divisor for the per-instructor share (versus count, or 1).
    pub share_divisor: u32,
    /// Whether the full-house override forced the reservation figure.
    pub full_house_forced: bool,
}

/// The pay outcome for one class, after adjustment and share splitting.
#[derive(Debug, Clone)]
pub struct ClassPayOutcome {
    /// The adjusted attendance figures the tariff ran on.
    pub adjusted: AdjustedAttendance,
    /// The tariff outcome; amount and bonus are per-instructor shares.
    pub tariff: TariffOutcome,
    /// Whether the amount is a versus share of a combined calculation.
    pub is_versus_share: bool,
}

/// Adjusts a class's attendance figures prior to tariff lookup.
///
/// Returns `InvalidClass` for a class flagged versus with fewer than two
/// co-instructors; callers catch this per class and skip the class.
pub fn adjust_attendance(class: &ClassSession) -> EngineResult<AdjustedAttendance> {
    if class.is_versus && class.versus_count < 2 {
        return Err(EngineError::InvalidClass {
            class_id: class.id.clone(),
            message: format!(
                "versus class with versus_count {} (expected ≥ 2)",
                class.versus_count
            ),
        });
    }

    // Full-house override first: force the class full before any scaling.
    let mut reservations = if class.full_house_override {
        class.capacity
    } else {
        class.total_reservations
    };
    let mut capacity = class.capacity;

    let share_divisor = if class.is_shared() {
        // Combined class as if taught by one instructor. The scaled figures
        // must stay within u32 for the tariff lookup.
        let scaled = reservations
            .checked_mul(class.versus_count)
            .zip(capacity.checked_mul(class.versus_count));
        match scaled {
            Some((r, c)) => {
                reservations = r;
                capacity = c;
            }
            None => {
                return Err(EngineError::InvalidClass {
                    class_id: class.id.clone(),
                    message: format!(
                        "versus_count {} overflows the combined attendance figures",
                        class.versus_count
                    ),
                });
            }
        }
        class.versus_count
    } else {
        1
    };

    Ok(AdjustedAttendance {
        reservations,
        capacity,
        share_divisor,
        full_house_forced: class.full_house_override,
    })
}

/// Computes one class's pay: adjust, resolve the tariff on the combined
/// figures, then split the clamped amount (and bonus) into the
/// per-instructor share.
///
/// Clamps apply to the combined amount before the split, so a versus class
/// hitting the minimum guarantee shares that guarantee, not one guarantee
/// per co-instructor.
pub fn calculate_class_pay(
    class: &ClassSession,
    params: &PaymentParameters,
    bonus_policy: BonusPolicy,
) -> EngineResult<ClassPayOutcome> {
    let adjusted = adjust_attendance(class)?;

    let mut tariff = resolve_tariff(
        adjusted.reservations,
        adjusted.capacity,
        params,
        bonus_policy,
    )?;

    if adjusted.full_house_forced {
        tariff.trace = format!("full house forced; {}", tariff.trace);
    }

    let is_versus_share = adjusted.share_divisor > 1;
    if is_versus_share {
        let divisor = Decimal::from(adjusted.share_divisor);
        tariff.amount /= divisor;
        tariff.bonus = tariff.bonus.map(|b| b / divisor);
        tariff.trace.push_str(&format!(
            "; versus split ÷{} → {}",
            adjusted.share_divisor, tariff.amount
        ));
    }

    Ok(ClassPayOutcome {
        adjusted,
        tariff,
        is_versus_share,
    })
}
