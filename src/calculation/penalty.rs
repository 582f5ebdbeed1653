//! Penalty point aggregation into a discount percentage.
//!
//! Instructors are allowed penalty points up to a configured fraction of
//! the classes they taught; every excess point becomes one percent of
//! discount on the payment subtotal.

use rust_decimal::Decimal;

/// The result of converting penalty points into a discount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PenaltyDiscount {
    /// Points tolerated for the period: floor(total_classes × ratio).
    pub allowed_points: Decimal,
    /// Points beyond the allowance, never negative.
    pub excess_points: Decimal,
    /// Discount percentage: one excess point is one percent.
    pub discount_percent: Decimal,
}

/// Converts accumulated penalty points into a discount percentage.
///
/// No cap is imposed here; downstream amounts are clamped to ≥ 0 by the
/// payment assembler.
///
/// # Arguments
///
/// * `total_points` - Penalty points accrued in the period
/// * `total_classes` - Classes taught in the period
/// * `allowance_ratio` - Tolerated fraction of classes (typically 0.10)
pub fn penalty_discount(
    total_points: Decimal,
    total_classes: u32,
    allowance_ratio: Decimal,
) -> PenaltyDiscount {
    let allowed_points = (Decimal::from(total_classes) * allowance_ratio).floor();
    let excess_points = (total_points - allowed_points).max(Decimal::ZERO);

    PenaltyDiscount {
        allowed_points,
        excess_points,
        discount_percent: excess_points,
    }
}
