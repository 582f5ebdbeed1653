//! Payment record models.
//!
//! This module contains the [`PaymentRecord`] type persisted per
//! (instructor, period) pair and the per-class detail lines that back it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::InstructorCategory;

/// How a manual reajuste is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReajusteType {
    /// Flat amount added to the base.
    Fixed,
    /// Percentage of the base amount.
    Percentage,
}

impl Default for ReajusteType {
    fn default() -> Self {
        ReajusteType::Fixed
    }
}

/// Lifecycle status of a payment record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Freshly calculated, awaiting review.
    Pending,
    /// Reviewed and approved for disbursement.
    Approved,
    /// Disbursed.
    Paid,
}

/// One class's contribution to a payment, with its calculation trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassPayDetail {
    /// The class session this line came from.
    pub class_id: String,
    /// The discipline of the class.
    pub discipline_id: String,
    /// Effective reservations used for tariff lookup (post adjustment).
    pub reservations: u32,
    /// Effective capacity used for tariff lookup (post adjustment).
    pub capacity: u32,
    /// The category the tariff was resolved under.
    pub category: InstructorCategory,
    /// The per-reservation rate that was applied.
    pub rate_applied: Decimal,
    /// Which tier (or "Full House") supplied the rate.
    pub tier_label: String,
    /// The class amount credited to the instructor.
    pub amount: Decimal,
    /// Separately tracked per-reservation bonus, if configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus: Option<Decimal>,
    /// Whether the minimum-guaranteed clamp fired.
    pub minimum_applied: bool,
    /// Whether the maximum clamp fired.
    pub maximum_applied: bool,
    /// Whether the amount is a versus share of a combined calculation.
    pub is_versus_share: bool,
    /// Human-readable calculation trail for this class.
    pub trace: String,
}

/// The persisted payment for one (instructor, period) pair.
///
/// The persistence sink guarantees at most one record per pair; repeated
/// calculations update the existing record in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Unique identifier for the record.
    pub id: Uuid,
    /// The instructor being paid.
    pub instructor_id: String,
    /// The period being paid.
    pub period_id: String,
    /// Sum of all adjusted class amounts.
    pub base_amount: Decimal,
    /// Bonus total (per-reservation bonuses plus manual bonus).
    pub bonus: Decimal,
    /// Substitute-teaching compensation.
    pub cover: Decimal,
    /// Manual adjustment value.
    pub reajuste: Decimal,
    /// How the reajuste value is interpreted.
    pub reajuste_type: ReajusteType,
    /// Penalty discount applied to the subtotal, in percent.
    pub penalty_discount_percent: Decimal,
    /// Retention withheld from the net amount.
    pub retention: Decimal,
    /// Final amount to disburse, never negative.
    pub final_pay: Decimal,
    /// Lifecycle status.
    pub status: PaymentStatus,
    /// Per-class detail lines backing the base amount.
    pub details: Vec<ClassPayDetail>,
    /// When the record was first created.
    pub created_at: DateTime<Utc>,
    /// When the record was last recalculated.
    pub updated_at: DateTime<Utc>,
}
