//! Final payment assembly.
//!
//! This module combines summed class pay, the manual reajuste, bonuses,
//! cover pay, the penalty discount, and the retention tax into a final net
//! payment, and decides create-vs-update semantics against an existing
//! record.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::RecalcPolicy;
use crate::models::{ClassPayDetail, PaymentRecord, PaymentStatus, ReajusteType};

/// Manual adjustments feeding a payment assembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjustments {
    /// Bonus total (per-reservation bonuses plus any manual bonus).
    pub bonus: Decimal,
    /// Substitute-teaching compensation.
    pub cover: Decimal,
    /// Manual adjustment value.
    pub reajuste: Decimal,
    /// How the reajuste value is interpreted.
    pub reajuste_type: ReajusteType,
}

impl Adjustments {
    /// Adjustments for a record with nothing manual applied.
    pub fn none() -> Self {
        Self {
            bonus: Decimal::ZERO,
            cover: Decimal::ZERO,
            reajuste: Decimal::ZERO,
            reajuste_type: ReajusteType::Fixed,
        }
    }
}

/// Every intermediate figure of the assembly pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentBreakdown {
    /// Sum of adjusted class amounts.
    pub base_amount: Decimal,
    /// The reajuste resolved to an absolute amount.
    pub reajuste_amount: Decimal,
    /// base + reajuste + bonus + cover.
    pub subtotal: Decimal,
    /// Penalty discount taken from the subtotal.
    pub discount_amount: Decimal,
    /// Subtotal less the discount.
    pub net_amount: Decimal,
    /// Retention withheld from the net amount.
    pub retention: Decimal,
    /// Net less retention, clamped to zero.
    pub final_pay: Decimal,
}

/// Runs the deterministic assembly pipeline.
///
/// 1. reajuste_amount = Percentage ? base × reajuste/100 : reajuste
/// 2. subtotal = base + reajuste_amount + bonus + cover
/// 3. discount = subtotal × discount_percent/100
/// 4. net = subtotal − discount
/// 5. retention = net × retention_rate
/// 6. final_pay = max(0, net − retention)
pub fn assemble_payment(
    base_amount: Decimal,
    adjustments: &Adjustments,
    penalty_discount_percent: Decimal,
    retention_rate: Decimal,
) -> PaymentBreakdown {
    let reajuste_amount = match adjustments.reajuste_type {
        ReajusteType::Percentage => base_amount * adjustments.reajuste / Decimal::ONE_HUNDRED,
        ReajusteType::Fixed => adjustments.reajuste,
    };

    let subtotal = base_amount + reajuste_amount + adjustments.bonus + adjustments.cover;
    let discount_amount = subtotal * penalty_discount_percent / Decimal::ONE_HUNDRED;
    let net_amount = subtotal - discount_amount;
    let retention = net_amount * retention_rate;
    let final_pay = (net_amount - retention).max(Decimal::ZERO);

    PaymentBreakdown {
        base_amount,
        reajuste_amount,
        subtotal,
        discount_amount,
        net_amount,
        retention,
        final_pay,
    }
}

/// Builds the record to persist, honoring create-vs-update semantics.
///
/// With no existing record a new one is created with status Pending and the
/// freshly supplied adjustments. With an existing record, which adjustments
/// survive is governed by the recalculation policy:
///
/// * [`RecalcPolicy::PreserveAdjustments`] keeps the stored reajuste, bonus
///   and cover and recomputes every derived figure.
/// * [`RecalcPolicy::RecomputeAll`] replaces the stored adjustments with
///   the freshly supplied ones.
///
/// Retention is derived and always recomputed. The record's identity,
/// status, and creation timestamp always survive an update.
pub fn build_payment_record(
    existing: Option<&PaymentRecord>,
    instructor_id: &str,
    period_id: &str,
    base_amount: Decimal,
    details: Vec<ClassPayDetail>,
    fresh: &Adjustments,
    penalty_discount_percent: Decimal,
    retention_rate: Decimal,
    policy: RecalcPolicy,
    now: DateTime<Utc>,
) -> (PaymentRecord, PaymentBreakdown) {
    let effective = match (existing, policy) {
        (Some(record), RecalcPolicy::PreserveAdjustments) => Adjustments {
            bonus: record.bonus,
            cover: record.cover,
            reajuste: record.reajuste,
            reajuste_type: record.reajuste_type,
        },
        _ => *fresh,
    };

    let breakdown = assemble_payment(
        base_amount,
        &effective,
        penalty_discount_percent,
        retention_rate,
    );

    let record = PaymentRecord {
        id: existing.map(|r| r.id).unwrap_or_else(Uuid::new_v4),
        instructor_id: instructor_id.to_string(),
        period_id: period_id.to_string(),
        base_amount,
        bonus: effective.bonus,
        cover: effective.cover,
        reajuste: effective.reajuste,
        reajuste_type: effective.reajuste_type,
        penalty_discount_percent,
        retention: breakdown.retention,
        final_pay: breakdown.final_pay,
        status: existing.map(|r| r.status).unwrap_or(PaymentStatus::Pending),
        details,
        created_at: existing.map(|r| r.created_at).unwrap_or(now),
        updated_at: now,
    };

    (record, breakdown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    const RETENTION: &str = "0.08";

    /// PA-001: subtotal 500 with 3% discount and 8% retention
    #[test]
    fn test_full_pipeline_figures() {
        let breakdown = assemble_payment(
            dec("500.00"),
            &Adjustments::none(),
            dec("3"),
            dec(RETENTION),
        );

        assert_eq!(breakdown.subtotal, dec("500.00"));
        assert_eq!(breakdown.discount_amount, dec("15.0000"));
        assert_eq!(breakdown.net_amount, dec("485.0000"));
        assert_eq!(breakdown.retention, dec("38.800000"));
        assert_eq!(breakdown.final_pay, dec("446.200000"));
    }

    /// PA-002: fixed reajuste adds flat
    #[test]
    fn test_fixed_reajuste() {
        let adjustments = Adjustments {
            reajuste: dec("50.00"),
            ..Adjustments::none()
        };
        let breakdown =
            assemble_payment(dec("400.00"), &adjustments, Decimal::ZERO, dec(RETENTION));
        assert_eq!(breakdown.reajuste_amount, dec("50.00"));
        assert_eq!(breakdown.subtotal, dec("450.00"));
    }

    /// PA-003: percentage reajuste scales the base
    #[test]
    fn test_percentage_reajuste() {
        let adjustments = Adjustments {
            reajuste: dec("10"),
            reajuste_type: ReajusteType::Percentage,
            ..Adjustments::none()
        };
        let breakdown =
            assemble_payment(dec("400.00"), &adjustments, Decimal::ZERO, dec(RETENTION));
        assert_eq!(breakdown.reajuste_amount, dec("40.00"));
        assert_eq!(breakdown.subtotal, dec("440.00"));
    }

    /// PA-004: bonus and cover enter the subtotal before the discount
    #[test]
    fn test_bonus_and_cover_in_subtotal() {
        let adjustments = Adjustments {
            bonus: dec("20.00"),
            cover: dec("80.00"),
            ..Adjustments::none()
        };
        let breakdown =
            assemble_payment(dec("400.00"), &adjustments, dec("10"), dec(RETENTION));
        assert_eq!(breakdown.subtotal, dec("500.00"));
        assert_eq!(breakdown.discount_amount, dec("50.0000"));
    }

    /// PA-005: final pay clamps to zero
    #[test]
    fn test_final_pay_never_negative() {
        let adjustments = Adjustments {
            reajuste: dec("-600.00"),
            ..Adjustments::none()
        };
        let breakdown =
            assemble_payment(dec("500.00"), &adjustments, Decimal::ZERO, dec(RETENTION));
        assert!(breakdown.net_amount < Decimal::ZERO);
        assert_eq!(breakdown.final_pay, Decimal::ZERO);
    }

    /// PA-006: new record starts Pending with fresh adjustments
    #[test]
    fn test_new_record_pending() {
        let now = Utc::now();
        let fresh = Adjustments {
            bonus: dec("10.00"),
            ..Adjustments::none()
        };
        let (record, breakdown) = build_payment_record(
            None,
            "ins_001",
            "2026-01",
            dec("300.00"),
            vec![],
            &fresh,
            Decimal::ZERO,
            dec(RETENTION),
            RecalcPolicy::PreserveAdjustments,
            now,
        );

        assert_eq!(record.status, PaymentStatus::Pending);
        assert_eq!(record.bonus, dec("10.00"));
        assert_eq!(record.reajuste, Decimal::ZERO);
        assert_eq!(record.reajuste_type, ReajusteType::Fixed);
        assert_eq!(record.created_at, now);
        assert_eq!(record.final_pay, breakdown.final_pay);
    }

    fn stored_record(now: DateTime<Utc>) -> PaymentRecord {
        PaymentRecord {
            id: Uuid::new_v4(),
            instructor_id: "ins_001".to_string(),
            period_id: "2026-01".to_string(),
            base_amount: dec("300.00"),
            bonus: dec("25.00"),
            cover: dec("100.00"),
            reajuste: dec("5"),
            reajuste_type: ReajusteType::Percentage,
            penalty_discount_percent: Decimal::ZERO,
            retention: dec("34.00"),
            final_pay: dec("391.00"),
            status: PaymentStatus::Approved,
            details: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    /// PA-007: preserve policy keeps stored adjustments on recalculation
    #[test]
    fn test_preserve_adjustments_policy() {
        let created = Utc::now();
        let stored = stored_record(created);

        let (record, _) = build_payment_record(
            Some(&stored),
            "ins_001",
            "2026-01",
            dec("400.00"),
            vec![],
            &Adjustments::none(),
            Decimal::ZERO,
            dec(RETENTION),
            RecalcPolicy::PreserveAdjustments,
            Utc::now(),
        );

        assert_eq!(record.id, stored.id);
        assert_eq!(record.bonus, dec("25.00"));
        assert_eq!(record.cover, dec("100.00"));
        assert_eq!(record.reajuste, dec("5"));
        assert_eq!(record.reajuste_type, ReajusteType::Percentage);
        assert_eq!(record.status, PaymentStatus::Approved);
        assert_eq!(record.created_at, created);
        assert_eq!(record.base_amount, dec("400.00"));
    }

    /// PA-008: recompute policy replaces stored adjustments
    #[test]
    fn test_recompute_all_policy() {
        let stored = stored_record(Utc::now());

        let (record, _) = build_payment_record(
            Some(&stored),
            "ins_001",
            "2026-01",
            dec("400.00"),
            vec![],
            &Adjustments::none(),
            Decimal::ZERO,
            dec(RETENTION),
            RecalcPolicy::RecomputeAll,
            Utc::now(),
        );

        assert_eq!(record.id, stored.id);
        assert_eq!(record.bonus, Decimal::ZERO);
        assert_eq!(record.cover, Decimal::ZERO);
        assert_eq!(record.reajuste, Decimal::ZERO);
    }

    /// PA-009: retention is always recomputed, never carried over
    #[test]
    fn test_retention_recomputed() {
        let stored = stored_record(Utc::now());

        let (record, breakdown) = build_payment_record(
            Some(&stored),
            "ins_001",
            "2026-01",
            dec("1000.00"),
            vec![],
            &Adjustments::none(),
            Decimal::ZERO,
            dec(RETENTION),
            RecalcPolicy::PreserveAdjustments,
            Utc::now(),
        );

        assert_eq!(record.retention, breakdown.retention);
        assert_ne!(record.retention, stored.retention);
    }

    /// PA-010: zero base with no adjustments pays zero
    #[test]
    fn test_zero_base_pays_zero() {
        let breakdown = assemble_payment(
            Decimal::ZERO,
            &Adjustments::none(),
            Decimal::ZERO,
            dec(RETENTION),
        );
        assert_eq!(breakdown.final_pay, Decimal::ZERO);
        assert_eq!(breakdown.retention, Decimal::ZERO);
    }
}
