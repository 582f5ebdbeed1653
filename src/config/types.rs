//! Configuration types for the instructor payment engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use rust_decimal::Decimal;
use serde::Deserialize;

/// Whether the per-reservation bonus is folded into the class amount.
///
/// The business rule is ambiguous, so it is an explicit policy choice rather
/// than a hard-coded behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusPolicy {
    /// Track the bonus as a separate field, excluded from the clamped amount.
    Separate,
    /// Add the bonus into the class amount after clamping.
    FoldedIn,
}

/// Which fields survive when an existing payment is recalculated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecalcPolicy {
    /// Keep the stored reajuste, bonus and cover; recompute derived fields.
    PreserveAdjustments,
    /// Replace stored adjustments with the freshly supplied inputs.
    RecomputeAll,
}

/// One (studio, start time) slot treated as non-prime.
#[derive(Debug, Clone, Deserialize)]
pub struct NonPrimeSlot {
    /// Studio name fragment, matched case-insensitively as a substring.
    pub studio: String,
    /// Local start time in "HH:MM" form, matched exactly.
    pub time: String,
}

/// Engine policy settings from engine.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct EnginePolicy {
    /// The discipline dobleteos and non-prime counts are restricted to.
    pub flagship_discipline_id: String,
    /// Withholding rate applied to net pay (e.g. 0.08 for 8%).
    pub retention_rate: Decimal,
    /// Fraction of total classes tolerated as penalty points (e.g. 0.10).
    pub penalty_allowance_ratio: Decimal,
    /// How the per-reservation bonus is accounted.
    pub bonus_policy: BonusPolicy,
    /// Which stored fields survive a recalculation.
    pub recalc_policy: RecalcPolicy,
}

/// Schedule file structure from schedule.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Slots treated as non-prime.
    pub non_prime_slots: Vec<NonPrimeSlot>,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    policy: EnginePolicy,
    non_prime_slots: Vec<NonPrimeSlot>,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(policy: EnginePolicy, non_prime_slots: Vec<NonPrimeSlot>) -> Self {
        Self {
            policy,
            non_prime_slots,
        }
    }

    /// The flagship discipline dobleteos and non-prime counts apply to.
    pub fn flagship_discipline_id(&self) -> &str {
        &self.policy.flagship_discipline_id
    }

    /// The retention rate applied to net pay.
    pub fn retention_rate(&self) -> Decimal {
        self.policy.retention_rate
    }

    /// The fraction of total classes tolerated as penalty points.
    pub fn penalty_allowance_ratio(&self) -> Decimal {
        self.policy.penalty_allowance_ratio
    }

    /// How per-reservation bonuses are accounted.
    pub fn bonus_policy(&self) -> BonusPolicy {
        self.policy.bonus_policy
    }

    /// Which stored fields survive a recalculation.
    pub fn recalc_policy(&self) -> RecalcPolicy {
        self.policy.recalc_policy
    }

    /// Returns true when (studio, time) falls in a configured non-prime slot.
    ///
    /// The studio fragment matches case-insensitively as a substring; the
    /// time matches exactly against the slot's "HH:MM" value.
    pub fn is_non_prime(&self, studio: &str, time: chrono::NaiveTime) -> bool {
        let hhmm = time.format("%H:%M").to_string();
        let studio_lower = studio.to_lowercase();
        self.non_prime_slots
            .iter()
            .any(|slot| slot.time == hhmm && studio_lower.contains(&slot.studio.to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn test_config() -> EngineConfig {
        EngineConfig::new(
            EnginePolicy {
                flagship_discipline_id: "cycling".to_string(),
                retention_rate: dec("0.08"),
                penalty_allowance_ratio: dec("0.10"),
                bonus_policy: BonusPolicy::Separate,
                recalc_policy: RecalcPolicy::PreserveAdjustments,
            },
            vec![
                NonPrimeSlot {
                    studio: "Reforma".to_string(),
                    time: "06:00".to_string(),
                },
                NonPrimeSlot {
                    studio: "Polanco".to_string(),
                    time: "14:00".to_string(),
                },
            ],
        )
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_non_prime_exact_slot_matches() {
        let config = test_config();
        assert!(config.is_non_prime("Reforma", time(6, 0)));
    }

    #[test]
    fn test_non_prime_studio_match_is_substring_case_insensitive() {
        let config = test_config();
        assert!(config.is_non_prime("Studio REFORMA Norte", time(6, 0)));
    }

    #[test]
    fn test_non_prime_time_must_match_exactly() {
        let config = test_config();
        assert!(!config.is_non_prime("Reforma", time(6, 30)));
        assert!(!config.is_non_prime("Reforma", time(14, 0)));
    }

    #[test]
    fn test_non_prime_unknown_studio_does_not_match() {
        let config = test_config();
        assert!(!config.is_non_prime("Condesa", time(6, 0)));
    }

    #[test]
    fn test_policy_deserialization() {
        let yaml = r#"
flagship_discipline_id: cycling
retention_rate: "0.08"
penalty_allowance_ratio: "0.10"
bonus_policy: separate
recalc_policy: preserve_adjustments
"#;
        let policy: EnginePolicy = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(policy.flagship_discipline_id, "cycling");
        assert_eq!(policy.bonus_policy, BonusPolicy::Separate);
        assert_eq!(policy.recalc_policy, RecalcPolicy::PreserveAdjustments);
    }

    #[test]
    fn test_schedule_deserialization() {
        let yaml = r#"
non_prime_slots:
  - studio: Reforma
    time: "06:00"
  - studio: Polanco
    time: "14:00"
"#;
        let schedule: ScheduleConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(schedule.non_prime_slots.len(), 2);
        assert_eq!(schedule.non_prime_slots[0].time, "06:00");
    }
}
