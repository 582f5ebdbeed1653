//! Tariff formula models.
//!
//! This module contains the per-discipline, per-period tariff definitions:
//! tier tables, payment parameters per category, and the metric thresholds a
//! category demands.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::InstructorCategory;

/// One step of the reservation-count rate table.
///
/// Tiers are ordered ascending by threshold and define a step function: the
/// first tier whose threshold covers the reservation count supplies the rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffTier {
    /// Upper reservation bound (inclusive) this tier covers.
    pub reservation_threshold: u32,
    /// Rate per reservation for this tier.
    pub rate: Decimal,
}

/// Payment parameters for one category within a formula definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentParameters {
    /// Tier table ordered ascending by threshold.
    pub tiers: Vec<TariffTier>,
    /// Flat rate per reservation when the class fills.
    pub full_house_rate: Decimal,
    /// Floor applied to the per-class amount.
    pub minimum_guaranteed: Decimal,
    /// Ceiling applied to the per-class amount; zero disables it.
    pub maximum: Decimal,
    /// Flat amount added to every class regardless of attendance.
    #[serde(default)]
    pub fixed_quota: Option<Decimal>,
    /// Bonus per reservation, tracked separately from the clamped amount.
    #[serde(default)]
    pub per_reservation_bonus: Option<Decimal>,
}

impl PaymentParameters {
    /// Returns the tiers sorted ascending by threshold.
    ///
    /// Formula sources are expected to supply tiers pre-sorted; this is the
    /// normalization point for ones that do not.
    pub fn sorted_tiers(&self) -> Vec<TariffTier> {
        let mut tiers = self.tiers.clone();
        tiers.sort_by_key(|t| t.reservation_threshold);
        tiers
    }
}

/// Metric thresholds an instructor must meet to hold a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRequirement {
    /// Minimum classes taught in the period.
    pub min_classes: u32,
    /// Minimum average occupancy percentage.
    pub min_occupancy: Decimal,
    /// Minimum count of distinct studios taught at.
    pub min_unique_studios: u32,
    /// Minimum dobleteo days (more than one flagship class per day).
    pub min_dobleteos: u32,
    /// Minimum classes taught in non-prime slots.
    pub min_non_prime_hours: u32,
    /// Whether the category demands event participation.
    #[serde(default)]
    pub requires_event_participation: bool,
    /// Whether the category nominally demands guideline compliance.
    ///
    /// Compliance is enforced for every category regardless of this flag;
    /// the field is carried for completeness of the formula source.
    #[serde(default)]
    pub requires_guideline_compliance: bool,
}

/// Tariff and category rules for one discipline in one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormulaDefinition {
    /// The discipline this formula applies to.
    pub discipline_id: String,
    /// The period this formula applies to.
    pub period_id: String,
    /// Payment parameters per category.
    pub parameters: HashMap<InstructorCategory, PaymentParameters>,
    /// Requirement thresholds per category. A category with no entry is
    /// skipped during resolution.
    pub requirements: HashMap<InstructorCategory, CategoryRequirement>,
}

impl FormulaDefinition {
    /// Returns the payment parameters for a category, if defined.
    pub fn parameters_for(&self, category: InstructorCategory) -> Option<&PaymentParameters> {
        self.parameters.get(&category)
    }
}

/// A discipline offered by the studio chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discipline {
    /// Unique identifier for the discipline.
    pub id: String,
    /// Human-readable name.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn tier(threshold: u32, rate: &str) -> TariffTier {
        TariffTier {
            reservation_threshold: threshold,
            rate: dec(rate),
        }
    }

    #[test]
    fn test_sorted_tiers_orders_by_threshold() {
        let params = PaymentParameters {
            tiers: vec![tier(35, "2.50"), tier(20, "2.00")],
            full_house_rate: dec("3.00"),
            minimum_guaranteed: dec("0"),
            maximum: dec("0"),
            fixed_quota: None,
            per_reservation_bonus: None,
        };

        let sorted = params.sorted_tiers();
        assert_eq!(sorted[0].reservation_threshold, 20);
        assert_eq!(sorted[1].reservation_threshold, 35);
    }

    #[test]
    fn test_requirement_deserialization_defaults() {
        let json = r#"{
            "min_classes": 12,
            "min_occupancy": "60",
            "min_unique_studios": 2,
            "min_dobleteos": 1,
            "min_non_prime_hours": 3
        }"#;

        let req: CategoryRequirement = serde_json::from_str(json).unwrap();
        assert_eq!(req.min_classes, 12);
        assert_eq!(req.min_occupancy, dec("60"));
        assert!(!req.requires_event_participation);
        assert!(!req.requires_guideline_compliance);
    }

    #[test]
    fn test_formula_definition_parameters_for() {
        let mut parameters = HashMap::new();
        parameters.insert(
            InstructorCategory::Base,
            PaymentParameters {
                tiers: vec![tier(20, "2.00")],
                full_house_rate: dec("3.00"),
                minimum_guaranteed: dec("0"),
                maximum: dec("0"),
                fixed_quota: None,
                per_reservation_bonus: None,
            },
        );

        let formula = FormulaDefinition {
            discipline_id: "cycling".to_string(),
            period_id: "2026-01".to_string(),
            parameters,
            requirements: HashMap::new(),
        };

        assert!(formula.parameters_for(InstructorCategory::Base).is_some());
        assert!(formula.parameters_for(InstructorCategory::Master).is_none());
    }

    #[test]
    fn test_payment_parameters_serialization_round_trip() {
        let params = PaymentParameters {
            tiers: vec![tier(20, "2.00"), tier(35, "2.50")],
            full_house_rate: dec("3.00"),
            minimum_guaranteed: dec("50.00"),
            maximum: dec("300.00"),
            fixed_quota: Some(dec("10.00")),
            per_reservation_bonus: Some(dec("0.25")),
        };

        let json = serde_json::to_string(&params).unwrap();
        let deserialized: PaymentParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(params, deserialized);
    }
}
