//! Payment calculation orchestration.
//!
//! The [`PaymentEngine`] drives one instructor's calculation end to end:
//! fetch from the catalog, aggregate metrics, resolve categories, price
//! every class, aggregate penalties, assemble the payment, and upsert it
//! through the sink. Failures are isolated at class granularity within an
//! instructor and at instructor granularity within a batch.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::catalog::{CatalogProvider, PaymentSink};
use crate::config::{BonusPolicy, EngineConfig};
use crate::error::{EngineError, EngineResult};
use crate::evaluator::{class_variables, EvaluationOutcome, ExpressionEvaluator};
use crate::models::{
    CategoryOverride, ClassPayDetail, ClassSession, FormulaDefinition, InstructorCategory,
};

use super::adjuster::calculate_class_pay;
use super::assembler::{assemble_payment, build_payment_record, Adjustments, PaymentBreakdown};
use super::category_resolver::resolve_category;
use super::metrics::aggregate_metrics;
use super::penalty::{penalty_discount, PenaltyDiscount};

/// A request to calculate one instructor's payment for one period.
#[derive(Debug, Clone)]
pub struct CalculationRequest {
    /// The instructor to calculate.
    pub instructor_id: String,
    /// The period to calculate.
    pub period_id: String,
    /// Request-scoped category overrides; they take precedence over the
    /// catalog's stored overrides.
    pub category_overrides: Vec<CategoryOverride>,
    /// Manual bonus supplied by the caller.
    pub manual_bonus: Decimal,
    /// Substitute-teaching compensation supplied by the caller.
    pub cover: Decimal,
}

impl CalculationRequest {
    /// A request with no overrides and no manual amounts.
    pub fn new(instructor_id: impl Into<String>, period_id: impl Into<String>) -> Self {
        Self {
            instructor_id: instructor_id.into(),
            period_id: period_id.into(),
            category_overrides: Vec::new(),
            manual_bonus: Decimal::ZERO,
            cover: Decimal::ZERO,
        }
    }
}

/// Summary figures for one instructor's calculation.
#[derive(Debug, Clone)]
pub struct CalculationSummary {
    /// Classes taught in the period.
    pub total_classes: u32,
    /// Classes that produced a pay line.
    pub billable_classes: u32,
    /// Classes excluded by missing formulas or per-class errors.
    pub skipped_classes: u32,
    /// Resolved category per discipline.
    pub categories: BTreeMap<String, InstructorCategory>,
    /// The penalty discount applied.
    pub penalty: PenaltyDiscount,
    /// Every intermediate figure of the assembly pipeline.
    pub breakdown: PaymentBreakdown,
    /// True when the instructor taught no classes at all.
    pub no_billable_classes: bool,
}

/// The complete result of one instructor's calculation.
#[derive(Debug, Clone)]
pub struct CalculationOutcome {
    /// Final amount to disburse.
    pub final_pay: Decimal,
    /// Summary figures.
    pub summary: CalculationSummary,
    /// Per-class pay lines.
    pub per_class_detail: Vec<ClassPayDetail>,
    /// Identifier of the persisted record, absent when nothing was
    /// persisted (no billable classes).
    pub record_id: Option<Uuid>,
    /// Human-readable audit log. Not a stable machine contract.
    pub trace: Vec<String>,
}

/// Result counts for a batch calculation over a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BatchSummary {
    /// Instructors whose payment record was created.
    pub created: u32,
    /// Instructors whose existing record was updated.
    pub updated: u32,
    /// Instructors skipped because their calculation failed or produced
    /// nothing to persist.
    pub skipped: u32,
}

/// The payment calculation engine.
pub struct PaymentEngine {
    config: EngineConfig,
    catalog: Arc<dyn CatalogProvider>,
    sink: Arc<dyn PaymentSink>,
    evaluator: Option<Arc<dyn ExpressionEvaluator>>,
}

impl PaymentEngine {
    /// Creates an engine over the given collaborators.
    pub fn new(
        config: EngineConfig,
        catalog: Arc<dyn CatalogProvider>,
        sink: Arc<dyn PaymentSink>,
    ) -> Self {
        Self {
            config,
            catalog,
            sink,
            evaluator: None,
        }
    }

    /// Attaches an expression evaluator for the formula-string path.
    pub fn with_evaluator(mut self, evaluator: Arc<dyn ExpressionEvaluator>) -> Self {
        self.evaluator = Some(evaluator);
        self
    }

    /// Returns the engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Calculates and persists one instructor's payment for a period.
    ///
    /// The computation is synchronous and side-effect-free until the final
    /// upsert. Per-class failures and disciplines without a formula are
    /// logged and skipped; only a missing instructor or period aborts.
    pub fn calculate(&self, request: &CalculationRequest) -> EngineResult<CalculationOutcome> {
        let period = self.catalog.period(&request.period_id)?;
        let instructor = self
            .catalog
            .instructor(&request.instructor_id, &request.period_id)?;

        let mut trace: Vec<String> = Vec::new();
        trace.push(format!(
            "Calculating '{}' ({}) for period '{}'",
            instructor.name, instructor.id, period.id
        ));

        let total_classes = instructor.classes.len() as u32;
        if total_classes == 0 {
            info!(
                instructor_id = %instructor.id,
                period_id = %period.id,
                "No billable classes"
            );
            trace.push("No billable classes in the period".to_string());
            return Ok(CalculationOutcome {
                final_pay: Decimal::ZERO,
                summary: CalculationSummary {
                    total_classes: 0,
                    billable_classes: 0,
                    skipped_classes: 0,
                    categories: BTreeMap::new(),
                    penalty: penalty_discount(
                        Decimal::ZERO,
                        0,
                        self.config.penalty_allowance_ratio(),
                    ),
                    breakdown: assemble_payment(
                        Decimal::ZERO,
                        &Adjustments::none(),
                        Decimal::ZERO,
                        self.config.retention_rate(),
                    ),
                    no_billable_classes: true,
                },
                per_class_detail: Vec::new(),
                record_id: None,
                trace,
            });
        }

        let formula_defs = self.catalog.formulas(&request.period_id)?;
        let formula_by_discipline: HashMap<&str, &FormulaDefinition> = formula_defs
            .iter()
            .map(|f| (f.discipline_id.as_str(), f))
            .collect();

        // Group classes by discipline, in stable order for the trace.
        let mut classes_by_discipline: BTreeMap<&str, Vec<&ClassSession>> = BTreeMap::new();
        for class in &instructor.classes {
            classes_by_discipline
                .entry(class.discipline_id.as_str())
                .or_default()
                .push(class);
        }

        let mut details: Vec<ClassPayDetail> = Vec::new();
        let mut categories: BTreeMap<String, InstructorCategory> = BTreeMap::new();
        let mut skipped_classes: u32 = 0;
        let mut base_amount = Decimal::ZERO;
        let mut class_bonus_total = Decimal::ZERO;

        for (&discipline_id, classes) in &classes_by_discipline {
            let Some(formula) = formula_by_discipline.get(discipline_id) else {
                warn!(
                    instructor_id = %instructor.id,
                    discipline_id = %discipline_id,
                    period_id = %period.id,
                    "No tariff formula; skipping discipline"
                );
                trace.push(format!(
                    "Discipline '{}': no tariff formula, {} classes skipped",
                    discipline_id,
                    classes.len()
                ));
                skipped_classes += classes.len() as u32;
                continue;
            };

            let metrics = aggregate_metrics(
                &instructor.classes,
                Some(discipline_id),
                &self.config,
                period.weeks,
            );

            let manual = request
                .category_overrides
                .iter()
                .find(|o| o.discipline_id == *discipline_id)
                .map(|o| o.category)
                .or_else(|| instructor.override_for(discipline_id));

            let resolution = resolve_category(&formula.requirements, &metrics, manual);
            categories.insert(discipline_id.to_string(), resolution.category);
            trace.push(format!(
                "Discipline '{}': {}",
                discipline_id, resolution.reasoning
            ));

            let Some(params) = formula.parameters_for(resolution.category) else {
                warn!(
                    instructor_id = %instructor.id,
                    discipline_id = %discipline_id,
                    category = %resolution.category,
                    "No payment parameters for category; skipping discipline"
                );
                trace.push(format!(
                    "Discipline '{}': no payment parameters for category '{}', {} classes skipped",
                    discipline_id,
                    resolution.category,
                    classes.len()
                ));
                skipped_classes += classes.len() as u32;
                continue;
            };

            for class in classes {
                match calculate_class_pay(class, params, self.config.bonus_policy()) {
                    Ok(outcome) => {
                        base_amount += outcome.tariff.amount;
                        if self.config.bonus_policy() == BonusPolicy::Separate {
                            if let Some(bonus) = outcome.tariff.bonus {
                                class_bonus_total += bonus;
                            }
                        }
                        trace.push(format!("Class '{}': {}", class.id, outcome.tariff.trace));
                        details.push(ClassPayDetail {
                            class_id: class.id.clone(),
                            discipline_id: class.discipline_id.clone(),
                            reservations: outcome.adjusted.reservations,
                            capacity: outcome.adjusted.capacity,
                            category: resolution.category,
                            rate_applied: outcome.tariff.rate_applied,
                            tier_label: outcome.tariff.tier_label,
                            amount: outcome.tariff.amount,
                            bonus: outcome.tariff.bonus,
                            minimum_applied: outcome.tariff.minimum_applied,
                            maximum_applied: outcome.tariff.maximum_applied,
                            is_versus_share: outcome.is_versus_share,
                            trace: outcome.tariff.trace,
                        });
                    }
                    Err(err) => {
                        warn!(
                            instructor_id = %instructor.id,
                            class_id = %class.id,
                            error = %err,
                            "Class calculation failed; skipping class"
                        );
                        trace.push(format!("Class '{}' skipped: {}", class.id, err));
                        skipped_classes += 1;
                    }
                }
            }
        }

        let penalty = penalty_discount(
            instructor.penalty_points(None),
            total_classes,
            self.config.penalty_allowance_ratio(),
        );
        trace.push(format!(
            "Penalties: allowed {}, excess {} → {}% discount",
            penalty.allowed_points, penalty.excess_points, penalty.discount_percent
        ));

        let fresh = Adjustments {
            bonus: class_bonus_total + request.manual_bonus,
            cover: request.cover,
            reajuste: Decimal::ZERO,
            reajuste_type: Default::default(),
        };

        let existing = self
            .sink
            .existing_payment(&request.instructor_id, &request.period_id)?;

        let (record, breakdown) = build_payment_record(
            existing.as_ref(),
            &request.instructor_id,
            &request.period_id,
            base_amount,
            details.clone(),
            &fresh,
            penalty.discount_percent,
            self.config.retention_rate(),
            self.config.recalc_policy(),
            Utc::now(),
        );

        trace.push(format!(
            "Base {} + reajuste {} + bonus {} + cover {} = {}; discount {} → net {}; retention {} → final {}",
            breakdown.base_amount,
            breakdown.reajuste_amount,
            record.bonus,
            record.cover,
            breakdown.subtotal,
            breakdown.discount_amount,
            breakdown.net_amount,
            breakdown.retention,
            breakdown.final_pay
        ));

        let record_id = self.sink.upsert(record)?;
        info!(
            instructor_id = %instructor.id,
            period_id = %period.id,
            final_pay = %breakdown.final_pay,
            billable_classes = details.len(),
            skipped_classes,
            "Calculation persisted"
        );

        Ok(CalculationOutcome {
            final_pay: breakdown.final_pay,
            summary: CalculationSummary {
                total_classes,
                billable_classes: details.len() as u32,
                skipped_classes,
                categories,
                penalty,
                breakdown,
                no_billable_classes: false,
            },
            per_class_detail: details,
            record_id: Some(record_id),
            trace,
        })
    }

    /// Calculates every instructor active in a period.
    ///
    /// Each instructor's computation and upsert are independent: a failure
    /// is logged and counted as skipped without aborting the rest.
    pub fn calculate_period(&self, period_id: &str) -> EngineResult<BatchSummary> {
        let instructor_ids = self.catalog.instructor_ids(period_id)?;
        let mut summary = BatchSummary::default();

        for instructor_id in instructor_ids {
            let existed = self
                .sink
                .existing_payment(&instructor_id, period_id)
                .map(|r| r.is_some())
                .unwrap_or(false);

            let request = CalculationRequest::new(instructor_id.clone(), period_id);
            match self.calculate(&request) {
                Ok(outcome) if outcome.record_id.is_some() => {
                    if existed {
                        summary.updated += 1;
                    } else {
                        summary.created += 1;
                    }
                }
                Ok(_) => {
                    // Nothing persisted (no billable classes).
                    summary.skipped += 1;
                }
                Err(err) => {
                    warn!(
                        instructor_id = %instructor_id,
                        period_id = %period_id,
                        error = %err,
                        "Instructor calculation failed; continuing batch"
                    );
                    summary.skipped += 1;
                }
            }
        }

        info!(
            period_id = %period_id,
            created = summary.created,
            updated = summary.updated,
            skipped = summary.skipped,
            "Batch calculation finished"
        );
        Ok(summary)
    }

    /// Evaluates a formula-string tariff for one class through the attached
    /// expression evaluator.
    ///
    /// The variable map exposes the class's attendance figures (see
    /// [`class_variables`]). Fails with `CalculationError` when no
    /// evaluator is configured and propagates `EvaluationFailed` from the
    /// evaluator itself.
    pub fn evaluate_class_formula(
        &self,
        class: &ClassSession,
        expression: &str,
    ) -> EngineResult<EvaluationOutcome> {
        let evaluator = self
            .evaluator
            .as_ref()
            .ok_or_else(|| EngineError::CalculationError {
                message: "no expression evaluator configured".to_string(),
            })?;

        let variables = class_variables(class);
        evaluator.evaluate(expression, &variables)
    }
}
