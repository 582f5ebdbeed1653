//! Payment calculation components.
//!
//! Each submodule owns one stage of the pipeline: metrics aggregation,
//! category resolution, per-class tariff pricing with versus and full-house
//! adjustment, penalty discounting, and payment assembly. The [`engine`]
//! module orchestrates them over the catalog and sink collaborators.

pub mod adjuster;
pub mod assembler;
pub mod category_resolver;
pub mod engine;
pub mod metrics;
pub mod penalty;
pub mod tariff;

pub use adjuster::{adjust_attendance, calculate_class_pay, AdjustedAttendance, ClassPayOutcome};
pub use assembler::{assemble_payment, build_payment_record, Adjustments, PaymentBreakdown};
pub use category_resolver::{resolve_category, CategoryResolution, CategorySource};
pub use engine::{
    BatchSummary, CalculationOutcome, CalculationRequest, CalculationSummary, PaymentEngine,
};
pub use metrics::{aggregate_metrics, InstructorMetrics};
pub use penalty::{penalty_discount, PenaltyDiscount};
pub use tariff::{resolve_tariff, TariffOutcome, FULL_HOUSE_LABEL};
