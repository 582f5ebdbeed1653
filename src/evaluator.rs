//! Expression evaluator collaborator interface.
//!
//! Some studios express tariffs as formula strings instead of tier tables.
//! The engine treats the evaluator as opaque: it hands over the expression
//! and a variable map and receives a numeric value back. Parsing and
//! evaluation semantics live entirely in the implementation.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::error::EngineResult;

/// The result of evaluating a formula string.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationOutcome {
    /// The numeric value the expression evaluated to.
    pub value: Decimal,
    /// Optional human-readable evaluation trail.
    pub trace: Option<String>,
}

/// An opaque formula-string evaluator.
///
/// Implementations must fail with [`crate::error::EngineError::EvaluationFailed`]
/// on undefined variable references or malformed expressions.
pub trait ExpressionEvaluator: Send + Sync {
    /// Evaluates `expression` against the supplied variables.
    fn evaluate(
        &self,
        expression: &str,
        variables: &HashMap<String, Decimal>,
    ) -> EngineResult<EvaluationOutcome>;
}

/// Builds the variable map the engine exposes to formula strings for one
/// class: `reservations`, `capacity`, `paid_reservations`, `waitlist`,
/// `courtesies`, and `occupancy` (percentage, 0 when capacity is 0).
pub fn class_variables(class: &crate::models::ClassSession) -> HashMap<String, Decimal> {
    let mut variables = HashMap::new();
    variables.insert(
        "reservations".to_string(),
        Decimal::from(class.total_reservations),
    );
    variables.insert("capacity".to_string(), Decimal::from(class.capacity));
    variables.insert(
        "paid_reservations".to_string(),
        Decimal::from(class.paid_reservations),
    );
    variables.insert("waitlist".to_string(), Decimal::from(class.waitlist));
    variables.insert("courtesies".to_string(), Decimal::from(class.courtesies));
    variables.insert(
        "occupancy".to_string(),
        class.occupancy_percent().unwrap_or(Decimal::ZERO),
    );
    variables
}
