//! External collaborator interfaces.
//!
//! The engine consumes its catalog (disciplines, formulas, instructors,
//! periods) and its persistence sink through traits, so embedders can back
//! them with any store. In-memory reference implementations live in
//! [`memory`] and ship with the crate for tests and embedding.

mod memory;

pub use memory::{MemoryCatalog, MemorySink};

use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{Discipline, FormulaDefinition, Instructor, PaymentRecord, Period};

/// Read-side catalog the engine calculates from.
pub trait CatalogProvider: Send + Sync {
    /// All disciplines offered by the studio chain.
    fn disciplines(&self) -> EngineResult<Vec<Discipline>>;

    /// Formula definitions for a period, keyed by (discipline, period).
    fn formulas(&self, period_id: &str) -> EngineResult<Vec<FormulaDefinition>>;

    /// One instructor with their classes, penalties and overrides for a
    /// period. Fails with `InstructorNotFound` or `PeriodNotFound`.
    fn instructor(&self, id: &str, period_id: &str) -> EngineResult<Instructor>;

    /// The period record. Fails with `PeriodNotFound`.
    fn period(&self, period_id: &str) -> EngineResult<Period>;

    /// Identifiers of every instructor with activity in a period, for
    /// batch calculation.
    fn instructor_ids(&self, period_id: &str) -> EngineResult<Vec<String>>;

    /// Strict lookup of one discipline's formula in a period.
    ///
    /// Fails with `FormulaNotFound` where the engine's own calculation path
    /// would skip the discipline instead.
    fn formula(&self, discipline_id: &str, period_id: &str) -> EngineResult<FormulaDefinition> {
        self.formulas(period_id)?
            .into_iter()
            .find(|f| f.discipline_id == discipline_id)
            .ok_or_else(|| crate::error::EngineError::FormulaNotFound {
                discipline_id: discipline_id.to_string(),
                period_id: period_id.to_string(),
            })
    }
}

/// Write-side sink for calculated payments.
///
/// Implementations must guarantee at most one record per
/// (instructor, period) pair and serialize concurrent upserts for the same
/// pair.
pub trait PaymentSink: Send + Sync {
    /// The stored payment for a pair, if any.
    fn existing_payment(
        &self,
        instructor_id: &str,
        period_id: &str,
    ) -> EngineResult<Option<PaymentRecord>>;

    /// Creates or replaces the record for its (instructor, period) pair.
    fn upsert(&self, record: PaymentRecord) -> EngineResult<Uuid>;
}
