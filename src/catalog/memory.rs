//! In-memory catalog and sink implementations.
//!
//! These back the engine in tests and small embeddings. The sink enforces
//! the one-record-per-(instructor, period) invariant behind a mutex, which
//! also serializes concurrent upserts for the same pair.

use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{Discipline, FormulaDefinition, Instructor, PaymentRecord, Period};

use super::{CatalogProvider, PaymentSink};

/// An in-memory catalog assembled with the builder-style `with_*` methods.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    disciplines: Vec<Discipline>,
    formulas: Vec<FormulaDefinition>,
    instructors: Vec<Instructor>,
    periods: Vec<Period>,
}

impl MemoryCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a discipline.
    pub fn with_discipline(mut self, discipline: Discipline) -> Self {
        self.disciplines.push(discipline);
        self
    }

    /// Adds a formula definition.
    pub fn with_formula(mut self, formula: FormulaDefinition) -> Self {
        self.formulas.push(formula);
        self
    }

    /// Adds an instructor (with classes and penalties for all periods).
    pub fn with_instructor(mut self, instructor: Instructor) -> Self {
        self.instructors.push(instructor);
        self
    }

    /// Adds a period.
    pub fn with_period(mut self, period: Period) -> Self {
        self.periods.push(period);
        self
    }
}

impl CatalogProvider for MemoryCatalog {
    fn disciplines(&self) -> EngineResult<Vec<Discipline>> {
        Ok(self.disciplines.clone())
    }

    fn formulas(&self, period_id: &str) -> EngineResult<Vec<FormulaDefinition>> {
        Ok(self
            .formulas
            .iter()
            .filter(|f| f.period_id == period_id)
            .cloned()
            .collect())
    }

    fn instructor(&self, id: &str, period_id: &str) -> EngineResult<Instructor> {
        // Period existence is checked first so an unknown period is not
        // reported as a missing instructor.
        self.period(period_id)?;

        let instructor = self
            .instructors
            .iter()
            .find(|i| i.id == id)
            .ok_or_else(|| EngineError::InstructorNotFound { id: id.to_string() })?;

        let mut scoped = instructor.clone();
        scoped.classes.retain(|c| c.period_id == period_id);
        scoped.penalties.retain(|p| p.period_id == period_id);
        Ok(scoped)
    }

    fn period(&self, period_id: &str) -> EngineResult<Period> {
        self.periods
            .iter()
            .find(|p| p.id == period_id)
            .cloned()
            .ok_or_else(|| EngineError::PeriodNotFound {
                id: period_id.to_string(),
            })
    }

    fn instructor_ids(&self, period_id: &str) -> EngineResult<Vec<String>> {
        self.period(period_id)?;
        Ok(self
            .instructors
            .iter()
            .filter(|i| i.classes.iter().any(|c| c.period_id == period_id))
            .map(|i| i.id.clone())
            .collect())
    }
}

/// An in-memory payment sink keyed by (instructor, period).
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<HashMap<(String, String), PaymentRecord>>,
}

impl MemorySink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records stored, for assertions in tests.
    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    /// Whether the sink holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PaymentSink for MemorySink {
    fn existing_payment(
        &self,
        instructor_id: &str,
        period_id: &str,
    ) -> EngineResult<Option<PaymentRecord>> {
        let records = self
            .records
            .lock()
            .map_err(|_| EngineError::PersistenceError {
                message: "sink mutex poisoned".to_string(),
            })?;
        Ok(records
            .get(&(instructor_id.to_string(), period_id.to_string()))
            .cloned())
    }

    fn upsert(&self, record: PaymentRecord) -> EngineResult<Uuid> {
        let mut records = self
            .records
            .lock()
            .map_err(|_| EngineError::PersistenceError {
                message: "sink mutex poisoned".to_string(),
            })?;

        let key = (record.instructor_id.clone(), record.period_id.clone());
        let id = match records.get(&key) {
            // The pair is unique: a second upsert keeps the original id.
            Some(existing) => existing.id,
            None => record.id,
        };

        let mut stored = record;
        stored.id = id;
        records.insert(key, stored);
        Ok(id)
    }
}
