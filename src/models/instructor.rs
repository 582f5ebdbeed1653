//! Instructor model and related types.
//!
//! This module defines the Instructor struct along with the penalty and
//! manual-category records the catalog provider attaches to it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{ClassSession, InstructorCategory};

/// An administrative penalty charged against an instructor.
///
/// Penalty records are created by administrative action and are read-only to
/// the engine; only their points feed the discount calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyRecord {
    /// The instructor the penalty applies to.
    pub instructor_id: String,
    /// The period the penalty applies to.
    pub period_id: String,
    /// Optional discipline the penalty is scoped to.
    #[serde(default)]
    pub discipline_id: Option<String>,
    /// Penalty points accrued.
    pub points: Decimal,
    /// The kind of infraction (late arrival, no-show, ...).
    pub penalty_type: String,
    /// When the penalty was recorded.
    pub applied_at: DateTime<Utc>,
}

/// A manual category assignment for one (instructor, discipline) pair.
///
/// Overrides bypass metric-based resolution entirely for their pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOverride {
    /// The instructor the override applies to.
    pub instructor_id: String,
    /// The discipline the override applies to.
    pub discipline_id: String,
    /// The category to assign.
    pub category: InstructorCategory,
}

/// An instructor with everything the engine needs for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instructor {
    /// Unique identifier for the instructor.
    pub id: String,
    /// The instructor's display name.
    pub name: String,
    /// All class sessions taught in the requested period.
    #[serde(default)]
    pub classes: Vec<ClassSession>,
    /// Penalty records for the requested period.
    #[serde(default)]
    pub penalties: Vec<PenaltyRecord>,
    /// Manual category assignments.
    #[serde(default)]
    pub category_overrides: Vec<CategoryOverride>,
}

impl Instructor {
    /// Returns the manual category for a discipline, if one is set.
    pub fn override_for(&self, discipline_id: &str) -> Option<InstructorCategory> {
        self.category_overrides
            .iter()
            .find(|o| o.discipline_id == discipline_id)
            .map(|o| o.category)
    }

    /// Sums penalty points, optionally restricted to one discipline.
    ///
    /// Penalties without a discipline scope always count.
    pub fn penalty_points(&self, discipline_id: Option<&str>) -> Decimal {
        self.penalties
            .iter()
            .filter(|p| match (discipline_id, p.discipline_id.as_deref()) {
                (Some(wanted), Some(scoped)) => wanted == scoped,
                (Some(_), None) => true,
                (None, _) => true,
            })
            .map(|p| p.points)
            .sum()
    }
}
