//! Category resolution from performance metrics.
//!
//! This module maps an instructor's aggregated metrics to a discrete
//! category per discipline, honoring manual overrides first.

use std::collections::HashMap;

use crate::models::{CategoryRequirement, InstructorCategory};

use super::metrics::InstructorMetrics;

/// Where a resolved category came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategorySource {
    /// A manual override supplied for the (instructor, discipline) pair.
    Override,
    /// The highest tier whose requirements were satisfied.
    Computed,
    /// No tier was satisfied; the base tier applies.
    Fallback,
}

/// The result of category resolution, including a human-readable trace.
#[derive(Debug, Clone)]
pub struct CategoryResolution {
    /// The resolved category.
    pub category: InstructorCategory,
    /// How the category was arrived at.
    pub source: CategorySource,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// Resolves an instructor's category for one discipline.
///
/// A manual override returns immediately, bypassing all checks. Otherwise
/// categories are evaluated in descending seniority order and the first one
/// whose every requirement is met wins; categories without a requirement
/// entry are skipped. When nothing is satisfied the base tier applies.
///
/// Guideline compliance is required for every tier regardless of the
/// requirement's own flag.
pub fn resolve_category(
    requirements: &HashMap<InstructorCategory, CategoryRequirement>,
    metrics: &InstructorMetrics,
    manual_override: Option<InstructorCategory>,
) -> CategoryResolution {
    if let Some(category) = manual_override {
        return CategoryResolution {
            category,
            source: CategorySource::Override,
            reasoning: format!("Manual override to '{}', requirement checks bypassed", category),
        };
    }

    for category in InstructorCategory::descending() {
        let Some(requirement) = requirements.get(&category) else {
            continue;
        };

        if satisfies(requirement, metrics) {
            return CategoryResolution {
                category,
                source: CategorySource::Computed,
                reasoning: format!(
                    "Category '{}' satisfied: {} classes, {:.1}% occupancy, {} studios, {} dobleteos, {} non-prime",
                    category,
                    metrics.total_classes,
                    metrics.occupancy_average,
                    metrics.unique_studios,
                    metrics.dobleteos,
                    metrics.non_prime_hours
                ),
            };
        }
    }

    CategoryResolution {
        category: InstructorCategory::lowest(),
        source: CategorySource::Fallback,
        reasoning: "No category requirements satisfied, defaulting to base tier".to_string(),
    }
}

/// Checks every threshold of one requirement against the metrics.
fn satisfies(requirement: &CategoryRequirement, metrics: &InstructorMetrics) -> bool {
    metrics.total_classes >= requirement.min_classes
        && metrics.occupancy_average >= requirement.min_occupancy
        && metrics.unique_studios >= requirement.min_unique_studios
        && metrics.dobleteos >= requirement.min_dobleteos
        && metrics.non_prime_hours >= requirement.min_non_prime_hours
        && (!requirement.requires_event_participation || metrics.event_participation)
        && metrics.guideline_compliance
}
