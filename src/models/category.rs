//! Instructor category model.
//!
//! This module defines the closed set of instructor categories and their
//! seniority ordering used by category resolution and tariff lookup.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category an instructor holds for a discipline in a period.
///
/// Categories form a fixed seniority ladder. Category resolution walks the
/// ladder from the most senior tier downward and stops at the first tier
/// whose requirements are met; [`InstructorCategory::Base`] is the floor
/// every instructor falls back to.
///
/// # Example
///
/// ```
/// use studio_pay_engine::models::InstructorCategory;
///
/// assert_eq!(InstructorCategory::descending()[0], InstructorCategory::Master);
/// assert_eq!(InstructorCategory::lowest(), InstructorCategory::Base);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstructorCategory {
    /// The most senior tier.
    Master,
    /// Second tier.
    Elite,
    /// Third tier.
    Advanced,
    /// The base tier every instructor qualifies for.
    Base,
}

impl InstructorCategory {
    /// All categories in descending seniority order (highest tier first).
    pub fn descending() -> [InstructorCategory; 4] {
        [
            InstructorCategory::Master,
            InstructorCategory::Elite,
            InstructorCategory::Advanced,
            InstructorCategory::Base,
        ]
    }

    /// The lowest tier, used as the fallback when no requirements are met.
    pub fn lowest() -> InstructorCategory {
        InstructorCategory::Base
    }
}

impl fmt::Display for InstructorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstructorCategory::Master => "master",
            InstructorCategory::Elite => "elite",
            InstructorCategory::Advanced => "advanced",
            InstructorCategory::Base => "base",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descending_order_starts_at_master_ends_at_base() {
        let order = InstructorCategory::descending();
        assert_eq!(order.first(), Some(&InstructorCategory::Master));
        assert_eq!(order.last(), Some(&InstructorCategory::Base));
        assert_eq!(order.len(), 4);
    }

    #[test]
    fn test_lowest_is_base() {
        assert_eq!(InstructorCategory::lowest(), InstructorCategory::Base);
    }

    #[test]
    fn test_category_serialization() {
        assert_eq!(
            serde_json::to_string(&InstructorCategory::Master).unwrap(),
            "\"master\""
        );
        assert_eq!(
            serde_json::to_string(&InstructorCategory::Base).unwrap(),
            "\"base\""
        );
    }

    #[test]
    fn test_category_deserialization() {
        let category: InstructorCategory = serde_json::from_str("\"elite\"").unwrap();
        assert_eq!(category, InstructorCategory::Elite);
    }

    #[test]
    fn test_display_matches_serde_names() {
        for category in InstructorCategory::descending() {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category));
        }
    }
}
