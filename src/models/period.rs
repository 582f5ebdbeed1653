//! Pay period model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A pay period over which instructor payments are calculated.
///
/// The week count is supplied by the catalog rather than derived from the
/// date range, since studios occasionally run short or padded periods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    /// Unique identifier for the period (e.g. "2026-01").
    pub id: String,
    /// First day of the period.
    pub start_date: NaiveDate,
    /// Last day of the period.
    pub end_date: NaiveDate,
    /// Number of weeks the period spans, used for classes-per-week.
    pub weeks: u32,
}
