//! Class session model.
//!
//! This module defines the ClassSession struct representing one scheduled
//! class taught by an instructor, including attendance figures and the
//! flags that drive full-house and versus pay adjustments.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single class session with its attendance figures.
///
/// Attendance counts are unsigned, so the "reservations ≥ 0" invariant holds
/// by construction. A capacity of zero is tolerated by the model but such a
/// class is excluded from occupancy statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassSession {
    /// Unique identifier for the class session.
    pub id: String,
    /// The instructor who taught the class.
    pub instructor_id: String,
    /// The discipline the class belongs to.
    pub discipline_id: String,
    /// The pay period the class falls in.
    pub period_id: String,
    /// The calendar date of the class.
    pub date: NaiveDate,
    /// The local start time of the class.
    pub start_time: NaiveTime,
    /// The studio the class was held at.
    pub studio: String,
    /// Number of places available ("lugares").
    pub capacity: u32,
    /// Total reservations including waitlist conversions.
    pub total_reservations: u32,
    /// Reservations still on the waitlist.
    #[serde(default)]
    pub waitlist: u32,
    /// Courtesy (non-paying) reservations.
    #[serde(default)]
    pub courtesies: u32,
    /// Reservations that were paid for.
    #[serde(default)]
    pub paid_reservations: u32,
    /// Whether the class was co-taught by multiple instructors.
    #[serde(default)]
    pub is_versus: bool,
    /// Number of co-instructors for a versus class (≥ 2 when `is_versus`).
    #[serde(default)]
    pub versus_count: u32,
    /// Explicit flag forcing full-house treatment regardless of attendance.
    #[serde(default)]
    pub full_house_override: bool,
    /// Free-text annotations. Informational only; never parsed.
    #[serde(default)]
    pub notes: String,
}

impl ClassSession {
    /// Returns the occupancy of this class as a percentage.
    ///
    /// Returns `None` when the class has zero capacity, which excludes it
    /// from occupancy averages.
    ///
    /// # Examples
    ///
    /// ```
    /// use studio_pay_engine::models::ClassSession;
    /// use chrono::{NaiveDate, NaiveTime};
    /// use rust_decimal::Decimal;
    ///
    /// let class = ClassSession {
    ///     id: "cls_001".to_string(),
    ///     instructor_id: "ins_001".to_string(),
    ///     discipline_id: "cycling".to_string(),
    ///     period_id: "2026-01".to_string(),
    ///     date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
    ///     start_time: NaiveTime::from_hms_opt(7, 0, 0).unwrap(),
    ///     studio: "Reforma".to_string(),
    ///     capacity: 40,
    ///     total_reservations: 30,
    ///     waitlist: 0,
    ///     courtesies: 0,
    ///     paid_reservations: 30,
    ///     is_versus: false,
    ///     versus_count: 0,
    ///     full_house_override: false,
    ///     notes: String::new(),
    /// };
    /// assert_eq!(class.occupancy_percent(), Some(Decimal::new(75, 0)));
    /// ```
    pub fn occupancy_percent(&self) -> Option<Decimal> {
        if self.capacity == 0 {
            return None;
        }
        let reservations = Decimal::from(self.total_reservations);
        let capacity = Decimal::from(self.capacity);
        Some(reservations / capacity * Decimal::ONE_HUNDRED)
    }

    /// Returns true if the class is a valid versus class.
    ///
    /// A class flagged `is_versus` with fewer than two co-instructors is
    /// inconsistent; the adjuster rejects it as an invalid class.
    pub fn is_shared(&self) -> bool {
        self.is_versus && self.versus_count > 1
    }
}
