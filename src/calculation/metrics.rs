//! Per-instructor performance metrics aggregation.
//!
//! This module computes the statistics category resolution runs on:
//! occupancy, dobleteos, non-prime hour counts, unique studios, and
//! classes-per-week. The aggregation is a pure function of its inputs.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;

use crate::config::EngineConfig;
use crate::models::ClassSession;

/// Aggregated performance metrics for one instructor in one period.
#[derive(Debug, Clone, PartialEq)]
pub struct InstructorMetrics {
    /// Number of classes taught.
    pub total_classes: u32,
    /// Sum of reservations across classes.
    pub total_reservations: u32,
    /// Sum of capacity across classes.
    pub total_capacity: u32,
    /// Mean occupancy percentage; zero-capacity classes excluded.
    pub occupancy_average: Decimal,
    /// Count of distinct studios taught at.
    pub unique_studios: u32,
    /// Days with more than one flagship-discipline class.
    pub dobleteos: u32,
    /// Flagship-discipline classes held in a configured non-prime slot.
    pub non_prime_hours: u32,
    /// Classes divided by the period's week count.
    pub classes_per_week: Decimal,
    /// Whether the instructor participated in studio events this period.
    pub event_participation: bool,
    /// Whether the instructor complied with teaching guidelines.
    pub guideline_compliance: bool,
}

impl InstructorMetrics {
    /// Overrides the event participation flag (defaults to true).
    pub fn with_event_participation(mut self, value: bool) -> Self {
        self.event_participation = value;
        self
    }

    /// Overrides the guideline compliance flag (defaults to true).
    pub fn with_guideline_compliance(mut self, value: bool) -> Self {
        self.guideline_compliance = value;
        self
    }
}

/// Aggregates metrics over an instructor's classes for a period.
///
/// When `discipline_id` is given, only that discipline's classes feed the
/// totals. Dobleteos and non-prime counts are always restricted to the
/// configured flagship discipline, independent of the filter.
///
/// # Arguments
///
/// * `classes` - All of the instructor's classes for the period
/// * `discipline_id` - Optional restriction to one discipline
/// * `config` - Engine configuration (flagship discipline, non-prime slots)
/// * `weeks` - Number of weeks in the period, floored at 1
pub fn aggregate_metrics(
    classes: &[ClassSession],
    discipline_id: Option<&str>,
    config: &EngineConfig,
    weeks: u32,
) -> InstructorMetrics {
    let selected: Vec<&ClassSession> = classes
        .iter()
        .filter(|c| discipline_id.is_none_or(|d| c.discipline_id == d))
        .collect();

    let total_classes = selected.len() as u32;
    let total_reservations: u32 = selected.iter().map(|c| c.total_reservations).sum();
    let total_capacity: u32 = selected.iter().map(|c| c.capacity).sum();

    let occupancies: Vec<Decimal> = selected
        .iter()
        .filter_map(|c| c.occupancy_percent())
        .collect();
    let occupancy_average = if occupancies.is_empty() {
        Decimal::ZERO
    } else {
        occupancies.iter().copied().sum::<Decimal>() / Decimal::from(occupancies.len() as u32)
    };

    let unique_studios = selected
        .iter()
        .map(|c| c.studio.to_lowercase())
        .collect::<HashSet<_>>()
        .len() as u32;

    // Dobleteos and non-prime counts only look at the flagship discipline,
    // drawn from the full class list so a non-flagship filter cannot zero
    // them out.
    let flagship: Vec<&ClassSession> = classes
        .iter()
        .filter(|c| c.discipline_id == config.flagship_discipline_id())
        .collect();

    let mut classes_per_day: HashMap<chrono::NaiveDate, u32> = HashMap::new();
    for class in &flagship {
        *classes_per_day.entry(class.date).or_insert(0) += 1;
    }
    let dobleteos = classes_per_day.values().filter(|&&n| n > 1).count() as u32;

    let non_prime_hours = flagship
        .iter()
        .filter(|c| config.is_non_prime(&c.studio, c.start_time))
        .count() as u32;

    let weeks = weeks.max(1);
    let classes_per_week = Decimal::from(total_classes) / Decimal::from(weeks);

    InstructorMetrics {
        total_classes,
        total_reservations,
        total_capacity,
        occupancy_average,
        unique_studios,
        dobleteos,
        non_prime_hours,
        classes_per_week,
        event_participation: true,
        guideline_compliance: true,
    }
}
