//! Core data models for the instructor payment engine.
//!
//! This module contains all the domain models used throughout the engine.

mod category;
mod class_session;
mod formula;
mod instructor;
mod payment;
mod period;

pub use category::InstructorCategory;
pub use class_session::ClassSession;
pub use formula::{
    CategoryRequirement, Discipline, FormulaDefinition, PaymentParameters, TariffTier,
};
pub use instructor::{CategoryOverride, Instructor, PenaltyRecord};
pub use payment::{ClassPayDetail, PaymentRecord, PaymentStatus, ReajusteType};
pub use period::Period;
