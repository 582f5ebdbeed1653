//! Error types for the instructor payment engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during payment calculation.

use thiserror::Error;

/// The main error type for the instructor payment engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use studio_pay_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/engine.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/engine.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// No instructor record exists for the given identifier.
    #[error("Instructor not found: {id}")]
    InstructorNotFound {
        /// The instructor identifier that was not found.
        id: String,
    },

    /// No period record exists for the given identifier.
    #[error("Period not found: {id}")]
    PeriodNotFound {
        /// The period identifier that was not found.
        id: String,
    },

    /// No formula definition exists for a discipline in a period.
    #[error("No tariff formula for discipline '{discipline_id}' in period '{period_id}'")]
    FormulaNotFound {
        /// The discipline the instructor taught.
        discipline_id: String,
        /// The period being calculated.
        period_id: String,
    },

    /// A class session contained inconsistent data.
    #[error("Invalid class '{class_id}': {message}")]
    InvalidClass {
        /// The ID of the invalid class session.
        class_id: String,
        /// A description of what made the class invalid.
        message: String,
    },

    /// The expression evaluator rejected a formula string.
    #[error("Failed to evaluate '{expression}': {message}")]
    EvaluationFailed {
        /// The formula string that failed.
        expression: String,
        /// A description of the evaluation failure.
        message: String,
    },

    /// The persistence sink rejected an upsert.
    #[error("Persistence error: {message}")]
    PersistenceError {
        /// A description of the persistence failure.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
