//! Instructor Payment Calculation Engine for boutique fitness studios
//!
//! This crate turns an instructor's taught classes for a pay period into a
//! persisted payment record: attendance metrics, category resolution against
//! per-discipline requirements, tiered tariff pricing with versus and
//! full-house handling, penalty discounting, and final payment assembly with
//! retention withholding.

#![warn(missing_docs)]

pub mod calculation;
pub mod catalog;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod models;
