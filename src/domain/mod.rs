//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, errors, state machine)
//! - `profile` - The visitor's answer record and closed choice enums
//! - `metrics` - Pure body-metric formulas (BMI, BMR, TDEE, plan, projection)
//! - `quiz` - Step tables and the `QuizFlow` aggregate
//! - `results` - View models for the screens after the analysis

pub mod foundation;
pub mod metrics;
pub mod profile;
pub mod quiz;
pub mod results;
