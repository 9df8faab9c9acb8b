//! Metrics module - pure body-metric formulas.
//!
//! No I/O, no clock, no randomness. Inputs are expected to be range-checked
//! by the flow's step gates before they get here.
//!
//! - `body_mass` - BMI, classification, ideal weight range
//! - `energy` - BMR and TDEE
//! - `plan` - duration, calorie deficit policies
//! - `projection` - week-by-week weight line
//! - `calculator` - one-shot enrichment of an `AnswerRecord`

mod body_mass;
mod calculator;
mod energy;
mod plan;
mod projection;

pub use body_mass::{
    calculate_bmi, weight_for_bmi, BmiClass, IdealWeightRange, IDEAL_BMI_AVERAGE, IDEAL_BMI_MAX,
    IDEAL_BMI_MIN,
};
pub use calculator::MetricsCalculator;
pub use energy::{activity_factor, calculate_bmr, calculate_tdee, DEFAULT_ACTIVITY_FACTOR};
pub use plan::{
    duration_derived_deficit, estimated_duration, months_for_weeks, DeficitPolicy,
    AVERAGE_WEEKLY_LOSS_KG, FIXED_DAILY_DEFICIT, KCAL_PER_KG, MAX_DAILY_DEFICIT,
    MIN_DAILY_DEFICIT,
};
pub use projection::{generate_weight_projection, ProjectionPoint, WeightProjection};

use thiserror::Error;

/// Inputs the formulas are not defined for.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MetricsError {
    #[error("Goal weight {goal_weight} kg is not below current weight {current_weight} kg")]
    GoalNotBelowCurrent {
        current_weight: f64,
        goal_weight: f64,
    },
}
