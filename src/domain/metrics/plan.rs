//! Weight-loss plan arithmetic: duration and daily calorie deficit.

use serde::{Deserialize, Serialize};

use super::MetricsError;

/// Kilocalories stored in one kilogram of body fat.
pub const KCAL_PER_KG: f64 = 7700.0;

/// Average loss rate assumed for duration estimates.
pub const AVERAGE_WEEKLY_LOSS_KG: f64 = 0.75;

pub const MIN_DAILY_DEFICIT: f64 = 500.0;
pub const MAX_DAILY_DEFICIT: f64 = 1000.0;

/// Deficit used by [`DeficitPolicy::Fixed`].
pub const FIXED_DAILY_DEFICIT: u32 = 500;

/// Weeks per displayed month.
const WEEKS_PER_MONTH: u32 = 4;

/// How the daily calorie deficit is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeficitPolicy {
    /// Spread the energy of the lost weight over the plan, clamped to 500–1000 kcal/day.
    #[default]
    DurationDerived,
    /// Always 500 kcal/day.
    Fixed,
}

impl DeficitPolicy {
    /// Daily deficit in kcal for losing `current - goal` kilograms in `weeks`.
    pub fn daily_deficit(&self, current_weight: f64, goal_weight: f64, weeks: u32) -> u32 {
        match self {
            DeficitPolicy::DurationDerived => {
                duration_derived_deficit(current_weight, goal_weight, weeks)
            }
            DeficitPolicy::Fixed => FIXED_DAILY_DEFICIT,
        }
    }
}

/// `(kg_to_lose × 7700) / (weeks × 7)`, clamped to 500–1000 kcal/day.
pub fn duration_derived_deficit(current_weight: f64, goal_weight: f64, weeks: u32) -> u32 {
    let total = (current_weight - goal_weight) * KCAL_PER_KG;
    let daily = total / (f64::from(weeks) * 7.0);
    // f64::max/min discard NaN, so a 0/0 lands on the lower bound.
    daily.max(MIN_DAILY_DEFICIT).min(MAX_DAILY_DEFICIT).round() as u32
}

/// Weeks to reach the goal at 0.75 kg/week, rounded up.
pub fn estimated_duration(current_weight: f64, goal_weight: f64) -> Result<u32, MetricsError> {
    if goal_weight >= current_weight {
        return Err(MetricsError::GoalNotBelowCurrent {
            current_weight,
            goal_weight,
        });
    }
    Ok(((current_weight - goal_weight) / AVERAGE_WEEKLY_LOSS_KG).ceil() as u32)
}

/// Months shown to the visitor for a plan of `weeks`.
pub fn months_for_weeks(weeks: u32) -> u32 {
    (weeks + WEEKS_PER_MONTH - 1) / WEEKS_PER_MONTH
}
