//! "Cost of waiting" comparison: start today vs. start in six months.

use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::metrics::months_for_weeks;
use crate::domain::profile::AnswerRecord;

/// Months the delayed scenario waits before starting.
pub const DELAY_MONTHS: u32 = 6;

/// One bar of the comparison chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub label_key: &'static str,
    pub starts_on: Timestamp,
    pub ends_on: Timestamp,
    /// Weight shown for the scenario at the chart's reference date.
    pub weight_shown: f64,
    /// Month-and-year label of the chart's reference date.
    pub date_label: String,
    pub months_until_goal: u32,
}

/// Both scenarios plus the difference they make.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonView {
    pub start_today: Scenario,
    pub start_later: Scenario,
    pub weight_difference: f64,
}

impl ComparisonView {
    /// Starting today reaches the goal weight after `weeks * 7` days; starting
    /// in six months is still at the current weight on that start date.
    pub fn build(record: &AnswerRecord, today: Timestamp) -> Result<Self, DomainError> {
        let (Some(current), Some(goal), Some(weeks)) = (
            record.current_weight,
            record.goal_weight,
            record.estimated_duration,
        ) else {
            return Err(DomainError::new(
                ErrorCode::MissingMetricsInput,
                "Comparison needs current weight, goal weight and a plan duration",
            ));
        };

        let plan_days = i64::from(weeks) * 7;
        let months = months_for_weeks(weeks);

        let today_end = today.add_days(plan_days);
        let later_start = today.add_calendar_months(DELAY_MONTHS);
        let later_end = later_start.add_days(plan_days);

        Ok(Self {
            start_today: Scenario {
                label_key: "comparison.start_today",
                starts_on: today,
                ends_on: today_end,
                weight_shown: goal,
                date_label: today_end.month_year_label(),
                months_until_goal: months,
            },
            start_later: Scenario {
                label_key: "comparison.start_in_six_months",
                starts_on: later_start,
                ends_on: later_end,
                weight_shown: current,
                date_label: later_start.month_year_label(),
                months_until_goal: months + DELAY_MONTHS,
            },
            weight_difference: current - goal,
        })
    }
}
