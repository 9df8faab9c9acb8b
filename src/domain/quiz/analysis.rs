//! Staged progress of the simulated analysis screen.

use serde::Serialize;
use std::time::Duration;

use crate::domain::foundation::Percentage;

/// Stage keys shown while the analysis runs, in order.
pub const ANALYSIS_STAGES: [&str; 6] = [
    "analysis.profile",
    "analysis.metabolic_rate",
    "analysis.eating_habits",
    "analysis.calorie_needs",
    "analysis.projection",
    "analysis.personalization",
];

/// Default time spent on each stage.
pub const STAGE_DURATION: Duration = Duration::from_millis(800);

/// Snapshot of the analysis screen at some elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnalysisProgress {
    pub percent: Percentage,
    /// Stage currently displayed (0-based, stays on the last one when done).
    pub stage_index: usize,
    pub stage_key: &'static str,
    pub completed_stages: usize,
}

impl AnalysisProgress {
    /// Progress after `elapsed` of a `total` delay split evenly across the stages.
    ///
    /// A zero `total` is already complete.
    pub fn at(elapsed: Duration, total: Duration) -> Self {
        let stage_count = ANALYSIS_STAGES.len();
        if total.is_zero() || elapsed >= total {
            return Self {
                percent: Percentage::HUNDRED,
                stage_index: stage_count - 1,
                stage_key: ANALYSIS_STAGES[stage_count - 1],
                completed_stages: stage_count,
            };
        }

        let fraction = elapsed.as_secs_f64() / total.as_secs_f64();
        let completed = ((fraction * stage_count as f64).floor() as usize).min(stage_count);
        let stage_index = completed.min(stage_count - 1);

        Self {
            percent: Percentage::from_ratio(elapsed.as_secs_f64(), total.as_secs_f64()),
            stage_index,
            stage_key: ANALYSIS_STAGES[stage_index],
            completed_stages: completed,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.completed_stages == ANALYSIS_STAGES.len()
    }
}
