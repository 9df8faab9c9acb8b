//! MetricsCalculator - enriches an AnswerRecord with every derived metric.

use tracing::debug;

use crate::domain::profile::AnswerRecord;

use super::{calculate_bmi, calculate_bmr, calculate_tdee, estimated_duration, DeficitPolicy};

/// Stateless calculator; the only knob is the deficit policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsCalculator {
    policy: DeficitPolicy,
}

impl MetricsCalculator {
    pub fn new(policy: DeficitPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> DeficitPolicy {
        self.policy
    }

    /// Returns true when weight, height and age bracket are all present.
    pub fn has_required_inputs(record: &AnswerRecord) -> bool {
        record.current_weight.is_some() && record.height.is_some() && record.age_bracket.is_some()
    }

    /// Returns `record` with bmi, bmr, tdee, calorie deficit and estimated
    /// duration recomputed from scratch.
    ///
    /// If weight, height or age bracket is missing the record comes back
    /// unchanged. Duration and deficit are left empty unless a goal weight
    /// below the current weight is present.
    pub fn calculate_all_metrics(&self, record: &AnswerRecord) -> AnswerRecord {
        let (Some(weight), Some(height), Some(bracket)) =
            (record.current_weight, record.height, record.age_bracket)
        else {
            debug!("Metrics inputs incomplete, record left unchanged");
            return record.clone();
        };

        if record.gender.is_none() {
            debug!("No gender recorded, using female BMR offset");
        }

        let mut enriched = record.clone();
        enriched.clear_derived();

        let bmr = calculate_bmr(weight, height, bracket.representative_age(), record.gender);
        enriched.bmi = Some(calculate_bmi(weight, height));
        enriched.bmr = Some(bmr);
        enriched.tdee = Some(calculate_tdee(bmr, record.activity_level));

        if let Some(goal) = record.goal_weight {
            match estimated_duration(weight, goal) {
                Ok(weeks) => {
                    enriched.estimated_duration = Some(weeks);
                    enriched.calorie_deficit = Some(self.policy.daily_deficit(weight, goal, weeks));
                }
                Err(e) => debug!(error = %e, "No weight-loss plan derived"),
            }
        }

        debug!(
            bmi = ?enriched.bmi,
            bmr = ?enriched.bmr,
            tdee = ?enriched.tdee,
            weeks = ?enriched.estimated_duration,
            "Metrics calculated"
        );

        enriched
    }
}
