use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::metrics::{
    generate_weight_projection, months_for_weeks, BmiClass, IdealWeightRange, ProjectionPoint,
};
use crate::domain::profile::AnswerRecord;

/// Everything the results dashboard shows, derived from an enriched record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultsSummary {
    pub current_weight: f64,
    pub goal_weight: f64,
    pub weight_to_lose: f64,
    pub estimated_weeks: u32,
    /// Whole months shown to the visitor, `ceil(weeks / 4)`.
    pub months: u32,

    pub bmi: f64,
    pub bmi_class: BmiClass,
    pub bmi_label: &'static str,
    pub ideal_weight: IdealWeightRange,

    pub bmr: u32,
    pub tdee: u32,
    pub calorie_deficit: u32,
    /// `tdee - calorie_deficit`, floored at zero.
    pub daily_calorie_target: u32,

    pub projection: Vec<ProjectionPoint>,
}

impl ResultsSummary {
    /// Builds the dashboard from a record that went through the analysis.
    pub fn from_record(record: &AnswerRecord) -> Result<Self, DomainError> {
        let missing = || {
            DomainError::new(
                ErrorCode::MissingMetricsInput,
                "Results need an analysed record with a weight-loss plan",
            )
        };

        let current_weight = record.current_weight.ok_or_else(missing)?;
        let goal_weight = record.goal_weight.ok_or_else(missing)?;
        let height = record.height.ok_or_else(missing)?;
        let bmi = record.bmi.ok_or_else(missing)?;
        let bmr = record.bmr.ok_or_else(missing)?;
        let tdee = record.tdee.ok_or_else(missing)?;
        let calorie_deficit = record.calorie_deficit.ok_or_else(missing)?;
        let estimated_weeks = record.estimated_duration.ok_or_else(missing)?;

        let bmi_class = BmiClass::classify(bmi);

        Ok(Self {
            current_weight,
            goal_weight,
            weight_to_lose: current_weight - goal_weight,
            estimated_weeks,
            months: months_for_weeks(estimated_weeks),
            bmi,
            bmi_class,
            bmi_label: bmi_class.label(),
            ideal_weight: IdealWeightRange::for_height(height),
            bmr,
            tdee,
            calorie_deficit,
            daily_calorie_target: tdee.saturating_sub(calorie_deficit),
            projection: generate_weight_projection(current_weight, goal_weight, estimated_weeks)
                .collect(),
        })
    }
}

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;
