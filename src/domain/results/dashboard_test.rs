use crate::domain::foundation::ErrorCode;
use crate::domain::metrics::{BmiClass, MetricsCalculator};
use crate::domain::profile::{ActivityLevel, AgeBracket, Answer, AnswerRecord, Gender};
use crate::domain::results::ResultsSummary;

fn analysed_record() -> AnswerRecord {
    let mut record = AnswerRecord::with_gender(Gender::Female);
    record.apply(Answer::AgeBracket(AgeBracket::From26To35));
    record.apply(Answer::Height(165.0));
    record.apply(Answer::CurrentWeight(80.0));
    record.apply(Answer::GoalWeight(65.0));
    record.apply(Answer::ActivityLevel(ActivityLevel::Moderate));
    MetricsCalculator::default().calculate_all_metrics(&record)
}

#[test]
fn summary_reports_plan_and_targets() {
    let summary = ResultsSummary::from_record(&analysed_record()).unwrap();

    assert_eq!(summary.weight_to_lose, 15.0);
    assert_eq!(summary.estimated_weeks, 20);
    assert_eq!(summary.months, 5);
    assert_eq!(summary.bmi_class, BmiClass::Overweight);
    assert_eq!(summary.bmi_label, "Overweight");
    // 2356 - 825
    assert_eq!(summary.daily_calorie_target, 1531);
}

#[test]
fn summary_includes_full_projection() {
    let summary = ResultsSummary::from_record(&analysed_record()).unwrap();
    assert_eq!(summary.projection.len(), 21);
    assert_eq!(summary.projection[0].weight, 80.0);
    assert_eq!(summary.projection[20].weight, 65.0);
}

#[test]
fn ideal_range_comes_from_height() {
    let summary = ResultsSummary::from_record(&analysed_record()).unwrap();
    // 1.65^2 * 21 / 22 / 23
    assert_eq!(summary.ideal_weight.min, 57.0);
    assert_eq!(summary.ideal_weight.average, 60.0);
    assert_eq!(summary.ideal_weight.max, 63.0);
}

#[test]
fn record_without_metrics_is_rejected() {
    let mut record = analysed_record();
    record.clear_derived();
    let err = ResultsSummary::from_record(&record).unwrap_err();
    assert_eq!(err.code, ErrorCode::MissingMetricsInput);
}

#[test]
fn serializes_camel_case() {
    let json = serde_json::to_value(ResultsSummary::from_record(&analysed_record()).unwrap())
        .unwrap();
    assert_eq!(json["dailyCalorieTarget"], 1531);
    assert_eq!(json["bmiClass"], "overweight");
}
