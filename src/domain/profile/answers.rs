//! AnswerRecord - everything the visitor has told us, plus derived metrics.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::domain::foundation::ValidationError;

use super::{ActivityLevel, AgeBracket, Gender};

/// Identifies one answerable field of the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnswerField {
    Gender,
    AgeBracket,
    Height,
    CurrentWeight,
    GoalWeight,
    ProblemAreas,
    BodyShape,
    LastIdealWeight,
    WeightGainReason,
    PreviousAttempts,
    ActivityLevel,
    Occupation,
    SleepQuality,
    StressLevel,
    WaterIntake,
    DietPreference,
    Restrictions,
    EatingHabits,
    MainMotivation,
    GoalTimeline,
}

/// How a field's raw input is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerKind {
    /// One option out of a fixed list.
    Choice,
    /// Any subset of a fixed list.
    MultiChoice,
    /// A number read from a slider or text box.
    Number,
}

impl AnswerField {
    /// The camelCase key used in the persisted record.
    pub fn key(&self) -> &'static str {
        match self {
            AnswerField::Gender => "gender",
            AnswerField::AgeBracket => "ageBracket",
            AnswerField::Height => "height",
            AnswerField::CurrentWeight => "currentWeight",
            AnswerField::GoalWeight => "goalWeight",
            AnswerField::ProblemAreas => "problemAreas",
            AnswerField::BodyShape => "bodyShape",
            AnswerField::LastIdealWeight => "lastIdealWeight",
            AnswerField::WeightGainReason => "weightGainReason",
            AnswerField::PreviousAttempts => "previousAttempts",
            AnswerField::ActivityLevel => "activityLevel",
            AnswerField::Occupation => "occupation",
            AnswerField::SleepQuality => "sleepQuality",
            AnswerField::StressLevel => "stressLevel",
            AnswerField::WaterIntake => "waterIntake",
            AnswerField::DietPreference => "dietPreference",
            AnswerField::Restrictions => "restrictions",
            AnswerField::EatingHabits => "eatingHabits",
            AnswerField::MainMotivation => "mainMotivation",
            AnswerField::GoalTimeline => "goalTimeline",
        }
    }

    pub fn kind(&self) -> AnswerKind {
        match self {
            AnswerField::Height
            | AnswerField::CurrentWeight
            | AnswerField::GoalWeight
            | AnswerField::SleepQuality
            | AnswerField::StressLevel
            | AnswerField::WaterIntake => AnswerKind::Number,
            AnswerField::ProblemAreas | AnswerField::Restrictions => AnswerKind::MultiChoice,
            _ => AnswerKind::Choice,
        }
    }

    /// Parses raw text from a presentation layer into a typed answer.
    ///
    /// Multi-choice input is comma separated. Range checks are not applied
    /// here; the step gate decides whether a number is acceptable.
    pub fn parse_answer(&self, raw: &str) -> Result<Answer, ValidationError> {
        let raw = raw.trim();
        if raw.is_empty() && self.kind() != AnswerKind::MultiChoice {
            return Err(ValidationError::empty_field(self.key()));
        }

        let number = || {
            raw.replace(',', ".")
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| {
                    ValidationError::invalid_format(self.key(), format!("'{}' is not a number", raw))
                })
        };
        let scale = || {
            raw.parse::<u8>().map_err(|_| {
                ValidationError::invalid_format(self.key(), format!("'{}' is not a whole number", raw))
            })
        };
        let selection = || -> BTreeSet<String> {
            raw.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        };
        let text = || raw.to_string();

        Ok(match self {
            AnswerField::Gender => Answer::Gender(raw.parse()?),
            AnswerField::AgeBracket => Answer::AgeBracket(raw.parse()?),
            AnswerField::Height => Answer::Height(number()?),
            AnswerField::CurrentWeight => Answer::CurrentWeight(number()?),
            AnswerField::GoalWeight => Answer::GoalWeight(number()?),
            AnswerField::ProblemAreas => Answer::ProblemAreas(selection()),
            AnswerField::BodyShape => Answer::BodyShape(text()),
            AnswerField::LastIdealWeight => Answer::LastIdealWeight(text()),
            AnswerField::WeightGainReason => Answer::WeightGainReason(text()),
            AnswerField::PreviousAttempts => Answer::PreviousAttempts(text()),
            AnswerField::ActivityLevel => Answer::ActivityLevel(raw.parse()?),
            AnswerField::Occupation => Answer::Occupation(text()),
            AnswerField::SleepQuality => Answer::SleepQuality(scale()?),
            AnswerField::StressLevel => Answer::StressLevel(scale()?),
            AnswerField::WaterIntake => Answer::WaterIntake(number()?),
            AnswerField::DietPreference => Answer::DietPreference(text()),
            AnswerField::Restrictions => Answer::Restrictions(selection()),
            AnswerField::EatingHabits => Answer::EatingHabits(text()),
            AnswerField::MainMotivation => Answer::MainMotivation(text()),
            AnswerField::GoalTimeline => Answer::GoalTimeline(text()),
        })
    }
}

impl fmt::Display for AnswerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// A single `(field, value)` update coming from the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    Gender(Gender),
    AgeBracket(AgeBracket),
    Height(f64),
    CurrentWeight(f64),
    GoalWeight(f64),
    ProblemAreas(BTreeSet<String>),
    BodyShape(String),
    LastIdealWeight(String),
    WeightGainReason(String),
    PreviousAttempts(String),
    ActivityLevel(ActivityLevel),
    Occupation(String),
    SleepQuality(u8),
    StressLevel(u8),
    WaterIntake(f64),
    DietPreference(String),
    Restrictions(BTreeSet<String>),
    EatingHabits(String),
    MainMotivation(String),
    GoalTimeline(String),
}

impl Answer {
    /// The field this answer populates.
    pub fn field(&self) -> AnswerField {
        match self {
            Answer::Gender(_) => AnswerField::Gender,
            Answer::AgeBracket(_) => AnswerField::AgeBracket,
            Answer::Height(_) => AnswerField::Height,
            Answer::CurrentWeight(_) => AnswerField::CurrentWeight,
            Answer::GoalWeight(_) => AnswerField::GoalWeight,
            Answer::ProblemAreas(_) => AnswerField::ProblemAreas,
            Answer::BodyShape(_) => AnswerField::BodyShape,
            Answer::LastIdealWeight(_) => AnswerField::LastIdealWeight,
            Answer::WeightGainReason(_) => AnswerField::WeightGainReason,
            Answer::PreviousAttempts(_) => AnswerField::PreviousAttempts,
            Answer::ActivityLevel(_) => AnswerField::ActivityLevel,
            Answer::Occupation(_) => AnswerField::Occupation,
            Answer::SleepQuality(_) => AnswerField::SleepQuality,
            Answer::StressLevel(_) => AnswerField::StressLevel,
            Answer::WaterIntake(_) => AnswerField::WaterIntake,
            Answer::DietPreference(_) => AnswerField::DietPreference,
            Answer::Restrictions(_) => AnswerField::Restrictions,
            Answer::EatingHabits(_) => AnswerField::EatingHabits,
            Answer::MainMotivation(_) => AnswerField::MainMotivation,
            Answer::GoalTimeline(_) => AnswerField::GoalTimeline,
        }
    }

    /// Rejects numbers that cannot be saved and read back, such as NaN.
    pub fn ensure_finite(&self) -> Result<(), ValidationError> {
        match self {
            Answer::Height(v)
            | Answer::CurrentWeight(v)
            | Answer::GoalWeight(v)
            | Answer::WaterIntake(v)
                if !v.is_finite() =>
            {
                Err(ValidationError::invalid_format(
                    self.field().key(),
                    format!("{} is not a finite number", v),
                ))
            }
            _ => Ok(()),
        }
    }
}

/// Accumulated answers and the metrics derived from them.
///
/// Every field is optional; answers arrive one screen at a time and may be
/// overwritten. The derived block stays `None` until the analysis transition
/// has run, and is replaced wholesale whenever it runs again.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    // Identification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_bracket: Option<AgeBracket>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_weight: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_weight: Option<f64>,

    // Body analysis
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem_areas: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_shape: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_ideal_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_gain_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_attempts: Option<String>,

    // Lifestyle
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_level: Option<ActivityLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sleep_quality: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stress_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_intake: Option<f64>,

    // Nutrition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet_preference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restrictions: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eating_habits: Option<String>,

    // Motivation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_motivation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goal_timeline: Option<String>,

    // Derived at the analysis transition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmi: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bmr: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tdee: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calorie_deficit: Option<u32>,
    /// Weeks to reach the goal weight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_duration: Option<u32>,
}

impl AnswerRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a record pre-seeded with a default gender.
    pub fn with_gender(gender: Gender) -> Self {
        Self {
            gender: Some(gender),
            ..Self::default()
        }
    }

    /// Stores an answer, overwriting any previous value for the field.
    pub fn apply(&mut self, answer: Answer) {
        match answer {
            Answer::Gender(v) => self.gender = Some(v),
            Answer::AgeBracket(v) => self.age_bracket = Some(v),
            Answer::Height(v) => self.height = Some(v),
            Answer::CurrentWeight(v) => self.current_weight = Some(v),
            Answer::GoalWeight(v) => self.goal_weight = Some(v),
            Answer::ProblemAreas(v) => self.problem_areas = Some(v),
            Answer::BodyShape(v) => self.body_shape = Some(v),
            Answer::LastIdealWeight(v) => self.last_ideal_weight = Some(v),
            Answer::WeightGainReason(v) => self.weight_gain_reason = Some(v),
            Answer::PreviousAttempts(v) => self.previous_attempts = Some(v),
            Answer::ActivityLevel(v) => self.activity_level = Some(v),
            Answer::Occupation(v) => self.occupation = Some(v),
            Answer::SleepQuality(v) => self.sleep_quality = Some(v),
            Answer::StressLevel(v) => self.stress_level = Some(v),
            Answer::WaterIntake(v) => self.water_intake = Some(v),
            Answer::DietPreference(v) => self.diet_preference = Some(v),
            Answer::Restrictions(v) => self.restrictions = Some(v),
            Answer::EatingHabits(v) => self.eating_habits = Some(v),
            Answer::MainMotivation(v) => self.main_motivation = Some(v),
            Answer::GoalTimeline(v) => self.goal_timeline = Some(v),
        }
    }

    /// Returns true if the field holds a value (an empty selection counts).
    pub fn is_present(&self, field: AnswerField) -> bool {
        match field {
            AnswerField::Gender => self.gender.is_some(),
            AnswerField::AgeBracket => self.age_bracket.is_some(),
            AnswerField::ProblemAreas => self.problem_areas.is_some(),
            AnswerField::Restrictions => self.restrictions.is_some(),
            AnswerField::ActivityLevel => self.activity_level.is_some(),
            AnswerField::Height
            | AnswerField::CurrentWeight
            | AnswerField::GoalWeight
            | AnswerField::SleepQuality
            | AnswerField::StressLevel
            | AnswerField::WaterIntake => self.numeric(field).is_some(),
            _ => self.text(field).is_some(),
        }
    }

    /// Numeric value of a numeric field.
    pub fn numeric(&self, field: AnswerField) -> Option<f64> {
        match field {
            AnswerField::Height => self.height,
            AnswerField::CurrentWeight => self.current_weight,
            AnswerField::GoalWeight => self.goal_weight,
            AnswerField::SleepQuality => self.sleep_quality.map(f64::from),
            AnswerField::StressLevel => self.stress_level.map(f64::from),
            AnswerField::WaterIntake => self.water_intake,
            _ => None,
        }
    }

    /// Number of selected items of a multi-choice field.
    pub fn selection_len(&self, field: AnswerField) -> Option<usize> {
        match field {
            AnswerField::ProblemAreas => self.problem_areas.as_ref().map(BTreeSet::len),
            AnswerField::Restrictions => self.restrictions.as_ref().map(BTreeSet::len),
            _ => None,
        }
    }

    fn text(&self, field: AnswerField) -> Option<&str> {
        let value = match field {
            AnswerField::BodyShape => &self.body_shape,
            AnswerField::LastIdealWeight => &self.last_ideal_weight,
            AnswerField::WeightGainReason => &self.weight_gain_reason,
            AnswerField::PreviousAttempts => &self.previous_attempts,
            AnswerField::Occupation => &self.occupation,
            AnswerField::DietPreference => &self.diet_preference,
            AnswerField::EatingHabits => &self.eating_habits,
            AnswerField::MainMotivation => &self.main_motivation,
            AnswerField::GoalTimeline => &self.goal_timeline,
            _ => return None,
        };
        value.as_deref().filter(|s| !s.trim().is_empty())
    }

    /// Kilograms between current and goal weight, when both are known.
    pub fn weight_to_lose(&self) -> Option<f64> {
        Some(self.current_weight? - self.goal_weight?)
    }

    /// Returns true once the analysis transition has filled the derived block.
    pub fn has_derived_metrics(&self) -> bool {
        self.bmi.is_some() && self.bmr.is_some() && self.tdee.is_some()
    }

    /// Drops every derived value.
    pub fn clear_derived(&mut self) {
        self.bmi = None;
        self.bmr = None;
        self.tdee = None;
        self.calorie_deficit = None;
        self.estimated_duration = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_overwrites_previous_answer() {
        let mut record = AnswerRecord::new();
        record.apply(Answer::Height(150.0));
        record.apply(Answer::Height(165.0));
        assert_eq!(record.height, Some(165.0));
    }

    #[test]
    fn answer_reports_its_field() {
        assert_eq!(Answer::GoalWeight(60.0).field(), AnswerField::GoalWeight);
        assert_eq!(
            Answer::Restrictions(BTreeSet::new()).field(),
            AnswerField::Restrictions
        );
    }

    #[test]
    fn blank_text_is_not_present() {
        let mut record = AnswerRecord::new();
        record.apply(Answer::Occupation("   ".to_string()));
        assert!(!record.is_present(AnswerField::Occupation));
        record.apply(Answer::Occupation("desk".to_string()));
        assert!(record.is_present(AnswerField::Occupation));
    }

    #[test]
    fn serializes_camel_case_and_skips_missing() {
        let mut record = AnswerRecord::with_gender(Gender::Female);
        record.apply(Answer::CurrentWeight(70.0));
        record.apply(Answer::AgeBracket(AgeBracket::From26To35));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["gender"], "female");
        assert_eq!(json["currentWeight"], 70.0);
        assert_eq!(json["ageBracket"], "26-35");
        assert!(json.get("goalWeight").is_none());
        assert!(json.get("bmi").is_none());
    }

    #[test]
    fn json_round_trip_preserves_record() {
        let mut record = AnswerRecord::new();
        record.apply(Answer::ProblemAreas(
            ["belly", "arms"].iter().map(|s| s.to_string()).collect(),
        ));
        record.apply(Answer::ActivityLevel(ActivityLevel::VeryActive));
        record.apply(Answer::WaterIntake(1.5));
        record.bmi = Some(25.7);

        let json = serde_json::to_string(&record).unwrap();
        let back: AnswerRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn parse_answer_reads_numbers_with_comma_decimal() {
        let answer = AnswerField::WaterIntake.parse_answer("2,5").unwrap();
        assert_eq!(answer, Answer::WaterIntake(2.5));
    }

    #[test]
    fn parse_answer_splits_multi_choice() {
        let answer = AnswerField::ProblemAreas.parse_answer("belly, legs,,").unwrap();
        let expected: BTreeSet<String> = ["belly", "legs"].iter().map(|s| s.to_string()).collect();
        assert_eq!(answer, Answer::ProblemAreas(expected));
    }

    #[test]
    fn parse_answer_rejects_garbage() {
        assert!(matches!(
            AnswerField::Height.parse_answer("tall"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(matches!(
            AnswerField::Gender.parse_answer(""),
            Err(ValidationError::EmptyField { .. })
        ));
        assert!(AnswerField::AgeBracket.parse_answer("99-100").is_err());
    }

    #[test]
    fn parse_answer_rejects_non_finite_numbers() {
        for raw in ["inf", "-inf", "NaN", "infinity"] {
            for field in [
                AnswerField::Height,
                AnswerField::CurrentWeight,
                AnswerField::GoalWeight,
                AnswerField::WaterIntake,
            ] {
                assert!(
                    matches!(
                        field.parse_answer(raw),
                        Err(ValidationError::InvalidFormat { .. })
                    ),
                    "{} accepted '{}'",
                    field,
                    raw
                );
            }
        }
    }

    #[test]
    fn ensure_finite_flags_nan_and_infinity() {
        assert!(Answer::Height(165.0).ensure_finite().is_ok());
        assert!(Answer::Height(f64::NAN).ensure_finite().is_err());
        assert!(Answer::GoalWeight(f64::INFINITY).ensure_finite().is_err());
        assert!(Answer::SleepQuality(5).ensure_finite().is_ok());
    }

    #[test]
    fn weight_to_lose_needs_both_weights() {
        let mut record = AnswerRecord::new();
        record.apply(Answer::CurrentWeight(80.0));
        assert_eq!(record.weight_to_lose(), None);
        record.apply(Answer::GoalWeight(65.0));
        assert_eq!(record.weight_to_lose(), Some(15.0));
    }

    #[test]
    fn clear_derived_resets_metrics() {
        let mut record = AnswerRecord {
            bmi: Some(22.0),
            bmr: Some(1400),
            tdee: Some(1700),
            calorie_deficit: Some(500),
            estimated_duration: Some(10),
            ..AnswerRecord::default()
        };
        assert!(record.has_derived_metrics());
        record.clear_derived();
        assert_eq!(record, AnswerRecord::default());
    }
}
