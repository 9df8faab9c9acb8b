//! Declarative step tables.
//!
//! A flow variant is an ordered list of step definitions; step `n` (1-based)
//! is entry `n - 1`. Each entry names the field it collects, the rule that
//! gates the forward button, and the prompt key the presentation layer
//! renders.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;
use crate::domain::profile::{AnswerField, AnswerRecord};

pub const HEIGHT_RANGE_CM: (f64, f64) = (140.0, 220.0);
pub const WEIGHT_RANGE_KG: (f64, f64) = (40.0, 200.0);
pub const SCALE_RANGE: (f64, f64) = (1.0, 10.0);
pub const WATER_RANGE_LITRES: (f64, f64) = (0.5, 5.0);

/// What a step needs before the visitor may move on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Requirement {
    /// The field holds a value.
    Present,
    /// The field holds a number within `[min, max]`.
    InRange { min: f64, max: f64 },
    /// The field holds at least one selected item.
    NonEmpty,
    /// Optional step.
    Always,
}

impl Requirement {
    /// Checks `field` of `record`, explaining the first failure.
    pub fn check(&self, field: AnswerField, record: &AnswerRecord) -> Result<(), ValidationError> {
        match *self {
            Requirement::Always => Ok(()),
            Requirement::Present => {
                if record.is_present(field) {
                    Ok(())
                } else {
                    Err(ValidationError::empty_field(field.key()))
                }
            }
            Requirement::InRange { min, max } => match record.numeric(field) {
                None => Err(ValidationError::empty_field(field.key())),
                Some(v) if v.is_finite() && v >= min && v <= max => Ok(()),
                Some(v) => Err(ValidationError::out_of_range(field.key(), min, max, v)),
            },
            Requirement::NonEmpty => match record.selection_len(field) {
                Some(n) if n > 0 => Ok(()),
                _ => Err(ValidationError::empty_field(field.key())),
            },
        }
    }

    pub fn is_satisfied(&self, field: AnswerField, record: &AnswerRecord) -> bool {
        self.check(field, record).is_ok()
    }
}

/// Questionnaire section a step belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizSection {
    Identification,
    BodyAnalysis,
    Lifestyle,
    Nutrition,
    Motivation,
}

/// One question screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepDefinition {
    pub field: AnswerField,
    pub requirement: Requirement,
    pub prompt_key: &'static str,
    pub section: QuizSection,
    /// Option keys for choice fields; empty for numeric input.
    pub options: &'static [&'static str],
}

impl StepDefinition {
    const fn choice(
        field: AnswerField,
        prompt_key: &'static str,
        section: QuizSection,
        options: &'static [&'static str],
    ) -> Self {
        Self {
            field,
            requirement: Requirement::Present,
            prompt_key,
            section,
            options,
        }
    }

    const fn number(
        field: AnswerField,
        prompt_key: &'static str,
        section: QuizSection,
        range: (f64, f64),
    ) -> Self {
        Self {
            field,
            requirement: Requirement::InRange {
                min: range.0,
                max: range.1,
            },
            prompt_key,
            section,
            options: &[],
        }
    }

    const fn with_requirement(mut self, requirement: Requirement) -> Self {
        self.requirement = requirement;
        self
    }

    /// Whether the visitor may leave this step with `record` as it is.
    pub fn can_advance(&self, record: &AnswerRecord) -> bool {
        self.requirement.is_satisfied(self.field, record)
    }
}

mod catalog {
    use super::*;
    use AnswerField as F;
    use QuizSection as S;

    pub const GENDER: StepDefinition =
        StepDefinition::choice(F::Gender, "quiz.gender", S::Identification, &["male", "female"]);
    pub const AGE: StepDefinition = StepDefinition::choice(
        F::AgeBracket,
        "quiz.age",
        S::Identification,
        &["18-25", "26-35", "36-45", "46-55", "56+"],
    );
    pub const HEIGHT: StepDefinition =
        StepDefinition::number(F::Height, "quiz.height", S::Identification, HEIGHT_RANGE_CM);
    pub const CURRENT_WEIGHT: StepDefinition = StepDefinition::number(
        F::CurrentWeight,
        "quiz.current_weight",
        S::Identification,
        WEIGHT_RANGE_KG,
    );
    pub const GOAL_WEIGHT: StepDefinition = StepDefinition::number(
        F::GoalWeight,
        "quiz.goal_weight",
        S::Identification,
        WEIGHT_RANGE_KG,
    );
    pub const PROBLEM_AREAS: StepDefinition = StepDefinition::choice(
        F::ProblemAreas,
        "quiz.problem_areas",
        S::BodyAnalysis,
        &["belly", "legs", "arms", "back", "face", "full_body"],
    )
    .with_requirement(Requirement::NonEmpty);
    pub const BODY_SHAPE: StepDefinition = StepDefinition::choice(
        F::BodyShape,
        "quiz.body_shape",
        S::BodyAnalysis,
        &["apple", "pear", "hourglass", "rectangle"],
    );
    pub const LAST_IDEAL_WEIGHT: StepDefinition = StepDefinition::choice(
        F::LastIdealWeight,
        "quiz.last_ideal_weight",
        S::BodyAnalysis,
        &["under_1_year", "1_3_years", "over_3_years", "never"],
    );
    pub const WEIGHT_GAIN_REASON: StepDefinition = StepDefinition::choice(
        F::WeightGainReason,
        "quiz.weight_gain_reason",
        S::BodyAnalysis,
        &["pregnancy", "stress", "work", "medication", "slow_metabolism"],
    );
    pub const PREVIOUS_ATTEMPTS: StepDefinition = StepDefinition::choice(
        F::PreviousAttempts,
        "quiz.previous_attempts",
        S::BodyAnalysis,
        &["never", "few", "many"],
    );
    pub const ACTIVITY: StepDefinition = StepDefinition::choice(
        F::ActivityLevel,
        "quiz.activity_level",
        S::Lifestyle,
        &["sedentary", "light", "moderate", "active", "veryActive"],
    );
    pub const OCCUPATION: StepDefinition = StepDefinition::choice(
        F::Occupation,
        "quiz.occupation",
        S::Lifestyle,
        &["desk", "standing", "physical", "home"],
    );
    pub const SLEEP: StepDefinition =
        StepDefinition::number(F::SleepQuality, "quiz.sleep_quality", S::Lifestyle, SCALE_RANGE);
    pub const STRESS: StepDefinition =
        StepDefinition::number(F::StressLevel, "quiz.stress_level", S::Lifestyle, SCALE_RANGE);
    pub const WATER: StepDefinition = StepDefinition::number(
        F::WaterIntake,
        "quiz.water_intake",
        S::Lifestyle,
        WATER_RANGE_LITRES,
    );
    pub const DIET: StepDefinition = StepDefinition::choice(
        F::DietPreference,
        "quiz.diet_preference",
        S::Nutrition,
        &["omnivore", "vegetarian", "vegan", "lowcarb"],
    );
    pub const RESTRICTIONS: StepDefinition = StepDefinition::choice(
        F::Restrictions,
        "quiz.restrictions",
        S::Nutrition,
        &["lactose", "gluten", "nuts", "seafood"],
    )
    .with_requirement(Requirement::Always);
    pub const EATING_HABITS: StepDefinition = StepDefinition::choice(
        F::EatingHabits,
        "quiz.eating_habits",
        S::Nutrition,
        &["regular", "skip_breakfast", "night_snacking", "emotional"],
    );
    pub const MOTIVATION: StepDefinition = StepDefinition::choice(
        F::MainMotivation,
        "quiz.main_motivation",
        S::Motivation,
        &["health", "appearance", "energy", "confidence", "event"],
    );
    pub const TIMELINE: StepDefinition = StepDefinition::choice(
        F::GoalTimeline,
        "quiz.goal_timeline",
        S::Motivation,
        &["1month", "3months", "6months", "1year"],
    );
}

static EXPRESS_STEPS: [StepDefinition; 7] = [
    catalog::GENDER,
    catalog::AGE,
    catalog::HEIGHT,
    catalog::CURRENT_WEIGHT,
    catalog::GOAL_WEIGHT,
    catalog::ACTIVITY,
    catalog::TIMELINE,
];

static STANDARD_STEPS: [StepDefinition; 20] = [
    catalog::GENDER,
    catalog::AGE,
    catalog::HEIGHT,
    catalog::CURRENT_WEIGHT,
    catalog::GOAL_WEIGHT,
    catalog::PROBLEM_AREAS,
    catalog::BODY_SHAPE,
    catalog::LAST_IDEAL_WEIGHT,
    catalog::WEIGHT_GAIN_REASON,
    catalog::PREVIOUS_ATTEMPTS,
    catalog::ACTIVITY,
    catalog::OCCUPATION,
    catalog::SLEEP,
    catalog::STRESS,
    catalog::WATER,
    catalog::DIET,
    catalog::RESTRICTIONS,
    catalog::EATING_HABITS,
    catalog::MOTIVATION,
    catalog::TIMELINE,
];

/// Which question set to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowVariant {
    /// Seven screens: the metric inputs plus a timeline.
    Express,
    /// Twenty screens across all five sections.
    #[default]
    Standard,
}

impl fmt::Display for FlowVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowVariant::Express => write!(f, "express"),
            FlowVariant::Standard => write!(f, "standard"),
        }
    }
}

/// An ordered, non-empty step table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowDefinition {
    variant: FlowVariant,
    steps: &'static [StepDefinition],
}

impl FlowDefinition {
    pub fn for_variant(variant: FlowVariant) -> Self {
        let steps: &'static [StepDefinition] = match variant {
            FlowVariant::Express => &EXPRESS_STEPS,
            FlowVariant::Standard => &STANDARD_STEPS,
        };
        Self { variant, steps }
    }

    pub fn variant(&self) -> FlowVariant {
        self.variant
    }

    pub fn steps(&self) -> &'static [StepDefinition] {
        self.steps
    }

    /// Number of question steps (N).
    pub fn total_steps(&self) -> u32 {
        self.steps.len() as u32
    }

    /// The designated last question, which hands over to analysis.
    pub fn last_question(&self) -> u32 {
        self.total_steps()
    }

    /// Definition of 1-based step `step`.
    pub fn step(&self, step: u32) -> Option<&'static StepDefinition> {
        let idx = step.checked_sub(1)? as usize;
        self.steps.get(idx)
    }

    /// Step that collects `field`, if any.
    pub fn step_for_field(&self, field: AnswerField) -> Option<u32> {
        self.steps
            .iter()
            .position(|s| s.field == field)
            .map(|idx| idx as u32 + 1)
    }

    /// Gate for the forward control on `step`. Unknown steps never pass.
    pub fn can_advance(&self, step: u32, record: &AnswerRecord) -> bool {
        self.step(step)
            .map(|def| def.can_advance(record))
            .unwrap_or(false)
    }
}

impl Default for FlowDefinition {
    fn default() -> Self {
        Self::for_variant(FlowVariant::default())
    }
}
