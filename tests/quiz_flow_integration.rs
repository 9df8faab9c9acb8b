//! End-to-end tests for the quiz funnel.
//!
//! These tests drive the public API the way a presentation shell does:
//! 1. Metric formulas on the worked examples
//! 2. Step gating and back navigation through the controller
//! 3. Resuming from saved state (in-memory and on disk)
//! 4. The full standard flow through checkout hand-off

use std::sync::Arc;
use std::time::Duration;

use proptest::prelude::*;
use tempfile::TempDir;

use quiz_funnel::adapters::storage::layout;
use quiz_funnel::adapters::{
    FileQuizStorage, InMemoryNavigator, InMemoryNotifier, InMemoryQuizStorage,
};
use quiz_funnel::application::{QuizController, QuizSettings, SessionOrigin};
use quiz_funnel::domain::foundation::ErrorCode;
use quiz_funnel::domain::metrics::{
    calculate_bmi, calculate_bmr, calculate_tdee, estimated_duration, months_for_weeks, BmiClass,
    DeficitPolicy,
};
use quiz_funnel::domain::profile::{
    ActivityLevel, AgeBracket, Answer, AnswerField, AnswerRecord, Gender,
};
use quiz_funnel::domain::quiz::{FlowDefinition, FlowPhase, FlowVariant, Requirement};
use quiz_funnel::domain::results::OfferCountdown;
use quiz_funnel::ports::{PersistedQuiz, QuizStateStorage};

// =============================================================================
// Test Infrastructure
// =============================================================================

const CHECKOUT_URL: &str = "https://checkout.example.com/plan";

fn settings(variant: FlowVariant) -> QuizSettings {
    QuizSettings {
        definition: FlowDefinition::for_variant(variant),
        analysis_delay: Duration::from_millis(10),
        deficit_policy: DeficitPolicy::DurationDerived,
        default_gender: None,
        checkout_url: CHECKOUT_URL.to_string(),
        offer: OfferCountdown::default(),
    }
}

async fn start(
    variant: FlowVariant,
    storage: Arc<dyn QuizStateStorage>,
    notifier: &InMemoryNotifier,
    navigator: &InMemoryNavigator,
) -> QuizController {
    QuizController::start(
        settings(variant),
        storage,
        Arc::new(notifier.clone()),
        Arc::new(navigator.clone()),
    )
    .await
}

/// Raw text a visitor would type for each field.
fn raw_answer(field: AnswerField) -> Option<&'static str> {
    Some(match field {
        AnswerField::Gender => "female",
        AnswerField::AgeBracket => "26-35",
        AnswerField::Height => "165",
        AnswerField::CurrentWeight => "80",
        AnswerField::GoalWeight => "65",
        AnswerField::ProblemAreas => "belly, legs",
        AnswerField::BodyShape => "pear",
        AnswerField::LastIdealWeight => "1_3_years",
        AnswerField::WeightGainReason => "stress",
        AnswerField::PreviousAttempts => "few",
        AnswerField::ActivityLevel => "moderate",
        AnswerField::Occupation => "desk",
        AnswerField::SleepQuality => "6",
        AnswerField::StressLevel => "7",
        AnswerField::WaterIntake => "1,5",
        AnswerField::DietPreference => "omnivore",
        AnswerField::Restrictions => return None,
        AnswerField::EatingHabits => "emotional",
        AnswerField::MainMotivation => "health",
        AnswerField::GoalTimeline => "6months",
    })
}

async fn answer_every_question(controller: &mut QuizController) {
    while let Some(step) = controller.current_step() {
        if let Some(raw) = raw_answer(step.field) {
            controller.answer_raw(step.field, raw).await.unwrap();
        }
        controller.advance().await.unwrap();
    }
}

// =============================================================================
// Worked examples
// =============================================================================

#[test]
fn bmi_of_70kg_at_165cm_is_overweight() {
    let bmi = calculate_bmi(70.0, 165.0);
    assert_eq!(bmi, 25.7);
    assert_eq!(BmiClass::classify(bmi), BmiClass::Overweight);
    assert_eq!(BmiClass::classify(bmi).label(), "Overweight");
}

#[test]
fn fifteen_kilos_take_twenty_weeks_or_five_months() {
    let weeks = estimated_duration(80.0, 65.0).unwrap();
    assert_eq!(weeks, 20);
    assert_eq!(months_for_weeks(weeks), 5);
}

#[test]
fn bmr_and_tdee_for_thirty_year_old_female() {
    let age = AgeBracket::From26To35.representative_age();
    assert_eq!(age, 30);

    let bmr = calculate_bmr(70.0, 165.0, age, Some(Gender::Female));
    assert_eq!(bmr, 1420);
    assert_eq!(calculate_tdee(bmr, Some(ActivityLevel::Moderate)), 2201);
}

// =============================================================================
// Gating and navigation
// =============================================================================

#[tokio::test]
async fn height_below_minimum_keeps_visitor_on_height_step() {
    let storage = InMemoryQuizStorage::new();
    let (notifier, navigator) = (InMemoryNotifier::new(), InMemoryNavigator::new());
    let mut controller = start(
        FlowVariant::Standard,
        Arc::new(storage.clone()),
        &notifier,
        &navigator,
    )
    .await;

    controller.answer(Answer::Gender(Gender::Male)).await.unwrap();
    controller.advance().await.unwrap();
    controller
        .answer(Answer::AgeBracket(AgeBracket::From36To45))
        .await
        .unwrap();
    controller.advance().await.unwrap();
    assert_eq!(controller.current_step().unwrap().field, AnswerField::Height);

    controller.answer(Answer::Height(130.0)).await.unwrap();
    assert!(!controller.can_advance());
    let err = controller.advance().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::StepIncomplete);
    assert_eq!(controller.phase(), FlowPhase::Question(3));

    controller.answer(Answer::Height(140.0)).await.unwrap();
    assert!(controller.can_advance());
    assert_eq!(controller.advance().await.unwrap(), FlowPhase::Question(4));
}

#[tokio::test]
async fn every_gated_step_blocks_until_answered() {
    let definition = FlowDefinition::for_variant(FlowVariant::Standard);
    let record = AnswerRecord::new();
    for step in 1..=definition.total_steps() {
        let def = definition.step(step).unwrap();
        let expected = def.requirement == Requirement::Always;
        assert_eq!(definition.can_advance(step, &record), expected, "step {}", step);
    }
}

#[tokio::test]
async fn back_is_refused_once_analysis_starts() {
    let storage = InMemoryQuizStorage::new();
    let (notifier, navigator) = (InMemoryNotifier::new(), InMemoryNavigator::new());
    let mut controller = start(
        FlowVariant::Express,
        Arc::new(storage.clone()),
        &notifier,
        &navigator,
    )
    .await;

    answer_every_question(&mut controller).await;
    assert_eq!(controller.phase(), FlowPhase::Analyzing);
    assert!(!controller.can_go_back());
    assert!(controller.back().await.is_err());

    controller.run_analysis().await.unwrap();
    assert!(controller.back().await.is_err());
}

// =============================================================================
// Resume
// =============================================================================

#[tokio::test]
async fn saved_step_five_resumes_with_answers_prefilled() {
    let storage = InMemoryQuizStorage::new();
    let mut record = AnswerRecord::with_gender(Gender::Female);
    record.apply(Answer::AgeBracket(AgeBracket::From26To35));
    record.apply(Answer::Height(165.0));
    record.apply(Answer::CurrentWeight(70.0));
    storage
        .put_raw("quizData", serde_json::to_string(&record).unwrap())
        .await;
    storage.put_raw("quizStep", "5").await;

    let (notifier, navigator) = (InMemoryNotifier::new(), InMemoryNavigator::new());
    let controller = start(
        FlowVariant::Standard,
        Arc::new(storage.clone()),
        &notifier,
        &navigator,
    )
    .await;

    assert_eq!(controller.origin(), SessionOrigin::Resumed);
    assert_eq!(controller.phase(), FlowPhase::Question(5));
    assert_eq!(controller.record(), &record);
    assert_eq!(
        controller.current_step().unwrap().field,
        AnswerField::GoalWeight
    );
}

#[tokio::test]
async fn file_storage_survives_a_restart() {
    let temp_dir = TempDir::new().unwrap();
    let (notifier, navigator) = (InMemoryNotifier::new(), InMemoryNavigator::new());

    {
        let storage = Arc::new(FileQuizStorage::new(temp_dir.path()));
        let mut controller = start(FlowVariant::Express, storage, &notifier, &navigator).await;
        answer_every_question(&mut controller).await;
        controller.run_analysis().await.unwrap();
        controller.advance().await.unwrap();
        assert_eq!(controller.phase(), FlowPhase::Comparison);
    }

    let storage = Arc::new(FileQuizStorage::new(temp_dir.path()));
    let controller = start(FlowVariant::Express, storage, &notifier, &navigator).await;
    assert_eq!(controller.origin(), SessionOrigin::Resumed);
    assert_eq!(controller.phase(), FlowPhase::Comparison);
    assert_eq!(controller.record().estimated_duration, Some(20));
}

#[tokio::test]
async fn corrupt_file_state_starts_over() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("quizData"), "{\"height\": tall}").unwrap();
    std::fs::write(temp_dir.path().join("quizStep"), "3").unwrap();

    let (notifier, navigator) = (InMemoryNotifier::new(), InMemoryNavigator::new());
    let storage = Arc::new(FileQuizStorage::new(temp_dir.path()));
    let controller = start(FlowVariant::Express, storage, &notifier, &navigator).await;

    assert_eq!(controller.origin(), SessionOrigin::Discarded);
    assert_eq!(controller.phase(), FlowPhase::Question(1));
    assert!(!temp_dir.path().join("quizData").exists());
}

#[tokio::test]
async fn resuming_mid_analysis_restarts_the_delay() {
    let storage = InMemoryQuizStorage::new();
    let (notifier, navigator) = (InMemoryNotifier::new(), InMemoryNavigator::new());
    {
        let mut controller = start(
            FlowVariant::Express,
            Arc::new(storage.clone()),
            &notifier,
            &navigator,
        )
        .await;
        answer_every_question(&mut controller).await;
    }
    assert_eq!(storage.raw("quizStep").await.as_deref(), Some("8"));

    let mut controller = start(
        FlowVariant::Express,
        Arc::new(storage.clone()),
        &notifier,
        &navigator,
    )
    .await;
    assert_eq!(controller.phase(), FlowPhase::Analyzing);
    assert!(controller.analysis_progress().is_some());
    assert_eq!(controller.run_analysis().await.unwrap(), FlowPhase::Results);
}

// =============================================================================
// Full flow
// =============================================================================

#[tokio::test]
async fn standard_flow_runs_through_checkout() {
    let storage = InMemoryQuizStorage::new();
    let (notifier, navigator) = (InMemoryNotifier::new(), InMemoryNavigator::new());
    let mut controller = start(
        FlowVariant::Standard,
        Arc::new(storage.clone()),
        &notifier,
        &navigator,
    )
    .await;

    answer_every_question(&mut controller).await;
    assert_eq!(controller.phase(), FlowPhase::Analyzing);
    assert_eq!(controller.record().water_intake, Some(1.5));
    assert_eq!(controller.record().restrictions, None);

    controller.run_analysis().await.unwrap();
    let summary = controller.results_summary().unwrap();
    assert_eq!(summary.bmi, 29.4);
    assert_eq!(summary.tdee, 2356);
    assert_eq!(summary.calorie_deficit, 825);
    assert_eq!(summary.daily_calorie_target, 1531);

    let mut phases = Vec::new();
    while controller.phase() != FlowPhase::Completed {
        phases.push(controller.advance().await.unwrap());
    }
    assert_eq!(
        phases,
        vec![
            FlowPhase::Comparison,
            FlowPhase::Gallery,
            FlowPhase::Checkout,
            FlowPhase::Completed,
        ]
    );

    assert_eq!(storage.entry_count().await, 0);
    assert_eq!(notifier.count(), 1);
    assert_eq!(navigator.visited(), vec![CHECKOUT_URL.to_string()]);

    let err = controller.advance().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::FlowCompleted);
}

#[tokio::test]
async fn goal_above_current_is_rejected_before_analysis() {
    let storage = InMemoryQuizStorage::new();
    let (notifier, navigator) = (InMemoryNotifier::new(), InMemoryNavigator::new());
    let mut controller = start(
        FlowVariant::Express,
        Arc::new(storage.clone()),
        &notifier,
        &navigator,
    )
    .await;

    while let Some(step) = controller.current_step() {
        let raw = match step.field {
            AnswerField::GoalWeight => "90",
            field => raw_answer(field).unwrap_or_default(),
        };
        controller.answer_raw(step.field, raw).await.unwrap();
        if controller.advance().await.is_err() {
            break;
        }
    }

    assert_eq!(controller.phase(), FlowPhase::Question(7));
    let err = controller.advance().await.unwrap_err();
    assert_eq!(err.code, ErrorCode::GoalNotBelowCurrent);
    assert!(!controller.record().has_derived_metrics());
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn saved_state_round_trips(
        step in 1u32..=25,
        height_dm in 1400u32..=2200,
        weight_dm in 400u32..=2000,
        goal_dm in 400u32..=2000,
        sleep in 1u8..=10,
        male in any::<bool>(),
    ) {
        let mut record = AnswerRecord::with_gender(if male { Gender::Male } else { Gender::Female });
        record.apply(Answer::Height(f64::from(height_dm) / 10.0));
        record.apply(Answer::CurrentWeight(f64::from(weight_dm) / 10.0));
        record.apply(Answer::GoalWeight(f64::from(goal_dm) / 10.0));
        record.apply(Answer::SleepQuality(sleep));

        let saved = PersistedQuiz::new(step, record);
        let (data, step_value) = layout::encode(&saved).unwrap();
        let loaded = layout::decode(Some(data), Some(step_value)).unwrap();
        prop_assert_eq!(loaded, Some(saved));
    }
}
