//! Two-key layout shared by the key-value adapters.
//!
//! - `quizData` - the answer record as JSON
//! - `quizStep` - the persisted step as a decimal string

use crate::ports::{PersistedQuiz, QuizStorageError};

pub const QUIZ_DATA_KEY: &str = "quizData";
pub const QUIZ_STEP_KEY: &str = "quizStep";

/// Both keys, in write order.
pub const KEYS: [&str; 2] = [QUIZ_DATA_KEY, QUIZ_STEP_KEY];

/// Encodes a saved quiz into `(quizData, quizStep)` values.
pub fn encode(state: &PersistedQuiz) -> Result<(String, String), QuizStorageError> {
    let data = serde_json::to_string(&state.record)
        .map_err(|e| QuizStorageError::SerializationFailed(e.to_string()))?;
    Ok((data, state.step.to_string()))
}

/// Decodes the two stored values.
///
/// Neither key present means nothing was saved. Exactly one present, an
/// unparsable step or malformed JSON are all corrupt state.
pub fn decode(
    data: Option<String>,
    step: Option<String>,
) -> Result<Option<PersistedQuiz>, QuizStorageError> {
    let (data, step) = match (data, step) {
        (None, None) => return Ok(None),
        (Some(_), None) => return Err(QuizStorageError::NotFound(QUIZ_STEP_KEY)),
        (None, Some(_)) => return Err(QuizStorageError::NotFound(QUIZ_DATA_KEY)),
        (Some(data), Some(step)) => (data, step),
    };

    let step = step.trim().parse::<u32>().map_err(|e| {
        QuizStorageError::DeserializationFailed(format!("{} '{}': {}", QUIZ_STEP_KEY, step, e))
    })?;
    let record = serde_json::from_str(&data).map_err(|e| {
        QuizStorageError::DeserializationFailed(format!("{}: {}", QUIZ_DATA_KEY, e))
    })?;

    Ok(Some(PersistedQuiz::new(step, record)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::metrics::MetricsCalculator;
    use crate::domain::profile::{Answer, AnswerField, AnswerRecord, Gender};

    #[test]
    fn step_is_a_plain_integer_string() {
        let mut record = AnswerRecord::with_gender(Gender::Male);
        record.apply(Answer::Height(180.0));
        let (data, step) = encode(&PersistedQuiz::new(5, record.clone())).unwrap();

        assert_eq!(step, "5");
        assert!(data.contains("\"height\":180.0"));
        assert_eq!(
            decode(Some(data), Some(step)).unwrap(),
            Some(PersistedQuiz::new(5, record))
        );
    }

    #[test]
    fn nothing_saved_is_none() {
        assert_eq!(decode(None, None).unwrap(), None);
    }

    #[test]
    fn half_saved_state_is_corrupt() {
        let err = decode(Some("{}".to_string()), None).unwrap_err();
        assert!(matches!(err, QuizStorageError::NotFound("quizStep")));
        assert!(err.is_corrupt());
    }

    #[test]
    fn malformed_values_are_corrupt() {
        let err = decode(Some("{not json".to_string()), Some("3".to_string())).unwrap_err();
        assert!(matches!(err, QuizStorageError::DeserializationFailed(_)));

        let err = decode(Some("{}".to_string()), Some("three".to_string())).unwrap_err();
        assert!(err.is_corrupt());
    }

    #[test]
    fn every_numeric_answer_reloads_unchanged() {
        let typed = [
            (AnswerField::AgeBracket, "26-35"),
            (AnswerField::Height, "172,5"),
            (AnswerField::CurrentWeight, "83.4"),
            (AnswerField::GoalWeight, "68.9"),
            (AnswerField::SleepQuality, "7"),
            (AnswerField::StressLevel, "3"),
            (AnswerField::WaterIntake, "2.25"),
        ];
        let mut record = AnswerRecord::with_gender(Gender::Female);
        for (field, raw) in typed {
            record.apply(field.parse_answer(raw).unwrap());
        }
        let record = MetricsCalculator::default().calculate_all_metrics(&record);
        assert!(record.has_derived_metrics());

        let saved = PersistedQuiz::new(8, record);
        let (data, step) = encode(&saved).unwrap();
        assert!(!data.contains("null"));
        assert_eq!(decode(Some(data), Some(step)).unwrap(), Some(saved));
    }

    #[test]
    fn unknown_age_bracket_is_corrupt() {
        let data = r#"{"gender":"female","ageBracket":"70-80","height":165.0}"#;
        let err = decode(Some(data.to_string()), Some("3".to_string())).unwrap_err();
        assert!(matches!(err, QuizStorageError::DeserializationFailed(_)));
        assert!(err.is_corrupt());
    }
}
