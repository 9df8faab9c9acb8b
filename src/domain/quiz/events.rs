//! Events recorded by the quiz flow aggregate.

use serde::Serialize;

use crate::domain::foundation::Timestamp;
use crate::domain::profile::AnswerField;

use super::{FlowPhase, FlowVariant};

/// Something that happened to a quiz run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QuizEvent {
    Started {
        variant: FlowVariant,
    },
    Resumed {
        variant: FlowVariant,
        phase: FlowPhase,
    },
    AnswerRecorded {
        field: AnswerField,
        step: u32,
    },
    Advanced {
        from: FlowPhase,
        to: FlowPhase,
    },
    WentBack {
        from: FlowPhase,
        to: FlowPhase,
    },
    AnalysisStarted {
        started_at: Timestamp,
    },
    AnalysisCompleted {
        bmi: Option<f64>,
        estimated_weeks: Option<u32>,
    },
    CheckedOut,
}

impl QuizEvent {
    /// Dotted name used as the log target message.
    pub fn event_type(&self) -> &'static str {
        match self {
            QuizEvent::Started { .. } => "quiz.started",
            QuizEvent::Resumed { .. } => "quiz.resumed",
            QuizEvent::AnswerRecorded { .. } => "quiz.answer_recorded",
            QuizEvent::Advanced { .. } => "quiz.advanced",
            QuizEvent::WentBack { .. } => "quiz.went_back",
            QuizEvent::AnalysisStarted { .. } => "quiz.analysis_started",
            QuizEvent::AnalysisCompleted { .. } => "quiz.analysis_completed",
            QuizEvent::CheckedOut => "quiz.checked_out",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = QuizEvent::Advanced {
            from: FlowPhase::Question(1),
            to: FlowPhase::Question(2),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "advanced");
        assert_eq!(json["to"]["step"], 2);
        assert_eq!(event.event_type(), "quiz.advanced");
    }
}
