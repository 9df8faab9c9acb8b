//! FlowPhase - where the visitor is in the funnel.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Position in the funnel.
///
/// Questions come first, then a fixed forward-only tail:
/// ```text
/// Question(1) ⇄ … ⇄ Question(N) → Analyzing → Results → Comparison
///     → Gallery → Checkout → Completed
/// ```
/// The state machine itself does not know N; the owning flow decides when a
/// question is the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "phase", content = "step")]
pub enum FlowPhase {
    /// 1-based question step.
    Question(u32),
    Analyzing,
    Results,
    Comparison,
    Gallery,
    Checkout,
    Completed,
}

/// Persisted offsets of the tail screens past the last question.
const ANALYZING_OFFSET: u32 = 1;
const RESULTS_OFFSET: u32 = 2;
const COMPARISON_OFFSET: u32 = 3;
const GALLERY_OFFSET: u32 = 4;
const CHECKOUT_OFFSET: u32 = 5;

impl FlowPhase {
    pub fn is_question(&self) -> bool {
        matches!(self, FlowPhase::Question(_))
    }

    pub fn question_step(&self) -> Option<u32> {
        match self {
            FlowPhase::Question(n) => Some(*n),
            _ => None,
        }
    }

    /// Results screens: results, comparison, gallery and checkout.
    pub fn is_results(&self) -> bool {
        matches!(
            self,
            FlowPhase::Results | FlowPhase::Comparison | FlowPhase::Gallery | FlowPhase::Checkout
        )
    }

    /// Back navigation exists only between question steps.
    pub fn allows_back(&self) -> bool {
        matches!(self, FlowPhase::Question(n) if *n > 1)
    }

    /// Integer written under the step key, for a flow of `total` questions.
    ///
    /// `Completed` is never persisted.
    pub fn to_persisted_step(&self, total: u32) -> Option<u32> {
        match self {
            FlowPhase::Question(n) => Some(*n),
            FlowPhase::Analyzing => Some(total + ANALYZING_OFFSET),
            FlowPhase::Results => Some(total + RESULTS_OFFSET),
            FlowPhase::Comparison => Some(total + COMPARISON_OFFSET),
            FlowPhase::Gallery => Some(total + GALLERY_OFFSET),
            FlowPhase::Checkout => Some(total + CHECKOUT_OFFSET),
            FlowPhase::Completed => None,
        }
    }

    /// Inverse of [`to_persisted_step`](Self::to_persisted_step).
    pub fn from_persisted_step(step: u32, total: u32) -> Option<Self> {
        if step == 0 {
            return None;
        }
        if step <= total {
            return Some(FlowPhase::Question(step));
        }
        match step - total {
            ANALYZING_OFFSET => Some(FlowPhase::Analyzing),
            RESULTS_OFFSET => Some(FlowPhase::Results),
            COMPARISON_OFFSET => Some(FlowPhase::Comparison),
            GALLERY_OFFSET => Some(FlowPhase::Gallery),
            CHECKOUT_OFFSET => Some(FlowPhase::Checkout),
            _ => None,
        }
    }
}

impl fmt::Display for FlowPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlowPhase::Question(n) => write!(f, "question {}", n),
            FlowPhase::Analyzing => write!(f, "analyzing"),
            FlowPhase::Results => write!(f, "results"),
            FlowPhase::Comparison => write!(f, "comparison"),
            FlowPhase::Gallery => write!(f, "gallery"),
            FlowPhase::Checkout => write!(f, "checkout"),
            FlowPhase::Completed => write!(f, "completed"),
        }
    }
}

impl StateMachine for FlowPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use FlowPhase::*;
        matches!(
            (self, target),
            (Question(a), Question(b)) if *b == a + 1 || (*a > 1 && *b == a - 1)
        ) || matches!(
            (self, target),
            (Question(_), Analyzing)
                | (Analyzing, Results)
                | (Results, Comparison)
                | (Comparison, Gallery)
                | (Gallery, Checkout)
                | (Checkout, Completed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use FlowPhase::*;
        match self {
            Question(n) => {
                let mut targets = Vec::with_capacity(3);
                if *n > 1 {
                    targets.push(Question(n - 1));
                }
                targets.push(Question(n + 1));
                targets.push(Analyzing);
                targets
            }
            Analyzing => vec![Results],
            Results => vec![Comparison],
            Comparison => vec![Gallery],
            Gallery => vec![Checkout],
            Checkout => vec![Completed],
            Completed => vec![],
        }
    }
}
