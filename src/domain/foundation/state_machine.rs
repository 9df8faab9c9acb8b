//! State machine trait for phase enums.
//!
//! Gives phase enums a single place to declare which moves are legal, and a
//! checked `transition_to` that refuses everything else.

use super::ValidationError;

/// Trait for enums that represent state machines.
///
/// ```ignore
/// impl StateMachine for FlowPhase {
///     fn can_transition_to(&self, target: &Self) -> bool {
///         self.valid_transitions().contains(target)
///     }
///
///     fn valid_transitions(&self) -> Vec<Self> {
///         match self {
///             FlowPhase::Results => vec![FlowPhase::Comparison],
///             // ...
///         }
///     }
/// }
///
/// let next = phase.transition_to(FlowPhase::Comparison)?;
/// ```
pub trait StateMachine: Sized + Copy + PartialEq + std::fmt::Debug {
    /// Returns true if transition from self to target is valid.
    fn can_transition_to(&self, target: &Self) -> bool;

    /// Returns all valid target states from current state.
    fn valid_transitions(&self) -> Vec<Self>;

    /// Performs transition with validation, returning error if invalid.
    fn transition_to(&self, target: Self) -> Result<Self, ValidationError> {
        if self.can_transition_to(&target) {
            Ok(target)
        } else {
            Err(ValidationError::invalid_format(
                "state_transition",
                format!("Cannot transition from {:?} to {:?}", self, target),
            ))
        }
    }

    /// Checks if current state is terminal (no valid outgoing transitions).
    fn is_terminal(&self) -> bool {
        self.valid_transitions().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Screen {
        Intro,
        Asking,
        Done,
    }

    impl StateMachine for Screen {
        fn can_transition_to(&self, target: &Self) -> bool {
            self.valid_transitions().contains(target)
        }

        fn valid_transitions(&self) -> Vec<Self> {
            match self {
                Screen::Intro => vec![Screen::Asking],
                Screen::Asking => vec![Screen::Asking, Screen::Done],
                Screen::Done => vec![],
            }
        }
    }

    #[test]
    fn transition_to_succeeds_for_valid_transition() {
        assert_eq!(Screen::Intro.transition_to(Screen::Asking), Ok(Screen::Asking));
    }

    #[test]
    fn transition_to_fails_for_invalid_transition() {
        let err = Screen::Intro.transition_to(Screen::Done).unwrap_err();
        assert!(err.to_string().contains("Cannot transition from Intro to Done"));
    }

    #[test]
    fn is_terminal_only_for_states_without_exits() {
        assert!(Screen::Done.is_terminal());
        assert!(!Screen::Intro.is_terminal());
        assert!(!Screen::Asking.is_terminal());
    }
}
