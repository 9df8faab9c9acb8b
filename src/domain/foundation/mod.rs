//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, the state machine trait, and error types
//! that form the vocabulary of the quiz funnel domain.

mod errors;
mod percentage;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use percentage::Percentage;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
