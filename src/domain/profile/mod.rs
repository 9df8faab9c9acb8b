//! Profile module - the visitor's answers.
//!
//! `AnswerRecord` is the single mutable entity of a quiz run. The closed
//! choice enums here are the ones the metrics formulas branch on.

mod answers;
mod choices;

pub use answers::{Answer, AnswerField, AnswerKind, AnswerRecord};
pub use choices::{ActivityLevel, AgeBracket, Gender};
