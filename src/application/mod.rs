//! Application layer - orchestrates the quiz flow against its ports.
//!
//! The domain decides what may happen; this layer makes it durable, runs
//! the analysis timer and performs the checkout hand-off.

mod quiz_controller;

pub use quiz_controller::{QuizController, QuizSettings, SessionOrigin};
