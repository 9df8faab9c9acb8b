//! Quiz module - the flow state machine.
//!
//! - `steps` - declarative step tables per flow variant
//! - `phase` - question steps plus the forward-only results tail
//! - `analysis` - staged progress of the simulated analysis
//! - `flow` - the `QuizFlow` aggregate
//! - `events` - what the aggregate records

mod analysis;
mod events;
mod flow;
mod phase;
mod steps;

pub use analysis::{AnalysisProgress, ANALYSIS_STAGES, STAGE_DURATION};
pub use events::QuizEvent;
pub use flow::QuizFlow;
pub use phase::FlowPhase;
pub use steps::{
    FlowDefinition, FlowVariant, QuizSection, Requirement, StepDefinition, HEIGHT_RANGE_CM,
    SCALE_RANGE, WATER_RANGE_LITRES, WEIGHT_RANGE_KG,
};
