//! QuizFlow aggregate - the step pointer and the answers it owns.
//!
//! All navigation rules live here. The aggregate is synchronous and does no
//! I/O; the application layer persists it, runs the analysis timer and
//! performs the checkout hand-off.

use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode, Percentage, StateMachine, Timestamp};
use crate::domain::metrics::MetricsCalculator;
use crate::domain::profile::{Answer, AnswerRecord, Gender};

use super::{AnalysisProgress, FlowDefinition, FlowPhase, QuizEvent, StepDefinition};

/// One visitor's run through the funnel.
#[derive(Debug, Clone)]
pub struct QuizFlow {
    definition: FlowDefinition,
    phase: FlowPhase,
    record: AnswerRecord,
    analysis_started_at: Option<Timestamp>,
    domain_events: Vec<QuizEvent>,
}

impl QuizFlow {
    /// Starts a fresh run on step 1, optionally pre-seeding the gender.
    pub fn new(definition: FlowDefinition, default_gender: Option<Gender>) -> Self {
        let record = match default_gender {
            Some(gender) => AnswerRecord::with_gender(gender),
            None => AnswerRecord::new(),
        };

        let mut flow = Self {
            definition,
            phase: FlowPhase::Question(1),
            record,
            analysis_started_at: None,
            domain_events: Vec::new(),
        };
        flow.record_event(QuizEvent::Started {
            variant: definition.variant(),
        });
        flow
    }

    /// Rebuilds a run from its persisted step and record.
    ///
    /// Fails when the step does not exist in this flow, or when it points
    /// past the analysis transition but the record carries no metrics.
    /// Resuming into the analysis phase restarts its delay at `now`.
    pub fn resume(
        definition: FlowDefinition,
        persisted_step: u32,
        record: AnswerRecord,
        now: Timestamp,
    ) -> Result<Self, DomainError> {
        let total = definition.total_steps();
        let phase = FlowPhase::from_persisted_step(persisted_step, total).ok_or_else(|| {
            DomainError::new(
                ErrorCode::InvalidFormat,
                format!(
                    "Saved step {} does not exist in a flow of {} questions",
                    persisted_step, total
                ),
            )
        })?;

        if !phase.is_question() && !record.has_derived_metrics() {
            return Err(DomainError::new(
                ErrorCode::MissingMetricsInput,
                format!("Saved {} phase has no calculated metrics", phase),
            ));
        }

        let mut flow = Self {
            definition,
            phase,
            record,
            analysis_started_at: (phase == FlowPhase::Analyzing).then_some(now),
            domain_events: Vec::new(),
        };
        flow.record_event(QuizEvent::Resumed {
            variant: definition.variant(),
            phase,
        });
        Ok(flow)
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn definition(&self) -> &FlowDefinition {
        &self.definition
    }

    pub fn phase(&self) -> FlowPhase {
        self.phase
    }

    pub fn record(&self) -> &AnswerRecord {
        &self.record
    }

    /// Step table entry for the current question, if on one.
    pub fn current_step(&self) -> Option<&'static StepDefinition> {
        self.phase
            .question_step()
            .and_then(|n| self.definition.step(n))
    }

    /// Integer stored under the step key; `None` once completed.
    pub fn persisted_step(&self) -> Option<u32> {
        self.phase.to_persisted_step(self.definition.total_steps())
    }

    pub fn analysis_started_at(&self) -> Option<Timestamp> {
        self.analysis_started_at
    }

    pub fn is_completed(&self) -> bool {
        self.phase == FlowPhase::Completed
    }

    /// Whether the forward control should be enabled.
    ///
    /// Questions consult their step gate; the analysis screen resolves on its
    /// own timer; results screens always move forward.
    pub fn can_advance(&self) -> bool {
        match self.phase {
            FlowPhase::Question(n) => self.definition.can_advance(n, &self.record),
            FlowPhase::Analyzing | FlowPhase::Completed => false,
            _ => true,
        }
    }

    pub fn can_go_back(&self) -> bool {
        self.phase.allows_back()
    }

    /// Progress bar value: `step / total` on questions, full afterwards.
    pub fn progress(&self) -> Percentage {
        match self.phase {
            FlowPhase::Question(n) => Percentage::from_ratio(
                f64::from(n),
                f64::from(self.definition.total_steps()),
            ),
            _ => Percentage::HUNDRED,
        }
    }

    /// Analysis screen state at `now` for a run of `delay`.
    pub fn analysis_progress(&self, now: Timestamp, delay: Duration) -> Option<AnalysisProgress> {
        if self.phase != FlowPhase::Analyzing {
            return None;
        }
        Some(AnalysisProgress::at(self.analysis_elapsed(now), delay))
    }

    /// Time spent in the analysis phase so far.
    pub fn analysis_elapsed(&self, now: Timestamp) -> Duration {
        self.analysis_started_at
            .and_then(|start| now.duration_since(&start).to_std().ok())
            .unwrap_or(Duration::ZERO)
    }

    // ───────────────────────────────────────────────────────────────
    // Commands
    // ───────────────────────────────────────────────────────────────

    /// Stores an answer. Only allowed while on a question step.
    pub fn answer(&mut self, answer: Answer) -> Result<(), DomainError> {
        let FlowPhase::Question(step) = self.phase else {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot record answers during the {} phase", self.phase),
            ));
        };

        answer.ensure_finite()?;
        let field = answer.field();
        self.record.apply(answer);
        self.record_event(QuizEvent::AnswerRecorded { field, step });
        Ok(())
    }

    /// Moves forward one screen.
    ///
    /// Leaving the last question validates the metric inputs, enriches the
    /// record and enters the analysis phase at `now`. On any error the flow
    /// stays where it was.
    pub fn advance(
        &mut self,
        calculator: &MetricsCalculator,
        now: Timestamp,
    ) -> Result<FlowPhase, DomainError> {
        let target = match self.phase {
            FlowPhase::Question(n) => {
                self.ensure_step_complete(n)?;
                if n < self.definition.last_question() {
                    FlowPhase::Question(n + 1)
                } else {
                    self.ensure_metrics_inputs()?;
                    FlowPhase::Analyzing
                }
            }
            FlowPhase::Analyzing => {
                return Err(DomainError::new(
                    ErrorCode::InvalidStateTransition,
                    "Analysis is still running",
                ));
            }
            FlowPhase::Results => FlowPhase::Comparison,
            FlowPhase::Comparison => FlowPhase::Gallery,
            FlowPhase::Gallery => FlowPhase::Checkout,
            FlowPhase::Checkout => FlowPhase::Completed,
            FlowPhase::Completed => {
                return Err(DomainError::new(
                    ErrorCode::FlowCompleted,
                    "Quiz has already been completed",
                ));
            }
        };

        let from = self.move_to(target)?;

        match target {
            FlowPhase::Analyzing => {
                self.record = calculator.calculate_all_metrics(&self.record);
                self.analysis_started_at = Some(now);
                self.record_event(QuizEvent::AnalysisStarted { started_at: now });
            }
            FlowPhase::Completed => self.record_event(QuizEvent::CheckedOut),
            _ => {}
        }
        self.record_event(QuizEvent::Advanced { from, to: target });

        Ok(target)
    }

    /// Moves back one question.
    pub fn back(&mut self) -> Result<FlowPhase, DomainError> {
        let FlowPhase::Question(n) = self.phase else {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Cannot go back from the {} phase", self.phase),
            ));
        };

        let target = FlowPhase::Question(n.saturating_sub(1));
        let from = self.move_to(target)?;
        self.record_event(QuizEvent::WentBack { from, to: target });
        Ok(target)
    }

    /// Resolves the analysis phase into the results dashboard.
    pub fn complete_analysis(&mut self) -> Result<FlowPhase, DomainError> {
        let from = self.move_to(FlowPhase::Results)?;
        self.analysis_started_at = None;
        self.record_event(QuizEvent::AnalysisCompleted {
            bmi: self.record.bmi,
            estimated_weeks: self.record.estimated_duration,
        });
        self.record_event(QuizEvent::Advanced {
            from,
            to: FlowPhase::Results,
        });
        Ok(FlowPhase::Results)
    }

    /// Restarts the analysis delay, e.g. after resuming mid-analysis.
    pub fn restart_analysis(&mut self, now: Timestamp) {
        if self.phase == FlowPhase::Analyzing {
            self.analysis_started_at = Some(now);
        }
    }

    /// Drains the events recorded since the last call.
    pub fn take_events(&mut self) -> Vec<QuizEvent> {
        std::mem::take(&mut self.domain_events)
    }

    // ───────────────────────────────────────────────────────────────
    // Internals
    // ───────────────────────────────────────────────────────────────

    fn move_to(&mut self, target: FlowPhase) -> Result<FlowPhase, DomainError> {
        let from = self.phase;
        self.phase = from.transition_to(target).map_err(|e| {
            DomainError::new(ErrorCode::InvalidStateTransition, e.to_string())
        })?;
        Ok(from)
    }

    fn ensure_step_complete(&self, step: u32) -> Result<(), DomainError> {
        let def = self.definition.step(step).ok_or_else(|| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Step {} is not defined", step),
            )
        })?;

        def.requirement
            .check(def.field, &self.record)
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::StepIncomplete,
                    format!("Step {} is not complete: {}", step, e),
                )
                .with_detail("step", step.to_string())
                .with_detail("field", def.field.key())
            })
    }

    fn ensure_metrics_inputs(&self) -> Result<(), DomainError> {
        let (Some(current), Some(goal)) = (self.record.current_weight, self.record.goal_weight)
        else {
            return Err(DomainError::new(
                ErrorCode::MissingMetricsInput,
                "Current and goal weight are required for the analysis",
            ));
        };

        if !MetricsCalculator::has_required_inputs(&self.record) {
            return Err(DomainError::new(
                ErrorCode::MissingMetricsInput,
                "Weight, height and age are required for the analysis",
            ));
        }

        if goal >= current {
            return Err(DomainError::new(
                ErrorCode::GoalNotBelowCurrent,
                format!(
                    "Goal weight {} kg must be below current weight {} kg",
                    goal, current
                ),
            )
            .with_detail("current_weight", current.to_string())
            .with_detail("goal_weight", goal.to_string()));
        }

        Ok(())
    }

    fn record_event(&mut self, event: QuizEvent) {
        self.domain_events.push(event);
    }
}
