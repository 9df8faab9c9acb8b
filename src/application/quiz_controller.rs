//! QuizController - drives a `QuizFlow` against its ports.
//!
//! The controller owns the flow exclusively. Every mutation is followed by
//! a save of `(step, record)`; a failed save is logged and the run carries
//! on in memory. Reaching the end of checkout clears the saved state,
//! shows a notification and redirects to the checkout URL.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::AppConfig;
use crate::domain::foundation::{DomainError, ErrorCode, Percentage, Timestamp};
use crate::domain::metrics::{DeficitPolicy, MetricsCalculator};
use crate::domain::profile::{Answer, AnswerField, AnswerRecord, Gender};
use crate::domain::quiz::{AnalysisProgress, FlowDefinition, FlowPhase, QuizFlow, StepDefinition};
use crate::domain::results::{
    transformations, CheckoutSummary, ComparisonView, OfferCountdown, ResultsSummary,
    Transformation,
};
use crate::ports::{CheckoutNavigator, Notification, Notifier, PersistedQuiz, QuizStateStorage};

/// Knobs the controller needs, resolved from configuration.
#[derive(Debug, Clone)]
pub struct QuizSettings {
    pub definition: FlowDefinition,
    pub analysis_delay: Duration,
    pub deficit_policy: DeficitPolicy,
    pub default_gender: Option<Gender>,
    pub checkout_url: String,
    pub offer: OfferCountdown,
}

impl QuizSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            definition: FlowDefinition::for_variant(config.flow.variant),
            analysis_delay: config.flow.analysis_delay(),
            deficit_policy: config.flow.deficit_policy,
            default_gender: config.flow.default_gender,
            checkout_url: config.checkout.url.clone(),
            offer: config.checkout.offer_countdown(),
        }
    }
}

/// How the current run came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOrigin {
    /// Nothing was saved.
    Fresh,
    /// Picked up from saved state.
    Resumed,
    /// Saved state was unusable and has been discarded.
    Discarded,
}

/// Application service for one visitor's quiz.
pub struct QuizController {
    settings: QuizSettings,
    calculator: MetricsCalculator,
    storage: Arc<dyn QuizStateStorage>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn CheckoutNavigator>,
    flow: QuizFlow,
    origin: SessionOrigin,
    checkout_opened_at: Option<Timestamp>,
}

impl QuizController {
    /// Loads any saved quiz and returns a controller positioned on it.
    ///
    /// Corrupt or incompatible saved state is logged, cleared and replaced
    /// by a fresh run on step 1.
    pub async fn start(
        settings: QuizSettings,
        storage: Arc<dyn QuizStateStorage>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn CheckoutNavigator>,
    ) -> Self {
        let now = Timestamp::now();
        let definition = settings.definition;

        let (flow, origin) = match storage.load().await {
            Ok(None) => (QuizFlow::new(definition, settings.default_gender), SessionOrigin::Fresh),
            Ok(Some(saved)) => match QuizFlow::resume(definition, saved.step, saved.record, now) {
                Ok(flow) => (flow, SessionOrigin::Resumed),
                Err(e) => {
                    warn!(error = %e, step = saved.step, "Saved quiz does not fit this flow, starting over");
                    Self::discard(storage.as_ref()).await;
                    (
                        QuizFlow::new(definition, settings.default_gender),
                        SessionOrigin::Discarded,
                    )
                }
            },
            Err(e) if e.is_corrupt() => {
                warn!(error = %e, "Saved quiz is corrupt, starting over");
                Self::discard(storage.as_ref()).await;
                (
                    QuizFlow::new(definition, settings.default_gender),
                    SessionOrigin::Discarded,
                )
            }
            Err(e) => {
                warn!(error = %e, "Could not read saved quiz, starting over");
                (QuizFlow::new(definition, settings.default_gender), SessionOrigin::Fresh)
            }
        };

        let mut controller = Self {
            calculator: MetricsCalculator::new(settings.deficit_policy),
            checkout_opened_at: (flow.phase() == FlowPhase::Checkout).then_some(now),
            settings,
            storage,
            notifier,
            navigator,
            flow,
            origin,
        };
        controller.drain_events();
        controller
    }

    // ───────────────────────────────────────────────────────────────
    // Queries
    // ───────────────────────────────────────────────────────────────

    pub fn origin(&self) -> SessionOrigin {
        self.origin
    }

    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    pub fn phase(&self) -> FlowPhase {
        self.flow.phase()
    }

    pub fn record(&self) -> &AnswerRecord {
        self.flow.record()
    }

    /// Step table entry for the screen being shown, if it is a question.
    pub fn current_step(&self) -> Option<&'static StepDefinition> {
        self.flow.current_step()
    }

    pub fn can_advance(&self) -> bool {
        self.flow.can_advance()
    }

    pub fn can_go_back(&self) -> bool {
        self.flow.can_go_back()
    }

    pub fn progress(&self) -> Percentage {
        self.flow.progress()
    }

    pub fn analysis_progress(&self) -> Option<AnalysisProgress> {
        self.flow
            .analysis_progress(Timestamp::now(), self.settings.analysis_delay)
    }

    pub fn results_summary(&self) -> Result<ResultsSummary, DomainError> {
        ResultsSummary::from_record(self.flow.record())
    }

    pub fn comparison(&self) -> Result<ComparisonView, DomainError> {
        ComparisonView::build(self.flow.record(), Timestamp::now())
    }

    pub fn gallery(&self) -> &'static [Transformation] {
        transformations()
    }

    /// Checkout recap with the countdown measured from when checkout opened.
    pub fn checkout_summary(&self) -> CheckoutSummary {
        let elapsed = self
            .checkout_opened_at
            .and_then(|opened| Timestamp::now().duration_since(&opened).to_std().ok())
            .unwrap_or(Duration::ZERO);
        CheckoutSummary::new(self.flow.record(), &self.settings.offer, elapsed)
    }

    // ───────────────────────────────────────────────────────────────
    // Commands
    // ───────────────────────────────────────────────────────────────

    /// Records an answer on the current question.
    pub async fn answer(&mut self, answer: Answer) -> Result<(), DomainError> {
        self.flow.answer(answer)?;
        self.after_mutation().await;
        Ok(())
    }

    /// Parses raw input for `field` and records it.
    pub async fn answer_raw(&mut self, field: AnswerField, raw: &str) -> Result<(), DomainError> {
        let answer = field.parse_answer(raw)?;
        self.answer(answer).await
    }

    /// Moves forward one screen.
    ///
    /// Leaving checkout completes the run: saved state is cleared, the
    /// visitor is notified and redirected.
    pub async fn advance(&mut self) -> Result<FlowPhase, DomainError> {
        let now = Timestamp::now();
        let phase = self.flow.advance(&self.calculator, now)?;

        match phase {
            FlowPhase::Completed => {
                self.drain_events();
                self.hand_off().await;
            }
            FlowPhase::Checkout => {
                self.checkout_opened_at = Some(now);
                self.after_mutation().await;
            }
            _ => self.after_mutation().await,
        }
        Ok(phase)
    }

    /// Moves back one question.
    pub async fn back(&mut self) -> Result<FlowPhase, DomainError> {
        let phase = self.flow.back()?;
        self.after_mutation().await;
        Ok(phase)
    }

    /// Waits out the rest of the analysis delay, then shows the results.
    pub async fn run_analysis(&mut self) -> Result<FlowPhase, DomainError> {
        if self.flow.phase() != FlowPhase::Analyzing {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("No analysis running during the {} phase", self.flow.phase()),
            ));
        }

        let elapsed = self.flow.analysis_elapsed(Timestamp::now());
        let remaining = self.settings.analysis_delay.saturating_sub(elapsed);
        debug!(remaining_ms = remaining.as_millis() as u64, "Waiting for analysis");
        tokio::time::sleep(remaining).await;

        let phase = self.flow.complete_analysis()?;
        info!(
            bmi = ?self.flow.record().bmi,
            tdee = ?self.flow.record().tdee,
            weeks = ?self.flow.record().estimated_duration,
            "Analysis completed"
        );
        self.after_mutation().await;
        Ok(phase)
    }

    // ───────────────────────────────────────────────────────────────
    // Internals
    // ───────────────────────────────────────────────────────────────

    async fn after_mutation(&mut self) {
        self.drain_events();
        self.persist().await;
    }

    async fn persist(&self) {
        let Some(step) = self.flow.persisted_step() else {
            return;
        };
        let state = PersistedQuiz::new(step, self.flow.record().clone());
        if let Err(e) = self.storage.save(&state).await {
            warn!(error = %e, step, "Failed to save quiz state, continuing in memory");
        }
    }

    async fn hand_off(&mut self) {
        if let Err(e) = self.storage.clear().await {
            warn!(error = %e, "Failed to clear saved quiz state");
        }
        self.notifier.notify(Notification::checkout_redirect());
        info!(url = %self.settings.checkout_url, "Quiz completed, redirecting to checkout");
        self.navigator.redirect(&self.settings.checkout_url);
    }

    async fn discard(storage: &dyn QuizStateStorage) {
        if let Err(e) = storage.clear().await {
            warn!(error = %e, "Failed to clear unusable saved quiz");
        }
    }

    fn drain_events(&mut self) {
        for event in self.flow.take_events() {
            debug!(event_type = event.event_type(), ?event, "Quiz event");
        }
    }
}
