//! Checkout screen: limited-time offer countdown and plan summary.

use serde::Serialize;
use std::time::Duration;

use crate::domain::metrics::months_for_weeks;
use crate::domain::profile::AnswerRecord;

/// Default length of the offer window.
pub const DEFAULT_OFFER_WINDOW: Duration = Duration::from_secs(15 * 60);

/// Countdown shown next to the checkout button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfferCountdown {
    window: Duration,
}

impl OfferCountdown {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    pub fn from_minutes(minutes: u32) -> Self {
        Self::new(Duration::from_secs(u64::from(minutes) * 60))
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Whole seconds left after `elapsed`, never below zero.
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        Duration::from_secs(self.window.saturating_sub(elapsed).as_secs())
    }

    pub fn is_expired(&self, elapsed: Duration) -> bool {
        self.remaining(elapsed).is_zero()
    }

    /// `MM:SS` label, e.g. `"14:05"`.
    pub fn label(&self, elapsed: Duration) -> String {
        let secs = self.remaining(elapsed).as_secs();
        format!("{:02}:{:02}", secs / 60, secs % 60)
    }
}

impl Default for OfferCountdown {
    fn default() -> Self {
        Self::new(DEFAULT_OFFER_WINDOW)
    }
}

/// Plan recap on the checkout screen.
///
/// Missing inputs read as zero, matching what the screen shows before a
/// plan exists.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub weight_to_lose: f64,
    pub months: u32,
    pub countdown: String,
    pub offer_expired: bool,
}

impl CheckoutSummary {
    pub fn new(record: &AnswerRecord, countdown: &OfferCountdown, elapsed: Duration) -> Self {
        let weight_to_lose =
            record.current_weight.unwrap_or(0.0) - record.goal_weight.unwrap_or(0.0);
        Self {
            weight_to_lose,
            months: months_for_weeks(record.estimated_duration.unwrap_or(0)),
            countdown: countdown.label(elapsed),
            offer_expired: countdown.is_expired(elapsed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_counts_down_from_window() {
        let countdown = OfferCountdown::default();
        assert_eq!(countdown.label(Duration::ZERO), "15:00");
        assert_eq!(countdown.label(Duration::from_secs(55)), "14:05");
        assert_eq!(countdown.label(Duration::from_millis(59_400)), "14:00");
    }

    #[test]
    fn never_goes_below_zero() {
        let countdown = OfferCountdown::from_minutes(1);
        assert_eq!(countdown.label(Duration::from_secs(3600)), "00:00");
        assert!(countdown.is_expired(Duration::from_secs(60)));
        assert!(!countdown.is_expired(Duration::from_secs(59)));
    }

    #[test]
    fn summary_uses_plan_months() {
        let record = AnswerRecord {
            current_weight: Some(80.0),
            goal_weight: Some(65.0),
            estimated_duration: Some(21),
            ..AnswerRecord::default()
        };
        let summary = CheckoutSummary::new(&record, &OfferCountdown::default(), Duration::ZERO);
        assert_eq!(summary.weight_to_lose, 15.0);
        assert_eq!(summary.months, 6);
        assert_eq!(summary.countdown, "15:00");
        assert!(!summary.offer_expired);
    }
}
