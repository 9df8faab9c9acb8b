//! Week-by-week weight projection for the results chart.

use serde::{Deserialize, Serialize};

/// One point on the projection line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub week: u32,
    /// Kilograms, rounded to one decimal.
    pub weight: f64,
}

/// Lazy, finite sequence of projection points from week 0 to `weeks`.
///
/// Weight falls linearly at `(current - goal) / weeks` per week. The
/// iterator holds only its inputs and a cursor, so cloning it (or calling
/// [`generate_weight_projection`] again) restarts from week 0.
#[derive(Debug, Clone)]
pub struct WeightProjection {
    current_weight: f64,
    weekly_change: f64,
    weeks: u32,
    next_week: Option<u32>,
}

impl WeightProjection {
    pub fn new(current_weight: f64, goal_weight: f64, weeks: u32) -> Self {
        let weekly_change = if weeks == 0 {
            0.0
        } else {
            (current_weight - goal_weight) / f64::from(weeks)
        };
        Self {
            current_weight,
            weekly_change,
            weeks,
            next_week: Some(0),
        }
    }

    /// Kilograms lost per week along the projection.
    pub fn weekly_change(&self) -> f64 {
        self.weekly_change
    }

    /// Projected weight at `week`, without advancing the iterator.
    pub fn weight_at(&self, week: u32) -> f64 {
        let raw = self.current_weight - self.weekly_change * f64::from(week);
        (raw * 10.0).round() / 10.0
    }
}

impl Iterator for WeightProjection {
    type Item = ProjectionPoint;

    fn next(&mut self) -> Option<Self::Item> {
        let week = self.next_week?;
        self.next_week = if week < self.weeks { Some(week + 1) } else { None };
        Some(ProjectionPoint {
            week,
            weight: self.weight_at(week),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .next_week
            .map(|w| (self.weeks - w) as usize + 1)
            .unwrap_or(0);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for WeightProjection {}

/// Projection from `current_weight` down to `goal_weight` over `weeks`.
pub fn generate_weight_projection(
    current_weight: f64,
    goal_weight: f64,
    weeks: u32,
) -> WeightProjection {
    WeightProjection::new(current_weight, goal_weight, weeks)
}
