//! Energy expenditure: BMR (Mifflin-St Jeor) and TDEE.

use crate::domain::profile::{ActivityLevel, Gender};

const MALE_OFFSET: f64 = 5.0;
const FEMALE_OFFSET: f64 = -161.0;

/// Multiplier used when no activity level was given.
pub const DEFAULT_ACTIVITY_FACTOR: f64 = 1.2;

/// Basal metabolic rate in kcal/day, rounded to the nearest integer.
///
/// `10·weight + 6.25·height − 5·age`, plus 5 for men and minus 161 otherwise.
/// A missing gender takes the female offset.
pub fn calculate_bmr(weight_kg: f64, height_cm: f64, age: u32, gender: Option<Gender>) -> u32 {
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * f64::from(age);
    let offset = match gender {
        Some(Gender::Male) => MALE_OFFSET,
        Some(Gender::Female) | None => FEMALE_OFFSET,
    };
    (base + offset).round().max(0.0) as u32
}

/// Activity multiplier for an optional level.
pub fn activity_factor(level: Option<ActivityLevel>) -> f64 {
    level.map(|l| l.factor()).unwrap_or(DEFAULT_ACTIVITY_FACTOR)
}

/// Total daily energy expenditure: `bmr × activity factor`, rounded.
pub fn calculate_tdee(bmr: u32, level: Option<ActivityLevel>) -> u32 {
    (f64::from(bmr) * activity_factor(level)).round() as u32
}
