//! Body Mass Index, its classification table, and the ideal-weight band.

use serde::{Deserialize, Serialize};
use std::fmt;

/// BMI band used for the ideal weight range.
pub const IDEAL_BMI_MIN: f64 = 21.0;
pub const IDEAL_BMI_AVERAGE: f64 = 22.0;
pub const IDEAL_BMI_MAX: f64 = 23.0;

fn height_in_meters(height_cm: f64) -> f64 {
    height_cm / 100.0
}

fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `weight / height_m²`, rounded to one decimal.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> f64 {
    let h = height_in_meters(height_cm);
    round_to_tenth(weight_kg / (h * h))
}

/// Inverse of the BMI formula: the weight that yields `bmi` at this height.
pub fn weight_for_bmi(bmi: f64, height_cm: f64) -> f64 {
    let h = height_in_meters(height_cm);
    bmi * h * h
}

/// Healthy weight range for a height, in whole kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdealWeightRange {
    pub min: f64,
    pub average: f64,
    pub max: f64,
}

impl IdealWeightRange {
    /// Derives the range from the 21–23 BMI band.
    pub fn for_height(height_cm: f64) -> Self {
        Self {
            min: weight_for_bmi(IDEAL_BMI_MIN, height_cm).round(),
            average: weight_for_bmi(IDEAL_BMI_AVERAGE, height_cm).round(),
            max: weight_for_bmi(IDEAL_BMI_MAX, height_cm).round(),
        }
    }

    pub fn contains(&self, weight_kg: f64) -> bool {
        weight_kg >= self.min && weight_kg <= self.max
    }
}

/// BMI category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiClass {
    Underweight,
    Normal,
    Overweight,
    ObesityI,
    ObesityII,
    ObesityIII,
}

/// Ascending, non-overlapping upper bounds (exclusive). Anything at or above
/// the last bound is class III obesity.
const BMI_THRESHOLDS: &[(f64, BmiClass)] = &[
    (18.5, BmiClass::Underweight),
    (25.0, BmiClass::Normal),
    (30.0, BmiClass::Overweight),
    (35.0, BmiClass::ObesityI),
    (40.0, BmiClass::ObesityII),
];

impl BmiClass {
    /// Classifies a BMI value.
    pub fn classify(bmi: f64) -> Self {
        BMI_THRESHOLDS
            .iter()
            .find(|(upper, _)| bmi < *upper)
            .map(|(_, class)| *class)
            .unwrap_or(BmiClass::ObesityIII)
    }

    /// All classes, lowest BMI first.
    pub fn all() -> &'static [BmiClass] {
        &[
            BmiClass::Underweight,
            BmiClass::Normal,
            BmiClass::Overweight,
            BmiClass::ObesityI,
            BmiClass::ObesityII,
            BmiClass::ObesityIII,
        ]
    }

    /// Half-open `[lower, upper)` bounds; `None` means unbounded.
    pub fn bounds(&self) -> (Option<f64>, Option<f64>) {
        let idx = Self::all().iter().position(|c| c == self).unwrap_or(0);
        let lower = idx.checked_sub(1).and_then(|i| BMI_THRESHOLDS.get(i)).map(|(b, _)| *b);
        let upper = BMI_THRESHOLDS.get(idx).map(|(b, _)| *b);
        (lower, upper)
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiClass::Underweight => "Underweight",
            BmiClass::Normal => "Normal weight",
            BmiClass::Overweight => "Overweight",
            BmiClass::ObesityI => "Obesity class I",
            BmiClass::ObesityII => "Obesity class II",
            BmiClass::ObesityIII => "Obesity class III",
        }
    }
}

impl fmt::Display for BmiClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn bmi_example_is_overweight() {
        let bmi = calculate_bmi(70.0, 165.0);
        assert_eq!(bmi, 25.7);
        assert_eq!(BmiClass::classify(bmi), BmiClass::Overweight);
        assert_eq!(BmiClass::classify(bmi).label(), "Overweight");
    }

    #[test]
    fn classification_boundaries_are_exclusive_upper() {
        assert_eq!(BmiClass::classify(18.4), BmiClass::Underweight);
        assert_eq!(BmiClass::classify(18.5), BmiClass::Normal);
        assert_eq!(BmiClass::classify(24.9), BmiClass::Normal);
        assert_eq!(BmiClass::classify(25.0), BmiClass::Overweight);
        assert_eq!(BmiClass::classify(34.9), BmiClass::ObesityI);
        assert_eq!(BmiClass::classify(39.9), BmiClass::ObesityII);
        assert_eq!(BmiClass::classify(40.0), BmiClass::ObesityIII);
    }

    #[test]
    fn bounds_follow_threshold_table() {
        assert_eq!(BmiClass::Underweight.bounds(), (None, Some(18.5)));
        assert_eq!(BmiClass::Overweight.bounds(), (Some(25.0), Some(30.0)));
        assert_eq!(BmiClass::ObesityIII.bounds(), (Some(40.0), None));
    }

    #[test]
    fn ideal_weight_for_165cm() {
        let range = IdealWeightRange::for_height(165.0);
        assert_eq!(range.min, 57.0);
        assert_eq!(range.average, 60.0);
        assert_eq!(range.max, 63.0);
        assert!(range.contains(60.0));
        assert!(!range.contains(70.0));
    }

    proptest! {
        #[test]
        fn band_midpoints_round_trip(height in 140.0f64..=220.0) {
            for class in BmiClass::all() {
                let midpoint = match class.bounds() {
                    (Some(lo), Some(hi)) => (lo + hi) / 2.0,
                    (None, Some(hi)) => hi - 2.0,
                    (Some(lo), None) => lo + 5.0,
                    (None, None) => unreachable!(),
                };
                let weight = weight_for_bmi(midpoint, height);
                prop_assert_eq!(BmiClass::classify(calculate_bmi(weight, height)), *class);
            }
        }

        #[test]
        fn ideal_average_is_normal_weight(height in 140.0f64..=220.0) {
            let range = IdealWeightRange::for_height(height);
            prop_assert!(range.min <= range.average && range.average <= range.max);
            prop_assert_eq!(
                BmiClass::classify(calculate_bmi(range.average, height)),
                BmiClass::Normal
            );
        }
    }
}
