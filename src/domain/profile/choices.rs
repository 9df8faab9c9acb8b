//! Closed answer choices that feed the metrics formulas.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Biological sex as selected on the first screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(ValidationError::invalid_format(
                "gender",
                format!("unknown gender '{}'", other),
            )),
        }
    }
}

/// Age brackets offered by the questionnaire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBracket {
    #[serde(rename = "18-25")]
    From18To25,
    #[serde(rename = "26-35")]
    From26To35,
    #[serde(rename = "36-45")]
    From36To45,
    #[serde(rename = "46-55")]
    From46To55,
    #[serde(rename = "56+")]
    From56,
}

impl AgeBracket {
    /// All brackets in display order.
    pub fn all() -> &'static [AgeBracket] {
        &[
            AgeBracket::From18To25,
            AgeBracket::From26To35,
            AgeBracket::From36To45,
            AgeBracket::From46To55,
            AgeBracket::From56,
        ]
    }

    /// The label stored in answers, e.g. `"26-35"`.
    pub fn label(&self) -> &'static str {
        match self {
            AgeBracket::From18To25 => "18-25",
            AgeBracket::From26To35 => "26-35",
            AgeBracket::From36To45 => "36-45",
            AgeBracket::From46To55 => "46-55",
            AgeBracket::From56 => "56+",
        }
    }

    /// The single age plugged into the BMR formula for this bracket.
    pub fn representative_age(&self) -> u32 {
        match self {
            AgeBracket::From18To25 => 22,
            AgeBracket::From26To35 => 30,
            AgeBracket::From36To45 => 40,
            AgeBracket::From46To55 => 50,
            AgeBracket::From56 => 60,
        }
    }
}

impl fmt::Display for AgeBracket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for AgeBracket {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        AgeBracket::all()
            .iter()
            .find(|b| b.label() == s)
            .copied()
            .ok_or_else(|| {
                ValidationError::invalid_format("ageBracket", format!("unknown bracket '{}'", s))
            })
    }
}

/// Self-reported activity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    /// All levels, least to most active.
    pub fn all() -> &'static [ActivityLevel] {
        &[
            ActivityLevel::Sedentary,
            ActivityLevel::Light,
            ActivityLevel::Moderate,
            ActivityLevel::Active,
            ActivityLevel::VeryActive,
        ]
    }

    /// TDEE multiplier applied to BMR.
    pub fn factor(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::Light => 1.375,
            ActivityLevel::Moderate => 1.55,
            ActivityLevel::Active => 1.725,
            ActivityLevel::VeryActive => 1.9,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::Light => "light",
            ActivityLevel::Moderate => "moderate",
            ActivityLevel::Active => "active",
            ActivityLevel::VeryActive => "veryActive",
        }
    }
}

impl FromStr for ActivityLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ActivityLevel::all()
            .iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "activityLevel",
                    format!("unknown activity level '{}'", s),
                )
            })
    }
}
