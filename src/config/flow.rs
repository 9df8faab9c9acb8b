//! Quiz flow configuration

use serde::Deserialize;
use std::time::Duration;

use crate::domain::metrics::DeficitPolicy;
use crate::domain::profile::Gender;
use crate::domain::quiz::{FlowVariant, ANALYSIS_STAGES, STAGE_DURATION};

use super::error::ValidationError;

/// Longest simulated analysis accepted
const MAX_ANALYSIS_DELAY_MS: u64 = 60_000;

/// Flow configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FlowConfig {
    /// Question set to run
    #[serde(default)]
    pub variant: FlowVariant,

    /// Length of the simulated analysis in milliseconds
    #[serde(default = "default_analysis_delay_ms")]
    pub analysis_delay_ms: u64,

    /// How the daily calorie deficit is chosen
    #[serde(default)]
    pub deficit_policy: DeficitPolicy,

    /// Gender pre-selected on the first screen
    pub default_gender: Option<Gender>,
}

impl FlowConfig {
    /// Get the analysis delay as a Duration
    pub fn analysis_delay(&self) -> Duration {
        Duration::from_millis(self.analysis_delay_ms)
    }

    /// Validate flow configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.analysis_delay_ms > MAX_ANALYSIS_DELAY_MS {
            return Err(ValidationError::InvalidAnalysisDelay(self.analysis_delay_ms));
        }
        Ok(())
    }
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            variant: FlowVariant::default(),
            analysis_delay_ms: default_analysis_delay_ms(),
            deficit_policy: DeficitPolicy::default(),
            default_gender: None,
        }
    }
}

fn default_analysis_delay_ms() -> u64 {
    STAGE_DURATION.as_millis() as u64 * ANALYSIS_STAGES.len() as u64
}
