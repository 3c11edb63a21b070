//! Search grid configuration
//!
//! Every field has a serde default, so a partial JSON document (or `{}`)
//! yields the standard 60 x 59 grid.

use crate::error::ConfigError;
use crate::estimation::{
    MAX_GRID_CANDIDATES, MAX_TENURE, STANDARD_RATE_END, STANDARD_RATE_START,
    STANDARD_RATE_STEP, STANDARD_TENURE_END, STANDARD_TENURE_START,
};
use serde::{Deserialize, Serialize};

/// Parameters controlling the (rate, tenure) grid search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatorConfig {
    /// First annual rate candidate, in percent (inclusive)
    #[serde(default = "default_rate_start")]
    pub rate_start: f64,

    /// Upper bound for annual rate candidates, in percent (exclusive)
    #[serde(default = "default_rate_end")]
    pub rate_end: f64,

    /// Spacing between rate candidates, in percent
    #[serde(default = "default_rate_step")]
    pub rate_step: f64,

    /// First tenure candidate in months (inclusive)
    #[serde(default = "default_tenure_start")]
    pub tenure_start: u32,

    /// Upper bound for tenure candidates in months (exclusive)
    #[serde(default = "default_tenure_end")]
    pub tenure_end: u32,

    /// Score candidates and accounts on the rayon thread pool
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_rate_start() -> f64 { STANDARD_RATE_START }
fn default_rate_end() -> f64 { STANDARD_RATE_END }
fn default_rate_step() -> f64 { STANDARD_RATE_STEP }
fn default_tenure_start() -> u32 { STANDARD_TENURE_START }
fn default_tenure_end() -> u32 { STANDARD_TENURE_END }
fn default_parallel() -> bool { true }

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            rate_start: STANDARD_RATE_START,
            rate_end: STANDARD_RATE_END,
            rate_step: STANDARD_RATE_STEP,
            tenure_start: STANDARD_TENURE_START,
            tenure_end: STANDARD_TENURE_END,
            parallel: true,
        }
    }
}

impl EstimatorConfig {
    /// Parse a config from JSON, then validate it
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let config: EstimatorConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Number of rate candidates, as `ceil((end - start) / step)`
    ///
    /// Kept in `f64` so an absurd step reports as a huge (or infinite) count
    /// instead of saturating.
    pub fn rate_count(&self) -> f64 {
        ((self.rate_end - self.rate_start) / self.rate_step).ceil().max(0.0)
    }

    /// Check that both grid axes are non-empty, bounded, and the rate axis excludes zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.rate_step > 0.0) {
            return Err(ConfigError::NonPositiveRateStep(self.rate_step));
        }
        if !(self.rate_start > 0.0) {
            return Err(ConfigError::NonPositiveRateStart(self.rate_start));
        }
        if !(self.rate_end > self.rate_start) {
            return Err(ConfigError::EmptyRateRange {
                start: self.rate_start,
                end: self.rate_end,
            });
        }
        if self.tenure_start == 0 {
            return Err(ConfigError::ZeroTenureStart);
        }
        if self.tenure_end <= self.tenure_start {
            return Err(ConfigError::EmptyTenureRange {
                start: self.tenure_start,
                end: self.tenure_end,
            });
        }
        if self.tenure_end > MAX_TENURE {
            return Err(ConfigError::TenureTooLarge(self.tenure_end));
        }

        let candidates = self.rate_count() * f64::from(self.tenure_end - self.tenure_start);
        if !(candidates <= MAX_GRID_CANDIDATES as f64) {
            return Err(ConfigError::GridTooLarge {
                candidates,
                max: MAX_GRID_CANDIDATES,
            });
        }
        Ok(())
    }
}
