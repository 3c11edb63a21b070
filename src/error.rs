//! Error types for account estimation and configuration

use thiserror::Error;

/// Reason an account was left out of the response
///
/// None of these reach the caller of `estimate_batch`; they are logged and the
/// account is skipped.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AccountError {
    #[error("account record is not a JSON object")]
    NotAnObject,

    #[error("missing required field {0}")]
    MissingField(&'static str),

    #[error("invalid field {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("unsupported account type code {0:?}")]
    InvalidAccountType(String),

    #[error("no usable balance observations")]
    NoUsableObservations,

    #[error("no feasible (rate, tenure) candidate in the search grid")]
    NoFeasibleCandidate,
}

impl AccountError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        AccountError::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}

/// Invalid search grid configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("rate_step must be positive, got {0}")]
    NonPositiveRateStep(f64),

    #[error("rate_start must be positive, got {0}")]
    NonPositiveRateStart(f64),

    #[error("rate range [{start}, {end}) is empty")]
    EmptyRateRange { start: f64, end: f64 },

    #[error("tenure_start must be at least 1")]
    ZeroTenureStart,

    #[error("tenure range [{start}, {end}) is empty")]
    EmptyTenureRange { start: u32, end: u32 },

    #[error("tenure_end {0} exceeds the largest supported tenure {max}", max = crate::estimation::MAX_TENURE)]
    TenureTooLarge(u32),

    #[error("grid has {candidates} candidates, more than the limit of {max}")]
    GridTooLarge { candidates: f64, max: usize },
}
