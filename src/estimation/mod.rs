//! Grid search estimation of loan rate and tenure

mod grid;
mod estimator;

pub use grid::{Candidate, SearchGrid};
pub use estimator::{GridSearchEstimator, FitResult, score_candidate};

// ============================================================================
// Standard Search Grid
// ============================================================================
// Bounds are half-open, matching the bureau products being fitted:
// - Personal and auto loans price between 10% and 40% a year
// - Tenures run up to five years (59 installments on the grid)

/// Lowest annual rate on the standard grid (10%)
pub const STANDARD_RATE_START: f64 = 10.0;

/// Exclusive upper bound of the standard rate axis (40%)
pub const STANDARD_RATE_END: f64 = 40.0;

/// Rate resolution of the standard grid, in percentage points
pub const STANDARD_RATE_STEP: f64 = 0.5;

/// Shortest tenure on the standard grid, in months
pub const STANDARD_TENURE_START: u32 = 1;

/// Exclusive upper bound of the standard tenure axis, in months
pub const STANDARD_TENURE_END: u32 = 60;

/// Largest grid a config may request
pub const MAX_GRID_CANDIDATES: usize = 1_000_000;

/// Largest tenure the amortization model accepts (exponents are `i32`)
pub const MAX_TENURE: u32 = i32::MAX as u32;
