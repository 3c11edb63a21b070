//! Brute-force fit of rate and tenure to observed balances

use super::grid::{Candidate, SearchGrid};
use crate::account::Observation;
use crate::amortization::{future_value, monthly_rate, payment};
use crate::config::EstimatorConfig;
use crate::error::ConfigError;
use log::trace;
use rayon::prelude::*;

/// Best candidate found for one account
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitResult {
    /// Annual interest rate in percent
    pub rate: f64,
    /// Number of installments
    pub tenure: u32,
    /// Installment implied by `rate` and `tenure`
    pub emi: f64,
    /// Root-mean-square balance error of the winning candidate
    pub rmse: f64,
}

/// Root-mean-square error of `candidate` against the observations
///
/// `None` when an observation lies beyond the candidate's tenure, when there
/// is nothing to score, or when the error is not finite.
pub fn score_candidate(
    candidate: &Candidate,
    principal: f64,
    observations: &[Observation],
) -> Option<f64> {
    if observations.is_empty()
        || observations
            .iter()
            .any(|o| o.elapsed_period > candidate.tenure_periods)
    {
        return None;
    }

    let rate = monthly_rate(candidate.annual_rate_percent);
    let emi = payment(rate, candidate.tenure_periods, principal);

    let sum_sq: f64 = observations
        .iter()
        .map(|o| {
            let projected = future_value(rate, o.elapsed_period, emi, principal);
            (o.balance - projected).powi(2)
        })
        .sum();

    let rmse = (sum_sq / observations.len() as f64).sqrt();
    rmse.is_finite().then_some(rmse)
}

/// Exhaustive search over a fixed (rate, tenure) grid
#[derive(Debug, Clone)]
pub struct GridSearchEstimator {
    grid: SearchGrid,
    candidates: Vec<Candidate>,
    parallel: bool,
}

impl Default for GridSearchEstimator {
    fn default() -> Self {
        Self::with_grid(SearchGrid::standard(), true)
    }
}

impl GridSearchEstimator {
    /// Validate `config` and build its grid
    pub fn new(config: &EstimatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_grid(SearchGrid::from_config(config), config.parallel))
    }

    pub fn with_grid(grid: SearchGrid, parallel: bool) -> Self {
        let candidates = grid.candidates();
        Self {
            grid,
            candidates,
            parallel,
        }
    }

    pub fn grid(&self) -> &SearchGrid {
        &self.grid
    }

    /// Score every candidate, in enumeration order
    fn scores(&self, principal: f64, observations: &[Observation]) -> Vec<Option<f64>> {
        if self.parallel {
            self.candidates
                .par_iter()
                .map(|c| score_candidate(c, principal, observations))
                .collect()
        } else {
            self.candidates
                .iter()
                .map(|c| score_candidate(c, principal, observations))
                .collect()
        }
    }

    /// Find the candidate with the lowest RMSE
    ///
    /// Ties keep the earliest candidate (lowest rate, then shortest tenure).
    /// Returns `None` when no candidate is feasible.
    pub fn estimate(&self, principal: f64, observations: &[Observation]) -> Option<FitResult> {
        if observations.is_empty() || self.grid.is_empty() {
            return None;
        }

        // An observation older than the longest tenure rules out every candidate
        let oldest = observations.iter().map(|o| o.elapsed_period).max()?;
        if oldest > self.grid.max_tenure()? {
            trace!("oldest observation at period {} is beyond the grid", oldest);
            return None;
        }

        let scores = self.scores(principal, observations);

        let mut best: Option<(usize, f64)> = None;
        for (idx, score) in scores.into_iter().enumerate() {
            if let Some(score) = score {
                if best.map_or(true, |(_, best_score)| score < best_score) {
                    best = Some((idx, score));
                }
            }
        }

        let (idx, rmse) = best?;
        let winner = self.candidates[idx];
        let emi = payment(
            monthly_rate(winner.annual_rate_percent),
            winner.tenure_periods,
            principal,
        );
        trace!(
            "best fit rate={} tenure={} rmse={:.4} over {} observations",
            winner.annual_rate_percent,
            winner.tenure_periods,
            rmse,
            observations.len()
        );

        Some(FitResult {
            rate: winner.annual_rate_percent,
            tenure: winner.tenure_periods,
            emi,
            rmse,
        })
    }
}
