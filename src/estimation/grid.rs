//! The discretized (rate, tenure) search space

use crate::config::EstimatorConfig;

/// One point of the search grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Annual interest rate in percent
    pub annual_rate_percent: f64,
    /// Number of installments
    pub tenure_periods: u32,
}

/// Rate and tenure axes of the grid search
#[derive(Debug, Clone, PartialEq)]
pub struct SearchGrid {
    rates: Vec<f64>,
    tenures: Vec<u32>,
}

impl SearchGrid {
    /// Build the axes from an already validated config
    ///
    /// Both bounds are half-open. Rates are computed as `start + i * step`
    /// rather than by repeated addition.
    pub fn from_config(config: &EstimatorConfig) -> Self {
        let n_rates = config.rate_count() as usize;
        let rates = (0..n_rates)
            .map(|i| config.rate_start + i as f64 * config.rate_step)
            .filter(|r| *r < config.rate_end)
            .collect();
        let tenures = (config.tenure_start..config.tenure_end).collect();
        Self { rates, tenures }
    }

    /// The 60 x 59 grid: 10% to 39.5% by 0.5, 1 to 59 months
    pub fn standard() -> Self {
        Self::from_config(&EstimatorConfig::default())
    }

    pub fn len(&self) -> usize {
        self.rates.len() * self.tenures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Longest tenure on the grid; observations older than this cannot be fit
    pub fn max_tenure(&self) -> Option<u32> {
        self.tenures.last().copied()
    }

    /// All candidates in search order: rate ascending outer, tenure ascending inner
    pub fn candidates(&self) -> Vec<Candidate> {
        let mut out = Vec::with_capacity(self.len());
        for &annual_rate_percent in &self.rates {
            for &tenure_periods in &self.tenures {
                out.push(Candidate {
                    annual_rate_percent,
                    tenure_periods,
                });
            }
        }
        out
    }
}
