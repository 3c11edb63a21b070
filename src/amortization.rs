//! Fixed-rate installment loan model
//!
//! Ordinary annuity: installments are paid at the end of each period. Rates
//! passed to these functions are per period (see [`monthly_rate`]).

/// Convert an annual percentage rate (e.g. 18.0 for 18%) to a monthly fraction
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 1200.0
}

/// Level installment that retires `principal` over `n_periods`
///
/// `P * r * (1+r)^n / ((1+r)^n - 1)`. The rate must be non-zero.
pub fn payment(rate_per_period: f64, n_periods: u32, principal: f64) -> f64 {
    let growth = (1.0 + rate_per_period).powi(n_periods as i32);
    principal * rate_per_period * growth / (growth - 1.0)
}

/// Outstanding balance after `n_elapsed` installments of `payment`
///
/// `P * (1+r)^n - pmt * ((1+r)^n - 1) / r`. The rate must be non-zero.
pub fn future_value(rate_per_period: f64, n_elapsed: u32, payment: f64, principal: f64) -> f64 {
    let growth = (1.0 + rate_per_period).powi(n_elapsed as i32);
    principal * growth - payment * (growth - 1.0) / rate_per_period
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_monthly_rate() {
        assert_abs_diff_eq!(monthly_rate(12.0), 0.01, epsilon = 1e-15);
        assert_abs_diff_eq!(monthly_rate(18.0), 0.015, epsilon = 1e-15);
    }

    #[test]
    fn test_payment_known_value() {
        // 100,000 at 12% p.a. over 12 months
        let emi = payment(monthly_rate(12.0), 12, 100_000.0);
        assert_abs_diff_eq!(emi, 8884.8789, epsilon = 1e-3);
    }

    #[test]
    fn test_balance_retired_at_term() {
        for &principal in &[1_000.0, 10_000.0, 250_000.0] {
            for &annual in &[10.0, 17.5, 39.5] {
                for &term in &[1u32, 12, 36, 59] {
                    let r = monthly_rate(annual);
                    let emi = payment(r, term, principal);
                    let remaining = future_value(r, term, emi, principal);
                    assert_abs_diff_eq!(remaining, 0.0, epsilon = 1e-6 * principal);
                }
            }
        }
    }

    #[test]
    fn test_no_installments_leaves_principal() {
        let r = monthly_rate(20.0);
        let emi = payment(r, 24, 5_000.0);
        assert_abs_diff_eq!(future_value(r, 0, emi, 5_000.0), 5_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_balance_declines_towards_zero() {
        let r = monthly_rate(24.0);
        let term = 48;
        let principal = 20_000.0;
        let emi = payment(r, term, principal);

        let mut previous = principal;
        for n in 1..=term {
            let balance = future_value(r, n, emi, principal);
            assert!(balance < previous, "balance rose at period {}", n);
            assert!(balance > -1e-6, "balance below zero at period {}", n);
            previous = balance;
        }
    }
}
