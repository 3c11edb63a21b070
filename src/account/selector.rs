//! Selection of usable balance observations from a raw account
//!
//! A balance is trusted only when the account was current (zero days past
//! due) for the same period and the balance lies strictly between zero and
//! the original principal.

use super::data::{Observation, BALANCE_PREFIX, DPD_PREFIX};
use chrono::{Datelike, NaiveDate};
use serde_json::{Map, Value};

/// Installments elapsed between origination and the statement date
///
/// Counts whole months and excludes the statement month itself.
pub fn total_paid_period(open_date: NaiveDate, statement_date: NaiveDate) -> i64 {
    12 * (statement_date.year() as i64 - open_date.year() as i64)
        + (statement_date.month() as i64 - open_date.month() as i64)
        - 1
}

/// Two-digit period index of `key` if it is `prefix` followed by exactly two digits
pub fn period_index(key: &str, prefix: &str) -> Option<u32> {
    let suffix = key.strip_prefix(prefix)?;
    if suffix.len() == 2 && suffix.bytes().all(|b| b.is_ascii_digit()) {
        suffix.parse().ok()
    } else {
        None
    }
}

fn sorted_period_keys<'a>(account: &'a Map<String, Value>, prefix: &str) -> Vec<(&'a str, u32)> {
    let mut keys: Vec<(&str, u32)> = account
        .keys()
        .filter_map(|k| period_index(k, prefix).map(|idx| (k.as_str(), idx)))
        .collect();
    keys.sort_unstable_by(|a, b| a.0.cmp(b.0));
    keys
}

/// Extract the observations the grid search fits against
///
/// Balance and delinquency keys are sorted independently and paired by
/// position, not by period index. When one set is longer its trailing keys
/// are ignored. Observations that would predate origination are dropped.
pub fn select_observations(
    account: &Map<String, Value>,
    principal: f64,
    total_paid_period: i64,
) -> Vec<Observation> {
    let balance_keys = sorted_period_keys(account, BALANCE_PREFIX);
    let dpd_keys = sorted_period_keys(account, DPD_PREFIX);

    balance_keys
        .iter()
        .zip(dpd_keys.iter())
        .filter_map(|(&(balance_key, period), &(dpd_key, _))| {
            let dpd = account.get(dpd_key).and_then(Value::as_f64)?;
            if dpd != 0.0 {
                return None;
            }

            let balance = account.get(balance_key).and_then(Value::as_f64)?;
            if !(balance > 0.0 && balance < principal) {
                return None;
            }

            let elapsed = total_paid_period - period as i64 + 1;
            u32::try_from(elapsed)
                .ok()
                .map(|elapsed_period| Observation::new(balance, elapsed_period))
        })
        .collect()
}
