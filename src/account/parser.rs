//! Validation and estimation of a single raw account

use super::data::{
    AccountType, ParsedAccount, ACCOUNT_NB, ACCT_TYPE_CD, BALANCE_DT, DATE_FORMATS, OPEN_DT,
    ORIG_LOAN_AM,
};
use super::selector::{select_observations, total_paid_period};
use crate::error::AccountError;
use crate::estimation::GridSearchEstimator;
use chrono::NaiveDate;
use log::trace;
use serde_json::{Map, Value};

/// Turns raw accounts into estimated contract terms
pub struct AccountParser<'a> {
    estimator: &'a GridSearchEstimator,
}

impl<'a> AccountParser<'a> {
    pub fn new(estimator: &'a GridSearchEstimator) -> Self {
        Self { estimator }
    }

    /// Estimate rate, tenure and EMI for one account
    ///
    /// Every failure is reported as an [`AccountError`]; the caller decides
    /// whether to log it, and the batch simply omits the account.
    pub fn parse(&self, account: &Value) -> Result<ParsedAccount, AccountError> {
        let account = account.as_object().ok_or(AccountError::NotAnObject)?;

        let account_id = account_id(account)?;
        let type_code = required(account, ACCT_TYPE_CD)?;
        let open_date = date_field(account, OPEN_DT)?;
        let statement_date = date_field(account, BALANCE_DT)?;
        let principal = principal(account)?;

        let account_type = type_code
            .as_str()
            .and_then(AccountType::from_code)
            .ok_or_else(|| AccountError::InvalidAccountType(display_code(type_code)))?;

        let paid = total_paid_period(open_date, statement_date);
        let observations = select_observations(account, principal as f64, paid);
        if observations.is_empty() {
            return Err(AccountError::NoUsableObservations);
        }

        let fit = self
            .estimator
            .estimate(principal as f64, &observations)
            .ok_or(AccountError::NoFeasibleCandidate)?;
        trace!(
            "account {} ({}, code {}) fitted from {} observations",
            account_id,
            account_type.label(),
            account_type.code(),
            observations.len()
        );

        Ok(ParsedAccount {
            account_id,
            rate: fit.rate,
            tenure: fit.tenure,
            emi: truncate_emi(fit.emi),
        })
    }
}

/// Whole-currency installment; truncates toward zero, never rounds
fn truncate_emi(emi: f64) -> i64 {
    emi.trunc() as i64
}

fn required<'v>(account: &'v Map<String, Value>, field: &'static str) -> Result<&'v Value, AccountError> {
    match account.get(field) {
        None | Some(Value::Null) => Err(AccountError::MissingField(field)),
        Some(value) => Ok(value),
    }
}

fn account_id(account: &Map<String, Value>) -> Result<String, AccountError> {
    match required(account, ACCOUNT_NB)? {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(AccountError::invalid(ACCOUNT_NB, format!("expected string or number, got {}", other))),
    }
}

fn display_code(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn date_field(account: &Map<String, Value>, field: &'static str) -> Result<NaiveDate, AccountError> {
    let text = required(account, field)?
        .as_str()
        .ok_or_else(|| AccountError::invalid(field, "expected a date string"))?;

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text.trim(), fmt).ok())
        .ok_or_else(|| AccountError::invalid(field, format!("unparseable date {:?}", text)))
}

/// Original principal as a positive integer
///
/// Fractional amounts are truncated toward zero; strings must hold an integer.
fn principal(account: &Map<String, Value>) -> Result<i64, AccountError> {
    let amount = match required(account, ORIG_LOAN_AM)? {
        Value::Number(n) => match n.as_i64() {
            Some(v) => v,
            None => match n.as_f64() {
                Some(f) if f.is_finite() && f.abs() < i64::MAX as f64 => f.trunc() as i64,
                _ => return Err(AccountError::invalid(ORIG_LOAN_AM, format!("out of range: {}", n))),
            },
        },
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| AccountError::invalid(ORIG_LOAN_AM, format!("not an integer: {:?}", s)))?,
        other => {
            return Err(AccountError::invalid(ORIG_LOAN_AM, format!("expected a number, got {}", other)))
        }
    };

    if amount <= 0 {
        return Err(AccountError::invalid(ORIG_LOAN_AM, format!("must be positive, got {}", amount)));
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::{monthly_rate, payment};
    use serde_json::json;

    fn base_account() -> Value {
        json!({
            "ACCOUNT_NB": 123456,
            "ACCT_TYPE_CD": "1",
            "OPEN_DT": "2019/01/01",
            "BALANCE_DT": "2021/01/01",
            "ORIG_LOAN_AM": 10000,
            "BALANCE_AM_01": 9500,
            "DAYS_PAST_DUE_01": 0
        })
    }

    fn without(mut account: Value, field: &str) -> Value {
        account.as_object_mut().expect("object").remove(field);
        account
    }

    fn with(mut account: Value, field: &str, value: Value) -> Value {
        account.as_object_mut().expect("object").insert(field.to_string(), value);
        account
    }

    #[test]
    fn test_single_observation_account() {
        let estimator = GridSearchEstimator::default();
        let parser = AccountParser::new(&estimator);

        let parsed = parser.parse(&base_account()).expect("estimable");
        assert_eq!(parsed.account_id, "123456");
        assert!(parsed.tenure >= 23);
        assert!(parsed.emi > 0);
        assert!(parsed.rate >= 10.0 && parsed.rate < 40.0);
    }

    #[test]
    fn test_dash_dates_accepted() {
        let estimator = GridSearchEstimator::default();
        let parser = AccountParser::new(&estimator);

        let account = with(base_account(), OPEN_DT, json!("2019-01-01"));
        let account = with(account, BALANCE_DT, json!("2021-01-01"));
        assert_eq!(parser.parse(&account), parser.parse(&base_account()));
    }

    #[test]
    fn test_emi_is_truncated() {
        let estimator = GridSearchEstimator::default();
        let parser = AccountParser::new(&estimator);

        let parsed = parser.parse(&base_account()).expect("estimable");
        let observations = select_observations(
            base_account().as_object().expect("object"),
            10_000.0,
            23,
        );
        let fit = estimator.estimate(10_000.0, &observations).expect("feasible");
        assert_eq!(parsed.emi, fit.emi.trunc() as i64);
        assert_eq!(parsed.rate, fit.rate);
        assert_eq!(parsed.tenure, fit.tenure);
    }

    #[test]
    fn test_truncate_emi_never_rounds() {
        assert_eq!(truncate_emi(386.9), 386);
        assert_eq!(truncate_emi(386.5), 386);
        assert_eq!(truncate_emi(386.328), 386);
        assert_eq!(truncate_emi(1.0), 1);
        assert_eq!(truncate_emi(0.99), 0);
    }

    #[test]
    fn test_emi_truncated_when_fraction_above_half() {
        let estimator = GridSearchEstimator::default();
        let parser = AccountParser::new(&estimator);

        // Balances of a 12,000 loan at 18% over 36 months; the exact EMI is
        // 433.83, so rounding would give 434.
        let account = json!({
            "ACCOUNT_NB": "R-1",
            "ACCT_TYPE_CD": "2",
            "OPEN_DT": "2020/01/01",
            "BALANCE_DT": "2021/01/01",
            "ORIG_LOAN_AM": 12000,
            "BALANCE_AM_01": 8988.762952726349,
            "DAYS_PAST_DUE_01": 0,
            "BALANCE_AM_06": 10418.76089673455,
            "DAYS_PAST_DUE_06": 0,
            "BALANCE_AM_11": 11746.171253568997,
            "DAYS_PAST_DUE_11": 0
        });

        let parsed = parser.parse(&account).expect("estimable");
        assert_eq!(parsed.rate, 18.0);
        assert_eq!(parsed.tenure, 36);

        let exact = payment(monthly_rate(18.0), 36, 12_000.0);
        assert!(exact.fract() >= 0.5);
        assert_eq!(parsed.emi, exact.trunc() as i64);
        assert_ne!(parsed.emi, exact.round() as i64);
    }

    #[test]
    fn test_missing_principal() {
        let estimator = GridSearchEstimator::default();
        let parser = AccountParser::new(&estimator);

        let account = without(base_account(), ORIG_LOAN_AM);
        assert_eq!(parser.parse(&account), Err(AccountError::MissingField(ORIG_LOAN_AM)));
    }

    #[test]
    fn test_principal_forms() {
        let account = with(base_account(), ORIG_LOAN_AM, json!("10000"));
        assert_eq!(principal(account.as_object().unwrap()), Ok(10_000));

        let account = with(base_account(), ORIG_LOAN_AM, json!(10000.9));
        assert_eq!(principal(account.as_object().unwrap()), Ok(10_000));

        for bad in [json!(0), json!(-5), json!(0.4), json!("ten"), json!(true), json!([1])] {
            let account = with(base_account(), ORIG_LOAN_AM, bad.clone());
            assert!(
                matches!(principal(account.as_object().unwrap()), Err(AccountError::InvalidField { .. })),
                "accepted {}",
                bad
            );
        }
    }

    #[test]
    fn test_invalid_account_type() {
        let estimator = GridSearchEstimator::default();
        let parser = AccountParser::new(&estimator);

        let account = with(base_account(), ACCT_TYPE_CD, json!("9"));
        assert_eq!(parser.parse(&account), Err(AccountError::InvalidAccountType("9".to_string())));

        let numeric = with(base_account(), ACCT_TYPE_CD, json!(1));
        assert!(matches!(parser.parse(&numeric), Err(AccountError::InvalidAccountType(_))));

        let auto = with(base_account(), ACCT_TYPE_CD, json!("2"));
        assert!(parser.parse(&auto).is_ok());
    }

    #[test]
    fn test_malformed_fields() {
        let estimator = GridSearchEstimator::default();
        let parser = AccountParser::new(&estimator);

        assert_eq!(parser.parse(&json!([1, 2])), Err(AccountError::NotAnObject));
        assert_eq!(
            parser.parse(&without(base_account(), ACCOUNT_NB)),
            Err(AccountError::MissingField(ACCOUNT_NB))
        );
        assert_eq!(
            parser.parse(&with(base_account(), ACCOUNT_NB, Value::Null)),
            Err(AccountError::MissingField(ACCOUNT_NB))
        );
        assert!(matches!(
            parser.parse(&with(base_account(), OPEN_DT, json!("01/02/2019"))),
            Err(AccountError::InvalidField { field: OPEN_DT, .. })
        ));
        assert!(matches!(
            parser.parse(&with(base_account(), BALANCE_DT, json!(20210101))),
            Err(AccountError::InvalidField { field: BALANCE_DT, .. })
        ));
    }

    #[test]
    fn test_no_usable_observations() {
        let estimator = GridSearchEstimator::default();
        let parser = AccountParser::new(&estimator);

        let delinquent = with(base_account(), "DAYS_PAST_DUE_01", json!(60));
        assert_eq!(parser.parse(&delinquent), Err(AccountError::NoUsableObservations));

        let bare = without(without(base_account(), "BALANCE_AM_01"), "DAYS_PAST_DUE_01");
        assert_eq!(parser.parse(&bare), Err(AccountError::NoUsableObservations));
    }

    #[test]
    fn test_no_feasible_candidate() {
        let estimator = GridSearchEstimator::default();
        let parser = AccountParser::new(&estimator);

        // 2014-01 to 2021-01 is 83 installments, beyond the longest tenure
        let account = with(base_account(), OPEN_DT, json!("2014/01/01"));
        assert_eq!(parser.parse(&account), Err(AccountError::NoFeasibleCandidate));
    }

    #[test]
    fn test_string_account_number_kept_verbatim() {
        let estimator = GridSearchEstimator::default();
        let parser = AccountParser::new(&estimator);

        let account = with(base_account(), ACCOUNT_NB, json!("00042"));
        assert_eq!(parser.parse(&account).expect("estimable").account_id, "00042");
    }
}
