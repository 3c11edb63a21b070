//! Account data structures matching the bureau tradeline format

use serde::{Deserialize, Serialize};

/// Account number (string or number)
pub const ACCOUNT_NB: &str = "ACCOUNT_NB";
/// Account type code, see [`AccountType`]
pub const ACCT_TYPE_CD: &str = "ACCT_TYPE_CD";
/// Origination date
pub const OPEN_DT: &str = "OPEN_DT";
/// Statement date the balance history is reported against
pub const BALANCE_DT: &str = "BALANCE_DT";
/// Original principal
pub const ORIG_LOAN_AM: &str = "ORIG_LOAN_AM";
/// Prefix of the per-period balance fields (`BALANCE_AM_01`, ...)
pub const BALANCE_PREFIX: &str = "BALANCE_AM_";
/// Prefix of the per-period delinquency fields (`DAYS_PAST_DUE_01`, ...)
pub const DPD_PREFIX: &str = "DAYS_PAST_DUE_";

/// Date layouts accepted for `OPEN_DT` and `BALANCE_DT`, tried in order
pub const DATE_FORMATS: [&str; 2] = ["%Y/%m/%d", "%Y-%m-%d"];

/// Loan products the estimator knows how to fit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccountType {
    /// Code "1"
    PersonalLoan,
    /// Code "2"
    AutoLoan,
}

impl AccountType {
    /// Look up a bureau type code; unknown codes are not estimable
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "1" => Some(AccountType::PersonalLoan),
            "2" => Some(AccountType::AutoLoan),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AccountType::PersonalLoan => "1",
            AccountType::AutoLoan => "2",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccountType::PersonalLoan => "Personal Loan",
            AccountType::AutoLoan => "Auto Loan",
        }
    }
}

/// One trusted point of the balance history
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Reported outstanding balance
    pub balance: f64,
    /// Installments elapsed since origination when the balance was reported
    pub elapsed_period: u32,
}

impl Observation {
    pub fn new(balance: f64, elapsed_period: u32) -> Self {
        Self { balance, elapsed_period }
    }
}

/// Estimated contract terms for one account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedAccount {
    pub account_id: String,
    /// Annual interest rate in percent
    pub rate: f64,
    /// Number of installments
    pub tenure: u32,
    /// Monthly installment, truncated toward zero
    pub emi: i64,
}
