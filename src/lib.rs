//! Loan contract estimation from bureau balance histories
//!
//! For each installment loan in a request, the estimator recovers the annual
//! interest rate, the original tenure and the monthly installment (EMI) that
//! best reproduce the reported balances under a fixed-rate amortization
//! schedule.
//!
//! # Example
//!
//! ```rust
//! use emi_estimator::estimate_batch;
//! use serde_json::json;
//!
//! let payload = json!({
//!     "customer-1": [{
//!         "ACCOUNT_NB": 1001,
//!         "ACCT_TYPE_CD": "1",
//!         "OPEN_DT": "2019/01/01",
//!         "BALANCE_DT": "2021/01/01",
//!         "ORIG_LOAN_AM": 10000,
//!         "BALANCE_AM_01": 9500,
//!         "DAYS_PAST_DUE_01": 0
//!     }]
//! });
//!
//! let response = estimate_batch(payload.as_object().unwrap());
//! let accounts = response.get("customer-1").unwrap();
//! assert_eq!(accounts.len(), 1);
//! assert!(accounts[0].tenure >= 23);
//! ```

pub mod account;
pub mod amortization;
pub mod batch;
pub mod config;
pub mod error;
pub mod estimation;

pub use account::{AccountParser, AccountType, Observation, ParsedAccount};
pub use batch::{estimate_batch, BatchEstimator, BatchResponse};
pub use config::EstimatorConfig;
pub use error::{AccountError, ConfigError};
pub use estimation::{Candidate, FitResult, GridSearchEstimator, SearchGrid};
