//! Raw account records, observation selection and per-account estimation

mod data;
pub mod selector;
pub mod parser;

pub use data::{
    AccountType, Observation, ParsedAccount, ACCOUNT_NB, ACCT_TYPE_CD, BALANCE_DT,
    BALANCE_PREFIX, DATE_FORMATS, DPD_PREFIX, OPEN_DT, ORIG_LOAN_AM,
};
pub use selector::{select_observations, total_paid_period};
pub use parser::AccountParser;
