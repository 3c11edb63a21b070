//! Batch estimation over every customer in a request payload

use crate::account::{AccountParser, ParsedAccount};
use crate::config::EstimatorConfig;
use crate::error::ConfigError;
use crate::estimation::GridSearchEstimator;
use log::{debug, info};
use rayon::prelude::*;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

/// Estimated accounts per customer, in request order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchResponse {
    customers: Vec<(String, Vec<ParsedAccount>)>,
}

impl BatchResponse {
    /// Estimated accounts for one customer, if the customer was in the request
    pub fn get(&self, customer_id: &str) -> Option<&[ParsedAccount]> {
        self.customers
            .iter()
            .find(|(id, _)| id == customer_id)
            .map(|(_, accounts)| accounts.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ParsedAccount])> {
        self.customers
            .iter()
            .map(|(id, accounts)| (id.as_str(), accounts.as_slice()))
    }

    /// Number of customers
    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Number of estimated accounts across all customers
    pub fn account_count(&self) -> usize {
        self.customers.iter().map(|(_, accounts)| accounts.len()).sum()
    }
}

impl Serialize for BatchResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.customers.len()))?;
        for (customer_id, accounts) in &self.customers {
            map.serialize_entry(customer_id, accounts)?;
        }
        map.end()
    }
}

/// Runs the account parser over whole request payloads
#[derive(Debug, Clone)]
pub struct BatchEstimator {
    estimator: GridSearchEstimator,
    parallel: bool,
}

impl Default for BatchEstimator {
    fn default() -> Self {
        Self {
            estimator: GridSearchEstimator::default(),
            parallel: true,
        }
    }
}

impl BatchEstimator {
    pub fn new(config: &EstimatorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            estimator: GridSearchEstimator::new(config)?,
            parallel: config.parallel,
        })
    }

    /// Estimate every account of every customer
    ///
    /// A customer whose value is not a list (including `null`) gets an empty
    /// list. Accounts that cannot be estimated are dropped; the rest keep
    /// their input order.
    pub fn estimate_batch(&self, payload: &Map<String, Value>) -> BatchResponse {
        let parser = AccountParser::new(&self.estimator);
        let mut skipped = 0usize;

        let customers: Vec<(String, Vec<ParsedAccount>)> = payload
            .iter()
            .map(|(customer_id, accounts)| {
                let accounts: &[Value] = match accounts {
                    Value::Array(list) => list,
                    _ => &[],
                };

                let results: Vec<Option<ParsedAccount>> = if self.parallel {
                    accounts
                        .par_iter()
                        .enumerate()
                        .map(|(pos, account)| parse_logged(&parser, customer_id, pos, account))
                        .collect()
                } else {
                    accounts
                        .iter()
                        .enumerate()
                        .map(|(pos, account)| parse_logged(&parser, customer_id, pos, account))
                        .collect()
                };

                skipped += results.iter().filter(|r| r.is_none()).count();
                (customer_id.clone(), results.into_iter().flatten().collect())
            })
            .collect();

        let response = BatchResponse { customers };
        info!(
            "estimated {} accounts for {} customers ({} skipped)",
            response.account_count(),
            response.len(),
            skipped
        );
        response
    }
}

fn parse_logged(
    parser: &AccountParser<'_>,
    customer_id: &str,
    position: usize,
    account: &Value,
) -> Option<ParsedAccount> {
    match parser.parse(account) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            debug!("customer {} account #{} skipped: {}", customer_id, position, e);
            None
        }
    }
}

/// Estimate a payload with the standard grid
pub fn estimate_batch(payload: &Map<String, Value>) -> BatchResponse {
    BatchEstimator::default().estimate_batch(payload)
}
