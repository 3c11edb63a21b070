//! HTTP entry point for batch estimation on AWS Lambda
//!
//! Accepts a JSON object of customer id -> account list and returns the
//! estimated accounts as JSON. Anything else gets a 400.

use emi_estimator::{BatchEstimator, EstimatorConfig};
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use log::{info, warn};
use serde_json::Value;
use std::sync::Arc;

const CONFIG_ENV: &str = "EMI_ESTIMATOR_CONFIG";
const REJECTED_BODY: &str = "Input not right";

fn load_config() -> anyhow::Result<EstimatorConfig> {
    match std::env::var(CONFIG_ENV) {
        Ok(text) => EstimatorConfig::from_json(&text),
        Err(_) => Ok(EstimatorConfig::default()),
    }
}

fn rejected(request: &Request, reason: &str) -> Result<Response<Body>, Error> {
    warn!("rejected {} {}: {}", request.method(), request.uri(), reason);
    Ok(Response::builder()
        .status(400)
        .header("content-type", "text/plain")
        .body(Body::from(REJECTED_BODY))?)
}

async fn handle(estimator: &BatchEstimator, request: Request) -> Result<Response<Body>, Error> {
    let payload: Value = match serde_json::from_slice(request.body().as_ref()) {
        Ok(value) => value,
        Err(e) => return rejected(&request, &e.to_string()),
    };
    let Value::Object(payload) = payload else {
        return rejected(&request, "payload is not a JSON object");
    };

    let response = estimator.estimate_batch(&payload);
    let body = serde_json::to_string(&response)?;

    Ok(Response::builder()
        .status(200)
        .header("content-type", "application/json")
        .body(Body::from(body))?)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let config = load_config()?;
    info!("starting estimator with config {:?}", config);
    let estimator = Arc::new(BatchEstimator::new(&config)?);

    run(service_fn(move |request: Request| {
        let estimator = Arc::clone(&estimator);
        async move { handle(&estimator, request).await }
    }))
    .await
}
