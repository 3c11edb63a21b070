//! Run batch estimation over a JSON payload file
//!
//! Reads the same payload the Lambda endpoint accepts (from a file or stdin)
//! and writes the estimated accounts as JSON or as flat CSV rows.

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use emi_estimator::{BatchEstimator, BatchResponse, EstimatorConfig};
use serde_json::Value;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::time::Instant;

/// Estimate loan rate, tenure and EMI from balance histories
#[derive(Parser)]
#[command(name = "emi-estimate", version)]
struct Cli {
    /// Payload file (JSON object of customer id -> accounts); stdin when omitted
    #[arg(long)]
    input: Option<PathBuf>,

    /// Grid configuration (JSON); the standard grid when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
}

fn read_payload(input: Option<&PathBuf>) -> anyhow::Result<serde_json::Map<String, Value>> {
    let text = match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).context("failed to read stdin")?;
            buffer
        }
    };

    match serde_json::from_str::<Value>(&text).context("payload is not valid JSON")? {
        Value::Object(map) => Ok(map),
        _ => bail!("payload must be a JSON object of customer id -> accounts"),
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<EstimatorConfig> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            EstimatorConfig::from_json(&text)
                .with_context(|| format!("invalid config in {}", path.display()))
        }
        None => Ok(EstimatorConfig::default()),
    }
}

fn write_csv<W: Write>(response: &BatchResponse, out: W) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(["customer_id", "account_id", "rate", "tenure", "emi"])?;
    for (customer_id, accounts) in response.iter() {
        for account in accounts {
            writer.write_record([
                customer_id.to_string(),
                account.account_id.clone(),
                account.rate.to_string(),
                account.tenure.to_string(),
                account.emi.to_string(),
            ])?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let start = Instant::now();
    let config = load_config(cli.config.as_ref())?;
    let estimator = BatchEstimator::new(&config)?;
    let payload = read_payload(cli.input.as_ref())?;

    let response = estimator.estimate_batch(&payload);
    eprintln!(
        "Estimated {} accounts for {} customers in {:?}",
        response.account_count(),
        response.len(),
        start.elapsed()
    );

    let stdout = io::stdout();
    match cli.format {
        OutputFormat::Json => {
            let mut out = stdout.lock();
            serde_json::to_writer_pretty(&mut out, &response)?;
            writeln!(out)?;
        }
        OutputFormat::Csv => write_csv(&response, stdout.lock())?,
    }

    Ok(())
}
