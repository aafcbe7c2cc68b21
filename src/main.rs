use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::io::{self, BufRead};
use std::path::PathBuf;

use tracker::logging::{init_logging, LogFormat};
use tracker::{AppConfig, BodyParams, ErrorPolicy};

/// Tracker - activity report CLI
///
/// Computes distance, speed and calories from step-count records such as
/// "679,Бег,45m" (training) or "12000,3h30m" (daily steps).
#[derive(Parser)]
#[command(name = "tracker")]
#[command(version)]
#[command(about = "Activity report CLI", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format (pretty, json, compact)
    #[arg(long, global = true)]
    log_format: Option<LogFormat>,

    /// Error policy for rejected records (strict, lenient)
    #[arg(long, global = true)]
    policy: Option<ErrorPolicy>,

    /// Print reports as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ReportArgs {
    /// Records to report; read one per line from stdin when omitted
    records: Vec<String>,

    /// Body weight in kilograms
    #[arg(short, long)]
    weight: f64,

    /// Body height in meters
    #[arg(short = 'H', long)]
    height: f64,
}

#[derive(Subcommand)]
enum Commands {
    /// Report training sessions ("<steps>,<activity>,<duration>")
    Training(ReportArgs),

    /// Report daily step counts ("<steps>,<duration>")
    Day(ReportArgs),

    /// Print the effective configuration as TOML
    Config,
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::load_or_default()?,
    };

    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    config.logging.level = config.logging.level.raised_by(cli.verbose);
    if let Some(policy) = cli.policy {
        config.policy.training = policy;
        config.policy.daily = policy;
    }
    Ok(config)
}

fn collect_records(records: &[String]) -> Result<Vec<String>> {
    if !records.is_empty() {
        return Ok(records.to_vec());
    }

    let stdin = io::stdin();
    let mut lines = Vec::new();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read records from stdin")?;
        if !line.trim().is_empty() {
            lines.push(line);
        }
    }
    Ok(lines)
}

/// Print one report per record; returns the number of rejected records.
///
/// A record failing under the strict policy stops the run. The error is
/// returned with the record as context and printed once by `main`.
fn print_reports<R, F>(records: &[String], json: bool, mut build: F) -> Result<usize>
where
    R: serde::Serialize + std::fmt::Display,
    F: FnMut(&str) -> tracker::Result<Option<R>>,
{
    let mut rejected = 0;
    for record in records {
        match build(record) {
            Ok(Some(report)) => {
                if json {
                    println!("{}", serde_json::to_string(&report)?);
                } else {
                    println!("{}\n", report);
                }
            }
            Ok(None) => rejected += 1,
            Err(err) => {
                let message = err.user_message();
                return Err(anyhow::Error::new(err)
                    .context(format!("Record {:?} rejected: {}", record, message)));
            }
        }
    }
    Ok(rejected)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(&config.logging)?;

    let rejected = match &cli.command {
        Commands::Training(args) => {
            let reporter = config.training_reporter();
            let body = BodyParams::new(args.weight, args.height);
            let records = collect_records(&args.records)?;
            print_reports(&records, cli.json, |record| {
                let built = reporter.build(record, body);
                reporter.policy().resolve(built.map(Some), "training_report", record)
            })?
        }

        Commands::Day(args) => {
            let reporter = config.daily_reporter();
            let body = BodyParams::new(args.weight, args.height);
            let records = collect_records(&args.records)?;
            print_reports(&records, cli.json, |record| {
                let built = reporter.build(record, body);
                reporter.policy().resolve(built.map(Some), "daily_report", record)
            })?
        }

        Commands::Config => {
            print!("{}", config.to_toml()?);
            0
        }
    };

    if rejected > 0 {
        eprintln!("{}", format!("{} record(s) skipped", rejected).yellow());
    }

    Ok(())
}
