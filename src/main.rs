mod engine;
mod models;
mod normalizer;
mod notify;
mod reports;
mod settings;
mod types;

use std::io::{stderr, stdout, BufWriter, Write};
use std::process::exit;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use crate::engine::{JobQueue, JobResult, JobStatus, ReportEngine};
use crate::settings::Cli;
use crate::types::format_brl;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(parse_log_level(&cli.log_level));

    let request = cli.request();
    let queue = JobQueue::new(ReportEngine::new(cli.settings()));

    println!("\nGenerating report for {}...", request.month);
    println!("Input: {}", request.input_file.display());
    println!("Output: {}\n", cli.output.display());

    let timer = Instant::now();

    let handle = match queue.submit(request) {
        Ok(handle) => handle,
        Err(error) => {
            eprintln!("Error: {error}");
            exit(1);
        }
    };

    let job = handle.wait().await?;
    let duration = timer.elapsed();

    info!("Job [{}] finished in: {duration:?}", job.job_id);

    match job.status {
        JobStatus::Completed { result } => write_result_to_stdout(&result)?,
        JobStatus::Failed { error } => {
            eprintln!("\nError: {error}");
            exit(1);
        }
        JobStatus::Pending | JobStatus::Processing => {
            eprintln!("\nError: job [{}] did not finish", job.job_id);
            exit(1);
        }
    }

    Ok(())
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" | "warning" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'info'", level);
            LevelFilter::INFO
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: stdout carries the run report, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}

fn write_result_to_stdout(result: &JobResult) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());
    let rule = "=".repeat(50);

    if !result.warnings.is_empty() {
        writeln!(output, "Warnings:")?;

        for warning in &result.warnings {
            writeln!(output, "  - {warning}")?;
        }

        writeln!(output)?;
    }

    writeln!(output, "XML report: {}", result.xml_path.display())?;
    writeln!(output, "JSON summary: {}", result.json_path.display())?;

    if result.emailed {
        writeln!(output, "Email sent successfully")?;
    }

    writeln!(output, "\n{rule}")?;
    writeln!(output, "REPORT GENERATED SUCCESSFULLY")?;
    writeln!(output, "{rule}")?;
    writeln!(output, "Transactions: {}", result.transactions_count)?;
    writeln!(output, "Total amount: {}", format_brl(result.total_amount))?;
    writeln!(output, "Chargebacks: {}\n", result.chargebacks)?;

    output.flush()?;

    Ok(())
}
