use anyhow::{Context, Result};
use clap::Parser;
use loadgate::error::{CompareError, EXIT_IO};
use loadgate::pipeline::{self, RunOutcome};
use loadgate::report::console::render_console;
use loadgate::{cli::Cli, config};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; `--debug` raises everything to TRACE
fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve, compare, report; returns the process exit code
fn run(args: &Cli) -> Result<i32> {
    let request = config::resolve(args).context("failed to resolve run configuration")?;
    let threshold = request.config.hard_fail_threshold;

    let outcome = pipeline::run(&request)?;
    match &outcome {
        RunOutcome::NoHistory { identity } => {
            println!(
                "ℹ️  No previous results for {}: nothing to compare, skipping report",
                identity
            );
        }
        RunOutcome::Compared {
            report,
            report_path,
        } => {
            print!("{}", render_console(report));
            if let Some(path) = report_path {
                println!("Report written to {}", path.display());
            }
            println!("{}", report.verdict.message(threshold));
        }
    }

    Ok(outcome.exit_code())
}

fn main() {
    let args = Cli::parse();
    init_tracing(args.debug);

    let code = match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            err.downcast_ref::<CompareError>()
                .map_or(EXIT_IO, CompareError::exit_code)
        }
    };

    std::process::exit(code);
}
