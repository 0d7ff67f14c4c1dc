use std::process::ExitCode;
use timeslice_bench::prelude::*;
use timeslice_bench::BenchError;
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const DEFAULT_LOG_FILTER: &str = "timeslice_bench=info";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    FmtSubscriber::builder().with_env_filter(filter).init();

    match run().await {
        Ok(RunOutcome { report, path }) => {
            println!();
            for line in report.summary() {
                println!("{line}");
            }
            println!("\nFull report: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<RunOutcome, BenchError> {
    let config = BenchConfig::with_args()?;
    Harness::from_config(config)?.execute().await
}
