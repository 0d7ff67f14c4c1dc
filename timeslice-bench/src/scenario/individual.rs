use super::{log_trial, run_trial};
use crate::config::BenchConfig;
use crate::endpoint::Endpoint;
use crate::stats::ScenarioResult;
use crate::transport::Transport;
use crate::trial::Condition;
use tracing::{info, instrument};

/// Baseline for a single endpoint: every (iteration, prompt) pair, strictly one request at a
/// time.
#[instrument(name = "individual", skip_all, fields(model = %endpoint.name))]
pub async fn run_individual<T: Transport>(
    transport: &T,
    endpoint: &Endpoint,
    config: &BenchConfig,
) -> ScenarioResult {
    let total = config.requests_per_scenario();
    info!("Running {total} sequential requests against {endpoint}");

    let mut trials = Vec::with_capacity(total);
    for iteration in 0..config.iterations {
        for prompt in &config.prompts {
            let trial =
                run_trial(transport, endpoint, prompt, config, Condition::Individual).await;
            log_trial(&endpoint.name, trials.len() + 1, total, &trial);
            trials.push(trial);
        }
        info!("Iteration {}/{} complete", iteration + 1, config.iterations);
    }

    ScenarioResult::from_trials(&endpoint.name, Condition::Individual, &trials)
}
