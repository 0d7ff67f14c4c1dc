use super::{log_trial, run_trial};
use crate::baseline::BaselineStore;
use crate::config::BenchConfig;
use crate::endpoint::Endpoint;
use crate::report::Section;
use crate::stats::{Impact, ScenarioResult};
use crate::transport::Transport;
use crate::trial::{Condition, Trial};
use futures_util::future::join_all;
use tracing::{info, instrument, warn};

/// Runs the prompt matrix against every endpoint at once.
///
/// For each (iteration, prompt) pair all requests are put in flight together and joined before
/// the next pair starts. Each endpoint's trials land in its own vector, which only that
/// endpoint's future touches until the join completes.
#[instrument(name = "concurrent", skip_all, fields(endpoints = endpoints.len()))]
pub async fn run_concurrent<T: Transport>(
    transport: &T,
    endpoints: &[Endpoint],
    config: &BenchConfig,
    baselines: &BaselineStore,
) -> Vec<Section> {
    let total = config.requests_per_scenario();
    info!(
        "Running {total} paired requests against {}",
        endpoints
            .iter()
            .map(|e| e.name.as_str())
            .collect::<Vec<_>>()
            .join(" + ")
    );

    let mut streams: Vec<Vec<Trial>> = endpoints
        .iter()
        .map(|_| Vec::with_capacity(total))
        .collect();

    for iteration in 0..config.iterations {
        for prompt in &config.prompts {
            let requests = streams
                .iter_mut()
                .zip(endpoints)
                .map(|(stream, endpoint)| async move {
                    let trial =
                        run_trial(transport, endpoint, prompt, config, Condition::Concurrent)
                            .await;
                    log_trial(&endpoint.name, stream.len() + 1, total, &trial);
                    stream.push(trial);
                });
            join_all(requests).await;
        }
        info!("Iteration {}/{} complete", iteration + 1, config.iterations);
    }

    endpoints
        .iter()
        .zip(streams)
        .map(|(endpoint, trials)| {
            let result =
                ScenarioResult::from_trials(&endpoint.name, Condition::Concurrent, &trials);
            let impact = match baselines.get(&endpoint.name) {
                Some(baseline) => Impact::between(baseline, &result),
                None => {
                    warn!("No baseline for {}; skipping impact", endpoint.name);
                    None
                }
            };
            Section { result, impact }
        })
        .collect()
}
