//! Scenario runners and the request/measure step they share.
use crate::config::BenchConfig;
use crate::endpoint::Endpoint;
use crate::error::TransportError;
use crate::transport::{GenerateRequest, Transport};
use crate::trial::{classify_body, Condition, Outcome, Trial};
use tokio::time::Instant;
#[allow(unused_imports)]
use tracing::{debug, error, info, instrument, trace, warn};

mod concurrent;
mod individual;

pub use concurrent::run_concurrent;
pub use individual::run_individual;

/// Issues one `/generate` call under the configured timeout and measures it.
///
/// Never fails: transport errors, timeouts, and bodies without the success marker all become a
/// failed trial.
pub(crate) async fn run_trial<T: Transport>(
    transport: &T,
    endpoint: &Endpoint,
    prompt: &str,
    config: &BenchConfig,
    condition: Condition,
) -> Trial {
    let request = GenerateRequest::new(prompt, config.parameters);
    trace!("Sending {request:?} to {}", endpoint.name);

    let start = Instant::now();
    let res = tokio::time::timeout(
        config.request_timeout,
        transport.generate(endpoint, &request),
    )
    .await;
    let end = Instant::now();

    let outcome = match res {
        Ok(Ok(body)) => {
            debug!("Response from {}: {}", endpoint.name, body.trim());
            classify_body(&body)
        }
        Ok(Err(err)) => Outcome::Failure(err.to_string()),
        Err(_) => Outcome::Failure(TransportError::Timeout(config.request_timeout).to_string()),
    };

    let trial = Trial {
        prompt: prompt.to_string(),
        start,
        end,
        outcome,
    };

    #[cfg(feature = "metrics")]
    crate::telemetry::record_trial(&endpoint.name, condition, &trial);
    #[cfg(not(feature = "metrics"))]
    let _ = condition;

    trial
}

pub(crate) fn log_trial(model: &str, index: usize, total: usize, trial: &Trial) {
    match &trial.outcome {
        Outcome::Success => info!(
            "{model} request {index}/{total}: {:.3}s",
            trial.duration().as_secs_f64()
        ),
        Outcome::Failure(reason) => warn!(
            "{model} request {index}/{total} failed after {:.3}s: {reason}",
            trial.duration().as_secs_f64()
        ),
    }
}
