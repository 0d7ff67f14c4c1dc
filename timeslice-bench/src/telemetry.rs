use crate::trial::{Condition, Trial};

pub const LATENCY_METRIC: &str = "timeslice_bench_request_latency";
pub const SUCCESS_METRIC: &str = "timeslice_bench_request_success";
pub const ERROR_METRIC: &str = "timeslice_bench_request_error";

/// Publishes one trial through the `metrics` facade. A no-op until a recorder is installed.
pub(crate) fn record_trial(model: &str, condition: Condition, trial: &Trial) {
    let model = model.to_string();
    let condition = condition.to_string();

    metrics::histogram!(LATENCY_METRIC, "model" => model.clone(), "condition" => condition.clone())
        .record(trial.duration().as_secs_f64());

    let name = if trial.is_success() {
        SUCCESS_METRIC
    } else {
        ERROR_METRIC
    };
    metrics::counter!(name, "model" => model, "condition" => condition).increment(1);
}
