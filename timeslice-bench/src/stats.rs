//! Aggregation of trials into scenario results, and the baseline/concurrent comparison.
use crate::trial::{Condition, Trial};
use std::time::Duration;

/// Aggregate of every trial one endpoint saw under one condition.
///
/// Latency and throughput only consider successful trials. When nothing succeeded both are
/// `None` rather than zero or NaN.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioResult {
    pub model: String,
    pub condition: Condition,
    pub total_requests: usize,
    pub success_count: usize,
    /// Sum of the durations of the successful trials.
    pub successful_time: Duration,
}

impl ScenarioResult {
    pub fn from_trials(model: &str, condition: Condition, trials: &[Trial]) -> Self {
        let (success_count, successful_time) = trials
            .iter()
            .filter(|trial| trial.is_success())
            .fold((0, Duration::ZERO), |(count, time), trial| {
                (count + 1, time + trial.duration())
            });

        Self {
            model: model.to_string(),
            condition,
            total_requests: trials.len(),
            success_count,
            successful_time,
        }
    }

    /// Percentage in `[0, 100]`. An empty scenario reports `0.0`.
    pub fn success_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.
        } else {
            self.success_count as f64 * 100. / self.total_requests as f64
        }
    }

    pub fn has_data(&self) -> bool {
        self.success_count > 0
    }

    pub fn average_latency(&self) -> Option<Duration> {
        if self.has_data() {
            Some(self.successful_time / self.success_count as u32)
        } else {
            None
        }
    }

    /// Successful requests per minute of request time.
    pub fn throughput(&self) -> Option<f64> {
        let secs = self.successful_time.as_secs_f64();
        if self.has_data() && secs > 0. {
            Some(self.success_count as f64 * 60. / secs)
        } else {
            None
        }
    }
}

/// Relative change from an individual baseline to the concurrent measurement, in percent.
/// Positive latency impact means slower; negative throughput impact means fewer requests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Impact {
    pub latency_pct: f64,
    pub throughput_pct: f64,
}

impl Impact {
    /// `None` unless both sides have successful trials to compare.
    pub fn between(baseline: &ScenarioResult, concurrent: &ScenarioResult) -> Option<Self> {
        let base_latency = baseline.average_latency()?.as_secs_f64();
        let base_throughput = baseline.throughput()?;
        let latency = concurrent.average_latency()?.as_secs_f64();
        let throughput = concurrent.throughput()?;

        Some(Self {
            latency_pct: percent_change(base_latency, latency),
            throughput_pct: percent_change(base_throughput, throughput),
        })
    }
}

fn percent_change(base: f64, value: f64) -> f64 {
    (value - base) * 100. / base
}
