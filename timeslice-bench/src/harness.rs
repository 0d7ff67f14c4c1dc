//! Run controller
//!
//! Owns the configuration, the transport, and the per-run baseline store. A run probes every
//! endpoint once, measures each active endpoint on its own, then measures them all together when
//! every endpoint is up.
use crate::baseline::BaselineStore;
use crate::config::BenchConfig;
use crate::endpoint::{check_health, Endpoint, EndpointStatus};
use crate::error::BenchError;
use crate::report::{Report, Section};
use crate::scenario::{run_concurrent, run_individual};
use crate::transport::{HttpTransport, Transport};
use std::path::PathBuf;
use time::OffsetDateTime;
#[allow(unused_imports)]
use tracing::{debug, error, info, instrument, warn};

pub struct Harness<T> {
    config: BenchConfig,
    transport: T,
}

/// A finished run and where its report was written.
#[derive(Debug)]
pub struct RunOutcome {
    pub report: Report,
    pub path: PathBuf,
}

impl Harness<HttpTransport> {
    /// Validates `config` and builds the HTTP transport. Fails before any request is sent.
    pub fn from_config(config: BenchConfig) -> Result<Self, BenchError> {
        config.validate()?;
        let transport = HttpTransport::new(config.connect_timeout).map_err(BenchError::Client)?;
        Ok(Self::new(config, transport))
    }
}

impl<T: Transport> Harness<T> {
    pub fn new(config: BenchConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Makes sure the report can be written before spending time on requests.
    pub fn prepare_output_dir(&self) -> Result<(), BenchError> {
        let path = &self.config.output_dir;
        std::fs::create_dir_all(path).map_err(|source| BenchError::Environment {
            path: path.clone(),
            source,
        })
    }

    /// Full run: environment check, measurements, report file.
    pub async fn execute(&self) -> Result<RunOutcome, BenchError> {
        self.config.validate()?;
        self.prepare_output_dir()?;

        let report = self.run().await?;
        let path = report.write_to(&self.config.output_dir)?;
        info!("Report written to {}", path.display());

        Ok(RunOutcome { report, path })
    }

    /// Measures without touching the filesystem.
    #[instrument(name = "harness", skip_all)]
    pub async fn run(&self) -> Result<Report, BenchError> {
        let mut report = Report::new(&self.config, OffsetDateTime::now_utc());

        let statuses = self.check_endpoints().await;
        report.set_statuses(&statuses);

        let active: Vec<&Endpoint> = statuses
            .iter()
            .filter(|status| status.active)
            .map(|status| &status.endpoint)
            .collect();
        if active.is_empty() {
            error!("None of the {} endpoints are reachable", statuses.len());
            return Err(BenchError::NoActiveEndpoints);
        }

        let mut baselines = BaselineStore::new();
        for endpoint in active {
            let result = run_individual(&self.transport, endpoint, &self.config).await;
            baselines.insert(result.clone());
            report.push_section(Section {
                result,
                impact: None,
            });
        }

        match concurrent_skip_reason(&statuses) {
            None => {
                let sections = run_concurrent(
                    &self.transport,
                    &self.config.endpoints,
                    &self.config,
                    &baselines,
                )
                .await;
                for section in sections {
                    report.push_section(section);
                }
            }
            Some(reason) => {
                warn!("Skipping concurrent testing: {reason}");
                report.push_note(format!("concurrent testing skipped: {reason}"));
            }
        }

        info!("Benchmark complete");
        Ok(report)
    }

    async fn check_endpoints(&self) -> Vec<EndpointStatus> {
        let mut statuses = Vec::with_capacity(self.config.endpoints.len());
        for endpoint in &self.config.endpoints {
            let status = check_health(&self.transport, endpoint, self.config.probe_timeout).await;
            statuses.push(status);
        }
        statuses
    }
}

/// Concurrent testing needs at least two endpoints and every one of them up.
fn concurrent_skip_reason(statuses: &[EndpointStatus]) -> Option<String> {
    if statuses.len() < 2 {
        return Some("only one endpoint configured".to_string());
    }

    let inactive: Vec<&str> = statuses
        .iter()
        .filter(|status| !status.active)
        .map(|status| status.endpoint.name.as_str())
        .collect();
    if inactive.is_empty() {
        None
    } else {
        Some(format!("{} not active", inactive.join(", ")))
    }
}
