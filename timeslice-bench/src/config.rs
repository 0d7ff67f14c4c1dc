use crate::constants::*;
use crate::endpoint::Endpoint;
use crate::transport::GenerationParameters;
use clap::error::ErrorKind;
use clap::Parser;
use std::collections::HashSet;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("at least one endpoint is required")]
    NoEndpoints,

    #[error("endpoint name `{0}` is used more than once")]
    DuplicateEndpoint(String),

    #[error("iterations must be greater than zero")]
    ZeroIterations,

    #[error("at least one prompt is required")]
    NoPrompts,

    #[error("{0} timeout must be greater than zero")]
    ZeroTimeout(&'static str),

    #[error(
        "{iterations} iterations of {prompts} prompts exceeds {} requests per scenario",
        MAX_REQUESTS_PER_SCENARIO
    )]
    MatrixTooLarge { iterations: usize, prompts: usize },

    #[error("{0}")]
    Args(String),
}

/// Everything a benchmark run needs to know up front.
#[derive(Clone, Debug)]
pub struct BenchConfig {
    pub endpoints: Vec<Endpoint>,
    pub iterations: usize,
    pub prompts: Vec<String>,
    pub parameters: GenerationParameters,
    pub request_timeout: Duration,
    pub probe_timeout: Duration,
    pub connect_timeout: Duration,
    pub output_dir: PathBuf,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            endpoints: DEFAULT_ENDPOINTS
                .iter()
                .filter_map(|(name, url)| Endpoint::new(name, url).ok())
                .collect(),
            iterations: DEFAULT_ITERATIONS,
            prompts: DEFAULT_PROMPTS.iter().map(|p| p.to_string()).collect(),
            parameters: GenerationParameters {
                max_new_tokens: DEFAULT_MAX_NEW_TOKENS,
                temperature: DEFAULT_TEMPERATURE,
            },
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Compare individual and concurrent throughput of two inference endpoints sharing a time-sliced GPU"
)]
struct BenchCli {
    /// Endpoint to test, as NAME=URL. Repeat for each endpoint.
    #[arg(short, long = "endpoint")]
    endpoints: Vec<Endpoint>,

    #[arg(short, long)]
    iterations: Option<usize>,

    /// Prompt to send. Repeat for each prompt.
    #[arg(short, long = "prompt")]
    prompts: Vec<String>,

    #[arg(long)]
    max_new_tokens: Option<u32>,

    #[arg(long)]
    temperature: Option<f64>,

    /// Per-request timeout, e.g. `90s` or `2m`.
    #[arg(long, value_parser = humantime::parse_duration)]
    request_timeout: Option<Duration>,

    #[arg(long, value_parser = humantime::parse_duration)]
    probe_timeout: Option<Duration>,

    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

impl BenchConfig {
    /// Defaults overridden by whatever flags were passed on the command line.
    ///
    /// `--help` and `--version` print and exit; every other argument error is returned.
    pub fn with_args() -> Result<Self, ConfigError> {
        Self::try_from_args(std::env::args_os())
    }

    pub fn try_from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        match BenchCli::try_parse_from(args) {
            Ok(cli) => Ok(Self::default().merge(cli)),
            Err(err) => match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
                _ => Err(ConfigError::Args(err.to_string().trim_end().to_string())),
            },
        }
    }

    fn merge(mut self, args: BenchCli) -> Self {
        if !args.endpoints.is_empty() {
            self.endpoints = args.endpoints;
        }
        if !args.prompts.is_empty() {
            self.prompts = args.prompts;
        }
        if let Some(iterations) = args.iterations {
            self.iterations = iterations;
        }
        if let Some(max_new_tokens) = args.max_new_tokens {
            self.parameters.max_new_tokens = max_new_tokens;
        }
        if let Some(temperature) = args.temperature {
            self.parameters.temperature = temperature;
        }
        if let Some(timeout) = args.request_timeout {
            self.request_timeout = timeout;
        }
        if let Some(timeout) = args.probe_timeout {
            self.probe_timeout = timeout;
        }
        if let Some(dir) = args.output_dir {
            self.output_dir = dir;
        }
        self
    }

    pub fn endpoints(mut self, endpoints: &[Endpoint]) -> Self {
        self.endpoints = endpoints.to_vec();
        self
    }

    pub fn iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn prompts<S: AsRef<str>>(mut self, prompts: &[S]) -> Self {
        self.prompts = prompts.iter().map(|p| p.as_ref().to_string()).collect();
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Requests per endpoint per scenario. Saturates; `validate` rejects matrices this large.
    pub fn requests_per_scenario(&self) -> usize {
        self.iterations.saturating_mul(self.prompts.len())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoints.is_empty() {
            return Err(ConfigError::NoEndpoints);
        }

        let mut seen = HashSet::new();
        for endpoint in &self.endpoints {
            if !seen.insert(endpoint.name.as_str()) {
                return Err(ConfigError::DuplicateEndpoint(endpoint.name.clone()));
            }
        }

        if self.iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if self.prompts.is_empty() {
            return Err(ConfigError::NoPrompts);
        }
        match self.iterations.checked_mul(self.prompts.len()) {
            Some(total) if total <= MAX_REQUESTS_PER_SCENARIO => {}
            _ => {
                return Err(ConfigError::MatrixTooLarge {
                    iterations: self.iterations,
                    prompts: self.prompts.len(),
                })
            }
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout("request"));
        }
        if self.probe_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout("probe"));
        }

        Ok(())
    }
}
