//! Inference endpoints and the one-shot liveness probe.
use crate::transport::Transport;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// A named inference service. Immutable for the whole run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub name: String,
    base: Url,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EndpointParseError {
    #[error("expected NAME=URL, got `{0}`")]
    MissingSeparator(String),

    #[error("endpoint name must not be empty")]
    EmptyName,

    #[error("invalid endpoint URL `{0}`: {1}")]
    InvalidUrl(String, url::ParseError),

    #[error("unsupported URL scheme `{0}`, expected http or https")]
    UnsupportedScheme(String),
}

impl Endpoint {
    pub fn new(name: &str, base: &str) -> Result<Self, EndpointParseError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EndpointParseError::EmptyName);
        }

        let base = Url::parse(base.trim())
            .map_err(|err| EndpointParseError::InvalidUrl(base.to_string(), err))?;
        match base.scheme() {
            "http" | "https" => {}
            other => return Err(EndpointParseError::UnsupportedScheme(other.to_string())),
        }

        Ok(Self {
            name: name.to_string(),
            base,
        })
    }

    /// Joins `path` onto the base URL, keeping any path prefix the base already has.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl FromStr for Endpoint {
    type Err = EndpointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, base) = s
            .split_once('=')
            .ok_or_else(|| EndpointParseError::MissingSeparator(s.to_string()))?;
        Endpoint::new(name, base)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.base)
    }
}

/// Liveness of one endpoint as observed by the single probe at the start of a run.
#[derive(Clone, Debug)]
pub struct EndpointStatus {
    pub endpoint: Endpoint,
    pub active: bool,
}

/// Probes `GET {base}/info` exactly once. Any non-empty body means the endpoint takes part in
/// the run; a timeout, a transport failure, or an empty body excludes it.
#[instrument(name = "health", skip_all, fields(model = %endpoint.name))]
pub async fn check_health<T: Transport>(
    transport: &T,
    endpoint: &Endpoint,
    timeout: Duration,
) -> EndpointStatus {
    let active = match tokio::time::timeout(timeout, transport.info(endpoint)).await {
        Ok(Ok(body)) if !body.is_empty() => {
            debug!("Info response: {}", body.trim());
            true
        }
        Ok(Ok(_)) => {
            warn!("{} answered with an empty info body", endpoint);
            false
        }
        Ok(Err(err)) => {
            warn!("{} is not reachable: {err}", endpoint);
            false
        }
        Err(_) => {
            warn!(
                "{} did not answer within {}",
                endpoint,
                humantime::format_duration(timeout)
            );
            false
        }
    };

    if active {
        info!("{} is active", endpoint);
    }

    EndpointStatus {
        endpoint: endpoint.clone(),
        active,
    }
}
