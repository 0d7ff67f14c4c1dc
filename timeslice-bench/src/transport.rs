//! HTTP access to the inference endpoints.
//!
//! The harness only ever needs the raw response body: liveness and generation success are both
//! decided from body content, never from the status code.
use crate::constants::{GENERATE_PATH, INFO_PATH};
use crate::endpoint::Endpoint;
use crate::error::TransportError;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct GenerateRequest {
    pub inputs: String,
    pub parameters: GenerationParameters,
}

#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct GenerationParameters {
    pub max_new_tokens: u32,
    pub temperature: f64,
}

impl GenerateRequest {
    pub fn new(prompt: &str, parameters: GenerationParameters) -> Self {
        Self {
            inputs: prompt.to_string(),
            parameters,
        }
    }
}

/// Transport seam between the runners and the network.
///
/// Timeouts are imposed by the caller, so implementations may block for as long as the
/// backend takes.
#[trait_variant::make(Transport: Send)]
pub trait LocalTransport {
    /// `GET {base}/info`, returning the body.
    async fn info(&self, endpoint: &Endpoint) -> Result<String, TransportError>;

    /// `POST {base}/generate`, returning the body.
    async fn generate(
        &self,
        endpoint: &Endpoint,
        request: &GenerateRequest,
    ) -> Result<String, TransportError>;
}

/// `reqwest` backed transport. Idle connections are never pooled, so every call opens a fresh
/// connection and closes it on completion.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(connect_timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .pool_max_idle_per_host(0)
            .connect_timeout(connect_timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    async fn info(&self, endpoint: &Endpoint) -> Result<String, TransportError> {
        let res = self.client.get(endpoint.url(INFO_PATH)).send().await?;
        debug!("GET info -> {}", res.status());
        Ok(res.text().await?)
    }

    async fn generate(
        &self,
        endpoint: &Endpoint,
        request: &GenerateRequest,
    ) -> Result<String, TransportError> {
        let res = self
            .client
            .post(endpoint.url(GENERATE_PATH))
            .json(request)
            .send()
            .await?;
        debug!("POST generate -> {}", res.status());
        Ok(res.text().await?)
    }
}
