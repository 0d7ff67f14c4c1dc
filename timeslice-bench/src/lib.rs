#![doc = include_str!("../README.md")]

pub mod baseline;
pub mod config;
pub mod constants;
pub mod endpoint;
pub mod error;
pub mod harness;
#[cfg(feature = "metrics")]
pub mod telemetry;
pub mod report;
pub mod scenario;
pub mod stats;
pub mod transport;
pub mod trial;

pub use config::BenchConfig;
pub use endpoint::Endpoint;
pub use error::{BenchError, TransportError};
pub use harness::{Harness, RunOutcome};
pub use report::Report;

pub mod prelude {
    pub use crate::config::BenchConfig;
    pub use crate::endpoint::{Endpoint, EndpointStatus};
    pub use crate::harness::{Harness, RunOutcome};
    pub use crate::report::{Report, Section};
    pub use crate::stats::{Impact, ScenarioResult};
    pub use crate::transport::{GenerateRequest, HttpTransport, Transport};
    pub use crate::trial::Condition;
}
