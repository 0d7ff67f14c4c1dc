use mock_service::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Two mock models on the default benchmark ports, contending for one imaginary GPU.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::new("mock_service=debug,tower_http=debug"))
        .init();

    let gpu = Arc::new(Contention::default());
    let phi = MockConfig::new("microsoft/phi-2", Duration::from_millis(800)).contention(&gpu);
    let tiny = MockConfig::new("TinyLlama/TinyLlama-1.1B-Chat-v1.0", Duration::from_millis(400))
        .contention(&gpu);

    let phi = tokio::spawn(run(TcpListener::bind("0.0.0.0:8080").await?, phi));
    let tiny = tokio::spawn(run(TcpListener::bind("0.0.0.0:8081").await?, tiny));

    let (phi, tiny) = tokio::try_join!(phi, tiny)?;
    phi?;
    tiny?;
    Ok(())
}
