use utils::*;

use mock_service::prelude::*;
use std::time::Duration;
use timeslice_bench::endpoint::check_health;

#[tokio::test]
async fn info_body_means_active() {
    init();
    let endpoint = mock(MockConfig::new("phi-2", MOCK_DELAY)).await;

    let status = bounded(check_health(&transport(), &endpoint, Duration::from_secs(2))).await;

    assert!(status.active);
    assert_eq!(status.endpoint, endpoint);
}

#[tokio::test]
async fn empty_info_body_means_inactive() {
    init();
    let endpoint = mock(MockConfig::new("phi-2", MOCK_DELAY).silent_info()).await;

    let status = bounded(check_health(&transport(), &endpoint, Duration::from_secs(2))).await;

    assert!(!status.active);
}

#[tokio::test]
async fn refused_connection_means_inactive() {
    init();
    let endpoint = dead_endpoint("tinyllama").await;

    let status = bounded(check_health(&transport(), &endpoint, Duration::from_secs(2))).await;

    assert!(!status.active);
}

#[tokio::test]
async fn probe_is_bounded_by_timeout() {
    init();
    // Accepts connections but never answers.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = endpoint("stuck", listener.local_addr().unwrap());

    let status = bounded(check_health(
        &transport(),
        &endpoint,
        Duration::from_millis(200),
    ))
    .await;

    assert!(!status.active);
    drop(listener);
}
