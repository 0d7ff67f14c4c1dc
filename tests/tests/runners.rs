use utils::*;

use mock_service::prelude::*;
use std::sync::Arc;
use std::time::Duration;
use timeslice_bench::baseline::BaselineStore;
use timeslice_bench::prelude::*;
use timeslice_bench::scenario::{run_concurrent, run_individual};

#[tokio::test]
async fn individual_run_is_sequential() {
    init();
    let gpu = Arc::new(Contention::default());
    let endpoint = mock(MockConfig::new("phi-2", MOCK_DELAY).contention(&gpu)).await;
    let config = quick_config(&[endpoint.clone()]);

    let result = bounded(run_individual(&transport(), &endpoint, &config)).await;

    assert_eq!(result.condition, Condition::Individual);
    assert_eq!(result.total_requests, 4);
    assert_eq!(result.success_count, 4);
    assert_eq!(result.success_rate(), 100.);
    assert!(result.average_latency().unwrap() >= MOCK_DELAY);
    assert!(result.throughput().unwrap() <= 60. / MOCK_DELAY.as_secs_f64());
    assert_eq!(gpu.peak(), 1);
}

#[tokio::test]
async fn batched_responses_succeed() {
    init();
    let endpoint =
        mock(MockConfig::new("phi-2", MOCK_DELAY).response(MockResponse::Batched)).await;
    let config = quick_config(&[endpoint.clone()]);

    let result = bounded(run_individual(&transport(), &endpoint, &config)).await;

    assert_eq!(result.success_count, result.total_requests);
}

#[tokio::test]
async fn error_bodies_fail_despite_http_success() {
    init();
    let endpoint = mock(MockConfig::new("phi-2", MOCK_DELAY).response(MockResponse::Error)).await;
    let config = quick_config(&[endpoint.clone()]);

    let result = bounded(run_individual(&transport(), &endpoint, &config)).await;

    assert_eq!(result.total_requests, 4);
    assert_eq!(result.success_count, 0);
    assert_eq!(result.success_rate(), 0.);
    assert_eq!(result.average_latency(), None);
    assert_eq!(result.throughput(), None);
}

#[tokio::test]
async fn empty_bodies_fail() {
    init();
    let endpoint = mock(MockConfig::new("phi-2", MOCK_DELAY).response(MockResponse::Empty)).await;
    let config = quick_config(&[endpoint.clone()]);

    let result = bounded(run_individual(&transport(), &endpoint, &config)).await;

    assert_eq!(result.success_count, 0);
}

#[tokio::test]
async fn slow_requests_time_out_and_the_matrix_continues() {
    init();
    let endpoint = mock(MockConfig::new("phi-2", Duration::from_secs(30))).await;
    let config = quick_config(&[endpoint.clone()]).request_timeout(Duration::from_millis(100));

    let result = bounded(run_individual(&transport(), &endpoint, &config)).await;

    assert_eq!(result.total_requests, 4);
    assert_eq!(result.success_count, 0);
}

#[tokio::test]
async fn concurrent_pairs_overlap() {
    init();
    let gpu = Arc::new(Contention::default());
    let a = mock(MockConfig::new("phi-2", MOCK_DELAY).contention(&gpu)).await;
    let b = mock(MockConfig::new("tinyllama", MOCK_DELAY).contention(&gpu)).await;
    let endpoints = [a.clone(), b.clone()];
    let config = quick_config(&endpoints);
    let transport = transport();

    let mut baselines = BaselineStore::new();
    for endpoint in &endpoints {
        baselines.insert(bounded(run_individual(&transport, endpoint, &config)).await);
    }
    assert_eq!(gpu.peak(), 1);

    let sections = bounded(run_concurrent(&transport, &endpoints, &config, &baselines)).await;

    assert_eq!(gpu.peak(), 2);
    assert_eq!(sections.len(), 2);
    for (section, endpoint) in sections.iter().zip(&endpoints) {
        assert_eq!(section.result.model, endpoint.name);
        assert_eq!(section.result.condition, Condition::Concurrent);
        assert_eq!(section.result.success_count, 4);

        // The mock charges an extra slice per overlapping request.
        let impact = section.impact.expect("Missing impact");
        assert!(impact.latency_pct > 40., "latency impact {}", impact.latency_pct);
        assert!(impact.throughput_pct < -25., "throughput impact {}", impact.throughput_pct);
    }
}

#[tokio::test]
async fn concurrent_without_baseline_has_no_impact() {
    init();
    let a = mock(MockConfig::new("phi-2", MOCK_DELAY)).await;
    let b = mock(MockConfig::new("tinyllama", MOCK_DELAY)).await;
    let endpoints = [a, b];
    let config = quick_config(&endpoints);

    let sections = bounded(run_concurrent(
        &transport(),
        &endpoints,
        &config,
        &BaselineStore::new(),
    ))
    .await;

    assert!(sections.iter().all(|section| section.impact.is_none()));
    assert!(sections.iter().all(|section| section.result.success_count == 4));
}
