use utils::*;

use mock_service::prelude::*;
use std::sync::Arc;
use timeslice_bench::prelude::*;
use timeslice_bench::BenchError;
use tracing_test::traced_test;

#[tokio::test]
async fn both_endpoints_active() {
    let gpu = Arc::new(Contention::default());
    let a = mock(MockConfig::new("phi-2", MOCK_DELAY).contention(&gpu)).await;
    let b = mock(MockConfig::new("tinyllama", MOCK_DELAY).contention(&gpu)).await;
    let config = quick_config(&[a, b]);
    let dir = config.output_dir.clone();

    let harness = Harness::from_config(config).unwrap();
    let RunOutcome { report, path } = bounded(harness.execute()).await.unwrap();

    assert_eq!(report.sections().len(), 4);
    assert!(report.notes().is_empty());
    assert!(report.statuses().iter().all(|status| status.active));
    for model in ["phi-2", "tinyllama"] {
        let individual = section(&report, model, Condition::Individual);
        assert_eq!(individual.result.success_count, 4);
        assert!(individual.impact.is_none());

        let concurrent = section(&report, model, Condition::Concurrent);
        assert_eq!(concurrent.result.success_count, 4);
        assert!(concurrent.impact.unwrap().latency_pct > 0.);
    }
    assert_eq!(gpu.peak(), 2);

    assert!(path.starts_with(&dir));
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("=== phi-2 (individual) ==="));
    assert!(contents.contains("=== tinyllama (concurrent) ==="));
    assert_eq!(contents.matches("Performance Impact:").count(), 2);

    let summary = report.summary();
    assert_eq!(
        summary.iter().filter(|line| line.starts_with("===")).count(),
        4
    );

    std::fs::remove_dir_all(dir).unwrap();
}

#[traced_test]
#[tokio::test]
async fn one_endpoint_inactive() {
    let a = mock(MockConfig::new("phi-2", MOCK_DELAY)).await;
    let b = dead_endpoint("tinyllama").await;
    let config = quick_config(&[a, b]);
    let dir = config.output_dir.clone();

    let harness = Harness::from_config(config).unwrap();
    let RunOutcome { report, path } = bounded(harness.execute()).await.unwrap();

    assert_eq!(report.sections().len(), 1);
    assert_eq!(report.sections()[0].result.model, "phi-2");
    assert_eq!(report.sections()[0].result.success_count, 4);
    assert!(logs_contain("Skipping concurrent testing: tinyllama not active"));

    let contents = std::fs::read_to_string(path).unwrap();
    assert!(contents.contains("  tinyllama (http://127.0.0.1:"));
    assert!(contents.contains("Note: concurrent testing skipped: tinyllama not active"));
    assert!(!contents.contains("(concurrent)"));

    std::fs::remove_dir_all(dir).unwrap();
}

#[tokio::test]
async fn error_bodies_count_as_failures() {
    let a = mock(MockConfig::new("phi-2", MOCK_DELAY)).await;
    let b = mock(MockConfig::new("tinyllama", MOCK_DELAY).response(MockResponse::Error)).await;
    let config = quick_config(&[a, b]);

    let harness = Harness::from_config(config).unwrap();
    let report = bounded(harness.run()).await.unwrap();

    let broken = section(&report, "tinyllama", Condition::Individual);
    assert_eq!(broken.result.total_requests, 4);
    assert_eq!(broken.result.success_count, 0);
    assert!(section(&report, "tinyllama", Condition::Concurrent)
        .impact
        .is_none());
    assert!(report.render().contains(
        "=== tinyllama (individual) ===\n\
         Total Requests: 4\n\
         Successful Requests: 0\n\
         Success Rate: 0.0%\n\
         Average Latency: no data\n\
         Throughput: no data\n"
    ));
}

#[tokio::test]
async fn no_reachable_endpoints() {
    let a = dead_endpoint("phi-2").await;
    let b = dead_endpoint("tinyllama").await;
    let config = quick_config(&[a, b]);
    let dir = config.output_dir.clone();

    let harness = Harness::from_config(config).unwrap();
    let res = bounded(harness.execute()).await;

    assert!(matches!(res, Err(BenchError::NoActiveEndpoints)));
    // The output directory is prepared up front, but no report is written.
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);

    std::fs::remove_dir_all(dir).unwrap();
}

#[tokio::test]
async fn invalid_config_is_rejected_before_testing() {
    let config = BenchConfig::default().iterations(0);

    assert!(matches!(
        Harness::from_config(config),
        Err(BenchError::Config(_))
    ));
}

#[tokio::test]
async fn unusable_output_dir_is_an_environment_error() {
    let a = mock(MockConfig::new("phi-2", MOCK_DELAY)).await;
    let file = temp_dir();
    std::fs::write(&file, "not a directory").unwrap();
    let config = quick_config(&[a]).output_dir(file.join("reports"));

    let harness = Harness::from_config(config).unwrap();
    let res = bounded(harness.execute()).await;

    assert!(matches!(res, Err(BenchError::Environment { .. })));
    std::fs::remove_file(file).unwrap();
}
