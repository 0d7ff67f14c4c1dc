use std::time::Duration;

/// Number of passes over the prompt list per scenario.
pub const DEFAULT_ITERATIONS: usize = 3;

/// Upper bound on iterations × prompts for one endpoint in one scenario.
pub const MAX_REQUESTS_PER_SCENARIO: usize = 100_000;

pub const DEFAULT_MAX_NEW_TOKENS: u32 = 50;
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

/// Upper bound on a single `/generate` call. A hung backend fails the trial instead of
/// stalling the matrix.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Upper bound on the `/info` liveness probe.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

pub const DEFAULT_OUTPUT_DIR: &str = "results";

pub const DEFAULT_ENDPOINTS: [(&str, &str); 2] = [
    ("phi-2", "http://localhost:8080"),
    ("tinyllama", "http://localhost:8081"),
];

pub const DEFAULT_PROMPTS: [&str; 5] = [
    "Explain what a GPU is in one sentence.",
    "Write a haiku about distributed systems.",
    "What is the capital of France?",
    "Summarize the benefits of container orchestration.",
    "List three uses of machine learning in healthcare.",
];

pub const INFO_PATH: &str = "info";
pub const GENERATE_PATH: &str = "generate";

/// Field whose presence in a `/generate` response body marks a successful generation.
pub const SUCCESS_MARKER: &str = "generated_text";

pub const REPORT_FILE_PREFIX: &str = "timeslice_benchmark_";
