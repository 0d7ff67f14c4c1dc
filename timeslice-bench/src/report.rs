//! Flat-text report rendering.
use crate::config::BenchConfig;
use crate::constants::REPORT_FILE_PREFIX;
use crate::endpoint::EndpointStatus;
use crate::error::BenchError;
use crate::stats::{Impact, ScenarioResult};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use time::macros::format_description;
use time::OffsetDateTime;

const TITLE: &str = "GPU Time-Slicing Benchmark Report";

const SUMMARY: &str = "\
Summary
-------
Individual results measure each model with exclusive use of the benchmark traffic.
Concurrent results measure both models receiving requests at the same time while
sharing one time-sliced GPU. A positive latency impact and a negative throughput
impact show how much each model slows down when the GPU is shared.";

/// Report lines echoed to the console once the run completes.
const SUMMARY_PREFIXES: [&str; 5] = [
    "===",
    "Average Latency:",
    "Throughput:",
    "Performance Impact:",
    "Note:",
];

/// One scenario block.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub result: ScenarioResult,
    /// Only present for concurrent scenarios that had a baseline to compare against.
    pub impact: Option<Impact>,
}

#[derive(Clone, Debug)]
pub struct Report {
    generated: OffsetDateTime,
    settings: Vec<(&'static str, String)>,
    statuses: Vec<EndpointStatus>,
    sections: Vec<Section>,
    notes: Vec<String>,
}

impl Report {
    pub fn new(config: &BenchConfig, generated: OffsetDateTime) -> Self {
        let settings = vec![
            ("Iterations", config.iterations.to_string()),
            ("Prompts per iteration", config.prompts.len().to_string()),
            (
                "Max new tokens",
                config.parameters.max_new_tokens.to_string(),
            ),
            ("Temperature", config.parameters.temperature.to_string()),
            (
                "Request timeout",
                humantime::format_duration(config.request_timeout).to_string(),
            ),
        ];

        Self {
            generated,
            settings,
            statuses: vec![],
            sections: vec![],
            notes: vec![],
        }
    }

    pub fn set_statuses(&mut self, statuses: &[EndpointStatus]) {
        self.statuses = statuses.to_vec();
    }

    pub fn push_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    pub fn push_note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn statuses(&self) -> &[EndpointStatus] {
        &self.statuses
    }

    pub fn file_name(&self) -> String {
        let stamp = self
            .generated
            .format(format_description!(
                "[year][month][day]_[hour][minute][second]"
            ))
            .unwrap_or_else(|_| self.generated.unix_timestamp().to_string());
        format!("{REPORT_FILE_PREFIX}{stamp}.txt")
    }

    pub fn render(&self) -> String {
        let generated = self
            .generated
            .format(format_description!(
                "[year]-[month]-[day] [hour]:[minute]:[second] UTC"
            ))
            .unwrap_or_else(|_| self.generated.unix_timestamp().to_string());

        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{TITLE}");
        let _ = writeln!(out, "Generated: {generated}");
        for (key, value) in &self.settings {
            let _ = writeln!(out, "{key}: {value}");
        }

        let _ = writeln!(out, "\nEndpoints:");
        for status in &self.statuses {
            let state = if status.active { "active" } else { "inactive" };
            let _ = writeln!(out, "  {}: {state}", status.endpoint);
        }

        for section in &self.sections {
            out.push('\n');
            render_section(&mut out, section);
        }

        if !self.notes.is_empty() {
            out.push('\n');
            for note in &self.notes {
                let _ = writeln!(out, "Note: {note}");
            }
        }

        let _ = writeln!(out, "\n{SUMMARY}");
        out
    }

    /// The key lines of the rendered report.
    pub fn summary(&self) -> Vec<String> {
        self.render()
            .lines()
            .filter(|line| SUMMARY_PREFIXES.iter().any(|p| line.starts_with(p)))
            .map(str::to_string)
            .collect()
    }

    /// Writes the report into `dir`, returning the full path of the new file.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, BenchError> {
        let path = dir.join(self.file_name());
        std::fs::write(&path, self.render()).map_err(|source| BenchError::Report {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

fn render_section(out: &mut String, section: &Section) {
    let result = &section.result;
    let _ = writeln!(out, "=== {} ({}) ===", result.model, result.condition);
    let _ = writeln!(out, "Total Requests: {}", result.total_requests);
    let _ = writeln!(out, "Successful Requests: {}", result.success_count);
    let _ = writeln!(out, "Success Rate: {:.1}%", result.success_rate());

    match result.average_latency() {
        Some(latency) => {
            let _ = writeln!(out, "Average Latency: {:.3}s", latency.as_secs_f64());
        }
        None => {
            let _ = writeln!(out, "Average Latency: no data");
        }
    }

    match result.throughput() {
        Some(tput) => {
            let _ = writeln!(out, "Throughput: {tput:.2} req/min");
        }
        None => {
            let _ = writeln!(out, "Throughput: no data");
        }
    }

    if let Some(impact) = section.impact {
        let _ = writeln!(
            out,
            "Performance Impact: latency {:+.1}%, throughput {:+.1}%",
            impact.latency_pct, impact.throughput_pct
        );
    }
}
