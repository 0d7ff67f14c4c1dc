use crate::constants::SUCCESS_MARKER;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use tokio::time::Instant;

/// The load condition a scenario was measured under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Condition {
    Individual,
    Concurrent,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Individual => write!(f, "individual"),
            Condition::Concurrent => write!(f, "concurrent"),
        }
    }
}

/// One request/response exchange.
#[derive(Clone, Debug)]
pub struct Trial {
    pub prompt: String,
    pub start: Instant,
    pub end: Instant,
    pub outcome: Outcome,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Carries a short reason for the console trace.
    Failure(String),
}

impl Trial {
    pub fn duration(&self) -> Duration {
        self.end.saturating_duration_since(self.start)
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }
}

/// Classifies a `/generate` body. Text Generation Inference answers with either an object or a
/// one-element array of objects; both count when they carry the marker field.
pub fn classify_body(body: &str) -> Outcome {
    if body.trim().is_empty() {
        return Outcome::Failure("empty response body".to_string());
    }

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) if map.contains_key(SUCCESS_MARKER) => Outcome::Success,
        Ok(Value::Array(items))
            if items
                .first()
                .and_then(Value::as_object)
                .is_some_and(|first| first.contains_key(SUCCESS_MARKER)) =>
        {
            Outcome::Success
        }
        Ok(other) => Outcome::Failure(format!(
            "no {SUCCESS_MARKER} in response: {}",
            truncate(&other.to_string())
        )),
        Err(_) => Outcome::Failure(format!("malformed response: {}", truncate(body))),
    }
}

fn truncate(text: &str) -> String {
    const LIMIT: usize = 120;
    match text.char_indices().nth(LIMIT) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
