use crate::stats::ScenarioResult;
use std::collections::HashMap;

/// Individual-run results keyed by model name, kept for the concurrent comparison.
///
/// Owned by a single run and dropped with it, so nothing leaks between runs.
#[derive(Debug, Default)]
pub struct BaselineStore {
    results: HashMap<String, ScenarioResult>,
}

impl BaselineStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, result: ScenarioResult) {
        self.results.insert(result.model.clone(), result);
    }

    pub fn get(&self, model: &str) -> Option<&ScenarioResult> {
        self.results.get(model)
    }
}
