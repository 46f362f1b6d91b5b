//! Execution parameters — dispatch loop control.
//!
//! [`ExecutionParams`] groups the static parameters that control a dispatch
//! run in [`DispatchLoopUseCase`](crate::use_cases::dispatch_loop::DispatchLoopUseCase).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};

/// Default model turn ceiling per run.
pub const DEFAULT_MAX_ITERATIONS: usize = 50;

/// Default remote model.
pub const DEFAULT_MODEL: &str = "gpt-5.2-codex";

/// Dispatch loop control parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Maximum number of model turns before the run is aborted.
    pub max_iterations: usize,
    /// Remote model identifier.
    pub model: String,
    /// Reasoning effort hint (`low`, `medium`, `high`); omitted when `None`.
    pub reasoning_effort: Option<String>,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            model: DEFAULT_MODEL.to_string(),
            reasoning_effort: None,
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    /// Zero is raised to one so every run talks to the model at least once.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max.max(1);
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Blank values clear the effort.
    pub fn with_reasoning_effort(mut self, effort: Option<impl Into<String>>) -> Self {
        self.reasoning_effort = effort
            .map(|e| e.into())
            .filter(|e: &String| !e.trim().is_empty());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let params = ExecutionParams::default();
        assert_eq!(params.max_iterations, 50);
        assert_eq!(params.model, "gpt-5.2-codex");
        assert!(params.reasoning_effort.is_none());
    }

    #[test]
    fn test_builder() {
        let params = ExecutionParams::default()
            .with_max_iterations(7)
            .with_model("gpt-test")
            .with_reasoning_effort(Some("high"));

        assert_eq!(params.max_iterations, 7);
        assert_eq!(params.model, "gpt-test");
        assert_eq!(params.reasoning_effort.as_deref(), Some("high"));
    }

    #[test]
    fn test_zero_iterations_raised_to_one() {
        assert_eq!(ExecutionParams::default().with_max_iterations(0).max_iterations, 1);
    }

    #[test]
    fn test_blank_effort_is_none() {
        let params = ExecutionParams::default().with_reasoning_effort(Some("  "));
        assert!(params.reasoning_effort.is_none());
        let params = ExecutionParams::default().with_reasoning_effort(None::<String>);
        assert!(params.reasoning_effort.is_none());
    }
}
