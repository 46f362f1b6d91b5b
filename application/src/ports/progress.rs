//! Progress notification port
//!
//! Defines the interface for reporting what a dispatch run is doing.

use delegate_domain::{DispatchOutcome, ToolResult};

/// Callback for progress updates during a dispatch run
///
/// Implementations live in the presentation layer. All methods have empty
/// defaults so implementors only override what they display.
pub trait DispatchProgress: Send + Sync {
    /// Called before each request to the model (`turn` is 1-based)
    fn on_turn_start(&self, _turn: usize, _max_turns: usize) {}

    /// Called with the text of a model turn, as soon as it arrives
    fn on_model_text(&self, _text: &str) {}

    /// Called before a tool executes; `arguments` is the raw JSON argument string
    fn on_tool_call(&self, _tool_name: &str, _arguments: &str) {}

    /// Called after a tool executes
    fn on_tool_result(&self, _tool_name: &str, _result: &ToolResult) {}

    /// Called once the run reaches a terminal phase
    fn on_finished(&self, _outcome: &DispatchOutcome) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl DispatchProgress for NoProgress {}
