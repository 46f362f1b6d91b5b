//! Terminal progress for dispatch runs
//!
//! Model text streams to stdout as it arrives; tool activity goes to stderr
//! so stdout carries only what the model said.

use crate::output::console::ConsoleFormatter;
use colored::Colorize;
use delegate_application::DispatchProgress;
use delegate_domain::ToolResult;
use std::io::Write;
use std::sync::Mutex;
use tracing::info;

/// Progress reporter writing to the process's stdout and stderr.
pub struct ConsoleProgress {
    verbose: bool,
    /// Arguments of the call in flight; echoed once the call has run
    pending_args: Mutex<Option<String>>,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self {
            verbose: false,
            pending_args: Mutex::new(None),
        }
    }

    /// Also print turn headers and failed tool calls
    pub fn verbose() -> Self {
        Self {
            verbose: true,
            ..Self::new()
        }
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatchProgress for ConsoleProgress {
    fn on_turn_start(&self, turn: usize, max_turns: usize) {
        info!("Turn {}/{}", turn, max_turns);
        if self.verbose {
            eprintln!("{} turn {}/{}", "->".cyan(), turn, max_turns);
        }
    }

    fn on_model_text(&self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = stdout.write_all(text.as_bytes());
        let _ = stdout.flush();
    }

    fn on_tool_call(&self, _tool_name: &str, arguments: &str) {
        if let Ok(mut pending) = self.pending_args.lock() {
            *pending = Some(arguments.to_string());
        }
    }

    fn on_tool_result(&self, tool_name: &str, result: &ToolResult) {
        let arguments = self
            .pending_args
            .lock()
            .ok()
            .and_then(|mut pending| pending.take())
            .unwrap_or_default();
        eprintln!("{}", ConsoleFormatter::tool_call(tool_name, &arguments));

        if self.verbose
            && let Some(error) = result.error()
        {
            eprintln!("{}", ConsoleFormatter::tool_failure(tool_name, error));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_args_are_consumed_by_result() {
        let progress = ConsoleProgress::new();
        progress.on_tool_call("Read", r#"{"path":"a"}"#);
        assert_eq!(
            progress.pending_args.lock().unwrap().as_deref(),
            Some(r#"{"path":"a"}"#)
        );

        progress.on_tool_result("Read", &ToolResult::success("Read"));
        assert!(progress.pending_args.lock().unwrap().is_none());
    }
}
