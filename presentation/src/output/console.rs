//! Console output for delegated runs
//!
//! The bracketed markers (`[TOOL_CALL]`, `[CODEX_COMPLETE]`, `[BLOCKED]`)
//! are parsed by the calling agent and are never colored.

use colored::Colorize;
use delegate_domain::{PromptTemplate, ToolError, truncate_str};

/// Bytes of raw tool arguments echoed in a `[TOOL_CALL]` line
pub const TOOL_ARGS_PREVIEW: usize = 100;

/// Formats run output for the terminal
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// `[TOOL_CALL] Name(<first 100 bytes of args>...)`
    pub fn tool_call(tool_name: &str, arguments: &str) -> String {
        format!(
            "[TOOL_CALL] {}({}...)",
            tool_name,
            truncate_str(arguments, TOOL_ARGS_PREVIEW)
        )
    }

    /// Verbose detail line for a failed tool call
    pub fn tool_failure(tool_name: &str, error: &ToolError) -> String {
        format!(
            "  {} {} {}: {}",
            "x".red(),
            tool_name.bold(),
            error.code().yellow(),
            error.message
        )
    }

    /// Completion line printed after an execute run (leading newline included)
    pub fn completion(turns: usize) -> String {
        format!("\n{}", PromptTemplate::completion_marker(turns))
    }

    pub fn blocked(message: impl std::fmt::Display) -> String {
        format!("[BLOCKED] {}", message)
    }

    /// Diagnostic for a run that hit the turn ceiling
    pub fn ceiling_reached(max_iterations: usize) -> String {
        format!("reached MAX_ITERS={} without completion", max_iterations)
    }

    /// Verbose summary of the conversation a run is using
    pub fn session_summary(session: &str, conversation: &str, resumed: bool) -> String {
        let state = if resumed {
            "resumed".green()
        } else {
            "new".cyan()
        };
        format!(
            "{} {} ({} conversation {})",
            "Session:".cyan().bold(),
            session,
            state,
            conversation.dimmed()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_call_preview_is_truncated() {
        let args = format!(r#"{{"content":"{}"}}"#, "x".repeat(300));
        let line = ConsoleFormatter::tool_call("Write", &args);
        assert!(line.starts_with("[TOOL_CALL] Write({\"content\":\"xxx"));
        assert!(line.ends_with("...)"));
        assert_eq!(line.len(), "[TOOL_CALL] Write(".len() + 100 + "...)".len());
    }

    #[test]
    fn test_short_args_still_get_ellipsis() {
        assert_eq!(
            ConsoleFormatter::tool_call("Read", r#"{"path":"a"}"#),
            r#"[TOOL_CALL] Read({"path":"a"}...)"#
        );
    }

    #[test]
    fn test_markers() {
        assert_eq!(
            ConsoleFormatter::completion(3),
            "\n[CODEX_COMPLETE] Task completed in 3 iterations"
        );
        assert_eq!(
            ConsoleFormatter::blocked("API error: Timeout"),
            "[BLOCKED] API error: Timeout"
        );
        assert_eq!(
            ConsoleFormatter::ceiling_reached(50),
            "reached MAX_ITERS=50 without completion"
        );
    }
}
