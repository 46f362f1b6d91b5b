//! Search tools: Glob, Grep

use super::context::{PRUNED_DIRS, ToolContext};
use crate::fs::OpenMode;
use delegate_domain::RelativePath;
use delegate_domain::tool::{
    entities::{ParamType, RiskLevel, ToolCall, ToolDefinition, ToolParameter},
    value_objects::{ToolError, ToolResult, ToolResultMetadata},
};
use glob::{MatchOptions, Pattern};
use std::io::Read;
use tracing::trace;
use walkdir::WalkDir;

/// Tool name constants
pub const GLOB: &str = "Glob";
pub const GREP: &str = "Grep";

/// `*` stays within one segment; dotfiles match like any other name.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Get the tool definition for Glob
pub fn glob_definition() -> ToolDefinition {
    ToolDefinition::new(
        GLOB,
        "Find repository files matching a glob pattern relative to repo root.",
        RiskLevel::Low,
    )
    .with_parameter(ToolParameter::new(
        "pattern",
        "Glob like src/**/*.ts (relative to repo root)",
        true,
    ))
    .with_parameter(
        ToolParameter::new("max_results", "Max results (<=200). Default 200.", false)
            .with_type(ParamType::Integer),
    )
}

/// Get the tool definition for Grep
pub fn grep_definition() -> ToolDefinition {
    ToolDefinition::new(
        GREP,
        "Search for text in repository files; optionally restrict to a glob.",
        RiskLevel::Low,
    )
    .with_parameter(ToolParameter::new("query", "Search query (text).", true))
    .with_parameter(ToolParameter::new(
        "glob",
        "Optional file glob scope like src/**/*.ts",
        false,
    ))
    .with_parameter(
        ToolParameter::new("max_results", "Max matches (<=200). Default 200.", false)
            .with_type(ParamType::Integer),
    )
}

/// Execute the Glob tool
pub fn execute_glob(ctx: &ToolContext, call: &ToolCall) -> ToolResult {
    let pattern = match call.require_string("pattern") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(GLOB, e),
    };
    if let Err(e) = ctx.policy().validate(pattern) {
        return ToolResult::failure(GLOB, ToolError::invalid_path(e.to_string()));
    }
    let matcher = match Pattern::new(pattern.trim_start_matches("./")) {
        Ok(p) => p,
        Err(e) => {
            return ToolResult::failure(
                GLOB,
                ToolError::invalid_argument(format!("Invalid glob pattern: {}", e)),
            );
        }
    };
    let max_results = ctx.limits().results(call.get_positive("max_results"));

    let mut results = Vec::new();
    let mut truncated = false;

    for relative in repo_files(ctx) {
        if !matcher.matches_with(&relative, MATCH_OPTIONS) {
            continue;
        }
        if results.len() == max_results {
            truncated = true;
            break;
        }
        results.push(relative);
    }

    ToolResult::with_results(GLOB, results, truncated).with_metadata(ToolResultMetadata {
        pattern: Some(pattern.to_string()),
        ..Default::default()
    })
}

/// Execute the Grep tool
///
/// Best effort: files that cannot be opened, exceed the size cap or hold
/// an overlong line are skipped (matches already found in them are kept).
pub fn execute_grep(ctx: &ToolContext, call: &ToolCall) -> ToolResult {
    let query = match call.require_string("query") {
        Ok(q) if !q.is_empty() => q,
        Ok(_) => {
            return ToolResult::failure(GREP, ToolError::invalid_argument("query required"));
        }
        Err(e) => return ToolResult::failure(GREP, e),
    };

    let glob_filter = call.get_string("glob").filter(|g| !g.is_empty());
    let filter = match glob_filter {
        Some(raw) => {
            if let Err(e) = ctx.policy().validate(raw) {
                return ToolResult::failure(GREP, ToolError::invalid_path(e.to_string()));
            }
            match Pattern::new(raw.trim_start_matches("./")) {
                Ok(p) => Some(p),
                Err(e) => {
                    return ToolResult::failure(
                        GREP,
                        ToolError::invalid_argument(format!("Invalid glob: {}", e)),
                    );
                }
            }
        }
        None => None,
    };
    let max_results = ctx.limits().results(call.get_positive("max_results"));

    let mut results = Vec::new();
    let mut truncated = false;

    'files: for relative in repo_files(ctx) {
        if let Some(p) = &filter
            && !p.matches_with(&relative, MATCH_OPTIONS)
        {
            continue;
        }
        let Some(bytes) = read_capped(ctx, &relative) else {
            continue;
        };

        for (index, line) in bytes.split(|b| *b == b'\n').enumerate() {
            if line.len() > ctx.limits().max_line_bytes {
                trace!("Grep: skipping rest of {} (line too long)", relative);
                continue 'files;
            }
            let text = String::from_utf8_lossy(line.strip_suffix(b"\r").unwrap_or(line));
            if !text.contains(query) {
                continue;
            }
            if results.len() == max_results {
                truncated = true;
                break 'files;
            }
            results.push(format!("{}:{}:{}", relative, index + 1, text));
        }
    }

    ToolResult::with_results(GREP, results, truncated).with_metadata(ToolResultMetadata {
        query: Some(query.to_string()),
        glob: glob_filter.map(str::to_string),
        ..Default::default()
    })
}

/// Root-relative paths of the regular files below the root, in name order.
///
/// Symlinks are reported as themselves and never followed, so the walk
/// stays inside the root. Pruned directories and denied paths are skipped.
fn repo_files(ctx: &ToolContext) -> impl Iterator<Item = String> + '_ {
    WalkDir::new(ctx.root().path())
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            !(entry.depth() > 0
                && entry.file_type().is_dir()
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| PRUNED_DIRS.contains(&name)))
        })
        .flatten()
        .filter(|entry| entry.file_type().is_file())
        .filter_map(move |entry| ctx.relative_display(entry.path()))
        .filter(move |relative| !ctx.policy().is_denied(relative))
}

/// Whole file through the secure opener, or `None` when it should be skipped.
fn read_capped(ctx: &ToolContext, relative: &str) -> Option<Vec<u8>> {
    let path = RelativePath::parse(relative).ok()?;
    let file = ctx.opener().open(&path, OpenMode::Read).ok()?;
    let cap = ctx.limits().max_grep_file_bytes;
    if file.len().ok()? > cap {
        return None;
    }

    let mut bytes = Vec::new();
    file.into_file()
        .take(cap + 1)
        .read_to_end(&mut bytes)
        .ok()?;
    if bytes.len() as u64 > cap {
        return None;
    }
    Some(bytes)
}
