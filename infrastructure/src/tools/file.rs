//! File operation tools: Read, Write, Edit
//!
//! Every path goes through [`ToolContext::check_path`] and then the secure
//! opener; nothing here resolves a path string against the filesystem
//! directly.

use super::context::ToolContext;
use crate::fs::OpenMode;
use delegate_domain::tool::{
    entities::{ParamType, RiskLevel, ToolCall, ToolDefinition, ToolParameter},
    value_objects::{ToolError, ToolErrorKind, ToolResult, ToolResultMetadata},
};
use std::io::{BufRead, BufReader, Read, Write};

/// Tool name constants
pub const READ: &str = "Read";
pub const WRITE: &str = "Write";
pub const EDIT: &str = "Edit";

/// Get the tool definition for Read
pub fn read_definition() -> ToolDefinition {
    ToolDefinition::new(
        READ,
        "Read a file snippet by line range (relative path).",
        RiskLevel::Low,
    )
    .with_parameter(ToolParameter::new(
        "path",
        "Relative file path from repo root.",
        true,
    ))
    .with_parameter(
        ToolParameter::new("start_line", "1-based start line. Default 1.", false)
            .with_type(ParamType::Integer),
    )
    .with_parameter(
        ToolParameter::new("end_line", "1-based end line (inclusive).", false)
            .with_type(ParamType::Integer),
    )
    .with_parameter(
        ToolParameter::new("max_lines", "Max lines to return (<=400). Default 400.", false)
            .with_type(ParamType::Integer),
    )
}

/// Get the tool definition for Write
pub fn write_definition() -> ToolDefinition {
    ToolDefinition::new(
        WRITE,
        "Create or overwrite a file with content. Creates parent directories if needed.",
        RiskLevel::High,
    )
    .with_parameter(ToolParameter::new(
        "path",
        "Relative file path from repo root.",
        true,
    ))
    .with_parameter(ToolParameter::new(
        "content",
        "Full file content to write.",
        true,
    ))
}

/// Get the tool definition for Edit
pub fn edit_definition() -> ToolDefinition {
    ToolDefinition::new(
        EDIT,
        "Edit a file by replacing exact string match. Old string must appear exactly once.",
        RiskLevel::High,
    )
    .with_parameter(ToolParameter::new(
        "path",
        "Relative file path from repo root.",
        true,
    ))
    .with_parameter(ToolParameter::new(
        "old_string",
        "Exact string to replace (must be unique in file).",
        true,
    ))
    .with_parameter(ToolParameter::new(
        "new_string",
        "New string to replace with.",
        true,
    ))
}

/// Inclusive 1-based line span for a Read call.
fn line_span(call: &ToolCall, max_lines: usize) -> (usize, usize) {
    let start = call.get_positive("start_line").unwrap_or(1);
    let last_allowed = start.saturating_add(max_lines - 1);
    let end = call
        .get_positive("end_line")
        .unwrap_or(last_allowed)
        .max(start)
        .min(last_allowed);
    (start, end)
}

/// Execute the Read tool
pub fn execute_read(ctx: &ToolContext, call: &ToolCall) -> ToolResult {
    let raw_path = match call.require_string("path") {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(READ, e),
    };
    let path = match ctx.check_path(raw_path) {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(READ, e),
    };
    let (start, end) = line_span(call, ctx.limits().read_lines(call.get_positive("max_lines")));

    let file = match ctx.opener().open(&path, OpenMode::Read) {
        Ok(f) => f,
        Err(e) => return ToolResult::failure(READ, e.into()),
    };

    let max_line = ctx.limits().max_line_bytes;
    let mut reader = BufReader::new(file.into_file());
    let mut buf = Vec::new();
    let mut lines = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let read = (&mut reader)
            .take(max_line as u64 + 2)
            .read_until(b'\n', &mut buf);
        match read {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                return ToolResult::failure(READ, ToolError::io(format!("{}: {}", path, e)));
            }
        }
        line_no += 1;

        let line = buf.strip_suffix(b"\n").unwrap_or(&buf[..]);
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if line.len() > max_line {
            return ToolResult::failure(
                READ,
                ToolError::limit_exceeded(format!(
                    "{}: line {} is longer than {} bytes",
                    path, line_no, max_line
                )),
            );
        }
        if line_no < start {
            continue;
        }
        if line_no > end {
            break;
        }
        lines.push(format!("{:06}\t{}", line_no, String::from_utf8_lossy(line)));
    }

    ToolResult::with_content(READ, lines.join("\n"))
        .with_metadata(ToolResultMetadata {
            start_line: Some(start),
            end_line: Some(end),
            ..Default::default()
        })
        .with_path(path.as_str())
}

/// Execute the Write tool
pub fn execute_write(ctx: &ToolContext, call: &ToolCall) -> ToolResult {
    let (raw_path, content) = match (call.require_string("path"), call.require_string("content")) {
        (Ok(p), Ok(c)) => (p, c),
        (Err(e), _) | (_, Err(e)) => return ToolResult::failure(WRITE, e),
    };
    let path = match ctx.check_path(raw_path) {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(WRITE, e),
    };

    if let Err(e) = ctx.opener().ensure_parents(&path) {
        return ToolResult::failure(WRITE, e.into());
    }
    let file = match ctx.opener().open(&path, OpenMode::CreateTruncate) {
        Ok(f) => f,
        Err(e) => return ToolResult::failure(WRITE, e.into()),
    };
    if let Err(e) = file.into_file().write_all(content.as_bytes()) {
        return ToolResult::failure(WRITE, ToolError::io(format!("{}: {}", path, e)));
    }

    ToolResult::success(WRITE).with_metadata(ToolResultMetadata {
        path: Some(path.to_string()),
        bytes: Some(content.len()),
        ..Default::default()
    })
}

/// Execute the Edit tool
pub fn execute_edit(ctx: &ToolContext, call: &ToolCall) -> ToolResult {
    let args = (
        call.require_string("path"),
        call.require_string("old_string"),
        call.require_string("new_string"),
    );
    let (raw_path, old_string, new_string) = match args {
        (Ok(p), Ok(o), Ok(n)) => (p, o, n),
        (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
            return ToolResult::failure(EDIT, e);
        }
    };
    let path = match ctx.check_path(raw_path) {
        Ok(p) => p,
        Err(e) => return ToolResult::failure(EDIT, e),
    };
    if old_string.is_empty() {
        return ToolResult::failure(
            EDIT,
            ToolError::invalid_argument("old_string must be non-empty"),
        );
    }

    let file = match ctx.opener().open(&path, OpenMode::Read) {
        Ok(f) => f,
        Err(e) => return ToolResult::failure(EDIT, e.into()),
    };
    let mut content = String::new();
    if let Err(e) = file.into_file().read_to_string(&mut content) {
        return ToolResult::failure(EDIT, ToolError::io(format!("{}: read failed: {}", path, e)));
    }

    match content.matches(old_string).count() {
        0 => {
            return ToolResult::failure(
                EDIT,
                ToolError::new(ToolErrorKind::NotFound, "old_string not found in file"),
            );
        }
        1 => {}
        n => return ToolResult::failure(EDIT, ToolError::ambiguous_match(n)),
    }
    let updated = content.replacen(old_string, new_string, 1);

    let file = match ctx.opener().open(&path, OpenMode::Truncate) {
        Ok(f) => f,
        Err(e) => return ToolResult::failure(EDIT, e.into()),
    };
    if let Err(e) = file.into_file().write_all(updated.as_bytes()) {
        return ToolResult::failure(EDIT, ToolError::io(format!("{}: write failed: {}", path, e)));
    }

    ToolResult::success(EDIT).with_metadata(ToolResultMetadata {
        path: Some(path.to_string()),
        replaced: Some(old_string.len()),
        with: Some(new_string.len()),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::RepoRoot;
    use std::fs;
    use tempfile::TempDir;

    fn repo() -> (TempDir, ToolContext) {
        let dir = TempDir::new().unwrap();
        let ctx = ToolContext::new(RepoRoot::at(dir.path()).unwrap());
        (dir, ctx)
    }

    fn numbered(count: usize) -> String {
        (1..=count).map(|n| format!("line {}\n", n)).collect()
    }

    fn code(result: &ToolResult) -> &'static str {
        result.error().expect("expected a failure").code()
    }

    #[test]
    fn read_numbers_lines_with_six_digits() {
        let (dir, ctx) = repo();
        fs::write(dir.path().join("a.txt"), "alpha\r\nbeta\ngamma").unwrap();

        let result = execute_read(&ctx, &ToolCall::new(READ).with_arg("path", "a.txt"));
        assert!(result.is_success());
        assert_eq!(
            result.content.as_deref(),
            Some("000001\talpha\n000002\tbeta\n000003\tgamma")
        );
        assert_eq!(result.metadata.path.as_deref(), Some("a.txt"));
        assert_eq!(result.metadata.start_line, Some(1));
        assert_eq!(result.metadata.end_line, Some(400));
    }

    #[test]
    fn read_respects_line_span() {
        let (dir, ctx) = repo();
        fs::write(dir.path().join("n.txt"), numbered(20)).unwrap();

        let call = ToolCall::new(READ)
            .with_arg("path", "n.txt")
            .with_arg("start_line", 5)
            .with_arg("end_line", 7);
        let result = execute_read(&ctx, &call);
        assert_eq!(
            result.content.as_deref(),
            Some("000005\tline 5\n000006\tline 6\n000007\tline 7")
        );
    }

    #[test]
    fn read_clamps_span_to_max_lines() {
        let (dir, ctx) = repo();
        fs::write(dir.path().join("n.txt"), numbered(20)).unwrap();

        let call = ToolCall::new(READ)
            .with_arg("path", "n.txt")
            .with_arg("start_line", 3)
            .with_arg("end_line", 100)
            .with_arg("max_lines", 2);
        let result = execute_read(&ctx, &call);
        assert_eq!(result.content.as_deref(), Some("000003\tline 3\n000004\tline 4"));
        assert_eq!(result.metadata.end_line, Some(4));
    }

    #[test]
    fn read_end_before_start_reads_one_line() {
        let (dir, ctx) = repo();
        fs::write(dir.path().join("n.txt"), numbered(10)).unwrap();

        let call = ToolCall::new(READ)
            .with_arg("path", "n.txt")
            .with_arg("start_line", 4)
            .with_arg("end_line", 2);
        assert_eq!(
            execute_read(&ctx, &call).content.as_deref(),
            Some("000004\tline 4")
        );
    }

    #[test]
    fn read_failures_are_classified() {
        let (dir, ctx) = repo();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join(".env"), "KEY=1").unwrap();

        let read = |path: &str| execute_read(&ctx, &ToolCall::new(READ).with_arg("path", path));
        assert_eq!(code(&read("missing.txt")), "NOT_FOUND");
        assert_eq!(code(&read("sub")), "NOT_A_REGULAR_FILE");
        assert_eq!(code(&read(".env")), "ACCESS_DENIED");
        assert_eq!(code(&read("../etc/passwd")), "INVALID_PATH");
        assert_eq!(code(&read("/etc/passwd")), "INVALID_PATH");
    }

    #[test]
    fn read_rejects_overlong_lines() {
        let (dir, ctx) = repo();
        let ctx = ctx.with_limits(crate::tools::ToolLimits {
            max_line_bytes: 4,
            ..Default::default()
        });
        fs::write(dir.path().join("wide.txt"), "ok\ntoo wide\n").unwrap();

        let result = execute_read(&ctx, &ToolCall::new(READ).with_arg("path", "wide.txt"));
        assert_eq!(code(&result), "LIMIT_EXCEEDED");
    }

    #[test]
    fn read_keeps_crlf_lines_at_the_width_limit_whole() {
        let (dir, ctx) = repo();
        let ctx = ctx.with_limits(crate::tools::ToolLimits {
            max_line_bytes: 4,
            ..Default::default()
        });
        fs::write(dir.path().join("crlf.txt"), "abcd\r\nnext\r\nlast\r\n").unwrap();

        let result = execute_read(&ctx, &ToolCall::new(READ).with_arg("path", "crlf.txt"));
        assert_eq!(
            result.content.as_deref(),
            Some("000001\tabcd\n000002\tnext\n000003\tlast")
        );

        fs::write(dir.path().join("wide.txt"), "abcde\r\n").unwrap();
        let result = execute_read(&ctx, &ToolCall::new(READ).with_arg("path", "wide.txt"));
        assert_eq!(code(&result), "LIMIT_EXCEEDED");
    }

    #[test]
    fn write_creates_parents_and_reports_bytes() {
        let (dir, ctx) = repo();
        let call = ToolCall::new(WRITE)
            .with_arg("path", "a/b/new.txt")
            .with_arg("content", "hello\n");

        let result = execute_write(&ctx, &call);
        assert!(result.is_success(), "{:?}", result.error());
        assert_eq!(result.metadata.bytes, Some(6));
        assert_eq!(
            fs::read_to_string(dir.path().join("a/b/new.txt")).unwrap(),
            "hello\n"
        );
    }

    #[test]
    fn write_then_read_round_trips() {
        let (_dir, ctx) = repo();
        execute_write(
            &ctx,
            &ToolCall::new(WRITE)
                .with_arg("path", "notes.md")
                .with_arg("content", "one\ntwo\n"),
        );
        let result = execute_read(&ctx, &ToolCall::new(READ).with_arg("path", "notes.md"));
        assert_eq!(result.content.as_deref(), Some("000001\tone\n000002\ttwo"));
    }

    #[test]
    fn write_refuses_denied_paths() {
        let (dir, ctx) = repo();
        let call = ToolCall::new(WRITE)
            .with_arg("path", "deploy/id_rsa")
            .with_arg("content", "x");
        assert_eq!(code(&execute_write(&ctx, &call)), "ACCESS_DENIED");
        assert!(!dir.path().join("deploy").exists());
    }

    #[test]
    fn edit_replaces_a_unique_occurrence() {
        let (dir, ctx) = repo();
        fs::write(dir.path().join("f.rs"), "let x = 1;\nlet y = 2;\n").unwrap();

        let call = ToolCall::new(EDIT)
            .with_arg("path", "f.rs")
            .with_arg("old_string", "y = 2")
            .with_arg("new_string", "y = 20");
        let result = execute_edit(&ctx, &call);
        assert!(result.is_success(), "{:?}", result.error());
        assert_eq!(result.metadata.replaced, Some(5));
        assert_eq!(result.metadata.with, Some(6));
        assert_eq!(
            fs::read_to_string(dir.path().join("f.rs")).unwrap(),
            "let x = 1;\nlet y = 20;\n"
        );
    }

    #[test]
    fn edit_requires_exactly_one_match() {
        let (dir, ctx) = repo();
        fs::write(dir.path().join("f.txt"), "a a").unwrap();
        let edit = |old: &str| {
            execute_edit(
                &ctx,
                &ToolCall::new(EDIT)
                    .with_arg("path", "f.txt")
                    .with_arg("old_string", old)
                    .with_arg("new_string", "b"),
            )
        };

        let ambiguous = edit("a");
        assert_eq!(code(&ambiguous), "AMBIGUOUS_MATCH");
        assert!(ambiguous.error().unwrap().message.contains("2 times"));
        assert_eq!(code(&edit("zzz")), "NOT_FOUND");
        assert_eq!(code(&edit("")), "INVALID_ARGUMENT");
        assert_eq!(fs::read_to_string(dir.path().join("f.txt")).unwrap(), "a a");
    }

    #[test]
    fn edit_missing_file_is_not_found() {
        let (_dir, ctx) = repo();
        let call = ToolCall::new(EDIT)
            .with_arg("path", "nope.txt")
            .with_arg("old_string", "a")
            .with_arg("new_string", "b");
        assert_eq!(code(&execute_edit(&ctx, &call)), "NOT_FOUND");
    }

    #[cfg(unix)]
    #[test]
    fn write_through_symlinked_directory_escapes_nothing() {
        let (dir, ctx) = repo();
        let outside = TempDir::new().unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("out")).unwrap();

        let call = ToolCall::new(WRITE)
            .with_arg("path", "out/pwned.txt")
            .with_arg("content", "x");
        assert_eq!(code(&execute_write(&ctx, &call)), "ESCAPES_ROOT");
        assert!(!outside.path().join("pwned.txt").exists());
    }
}
