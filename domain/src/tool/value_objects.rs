//! Tool domain value objects — immutable result and error types
//!
//! These types form the **output side** of the tool pipeline. Every call
//! the model makes produces exactly one [`ToolResult`], which is serialized
//! to JSON and handed back to the model as the call's output.
//!
//! Failures are data: a [`ToolError`] carries a stable [`ToolErrorKind`]
//! code the model can branch on plus a human-readable message.

use serde::{Deserialize, Serialize};

/// Failure taxonomy shared by all tools.
///
/// | Code | Raised when |
/// |------|-------------|
/// | `INVALID_PATH` | Path fails syntactic validation, or a parent is not a directory |
/// | `INVALID_ARGUMENT` | Missing, empty or mistyped argument; malformed call |
/// | `ACCESS_DENIED` | Deny list match, or the OS refused access |
/// | `NOT_FOUND` | File absent, or `old_string` not present |
/// | `NOT_A_REGULAR_FILE` | Target is a directory, device or similar |
/// | `ESCAPES_ROOT` | A symlink component, or a target resolving outside the root |
/// | `LIMIT_EXCEEDED` | Input larger than the tool is willing to process |
/// | `AMBIGUOUS_MATCH` | `old_string` occurs more than once |
/// | `UNKNOWN_TOOL` | The model named a tool outside the active set |
/// | `IO_ERROR` | Any other operating-system failure |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ToolErrorKind {
    InvalidPath,
    InvalidArgument,
    AccessDenied,
    NotFound,
    NotARegularFile,
    EscapesRoot,
    LimitExceeded,
    AmbiguousMatch,
    UnknownTool,
    IoError,
}

impl ToolErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolErrorKind::InvalidPath => "INVALID_PATH",
            ToolErrorKind::InvalidArgument => "INVALID_ARGUMENT",
            ToolErrorKind::AccessDenied => "ACCESS_DENIED",
            ToolErrorKind::NotFound => "NOT_FOUND",
            ToolErrorKind::NotARegularFile => "NOT_A_REGULAR_FILE",
            ToolErrorKind::EscapesRoot => "ESCAPES_ROOT",
            ToolErrorKind::LimitExceeded => "LIMIT_EXCEEDED",
            ToolErrorKind::AmbiguousMatch => "AMBIGUOUS_MATCH",
            ToolErrorKind::UnknownTool => "UNKNOWN_TOOL",
            ToolErrorKind::IoError => "IO_ERROR",
        }
    }
}

impl std::fmt::Display for ToolErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error that occurred during tool execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    /// Stable error code
    #[serde(rename = "code")]
    pub kind: ToolErrorKind,
    /// Human-readable error message
    pub message: String,
}

impl ToolError {
    pub fn new(kind: ToolErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind.as_str()
    }

    // Common error constructors
    pub fn invalid_path(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidPath, message)
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::InvalidArgument, message)
    }

    pub fn access_denied(path: impl Into<String>) -> Self {
        Self::new(
            ToolErrorKind::AccessDenied,
            format!("access denied: {}", path.into()),
        )
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::NotFound, format!("not found: {}", what.into()))
    }

    pub fn not_a_regular_file(path: impl Into<String>) -> Self {
        Self::new(
            ToolErrorKind::NotARegularFile,
            format!("not a regular file: {}", path.into()),
        )
    }

    pub fn escapes_root(path: impl Into<String>) -> Self {
        Self::new(
            ToolErrorKind::EscapesRoot,
            format!("path escapes repository root: {}", path.into()),
        )
    }

    pub fn limit_exceeded(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::LimitExceeded, message)
    }

    pub fn ambiguous_match(occurrences: usize) -> Self {
        Self::new(
            ToolErrorKind::AmbiguousMatch,
            format!(
                "old_string appears {} times; it must appear exactly once",
                occurrences
            ),
        )
    }

    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::new(
            ToolErrorKind::UnknownTool,
            format!("unknown tool: {}", name.into()),
        )
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::IoError, message)
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

impl std::error::Error for ToolError {}

/// Result of a tool execution, serialized verbatim as the function-call output.
///
/// Successful results carry either a `results` list (Glob, Grep) or
/// `content` text (Read); writes report through [`ToolResultMetadata`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Whether the execution was successful
    #[serde(rename = "ok")]
    pub success: bool,
    /// Name of the tool that was executed
    #[serde(rename = "tool")]
    pub tool_name: String,
    /// Error information (for failed execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
    /// Matched paths or `path:line:text` records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<String>>,
    /// Numbered file content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Number of entries in `results`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Set when a limit cut the output short
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub truncated: bool,
    /// Per-tool details
    #[serde(flatten)]
    pub metadata: ToolResultMetadata,
}

/// Structured metadata about a tool execution.
///
/// | Tool | `path` | `bytes` | `start`/`end` | `replaced`/`with` | `pattern` | `query`/`glob` |
/// |------|:---:|:---:|:---:|:---:|:---:|:---:|
/// | `Glob` | - | - | - | - | yes | - |
/// | `Grep` | - | - | - | - | - | yes |
/// | `Read` | yes | - | yes | - | - | - |
/// | `Write` | yes | yes | - | - | - | - |
/// | `Edit` | yes | yes | - | yes | - | - |
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResultMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Bytes written
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes: Option<usize>,
    /// First line returned by Read (1-based)
    #[serde(rename = "start", skip_serializing_if = "Option::is_none")]
    pub start_line: Option<usize>,
    /// Last line returned by Read (inclusive)
    #[serde(rename = "end", skip_serializing_if = "Option::is_none")]
    pub end_line: Option<usize>,
    /// Byte length of the replaced text (Edit)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replaced: Option<usize>,
    /// Byte length of the replacement text (Edit)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub with: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub glob: Option<String>,
}

impl ToolResult {
    fn empty(tool_name: impl Into<String>, success: bool) -> Self {
        Self {
            success,
            tool_name: tool_name.into(),
            error: None,
            results: None,
            content: None,
            count: None,
            truncated: false,
            metadata: ToolResultMetadata::default(),
        }
    }

    /// Create a successful result with no payload
    pub fn success(tool_name: impl Into<String>) -> Self {
        Self::empty(tool_name, true)
    }

    /// Create a successful result carrying a list of entries
    pub fn with_results(tool_name: impl Into<String>, results: Vec<String>, truncated: bool) -> Self {
        let mut result = Self::empty(tool_name, true);
        result.count = Some(results.len());
        result.results = Some(results);
        result.truncated = truncated;
        result
    }

    /// Create a successful result carrying text content
    pub fn with_content(tool_name: impl Into<String>, content: impl Into<String>) -> Self {
        let mut result = Self::empty(tool_name, true);
        result.content = Some(content.into());
        result
    }

    /// Create a failed result
    pub fn failure(tool_name: impl Into<String>, error: ToolError) -> Self {
        let mut result = Self::empty(tool_name, false);
        result.error = Some(error);
        result
    }

    /// Add metadata to the result
    pub fn with_metadata(mut self, metadata: ToolResultMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Add path metadata
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.metadata.path = Some(path.into());
        self
    }

    /// Mark the output as cut short by a limit
    pub fn truncated(mut self, truncated: bool) -> Self {
        self.truncated = truncated;
        self
    }

    /// Check if execution was successful
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get the error
    pub fn error(&self) -> Option<&ToolError> {
        self.error.as_ref()
    }

    /// JSON text sent back to the model as the call output.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            format!(
                r#"{{"ok":false,"tool":{:?},"error":{{"code":"IO_ERROR","message":"result encoding failed: {}"}}}}"#,
                self.tool_name, e
            )
        })
    }
}
