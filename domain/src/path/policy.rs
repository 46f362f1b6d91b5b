//! Path policy — syntactic validation and deny-list classification.
//!
//! Every path-shaped argument coming from the remote model passes through
//! [`PathPolicy`] before any syscall is issued. Two independent checks run:
//!
//! | Check | Question | Failure |
//! |-------|----------|---------|
//! | [`PathPolicy::validate`] | Could this string escape the root? | [`PathError`] |
//! | [`PathPolicy::is_denied`] | Does it name a secret (keys, credentials, VCS internals)? | [`PathViolation::Denied`] |
//!
//! Neither check touches the filesystem. Confinement against symlinks and
//! races is the job of the infrastructure `SecureOpener`; this module only
//! guarantees that no obviously hostile string reaches it.

use super::relative::RelativePath;
use regex::Regex;
use thiserror::Error;

/// Sensitive basenames (matched against the final path component).
const DENY_BASENAMES: &str = r"(?i)^(\.env|\.env\..+|id_rsa|id_rsa\..+|known_hosts|config|credentials|\.npmrc|\.pypirc|\.netrc|secrets|secrets\..+)$";

/// Sensitive extensions (matched against the whole path).
const DENY_EXTENSIONS: &str = r"(?i)\.(pem|key|p12|pfx|cer|crt|der|kdbx|tfstate|tfvars)$";

/// Sensitive directory segments (matched against the whole path).
const DENY_SEGMENTS: &str = r"(?i)(^|/)\.git(/|$)|\.docker/config\.json$";

/// Files this tool reads back on its next run: the project config and the
/// session records at the repository root.
const DENY_TOOL_STATE: &str = r"(?i)^(\.?delegate\.toml|\.codex-sessions(/.*)?)$";

/// Reasons a path string is rejected before any filesystem access.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("invalid path: empty")]
    Empty,

    #[error("invalid path: contains newline or control characters")]
    ControlCharacter,

    #[error("volume paths not allowed")]
    VolumePrefix,

    #[error("absolute paths not allowed")]
    Absolute,

    #[error("home paths not allowed")]
    HomeRelative,

    #[error("parent traversal not allowed")]
    ParentTraversal,

    #[error("invalid path: names no file")]
    NoComponents,
}

/// Outcome of the combined [`PathPolicy::check`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathViolation {
    #[error(transparent)]
    Invalid(#[from] PathError),

    #[error("access denied")]
    Denied,
}

/// Immutable path policy holding the compiled deny-list patterns.
///
/// Build it once at startup and share it by reference; it carries no
/// mutable state.
#[derive(Debug, Clone)]
pub struct PathPolicy {
    deny_basenames: Regex,
    deny_extensions: Regex,
    deny_segments: Regex,
    deny_tool_state: Regex,
}

impl Default for PathPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl PathPolicy {
    pub fn new() -> Self {
        // The patterns are compile-time constants covered by tests.
        Self {
            deny_basenames: Regex::new(DENY_BASENAMES).expect("valid basename pattern"),
            deny_extensions: Regex::new(DENY_EXTENSIONS).expect("valid extension pattern"),
            deny_segments: Regex::new(DENY_SEGMENTS).expect("valid segment pattern"),
            deny_tool_state: Regex::new(DENY_TOOL_STATE).expect("valid tool state pattern"),
        }
    }

    /// Reject path strings that could plausibly escape the repository root.
    ///
    /// Checks run in a fixed order so a given input always yields the same
    /// error: empty, control characters, volume prefix, absolute, `~`,
    /// `..` segment. Both `/` and `\` count as separators.
    pub fn validate(&self, path: &str) -> Result<(), PathError> {
        validate_syntax(path)
    }

    /// Whether the path names something that must never reach the model.
    pub fn is_denied(&self, path: &str) -> bool {
        let normalized = path.replace('\\', "/");
        let base = normalized
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default();

        self.deny_basenames.is_match(base)
            || self.deny_extensions.is_match(&normalized)
            || self.deny_segments.is_match(&normalized)
            || self.deny_tool_state.is_match(normalized.trim_start_matches("./"))
    }

    /// Validate, normalize and deny-check a file path in one step.
    pub fn check(&self, path: &str) -> Result<RelativePath, PathViolation> {
        let relative = RelativePath::parse(path)?;
        if self.is_denied(path) || self.is_denied(relative.as_str()) {
            return Err(PathViolation::Denied);
        }
        Ok(relative)
    }
}

/// Syntax rules shared by [`PathPolicy::validate`] and [`RelativePath::parse`].
pub(crate) fn validate_syntax(path: &str) -> Result<(), PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }
    if path.chars().any(|c| c == '\n' || c == '\r' || c == '\0') {
        return Err(PathError::ControlCharacter);
    }
    if has_volume_prefix(path) {
        return Err(PathError::VolumePrefix);
    }
    if path.starts_with('/') || path.starts_with('\\') {
        return Err(PathError::Absolute);
    }
    if path.starts_with('~') {
        return Err(PathError::HomeRelative);
    }
    if path.split(['/', '\\']).any(|segment| segment == "..") {
        return Err(PathError::ParentTraversal);
    }
    Ok(())
}

/// Drive letters (`C:`) and UNC roots (`\\server`, `//server`).
fn has_volume_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        return true;
    }
    path.starts_with("\\\\") || path.starts_with("//")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_relative_paths() {
        let policy = PathPolicy::new();
        for path in ["src/main.rs", "a/b/new.txt", "./README.md", "src/**/*.ts", "dir/"] {
            assert_eq!(policy.validate(path), Ok(()), "{path}");
        }
    }

    #[test]
    fn rejects_each_hostile_shape_with_distinct_error() {
        let policy = PathPolicy::new();
        assert_eq!(policy.validate(""), Err(PathError::Empty));
        assert_eq!(policy.validate("a\nb"), Err(PathError::ControlCharacter));
        assert_eq!(policy.validate("a\rb"), Err(PathError::ControlCharacter));
        assert_eq!(policy.validate("C:\\Windows"), Err(PathError::VolumePrefix));
        assert_eq!(policy.validate("c:relative"), Err(PathError::VolumePrefix));
        assert_eq!(policy.validate("\\\\server\\share"), Err(PathError::VolumePrefix));
        assert_eq!(policy.validate("//server/share"), Err(PathError::VolumePrefix));
        assert_eq!(policy.validate("/etc/passwd"), Err(PathError::Absolute));
        assert_eq!(policy.validate("\\etc"), Err(PathError::Absolute));
        assert_eq!(policy.validate("~/.ssh/id_rsa"), Err(PathError::HomeRelative));
        assert_eq!(policy.validate("~root"), Err(PathError::HomeRelative));
        assert_eq!(policy.validate("../x"), Err(PathError::ParentTraversal));
        assert_eq!(policy.validate("a/../../x"), Err(PathError::ParentTraversal));
        assert_eq!(policy.validate("a\\..\\x"), Err(PathError::ParentTraversal));
        assert_eq!(policy.validate("a/.."), Err(PathError::ParentTraversal));
    }

    #[test]
    fn dot_dot_inside_a_name_is_not_traversal() {
        let policy = PathPolicy::new();
        assert_eq!(policy.validate("notes..md"), Ok(()));
        assert_eq!(policy.validate("a/..b/c"), Ok(()));
    }

    #[test]
    fn denies_sensitive_basenames() {
        let policy = PathPolicy::new();
        for path in [
            ".env",
            "app/.env.local",
            "id_rsa",
            "keys/id_rsa.pub",
            "known_hosts",
            "config",
            "deploy/credentials",
            ".npmrc",
            ".pypirc",
            ".netrc",
            "secrets",
            "k8s/secrets.yaml",
        ] {
            assert!(policy.is_denied(path), "{path} should be denied");
        }
    }

    #[test]
    fn denies_sensitive_extensions_case_insensitively() {
        let policy = PathPolicy::new();
        for path in [
            "certs/server.pem",
            "tls.KEY",
            "store.p12",
            "store.PFX",
            "ca.cer",
            "ca.crt",
            "ca.der",
            "vault.kdbx",
            "infra/terraform.tfstate",
            "prod.tfvars",
        ] {
            assert!(policy.is_denied(path), "{path} should be denied");
        }
    }

    #[test]
    fn denies_vcs_and_registry_credentials() {
        let policy = PathPolicy::new();
        assert!(policy.is_denied(".git"));
        assert!(policy.is_denied(".git/HEAD"));
        assert!(policy.is_denied("vendor/lib/.git/config"));
        assert!(policy.is_denied("sub\\.git\\HEAD"));
        assert!(policy.is_denied("home/.docker/config.json"));
    }

    #[test]
    fn denies_own_config_and_session_records_at_root() {
        let policy = PathPolicy::new();
        for path in [
            "delegate.toml",
            ".delegate.toml",
            "./Delegate.TOML",
            ".codex-sessions",
            ".codex-sessions/review.json",
            ".codex-sessions/tasks/7.json",
        ] {
            assert!(policy.is_denied(path), "{path} should be denied");
        }
        assert_eq!(policy.check("./delegate.toml"), Err(PathViolation::Denied));
        assert!(!policy.is_denied("docs/delegate.toml"));
        assert!(!policy.is_denied("delegate.toml.md"));
    }

    #[test]
    fn allows_lookalikes() {
        let policy = PathPolicy::new();
        for path in [
            "src/config.rs",
            "environment.md",
            ".gitignore",
            "docs/.github/workflows/ci.yml",
            "keyboard.rs",
            "src/secretsauce.rs",
            "config/app.toml",
        ] {
            assert!(!policy.is_denied(path), "{path} should be allowed");
        }
    }

    #[test]
    fn check_combines_validation_and_deny_list() {
        let policy = PathPolicy::new();
        assert_eq!(
            policy.check("../etc/passwd"),
            Err(PathViolation::Invalid(PathError::ParentTraversal))
        );
        assert_eq!(policy.check(".env"), Err(PathViolation::Denied));
        assert_eq!(policy.check("./.env"), Err(PathViolation::Denied));
        assert_eq!(policy.check("src/lib.rs").unwrap().as_str(), "src/lib.rs");
    }

    #[test]
    fn validation_is_deterministic() {
        let policy = PathPolicy::new();
        for path in ["", "../a", "/a", "~", "ok/path"] {
            assert_eq!(policy.validate(path), policy.validate(path));
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn segment() -> impl Strategy<Value = String> {
            "[a-zA-Z0-9_.-]{1,8}".prop_filter("not traversal", |s| s != "..")
        }

        proptest! {
            #[test]
            fn any_parent_segment_is_rejected(
                before in proptest::collection::vec(segment(), 0..4),
                after in proptest::collection::vec(segment(), 0..4),
            ) {
                let mut parts = before.clone();
                parts.push("..".to_string());
                parts.extend(after);
                let path = parts.join("/");
                prop_assert!(PathPolicy::new().validate(&path).is_err());
            }

            #[test]
            fn leading_root_or_home_is_rejected(
                prefix in prop_oneof![Just("/"), Just("\\"), Just("~"), Just("C:"), Just("//")],
                rest in proptest::collection::vec(segment(), 0..4),
            ) {
                let path = format!("{}{}", prefix, rest.join("/"));
                prop_assert!(PathPolicy::new().validate(&path).is_err());
            }

            #[test]
            fn plain_segments_are_accepted(parts in proptest::collection::vec(segment(), 1..5)) {
                let path = parts.join("/");
                prop_assert!(PathPolicy::new().validate(&path).is_ok());
            }
        }
    }
}
