//! Validated repository-relative path.

use super::policy::{PathError, validate_syntax};
use std::fmt;

/// A path that passed syntactic validation and was normalized to
/// `/`-separated components with no empty or `.` segments.
///
/// Holding a `RelativePath` means the string can be walked component by
/// component below a root; it says nothing about what exists on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RelativePath {
    normalized: String,
}

impl RelativePath {
    /// Validate and normalize. Both `/` and `\` separate segments.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        validate_syntax(path)?;

        let components: Vec<&str> = path
            .split(['/', '\\'])
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .collect();

        if components.is_empty() {
            return Err(PathError::NoComponents);
        }

        Ok(Self {
            normalized: components.join("/"),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.normalized
    }

    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.normalized.split('/')
    }

    /// Final component.
    pub fn file_name(&self) -> &str {
        self.normalized
            .rsplit('/')
            .next()
            .unwrap_or(&self.normalized)
    }

    /// Every component except the last, in order.
    pub fn parent_components(&self) -> Vec<&str> {
        let mut parts: Vec<&str> = self.components().collect();
        parts.pop();
        parts
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized)
    }
}

impl AsRef<str> for RelativePath {
    fn as_ref(&self) -> &str {
        &self.normalized
    }
}
