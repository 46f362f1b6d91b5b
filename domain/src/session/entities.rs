//! Session domain entities

use crate::core::error::DomainError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]{0,63}$").expect("valid identifier pattern")
});

/// Whether `value` is usable as a session name or task id.
///
/// The same rule keeps identifiers safe to use as file names inside the
/// session directory.
pub fn is_valid_identifier(value: &str) -> bool {
    IDENTIFIER.is_match(value)
}

/// Validated session name (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SessionName(String);

impl SessionName {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if is_valid_identifier(&name) {
            Ok(Self(name))
        } else {
            Err(DomainError::InvalidSessionName(name))
        }
    }

    /// Session name for a delegated task (`execute` mode).
    pub fn for_task(task_id: impl Into<String>) -> Result<Self, DomainError> {
        let task_id = task_id.into();
        if is_valid_identifier(&task_id) {
            Ok(Self(task_id))
        } else {
            Err(DomainError::InvalidTaskId(task_id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// File name of the persisted record
    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl TryFrom<String> for SessionName {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SessionName> for String {
    fn from(name: SessionName) -> Self {
        name.0
    }
}

impl std::fmt::Display for SessionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque id of a remote conversation (Value Object)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationHandle(String);

impl ConversationHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ConversationHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Persisted binding of a session to its remote conversation (Entity)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub conversation_id: ConversationHandle,
}

impl SessionRecord {
    pub fn new(conversation_id: ConversationHandle) -> Self {
        Self { conversation_id }
    }

    /// A record naming no conversation is treated as absent.
    pub fn is_usable(&self) -> bool {
        !self.conversation_id.as_str().trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_session_names() {
        for name in ["a", "review-1", "PR_42.v2", "0abc", &"x".repeat(64)] {
            assert!(SessionName::new(name).is_ok(), "{name}");
        }
    }

    #[test]
    fn test_invalid_session_names() {
        for name in ["", "-lead", ".hidden", "a/b", "a b", "../x", &"x".repeat(65), "ünï"] {
            assert_eq!(
                SessionName::new(name),
                Err(DomainError::InvalidSessionName(name.to_string())),
                "{name}"
            );
        }
    }

    #[test]
    fn test_task_id_error_kind() {
        assert_eq!(
            SessionName::for_task("bad id"),
            Err(DomainError::InvalidTaskId("bad id".to_string()))
        );
        assert_eq!(SessionName::for_task("42").unwrap().file_name(), "42.json");
    }

    #[test]
    fn test_record_json_shape() {
        let record = SessionRecord::new(ConversationHandle::new("conv_123"));
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"conversation_id":"conv_123"}"#);

        let back: SessionRecord = serde_json::from_str(&json).unwrap();
        assert!(back.is_usable());
        assert!(!SessionRecord::new(ConversationHandle::new(" ")).is_usable());
    }

    #[test]
    fn test_session_name_deserialize_validates() {
        assert!(serde_json::from_str::<SessionName>(r#""ok-name""#).is_ok());
        assert!(serde_json::from_str::<SessionName>(r#""../nope""#).is_err());
    }
}
