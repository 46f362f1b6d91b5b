//! Session store port
//!
//! Maps a caller-chosen [`SessionName`] to the remote conversation it
//! continues, so repeated invocations with the same name resume the same
//! server-side history.

use delegate_domain::{SessionName, SessionRecord};
use thiserror::Error;

/// Errors from persisting session records
#[derive(Error, Debug)]
pub enum SessionStoreError {
    #[error("Session store I/O error at {path}: {message}")]
    Io { path: String, message: String },

    #[error("Session record encoding failed: {0}")]
    Encode(String),
}

/// Port for session persistence
pub trait SessionStore: Send + Sync {
    /// Load the record for `name`.
    ///
    /// A missing, empty or unreadable record is `Ok(None)`: the caller then
    /// starts a fresh conversation.
    fn load(&self, name: &SessionName) -> Result<Option<SessionRecord>, SessionStoreError>;

    /// Persist the record for `name`, replacing any previous one.
    fn save(&self, name: &SessionName, record: &SessionRecord) -> Result<(), SessionStoreError>;

    /// Human-readable location of the store, for diagnostics.
    fn location(&self) -> String;
}
