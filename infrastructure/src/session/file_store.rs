//! JSON file session store.
//!
//! ```text
//! <dir>/<session>.json   {"conversation_id": "conv_..."}
//! ```

use delegate_application::ports::session_store::{SessionStore, SessionStoreError};
use delegate_domain::{SessionName, SessionRecord};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Session store keeping one JSON record per session under `dir`.
///
/// The directory lives inside the repository by default
/// (`.codex-sessions/`), which the search tools prune.
#[derive(Debug, Clone)]
pub struct JsonSessionStore {
    dir: PathBuf,
}

impl JsonSessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the session directory (and parents) if missing.
    pub fn ensure_dir(&self) -> Result<(), SessionStoreError> {
        create_dir(&self.dir).map_err(|e| io_error(&self.dir, e))
    }

    fn record_path(&self, name: &SessionName) -> PathBuf {
        self.dir.join(name.file_name())
    }
}

#[cfg(unix)]
fn create_dir(dir: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o755).create(dir)
}

#[cfg(not(unix))]
fn create_dir(dir: &Path) -> std::io::Result<()> {
    fs::create_dir_all(dir)
}

fn io_error(path: &Path, e: std::io::Error) -> SessionStoreError {
    SessionStoreError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

impl SessionStore for JsonSessionStore {
    fn load(&self, name: &SessionName) -> Result<Option<SessionRecord>, SessionStoreError> {
        let path = self.record_path(name);
        let data = match fs::read(&path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(&path, e)),
        };

        match serde_json::from_slice::<SessionRecord>(&data) {
            Ok(record) if record.is_usable() => Ok(Some(record)),
            Ok(_) => Ok(None),
            Err(e) => {
                debug!("Ignoring unparseable session record {}: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    fn save(&self, name: &SessionName, record: &SessionRecord) -> Result<(), SessionStoreError> {
        self.ensure_dir()?;
        let path = self.record_path(name);
        let data = serde_json::to_vec_pretty(record)
            .map_err(|e| SessionStoreError::Encode(e.to_string()))?;
        fs::write(&path, data).map_err(|e| io_error(&path, e))?;
        debug!("Saved session {} to {}", name, path.display());
        Ok(())
    }

    fn location(&self) -> String {
        self.dir.display().to_string()
    }
}
