//! Filesystem confinement: repository root detection and root-relative
//! opening that refuses to follow symlinks.

mod repo_root;
mod secure_open;

pub use repo_root::{RepoRoot, RepoRootError};
pub use secure_open::{
    ASSURANCE, Assurance, OpenError, OpenMode, SecureFile, SecureOpener, ensure_parents, open,
};
