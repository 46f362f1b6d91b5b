//! Root-confined file opening.
//!
//! On Unix every component below the root is opened with `openat` relative
//! to the descriptor of its parent and with `O_NOFOLLOW`, so a symlink
//! planted anywhere along the path is refused by the kernel instead of
//! followed. Only descriptors are carried from one component to the next;
//! no string path below the root is resolved twice.
//!
//! Other platforms get a `symlink_metadata` walk before a plain open. A
//! race between that check and the open remains; [`ASSURANCE`] reports
//! which variant is compiled in.

use delegate_domain::{RelativePath, ToolError};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// How the final component is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// Existing regular file, read-only
    Read,
    /// Create if missing (0o644), truncate otherwise
    CreateTruncate,
    /// Existing regular file, truncated for rewrite
    Truncate,
}

/// Strength of the confinement guarantee on this platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assurance {
    /// Descriptor-relative walk; symlinks refused atomically by the kernel
    DescriptorRelative,
    /// Check-then-open walk; a concurrent rename can still win the race
    BestEffort,
}

#[cfg(unix)]
pub const ASSURANCE: Assurance = Assurance::DescriptorRelative;

#[cfg(not(unix))]
pub const ASSURANCE: Assurance = Assurance::BestEffort;

/// Failures opening a path below the root.
///
/// Every variant names the root-relative prefix that failed, never the
/// absolute host path.
#[derive(Error, Debug)]
pub enum OpenError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("not a directory: {0}")]
    NotADirectory(String),

    #[error("symlink not followed: {0}")]
    SymlinkRejected(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("not a regular file: {0}")]
    NotARegularFile(String),

    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl From<OpenError> for ToolError {
    fn from(err: OpenError) -> Self {
        match err {
            OpenError::NotFound(path) => ToolError::not_found(path),
            OpenError::NotADirectory(path) => {
                ToolError::invalid_path(format!("not a directory: {}", path))
            }
            OpenError::SymlinkRejected(path) => ToolError::escapes_root(path),
            OpenError::PermissionDenied(path) => ToolError::access_denied(path),
            OpenError::NotARegularFile(path) => ToolError::not_a_regular_file(path),
            OpenError::Io { path, source } => ToolError::io(format!("{}: {}", path, source)),
        }
    }
}

/// An open file known to lie below the root.
#[derive(Debug)]
pub struct SecureFile {
    file: File,
    path: PathBuf,
}

impl SecureFile {
    pub fn file(&self) -> &File {
        &self.file
    }

    pub fn into_file(self) -> File {
        self.file
    }

    /// Joined absolute path, for diagnostics only. Never reopen it.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> io::Result<u64> {
        Ok(self.file.metadata()?.len())
    }
}

/// Opens files below a fixed repository root.
#[derive(Debug, Clone)]
pub struct SecureOpener {
    root: PathBuf,
}

impl SecureOpener {
    /// `root` should already be canonical (see `RepoRoot`).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn open(&self, path: &RelativePath, mode: OpenMode) -> Result<SecureFile, OpenError> {
        open(&self.root, path, mode)
    }

    /// Create the missing parent directories of `path` (0o755).
    pub fn ensure_parents(&self, path: &RelativePath) -> Result<(), OpenError> {
        ensure_parents(&self.root, path)
    }
}

pub fn open(root: &Path, path: &RelativePath, mode: OpenMode) -> Result<SecureFile, OpenError> {
    platform::open(root, path, mode)
}

/// Existing parents must be real directories; missing ones are created.
pub fn ensure_parents(root: &Path, path: &RelativePath) -> Result<(), OpenError> {
    platform::ensure_parents(root, path)
}

fn push_component(shown: &mut String, name: &str) {
    if !shown.is_empty() {
        shown.push('/');
    }
    shown.push_str(name);
}

#[cfg(unix)]
mod platform {
    use super::{OpenError, OpenMode, SecureFile, push_component};
    use delegate_domain::RelativePath;
    use std::ffi::CString;
    use std::fs::File;
    use std::io;
    use std::os::fd::{AsRawFd, FromRawFd, OwnedFd};
    use std::os::unix::ffi::OsStrExt;
    use std::path::Path;

    const DIR_FLAGS: libc::c_int =
        libc::O_RDONLY | libc::O_DIRECTORY | libc::O_NOFOLLOW | libc::O_CLOEXEC;

    pub(super) fn open(
        root: &Path,
        path: &RelativePath,
        mode: OpenMode,
    ) -> Result<SecureFile, OpenError> {
        let dir = walk_parents(root, path, false)?;
        let shown = path.as_str();
        let name = c_name(path.file_name(), shown)?;

        let access = match mode {
            OpenMode::Read => libc::O_RDONLY,
            OpenMode::CreateTruncate => libc::O_WRONLY | libc::O_CREAT | libc::O_TRUNC,
            OpenMode::Truncate => libc::O_WRONLY | libc::O_TRUNC,
        };
        // O_NONBLOCK keeps a FIFO from stalling the open; regular files ignore it.
        let flags = access | libc::O_NOFOLLOW | libc::O_CLOEXEC | libc::O_NONBLOCK;

        // SAFETY: `name` is NUL-terminated and outlives the call; `dir` is open.
        let fd = unsafe {
            libc::openat(dir.as_raw_fd(), name.as_ptr(), flags, 0o644 as libc::c_uint)
        };
        let fd = owned(fd).map_err(|e| classify(e, &dir, &name, shown))?;

        let file = File::from(fd);
        let meta = file.metadata().map_err(|source| OpenError::Io {
            path: shown.to_string(),
            source,
        })?;
        if !meta.is_file() {
            return Err(OpenError::NotARegularFile(shown.to_string()));
        }

        Ok(SecureFile {
            file,
            path: root.join(shown),
        })
    }

    pub(super) fn ensure_parents(root: &Path, path: &RelativePath) -> Result<(), OpenError> {
        walk_parents(root, path, true).map(|_| ())
    }

    /// Descriptor of the directory holding the final component.
    fn walk_parents(root: &Path, path: &RelativePath, create: bool) -> Result<OwnedFd, OpenError> {
        let mut dir = open_root(root)?;
        let mut shown = String::new();

        for name in path.parent_components() {
            push_component(&mut shown, name);
            dir = match open_dir_at(&dir, name, &shown) {
                Ok(next) => next,
                Err(OpenError::NotFound(_)) if create => {
                    make_dir_at(&dir, name, &shown)?;
                    open_dir_at(&dir, name, &shown)?
                }
                Err(e) => return Err(e),
            };
        }
        Ok(dir)
    }

    fn open_root(root: &Path) -> Result<OwnedFd, OpenError> {
        let root_error = |source| OpenError::Io {
            path: ".".to_string(),
            source,
        };
        let c_root = CString::new(root.as_os_str().as_bytes())
            .map_err(|e| root_error(io::Error::new(io::ErrorKind::InvalidInput, e)))?;

        // SAFETY: `c_root` is NUL-terminated and outlives the call.
        let fd = unsafe {
            libc::open(
                c_root.as_ptr(),
                libc::O_RDONLY | libc::O_DIRECTORY | libc::O_CLOEXEC,
            )
        };
        owned(fd).map_err(root_error)
    }

    fn open_dir_at(dir: &OwnedFd, name: &str, shown: &str) -> Result<OwnedFd, OpenError> {
        let c = c_name(name, shown)?;
        // SAFETY: `c` is NUL-terminated and outlives the call; `dir` is open.
        let fd = unsafe { libc::openat(dir.as_raw_fd(), c.as_ptr(), DIR_FLAGS) };
        owned(fd).map_err(|e| classify(e, dir, &c, shown))
    }

    fn make_dir_at(dir: &OwnedFd, name: &str, shown: &str) -> Result<(), OpenError> {
        let c = c_name(name, shown)?;
        // SAFETY: `c` is NUL-terminated and outlives the call; `dir` is open.
        let rc = unsafe { libc::mkdirat(dir.as_raw_fd(), c.as_ptr(), 0o755) };
        if rc == 0 {
            return Ok(());
        }
        let err = io::Error::last_os_error();
        // A concurrent creator won; the re-open with O_NOFOLLOW decides.
        if err.raw_os_error() == Some(libc::EEXIST) {
            return Ok(());
        }
        Err(classify(err, dir, &c, shown))
    }

    fn owned(fd: libc::c_int) -> io::Result<OwnedFd> {
        if fd < 0 {
            return Err(io::Error::last_os_error());
        }
        // SAFETY: `fd` was just returned by the kernel and has no other owner.
        Ok(unsafe { OwnedFd::from_raw_fd(fd) })
    }

    fn c_name(name: &str, shown: &str) -> Result<CString, OpenError> {
        CString::new(name).map_err(|e| OpenError::Io {
            path: shown.to_string(),
            source: io::Error::new(io::ErrorKind::InvalidInput, e),
        })
    }

    /// Map an `openat`/`mkdirat` failure; the errno for a refused symlink
    /// differs between kernels, so the entry itself is inspected.
    fn classify(err: io::Error, dir: &OwnedFd, name: &CString, shown: &str) -> OpenError {
        let shown = shown.to_string();
        match err.raw_os_error() {
            Some(libc::ENOENT) => OpenError::NotFound(shown),
            Some(libc::EACCES) | Some(libc::EPERM) => OpenError::PermissionDenied(shown),
            _ if is_symlink_at(dir, name) => OpenError::SymlinkRejected(shown),
            Some(libc::ELOOP) => OpenError::SymlinkRejected(shown),
            Some(libc::ENOTDIR) => OpenError::NotADirectory(shown),
            Some(libc::EISDIR) | Some(libc::ENXIO) => OpenError::NotARegularFile(shown),
            _ => OpenError::Io {
                path: shown,
                source: err,
            },
        }
    }

    fn is_symlink_at(dir: &OwnedFd, name: &CString) -> bool {
        let mut st = std::mem::MaybeUninit::<libc::stat>::uninit();
        // SAFETY: `name` is NUL-terminated; `st` is only read after success.
        let rc = unsafe {
            libc::fstatat(
                dir.as_raw_fd(),
                name.as_ptr(),
                st.as_mut_ptr(),
                libc::AT_SYMLINK_NOFOLLOW,
            )
        };
        if rc != 0 {
            return false;
        }
        // SAFETY: fstatat succeeded and filled `st`.
        let st = unsafe { st.assume_init() };
        (st.st_mode & libc::S_IFMT) == libc::S_IFLNK
    }
}

#[cfg(not(unix))]
mod platform {
    use super::{OpenError, OpenMode, SecureFile, push_component};
    use delegate_domain::RelativePath;
    use std::fs::{self, OpenOptions};
    use std::io;
    use std::path::{Path, PathBuf};

    pub(super) fn open(
        root: &Path,
        path: &RelativePath,
        mode: OpenMode,
    ) -> Result<SecureFile, OpenError> {
        let target = walk_parents(root, path, false)?.join(path.file_name());
        let shown = path.as_str();

        match fs::symlink_metadata(&target) {
            Ok(meta) if meta.file_type().is_symlink() => {
                return Err(OpenError::SymlinkRejected(shown.to_string()));
            }
            Ok(meta) if !meta.is_file() => {
                return Err(OpenError::NotARegularFile(shown.to_string()));
            }
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound && mode == OpenMode::CreateTruncate => {}
            Err(e) => return Err(map_io(e, shown)),
        }

        let mut options = OpenOptions::new();
        match mode {
            OpenMode::Read => options.read(true),
            OpenMode::CreateTruncate => options.write(true).create(true).truncate(true),
            OpenMode::Truncate => options.write(true).truncate(true),
        };
        let file = options.open(&target).map_err(|e| map_io(e, shown))?;

        Ok(SecureFile { file, path: target })
    }

    pub(super) fn ensure_parents(root: &Path, path: &RelativePath) -> Result<(), OpenError> {
        walk_parents(root, path, true).map(|_| ())
    }

    fn walk_parents(root: &Path, path: &RelativePath, create: bool) -> Result<PathBuf, OpenError> {
        let mut current = root.to_path_buf();
        let mut shown = String::new();

        for name in path.parent_components() {
            push_component(&mut shown, name);
            current.push(name);
            match fs::symlink_metadata(&current) {
                Ok(meta) => check_directory(&meta, &shown)?,
                Err(e) if e.kind() == io::ErrorKind::NotFound && create => {
                    if let Err(e) = fs::create_dir(&current)
                        && e.kind() != io::ErrorKind::AlreadyExists
                    {
                        return Err(map_io(e, &shown));
                    }
                    let meta = fs::symlink_metadata(&current).map_err(|e| map_io(e, &shown))?;
                    check_directory(&meta, &shown)?;
                }
                Err(e) => return Err(map_io(e, &shown)),
            }
        }
        Ok(current)
    }

    fn check_directory(meta: &fs::Metadata, shown: &str) -> Result<(), OpenError> {
        if meta.file_type().is_symlink() {
            return Err(OpenError::SymlinkRejected(shown.to_string()));
        }
        if !meta.is_dir() {
            return Err(OpenError::NotADirectory(shown.to_string()));
        }
        Ok(())
    }

    fn map_io(err: io::Error, shown: &str) -> OpenError {
        match err.kind() {
            io::ErrorKind::NotFound => OpenError::NotFound(shown.to_string()),
            io::ErrorKind::PermissionDenied => OpenError::PermissionDenied(shown.to_string()),
            _ => OpenError::Io {
                path: shown.to_string(),
                source: err,
            },
        }
    }
}
