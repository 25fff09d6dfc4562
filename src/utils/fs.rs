//! File system utility functions
//!
//! Provides safe file operations with proper error handling.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, instrument};

/// Utility struct for file system operations
#[derive(Debug)]
pub struct FileSystemUtils;

impl FileSystemUtils {
    /// Create a new file system utilities instance
    pub fn new() -> Self {
        Self
    }

    /// Copy a file over any existing destination, preserving permissions
    ///
    /// Parent directories are created as needed. An existing destination is
    /// removed first, so read-only targets left by a previous copy do not
    /// block the overwrite. Copying a file onto itself is refused before
    /// anything is removed.
    #[instrument(skip(self))]
    pub fn copy_file<P: AsRef<Path> + std::fmt::Debug, Q: AsRef<Path> + std::fmt::Debug>(
        &self,
        src: P,
        dst: Q,
    ) -> io::Result<u64> {
        let src = src.as_ref();
        let dst = dst.as_ref();

        debug!("Copying file: {} -> {}", src.display(), dst.display());

        if self.same_file(src, dst)? {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!(
                    "source and destination are the same file: {}",
                    src.display()
                ),
            ));
        }

        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)?;
        }

        self.remove_file_if_exists(dst)?;

        let bytes_copied = fs::copy(src, dst)?;

        let metadata = fs::metadata(src)?;
        fs::set_permissions(dst, metadata.permissions())?;

        debug!("Successfully copied {} bytes", bytes_copied);
        Ok(bytes_copied)
    }

    /// Create directories recursively
    #[instrument(skip(self))]
    pub fn create_dir_all<P: AsRef<Path> + std::fmt::Debug>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();
        debug!("Creating directory: {}", path.display());
        fs::create_dir_all(path)
    }

    /// Remove a file if it exists
    #[instrument(skip(self))]
    pub fn remove_file_if_exists<P: AsRef<Path> + std::fmt::Debug>(
        &self,
        path: P,
    ) -> io::Result<bool> {
        let path = path.as_ref();

        match fs::remove_file(path) {
            Ok(()) => {
                debug!("Removed file: {}", path.display());
                Ok(true)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("File does not exist: {}", path.display());
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Check if a path exists and is a file
    pub fn is_file<P: AsRef<Path>>(&self, path: P) -> bool {
        path.as_ref().is_file()
    }

    /// Whether two paths name the same existing file, through links included
    ///
    /// Missing paths are never the same file.
    pub fn same_file<P: AsRef<Path>, Q: AsRef<Path>>(&self, a: P, b: Q) -> io::Result<bool> {
        let (a, b) = (a.as_ref(), b.as_ref());
        let (meta_a, meta_b) = match (fs::metadata(a), fs::metadata(b)) {
            (Ok(meta_a), Ok(meta_b)) => (meta_a, meta_b),
            (Err(e), _) | (_, Err(e)) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            (Err(e), _) | (_, Err(e)) => return Err(e),
        };

        #[cfg(unix)]
        {
            use std::os::unix::fs::MetadataExt;
            Ok(meta_a.dev() == meta_b.dev() && meta_a.ino() == meta_b.ino())
        }

        #[cfg(not(unix))]
        {
            let _ = (meta_a, meta_b);
            Ok(fs::canonicalize(a)? == fs::canonicalize(b)?)
        }
    }

    /// Absolute form of `path` with `.` and `..` folded, links left unresolved
    ///
    /// Does not touch the file system beyond reading the current directory
    /// for relative input.
    #[instrument(skip(self))]
    pub fn normalize<P: AsRef<Path> + std::fmt::Debug>(&self, path: P) -> io::Result<PathBuf> {
        let absolute = std::path::absolute(path.as_ref())?;

        let mut normalized = PathBuf::new();
        for component in absolute.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    if !matches!(
                        normalized.components().next_back(),
                        Some(Component::RootDir | Component::Prefix(_)) | None
                    ) {
                        normalized.pop();
                    }
                }
                other => normalized.push(other.as_os_str()),
            }
        }
        Ok(normalized)
    }

    /// Read file contents as string
    #[instrument(skip(self))]
    pub fn read_file_to_string<P: AsRef<Path> + std::fmt::Debug>(
        &self,
        path: P,
    ) -> io::Result<String> {
        let path = path.as_ref();
        debug!("Reading file: {}", path.display());
        fs::read_to_string(path)
    }
}

impl Default for FileSystemUtils {
    fn default() -> Self {
        Self::new()
    }
}
