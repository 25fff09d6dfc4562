//! Error types for distill copy
//!
//! Provides structured error handling with context and proper error chains.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for distill copy
#[derive(Error, Debug)]
pub enum DistillError {
    /// The commandlet process ran but reported failure
    #[error("Commandlet error: {message} (log: {log_file})")]
    Commandlet {
        message: String,
        log_file: PathBuf,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The manifest is missing, empty, or names files that do not exist
    #[error("Manifest error: {message}")]
    Manifest { message: String, path: PathBuf },

    /// A source path could not be mapped into the destination tree
    #[error("Remap error: {path} is not under {from_dir}")]
    Remap { path: PathBuf, from_dir: PathBuf },

    /// One or more file copies failed
    #[error("Copy error: {message}")]
    Copy {
        message: String,
        failed: usize,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// File system operation errors
    #[error("File system error: {operation} failed on {path}")]
    FileSystem {
        operation: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Process execution errors
    #[error("Process error: {command} failed (exit code: {exit_code:?})")]
    Process {
        command: String,
        exit_code: Option<i32>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl DistillError {
    /// Create a new commandlet error, keeping the underlying failure as source
    pub fn commandlet<P: Into<PathBuf>>(
        message: impl Into<String>,
        log_file: P,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Commandlet {
            message: message.into(),
            log_file: log_file.into(),
            source,
        }
    }

    /// Create a new manifest error
    pub fn manifest<P: Into<PathBuf>>(message: impl Into<String>, path: P) -> Self {
        Self::Manifest {
            message: message.into(),
            path: path.into(),
        }
    }

    /// Create a new remap error
    pub fn remap<P: Into<PathBuf>, Q: Into<PathBuf>>(path: P, from_dir: Q) -> Self {
        Self::Remap {
            path: path.into(),
            from_dir: from_dir.into(),
        }
    }

    /// Create a new copy error
    pub fn copy(
        message: impl Into<String>,
        failed: usize,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::Copy {
            message: message.into(),
            failed,
            source,
        }
    }

    /// Create a new file system error
    pub fn file_system<P: Into<PathBuf>>(
        operation: impl Into<String>,
        path: P,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }

    /// Create a new process error; `source` is set when the process could not start
    pub fn process(
        command: impl Into<String>,
        exit_code: Option<i32>,
        source: Option<std::io::Error>,
    ) -> Self {
        Self::Process {
            command: command.into(),
            exit_code,
            source,
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DistillError>;
