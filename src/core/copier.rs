//! Parallel file copying
//!
//! Copies a list of sources onto a matching list of destinations using a
//! bounded pool of scoped worker threads.

use crate::{
    core::remap::CopyJob,
    error::{DistillError, Result},
    utils::fs::FileSystemUtils,
};
use serde::{Deserialize, Serialize};
use std::{
    path::PathBuf,
    sync::{
        Mutex,
        atomic::{AtomicU64, AtomicUsize, Ordering},
    },
    thread,
};
use tracing::{debug, info, instrument, warn};

/// Default number of copy workers
pub const DEFAULT_COPY_THREADS: usize = 64;

/// Totals for a finished copy
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopySummary {
    /// Files copied
    pub files: usize,
    /// Bytes written
    pub bytes: u64,
}

impl std::fmt::Display for CopySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Copied {} file(s), {} bytes", self.files, self.bytes)
    }
}

struct CopyFailure {
    index: usize,
    error: std::io::Error,
}

/// Copies files in parallel
#[derive(Debug)]
pub struct ThreadedCopier {
    threads: usize,
    fs_utils: FileSystemUtils,
}

impl ThreadedCopier {
    /// Create a copier with at most `threads` workers
    pub fn new(threads: usize) -> Self {
        Self {
            threads: threads.max(1),
            fs_utils: FileSystemUtils::new(),
        }
    }

    /// Copy remapped jobs
    pub fn copy_jobs(&self, jobs: &[CopyJob]) -> Result<CopySummary> {
        let (sources, destinations): (Vec<PathBuf>, Vec<PathBuf>) = jobs
            .iter()
            .map(|job| (job.source.clone(), job.destination.clone()))
            .unzip();
        self.copy_files(&sources, &destinations)
    }

    /// Copy `sources[i]` to `destinations[i]` for every index
    ///
    /// All copies are attempted even after a failure; the error reports how
    /// many failed and carries the first one as its source.
    #[instrument(skip(self, sources, destinations), fields(count = sources.len()))]
    pub fn copy_files(&self, sources: &[PathBuf], destinations: &[PathBuf]) -> Result<CopySummary> {
        if sources.len() != destinations.len() {
            return Err(DistillError::validation(format!(
                "Copy needs one destination per source, got {} sources and {} destinations",
                sources.len(),
                destinations.len()
            )));
        }

        if sources.is_empty() {
            return Ok(CopySummary::default());
        }

        let workers = self.threads.min(sources.len());
        info!("Copying {} file(s) with {} worker(s)", sources.len(), workers);

        let next = AtomicUsize::new(0);
        let copied = AtomicUsize::new(0);
        let bytes = AtomicU64::new(0);
        let failures = Mutex::new(Vec::new());

        thread::scope(|scope| {
            for _ in 0..workers {
                scope.spawn(|| {
                    loop {
                        let index = next.fetch_add(1, Ordering::Relaxed);
                        if index >= sources.len() {
                            break;
                        }

                        let (source, destination) = (&sources[index], &destinations[index]);
                        match self.fs_utils.copy_file(source, destination) {
                            Ok(written) => {
                                copied.fetch_add(1, Ordering::Relaxed);
                                bytes.fetch_add(written, Ordering::Relaxed);
                            }
                            Err(error) => {
                                warn!(
                                    "Failed to copy {} -> {}: {}",
                                    source.display(),
                                    destination.display(),
                                    error
                                );
                                failures
                                    .lock()
                                    .unwrap_or_else(std::sync::PoisonError::into_inner)
                                    .push(CopyFailure { index, error });
                            }
                        }
                    }
                });
            }
        });

        let mut failures = failures
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if !failures.is_empty() {
            let failed = failures.len();
            failures.sort_by_key(|failure| failure.index);
            let first = failures.swap_remove(0);
            return Err(DistillError::copy(
                format!(
                    "{failed} of {} file(s) failed to copy, first: {} -> {}",
                    sources.len(),
                    sources[first.index].display(),
                    destinations[first.index].display()
                ),
                failed,
                Some(Box::new(first.error)),
            ));
        }

        let summary = CopySummary {
            files: copied.into_inner(),
            bytes: bytes.into_inner(),
        };
        debug!("{}", summary);
        Ok(summary)
    }
}

impl Default for ThreadedCopier {
    fn default() -> Self {
        Self::new(DEFAULT_COPY_THREADS)
    }
}
