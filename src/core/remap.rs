//! Source to destination path remapping

use crate::error::{DistillError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::instrument;

/// A single planned copy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyJob {
    /// File in the source tree
    pub source: PathBuf,
    /// Same relative location in the destination tree
    pub destination: PathBuf,
}

/// Maps paths under one root onto the same relative paths under another
#[derive(Debug, Clone)]
pub struct PathRemapper {
    from_dir: PathBuf,
    to_dir: PathBuf,
}

impl PathRemapper {
    /// Create a remapper between two directory roots
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(from_dir: P, to_dir: Q) -> Self {
        Self {
            from_dir: from_dir.into(),
            to_dir: to_dir.into(),
        }
    }

    /// Destination for `source`, which must live under the source root
    pub fn remap(&self, source: &Path) -> Result<PathBuf> {
        let relative = source
            .strip_prefix(&self.from_dir)
            .map_err(|_| DistillError::remap(source, &self.from_dir))?;
        Ok(self.to_dir.join(relative))
    }

    /// One job per source, in the same order
    #[instrument(skip(self, sources), fields(count = sources.len()))]
    pub fn remap_all(&self, sources: &[PathBuf]) -> Result<Vec<CopyJob>> {
        sources
            .iter()
            .map(|source| {
                Ok(CopyJob {
                    destination: self.remap(source)?,
                    source: source.clone(),
                })
            })
            .collect()
    }
}
