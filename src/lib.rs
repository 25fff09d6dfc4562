//! # Distill Copy
//!
//! Copies the set of files a project's maps depend on from one directory tree
//! to another. The file set is computed by the editor's
//! `GenerateDistillFileSets` commandlet, which writes a manifest of absolute
//! source paths.
//!
//! ## Features
//!
//! - Map list parsing (`+` or `;` separated)
//! - Commandlet invocation with a timestamped log file
//! - Manifest validation (every listed file must exist)
//! - Source to destination remapping that preserves relative layout
//! - Parallel copy with a bounded worker pool
//!
//! ## Example
//!
//! ```no_run
//! use distill_copy::core::{PathRemapper, ThreadedCopier};
//! use std::path::PathBuf;
//!
//! let remapper = PathRemapper::new("/build/Cooked", "/stage/Cooked");
//! let jobs = remapper.remap_all(&[PathBuf::from("/build/Cooked/Maps/Entry.umap")])?;
//! let summary = ThreadedCopier::new(8).copy_jobs(&jobs)?;
//! println!("{summary}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod utils;

use anyhow::Result;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging with appropriate verbosity
pub fn setup_logging(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_level(true)
                .compact(),
        )
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}
