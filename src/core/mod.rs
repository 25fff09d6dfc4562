//! Core functionality for distill copying
//!
//! Contains the map list parser, the commandlet runner, path remapping and
//! the parallel copier.

pub mod commandlet;
pub mod copier;
pub mod maps;
pub mod remap;

pub use commandlet::{DistillCommandlet, DistillFileSet};
pub use copier::{CopySummary, ThreadedCopier};
pub use maps::parse_map_list;
pub use remap::{CopyJob, PathRemapper};
