//! GenerateDistillFileSets commandlet invocation
//!
//! Runs the editor with the distill commandlet, then reads and validates the
//! manifest it writes.

use crate::{
    config::{Config, DISTILL_COMMANDLET},
    error::{DistillError, Result},
    utils::{fs::FileSystemUtils, process::ProcessRunner},
};
use chrono::Utc;
use std::{
    collections::HashSet,
    path::{Path, PathBuf},
};
use tracing::{debug, info, instrument};

/// The files a set of maps depends on, in manifest order without duplicates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistillFileSet {
    /// Absolute paths of every listed file, `.` and `..` folded, links kept
    pub files: Vec<PathBuf>,
}

impl DistillFileSet {
    /// Split manifest content into entries, skipping blank lines
    pub fn parse_manifest(content: &str) -> Vec<PathBuf> {
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(PathBuf::from)
            .collect()
    }

    /// Number of files in the set
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the set is empty
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Runs the distill commandlet for a project
pub struct DistillCommandlet {
    config: Config,
    process_runner: ProcessRunner,
    fs_utils: FileSystemUtils,
}

impl DistillCommandlet {
    /// Create a new commandlet runner with the given configuration
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            process_runner: ProcessRunner::new(config.debug),
            fs_utils: FileSystemUtils::new(),
            config,
        }
    }

    /// Run the commandlet and return the validated file set
    #[instrument(skip(self))]
    pub fn run(&self) -> Result<DistillFileSet> {
        let manifest = &self.config.commandlet.manifest_file;
        info!(
            "Generating distill file set for {} map(s) of {}",
            self.config.commandlet.maps.len(),
            self.config.commandlet.project_path.display()
        );

        self.prepare_manifest()?;
        let log_file = self.log_file()?;

        let (cmd, args) = self.config.get_commandlet_cmd(&log_file);
        self.process_runner.run_command(&cmd, &args).map_err(|e| {
            DistillError::commandlet(
                format!("{DISTILL_COMMANDLET} failed"),
                &log_file,
                Some(Box::new(e)),
            )
        })?;

        if !self.fs_utils.is_file(manifest) {
            return Err(DistillError::manifest(
                format!(
                    "{DISTILL_COMMANDLET} did not produce a manifest for {}",
                    self.config.commandlet.project_path.display()
                ),
                manifest,
            ));
        }

        let file_set = self.read_manifest(manifest)?;
        info!("Distill file set contains {} file(s)", file_set.len());
        Ok(file_set)
    }

    /// Create the manifest directory and remove any stale manifest
    fn prepare_manifest(&self) -> Result<()> {
        let manifest = &self.config.commandlet.manifest_file;
        let manifest_dir = self.config.manifest_dir();

        self.fs_utils
            .create_dir_all(manifest_dir)
            .map_err(|e| DistillError::file_system("create directory", manifest_dir, e))?;

        if self
            .fs_utils
            .remove_file_if_exists(manifest)
            .map_err(|e| DistillError::file_system("remove stale manifest", manifest, e))?
        {
            debug!("Removed stale manifest: {}", manifest.display());
        }

        Ok(())
    }

    /// Timestamped log file path, with its directory created
    fn log_file(&self) -> Result<PathBuf> {
        let log_dir = &self.config.commandlet.log_dir;
        self.fs_utils
            .create_dir_all(log_dir)
            .map_err(|e| DistillError::file_system("create directory", log_dir, e))?;

        let stamp = Utc::now().format("%Y.%m.%d-%H.%M.%S");
        Ok(log_dir.join(format!("{DISTILL_COMMANDLET}-{stamp}.txt")))
    }

    /// Read the manifest and resolve every entry to an existing file
    #[instrument(skip(self))]
    pub fn read_manifest(&self, manifest: &Path) -> Result<DistillFileSet> {
        let content = self
            .fs_utils
            .read_file_to_string(manifest)
            .map_err(|e| DistillError::file_system("read", manifest, e))?;

        let entries = DistillFileSet::parse_manifest(&content);
        if entries.is_empty() {
            return Err(DistillError::manifest(
                format!(
                    "{DISTILL_COMMANDLET} for {} did not produce any files",
                    self.config.commandlet.project_path.display()
                ),
                manifest,
            ));
        }

        let mut seen = HashSet::with_capacity(entries.len());
        let mut files = Vec::with_capacity(entries.len());
        for entry in entries {
            if !self.fs_utils.is_file(&entry) {
                return Err(DistillError::manifest(
                    format!(
                        "{DISTILL_COMMANDLET} produced {}, but it doesn't exist",
                        entry.display()
                    ),
                    manifest,
                ));
            }

            let resolved = self
                .fs_utils
                .normalize(&entry)
                .map_err(|e| DistillError::file_system("normalize", &entry, e))?;
            // Two workers must never target the same destination.
            if !seen.insert(resolved.clone()) {
                debug!("Skipping duplicate manifest entry: {}", resolved.display());
                continue;
            }
            debug!("Distill file: {}", resolved.display());
            files.push(resolved);
        }

        Ok(DistillFileSet { files })
    }
}
