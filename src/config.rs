//! Configuration management for distill copy
//!
//! Resolves command line arguments into absolute paths and validates them
//! before any process is started.

use crate::{
    cli::{Args, Command},
    core::{copier::DEFAULT_COPY_THREADS, maps::parse_map_list},
    error::DistillError,
    utils::{fs::FileSystemUtils, process::ProcessRunner},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the commandlet that computes the distill file set
pub const DISTILL_COMMANDLET: &str = "GenerateDistillFileSets";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Enable debug logging
    pub debug: bool,
    /// Commandlet invocation settings
    pub commandlet: CommandletConfig,
    /// Copy settings
    pub copy: CopyConfig,
}

/// Commandlet configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandletConfig {
    /// Project file passed as the first editor argument
    pub project_path: PathBuf,
    /// Absolute path of the manifest the commandlet writes
    pub manifest_file: PathBuf,
    /// Editor executable
    pub editor_exe: PathBuf,
    /// Map identifiers to distill
    pub maps: Vec<String>,
    /// Passthrough arguments
    pub parameters: Vec<String>,
    /// Directory receiving the commandlet log
    pub log_dir: PathBuf,
    /// Running on a build machine
    pub build_machine: bool,
}

/// Copy configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopyConfig {
    /// Source tree root, absolute with `.` and `..` folded
    pub from_dir: PathBuf,
    /// Destination tree root, absolute with `.` and `..` folded
    pub to_dir: PathBuf,
    /// Maximum number of copy workers
    pub threads: usize,
    /// Log planned copies instead of performing them
    pub dry_run: bool,
}

impl Default for CommandletConfig {
    fn default() -> Self {
        Self {
            project_path: PathBuf::new(),
            manifest_file: PathBuf::from("Manifest.txt"),
            editor_exe: PathBuf::from("UE4Editor-Cmd"),
            maps: Vec::new(),
            parameters: Vec::new(),
            log_dir: PathBuf::from("Logs"),
            build_machine: false,
        }
    }
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            from_dir: PathBuf::new(),
            to_dir: PathBuf::new(),
            threads: DEFAULT_COPY_THREADS,
            dry_run: false,
        }
    }
}

impl Config {
    /// Create configuration from command line arguments
    pub fn from_args(args: &Args) -> Result<Self, DistillError> {
        let distill = args.command.distill();
        let manifest_file = absolute(&distill.manifest_file)?;
        let log_dir = manifest_file
            .parent()
            .map(|dir| dir.join("Logs"))
            .unwrap_or_else(|| PathBuf::from("Logs"));

        let mut config = Self {
            debug: args.debug,
            commandlet: CommandletConfig {
                project_path: distill.project_path.clone(),
                manifest_file,
                editor_exe: distill.ue4_exe.clone(),
                maps: parse_map_list(&distill.maps),
                parameters: distill
                    .parameters
                    .split_whitespace()
                    .map(str::to_string)
                    .collect(),
                log_dir,
                build_machine: std::env::var("IsBuildMachine").is_ok_and(|v| v.trim() == "1"),
            },
            copy: CopyConfig::default(),
        };

        if let Command::Copy {
            from_dir,
            to_dir,
            threads,
            dry_run,
            ..
        } = &args.command
        {
            config.copy = CopyConfig {
                from_dir: from_dir.clone(),
                to_dir: to_dir.clone(),
                threads: *threads,
                dry_run: *dry_run,
            };
            config.validate_copy()?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate commandlet settings
    pub fn validate(&self) -> Result<(), DistillError> {
        let commandlet = &self.commandlet;

        if !commandlet.project_path.is_file() {
            return Err(DistillError::validation(format!(
                "Project file not found: {}",
                commandlet.project_path.display()
            )));
        }

        if commandlet.manifest_file.file_name().is_none() {
            return Err(DistillError::config(format!(
                "Manifest file needs a full path and file name: {}",
                commandlet.manifest_file.display()
            )));
        }

        let exe = &commandlet.editor_exe;
        let is_bare_name = exe.components().count() == 1 && !exe.is_absolute();
        let found = if is_bare_name {
            ProcessRunner::default().command_exists(&exe.to_string_lossy())
        } else {
            exe.is_file()
        };
        if !found {
            return Err(DistillError::validation(format!(
                "Editor executable not found: {}",
                exe.display()
            )));
        }

        Ok(())
    }

    /// Validate and normalize copy settings
    fn validate_copy(&mut self) -> Result<(), DistillError> {
        let fs_utils = FileSystemUtils::new();

        if !self.copy.from_dir.is_dir() {
            return Err(DistillError::validation(format!(
                "Source directory not found: {}",
                self.copy.from_dir.display()
            )));
        }

        // Manifest entries are normalized the same way, links left in place.
        self.copy.from_dir = fs_utils
            .normalize(&self.copy.from_dir)
            .map_err(|e| DistillError::file_system("normalize", &self.copy.from_dir, e))?;
        self.copy.to_dir = fs_utils
            .normalize(&self.copy.to_dir)
            .map_err(|e| DistillError::file_system("normalize", &self.copy.to_dir, e))?;

        let overlaps = self.copy.from_dir == self.copy.to_dir
            || fs_utils
                .same_file(&self.copy.from_dir, &self.copy.to_dir)
                .map_err(|e| DistillError::file_system("inspect", &self.copy.to_dir, e))?;
        if overlaps {
            return Err(DistillError::validation(format!(
                "Source and destination directories are the same: {} and {}",
                self.copy.from_dir.display(),
                self.copy.to_dir.display()
            )));
        }

        if self.copy.threads == 0 {
            return Err(DistillError::validation(
                "At least one copy thread is required",
            ));
        }

        Ok(())
    }

    /// Directory the commandlet writes the manifest into
    pub fn manifest_dir(&self) -> &Path {
        self.commandlet
            .manifest_file
            .parent()
            .unwrap_or_else(|| Path::new("."))
    }

    /// Get the editor command with the full commandlet argument list
    pub fn get_commandlet_cmd(&self, log_file: &Path) -> (String, Vec<String>) {
        let commandlet = &self.commandlet;
        let manifest_name = commandlet
            .manifest_file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let mut args = vec![
            commandlet.project_path.to_string_lossy().to_string(),
            format!("-run={DISTILL_COMMANDLET}"),
        ];
        args.extend(commandlet.maps.iter().cloned());
        args.push(format!("-OutputFolder={}", self.manifest_dir().display()));
        args.push(format!("-Output={manifest_name}"));
        args.extend(commandlet.parameters.iter().cloned());
        args.push(format!("-abslog={}", log_file.display()));
        args.extend(
            ["-stdout", "-CrashForUAT", "-unattended"]
                .iter()
                .map(|s| (*s).to_string()),
        );

        if commandlet.build_machine {
            args.push("-buildmachine".to_string());
        }
        if self.debug {
            args.push("-AllowStdOutLogVerbosity".to_string());
        }

        (commandlet.editor_exe.to_string_lossy().to_string(), args)
    }
}

fn absolute(path: &Path) -> Result<PathBuf, DistillError> {
    std::path::absolute(path).map_err(|e| DistillError::file_system("resolve", path, e))
}
