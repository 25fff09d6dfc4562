//! Command-line argument parsing and validation

use crate::core::copier::DEFAULT_COPY_THREADS;
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Distill Copy - copy the files a set of maps depends on into another tree
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "distill-copy")]
pub struct Args {
    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Parameters forwarded to the GenerateDistillFileSets commandlet
#[derive(ClapArgs, Debug, Clone)]
pub struct DistillArgs {
    /// Project file to load in the editor
    #[arg(long, alias = "ProjectPath", env = "DISTILL_PROJECT_PATH")]
    pub project_path: PathBuf,

    /// Where the commandlet writes its manifest
    #[arg(long, alias = "ManifestFile", env = "DISTILL_MANIFEST_FILE")]
    pub manifest_file: PathBuf,

    /// Editor executable used to run the commandlet
    #[arg(
        long = "ue4-exe",
        alias = "UE4Exe",
        env = "DISTILL_UE4_EXE",
        default_value = "UE4Editor-Cmd"
    )]
    pub ue4_exe: PathBuf,

    /// Maps to distill, separated by '+' or ';'
    #[arg(long, alias = "Maps", env = "DISTILL_MAPS", default_value = "")]
    pub maps: String,

    /// Extra arguments passed through to the commandlet
    #[arg(
        long,
        alias = "Parameters",
        env = "DISTILL_PARAMETERS",
        default_value = "",
        allow_hyphen_values = true
    )]
    pub parameters: String,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the commandlet and copy the distill file set from FromDir to ToDir
    Copy {
        #[command(flatten)]
        distill: DistillArgs,

        /// Root of the source tree the manifest paths live in
        #[arg(long, alias = "FromDir", env = "DISTILL_FROM_DIR")]
        from_dir: PathBuf,

        /// Root of the destination tree
        #[arg(long, alias = "ToDir", env = "DISTILL_TO_DIR")]
        to_dir: PathBuf,

        /// Number of parallel copy workers
        #[arg(long, default_value_t = DEFAULT_COPY_THREADS)]
        threads: usize,

        /// Resolve and log every copy without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Run the commandlet and print the distill file set
    List {
        #[command(flatten)]
        distill: DistillArgs,
    },
}

impl Command {
    /// Commandlet parameters shared by every command
    pub fn distill(&self) -> &DistillArgs {
        match self {
            Command::Copy { distill, .. } | Command::List { distill } => distill,
        }
    }
}

/// Parse command line arguments
pub fn parse_args() -> Args {
    Args::parse()
}
