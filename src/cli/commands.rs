//! Command implementations for the CLI

use crate::{
    cli::Command,
    config::Config,
    core::{DistillCommandlet, PathRemapper, ThreadedCopier},
};
use anyhow::Context;
use std::io::{self, Write};
use tracing::{info, instrument};

/// Execute the appropriate command based on CLI arguments
#[instrument(skip(config))]
pub fn execute_command(config: &Config, command: &Command) -> anyhow::Result<()> {
    match command {
        Command::Copy { .. } => execute_copy_command(config),
        Command::List { .. } => execute_list_command(config),
    }
}

/// Execute the copy command
#[instrument(skip(config))]
fn execute_copy_command(config: &Config) -> anyhow::Result<()> {
    info!(
        "Copying distill file set: {} -> {}",
        config.copy.from_dir.display(),
        config.copy.to_dir.display()
    );

    let file_set = DistillCommandlet::new(config.clone())
        .run()
        .context("Failed to generate distill file set")?;

    let jobs = PathRemapper::new(&config.copy.from_dir, &config.copy.to_dir)
        .remap_all(&file_set.files)
        .context("Failed to map source files into the destination directory")?;

    if config.copy.dry_run {
        for job in &jobs {
            info!(
                "  Would copy: {} -> {}",
                job.source.display(),
                job.destination.display()
            );
        }
        info!("Dry run complete. {} file(s) would be copied", jobs.len());
        return Ok(());
    }

    let summary = ThreadedCopier::new(config.copy.threads)
        .copy_jobs(&jobs)
        .context("Failed to copy distill file set")?;

    info!("{}", summary);
    Ok(())
}

/// Execute the list command
#[instrument(skip(config))]
fn execute_list_command(config: &Config) -> anyhow::Result<()> {
    let file_set = DistillCommandlet::new(config.clone())
        .run()
        .context("Failed to generate distill file set")?;

    let mut stdout = io::stdout().lock();
    for file in &file_set.files {
        writeln!(stdout, "{}", file.display()).context("Failed to write file list")?;
    }

    info!("Listed {} file(s)", file_set.len());
    Ok(())
}
