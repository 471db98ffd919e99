use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use tf_migrate::context::{Severity, TransformationContext};
use tf_migrate::migrators;
use tf_migrate::pipeline::{config_pipeline, state_pipeline, Pipeline};
use tf_migrate::registry::Registry;

/// tf-migrate — offline, deterministic migrator for HCL configuration and
/// JSON state between provider schema versions.
#[derive(Parser)]
#[command(name = "tf-migrate", version, about, long_about = None)]
struct Cli {
    /// Enable verbose (debug-level) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Walk a directory and migrate every .tf and .tfstate file in place
    Migrate {
        /// File or directory to migrate
        path: PathBuf,

        /// Source schema version
        #[arg(long)]
        source_version: u32,

        /// Target schema version
        #[arg(long)]
        target_version: u32,

        /// Run the transformation but do not write output
        #[arg(long)]
        dry_run: bool,

        /// Migrate only .tf configuration files
        #[arg(long, conflicts_with = "state_only")]
        config_only: bool,

        /// Migrate only .tfstate state files
        #[arg(long, conflicts_with = "config_only")]
        state_only: bool,
    },

    /// List every registered migrator, optionally filtered to one
    /// (source, target) version pair
    ListMigrators {
        #[arg(long)]
        source_version: Option<u32>,

        #[arg(long)]
        target_version: Option<u32>,
    },
}

fn build_registry() -> Result<Registry> {
    let mut registry = Registry::new();
    migrators::register_all(&mut registry).context("registering migrators")?;
    Ok(registry)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Migrate {
            ref path,
            source_version,
            target_version,
            dry_run,
            config_only,
            state_only,
        } => cmd_migrate(path, source_version, target_version, dry_run, config_only, state_only),
        Commands::ListMigrators {
            source_version,
            target_version,
        } => cmd_list_migrators(source_version, target_version),
    }
}

fn cmd_list_migrators(source_version: Option<u32>, target_version: Option<u32>) -> Result<()> {
    let registry = build_registry()?;
    match (source_version, target_version) {
        (Some(source), Some(target)) => {
            for strategy in registry.list(source, target, None) {
                println!("{} {} ({source} -> {target})", "*".green(), strategy.target_kind());
            }
        }
        _ => {
            for kind in registry.known_kinds() {
                println!("{} {kind}", "*".green());
            }
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn cmd_migrate(
    path: &Path,
    source_version: u32,
    target_version: u32,
    dry_run: bool,
    config_only: bool,
    state_only: bool,
) -> Result<()> {
    if target_version <= source_version {
        bail!("target-version must be greater than source-version");
    }

    let registry = Arc::new(build_registry()?);
    let files = discover_files(path, config_only, state_only)?;
    if files.is_empty() {
        println!("{}", "No .tf or .tfstate files found.".yellow());
        return Ok(());
    }

    let outcomes: Vec<Result<FileOutcome>> = files
        .par_iter()
        .map(|file| migrate_file(file, &registry, source_version, target_version, dry_run))
        .collect();

    let mut had_errors = false;
    for outcome in outcomes {
        match outcome {
            Ok(outcome) => {
                for diagnostic in &outcome.diagnostics {
                    let marker = match diagnostic.severity {
                        Severity::Error => "x".red().bold(),
                        Severity::Warning => "!".yellow().bold(),
                    };
                    println!("  {marker} {}: {}", outcome.filename.dimmed(), diagnostic.message);
                    if diagnostic.severity == Severity::Error {
                        had_errors = true;
                    }
                }
                if outcome.diagnostics.is_empty() {
                    println!("{} {}", "\u{2713}".green(), outcome.filename);
                }
            }
            Err(err) => {
                had_errors = true;
                eprintln!("{} {err:#}", "x".red().bold());
            }
        }
    }

    if had_errors {
        bail!("migration completed with errors");
    }
    Ok(())
}

struct FileOutcome {
    filename: String,
    diagnostics: Vec<tf_migrate::context::Diagnostic>,
}

fn discover_files(path: &Path, config_only: bool, state_only: bool) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let p = entry.path();
        let is_config = p.extension().is_some_and(|e| e == "tf");
        let is_state = p.extension().is_some_and(|e| e == "tfstate");
        if (is_config && !state_only) || (is_state && !config_only) {
            files.push(p.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

fn migrate_file(
    path: &Path,
    registry: &Registry,
    source_version: u32,
    target_version: u32,
    dry_run: bool,
) -> Result<FileOutcome> {
    let content = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let filename = path.display().to_string();
    let is_state = path.extension().is_some_and(|e| e == "tfstate");

    let mut ctx = TransformationContext::new(
        content,
        filename.clone(),
        source_version,
        target_version,
        registry.known_kinds(),
    );

    let pipeline: Pipeline = if is_state { state_pipeline() } else { config_pipeline() };
    let run_result = pipeline.run(&mut ctx, registry);

    if run_result.is_ok() && !dry_run {
        if let Some(bytes) = ctx.output.clone() {
            fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
        }
    }

    run_result.with_context(|| format!("migrating {filename}"))?;

    Ok(FileOutcome {
        filename,
        diagnostics: ctx.diagnostics.iter().cloned().collect(),
    })
}
