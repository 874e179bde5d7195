//! `vrms` — report non-free and ambiguously licensed packages on a pacman system.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]).
//! 2. Load config ([`config::load_config`]) and build the reference label sets
//!    ([`license::reference`]).
//! 3. Read every installed package from the local database ([`database`]).
//! 4. Record each package in a [`license::index::LicenseIndex`].
//! 5. Render the requested report ([`report`]).
//! 6. Exit with an [`ExitCode`] reflecting the findings.

mod cli;
mod config;
mod database;
mod license;
mod models;
mod report;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use cli::{Cli, Mode, ReportFormat};
use config::load_config;
use database::pacman::PacmanDb;
use database::PackageDatabase;
use license::index::LicenseIndex;
use license::reference::ReferenceSets;

/// Process exit codes. Invalid arguments exit with `2` from clap itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
enum ExitCode {
    /// Every package is free.
    Clean = 0,
    /// At least one non-free or ambiguously licensed package.
    Flagged = 1,
    /// Config or package database failure.
    ApplicationError = 3,
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = cli.validate() {
        e.exit();
    }

    let code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {:#}", "error:".red().bold(), e);
            ExitCode::ApplicationError
        }
    };

    std::process::exit(code as i32);
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let (config, config_path) = load_config(cli.config.as_deref())?;
    let reference = ReferenceSets::from_config(&config.licenses);
    let cutoff = cli.obscure_cutoff.unwrap_or(config.report.obscure_cutoff);

    if !cli.quiet {
        if let Some(path) = &config_path {
            eprintln!("  {} config {}", "→".cyan(), path.display());
        }
        eprintln!(
            "  {} {} free and {} ambiguous reference licenses",
            "→".cyan(),
            reference.free_count(),
            reference.ambiguous_count()
        );
    }

    let db = PacmanDb::open(&cli.dbpath)
        .with_context(|| format!("Failed to open package database at {}", cli.dbpath.display()))?;

    if db.is_empty() && !cli.quiet {
        eprintln!(
            "  {} no installed packages in {}",
            "⚠".yellow(),
            db.path().display()
        );
    }

    let progress = if cli.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(db.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("#>-"),
        );
        pb.set_message("reading packages");
        pb
    };

    // All entries are read before any is recorded.
    let packages = db.read_packages(&progress)?;
    progress.finish_and_clear();

    if !cli.quiet {
        eprintln!(
            "  {} {} packages in {}",
            "→".cyan(),
            packages.len(),
            db.path().display()
        );
    }

    let mut index = LicenseIndex::new(&reference);
    for package in packages {
        index.record(package);
    }

    match cli.report {
        ReportFormat::Json => report::json::render(&index)?,
        ReportFormat::Terminal => match cli.mode() {
            Mode::NonFree => report::terminal::render_nonfree(&index),
            Mode::Unknowns => report::terminal::render_ambiguous(&index),
            Mode::Licenses => report::terminal::render_license_counts(&index),
            Mode::LicensesAsToml => report::terminal::render_license_list(&index, cutoff),
            Mode::ShowLicense(label) => report::terminal::render_single_license(&index, &label),
        },
    }

    let flagged = index.nonfree_packages().len() + index.ambiguous_packages().len();
    Ok(if flagged > 0 {
        ExitCode::Flagged
    } else {
        ExitCode::Clean
    })
}
