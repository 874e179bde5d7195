//! Package database readers.
//!
//! A reader hands over every installed package up front, so any failure is
//! reported before classification starts.

use std::path::PathBuf;

use indicatif::ProgressBar;
use thiserror::Error;

use crate::models::Package;

pub mod pacman;

pub trait PackageDatabase {
    /// Read every installed package, ticking `progress` once per entry.
    fn read_packages(&self, progress: &ProgressBar) -> Result<Vec<Package>, DatabaseError>;
}

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("package database not found: {path}\n\nHint: pass the pacman database directory with --dbpath")]
    NotFound { path: PathBuf },

    #[error("failed to read package database entry: {path}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed package database entry: {path}\nReason: {reason}")]
    Malformed { path: PathBuf, reason: String },

    #[error("unsupported local database version {found} in {path} (expected {expected})")]
    UnsupportedVersion {
        path: PathBuf,
        found: String,
        expected: &'static str,
    },
}
