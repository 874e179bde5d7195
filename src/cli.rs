use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{ArgGroup, CommandFactory, Parser};

use crate::database::pacman::DEFAULT_DBPATH;

#[derive(Parser, Debug)]
#[command(
    name = "vrms",
    about = "Report non-free and ambiguously licensed packages installed on this system",
    version
)]
#[command(group(
    ArgGroup::new("mode")
        .args(["list_licenses", "list_licenses_as_toml", "list_unknowns", "show_license"])
        .multiple(false)
))]
pub struct Cli {
    /// Pacman database directory
    #[arg(short = 'b', long, value_name = "PATH", default_value = DEFAULT_DBPATH)]
    pub dbpath: PathBuf,

    /// Config file [default: ~/.config/vrms/config.toml, fallback /etc/vrms/config.toml]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report format; json always prints the full summary and takes no listing flag
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// List every license seen, most popular first
    #[arg(short = 'g', long)]
    pub list_licenses: bool,

    /// Print every license seen as TOML array entries for the config file
    #[arg(long)]
    pub list_licenses_as_toml: bool,

    /// List packages whose license needs manual review
    #[arg(short = 'u', long)]
    pub list_unknowns: bool,

    /// List the packages carrying one license label
    #[arg(long, value_name = "LABEL")]
    pub show_license: Option<String>,

    /// Licenses used by fewer packages than this get their packages listed
    /// (overrides the config file)
    #[arg(long, value_name = "N")]
    pub obscure_cutoff: Option<usize>,

    /// Only print the report, no progress or status lines
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

/// What the terminal report shows.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    NonFree,
    Unknowns,
    Licenses,
    LicensesAsToml,
    ShowLicense(String),
}

impl Cli {
    /// Reject combinations clap's groups can't express.
    pub fn validate(&self) -> Result<(), clap::Error> {
        if self.report == ReportFormat::Json && self.mode() != Mode::NonFree {
            return Err(Cli::command().error(
                ErrorKind::ArgumentConflict,
                "--report json prints the full summary and can't be combined with \
                 --list-licenses, --list-licenses-as-toml, --list-unknowns or --show-license",
            ));
        }
        Ok(())
    }

    pub fn mode(&self) -> Mode {
        if let Some(label) = &self.show_license {
            Mode::ShowLicense(label.clone())
        } else if self.list_licenses {
            Mode::Licenses
        } else if self.list_licenses_as_toml {
            Mode::LicensesAsToml
        } else if self.list_unknowns {
            Mode::Unknowns
        } else {
            Mode::NonFree
        }
    }
}
