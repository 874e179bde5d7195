use std::fs;
use std::path::{Path, PathBuf};

use indicatif::ProgressBar;

use super::{DatabaseError, PackageDatabase};
use crate::models::Package;

/// Default pacman database directory.
pub const DEFAULT_DBPATH: &str = "/var/lib/pacman";

/// Local database layout version written by current libalpm.
pub const LOCAL_DB_VERSION: &str = "9";

/// Reader for pacman's local database: one `<name>-<ver>-<rel>/desc` per
/// installed package under `<dbpath>/local`.
#[derive(Debug)]
pub struct PacmanDb {
    local: PathBuf,
    /// Entry directories, sorted by name.
    entries: Vec<PathBuf>,
}

impl PacmanDb {
    pub fn open(dbpath: &Path) -> Result<Self, DatabaseError> {
        let local = dbpath.join("local");
        if !local.is_dir() {
            return Err(DatabaseError::NotFound { path: local });
        }

        let version_file = local.join("ALPM_DB_VERSION");
        if version_file.exists() {
            let found = fs::read_to_string(&version_file).map_err(|source| {
                DatabaseError::Unreadable {
                    path: version_file.clone(),
                    source,
                }
            })?;
            let found = found.trim();
            if found != LOCAL_DB_VERSION {
                return Err(DatabaseError::UnsupportedVersion {
                    path: version_file,
                    found: found.to_string(),
                    expected: LOCAL_DB_VERSION,
                });
            }
        }

        let unreadable = |source| DatabaseError::Unreadable {
            path: local.clone(),
            source,
        };
        let mut entries = Vec::new();
        for entry in fs::read_dir(&local).map_err(unreadable)? {
            let path = entry.map_err(unreadable)?.path();
            if path.is_dir() {
                entries.push(path);
            }
        }
        entries.sort();

        Ok(Self { local, entries })
    }

    pub fn path(&self) -> &Path {
        &self.local
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PackageDatabase for PacmanDb {
    fn read_packages(&self, progress: &ProgressBar) -> Result<Vec<Package>, DatabaseError> {
        let mut packages = Vec::with_capacity(self.entries.len());

        for entry in &self.entries {
            let desc = entry.join("desc");
            let content = fs::read(&desc).map_err(|source| DatabaseError::Unreadable {
                path: desc.clone(),
                source,
            })?;
            let package = parse_desc(&content)
                .map_err(|reason| DatabaseError::Malformed { path: desc, reason })?;

            progress.inc(1);
            packages.push(package);
        }

        Ok(packages)
    }
}

/// Parse a `desc` file: `%KEY%` headers, each followed by value lines up to
/// the next blank line.
///
/// Only `%NAME%` is required. Only the sections vrms reads must be UTF-8;
/// everything else is skipped undecoded. License lines are kept exactly as
/// written.
fn parse_desc(content: &[u8]) -> Result<Package, String> {
    let mut name: Option<String> = None;
    let mut version: Option<String> = None;
    let mut licenses = Vec::new();
    let mut section: Option<&[u8]> = None;

    for line in content.split(|&b| b == b'\n') {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        if line.is_empty() {
            section = None;
            continue;
        }

        match section {
            None => {
                let key = line
                    .strip_prefix(b"%")
                    .and_then(|rest| rest.strip_suffix(b"%"))
                    .filter(|key| !key.is_empty())
                    .ok_or_else(|| {
                        format!(
                            "expected a %KEY% header, found {:?}",
                            String::from_utf8_lossy(line)
                        )
                    })?;
                section = Some(key);
            }
            Some(b"NAME") if name.is_none() => name = Some(utf8_value(line, "NAME")?),
            Some(b"VERSION") if version.is_none() => version = Some(utf8_value(line, "VERSION")?),
            Some(b"LICENSE") => licenses.push(utf8_value(line, "LICENSE")?),
            Some(_) => {}
        }
    }

    let name = name.ok_or_else(|| "missing %NAME%".to_string())?;
    Ok(Package::new(name, version.unwrap_or_default(), licenses))
}

fn utf8_value(line: &[u8], key: &str) -> Result<String, String> {
    std::str::from_utf8(line)
        .map(str::to_string)
        .map_err(|_| format!("invalid UTF-8 in %{key}%"))
}
