use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Cutoff below which a license's packages are listed by name.
pub const DEFAULT_OBSCURE_CUTOFF: usize = 7;

/// Root configuration structure, deserialized from `vrms/config.toml`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub licenses: LicensesConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// Additions to (or a replacement for) the curated license tables.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LicensesConfig {
    /// When `false`, only the labels listed here are used.
    #[serde(default = "default_extend_builtin")]
    pub extend_builtin: bool,
    /// Extra labels to treat as free.
    #[serde(default)]
    pub free: Vec<String>,
    /// Extra labels that need manual review.
    #[serde(default)]
    pub ambiguous: Vec<String>,
}

fn default_extend_builtin() -> bool {
    true
}

impl Default for LicensesConfig {
    fn default() -> Self {
        LicensesConfig {
            extend_builtin: true,
            free: Vec::new(),
            ambiguous: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    /// Licenses carried by fewer packages than this get their packages listed.
    #[serde(default = "default_obscure_cutoff")]
    pub obscure_cutoff: usize,
}

fn default_obscure_cutoff() -> usize {
    DEFAULT_OBSCURE_CUTOFF
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            obscure_cutoff: DEFAULT_OBSCURE_CUTOFF,
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `<config dir>/vrms/config.toml` (e.g. `~/.config/vrms/config.toml`)
/// 3. `/etc/vrms/config.toml`
/// 4. Built-in [`Config::default`]
///
/// Returns the path the config came from, if any.
pub fn load_config(config_override: Option<&Path>) -> Result<(Config, Option<PathBuf>)> {
    if let Some(path) = config_override {
        return Ok((read_config(path)?, Some(path.to_path_buf())));
    }

    let mut candidates = Vec::new();
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("vrms").join("config.toml"));
    }
    candidates.push(PathBuf::from("/etc/vrms/config.toml"));

    for candidate in candidates {
        if candidate.exists() {
            let config = read_config(&candidate)?;
            return Ok((config, Some(candidate)));
        }
    }

    Ok((Config::default(), None))
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.licenses.extend_builtin);
        assert!(config.licenses.free.is_empty());
        assert_eq!(config.report.obscure_cutoff, 7);
    }

    #[test]
    fn test_load_override() {
        let f = write_config(
            r#"
[licenses]
free = ["custom:Mine", "custom:\"quoted\""]
ambiguous = ["custom:review"]

[report]
obscure_cutoff = 3
"#,
        );

        let (config, source) = load_config(Some(f.path())).unwrap();
        assert_eq!(source.as_deref(), Some(f.path()));
        assert!(config.licenses.extend_builtin);
        assert_eq!(config.licenses.free, vec!["custom:Mine", "custom:\"quoted\""]);
        assert_eq!(config.licenses.ambiguous, vec!["custom:review"]);
        assert_eq!(config.report.obscure_cutoff, 3);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let f = write_config("[licenses]\nextend_builtin = false\n");
        let (config, _) = load_config(Some(f.path())).unwrap();
        assert!(!config.licenses.extend_builtin);
        assert_eq!(config.report.obscure_cutoff, DEFAULT_OBSCURE_CUTOFF);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let f = write_config("[licenses]\nfree_licenses = [\"MIT\"]\n");
        let err = load_config(Some(f.path())).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config file"));
    }

    #[test]
    fn test_missing_override_is_error() {
        let err = load_config(Some(Path::new("/nonexistent/vrms.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
