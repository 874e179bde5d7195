use serde::{Deserialize, Serialize};

/// An installed package as read from the package database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    pub version: String,
    /// Declared license labels, in database order. Never normalized.
    pub licenses: Vec<String>,
}

impl Package {
    pub fn new(name: impl Into<String>, version: impl Into<String>, licenses: Vec<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            licenses,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LicenseClass {
    Free,
    Ambiguous,
    NonFree,
}

impl std::fmt::Display for LicenseClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LicenseClass::Free => write!(f, "free"),
            LicenseClass::Ambiguous => write!(f, "ambiguous"),
            LicenseClass::NonFree => write!(f, "non-free"),
        }
    }
}
