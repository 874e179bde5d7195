//! Report renderers for a finished [`LicenseIndex`](crate::license::index::LicenseIndex).
//!
//! - [`terminal`] — the classic vrms listings: non-free packages, ambiguous
//!   packages, license popularity, and config-ready license entries.
//! - [`json`] — the same data as a single JSON document.

pub mod json;
pub mod terminal;
