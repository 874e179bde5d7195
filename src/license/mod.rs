//! License classification.
//!
//! - [`reference`] — the curated free/ambiguous label tables and
//!   [`ReferenceSets`](reference::ReferenceSets), which classifies one label.
//! - [`index`] — [`LicenseIndex`](index::LicenseIndex), which ingests packages
//!   and answers popularity and flagged-package queries.

pub mod index;
pub mod reference;
