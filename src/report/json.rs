use anyhow::Result;
use serde::Serialize;

use crate::license::index::LicenseIndex;
use crate::models::{LicenseClass, Package};

#[derive(Debug, Serialize)]
pub struct Summary<'a> {
    pub totals: Totals,
    pub licenses: Vec<LicenseEntry<'a>>,
    pub ambiguous: Vec<&'a Package>,
    pub nonfree: Vec<&'a Package>,
}

#[derive(Debug, Serialize)]
pub struct Totals {
    pub packages: usize,
    pub licenses: usize,
    pub ambiguous: usize,
    pub nonfree: usize,
}

#[derive(Debug, Serialize)]
pub struct LicenseEntry<'a> {
    pub license: &'a str,
    pub count: usize,
    pub class: LicenseClass,
    pub packages: Vec<&'a str>,
}

pub fn summarize<'a>(index: &'a LicenseIndex) -> Summary<'a> {
    let licenses: Vec<LicenseEntry> = index
        .popularity_report()
        .map(|row| LicenseEntry {
            license: row.label,
            count: row.count(),
            class: row.class,
            packages: row.package_names(),
        })
        .collect();
    let ambiguous: Vec<&Package> = index.ambiguous_packages().collect();
    let nonfree: Vec<&Package> = index.nonfree_packages().collect();

    Summary {
        totals: Totals {
            packages: index.package_count(),
            licenses: index.license_count(),
            ambiguous: ambiguous.len(),
            nonfree: nonfree.len(),
        },
        licenses,
        ambiguous,
        nonfree,
    }
}

pub fn render(index: &LicenseIndex) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&summarize(index))?);
    Ok(())
}
