use std::collections::{HashMap, HashSet};

use crate::license::reference::ReferenceSets;
use crate::models::{LicenseClass, Package};

/// In-memory classification index for one scan of a package database.
///
/// Two phases: [`record`](Self::record) every package, then query. Recording
/// after queries have started is not prevented but leaves earlier query
/// results stale.
#[derive(Debug)]
pub struct LicenseIndex<'r> {
    reference: &'r ReferenceSets,
    /// Every recorded package; everything else refers to these by position.
    packages: Vec<Package>,
    /// Labels in first-seen order with the packages carrying them.
    by_license: Vec<(String, Vec<usize>)>,
    slots: HashMap<String, usize>,
    unknown: FlaggedPackages,
    nonfree: FlaggedPackages,
}

/// Insertion-ordered package list, at most one entry per package name.
#[derive(Debug, Default)]
struct FlaggedPackages {
    order: Vec<usize>,
    seen: HashSet<String>,
}

impl FlaggedPackages {
    fn flag(&mut self, id: usize, name: &str) {
        if self.seen.insert(name.to_owned()) {
            self.order.push(id);
        }
    }
}

/// One row of [`LicenseIndex::popularity_report`].
#[derive(Debug, Clone, PartialEq)]
pub struct LicensePopularity<'a> {
    pub label: &'a str,
    pub class: LicenseClass,
    pub packages: Vec<&'a Package>,
}

impl<'a> LicensePopularity<'a> {
    pub fn count(&self) -> usize {
        self.packages.len()
    }

    /// Names borrow from the index, so they outlive the row itself.
    pub fn package_names(&self) -> Vec<&'a str> {
        self.packages.iter().map(|p| p.name.as_str()).collect()
    }
}

impl<'r> LicenseIndex<'r> {
    pub fn new(reference: &'r ReferenceSets) -> Self {
        Self {
            reference,
            packages: Vec::new(),
            by_license: Vec::new(),
            slots: HashMap::new(),
            unknown: FlaggedPackages::default(),
            nonfree: FlaggedPackages::default(),
        }
    }

    /// Index `package` under each of its license labels and flag it if any
    /// label is ambiguous or non-free.
    ///
    /// A label repeated within one package is counted once per occurrence.
    /// Any string is accepted; unrecognized labels count as non-free.
    pub fn record(&mut self, package: Package) {
        let id = self.packages.len();

        for label in &package.licenses {
            let slot = match self.slots.get(label) {
                Some(&slot) => slot,
                None => {
                    self.by_license.push((label.clone(), Vec::new()));
                    self.slots.insert(label.clone(), self.by_license.len() - 1);
                    self.by_license.len() - 1
                }
            };
            self.by_license[slot].1.push(id);

            match self.reference.classify(label) {
                LicenseClass::Free => {}
                LicenseClass::Ambiguous => self.unknown.flag(id, &package.name),
                LicenseClass::NonFree => self.nonfree.flag(id, &package.name),
            }
        }

        self.packages.push(package);
    }

    /// Every label seen, most popular first. Equal counts keep the order in
    /// which the labels were first recorded.
    pub fn popularity_report(&self) -> impl Iterator<Item = LicensePopularity<'_>> + '_ {
        let mut order: Vec<usize> = (0..self.by_license.len()).collect();
        order.sort_by(|&a, &b| {
            self.by_license[b]
                .1
                .len()
                .cmp(&self.by_license[a].1.len())
        });

        order.into_iter().map(move |slot| {
            let (label, ids) = &self.by_license[slot];
            LicensePopularity {
                label,
                class: self.reference.classify(label),
                packages: self.resolve(ids),
            }
        })
    }

    /// Packages with at least one ambiguous label, in the order they were flagged.
    pub fn ambiguous_packages(&self) -> impl ExactSizeIterator<Item = &Package> + '_ {
        self.unknown.order.iter().map(move |&id| &self.packages[id])
    }

    /// Packages with at least one non-free label, in the order they were flagged.
    pub fn nonfree_packages(&self) -> impl ExactSizeIterator<Item = &Package> + '_ {
        self.nonfree.order.iter().map(move |&id| &self.packages[id])
    }

    /// Packages recorded under exactly `label`.
    pub fn packages_with(&self, label: &str) -> Vec<&Package> {
        self.slots
            .get(label)
            .map(|&slot| self.resolve(&self.by_license[slot].1))
            .unwrap_or_default()
    }

    pub fn classify(&self, label: &str) -> LicenseClass {
        self.reference.classify(label)
    }

    pub fn package_count(&self) -> usize {
        self.packages.len()
    }

    pub fn license_count(&self) -> usize {
        self.by_license.len()
    }

    fn resolve(&self, ids: &[usize]) -> Vec<&Package> {
        ids.iter().map(|&id| &self.packages[id]).collect()
    }
}
