use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::license::index::{LicenseIndex, LicensePopularity};
use crate::models::{LicenseClass, Package};

/// Print every seen label as a TOML array entry, most popular first, ready to
/// paste into the `free` or `ambiguous` list of the config file.
///
/// Labels carried by fewer than `cutoff` packages get a trailing comment
/// naming those packages.
pub fn render_license_list(index: &LicenseIndex, cutoff: usize) {
    for row in index.popularity_report() {
        println!("{}", license_entry_line(&row, cutoff));
    }
}

/// Print a table of every seen label with its package count and class.
pub fn render_license_counts(index: &LicenseIndex) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("License").add_attribute(Attribute::Bold),
            Cell::new("Packages").add_attribute(Attribute::Bold),
            Cell::new("Class").add_attribute(Attribute::Bold),
        ]);

    for row in index.popularity_report() {
        table.add_row(vec![
            Cell::new(row.label),
            Cell::new(row.count()).set_alignment(CellAlignment::Right),
            Cell::new(row.class.to_string()).fg(class_color(row.class)),
        ]);
    }

    println!("{}", table);
}

pub fn render_ambiguous(index: &LicenseIndex) {
    eprintln!(
        "{} Packages of unknown license on this system: {}",
        "?".yellow().bold(),
        index.ambiguous_packages().len()
    );

    for package in index.ambiguous_packages() {
        println!("{}", package_line(package));
    }
}

pub fn render_nonfree(index: &LicenseIndex) {
    for package in index.nonfree_packages() {
        println!("{}", package_line(package));
    }

    eprintln!(
        "\n{} Non-free packages: {}\n",
        "✗".red().bold(),
        index.nonfree_packages().len()
    );
    eprintln!(
        "However, there are {} ambiguously licensed packages that vrms cannot certify.",
        index.ambiguous_packages().len()
    );
}

/// Print the class of one label and every package carrying it.
pub fn render_single_license(index: &LicenseIndex, label: &str) {
    let packages = index.packages_with(label);
    let class = index.classify(label);

    eprintln!(
        "{} {}: {} ({} packages)",
        "→".cyan(),
        label,
        class.to_string().color(term_color(class)),
        packages.len()
    );

    for package in packages {
        println!("{} {}", package.name, package.version);
    }
}

/// One row of [`render_nonfree`] / [`render_ambiguous`]: `name: ["lic", ...]`.
pub fn package_line(package: &Package) -> String {
    format!("{}: {:?}", package.name, package.licenses)
}

/// One row of [`render_license_list`].
pub fn license_entry_line(row: &LicensePopularity, cutoff: usize) -> String {
    let entry = format!("    \"{}\",", escape_toml(row.label));
    if row.count() < cutoff {
        format!("{} # {:?}", entry, row.package_names())
    } else {
        entry
    }
}

/// Escape a label for a TOML basic string.
fn escape_toml(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

fn class_color(class: LicenseClass) -> Color {
    match class {
        LicenseClass::Free => Color::Green,
        LicenseClass::Ambiguous => Color::Yellow,
        LicenseClass::NonFree => Color::Red,
    }
}

fn term_color(class: LicenseClass) -> colored::Color {
    match class {
        LicenseClass::Free => colored::Color::Green,
        LicenseClass::Ambiguous => colored::Color::Yellow,
        LicenseClass::NonFree => colored::Color::Red,
    }
}
