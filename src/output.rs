//! CLI output formatting for build and check runs.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every page leads with
//! its positional index and namespace; contributing documents are shown as
//! indented `Source:` lines relative to the content root, followed by the
//! page's items with their recipe counts.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Pages
//! 001 food → wiki/food.md (4 items)
//!     Source: food.yml
//!     Source: tools/more_food.yml
//!     001 Apple
//!     002 Bread (1 recipe)
//!
//! Skipped
//!     broken.yml: no info.namespace declared
//!     tools/hammers.yaml: smithing 'cracked_hammer' for tools:cracked_hammer: missing required field `addition`
//!
//! Missing images (place them in wiki/static)
//!     apple.png (Apple)
//!     baked_apple.png (Unknown or Minecraft Item)
//!
//! Generated 2 pages, 7 items from 3 documents
//! ```
//!
//! ## Check
//!
//! Same layout, with `(not written)` in place of the page path and a
//! `Checked ...` summary line.
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects.

use crate::types::{AssetKind, WikiReport};
use std::path::Path;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Path relative to `root` when it lives underneath it, forward slashes.
fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

// ============================================================================
// Report
// ============================================================================

/// Format a build or check report.
pub fn format_report(report: &WikiReport, source_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    if !report.pages.is_empty() {
        lines.push("Pages".to_string());
        for (i, page) in report.pages.iter().enumerate() {
            let target = if report.written {
                format!("→ {}", page.path.display())
            } else {
                "(not written)".to_string()
            };
            lines.push(format!(
                "{} {} {} ({})",
                format_index(i + 1),
                page.namespace,
                target,
                plural(page.items.len(), "item", "items")
            ));
            for source in &page.sources {
                lines.push(format!("    Source: {}", relative(source, source_root)));
            }
            for (j, item) in page.items.iter().enumerate() {
                if item.recipes == 0 {
                    lines.push(format!("    {} {}", format_index(j + 1), item.display_name));
                } else {
                    lines.push(format!(
                        "    {} {} ({})",
                        format_index(j + 1),
                        item.display_name,
                        plural(item.recipes, "recipe", "recipes")
                    ));
                }
            }
        }
    }

    if !report.skipped.is_empty() || !report.skipped_recipes.is_empty() {
        push_gap(&mut lines);
        lines.push("Skipped".to_string());
        for doc in &report.skipped {
            lines.push(format!(
                "    {}: {}",
                relative(&doc.path, source_root),
                doc.reason
            ));
        }
        for recipe in &report.skipped_recipes {
            lines.push(format!(
                "    {}: {} '{}' for {}: {}",
                relative(&recipe.path, source_root),
                recipe.group,
                recipe.recipe,
                recipe.item,
                recipe.reason
            ));
        }
    }

    if !report.missing_assets.is_empty() {
        push_gap(&mut lines);
        lines.push(format!(
            "Missing images (place them in {})",
            report.static_dir.display()
        ));
        for asset in &report.missing_assets {
            let marker = match asset.kind {
                AssetKind::Template => " [template]",
                AssetKind::Item => "",
            };
            lines.push(format!(
                "    {} ({}){}",
                asset.file_name, asset.display_name, marker
            ));
        }
    }

    push_gap(&mut lines);
    let verb = if report.written { "Generated" } else { "Checked" };
    lines.push(format!(
        "{} {}, {} from {}",
        verb,
        plural(report.pages.len(), "page", "pages"),
        plural(report.item_count(), "item", "items"),
        plural(report.documents, "document", "documents")
    ));

    lines
}

fn push_gap(lines: &mut Vec<String>) {
    if !lines.is_empty() {
        lines.push(String::new());
    }
}

/// Print report output to stdout.
pub fn print_report(report: &WikiReport, source_root: &Path) {
    for line in format_report(report, source_root) {
        println!("{}", line);
    }
}

/// Print the report as pretty JSON to stdout.
pub fn print_report_json(report: &WikiReport) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}
