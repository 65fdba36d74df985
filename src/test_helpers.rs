//! Shared test utilities for the item-wiki test suite.
//!
//! Provides fixture setup and lookup helpers for run reports and indexed
//! documents.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let config = fixture_config(tmp.path());
//! let report = generate::build(&tmp.path().join("content"), &config).unwrap();
//!
//! let page = find_page(&report, "food");
//! assert_eq!(item_names(page), vec!["Apple", "Bread", "Apple Juice", "Cookie"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::config::WikiConfig;
use crate::index::{IndexedDocument, ItemFragment};
use crate::types::{PageSummary, WikiReport};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/` (`content/` and `templates/`) to a temp directory and
/// return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Config writing into `<root>/wiki` and installing templates from
/// `<root>/templates`.
pub fn fixture_config(root: &Path) -> WikiConfig {
    let mut config = WikiConfig::default();
    config.output.dir = root.join("wiki").to_string_lossy().into_owned();
    config.assets.template_dir = root.join("templates").to_string_lossy().into_owned();
    config
}

// =========================================================================
// Lookups: panic with a clear message on miss
// =========================================================================

/// Find a page by namespace. Panics if not found.
pub fn find_page<'a>(report: &'a WikiReport, namespace: &str) -> &'a PageSummary {
    report
        .pages
        .iter()
        .find(|p| p.namespace == namespace)
        .unwrap_or_else(|| {
            let names: Vec<&str> = report.pages.iter().map(|p| p.namespace.as_str()).collect();
            panic!("page '{namespace}' not found. Available: {names:?}")
        })
}

/// Find an indexed item by key (the part after the namespace). Panics if not found.
pub fn find_item<'a>(doc: &'a IndexedDocument, key: &str) -> &'a ItemFragment {
    doc.items
        .iter()
        .find(|i| i.id.display_form() == key)
        .unwrap_or_else(|| {
            let keys: Vec<&str> = doc.items.iter().map(|i| i.id.display_form()).collect();
            panic!("item '{key}' not found. Available: {keys:?}")
        })
}

// =========================================================================
// Bulk extractors
// =========================================================================

/// Display names of a page's items, in page order.
pub fn item_names(page: &PageSummary) -> Vec<&str> {
    page.items.iter().map(|i| i.display_name.as_str()).collect()
}

/// Missing asset file names, in report order.
pub fn missing_files(report: &WikiReport) -> Vec<&str> {
    report
        .missing_assets
        .iter()
        .map(|m| m.file_name.as_str())
        .collect()
}
