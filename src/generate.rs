//! Wiki generation: the run-level driver.
//!
//! Ties the pipeline together:
//!
//! ```text
//! scan → parse (parallel) → index (sequential) → write pages → check assets
//! ```
//!
//! Documents are parsed on the rayon pool and consumed in discovery order, so
//! indexing and page contents are deterministic. A document that fails to
//! parse or has no usable namespace is logged, recorded in the report and
//! skipped. Only an unusable source directory, or a page that cannot be
//! written, aborts the run.
//!
//! ## Output Structure
//!
//! ```text
//! wiki/
//! ├── food.md        # One page per namespace; documents sharing a
//! ├── tools.md       # namespace contribute to the same page
//! └── static/        # Icons; templates are installed here
//!     ├── 1.png
//!     ├── 2.png
//!     ├── 404.png
//!     └── coal.png
//! ```
//!
//! ## Output Modes
//!
//! - **regenerate** (default): each page is rewritten once per run, so
//!   repeated runs produce identical files.
//! - **append**: the `#` heading is written only when a page is created and
//!   each run appends its items, so repeated runs repeat content.

use crate::assets;
use crate::config::{OutputMode, WikiConfig};
use crate::document::{self, Document, DocumentError};
use crate::index::{Accumulator, ItemFragment, index_document};
use crate::render::{render_item, render_page_header};
use crate::scan::{self, ScanError};
use crate::types::{
    ItemSummary, PageSummary, SkippedDocument, SkippedRecipeSummary, WikiReport,
};
use indexmap::IndexMap;
use log::{debug, info, warn};
use rayon::prelude::*;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("invalid source: {0}")]
    InvalidSource(#[from] ScanError),
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Items gathered for one namespace page.
struct Page {
    namespace: String,
    sources: Vec<PathBuf>,
    items: Vec<ItemFragment>,
}

/// Full run: writes pages, installs templates, reports missing icons.
pub fn build(source: &Path, config: &WikiConfig) -> Result<WikiReport, GenerateError> {
    run(source, config, true)
}

/// Index everything and report what a build would produce, writing nothing.
pub fn check(source: &Path, config: &WikiConfig) -> Result<WikiReport, GenerateError> {
    run(source, config, false)
}

fn run(source: &Path, config: &WikiConfig, write: bool) -> Result<WikiReport, GenerateError> {
    let paths = scan::scan(source, &config.scan.extensions)?;
    info!("found {} documents under {}", paths.len(), source.display());

    let parsed: Vec<(PathBuf, Result<Document, DocumentError>)> = paths
        .into_par_iter()
        .map(|path| {
            let result = document::load_document(&path);
            (path, result)
        })
        .collect();

    let fuel = config.assets.templates.fuel();
    let mut acc = Accumulator::new();
    let mut pages: IndexMap<String, Page> = IndexMap::new();
    let mut report = WikiReport {
        written: write,
        ..WikiReport::default()
    };

    for (path, result) in parsed {
        let doc = match result {
            Ok(doc) => doc,
            Err(e) => {
                warn!("skipping {}: {e}", path.display());
                report.skipped.push(SkippedDocument {
                    path,
                    reason: e.to_string(),
                });
                continue;
            }
        };
        debug!("indexing {} as {}", path.display(), doc.namespace);
        let indexed = index_document(&doc, &fuel, &mut acc);
        report.documents += 1;
        report
            .skipped_recipes
            .extend(indexed.skipped_recipes.iter().map(|s| SkippedRecipeSummary {
                path: path.clone(),
                group: s.group.key().to_string(),
                recipe: s.key.clone(),
                item: s.item.clone(),
                reason: s.error.to_string(),
            }));

        let page = pages
            .entry(indexed.namespace.clone())
            .or_insert_with(|| Page {
                namespace: indexed.namespace,
                sources: Vec::new(),
                items: Vec::new(),
            });
        page.sources.push(path);
        page.items.extend(indexed.items);
    }

    let output_dir = PathBuf::from(&config.output.dir);
    if write {
        fs::create_dir_all(&output_dir).map_err(|source| GenerateError::Write {
            path: output_dir.clone(),
            source,
        })?;
        for page in pages.values() {
            let path = page_path(&output_dir, &page.namespace);
            write_page(&path, page, config)
                .map_err(|source| GenerateError::Write { path, source })?;
        }
    }

    let static_dir = output_dir.join(&config.assets.static_dir);
    report.missing_assets = assets::check_assets(
        &acc,
        config,
        Path::new(&config.assets.template_dir),
        &static_dir,
        write,
    );
    report.static_dir = static_dir;
    report.pages = pages
        .values()
        .map(|page| PageSummary {
            namespace: page.namespace.clone(),
            path: page_path(&output_dir, &page.namespace),
            sources: page.sources.clone(),
            items: page
                .items
                .iter()
                .map(|item| ItemSummary {
                    id: item.id.clone(),
                    display_name: item.display_name.clone(),
                    recipes: item.recipe_count(),
                })
                .collect(),
        })
        .collect();
    report.item_ids = acc.item_ids.into_iter().collect();
    report.display_names = acc.display_names.into_iter().collect();

    Ok(report)
}

fn page_path(output_dir: &Path, namespace: &str) -> PathBuf {
    output_dir.join(format!("{namespace}.md"))
}

fn write_page(path: &Path, page: &Page, config: &WikiConfig) -> io::Result<()> {
    let header = render_page_header(&page.namespace);
    let body: String = page
        .items
        .iter()
        .map(|item| render_item(item, config))
        .collect();

    match config.output.mode {
        OutputMode::Regenerate => fs::write(path, header + &body),
        OutputMode::Append => {
            let created = !path.exists();
            let mut file = OpenOptions::new().create(true).append(true).open(path)?;
            if created {
                file.write_all(header.as_bytes())?;
            }
            file.write_all(body.as_bytes())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use crate::types::AssetKind;
    use tempfile::TempDir;

    fn read_page(root: &Path, namespace: &str) -> String {
        fs::read_to_string(root.join("wiki").join(format!("{namespace}.md"))).unwrap()
    }

    // =========================================================================
    // Pages
    // =========================================================================

    #[test]
    fn build_writes_one_page_per_namespace() {
        let tmp = setup_fixtures();
        let config = fixture_config(tmp.path());
        let report = build(&tmp.path().join("content"), &config).unwrap();

        let namespaces: Vec<&str> = report.pages.iter().map(|p| p.namespace.as_str()).collect();
        assert_eq!(namespaces, vec!["food", "tools"]);
        assert!(tmp.path().join("wiki/food.md").is_file());
        assert!(tmp.path().join("wiki/tools.md").is_file());
        assert_eq!(report.documents, 3);
        assert!(report.written);
    }

    #[test]
    fn shared_namespace_merges_into_one_page() {
        let tmp = setup_fixtures();
        let config = fixture_config(tmp.path());
        let report = build(&tmp.path().join("content"), &config).unwrap();

        let food = find_page(&report, "food");
        assert_eq!(
            item_names(food),
            vec!["Apple", "Bread", "Apple Juice", "Cookie"]
        );
        assert_eq!(food.sources.len(), 2);

        let page = read_page(tmp.path(), "food");
        assert_eq!(page.matches("# food\n").count(), 1);
        assert!(page.starts_with("# food\n\n## Apple\n\n"));
    }

    #[test]
    fn item_blocks_in_page() {
        let tmp = setup_fixtures();
        let config = fixture_config(tmp.path());
        build(&tmp.path().join("content"), &config).unwrap();
        let page = read_page(tmp.path(), "food");

        assert!(page.contains(
            "## Apple\n\n\
             ::: info\nRestores 4 hunger points and 2.4 saturation points when eaten\n:::\n\n\
             A crunchy fruit\n\n\
             No recipes available\n\n"
        ));
        assert!(page.contains(
            "::: info\nRestores 5 hunger points and 6 saturation points when eaten\n:::\n"
        ));
        assert!(page.contains(
            "::: info\nRestores 2 hunger points and 1 saturation points when drunk\n:::\n"
        ));
        // Shaped bread: three wheat across the top row
        assert!(page.contains("left: 46px; top:34px"));
        assert!(page.contains("left: 118px; top:34px"));
        assert!(page.contains(r#"src="./static/wheat.png""#));
    }

    #[test]
    fn recipe_counts_in_report() {
        let tmp = setup_fixtures();
        let config = fixture_config(tmp.path());
        let report = build(&tmp.path().join("content"), &config).unwrap();

        let tools = find_page(&report, "tools");
        let counts: Vec<(&str, usize)> = tools
            .items
            .iter()
            .map(|i| (i.display_name.as_str(), i.recipes))
            .collect();
        assert_eq!(
            counts,
            vec![("Hammer", 1), ("Gem Hammer", 1), ("Cracked Hammer", 0)]
        );
    }

    #[test]
    fn malformed_recipe_is_skipped_and_reported() {
        let tmp = setup_fixtures();
        let config = fixture_config(tmp.path());
        let report = build(&tmp.path().join("content"), &config).unwrap();

        assert_eq!(report.skipped_recipes.len(), 1);
        let skipped = &report.skipped_recipes[0];
        assert_eq!(skipped.group, "smithing");
        assert_eq!(skipped.recipe, "cracked_hammer");
        assert_eq!(skipped.item.as_str(), "tools:cracked_hammer");
        assert!(skipped.reason.contains("addition"));

        let page = read_page(tmp.path(), "tools");
        assert!(page.contains("## Cracked Hammer\n\nNo recipes available\n\n"));
    }

    #[test]
    fn document_without_namespace_is_skipped() {
        let tmp = setup_fixtures();
        let config = fixture_config(tmp.path());
        let report = build(&tmp.path().join("content"), &config).unwrap();

        assert_eq!(report.skipped.len(), 1);
        assert!(report.skipped[0].path.ends_with("broken.yml"));
        assert!(report.skipped[0].reason.contains("namespace"));
        assert!(!report.display_names.contains(&"Orphan".to_string()));
    }

    #[test]
    fn invalid_yaml_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let content = tmp.path().join("content");
        fs::create_dir_all(&content).unwrap();
        fs::write(content.join("bad.yml"), "info: [unclosed\n").unwrap();
        fs::write(
            content.join("good.yml"),
            "info: { namespace: ok }\nitems:\n  thing: { display_name: Thing }\n",
        )
        .unwrap();
        let config = fixture_config(tmp.path());

        let report = build(&content, &config).unwrap();
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.documents, 1);
        assert_eq!(item_names(find_page(&report, "ok")), vec!["Thing"]);
    }

    #[test]
    fn regenerate_is_idempotent() {
        let tmp = setup_fixtures();
        let config = fixture_config(tmp.path());
        let content = tmp.path().join("content");

        build(&content, &config).unwrap();
        let first = read_page(tmp.path(), "food");
        build(&content, &config).unwrap();
        assert_eq!(read_page(tmp.path(), "food"), first);
    }

    #[test]
    fn append_mode_grows_pages() {
        let tmp = setup_fixtures();
        let mut config = fixture_config(tmp.path());
        config.output.mode = OutputMode::Append;
        let content = tmp.path().join("content");

        build(&content, &config).unwrap();
        build(&content, &config).unwrap();
        let page = read_page(tmp.path(), "food");
        assert_eq!(page.matches("# food\n").count(), 1);
        assert_eq!(page.matches("## Apple\n").count(), 2);
    }

    // =========================================================================
    // Identifiers and assets
    // =========================================================================

    #[test]
    fn item_ids_in_discovery_order() {
        let tmp = setup_fixtures();
        let config = fixture_config(tmp.path());
        let report = build(&tmp.path().join("content"), &config).unwrap();

        let ids: Vec<&str> = report.item_ids.iter().map(|id| id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "food:apple",
                "food:bread",
                "food:juice",
                "minecraft:wheat",
                "minecraft:glass_bottle",
                "food:baked_apple",
                "tools:hammer",
                "tools:gem_hammer",
                "tools:cracked_hammer",
                "minecraft:iron_ingot",
                "minecraft:stick",
                "minecraft:diamond",
                "food:cookie",
            ]
        );
    }

    #[test]
    fn missing_icons_named_by_declaring_item() {
        let tmp = setup_fixtures();
        let config = fixture_config(tmp.path());
        let report = build(&tmp.path().join("content"), &config).unwrap();

        assert_eq!(report.missing_assets.len(), 13);
        assert!(
            report
                .missing_assets
                .iter()
                .all(|m| m.kind == AssetKind::Item)
        );
        let name_of = |file: &str| {
            report
                .missing_assets
                .iter()
                .find(|m| m.file_name == file)
                .map(|m| m.display_name.as_str())
        };
        assert_eq!(name_of("juice.png"), Some("Apple Juice"));
        assert_eq!(name_of("baked_apple.png"), Some("Unknown or Minecraft Item"));
        assert_eq!(name_of("1.png"), None);
    }

    #[test]
    fn templates_installed_into_static_dir() {
        let tmp = setup_fixtures();
        let config = fixture_config(tmp.path());
        let report = build(&tmp.path().join("content"), &config).unwrap();

        assert_eq!(report.static_dir, tmp.path().join("wiki/static"));
        for name in ["1.png", "2.png", "404.png", "coal.png"] {
            assert!(report.static_dir.join(name).is_file());
        }
    }

    #[test]
    fn provided_icons_are_not_missing() {
        let tmp = setup_fixtures();
        let config = fixture_config(tmp.path());
        let static_dir = tmp.path().join("wiki/static");
        fs::create_dir_all(&static_dir).unwrap();
        fs::write(static_dir.join("apple.png"), b"icon").unwrap();

        let report = build(&tmp.path().join("content"), &config).unwrap();
        assert!(!missing_files(&report).contains(&"apple.png"));
        assert_eq!(report.missing_assets.len(), 12);
    }

    // =========================================================================
    // Check runs and failures
    // =========================================================================

    #[test]
    fn check_writes_nothing() {
        let tmp = setup_fixtures();
        let config = fixture_config(tmp.path());
        let report = check(&tmp.path().join("content"), &config).unwrap();

        assert!(!report.written);
        assert_eq!(report.pages.len(), 2);
        assert_eq!(report.missing_assets.len(), 13);
        assert!(!tmp.path().join("wiki").exists());
    }

    #[test]
    fn missing_source_is_fatal() {
        let tmp = TempDir::new().unwrap();
        let config = fixture_config(tmp.path());
        let result = build(&tmp.path().join("missing"), &config);
        assert!(matches!(result, Err(GenerateError::InvalidSource(_))));
        assert!(!tmp.path().join("wiki").exists());
    }

    #[test]
    fn empty_source_produces_empty_report() {
        let tmp = TempDir::new().unwrap();
        let content = tmp.path().join("content");
        fs::create_dir_all(&content).unwrap();
        let config = fixture_config(tmp.path());

        let report = build(&content, &config).unwrap();
        assert!(report.pages.is_empty());
        assert!(report.item_ids.is_empty());
        assert_eq!(report.documents, 0);
    }

    #[test]
    fn unwritable_output_is_error() {
        let tmp = setup_fixtures();
        let mut config = fixture_config(tmp.path());
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        config.output.dir = blocker.to_string_lossy().into_owned();

        let result = build(&tmp.path().join("content"), &config);
        assert!(matches!(result, Err(GenerateError::Write { .. })));
    }
}
