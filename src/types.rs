//! Run report types shared by the driver, the CLI output and `--json`.

use crate::naming::ItemId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Everything a build or check run produced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WikiReport {
    /// `false` for check runs, which index without touching the output.
    pub written: bool,
    /// Documents that were parsed and indexed.
    pub documents: usize,
    /// One entry per namespace, in first-seen order.
    pub pages: Vec<PageSummary>,
    /// Every identifier declared or referenced, in discovery order.
    pub item_ids: Vec<ItemId>,
    /// Every declared item's display name, in discovery order.
    pub display_names: Vec<String>,
    /// Icon folder the missing assets are expected in.
    pub static_dir: PathBuf,
    pub missing_assets: Vec<MissingAsset>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedDocument>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_recipes: Vec<SkippedRecipeSummary>,
}

impl WikiReport {
    pub fn item_count(&self) -> usize {
        self.pages.iter().map(|p| p.items.len()).sum()
    }
}

/// A namespace page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageSummary {
    pub namespace: String,
    /// `<output dir>/<namespace>.md`
    pub path: PathBuf,
    /// Documents contributing to this page, in discovery order.
    pub sources: Vec<PathBuf>,
    pub items: Vec<ItemSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSummary {
    pub id: ItemId,
    pub display_name: String,
    pub recipes: usize,
}

/// What a missing asset is used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// A card background or the cooking fuel icon.
    Template,
    /// An item icon.
    Item,
}

/// An icon file the pages point at that is not in the icon folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingAsset {
    /// e.g. `apple.png`
    pub file_name: String,
    /// Item display name, the unknown-item text, or the template's role.
    pub display_name: String,
    pub kind: AssetKind,
}

/// A document that contributed nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedDocument {
    pub path: PathBuf,
    pub reason: String,
}

/// A matched recipe that could not be laid out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedRecipeSummary {
    pub path: PathBuf,
    /// `crafting_table`, `smithing` or `cooking`
    pub group: String,
    pub recipe: String,
    pub item: ItemId,
    pub reason: String,
}
