//! Wiki configuration module.
//!
//! Handles loading, validating, and merging `item-wiki.toml`. The file is
//! optional and sparse: stock defaults are the base layer and user values are
//! merged on top, key by key.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [output]
//! dir = "wiki"              # Namespace pages are written here
//! mode = "regenerate"       # "regenerate" rewrites pages, "append" grows them
//!
//! [assets]
//! static_dir = "static"     # Icon folder, relative to output.dir
//! template_dir = "static"   # Where the bundled card backgrounds live
//! src_prefix = "./static/"  # Prefix of every <img src> in the pages
//! extension = "png"         # Icon file extension
//!
//! [assets.templates]
//! crafting_table = "1"      # Background of shaped/shapeless cards
//! smithing = "404"          # Background of smithing cards
//! cooking = "2"             # Background of cooking cards
//! fuel_item = "minecraft:coal"
//!
//! [scan]
//! extensions = ["yml", "yaml"]
//!
//! [text]
//! eaten = "Restores {amount} hunger points and {saturation} saturation points when eaten"
//! drunk = "Restores {amount} hunger points and {saturation} saturation points when drunk"
//! durability = "Max durability: {value}"
//! no_recipes = "No recipes available"
//! unknown_item = "Unknown or Minecraft Item"
//!
//! [processing]
//! max_processes = 4         # Max parallel parse workers (omit for auto = CPU cores)
//! ```
//!
//! The `[text]` table is how the pages are localised; translate the strings
//! and keep the `{placeholders}`.
//!
//! Unknown keys are rejected to catch typos early.

use crate::layout::Background;
use crate::naming::ItemId;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "item-wiki.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Wiki configuration loaded from `item-wiki.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WikiConfig {
    pub output: OutputConfig,
    pub assets: AssetsConfig,
    pub scan: ScanConfig,
    pub text: TextConfig,
    pub processing: ProcessingConfig,
}

impl WikiConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output.dir must not be empty".into(),
            ));
        }
        if self.scan.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "scan.extensions must not be empty".into(),
            ));
        }
        if self
            .scan
            .extensions
            .iter()
            .any(|e| e.is_empty() || e.starts_with('.'))
        {
            return Err(ConfigError::Validation(
                "scan.extensions entries must be non-empty and have no leading dot".into(),
            ));
        }
        if self.assets.extension.is_empty() || self.assets.extension.starts_with('.') {
            return Err(ConfigError::Validation(
                "assets.extension must be non-empty and have no leading dot".into(),
            ));
        }
        let t = &self.assets.templates;
        if [&t.crafting_table, &t.smithing, &t.cooking, &t.fuel_item]
            .iter()
            .any(|name| name.is_empty())
        {
            return Err(ConfigError::Validation(
                "assets.templates entries must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// How namespace pages are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Each page is truncated and rewritten once per run.
    #[default]
    Regenerate,
    /// Pages are created with their heading once and only ever appended to.
    Append,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory receiving one `<namespace>.md` per namespace.
    pub dir: String,
    pub mode: OutputMode,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: "wiki".to_string(),
            mode: OutputMode::default(),
        }
    }
}

/// Icon and template asset settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    /// Icon folder, relative to the output directory.
    pub static_dir: String,
    /// Folder holding the bundled card backgrounds and fuel icon.
    pub template_dir: String,
    /// Prefix prepended to every image `src` written into pages.
    pub src_prefix: String,
    /// Icon file extension, without the dot.
    pub extension: String,
    pub templates: TemplatesConfig,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            static_dir: "static".to_string(),
            template_dir: "static".to_string(),
            src_prefix: "./static/".to_string(),
            extension: "png".to_string(),
            templates: TemplatesConfig::default(),
        }
    }
}

impl AssetsConfig {
    /// Icon filename for a display form or template name, e.g. `apple.png`.
    pub fn file_name(&self, stem: &str) -> String {
        format!("{}.{}", stem, self.extension)
    }

    /// Value of an `<img src>` attribute for an icon.
    pub fn src(&self, stem: &str) -> String {
        format!("{}{}", self.src_prefix, self.file_name(stem))
    }
}

/// Names of the fixed template assets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplatesConfig {
    pub crafting_table: String,
    pub smithing: String,
    pub cooking: String,
    /// Item drawn in every cooking card's fuel slot.
    pub fuel_item: String,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            crafting_table: "1".to_string(),
            smithing: "404".to_string(),
            cooking: "2".to_string(),
            fuel_item: "minecraft:coal".to_string(),
        }
    }
}

impl TemplatesConfig {
    pub fn background(&self, background: Background) -> &str {
        match background {
            Background::CraftingTable => &self.crafting_table,
            Background::Smithing => &self.smithing,
            Background::Cooking => &self.cooking,
        }
    }

    pub fn fuel(&self) -> ItemId {
        ItemId::new(self.fuel_item.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    /// File extensions treated as configuration documents (case-insensitive).
    pub extensions: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extensions: vec!["yml".to_string(), "yaml".to_string()],
        }
    }
}

/// Message strings written into the pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextConfig {
    /// `{amount}` and `{saturation}` are substituted.
    pub eaten: String,
    /// `{amount}` and `{saturation}` are substituted.
    pub drunk: String,
    /// `{value}` is substituted.
    pub durability: String,
    pub no_recipes: String,
    /// Shown next to a missing icon that no document declares.
    pub unknown_item: String,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            eaten: "Restores {amount} hunger points and {saturation} saturation points when eaten"
                .to_string(),
            drunk: "Restores {amount} hunger points and {saturation} saturation points when drunk"
                .to_string(),
            durability: "Max durability: {value}".to_string(),
            no_recipes: "No recipes available".to_string(),
            unknown_item: "Unknown or Minecraft Item".to_string(),
        }
    }
}

/// Parallel parsing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel document parsers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)`, at least 1
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(WikiConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.is_file() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<WikiConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: WikiConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults when absent.
pub fn load_config(path: &Path) -> Result<WikiConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `item-wiki.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# item-wiki Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Output pages
# ---------------------------------------------------------------------------
[output]
# One <namespace>.md page is written here per namespace.
dir = "wiki"

# "regenerate" truncates and rewrites every page on each run.
# "append" writes the page heading only when the page is first created and
# appends to it afterwards, so re-runs repeat content.
mode = "regenerate"

# ---------------------------------------------------------------------------
# Icons and card backgrounds
# ---------------------------------------------------------------------------
[assets]
# Icon folder, relative to output.dir. Missing icons are reported per run.
static_dir = "static"

# Folder holding the bundled card backgrounds and fuel icon. They are copied
# into the icon folder when absent or outdated.
template_dir = "static"

# Prefix of every <img src> written into the pages.
src_prefix = "./static/"

# Icon file extension, without the dot.
extension = "png"

[assets.templates]
crafting_table = "1"
smithing = "404"
cooking = "2"
# Item drawn in every cooking card's fuel slot.
fuel_item = "minecraft:coal"

# ---------------------------------------------------------------------------
# Document discovery
# ---------------------------------------------------------------------------
[scan]
# File extensions read as item configuration documents.
extensions = ["yml", "yaml"]

# ---------------------------------------------------------------------------
# Page text
# ---------------------------------------------------------------------------
[text]
eaten = "Restores {amount} hunger points and {saturation} saturation points when eaten"
drunk = "Restores {amount} hunger points and {saturation} saturation points when drunk"
durability = "Max durability: {value}"
no_recipes = "No recipes available"
unknown_item = "Unknown or Minecraft Item"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel document parsers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
