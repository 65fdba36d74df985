//! Icon folder maintenance and missing-icon detection.
//!
//! Pages point at `<static_dir>/<display form>.<ext>` for every icon, plus
//! four fixed template assets: the three card backgrounds and the cooking
//! fuel icon. Templates ship in `assets.template_dir` and are installed into
//! the icon folder on every build run; item icons are supplied by the user.
//!
//! ## Template installation
//!
//! A template is copied when the destination is absent or its SHA-256
//! differs from the source, so user edits to an installed copy are
//! overwritten but unchanged files are left alone. A failed copy is logged
//! and the asset is then reported as missing like any other icon.
//!
//! ## Missing assets
//!
//! Templates are checked first, then every identifier in the run's
//! [`Accumulator`] in discovery order. Each file name is reported at most
//! once; identifiers that share a display form share an icon.

use crate::config::{TemplatesConfig, WikiConfig};
use crate::index::Accumulator;
use crate::naming;
use crate::types::{AssetKind, MissingAsset};
use indexmap::IndexSet;
use log::{debug, warn};
use sha2::{Digest, Sha256};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("template source not found: {0}")]
    MissingTemplate(PathBuf),
}

/// Outcome of [`install_template`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateStatus {
    Copied,
    UpToDate,
}

/// SHA-256 hash of a file's contents, returned as a hex string.
pub fn hash_file(path: &Path) -> io::Result<String> {
    let bytes = fs::read(path)?;
    let digest = Sha256::digest(&bytes);
    Ok(format!("{:x}", digest))
}

/// Copy `file_name` from `template_dir` into `static_dir` unless an identical
/// copy is already there.
pub fn install_template(
    template_dir: &Path,
    static_dir: &Path,
    file_name: &str,
) -> Result<TemplateStatus, AssetError> {
    let source = template_dir.join(file_name);
    if !source.is_file() {
        return Err(AssetError::MissingTemplate(source));
    }
    let dest = static_dir.join(file_name);
    if dest.is_file() && hash_file(&dest)? == hash_file(&source)? {
        return Ok(TemplateStatus::UpToDate);
    }
    fs::create_dir_all(static_dir)?;
    fs::copy(&source, &dest)?;
    Ok(TemplateStatus::Copied)
}

/// Template asset stems with a human-readable role for the report.
pub fn template_roles(templates: &TemplatesConfig) -> [(&str, String); 4] {
    [
        (
            templates.crafting_table.as_str(),
            "crafting table background".to_string(),
        ),
        (templates.cooking.as_str(), "cooking background".to_string()),
        (templates.smithing.as_str(), "smithing background".to_string()),
        (
            naming::display_form(&templates.fuel_item),
            format!("cooking fuel ({})", templates.fuel_item),
        ),
    ]
}

/// Check every icon the run's pages point at.
///
/// With `install`, templates are first copied from `template_dir`. Without
/// it nothing is written, and a template counts as present when it could be
/// installed.
pub fn check_assets(
    acc: &Accumulator,
    config: &WikiConfig,
    template_dir: &Path,
    static_dir: &Path,
    install: bool,
) -> Vec<MissingAsset> {
    let assets = &config.assets;
    let mut seen = IndexSet::new();
    let mut missing = Vec::new();

    for (stem, role) in template_roles(&assets.templates) {
        let file_name = assets.file_name(stem);
        if !seen.insert(file_name.clone()) {
            continue;
        }
        let present = if install {
            match install_template(template_dir, static_dir, &file_name) {
                Ok(status) => {
                    debug!("template {file_name}: {status:?}");
                }
                Err(e) => warn!("could not install template {file_name}: {e}"),
            }
            static_dir.join(&file_name).is_file()
        } else {
            static_dir.join(&file_name).is_file() || template_dir.join(&file_name).is_file()
        };
        if !present {
            missing.push(MissingAsset {
                file_name,
                display_name: role,
                kind: AssetKind::Template,
            });
        }
    }

    for id in &acc.item_ids {
        let file_name = assets.file_name(id.display_form());
        if !seen.insert(file_name.clone()) {
            continue;
        }
        if static_dir.join(&file_name).is_file() {
            continue;
        }
        let display_name = acc
            .display_name(id)
            .unwrap_or(config.text.unknown_item.as_str())
            .to_string();
        missing.push(MissingAsset {
            file_name,
            display_name,
            kind: AssetKind::Item,
        });
    }

    missing
}
