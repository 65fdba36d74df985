//! # Item Wiki
//!
//! Turns a tree of game-item configuration files (YAML) into a Markdown wiki:
//! one page per namespace, each item with its stats, lore and a positioned
//! recipe card for every recipe that produces it. Each run also reports which
//! icon images the pages point at but the static folder does not have.
//!
//! # Architecture: One-Way Pipeline
//!
//! ```text
//! 1. Scan      contents/        →  document paths       (sorted, recursive)
//! 2. Parse     *.yml            →  Document             (parallel, rayon)
//! 3. Index     Document         →  item fragments + referenced identifiers
//! 4. Layout    recipe           →  RecipeCard           (pure geometry)
//! 5. Render    fragments        →  wiki/<namespace>.md  (Markdown + maud cards)
//! 6. Assets    identifiers      →  missing-icon report  (templates installed)
//! ```
//!
//! Parsing is the only parallel stage. Indexing consumes documents in
//! discovery order and threads a run-wide [`index::Accumulator`] through each
//! call, so there is no global state and output is deterministic.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`naming`] | `namespace:key` identifiers and their display form (the icon stem) |
//! | [`document`] | YAML document model and the optional-field key-path accessor |
//! | [`layout`] | Recipe card geometry for shaped, shapeless, smithing and cooking recipes |
//! | [`index`] | Per-item blocks, recipe matching and identifier collection |
//! | [`render`] | Markdown page text and maud recipe-card markup |
//! | [`scan`] | Recursive document discovery with walkdir |
//! | [`assets`] | Template installation (SHA-256 change detection) and missing-icon checks |
//! | [`generate`] | Run driver: build and check |
//! | [`config`] | `item-wiki.toml` loading, merging over stock defaults, validation |
//! | [`types`] | Serializable run report |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Loose Documents, Strict Cards
//!
//! Real configuration files are hand-written and loosely shaped, so documents
//! are kept as raw YAML values and read through [`document::lookup`], which
//! reports absence instead of failing. A callout whose fields are missing is
//! simply not shown. Recipes are stricter: a recipe that matches an item but
//! lacks a field its card needs is skipped with a warning and listed in the
//! report, and the rest of the run carries on.
//!
//! ## Icons by Display Form
//!
//! Every icon is addressed by the identifier's display form (`food:apple` →
//! `apple.png`). Identifiers from different namespaces that share a key share
//! an icon; the missing-icon report names each file once, after the first
//! item that needs it.

pub mod assets;
pub mod config;
pub mod document;
pub mod generate;
pub mod index;
pub mod layout;
pub mod naming;
pub mod output;
pub mod render;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
