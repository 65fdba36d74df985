//! Configuration document model and YAML loading.
//!
//! A configuration document is one YAML file from the content tree. Only three
//! top-level sections matter:
//!
//! ```yaml
//! info:
//!   namespace: food          # required; names the output page
//! items:
//!   apple:                   # declaration order is preserved
//!     display_name: Apple
//!     events: { eat: { feed: { amount: 4, saturation: 2.4 } } }
//! recipes:
//!   crafting_table: { ... }  # shaped or shapeless
//!   smithing: { ... }
//!   cooking: { ... }
//! ```
//!
//! Item definitions and recipe bodies are kept as raw [`serde_yaml::Value`]s.
//! Real-world files are loosely shaped, so fields are read on demand through
//! [`lookup`], which walks a key path and reports absence instead of failing.

use crate::naming;
use serde_yaml::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("no info.namespace declared")]
    MissingNamespace,
    #[error("namespace {0:?} cannot be used as a page name")]
    InvalidNamespace(String),
}

/// The three recipe sections, in the order they are scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeGroup {
    CraftingTable,
    Smithing,
    Cooking,
}

impl RecipeGroup {
    pub const ALL: [RecipeGroup; 3] = [
        RecipeGroup::CraftingTable,
        RecipeGroup::Smithing,
        RecipeGroup::Cooking,
    ];

    /// Key of this group under `recipes:`.
    pub fn key(self) -> &'static str {
        match self {
            RecipeGroup::CraftingTable => "crafting_table",
            RecipeGroup::Smithing => "smithing",
            RecipeGroup::Cooking => "cooking",
        }
    }
}

/// An entry under `items:`.
#[derive(Debug, Clone)]
pub struct ItemEntry {
    pub key: String,
    /// Raw definition; `Null` when the item was declared without a body.
    pub definition: Value,
}

/// An entry under one of the `recipes:` groups.
#[derive(Debug, Clone)]
pub struct RecipeEntry {
    pub group: RecipeGroup,
    pub key: String,
    pub body: Value,
}

impl RecipeEntry {
    /// The identifier this recipe produces (`result.item`), if it has one.
    pub fn result_item(&self) -> Option<&str> {
        lookup_str(&self.body, &["result", "item"])
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    pub namespace: String,
    pub items: Vec<ItemEntry>,
    /// All recipes, grouped in [`RecipeGroup::ALL`] order and declaration
    /// order within each group.
    pub recipes: Vec<RecipeEntry>,
}

impl Document {
    pub fn from_value(root: &Value) -> Result<Self, DocumentError> {
        let namespace = lookup(root, &["info", "namespace"])
            .and_then(scalar_text)
            .ok_or(DocumentError::MissingNamespace)?;
        if !naming::is_valid_namespace(&namespace) {
            return Err(DocumentError::InvalidNamespace(namespace));
        }

        let items = lookup(root, &["items"])
            .and_then(Value::as_mapping)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|(key, definition)| {
                        let key = scalar_text(key)?;
                        Some(ItemEntry {
                            key,
                            definition: definition.clone(),
                        })
                    })
                    .collect()
            })
            .unwrap_or_default();

        let mut recipes = Vec::new();
        for group in RecipeGroup::ALL {
            let Some(entries) = lookup(root, &["recipes", group.key()]).and_then(Value::as_mapping)
            else {
                continue;
            };
            for (key, body) in entries {
                let Some(key) = scalar_text(key) else {
                    continue;
                };
                recipes.push(RecipeEntry {
                    group,
                    key,
                    body: body.clone(),
                });
            }
        }

        Ok(Document {
            namespace,
            items,
            recipes,
        })
    }
}

/// Parse a document from YAML text.
pub fn parse_document(source: &str) -> Result<Document, DocumentError> {
    let root: Value = serde_yaml::from_str(source)?;
    Document::from_value(&root)
}

/// Read and parse a document from disk.
pub fn load_document(path: &Path) -> Result<Document, DocumentError> {
    let source = fs::read_to_string(path)?;
    parse_document(&source)
}

// =============================================================================
// Optional-field access
// =============================================================================

/// Walk `path` through nested mappings.
///
/// Returns `None` if any segment is missing, if an intermediate value is not
/// a mapping, or if the final value is `null`.
pub fn lookup<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = value;
    for key in path {
        current = current.as_mapping()?.get(*key)?;
    }
    if current.is_null() { None } else { Some(current) }
}

/// [`lookup`] narrowed to string values.
pub fn lookup_str<'a>(value: &'a Value, path: &[&str]) -> Option<&'a str> {
    lookup(value, path).and_then(Value::as_str)
}

/// Text form of a scalar: strings verbatim, numbers and booleans as YAML
/// prints them. Sequences, mappings and nulls have no text form.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => scalar_text(&tagged.value),
        Value::Null | Value::Sequence(_) | Value::Mapping(_) => None,
    }
}
