//! Item identifier parsing for the `namespace:key` convention.
//!
//! Every item referenced by a configuration document, whether declared in
//! `items` or used as a recipe ingredient, is named by a string identifier:
//!
//! - `food:apple` → namespace `food`, key `apple`
//! - `minecraft:coal` → namespace `minecraft`, key `coal`
//! - `stick` → no namespace, key `stick`
//!
//! ## Display Form
//!
//! The display form strips everything up to and including the **last** colon.
//! It is the stem of the icon filename the generated pages point at, so
//! `food:apple` expects `apple.png` in the static folder. Identity is exact
//! string equality on the full identifier; the display form is only used for
//! asset lookup.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A full item identifier, compared by exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build `<namespace>:<key>` for an item declared in a document.
    pub fn qualified(namespace: &str, key: &str) -> Self {
        Self(format!("{namespace}:{key}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Everything after the last `:`, or the whole identifier if there is none.
    pub fn display_form(&self) -> &str {
        display_form(&self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Strip the namespace prefix from any identifier-shaped string.
pub fn display_form(id: &str) -> &str {
    match id.rfind(':') {
        Some(pos) => &id[pos + 1..],
        None => id,
    }
}

/// Whether a namespace can safely name an output file.
///
/// Namespaces become `<namespace>.md` inside the output directory, so they
/// must not be empty, navigate upwards, or contain path separators.
pub fn is_valid_namespace(namespace: &str) -> bool {
    !namespace.trim().is_empty()
        && namespace != "."
        && namespace != ".."
        && !namespace.contains(['/', '\\'])
}
