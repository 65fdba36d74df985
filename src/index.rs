//! Item and recipe cross-referencing.
//!
//! For one [`Document`], the indexer produces an [`ItemFragment`] per declared
//! item (header, info callouts, lore line, recipe cards) and registers every
//! item identifier the document mentions into the run-wide [`Accumulator`].
//!
//! ## Per-item blocks
//!
//! Blocks are emitted in a fixed order:
//!
//! 1. Callouts, each only when **both** halves of its field pair are present:
//!    - `events.eat.feed.{amount,saturation}` → eaten
//!    - `consumable.{nutrition,saturation}` → eaten (emitted in addition to the
//!      eat event, never merged with it)
//!    - `events.drink.feed.{amount,saturation}` → drunk
//!    - `durability.max_custom_durability` → durability
//! 2. The first `lore` line with every `&7` colour code removed.
//! 3. One recipe card per recipe whose `result.item` equals the item's full
//!    identifier, scanning `crafting_table`, `smithing`, then `cooking`.
//!    Items without any card get [`Block::NoRecipes`].
//!
//! ## Referenced items
//!
//! Every recipe in the document is scanned once, matched or not, for result,
//! ingredient, base, addition and cooking-ingredient identifiers. These land
//! in [`Accumulator::item_ids`] alongside the declared items so the asset
//! check can look for an icon for each of them. Ingredients are read with
//! [`layout::ingredient_id`], so `air` and non-identifier values are never
//! referenced, matching what the cards draw.

use crate::document::{Document, RecipeEntry, RecipeGroup, lookup, lookup_str, scalar_text};
use crate::layout::{self, LayoutError, RecipeCard};
use crate::naming::ItemId;
use indexmap::{IndexMap, IndexSet};
use log::{debug, warn};
use serde_yaml::Value;

/// Colour code stripped from lore lines.
const LORE_COLOR_CODE: &str = "&7";

/// Run-wide accumulation across documents. Owned by the driver and passed
/// into each [`index_document`] call.
#[derive(Debug, Default)]
pub struct Accumulator {
    /// Every identifier seen, declared or referenced, in discovery order.
    pub item_ids: IndexSet<ItemId>,
    /// Every display name of a declared item.
    pub display_names: IndexSet<String>,
    /// Declared items and their display names. The first declaration wins.
    pub declared: IndexMap<ItemId, String>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Display name of a declared item, if any document declared it.
    pub fn display_name(&self, id: &ItemId) -> Option<&str> {
        self.declared.get(id).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callout {
    Eaten { amount: String, saturation: String },
    Drunk { amount: String, saturation: String },
    Durability { value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Callout(Callout),
    Lore(String),
    Recipe(RecipeCard),
    NoRecipes,
}

#[derive(Debug, Clone)]
pub struct ItemFragment {
    pub id: ItemId,
    pub display_name: String,
    pub blocks: Vec<Block>,
}

impl ItemFragment {
    pub fn recipe_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::Recipe(_)))
            .count()
    }
}

/// A matched recipe that could not be laid out.
#[derive(Debug, Clone)]
pub struct SkippedRecipe {
    pub group: RecipeGroup,
    pub key: String,
    pub item: ItemId,
    pub error: LayoutError,
}

#[derive(Debug, Clone)]
pub struct IndexedDocument {
    pub namespace: String,
    pub items: Vec<ItemFragment>,
    pub skipped_recipes: Vec<SkippedRecipe>,
}

/// Index one document, registering its identifiers into `acc`.
///
/// `fuel` is drawn in the fuel slot of every cooking card.
pub fn index_document(doc: &Document, fuel: &ItemId, acc: &mut Accumulator) -> IndexedDocument {
    let mut items = Vec::with_capacity(doc.items.len());
    let mut skipped_recipes = Vec::new();

    for entry in &doc.items {
        let id = ItemId::qualified(&doc.namespace, &entry.key);
        let definition = &entry.definition;
        let display_name = lookup(definition, &["display_name"])
            .and_then(scalar_text)
            .unwrap_or_else(|| entry.key.clone());
        debug!("indexing {id} ({display_name})");

        acc.item_ids.insert(id.clone());
        acc.display_names.insert(display_name.clone());
        acc.declared
            .entry(id.clone())
            .or_insert_with(|| display_name.clone());

        let mut blocks = callouts(definition)
            .into_iter()
            .map(Block::Callout)
            .collect::<Vec<_>>();
        if let Some(line) = first_lore_line(definition) {
            blocks.push(Block::Lore(line));
        }

        let mut matched = 0;
        for recipe in doc.recipes.iter().filter(|r| produces(r, &id)) {
            match layout::layout_recipe(recipe, fuel) {
                Ok(card) => {
                    matched += 1;
                    blocks.push(Block::Recipe(card));
                }
                Err(error) => {
                    warn!(
                        "skipping {} recipe '{}' for {id}: {error}",
                        recipe.group.key(),
                        recipe.key
                    );
                    skipped_recipes.push(SkippedRecipe {
                        group: recipe.group,
                        key: recipe.key.clone(),
                        item: id.clone(),
                        error,
                    });
                }
            }
        }
        if matched == 0 {
            blocks.push(Block::NoRecipes);
        }

        items.push(ItemFragment {
            id,
            display_name,
            blocks,
        });
    }

    for recipe in &doc.recipes {
        acc.item_ids.extend(referenced_items(recipe));
    }

    IndexedDocument {
        namespace: doc.namespace.clone(),
        items,
        skipped_recipes,
    }
}

fn produces(recipe: &RecipeEntry, id: &ItemId) -> bool {
    recipe.result_item() == Some(id.as_str())
}

/// Info callouts for an item definition, in display order.
pub fn callouts(definition: &Value) -> Vec<Callout> {
    let mut callouts = Vec::new();
    if let Some((amount, saturation)) = field_pair(
        definition,
        &["events", "eat", "feed", "amount"],
        &["events", "eat", "feed", "saturation"],
    ) {
        callouts.push(Callout::Eaten { amount, saturation });
    }
    if let Some((amount, saturation)) = field_pair(
        definition,
        &["consumable", "nutrition"],
        &["consumable", "saturation"],
    ) {
        callouts.push(Callout::Eaten { amount, saturation });
    }
    if let Some((amount, saturation)) = field_pair(
        definition,
        &["events", "drink", "feed", "amount"],
        &["events", "drink", "feed", "saturation"],
    ) {
        callouts.push(Callout::Drunk { amount, saturation });
    }
    if let Some(value) =
        lookup(definition, &["durability", "max_custom_durability"]).and_then(scalar_text)
    {
        callouts.push(Callout::Durability { value });
    }
    callouts
}

fn field_pair(definition: &Value, first: &[&str], second: &[&str]) -> Option<(String, String)> {
    let first = lookup(definition, first).and_then(scalar_text)?;
    let second = lookup(definition, second).and_then(scalar_text)?;
    Some((first, second))
}

/// First lore entry with colour codes stripped; `None` for missing or empty lore.
pub fn first_lore_line(definition: &Value) -> Option<String> {
    let first = lookup(definition, &["lore"])?.as_sequence()?.first()?;
    scalar_text(first).map(|line| line.replace(LORE_COLOR_CODE, ""))
}

/// Every identifier a recipe mentions, in field order. May repeat.
pub fn referenced_items(recipe: &RecipeEntry) -> Vec<ItemId> {
    let body = &recipe.body;
    let mut ids = Vec::new();
    if let Some(result) = recipe.result_item() {
        ids.push(ItemId::from(result));
    }
    if let Some(ingredients) = lookup(body, &["ingredients"]).and_then(Value::as_mapping) {
        ids.extend(
            ingredients
                .values()
                .filter_map(|value| layout::ingredient_id(value).ok().flatten()),
        );
    }
    for field in ["base", "addition"] {
        if let Some(id) = lookup_str(body, &[field]) {
            ids.push(ItemId::from(id));
        }
    }
    if let Some(id) = layout::cooking_ingredient(body) {
        ids.push(ItemId::from(id));
    }
    ids
}
