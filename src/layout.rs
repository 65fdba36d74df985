//! Recipe card layout.
//!
//! Turns one recipe into a [`RecipeCard`]: a background template plus a list
//! of icon placements with pixel offsets, mimicking the in-game crafting UI.
//! Layout is pure data; [`crate::render`] turns a card into markup.
//!
//! ## Geometry
//!
//! ```text
//! Crafting table (320×160)              Smithing (320×160)
//! ┌──────────────────────────────┐      ┌──────────────────────────────┐
//! │  (46,34) (82,34) (118,34)    │      │                              │
//! │  (46,70) (82,70) (118,70)  ──┼─►    │ base     addition     result │
//! │  (46,106)(82,106)(118,106)   │      │ (39,99)  (137,99)   (253,99) │
//! │                   result (234,70)   └──────────────────────────────┘
//! └──────────────────────────────┘
//!
//! Cooking (320×180)
//! ingredient (96,46), fuel (96,118), result (215,82)
//! ```
//!
//! Shaped recipes place each pattern character at its row/column. Shapeless
//! recipes (and crafting recipes without a usable pattern) fill a 3-wide grid
//! in ingredient declaration order. Both share the crafting-table background.
//!
//! ## Ingredient values
//!
//! Every `ingredients` value goes through [`ingredient_id`], for layout and
//! for referenced-item collection alike. Values must be identifier strings.
//! An `air` ingredient is never drawn: in a pattern it leaves its cell empty,
//! in a shapeless recipe it takes no slot.
//!
//! A space in a pattern row is a cell of its own, so `" S "` puts `S` in the
//! middle column. Legacy pages dropped whitespace first and drew it in the
//! left column.

use crate::document::{RecipeEntry, RecipeGroup, lookup, lookup_str};
use crate::naming::ItemId;
use serde::Serialize;
use serde_yaml::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("field `{0}` has an unexpected shape")]
    Malformed(&'static str),
}

pub const CARD_WIDTH: u32 = 320;
const CARD_HEIGHT: u32 = 160;
const COOKING_CARD_HEIGHT: u32 = 180;

const GRID_LEFT: u32 = 46;
const GRID_TOP: u32 = 34;
const SLOT_SIZE: u32 = 36;
const SHAPELESS_COLUMNS: usize = 3;
const CRAFTING_RESULT: (u32, u32) = (234, 70);

const SMITHING_BASE: (u32, u32) = (39, 99);
const SMITHING_ADDITION: (u32, u32) = (137, 99);
const SMITHING_RESULT: (u32, u32) = (253, 99);

const COOKING_INGREDIENT: (u32, u32) = (96, 46);
const COOKING_FUEL: (u32, u32) = (96, 118);
const COOKING_RESULT: (u32, u32) = (215, 82);

/// Pattern symbol that marks an explicit empty slot when it has no ingredient.
const EMPTY_SYMBOL: char = 'X';

/// Display form of the ingredient that fills nothing.
const AIR: &str = "air";

/// Which background template a card is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Background {
    CraftingTable,
    Smithing,
    Cooking,
}

impl Background {
    pub fn height(self) -> u32 {
        match self {
            Background::Cooking => COOKING_CARD_HEIGHT,
            Background::CraftingTable | Background::Smithing => CARD_HEIGHT,
        }
    }
}

/// One icon drawn at an absolute offset inside the card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub item: ItemId,
    pub x: u32,
    pub y: u32,
}

impl Placement {
    fn at(item: ItemId, (x, y): (u32, u32)) -> Self {
        Self { item, x, y }
    }

    /// Icon filename stem for this placement.
    pub fn icon(&self) -> &str {
        self.item.display_form()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecipeCard {
    pub background: Background,
    pub placements: Vec<Placement>,
}

impl RecipeCard {
    pub fn height(&self) -> u32 {
        self.background.height()
    }
}

/// A resolved crafting-grid cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cell {
    Item(ItemId),
    /// Explicit air slot; occupies its column but draws nothing.
    Empty,
    /// Unmapped symbol kept as-is; never resolved to an icon.
    Literal(char),
}

// =============================================================================
// Card builders
// =============================================================================

fn grid_position(row: usize, column: usize) -> (u32, u32) {
    (
        GRID_LEFT + SLOT_SIZE * column as u32,
        GRID_TOP + SLOT_SIZE * row as u32,
    )
}

/// Lay out a resolved pattern grid. Only [`Cell::Item`] cells are drawn.
pub fn shaped(grid: &[Vec<Cell>], result: ItemId) -> RecipeCard {
    let mut placements = Vec::new();
    for (row, cells) in grid.iter().enumerate() {
        for (column, cell) in cells.iter().enumerate() {
            if let Cell::Item(item) = cell {
                placements.push(Placement::at(item.clone(), grid_position(row, column)));
            }
        }
    }
    placements.push(Placement::at(result, CRAFTING_RESULT));
    RecipeCard {
        background: Background::CraftingTable,
        placements,
    }
}

/// Lay out ingredients left-to-right, top-to-bottom on a 3-wide grid.
pub fn shapeless(ingredients: Vec<ItemId>, result: ItemId) -> RecipeCard {
    let mut placements: Vec<Placement> = ingredients
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            Placement::at(
                item,
                grid_position(i / SHAPELESS_COLUMNS, i % SHAPELESS_COLUMNS),
            )
        })
        .collect();
    placements.push(Placement::at(result, CRAFTING_RESULT));
    RecipeCard {
        background: Background::CraftingTable,
        placements,
    }
}

pub fn smithing(base: ItemId, addition: ItemId, result: ItemId) -> RecipeCard {
    RecipeCard {
        background: Background::Smithing,
        placements: vec![
            Placement::at(base, SMITHING_BASE),
            Placement::at(addition, SMITHING_ADDITION),
            Placement::at(result, SMITHING_RESULT),
        ],
    }
}

/// The fuel slot always shows `fuel`, whatever the recipe says.
pub fn cooking(ingredient: ItemId, fuel: ItemId, result: ItemId) -> RecipeCard {
    RecipeCard {
        background: Background::Cooking,
        placements: vec![
            Placement::at(ingredient, COOKING_INGREDIENT),
            Placement::at(fuel, COOKING_FUEL),
            Placement::at(result, COOKING_RESULT),
        ],
    }
}

// =============================================================================
// Recipe dispatch
// =============================================================================

/// Lay out a recipe according to its group.
///
/// Crafting-table recipes with a usable `pattern` are shaped; otherwise their
/// `ingredients` are laid out shapeless. `fuel` fills the cooking fuel slot.
pub fn layout_recipe(recipe: &RecipeEntry, fuel: &ItemId) -> Result<RecipeCard, LayoutError> {
    let body = &recipe.body;
    let result = required_id(body, &["result", "item"], "result.item")?;
    match recipe.group {
        RecipeGroup::CraftingTable => match resolve_pattern(body)? {
            Some(grid) => Ok(shaped(&grid, result)),
            None => Ok(shapeless(shapeless_ingredients(body)?, result)),
        },
        RecipeGroup::Smithing => {
            let base = required_id(body, &["base"], "base")?;
            let addition = required_id(body, &["addition"], "addition")?;
            Ok(smithing(base, addition, result))
        }
        RecipeGroup::Cooking => {
            let ingredient = cooking_ingredient(body)
                .map(ItemId::from)
                .ok_or(LayoutError::MissingField("ingredient.item"))?;
            Ok(cooking(ingredient, fuel.clone(), result))
        }
    }
}

fn required_id(body: &Value, path: &[&str], field: &'static str) -> Result<ItemId, LayoutError> {
    match lookup(body, path) {
        None => Err(LayoutError::MissingField(field)),
        Some(Value::String(id)) => Ok(ItemId::new(id.as_str())),
        Some(_) => Err(LayoutError::Malformed(field)),
    }
}

/// Cooking input, written either as `ingredient: { item: id }` or `ingredient: id`.
pub fn cooking_ingredient(body: &Value) -> Option<&str> {
    lookup_str(body, &["ingredient", "item"]).or_else(|| lookup_str(body, &["ingredient"]))
}

/// Resolve `pattern` rows against `ingredients`.
///
/// Returns `Ok(None)` when the recipe has no usable pattern: either field is
/// missing, `ingredients` is not a mapping, or `pattern` is empty.
pub fn resolve_pattern(body: &Value) -> Result<Option<Vec<Vec<Cell>>>, LayoutError> {
    let (Some(pattern), Some(ingredients)) = (
        lookup(body, &["pattern"]),
        lookup(body, &["ingredients"]).and_then(Value::as_mapping),
    ) else {
        return Ok(None);
    };
    let rows = pattern
        .as_sequence()
        .ok_or(LayoutError::Malformed("pattern"))?;
    if rows.is_empty() {
        return Ok(None);
    }

    let mut grid = Vec::with_capacity(rows.len());
    for row in rows {
        let row = row.as_str().ok_or(LayoutError::Malformed("pattern"))?;
        let mut cells = Vec::with_capacity(row.len());
        for symbol in row.chars() {
            let cell = match ingredients.get(symbol.to_string().as_str()) {
                Some(Value::Null) | None if symbol == EMPTY_SYMBOL || symbol.is_whitespace() => {
                    Cell::Empty
                }
                Some(Value::Null) | None => Cell::Literal(symbol),
                Some(value) => ingredient_id(value)?.map_or(Cell::Empty, Cell::Item),
            };
            cells.push(cell);
        }
        grid.push(cells);
    }
    Ok(Some(grid))
}

/// Read one `ingredients` value.
///
/// `Ok(None)` for `air`, which occupies nothing. Anything but a string is
/// malformed.
pub fn ingredient_id(value: &Value) -> Result<Option<ItemId>, LayoutError> {
    let id = value
        .as_str()
        .map(ItemId::new)
        .ok_or(LayoutError::Malformed("ingredients"))?;
    Ok((id.display_form() != AIR).then_some(id))
}

/// Drawable `ingredients` values in declaration order, for shapeless layout.
pub fn shapeless_ingredients(body: &Value) -> Result<Vec<ItemId>, LayoutError> {
    let ingredients = lookup(body, &["ingredients"])
        .ok_or(LayoutError::MissingField("ingredients"))?
        .as_mapping()
        .ok_or(LayoutError::Malformed("ingredients"))?;
    let mut items = Vec::with_capacity(ingredients.len());
    for value in ingredients.values() {
        items.extend(ingredient_id(value)?);
    }
    Ok(items)
}
