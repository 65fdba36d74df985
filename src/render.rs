//! Markdown page rendering.
//!
//! Pages are plain Markdown with one embedded HTML block per recipe card.
//! Card markup is built with [maud](https://maud.lambda.xyz/): a relatively
//! positioned container sized to the card, one absolutely positioned icon per
//! placement, and the background template image last.
//!
//! ```markdown
//! # food
//!
//! ## Apple
//!
//! ::: info
//! Restores 4 hunger points and 2.4 saturation points when eaten
//! :::
//!
//! A crunchy fruit
//!
//! <div style="width:320px; height:160px; ..."><img ...><img src="./static/1.png"></div>
//! ```
//!
//! Image sources are `<src_prefix><display form>.<extension>`, so every icon
//! a page points at is a file the asset check can look for.

use crate::config::{AssetsConfig, TextConfig, WikiConfig};
use crate::index::{Block, Callout, ItemFragment};
use crate::layout::{CARD_WIDTH, RecipeCard};
use maud::{Markup, html};

/// Rendered icon height in pixels; icons are 16px art scaled up.
const ICON_HEIGHT: u32 = 32;

/// Heading that opens a namespace page.
pub fn render_page_header(namespace: &str) -> String {
    format!("# {namespace}\n\n")
}

/// All blocks of one item, starting with its `##` heading.
pub fn render_item(item: &ItemFragment, config: &WikiConfig) -> String {
    let mut out = format!("## {}\n\n", item.display_name);
    for block in &item.blocks {
        out.push_str(&render_block(block, config));
    }
    out
}

fn render_block(block: &Block, config: &WikiConfig) -> String {
    match block {
        Block::Callout(callout) => {
            format!("::: info\n{}\n:::\n\n", format_callout(callout, &config.text))
        }
        Block::Lore(line) => format!("{line}\n\n"),
        Block::Recipe(card) => format!("{}\n\n", render_card(card, &config.assets).into_string()),
        Block::NoRecipes => format!("{}\n\n", config.text.no_recipes),
    }
}

/// Fill a callout's message template.
pub fn format_callout(callout: &Callout, text: &TextConfig) -> String {
    match callout {
        Callout::Eaten { amount, saturation } => text
            .eaten
            .replace("{amount}", amount)
            .replace("{saturation}", saturation),
        Callout::Drunk { amount, saturation } => text
            .drunk
            .replace("{amount}", amount)
            .replace("{saturation}", saturation),
        Callout::Durability { value } => text.durability.replace("{value}", value),
    }
}

/// Recipe card markup: icons over the background template.
pub fn render_card(card: &RecipeCard, assets: &AssetsConfig) -> Markup {
    let container = format!(
        "width:{CARD_WIDTH}px; height:{}px; position: relative; margin-bottom: 10px;",
        card.height()
    );
    let background = assets.templates.background(card.background);
    html! {
        div style=(container) {
            @for placement in &card.placements {
                img src=(assets.src(placement.icon()))
                    alt=(placement.item.as_str())
                    style=(format!(
                        "height: {ICON_HEIGHT}px;image-rendering: pixelated;position: absolute; left: {}px; top:{}px",
                        placement.x, placement.y
                    ));
            }
            img src=(assets.src(background));
        }
    }
}
