//! Category assembly.
//!
//! Emits one category per tag collected during conversion, restricted to and
//! ordered by the canonical sequence. Tags outside the sequence stay out of
//! the list even when items or recipes still reference them; FactorioLab
//! renders such references without a tab.

use std::collections::HashMap;

use crate::model::Category;

use super::BuildContext;

/// Canonical category order; doubles as the allow-list.
pub const CATEGORY_ORDER: [&str; 8] = [
    "virtual",
    "items",
    "loose",
    "fluids",
    "molten",
    "buildings",
    "logistics",
    "recipes",
];

/// Build the ordered category list on the context.
pub fn build_categories(ctx: &mut BuildContext) {
    // First item observed per category supplies the tab icon.
    let mut first_item: HashMap<&str, &str> = HashMap::new();
    for item in &ctx.items {
        first_item
            .entry(item.category.as_str())
            .or_insert(item.id.as_str());
    }

    let mut categories = Vec::new();
    for tag in CATEGORY_ORDER {
        if !ctx.has_category(tag) {
            continue;
        }
        categories.push(Category {
            id: tag.to_string(),
            name: display_name(tag),
            icon: first_item.get(tag).map(|id| id.to_string()),
        });
    }
    ctx.categories = categories;
}

/// Hyphens become spaces; each word gets a leading capital.
fn display_name(tag: &str) -> String {
    tag.replace('-', " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
