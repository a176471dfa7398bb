//! Recipe extraction.
//!
//! Walks each machine's embedded recipe list. Recipe identity is the slug of
//! the upstream recipe id; when several machines carry the same recipe id the
//! first extraction wins and later machines only join the producer list.
//! Ingredient names resolve through the product lookup, falling back to a
//! generic slug for names no product claims.

use std::collections::BTreeMap;

use crate::model::RecipeEntry;
use crate::slug::{id_to_slug, slugify};
use crate::source::{Ingredient, SourceRecipe};

use super::BuildContext;

/// Fixed cost assigned to every recipe; FactorioLab only needs a uniform
/// baseline for this game.
const RECIPE_COST: u32 = 100;

/// Convert one upstream recipe for the given producer, or extend an
/// existing entry's producer list.
pub fn extract_recipe(ctx: &mut BuildContext, recipe: &SourceRecipe, producer_id: &str) {
    let slug = id_to_slug(&recipe.id);

    if let Some(pos) = ctx.recipe_position(&slug) {
        let entry = &mut ctx.recipes[pos];
        if !entry.producers.iter().any(|p| p == producer_id) {
            entry.producers.push(producer_id.to_string());
        }
        return;
    }

    let inputs = resolve_ingredients(ctx, &recipe.inputs);
    let outputs = resolve_ingredients(ctx, &recipe.outputs);

    // Icon: first output if any, else first input, in source encounter order.
    let icon = recipe
        .outputs
        .first()
        .or_else(|| recipe.inputs.first())
        .map(|ing| resolve_name(ctx, &ing.name));

    let category = icon
        .as_deref()
        .and_then(|id| ctx.category_of(id))
        .unwrap_or("recipes")
        .to_string();
    ctx.add_category(&category);

    let name = disambiguate_name(ctx, &recipe.name, &inputs, &slug);

    let entry = RecipeEntry {
        id: slug,
        name,
        category,
        row: 0,
        time: if recipe.duration > 0.0 {
            recipe.duration
        } else {
            1.0
        },
        producers: vec![producer_id.to_string()],
        cost: RECIPE_COST,
        icon,
        inputs,
        outputs,
    };

    ctx.register_recipe(entry);
}

/// Resolve an ingredient list to item id → quantity, defaulting missing or
/// zero quantities to 1.
fn resolve_ingredients(ctx: &BuildContext, ingredients: &[Ingredient]) -> BTreeMap<String, f64> {
    let mut resolved = BTreeMap::new();
    for ing in ingredients {
        let quantity = if ing.quantity > 0.0 { ing.quantity } else { 1.0 };
        resolved.insert(resolve_name(ctx, &ing.name), quantity);
    }
    resolved
}

/// Resolve a product display name to an item id, or slugify the raw name
/// when no product matches.
fn resolve_name(ctx: &BuildContext, name: &str) -> String {
    ctx.product_name_to_id
        .get(name)
        .cloned()
        .unwrap_or_else(|| slugify(name))
}

/// Make recipe display names unique.
///
/// When a new recipe reuses an earlier recipe's display name under a
/// different id, both get a distinguishing input appended: the earlier entry
/// is retro-renamed with the first of its inputs the new recipe lacks (or
/// its first input when all are shared), and the new entry is named the same
/// way against the earlier one's inputs.
///
/// A raw name seen for the first time is recorded against `slug` on the
/// context and returned unchanged.
fn disambiguate_name(
    ctx: &mut BuildContext,
    raw_name: &str,
    inputs: &BTreeMap<String, f64>,
    slug: &str,
) -> String {
    let Some(original_id) = ctx.first_recipe_named(raw_name).map(str::to_string) else {
        ctx.note_recipe_name(raw_name, slug);
        return raw_name.to_string();
    };
    let Some(pos) = ctx.recipe_position(&original_id) else {
        return raw_name.to_string();
    };

    let original_inputs: Vec<String> = ctx.recipes[pos].inputs.keys().cloned().collect();

    if let Some(distinguishing) = original_inputs
        .iter()
        .find(|id| !inputs.contains_key(*id))
        .or_else(|| original_inputs.first())
    {
        let display = input_display_name(ctx, distinguishing);
        ctx.recipes[pos].name = format!("{} ({})", raw_name, display);
    }

    let mut unique_name = raw_name.to_string();
    if let Some(distinguishing) = inputs
        .keys()
        .find(|id| !original_inputs.contains(*id))
        .or_else(|| inputs.keys().next())
    {
        let display = input_display_name(ctx, distinguishing);
        unique_name = format!("{} ({})", raw_name, display);
    }

    unique_name
}

fn input_display_name(ctx: &BuildContext, id: &str) -> String {
    ctx.product_id_to_name
        .get(id)
        .cloned()
        .unwrap_or_else(|| id.to_string())
}
