//! Conversion pipeline from upstream exports to the FactorioLab model.
//!
//! All stages share one mutable [`BuildContext`]: an explicit accumulator
//! holding the growing item/recipe/category collections plus the lookup
//! tables later stages need. First writer for a slug wins, and the stage
//! order (products, then machines, then transports) decides who writes first.

pub mod categories;
pub mod defaults;
pub mod items;
pub mod recipes;

use std::collections::{HashMap, HashSet};
use std::path::Path;

use crate::model::{Category, DataSet, Defaults, IconRef, Item, RecipeEntry};
use crate::slug::id_to_slug;
use crate::source::{ProductsDoc, SourceData};

/// Mutable state threaded through every conversion stage.
#[derive(Debug, Default)]
pub struct BuildContext {
    /// Game version carried into the output document.
    pub version: String,
    /// Output items in insertion order: products, machines, transports.
    pub items: Vec<Item>,
    /// Output recipes in extraction order.
    pub recipes: Vec<RecipeEntry>,
    /// One placeholder per item, rewritten later by the sprite packer.
    pub icons: Vec<IconRef>,
    /// Final category list, filled by the category builder stage.
    pub categories: Vec<Category>,
    /// Product display name → item slug ("Iron Ore" → "iron-ore").
    pub product_name_to_id: HashMap<String, String>,
    /// Item slug → product display name ("iron-ore" → "Iron Ore").
    pub product_id_to_name: HashMap<String, String>,
    /// Item slug → icon file stem hint (basename of the source icon_path).
    pub icon_file_hints: HashMap<String, String>,

    seen_items: HashSet<String>,
    recipe_index: HashMap<String, usize>,
    /// Recipe display name → id of the first recipe seen with that name.
    recipe_names: HashMap<String, String>,
    category_set: HashSet<String>,
    /// Item slug → category, kept in step with `items`.
    item_category: HashMap<String, String>,
}

impl BuildContext {
    pub fn new(game_version: &str) -> Self {
        let version = if game_version.is_empty() {
            "0.0.0".to_string()
        } else {
            game_version.to_string()
        };
        Self {
            version,
            ..Self::default()
        }
    }

    /// Index product names and slugs for ingredient resolution.
    pub fn build_lookups(&mut self, products: &ProductsDoc) {
        for product in &products.products {
            let slug = id_to_slug(&product.id);
            self.product_name_to_id
                .insert(product.name.clone(), slug.clone());
            self.product_id_to_name.insert(slug, product.name.clone());
        }
    }

    /// Append an item, its icon placeholder, and its icon file hint.
    pub fn register_item(&mut self, item: Item, icon_stem: String) {
        self.seen_items.insert(item.id.clone());
        self.item_category
            .insert(item.id.clone(), item.category.clone());
        self.icon_file_hints.insert(item.id.clone(), icon_stem);
        self.icons.push(IconRef::placeholder(&item.id));
        self.items.push(item);
    }

    /// Whether an item with this slug has already been registered.
    pub fn has_item(&self, slug: &str) -> bool {
        self.seen_items.contains(slug)
    }

    /// Category of a registered item, if any.
    pub fn category_of(&self, slug: &str) -> Option<&str> {
        self.item_category.get(slug).map(String::as_str)
    }

    /// Record a category tag as non-empty.
    pub fn add_category(&mut self, category: &str) {
        self.category_set.insert(category.to_string());
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.category_set.contains(category)
    }

    /// Position of an already-extracted recipe by slug.
    pub fn recipe_position(&self, slug: &str) -> Option<usize> {
        self.recipe_index.get(slug).copied()
    }

    /// Append a recipe, indexing it by slug.
    pub fn register_recipe(&mut self, entry: RecipeEntry) {
        self.recipe_index.insert(entry.id.clone(), self.recipes.len());
        self.recipes.push(entry);
    }

    /// Record the recipe id that first used a display name.
    pub fn note_recipe_name(&mut self, raw_name: &str, id: &str) {
        self.recipe_names
            .insert(raw_name.to_string(), id.to_string());
    }

    /// Id of the first recipe that used this display name, if any.
    pub fn first_recipe_named(&self, name: &str) -> Option<&str> {
        self.recipe_names.get(name).map(String::as_str)
    }

    /// Assemble the final output document.
    pub fn into_data_set(self, defaults: Defaults) -> DataSet {
        DataSet {
            version: self.version,
            categories: self.categories,
            icons: self.icons,
            items: self.items,
            recipes: self.recipes,
            defaults,
        }
    }
}

/// Run every conversion stage over the loaded source data.
pub fn convert(data: &SourceData) -> BuildContext {
    let mut ctx = BuildContext::new(&data.products.game_version);
    ctx.build_lookups(&data.products);
    items::convert_products(&mut ctx, &data.products.products);
    items::convert_machines(&mut ctx, &data.machines.machines_and_buildings);
    items::convert_transports(&mut ctx, &data.transports.transports);
    categories::build_categories(&mut ctx);
    ctx
}

/// Icon file stem for a source record: the basename of its `icon_path`
/// without extension, or the slug itself when no path is given.
pub(crate) fn icon_stem(icon_path: &str, slug: &str) -> String {
    if icon_path.is_empty() {
        return slug.to_string();
    }
    Path::new(icon_path)
        .file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| slug.to_string())
}
