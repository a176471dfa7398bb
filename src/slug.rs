//! Slug derivation for item, recipe, and category ids.
//!
//! All output records cross-reference each other by slug: a lowercase,
//! hyphen-delimited identifier derived either from a display name or from an
//! upstream camel-case id.

/// Convert a display name to a slug/id format.
///
/// Lowercases, collapses every run of non-alphanumeric characters to a single
/// hyphen, and trims leading/trailing hyphens.
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut gap = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if gap && !out.is_empty() {
                out.push('-');
            }
            gap = false;
            out.push(c.to_ascii_lowercase());
        } else {
            gap = true;
        }
    }
    out
}

/// Convert an upstream id (e.g. `Product_IronOre`, `SmallElectricFurnace`)
/// to a slug (`iron-ore`, `small-electric-furnace`).
///
/// Strips a `Product_` prefix when present; a remaining `Virtual_` prefix is
/// stripped as well before the camel-case split. Used for product, machine,
/// recipe, and transport ids alike.
pub fn id_to_slug(id: &str) -> String {
    let id = id.strip_prefix("Product_").unwrap_or(id);
    let id = id.strip_prefix("Virtual_").unwrap_or(id);
    camel_to_slug(id)
}

/// Insert hyphens at camel-case boundaries and lowercase.
///
/// A boundary is a lowercase→uppercase transition, or the last letter of an
/// acronym run followed by a capitalized word (`HClAcid` → `h-cl-acid`).
fn camel_to_slug(id: &str) -> String {
    let chars: Vec<char> = id.chars().collect();
    let mut out = String::with_capacity(id.len() + 8);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars
                .get(i + 1)
                .is_some_and(|n| n.is_ascii_lowercase());
            if prev.is_ascii_lowercase() || (prev.is_ascii_uppercase() && next_is_lower) {
                out.push('-');
            }
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}
