//! FactorioLab output data model.
//!
//! Serialization types for `data.json`. There is no separate machines array
//! in this schema: a machine is an item with a `machine` property, a belt is
//! an item with a `belt` property, and so on. Optional properties are omitted
//! from the JSON entirely rather than emitted as null, except in `Defaults`
//! where FactorioLab expects explicit nulls.

use std::collections::BTreeMap;

use serde::Serialize;

/// Placeholder sheet offset before the sprite packer runs.
pub const DEFAULT_ICON_POSITION: &str = "0px 0px";

/// The complete `data.json` document.
#[derive(Debug, Clone, Serialize)]
pub struct DataSet {
    pub version: String,
    pub categories: Vec<Category>,
    pub icons: Vec<IconRef>,
    pub items: Vec<Item>,
    pub recipes: Vec<RecipeEntry>,
    pub defaults: Defaults,
}

/// A unified item: one per product, per recipe-bearing machine, and per
/// transport, keyed by slug.
#[derive(Debug, Clone, Serialize)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub category: String,
    pub row: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine: Option<MachineSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub belt: Option<TransportSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pipe: Option<TransportSpec>,
}

impl Item {
    /// A plain item with no machine/belt/pipe properties.
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            row: 0,
            stack: None,
            machine: None,
            belt: None,
            pipe: None,
        }
    }
}

/// The `machine` property of a machine item.
#[derive(Debug, Clone, Serialize)]
pub struct MachineSpec {
    /// Base speed multiplier; always 1 for this game.
    pub speed: f64,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Power draw in kW, present for electric machines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consumption: Option<BTreeMap<String, f64>>,
}

/// The `belt` or `pipe` property of a transport item.
#[derive(Debug, Clone, Serialize)]
pub struct TransportSpec {
    /// Items (or litres) per second.
    pub speed: f64,
}

/// One output recipe. `in`/`out` map item ids to quantities.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeEntry {
    pub id: String,
    pub name: String,
    pub category: String,
    pub row: u32,
    pub time: f64,
    /// Item ids of machines able to execute this recipe.
    pub producers: Vec<String>,
    pub cost: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(rename = "in")]
    pub inputs: BTreeMap<String, f64>,
    #[serde(rename = "out")]
    pub outputs: BTreeMap<String, f64>,
}

/// A category tab in the FactorioLab UI.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// One sprite sheet cell reference, 1:1 with items.
#[derive(Debug, Clone, Serialize)]
pub struct IconRef {
    pub id: String,
    /// CSS background-position offset, e.g. "-64px -128px".
    pub position: String,
    /// Average icon colour as lowercase #rrggbb hex.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl IconRef {
    pub fn placeholder(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            position: DEFAULT_ICON_POSITION.to_string(),
            color: None,
        }
    }
}

/// Calculator defaults. Only belt/pipe extremes are derived from game data;
/// the rest are deliberate empty/null placeholders.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Defaults {
    pub mod_ids: Vec<String>,
    pub beacon: Option<String>,
    pub min_belt: Option<String>,
    pub max_belt: Option<String>,
    pub min_pipe: Option<String>,
    pub max_pipe: Option<String>,
    pub fuel: Option<String>,
    pub disabled_recipes: Vec<String>,
    pub min_machine_rank: Vec<String>,
    pub max_machine_rank: Vec<String>,
    pub module_rank: Vec<String>,
}
