//! Upstream data model and loaders.
//!
//! Typed views of the three JSON documents exported by the captain-of-data
//! mod. The upstream schema is assumed stable; every field defaults so an
//! absent key reads as empty/zero rather than failing the whole document.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{CoilabError, Result};

/// `products.json`: game version plus the full product list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductsDoc {
    #[serde(default)]
    pub game_version: String,
    #[serde(default)]
    pub products: Vec<Product>,
}

/// A single product. `type` selects the category bucket
/// (virtual/countable/loose/fluid/molten proto kinds).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Product {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub icon_path: String,
}

/// `machines_and_buildings.json`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MachinesDoc {
    #[serde(default)]
    pub machines_and_buildings: Vec<Machine>,
}

/// A machine or building, owning its embedded recipe list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Machine {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub electricity_consumed: f64,
    #[serde(default)]
    pub workers: f64,
    #[serde(default)]
    pub computing_consumed: f64,
    #[serde(default)]
    pub maintenance_cost_units: String,
    #[serde(default)]
    pub maintenance_cost_quantity: f64,
    #[serde(default)]
    pub recipes: Vec<SourceRecipe>,
    #[serde(default)]
    pub icon_path: String,
}

/// An upstream recipe. Inputs and outputs reference products by display
/// name, not by id.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourceRecipe {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub inputs: Vec<Ingredient>,
    #[serde(default)]
    pub outputs: Vec<Ingredient>,
}

/// A recipe input or output: product display name plus quantity.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Ingredient {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub quantity: f64,
}

/// `transports.json` (optional input).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransportsDoc {
    #[serde(default)]
    pub transports: Vec<Transport>,
}

/// A conveyor or pipe. Belt vs pipe is decided later by substring match
/// on the raw id.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Transport {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub icon_path: String,
    #[serde(default)]
    pub throughput_per_second: f64,
}

/// All loaded upstream documents for one run.
#[derive(Debug, Clone, Default)]
pub struct SourceData {
    pub products: ProductsDoc,
    pub machines: MachinesDoc,
    pub transports: TransportsDoc,
}

impl SourceData {
    /// Load the three input documents from a data directory.
    ///
    /// `products.json` and `machines_and_buildings.json` are required;
    /// `transports.json` is optional and reads as empty when absent.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let products = load_json(&data_dir.join("products.json"))?;
        let machines = load_json(&data_dir.join("machines_and_buildings.json"))?;

        let transports_path = data_dir.join("transports.json");
        let transports = if transports_path.exists() {
            load_json(&transports_path)?
        } else {
            TransportsDoc::default()
        };

        Ok(Self {
            products,
            machines,
            transports,
        })
    }
}

/// Read and deserialize one JSON document.
fn load_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let source = fs::read_to_string(path).map_err(|e| CoilabError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read file: {}", e),
    })?;

    serde_json::from_str(&source).map_err(|e| CoilabError::Parse {
        message: format!("{}: {}", path.display(), e),
        help: Some("Expected a captain-of-data mod export".to_string()),
    })
}
