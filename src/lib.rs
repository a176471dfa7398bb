//! coilab - Captain of Industry to FactorioLab converter
//!
//! A library for transforming the JSON exports of the captain-of-data mod
//! (products, machines and buildings, transports) into the data.json schema
//! consumed by FactorioLab, with optional icon sprite sheet packing.
//!
//! FactorioLab format notes:
//! - There is no separate "machines" array; machines are items carrying a
//!   `machine` property.
//! - Icons live in a single sheet addressed by per-icon pixel offsets.

pub mod cli;
pub mod convert;
pub mod error;
pub mod model;
pub mod output;
pub mod slug;
pub mod source;
pub mod sprite;
pub mod writer;

pub use convert::{convert, BuildContext};
pub use error::{CoilabError, Result};
pub use model::{Category, DataSet, Defaults, IconRef, Item, MachineSpec, RecipeEntry, TransportSpec};
pub use slug::{id_to_slug, slugify};
pub use source::{
    Ingredient, Machine, MachinesDoc, Product, ProductsDoc, SourceData, SourceRecipe, Transport,
    TransportsDoc,
};
pub use sprite::{
    scan_icon_files, IconDecoder, ImageDecoder, SheetLayout, SheetPacker, StubDecoder,
};
pub use writer::{write_data_json, write_sheet};
