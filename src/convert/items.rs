//! Item conversion: products, machines, and transports become items.
//!
//! Products come first, then recipe-bearing machines, then transports; the
//! first source to claim a slug wins. Every registered item also gets an
//! icon placeholder and an icon file hint.

use std::collections::BTreeMap;

use crate::model::{Item, MachineSpec, TransportSpec};
use crate::slug::id_to_slug;
use crate::source::{Machine, Product, Transport};

use super::{icon_stem, BuildContext};

/// Category bucket for each upstream product proto kind.
fn category_for_kind(kind: &str) -> &'static str {
    match kind {
        "VirtualProductProto" => "virtual",
        "CountableProductProto" => "items",
        "LooseProductProto" => "loose",
        "FluidProductProto" => "fluids",
        "MoltenProductProto" => "molten",
        _ => "items",
    }
}

/// Convert products to items. Countable products stack.
pub fn convert_products(ctx: &mut BuildContext, products: &[Product]) {
    for product in products {
        let slug = id_to_slug(&product.id);
        let category = category_for_kind(&product.kind);
        ctx.add_category(category);

        let mut item = Item::new(&slug, &product.name, category);
        if product.kind == "CountableProductProto" {
            item.stack = Some(1);
        }

        let stem = icon_stem(&product.icon_path, &slug);
        ctx.register_item(item, stem);
    }
}

/// Convert machines to items with a `machine` property and extract their
/// recipes. Machines without recipes (storage buildings and the like) are
/// skipped entirely, icons included.
pub fn convert_machines(ctx: &mut BuildContext, machines: &[Machine]) {
    for machine in machines {
        if machine.recipes.is_empty() {
            continue;
        }

        let slug = id_to_slug(&machine.id);
        ctx.add_category("buildings");

        if !ctx.has_item(&slug) {
            let mut spec = MachineSpec {
                speed: 1.0,
                kind: None,
                usage: None,
                consumption: None,
            };
            if machine.electricity_consumed > 0.0 {
                spec.kind = Some("electric".to_string());
                spec.usage = Some(machine.electricity_consumed);
            }
            let consumption = machine_consumption(machine);
            if !consumption.is_empty() {
                spec.consumption = Some(consumption);
            }

            let mut item = Item::new(&slug, &machine.name, "buildings");
            item.machine = Some(spec);

            let stem = icon_stem(&machine.icon_path, &slug);
            ctx.register_item(item, stem);
        }

        for recipe in &machine.recipes {
            super::recipes::extract_recipe(ctx, recipe, &slug);
        }
    }
}

/// Consumption dictionary for a machine's maintenance, computing, and worker
/// draws.
///
/// Intentionally a no-op: the upstream maintenance cost units and the virtual
/// Computing/Workers products do not resolve to slugs FactorioLab can balance
/// against, so the mapping is disabled and the map stays empty. The attach
/// site only emits `consumption` when this returns entries.
fn machine_consumption(_machine: &Machine) -> BTreeMap<String, f64> {
    BTreeMap::new()
}

/// Convert transports (belts, pipes) to items, skipping slugs already
/// claimed by a product or machine.
pub fn convert_transports(ctx: &mut BuildContext, transports: &[Transport]) {
    for transport in transports {
        let slug = id_to_slug(&transport.id);
        if ctx.has_item(&slug) {
            continue;
        }

        ctx.add_category("logistics");

        let mut item = Item::new(&slug, &transport.name, "logistics");
        if transport.throughput_per_second > 0.0 {
            let spec = TransportSpec {
                speed: transport.throughput_per_second,
            };
            if transport.id.to_lowercase().contains("pipe") {
                item.pipe = Some(spec);
            } else {
                item.belt = Some(spec);
            }
        }

        let stem = icon_stem(&transport.icon_path, &slug);
        ctx.register_item(item, stem);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceRecipe;

    fn product(id: &str, name: &str, kind: &str, icon_path: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            kind: kind.to_string(),
            icon_path: icon_path.to_string(),
        }
    }

    #[test]
    fn test_countable_product_round_trip() {
        let mut ctx = BuildContext::new("1.0");
        convert_products(
            &mut ctx,
            &[product(
                "Product_IronOre",
                "Iron Ore",
                "CountableProductProto",
                "icons/iron_ore.png",
            )],
        );

        let item = &ctx.items[0];
        assert_eq!(item.id, "iron-ore");
        assert_eq!(item.name, "Iron Ore");
        assert_eq!(item.category, "items");
        assert_eq!(item.row, 0);
        assert_eq!(item.stack, Some(1));
        assert!(ctx.has_category("items"));
        assert_eq!(ctx.icon_file_hints["iron-ore"], "iron_ore");
    }

    #[test]
    fn test_fluid_product_does_not_stack() {
        let mut ctx = BuildContext::new("1.0");
        convert_products(
            &mut ctx,
            &[product("Product_Water", "Water", "FluidProductProto", "")],
        );

        assert_eq!(ctx.items[0].category, "fluids");
        assert_eq!(ctx.items[0].stack, None);
    }

    #[test]
    fn test_unknown_kind_defaults_to_items() {
        let mut ctx = BuildContext::new("1.0");
        convert_products(
            &mut ctx,
            &[product("Product_Mystery", "Mystery", "FutureProto", "")],
        );

        assert_eq!(ctx.items[0].category, "items");
        assert_eq!(ctx.items[0].stack, None);
    }

    #[test]
    fn test_machine_without_recipes_is_skipped() {
        let mut ctx = BuildContext::new("1.0");
        let machine = Machine {
            id: "StorageUnit".to_string(),
            name: "Storage Unit".to_string(),
            ..Default::default()
        };
        convert_machines(&mut ctx, &[machine]);

        assert!(ctx.items.is_empty());
        assert!(ctx.icons.is_empty());
        assert!(!ctx.has_category("buildings"));
    }

    #[test]
    fn test_electric_machine_gets_usage() {
        let mut ctx = BuildContext::new("1.0");
        let machine = Machine {
            id: "SmallElectricFurnace".to_string(),
            name: "Electric Furnace".to_string(),
            electricity_consumed: 250.0,
            recipes: vec![SourceRecipe {
                id: "GlassSmelting".to_string(),
                name: "Glass smelting".to_string(),
                duration: 10.0,
                ..Default::default()
            }],
            ..Default::default()
        };
        convert_machines(&mut ctx, &[machine]);

        let item = &ctx.items[0];
        assert_eq!(item.id, "small-electric-furnace");
        let spec = item.machine.as_ref().unwrap();
        assert_eq!(spec.speed, 1.0);
        assert_eq!(spec.kind.as_deref(), Some("electric"));
        assert_eq!(spec.usage, Some(250.0));
        // The maintenance/computing/worker mapping is disabled, so no
        // consumption is ever attached.
        assert!(spec.consumption.is_none());
    }

    #[test]
    fn test_unpowered_machine_has_no_type() {
        let mut ctx = BuildContext::new("1.0");
        let machine = Machine {
            id: "HandCrank".to_string(),
            name: "Hand Crank".to_string(),
            recipes: vec![SourceRecipe::default()],
            maintenance_cost_units: "Maintenance I".to_string(),
            maintenance_cost_quantity: 3.0,
            workers: 2.0,
            ..Default::default()
        };
        convert_machines(&mut ctx, &[machine]);

        let spec = ctx.items[0].machine.as_ref().unwrap();
        assert_eq!(spec.kind, None);
        assert_eq!(spec.usage, None);
        assert!(spec.consumption.is_none());
    }

    #[test]
    fn test_belt_and_pipe_classification() {
        let mut ctx = BuildContext::new("1.0");
        let transports = vec![
            Transport {
                id: "FlatConveyorMk1".to_string(),
                name: "Conveyor Belt".to_string(),
                throughput_per_second: 8.0,
                ..Default::default()
            },
            Transport {
                id: "FluidPipeMk1".to_string(),
                name: "Pipe".to_string(),
                throughput_per_second: 10.0,
                ..Default::default()
            },
        ];
        convert_transports(&mut ctx, &transports);

        let belt = &ctx.items[0];
        assert_eq!(belt.id, "flat-conveyor-mk1");
        assert_eq!(belt.category, "logistics");
        assert_eq!(belt.belt.as_ref().unwrap().speed, 8.0);
        assert!(belt.pipe.is_none());

        let pipe = &ctx.items[1];
        assert_eq!(pipe.id, "fluid-pipe-mk1");
        assert_eq!(pipe.pipe.as_ref().unwrap().speed, 10.0);
        assert!(pipe.belt.is_none());
    }

    #[test]
    fn test_zero_throughput_transport_is_plain_item() {
        let mut ctx = BuildContext::new("1.0");
        convert_transports(
            &mut ctx,
            &[Transport {
                id: "Lift".to_string(),
                name: "Lift".to_string(),
                ..Default::default()
            }],
        );

        assert!(ctx.items[0].belt.is_none());
        assert!(ctx.items[0].pipe.is_none());
    }

    #[test]
    fn test_transport_slug_collision_first_seen_wins() {
        let mut ctx = BuildContext::new("1.0");
        convert_products(
            &mut ctx,
            &[product("Product_FlatConveyorMk1", "Belt Kit", "CountableProductProto", "")],
        );
        convert_transports(
            &mut ctx,
            &[Transport {
                id: "FlatConveyorMk1".to_string(),
                name: "Conveyor Belt".to_string(),
                throughput_per_second: 8.0,
                ..Default::default()
            }],
        );

        assert_eq!(ctx.items.len(), 1);
        assert_eq!(ctx.items[0].name, "Belt Kit");
        assert_eq!(ctx.icons.len(), 1);
    }
}
