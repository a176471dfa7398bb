//! CLI surface and pipeline orchestration.
//!
//! One-shot run: load the mod exports, convert, optionally pack the sprite
//! sheet (which rewrites icon positions), then write data.json. Sprite
//! problems degrade to warnings; input problems abort before any output.

use std::fs;
use std::path::PathBuf;

use clap::Parser;

use crate::convert::defaults::derive_defaults;
use crate::error::{CoilabError, Result};
use crate::output::{display_path, plural, Printer};
use crate::source::SourceData;
use crate::sprite::{scan_icon_files, ImageDecoder, SheetPacker};
use crate::writer::{write_data_json, write_sheet};
use crate::BuildContext;

/// coilab - Captain of Industry to FactorioLab converter
#[derive(Parser, Debug)]
#[command(name = "coilab")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Directory holding products.json, machines_and_buildings.json, and
    /// optionally transports.json
    #[arg(long, short = 'd', value_name = "DIR")]
    pub data: PathBuf,

    /// Folder of source icon images (png/webp/svg); omit to skip the sheet
    #[arg(long, short = 'i', value_name = "DIR")]
    pub icons: Option<PathBuf>,

    /// Output directory for data.json and icons.webp
    #[arg(long, short = 'o', value_name = "DIR", default_value = "factoriolab_output")]
    pub output: PathBuf,

    /// Icon cell size in pixels
    #[arg(
        long,
        value_name = "PX",
        default_value = "64",
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub icon_size: u32,
}

pub fn run(args: Cli) -> Result<()> {
    let printer = Printer::new();

    printer.status(
        "Loading",
        &format!("mod exports from {}", display_path(&args.data)),
    );
    let data = SourceData::load(&args.data)?;
    printer.info(
        "Loaded",
        &format!(
            "game version {}: {}, {}, {}",
            if data.products.game_version.is_empty() {
                "unknown"
            } else {
                data.products.game_version.as_str()
            },
            plural(data.products.products.len(), "product", "products"),
            plural(
                data.machines.machines_and_buildings.len(),
                "machine",
                "machines"
            ),
            plural(data.transports.transports.len(), "transport", "transports"),
        ),
    );

    printer.status("Converting", "products, machines, and transports");
    let mut ctx = crate::convert::convert(&data);
    let defaults = derive_defaults(&data.transports.transports);

    if !args.output.exists() {
        fs::create_dir_all(&args.output).map_err(|e| CoilabError::Io {
            path: args.output.clone(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    // Sheet first: packing rewrites icon positions referenced by data.json.
    pack_sprites(&args, &mut ctx, &printer)?;

    let item_count = ctx.items.len();
    let machine_count = ctx.items.iter().filter(|i| i.machine.is_some()).count();
    let recipe_count = ctx.recipes.len();
    let category_count = ctx.categories.len();
    let icon_count = ctx.icons.len();

    let data_set = ctx.into_data_set(defaults);
    let data_path = args.output.join("data.json");
    printer.status("Writing", &display_path(&data_path));
    write_data_json(&data_set, &data_path)?;

    println!(
        "Wrote {}, {}, {} ({} with machine property), {} to {}",
        plural(category_count, "category", "categories"),
        plural(icon_count, "icon", "icons"),
        plural(item_count, "item", "items"),
        machine_count,
        plural(recipe_count, "recipe", "recipes"),
        args.output.display()
    );

    Ok(())
}

/// Pack the sprite sheet when an icons folder is available.
///
/// No folder, or a folder that does not exist, skips the whole step:
/// positions stay at their "0px 0px" placeholder and no colours are set.
fn pack_sprites(args: &Cli, ctx: &mut BuildContext, printer: &Printer) -> Result<()> {
    let Some(icons_dir) = &args.icons else {
        printer.info("Skipping", "sprite sheet (no icons folder given)");
        return Ok(());
    };
    if !icons_dir.exists() {
        printer.warning(
            "Skipping",
            &format!(
                "sprite sheet (icons folder not found: {})",
                display_path(icons_dir)
            ),
        );
        return Ok(());
    }

    let files = scan_icon_files(icons_dir);
    printer.status(
        "Packing",
        &format!(
            "{} for {}",
            plural(files.len(), "icon file", "icon files"),
            plural(ctx.icons.len(), "cell", "cells"),
        ),
    );

    let packer = SheetPacker::new(args.icon_size);
    let decoder = ImageDecoder::new();
    let (sheet, warnings) = packer.pack(&mut ctx.icons, &ctx.icon_file_hints, &files, &decoder);
    for warning in &warnings {
        printer.warning("Warning", warning);
    }

    if sheet.width() > 0 {
        let sheet_path = args.output.join("icons.webp");
        write_sheet(&sheet, &sheet_path)?;
        printer.status("Writing", &display_path(&sheet_path));
    }

    Ok(())
}
