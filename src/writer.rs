//! Output writers for data.json and the sprite sheet.
//!
//! data.json is written through a temporary sibling path and renamed into
//! place, so an interrupted run never leaves a truncated document behind.

use std::fs;
use std::path::Path;

use image::RgbaImage;

use crate::error::{CoilabError, Result};
use crate::model::DataSet;

/// Serialize and write `data.json` atomically.
pub fn write_data_json(data: &DataSet, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(data).map_err(|e| CoilabError::Convert {
        message: format!("Failed to serialize data.json: {}", e),
        help: None,
    })?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json).map_err(|e| CoilabError::Io {
        path: tmp_path.clone(),
        message: format!("Failed to write output: {}", e),
    })?;
    fs::rename(&tmp_path, path).map_err(|e| CoilabError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to move output into place: {}", e),
    })?;

    Ok(())
}

/// Write the packed sprite sheet. The format follows the file extension;
/// the CLI uses `icons.webp` for FactorioLab.
pub fn write_sheet(sheet: &RgbaImage, path: &Path) -> Result<()> {
    sheet.save(path).map_err(|e| CoilabError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write sprite sheet: {}", e),
    })
}
