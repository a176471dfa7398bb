//! Icon decoders.
//!
//! [`ImageDecoder`] is the real thing, backed by the image crate.
//! [`StubDecoder`] serves tests an in-memory map of pre-built images and
//! fails for any other path, which doubles as a no-op decoder.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::error::{CoilabError, Result};

use super::IconDecoder;

/// Decoder backed by the image crate. SVG files are indexed by the scanner
/// but cannot be rasterized here; they fail decode and fall into the
/// per-icon warning path.
#[derive(Debug, Default)]
pub struct ImageDecoder;

impl ImageDecoder {
    pub fn new() -> Self {
        Self
    }
}

impl IconDecoder for ImageDecoder {
    fn decode(&self, path: &Path) -> Result<RgbaImage> {
        let img = image::open(path).map_err(|e| CoilabError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to decode image: {}", e),
        })?;
        Ok(img.to_rgba8())
    }
}

/// In-memory decoder for tests.
#[derive(Debug, Default)]
pub struct StubDecoder {
    images: HashMap<PathBuf, RgbaImage>,
}

impl StubDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, image: RgbaImage) {
        self.images.insert(path.into(), image);
    }
}

impl IconDecoder for StubDecoder {
    fn decode(&self, path: &Path) -> Result<RgbaImage> {
        self.images.get(path).cloned().ok_or_else(|| CoilabError::Io {
            path: path.to_path_buf(),
            message: "No stub image registered".to_string(),
        })
    }
}
