//! Sprite sheet packer.
//!
//! Lays every icon out on a square-ish grid, composites the resized source
//! images, and rewrites each icon's `position` to a CSS background-position
//! offset plus an alpha-weighted average colour. Decoding goes through the
//! [`IconDecoder`] seam so layout and averaging stay testable without real
//! image files.

pub mod decoder;

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::RgbaImage;

use walkdir::WalkDir;

use crate::model::IconRef;

pub use decoder::{ImageDecoder, StubDecoder};

/// Average colour fallback for empty or fully transparent icons.
const NEUTRAL_GRAY: &str = "#808080";

/// Source image extensions the icon index accepts.
const ICON_EXTENSIONS: [&str; 3] = ["png", "webp", "svg"];

/// Decodes an icon file into RGBA pixels.
///
/// The packer never opens files itself; tests inject a [`StubDecoder`] and
/// the CLI injects the image-crate-backed [`ImageDecoder`].
pub trait IconDecoder {
    fn decode(&self, path: &Path) -> crate::Result<RgbaImage>;
}

/// Grid dimensions for a sheet of `count` square cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetLayout {
    pub cols: u32,
    pub rows: u32,
    pub size: u32,
}

impl SheetLayout {
    /// Columns are the ceiling of the square root of the icon count; rows
    /// follow from the count.
    pub fn new(count: usize, size: u32) -> Self {
        if count == 0 {
            return Self {
                cols: 0,
                rows: 0,
                size,
            };
        }
        let cols = (count as f64).sqrt().ceil() as u32;
        let rows = (count as u32).div_ceil(cols);
        Self { cols, rows, size }
    }

    /// Top-left pixel of the cell for the icon at `index` (list order).
    pub fn cell(&self, index: usize) -> (u32, u32) {
        let col = index as u32 % self.cols;
        let row = index as u32 / self.cols;
        (col * self.size, row * self.size)
    }

    pub fn width(&self) -> u32 {
        self.cols * self.size
    }

    pub fn height(&self) -> u32 {
        self.rows * self.size
    }
}

/// Index the icon directory: lowercased file stem → path.
///
/// Walks recursively, keeps png/webp/svg files (any case), and sorts paths
/// before indexing so stem collisions resolve the same way on every run.
pub fn scan_icon_files(dir: &Path) -> BTreeMap<String, PathBuf> {
    let mut paths: Vec<PathBuf> = WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file())
        .map(|e| e.path().to_path_buf())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .map(|e| ICON_EXTENSIONS.contains(&e.to_lowercase().as_str()))
                .unwrap_or(false)
        })
        .collect();
    paths.sort();

    let mut files = BTreeMap::new();
    for path in paths {
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            files.entry(stem.to_lowercase()).or_insert(path);
        }
    }
    files
}

/// Packs icons into one sheet image.
pub struct SheetPacker {
    /// Square cell edge in pixels.
    pub size: u32,
}

impl SheetPacker {
    pub fn new(size: u32) -> Self {
        Self { size }
    }

    /// Composite every icon into its grid cell, rewriting `position` (always)
    /// and `color` (when a source file decoded) in place.
    ///
    /// Returns the sheet plus warnings for icons with no matching or
    /// readable source file; those cells stay blank.
    pub fn pack(
        &self,
        icons: &mut [IconRef],
        hints: &HashMap<String, String>,
        files: &BTreeMap<String, PathBuf>,
        decoder: &dyn IconDecoder,
    ) -> (RgbaImage, Vec<String>) {
        let layout = SheetLayout::new(icons.len(), self.size);
        let mut sheet = RgbaImage::new(layout.width(), layout.height());
        let mut warnings = Vec::new();

        for (index, icon) in icons.iter_mut().enumerate() {
            let (x, y) = layout.cell(index);
            icon.position = format!("{}px {}px", -(x as i64), -(y as i64));

            let stem = hints
                .get(&icon.id)
                .map(String::as_str)
                .unwrap_or(&icon.id)
                .to_lowercase();

            let Some(path) = files.get(&stem) else {
                warnings.push(format!(
                    "icon not found for '{}' (looking for: {})",
                    icon.id, stem
                ));
                continue;
            };

            match decoder.decode(path) {
                Ok(img) => {
                    let tile = fit_to_cell(&img, self.size);
                    icon.color = Some(average_color(&tile));
                    imageops::overlay(&mut sheet, &tile, x as i64, y as i64);
                }
                Err(e) => {
                    warnings.push(format!(
                        "failed to load icon file '{}' for '{}': {}",
                        path.display(),
                        icon.id,
                        e
                    ));
                }
            }
        }

        (sheet, warnings)
    }
}

/// Resize an image to fit a size×size cell, preserving aspect ratio and
/// centering on a transparent background. A zero cell size or an empty
/// source yields an empty tile.
pub fn fit_to_cell(img: &RgbaImage, size: u32) -> RgbaImage {
    let mut tile = RgbaImage::new(size, size);
    let (w, h) = img.dimensions();
    if size == 0 || w == 0 || h == 0 {
        return tile;
    }

    let (new_w, new_h) = if w >= h {
        let scaled = ((h as f64 * size as f64 / w as f64).round() as u32).clamp(1, size);
        (size, scaled)
    } else {
        let scaled = ((w as f64 * size as f64 / h as f64).round() as u32).clamp(1, size);
        (scaled, size)
    };

    let resized = imageops::resize(img, new_w, new_h, FilterType::Lanczos3);
    let dx = (size - new_w) / 2;
    let dy = (size - new_h) / 2;
    imageops::overlay(&mut tile, &resized, dx as i64, dy as i64);
    tile
}

/// Alpha-weighted average colour over all non-fully-transparent pixels,
/// as lowercase `#rrggbb`. Fully transparent or empty images yield neutral
/// gray.
pub fn average_color(img: &RgbaImage) -> String {
    let mut r = 0.0f64;
    let mut g = 0.0f64;
    let mut b = 0.0f64;
    let mut alpha = 0.0f64;

    for pixel in img.pixels() {
        let a = pixel[3] as f64;
        if a > 0.0 {
            r += pixel[0] as f64 * a;
            g += pixel[1] as f64 * a;
            b += pixel[2] as f64 * a;
            alpha += a;
        }
    }

    if alpha == 0.0 {
        return NEUTRAL_GRAY.to_string();
    }

    format!(
        "#{:02x}{:02x}{:02x}",
        (r / alpha) as u8,
        (g / alpha) as u8,
        (b / alpha) as u8
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(w: u32, h: u32, rgba: [u8; 4]) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba(rgba))
    }

    fn placeholder(id: &str) -> IconRef {
        IconRef::placeholder(id)
    }

    #[test]
    fn test_layout_square_root_columns() {
        let layout = SheetLayout::new(10, 64);
        assert_eq!(layout.cols, 4);
        assert_eq!(layout.rows, 3);
        assert_eq!(layout.width(), 256);
        assert_eq!(layout.height(), 192);
    }

    #[test]
    fn test_layout_exact_square() {
        let layout = SheetLayout::new(9, 32);
        assert_eq!(layout.cols, 3);
        assert_eq!(layout.rows, 3);
    }

    #[test]
    fn test_layout_empty() {
        let layout = SheetLayout::new(0, 64);
        assert_eq!(layout.width(), 0);
        assert_eq!(layout.height(), 0);
    }

    #[test]
    fn test_layout_cells_walk_rows() {
        let layout = SheetLayout::new(4, 10);
        assert_eq!(layout.cell(0), (0, 0));
        assert_eq!(layout.cell(1), (10, 0));
        assert_eq!(layout.cell(2), (0, 10));
        assert_eq!(layout.cell(3), (10, 10));
    }

    #[test]
    fn test_average_color_solid() {
        let img = solid(4, 4, [255, 0, 0, 255]);
        assert_eq!(average_color(&img), "#ff0000");
    }

    #[test]
    fn test_average_color_ignores_transparent_pixels() {
        let mut img = solid(2, 1, [0, 0, 0, 0]);
        img.put_pixel(0, 0, Rgba([0, 255, 0, 255]));
        assert_eq!(average_color(&img), "#00ff00");
    }

    #[test]
    fn test_average_color_alpha_weighted() {
        // A full-alpha white pixel outweighs a quarter-alpha black one 4:1.
        let mut img = solid(2, 1, [255, 255, 255, 255]);
        img.put_pixel(1, 0, Rgba([0, 0, 0, 64]));
        // 255*255 / (255+64) = 203
        assert_eq!(average_color(&img), "#cbcbcb");
    }

    #[test]
    fn test_average_color_fully_transparent() {
        let img = solid(4, 4, [10, 20, 30, 0]);
        assert_eq!(average_color(&img), "#808080");
    }

    #[test]
    fn test_average_color_empty_image() {
        let img = RgbaImage::new(0, 0);
        assert_eq!(average_color(&img), "#808080");
    }

    #[test]
    fn test_fit_to_cell_wide_image_centers_vertically() {
        let img = solid(8, 4, [0, 0, 255, 255]);
        let tile = fit_to_cell(&img, 4);

        assert_eq!(tile.dimensions(), (4, 4));
        // 8x4 fits as 4x2, centered rows 1..3.
        assert_eq!(tile.get_pixel(0, 0)[3], 0);
        assert_eq!(tile.get_pixel(0, 1)[3], 255);
        assert_eq!(tile.get_pixel(0, 2)[3], 255);
        assert_eq!(tile.get_pixel(0, 3)[3], 0);
    }

    #[test]
    fn test_fit_to_cell_zero_size_yields_empty_tile() {
        let img = solid(8, 8, [255, 0, 0, 255]);
        let tile = fit_to_cell(&img, 0);
        assert_eq!(tile.dimensions(), (0, 0));
    }

    #[test]
    fn test_fit_to_cell_square_fills_cell() {
        let img = solid(16, 16, [0, 255, 0, 255]);
        let tile = fit_to_cell(&img, 8);

        assert_eq!(tile.dimensions(), (8, 8));
        assert_eq!(tile.get_pixel(0, 0)[3], 255);
        assert_eq!(tile.get_pixel(7, 7)[3], 255);
    }

    #[test]
    fn test_pack_positions_and_colors() {
        let mut decoder = StubDecoder::new();
        decoder.insert("/icons/IronOre.png", solid(8, 8, [200, 100, 50, 255]));
        decoder.insert("/icons/Wood.png", solid(8, 8, [0, 128, 0, 255]));

        let files: BTreeMap<String, PathBuf> = BTreeMap::from([
            ("ironore".to_string(), PathBuf::from("/icons/IronOre.png")),
            ("wood".to_string(), PathBuf::from("/icons/Wood.png")),
        ]);
        let hints: HashMap<String, String> = HashMap::from([
            ("iron-ore".to_string(), "IronOre".to_string()),
            ("wood".to_string(), "Wood".to_string()),
        ]);

        let mut icons = vec![placeholder("iron-ore"), placeholder("wood")];
        let packer = SheetPacker::new(4);
        let (sheet, warnings) = packer.pack(&mut icons, &hints, &files, &decoder);

        assert!(warnings.is_empty());
        // Two icons: 2 columns, 1 row.
        assert_eq!(sheet.dimensions(), (8, 4));
        assert_eq!(icons[0].position, "0px 0px");
        assert_eq!(icons[1].position, "-4px 0px");
        assert_eq!(icons[0].color.as_deref(), Some("#c86432"));
        assert_eq!(icons[1].color.as_deref(), Some("#008000"));
        // Pixel data landed in the right cells.
        assert_eq!(sheet.get_pixel(0, 0).0, [200, 100, 50, 255]);
        assert_eq!(sheet.get_pixel(4, 0).0, [0, 128, 0, 255]);
    }

    #[test]
    fn test_pack_missing_icon_warns_and_keeps_defaults() {
        let decoder = StubDecoder::new();
        let files = BTreeMap::new();
        let hints = HashMap::new();

        let mut icons = vec![placeholder("ghost")];
        let packer = SheetPacker::new(4);
        let (sheet, warnings) = packer.pack(&mut icons, &hints, &files, &decoder);

        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("ghost"));
        // Position is still rewritten to the cell offset.
        assert_eq!(icons[0].position, "0px 0px");
        assert_eq!(icons[0].color, None);
        // Cell stays blank.
        assert_eq!(sheet.get_pixel(0, 0)[3], 0);
    }

    #[test]
    fn test_pack_decode_failure_warns_and_continues() {
        let decoder = StubDecoder::new(); // knows no paths, decode fails
        let files: BTreeMap<String, PathBuf> =
            BTreeMap::from([("broken".to_string(), PathBuf::from("/icons/broken.png"))]);
        let hints = HashMap::new();

        let mut icons = vec![placeholder("broken"), placeholder("also-missing")];
        let packer = SheetPacker::new(4);
        let (_sheet, warnings) = packer.pack(&mut icons, &hints, &files, &decoder);

        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("failed to load"));
        assert_eq!(icons[0].color, None);
        assert_eq!(icons[1].position, "-4px 0px");
    }

    #[test]
    fn test_pack_falls_back_to_id_without_hint() {
        let mut decoder = StubDecoder::new();
        decoder.insert("/icons/sand.png", solid(4, 4, [255, 255, 0, 255]));

        let files: BTreeMap<String, PathBuf> =
            BTreeMap::from([("sand".to_string(), PathBuf::from("/icons/sand.png"))]);
        let hints = HashMap::new();

        let mut icons = vec![placeholder("sand")];
        let packer = SheetPacker::new(4);
        let (_sheet, warnings) = packer.pack(&mut icons, &hints, &files, &decoder);

        assert!(warnings.is_empty());
        assert_eq!(icons[0].color.as_deref(), Some("#ffff00"));
    }

    #[test]
    fn test_pack_empty_icon_list() {
        let decoder = StubDecoder::new();
        let mut icons: Vec<IconRef> = Vec::new();
        let packer = SheetPacker::new(64);
        let (sheet, warnings) =
            packer.pack(&mut icons, &HashMap::new(), &BTreeMap::new(), &decoder);

        assert_eq!(sheet.dimensions(), (0, 0));
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_scan_icon_files() {
        use std::fs;
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("IronOre.PNG"), b"x").unwrap();
        fs::write(dir.path().join("wood.webp"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub/water.svg"), b"x").unwrap();

        let files = scan_icon_files(dir.path());

        assert_eq!(files.len(), 3);
        assert!(files.contains_key("ironore"));
        assert!(files.contains_key("wood"));
        assert!(files.contains_key("water"));
        assert!(!files.contains_key("notes"));
    }

    #[test]
    fn test_scan_icon_files_collision_is_deterministic() {
        use std::fs;
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::create_dir(dir.path().join("b")).unwrap();
        fs::write(dir.path().join("a/wood.png"), b"x").unwrap();
        fs::write(dir.path().join("b/wood.png"), b"x").unwrap();

        let files = scan_icon_files(dir.path());

        // First path in sorted order wins.
        assert!(files["wood"].ends_with("a/wood.png"));
    }
}
