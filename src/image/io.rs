//! I/O helpers for RGBA images and JSON.
//!
//! - `load_rgba_image`: read a PNG/JPEG/etc. into an owned RGBA buffer.
//! - `save_rgba_image`: write an [`RgbaImage`] to a PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
//!
//! Decode and encode stay entirely on this side of the boundary: the core
//! pipeline only ever sees in-memory rasters.

use super::{Rgba8, RgbaImage};
use image::{Rgba, RgbaImage as EncodedRgba};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert to 8-bit RGBA.
pub fn load_rgba_image(path: &Path) -> Result<RgbaImage, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgba8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img
        .into_raw()
        .chunks_exact(4)
        .map(|c| Rgba8::new(c[0], c[1], c[2], c[3]))
        .collect();
    Ok(RgbaImage::from_raw(width, height, data))
}

/// Save an RGBA buffer to a PNG (or any format `image` infers from `path`).
pub fn save_rgba_image(buffer: &RgbaImage, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = EncodedRgba::new(buffer.w as u32, buffer.h as u32);
    for y in 0..buffer.h {
        for (x, px) in buffer.row(y).iter().enumerate() {
            out.put_pixel(x as u32, y as u32, Rgba([px.r, px.g, px.b, px.a]));
        }
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
