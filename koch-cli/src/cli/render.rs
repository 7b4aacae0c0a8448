//! PNG rasterization through resvg.
//!
//! The scene is written to SVG first and rasterized from there, so PNG
//! output always matches the SVG output exactly.

use std::io::Cursor;

use anyhow::{anyhow, Context, Result};
use image::{DynamicImage, ImageFormat, RgbaImage};
use resvg::usvg;
use tiny_skia::{Pixmap, Transform};

/// Largest PNG edge we agree to allocate.
const MAX_DIMENSION: u32 = 16_384;

/// Rasterize an SVG document to PNG bytes, scaled by `scale`.
pub fn svg_to_png(svg: &str, scale: f64) -> Result<Vec<u8>> {
    if !(scale.is_finite() && scale > 0.0) {
        return Err(anyhow!("scale must be a positive number, got {}", scale));
    }

    let options = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &options).context("failed to parse generated SVG")?;

    let size = tree.size();
    let width = (size.width() as f64 * scale).round() as u32;
    let height = (size.height() as f64 * scale).round() as u32;
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(anyhow!(
            "PNG size {}x{} is outside 1..={} pixels",
            width,
            height,
            MAX_DIMENSION
        ));
    }

    let mut pixmap =
        Pixmap::new(width, height).ok_or_else(|| anyhow!("failed to create {}x{} pixmap", width, height))?;
    let transform = Transform::from_scale(scale as f32, scale as f32);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    let rgba = RgbaImage::from_raw(width, height, pixmap.take())
        .ok_or_else(|| anyhow!("pixmap size does not match {}x{}", width, height))?;

    let mut png = Vec::new();
    DynamicImage::ImageRgba8(rgba)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .context("failed to encode PNG")?;

    tracing::debug!(width, height, bytes = png.len(), "rasterized PNG");
    Ok(png)
}
