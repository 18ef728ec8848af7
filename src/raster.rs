//! CPU rasterization of polygon outlines, for rendering without a window.

use std::path::Path;

use anyhow::{anyhow, Context};
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Transform};

use crate::{palette::Rgba, polygon::PolygonOutline};

/// Largest outline radius, in pixels, that still fits the rasterizer's
/// fixed-point coordinates.
const MAX_EXTENT: f32 = 1.0e6;

/// Fills the outline into a square `size`×`size` pixmap. The outline is in
/// clip space: `[-1, 1]` on both axes maps onto the whole image, `+y` up.
pub fn rasterize(outline: &PolygonOutline, size: u32, color: Rgba) -> anyhow::Result<Pixmap> {
    let mut pixmap =
        Pixmap::new(size, size).ok_or_else(|| anyhow!("invalid pixmap size {}", size))?;
    pixmap.fill(Color::TRANSPARENT);

    let half = size as f32 / 2.0;
    if outline.radius() * half > MAX_EXTENT {
        return Err(anyhow!(
            "radius {} is too large to rasterize at {}x{}",
            outline.radius(),
            size,
            size
        ));
    }
    let to_pixels = |x: f32, y: f32| (half + x * half, half - y * half);

    let mut builder = PathBuilder::new();
    let mut points = outline.points().iter();
    if let Some(first) = points.next() {
        let (x, y) = to_pixels(first.x, first.y);
        builder.move_to(x, y);
    }
    for p in points {
        let (x, y) = to_pixels(p.x, p.y);
        builder.line_to(x, y);
    }
    builder.close();
    let path = builder
        .finish()
        .ok_or_else(|| anyhow!("outline produced an empty path"))?;

    let mut paint = Paint::default();
    paint.set_color_rgba8(
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        channel(color[3]),
    );
    paint.anti_alias = true;

    pixmap
        .fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None)
        .ok_or_else(|| anyhow!("failed to fill {}-sided polygon", outline.sides()))?;
    Ok(pixmap)
}

pub fn write_png(
    outline: &PolygonOutline,
    size: u32,
    color: Rgba,
    path: &Path,
) -> anyhow::Result<()> {
    let pixmap = rasterize(outline, size, color)?;
    pixmap
        .save_png(path)
        .with_context(|| format!("failed to write {}", path.display()))?;
    log::info!(
        "rasterized {}-sided polygon to {} ({}x{})",
        outline.sides(),
        path.display(),
        size,
        size
    );
    Ok(())
}

fn channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::RED;

    fn alpha_at(pixmap: &Pixmap, x: u32, y: u32) -> u8 {
        pixmap.pixel(x, y).unwrap().alpha()
    }

    #[test]
    fn fills_centre_leaves_corners() {
        let square = PolygonOutline::new(4, 0.8).unwrap();
        let pixmap = rasterize(&square, 64, RED).unwrap();
        assert_eq!(alpha_at(&pixmap, 32, 32), 255);
        assert_eq!(alpha_at(&pixmap, 0, 0), 0);
        assert_eq!(alpha_at(&pixmap, 63, 63), 0);
    }

    #[test]
    fn top_corner_points_up() {
        let triangle = PolygonOutline::new(3, 1.0).unwrap();
        let pixmap = rasterize(&triangle, 100, RED).unwrap();
        // Apex at (0, 1) in clip space is the top edge of the image.
        assert!(alpha_at(&pixmap, 50, 5) > 0);
        assert_eq!(alpha_at(&pixmap, 50, 95), 0);
    }

    #[test]
    fn oversized_outline_is_an_error() {
        let huge = PolygonOutline::new(4, 1.0e20).unwrap();
        assert!(rasterize(&huge, 64, RED).is_err());

        // Larger than the image but within range still covers the centre.
        let big = PolygonOutline::new(4, 50.0).unwrap();
        let pixmap = rasterize(&big, 64, RED).unwrap();
        assert_eq!(alpha_at(&pixmap, 32, 32), 255);
    }

    #[test]
    fn zero_size_is_rejected() {
        let square = PolygonOutline::new(4, 1.0).unwrap();
        assert!(rasterize(&square, 0, RED).is_err());
    }

    #[test]
    fn channel_conversion() {
        assert_eq!(channel(1.0), 255);
        assert_eq!(channel(0.0), 0);
        assert_eq!(channel(2.0), 255);
    }
}
