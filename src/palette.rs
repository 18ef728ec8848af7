use crate::error::GeometryError;

pub type Rgba = [f32; 4];

pub const ORANGE: Rgba = [1.0, 0.6, 0.1, 0.8];
pub const RED: Rgba = [1.0, 0.0, 0.0, 1.0];

pub const DEFAULT_PALETTE: &[Rgba] = &[ORANGE];

/// One color per vertex, walking the palette in order and wrapping around.
pub fn cycle_colors(vertex_count: usize, palette: &[Rgba]) -> Result<Vec<Rgba>, GeometryError> {
    if palette.is_empty() {
        return Err(GeometryError::EmptyPalette);
    }
    Ok(palette.iter().copied().cycle().take(vertex_count).collect())
}
