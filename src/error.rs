use thiserror::Error;

use crate::{
    geometry::MAX_QUALITY,
    polygon::{MAX_SIDES, MIN_SIDES},
};

/// Rejections raised at the construction boundary. No geometry is produced
/// when one of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("invalid quality {0}: expected an integer in 0..={}", MAX_QUALITY)]
    InvalidQuality(String),

    #[error("invalid side count {0}: expected {}..={} sides", MIN_SIDES, MAX_SIDES)]
    InvalidSideCount(String),

    #[error("invalid radius {0}: expected a finite positive value")]
    InvalidRadius(f32),

    #[error("color palette is empty")]
    EmptyPalette,
}
