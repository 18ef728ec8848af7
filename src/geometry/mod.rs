mod geodesic;
pub mod icosahedron;

pub use self::geodesic::IcosahedronMesh;

use std::{fmt, str::FromStr};

use crate::error::GeometryError;

/// Highest refinement level accepted at the boundary.
pub const MAX_QUALITY: u32 = 7;

/// Number of subdivision passes applied to the base icosahedron.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(u32);

impl Quality {
    pub const BASE: Self = Self(0);

    pub fn new(passes: u32) -> Result<Self, GeometryError> {
        if passes > MAX_QUALITY {
            return Err(GeometryError::InvalidQuality(passes.to_string()));
        }
        Ok(Self(passes))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// `20 * 4^q`
    pub fn triangle_count(self) -> usize {
        icosahedron::FACE_COUNT << (2 * self.0)
    }

    /// `30 * 4^q`
    pub fn edge_count(self) -> usize {
        icosahedron::EDGE_COUNT << (2 * self.0)
    }

    /// `10 * 4^q + 2`, from `V - E + F = 2`.
    pub fn vertex_count(self) -> usize {
        2 + self.edge_count() - self.triangle_count()
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(3)
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<i64> for Quality {
    type Error = GeometryError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .map_err(|_| GeometryError::InvalidQuality(value.to_string()))
            .and_then(Self::new)
    }
}

impl TryFrom<f64> for Quality {
    type Error = GeometryError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.fract() != 0.0 || !(0.0..=MAX_QUALITY as f64).contains(&value) {
            return Err(GeometryError::InvalidQuality(value.to_string()));
        }
        Self::new(value as u32)
    }
}

impl FromStr for Quality {
    type Err = GeometryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let passes = s
            .trim()
            .parse::<u32>()
            .map_err(|_| GeometryError::InvalidQuality(s.to_owned()))?;
        Self::new(passes)
    }
}
