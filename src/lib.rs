//! Geodesic sphere generation and the two small demos built around it: a
//! rotating sphere viewer and a regular-polygon rasterizer.

pub mod config;
pub mod controls;
pub mod error;
pub mod geometry;
pub mod gfx;
pub mod logging;
pub mod model;
pub mod palette;
pub mod polygon;
pub mod raster;
pub mod scene;
pub mod viewport;

pub use crate::{
    error::GeometryError,
    geometry::{IcosahedronMesh, Quality},
    gfx::GraphicsContext,
    polygon::PolygonOutline,
};
