use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use once_cell::sync::Lazy;
use wgpu::util::DeviceExt;

use crate::{
    error::GeometryError,
    geometry::IcosahedronMesh,
    palette::{self, Rgba},
    polygon::PolygonOutline,
    GraphicsContext,
};

pub static VERTEX_ATTRIBUTES: Lazy<[wgpu::VertexAttribute; 2]> = Lazy::new(|| {
    wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x4,
    ]
});

pub const INDEX_FORMAT: wgpu::IndexFormat = wgpu::IndexFormat::Uint32;

#[derive(Debug, Default, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

/// CPU-side buffers for one drawable: shared vertices plus a triangle-list
/// and a line-list index set over them.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub triangles: Vec<u32>,
    pub lines: Vec<u32>,
}

impl Geometry {
    pub fn new(
        positions: &[Vec3],
        triangles: Vec<u32>,
        lines: Vec<u32>,
        palette: &[Rgba],
    ) -> Result<Self, GeometryError> {
        let colors = palette::cycle_colors(positions.len(), palette)?;
        let vertices = positions
            .iter()
            .zip(colors)
            .map(|(p, color)| Vertex {
                position: p.to_array(),
                color,
            })
            .collect();
        Ok(Self {
            vertices,
            triangles,
            lines,
        })
    }

    pub fn from_mesh(mesh: &IcosahedronMesh, palette: &[Rgba]) -> Result<Self, GeometryError> {
        let lines = mesh.edges().into_iter().flatten().collect();
        Self::new(
            mesh.vertices(),
            mesh.flat_indices().to_vec(),
            lines,
            palette,
        )
    }

    pub fn from_outline(outline: &PolygonOutline, palette: &[Rgba]) -> Result<Self, GeometryError> {
        let corners = outline.points().len() as u32 - 1;
        let lines = (0..corners).flat_map(|i| [i, i + 1]).collect();
        Self::new(outline.points(), outline.fan_indices(), lines, palette)
    }
}

pub struct Model {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_range: Range<u32>,
}

impl Model {
    pub fn new(
        gfx: &GraphicsContext,
        label: Option<&'static str>,
        vertices: &[Vertex],
        indices: &[u32],
    ) -> Self {
        let vertex_buffer = gfx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label,
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = gfx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label,
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        let index_range = 0..u32::try_from(indices.len()).unwrap();

        Self {
            vertex_buffer,
            index_buffer,
            index_range,
        }
    }
}

/// GPU copies of a [`Geometry`], one model per topology.
pub struct Models {
    pub triangles: Model,
    pub lines: Model,
}

impl Models {
    pub fn new(gfx: &GraphicsContext, label: &'static str, geometry: &Geometry) -> Self {
        log::debug!(
            "uploading {}: {} vertices, {} triangle indices, {} line indices",
            label,
            geometry.vertices.len(),
            geometry.triangles.len(),
            geometry.lines.len()
        );
        Self {
            triangles: Model::new(gfx, Some(label), &geometry.vertices, &geometry.triangles),
            lines: Model::new(gfx, Some(label), &geometry.vertices, &geometry.lines),
        }
    }
}
