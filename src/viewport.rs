use std::f32::consts::TAU;

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat};
use wgpu::util::DeviceExt;

use crate::{config::ViewConfig, GraphicsContext};

const FOV: f32 = 40.0 / 360.0 * TAU;
const Z_NEAR: f32 = 1.0;
const Z_FAR: f32 = 100.0;

#[derive(Debug, Clone, Copy, Pod, Zeroable)]
#[repr(C)]
struct Uniforms {
    projection: [[f32; 4]; 4],
    view: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
}

/// Per-frame projection, view and model transforms, bound at group 0.
pub struct Viewport {
    gfx: GraphicsContext,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
}

impl Viewport {
    pub fn new(gfx: &GraphicsContext) -> Self {
        let uniform_buffer = gfx
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Viewport::uniform_buffer"),
                contents: bytemuck::bytes_of(&Uniforms::zeroed()),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });

        let bind_group_layout =
            gfx.device
                .create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("Viewport::bind_group_layout"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    }],
                });

        let bind_group = gfx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Viewport::bind_group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        Self {
            gfx: gfx.clone(),
            bind_group_layout,
            bind_group,
            uniform_buffer,
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    pub fn aspect(&self) -> f32 {
        let size = self.gfx.window.inner_size();
        size.width.max(1) as f32 / size.height.max(1) as f32
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(FOV, self.aspect(), Z_NEAR, Z_FAR)
    }

    /// Perspective camera looking at the rotated, panned subject.
    pub fn update(&mut self, config: &ViewConfig, orientation: Quat) {
        self.write(&Uniforms {
            projection: self.projection().to_cols_array_2d(),
            view: config.view_matrix().to_cols_array_2d(),
            model: model_matrix(config, orientation).to_cols_array_2d(),
        });
    }

    /// Geometry is already in clip space; pass it through untouched.
    pub fn update_flat(&mut self) {
        let identity = Mat4::IDENTITY.to_cols_array_2d();
        self.write(&Uniforms {
            projection: identity,
            view: identity,
            model: identity,
        });
    }

    fn write(&self, uniforms: &Uniforms) {
        self.gfx
            .queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }
}

pub fn model_matrix(config: &ViewConfig, orientation: Quat) -> Mat4 {
    Mat4::from_rotation_translation(orientation, config.pan())
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::config::ParamChange;

    #[test]
    fn model_rotates_then_pans() {
        let mut config = ViewConfig::default();
        config.apply(ParamChange::PanX(1.0));
        let quarter_turn = Quat::from_rotation_z(TAU / 4.0);
        let p = model_matrix(&config, quarter_turn).transform_point3(Vec3::X);
        assert!((p - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-6);
    }
}
