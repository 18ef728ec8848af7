use std::{ops::Range, time::Instant};

use glam::Quat;
use wgpu::include_wgsl;

use crate::{
    config::{DrawMode, ParamChange, ViewConfig},
    error::GeometryError,
    geometry::IcosahedronMesh,
    model::{self, Geometry, Model, Models},
    palette,
    polygon::PolygonOutline,
    viewport::Viewport,
    GraphicsContext,
};

/// What the window shows.
#[derive(Debug, Clone)]
pub enum Subject {
    /// Rotating geodesic sphere, rebuilt whenever the quality changes.
    Sphere,
    /// Flat polygon drawn straight in clip space.
    Polygon(PolygonOutline),
}

impl Subject {
    fn label(&self) -> &'static str {
        match self {
            Subject::Sphere => "Geodesic",
            Subject::Polygon(_) => "Polygon",
        }
    }

    fn geometry(&self, config: &ViewConfig) -> Result<Geometry, GeometryError> {
        match self {
            Subject::Sphere => {
                let mesh = IcosahedronMesh::new(config.quality);
                Geometry::from_mesh(&mesh, palette::DEFAULT_PALETTE)
            }
            Subject::Polygon(outline) => Geometry::from_outline(outline, &[palette::RED]),
        }
    }
}

pub struct Scene {
    gfx: GraphicsContext,
    subject: Subject,
    config: ViewConfig,
    models: Models,
    viewport: Viewport,
    triangle_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,
    orientation: Quat,
    last_frame: Option<Instant>,
}

impl Scene {
    pub fn new(
        gfx: &GraphicsContext,
        subject: Subject,
        config: ViewConfig,
    ) -> Result<Self, GeometryError> {
        let models = Models::new(gfx, subject.label(), &subject.geometry(&config)?);
        let viewport = Viewport::new(gfx);

        let pipeline_layout = gfx
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Scene::pipeline_layout"),
                bind_group_layouts: &[viewport.bind_group_layout()],
                push_constant_ranges: &[],
            });

        let shader_module = gfx
            .device
            .create_shader_module(&include_wgsl!("scene.wgsl"));

        let triangle_pipeline = create_pipeline(
            gfx,
            &pipeline_layout,
            &shader_module,
            wgpu::PrimitiveTopology::TriangleList,
        );
        let line_pipeline = create_pipeline(
            gfx,
            &pipeline_layout,
            &shader_module,
            wgpu::PrimitiveTopology::LineList,
        );

        Ok(Self {
            gfx: gfx.clone(),
            subject,
            config,
            models,
            viewport,
            triangle_pipeline,
            line_pipeline,
            orientation: Quat::IDENTITY,
            last_frame: None,
        })
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn apply(&mut self, change: ParamChange) {
        let old_quality = self.config.quality;
        self.config.apply(change);
        if self.config.quality != old_quality && matches!(self.subject, Subject::Sphere) {
            log::info!("rebuilding sphere at quality {}", self.config.quality);
            match self.subject.geometry(&self.config) {
                Ok(geometry) => {
                    self.models = Models::new(&self.gfx, self.subject.label(), &geometry)
                }
                Err(e) => log::error!("failed to rebuild geometry: {}", e),
            }
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        let dt_ms = frame_delta_ms(self.last_frame, now);
        self.last_frame = Some(now);

        match self.subject {
            Subject::Sphere => {
                let step = self.config.rotation_step(dt_ms);
                self.orientation = (step * self.orientation).normalize();
                self.viewport.update(&self.config, self.orientation);
            }
            Subject::Polygon(_) => self.viewport.update_flat(),
        }
    }

    pub fn draw(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        frame_view: &wgpu::TextureView,
        depth_view: &wgpu::TextureView,
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene::render_pass"),
            color_attachments: &[wgpu::RenderPassColorAttachment {
                view: frame_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: true,
                },
            }],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: true,
                }),
                stencil_ops: None,
            }),
        });

        let (pipeline, model) = match self.config.draw_mode {
            DrawMode::Triangles => (&self.triangle_pipeline, &self.models.triangles),
            DrawMode::Wireframe => (&self.line_pipeline, &self.models.lines),
        };
        render_pass.set_pipeline(pipeline);
        render_pass.set_bind_group(0, self.viewport.bind_group(), &[]);
        render_pass.draw_model(model, 0..1);
    }
}

/// Longest step the animation advances in one frame, so a stalled or hidden
/// window does not make the sphere jump.
const MAX_FRAME_MS: f32 = 100.0;

/// Milliseconds since the previous frame; zero for the first frame.
fn frame_delta_ms(last: Option<Instant>, now: Instant) -> f32 {
    last.map_or(0.0, |last| {
        (now.saturating_duration_since(last).as_secs_f32() * 1000.0).min(MAX_FRAME_MS)
    })
}

fn create_pipeline(
    gfx: &GraphicsContext,
    layout: &wgpu::PipelineLayout,
    shader_module: &wgpu::ShaderModule,
    topology: wgpu::PrimitiveTopology,
) -> wgpu::RenderPipeline {
    gfx.device
        .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Scene::pipeline"),
            layout: Some(layout),
            vertex: wgpu::VertexState {
                module: shader_module,
                entry_point: "vs_main",
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<model::Vertex>() as _,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &*model::VERTEX_ATTRIBUTES,
                }],
            },
            primitive: wgpu::PrimitiveState {
                topology,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: gfx.depth_format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: Default::default(),
            fragment: Some(wgpu::FragmentState {
                module: shader_module,
                entry_point: "fs_main",
                targets: &[wgpu::ColorTargetState {
                    format: gfx.render_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                }],
            }),
            multiview: None,
        })
}

trait RenderPassExt<'a> {
    fn draw_model(&mut self, model: &'a Model, instances: Range<u32>);
}

impl<'a> RenderPassExt<'a> for wgpu::RenderPass<'a> {
    fn draw_model(&mut self, model: &'a Model, instances: Range<u32>) {
        self.set_vertex_buffer(0, model.vertex_buffer.slice(..));
        self.set_index_buffer(model.index_buffer.slice(..), model::INDEX_FORMAT);
        self.draw_indexed(model.index_range.clone(), 0, instances)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn first_frame_does_not_advance() {
        let start = Instant::now() + Duration::from_secs(5);
        assert_eq!(frame_delta_ms(None, start), 0.0);
    }

    #[test]
    fn frame_delta_is_measured_and_capped() {
        let last = Instant::now();
        let dt = frame_delta_ms(Some(last), last + Duration::from_millis(16));
        assert!((dt - 16.0).abs() < 1e-3);
        assert_eq!(
            frame_delta_ms(Some(last), last + Duration::from_secs(10)),
            MAX_FRAME_MS
        );
        assert_eq!(frame_delta_ms(Some(last + Duration::from_secs(1)), last), 0.0);
    }
}
