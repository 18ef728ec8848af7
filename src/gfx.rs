use std::sync::Arc;

use anyhow::Context;
use winit::window::Window;

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Cheaply cloneable handles shared by everything that talks to the GPU.
#[derive(Clone)]
pub struct GraphicsContext {
    pub window: Arc<Window>,
    pub device: Arc<wgpu::Device>,
    pub queue: Arc<wgpu::Queue>,
    pub render_format: wgpu::TextureFormat,
    pub depth_format: wgpu::TextureFormat,
}

/// The window surface plus its depth buffer, kept in step with the window
/// size.
pub struct Display {
    // Declared before `gfx` so it drops while the window is still alive.
    surface: wgpu::Surface,
    depth_view: wgpu::TextureView,
    pub gfx: GraphicsContext,
}

impl Display {
    pub async fn new(window: Window) -> anyhow::Result<Self> {
        let window = Arc::new(window);
        let instance = wgpu::Instance::new(wgpu::Backends::PRIMARY);
        // SAFETY: `Display` drops `surface` before `gfx`, which holds the
        // window.
        let surface = unsafe { instance.create_surface(&*window) };

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .context("no compatible graphics adapter")?;
        log::info!("using adapter {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Display::device"),
                    features: wgpu::Features::empty(),
                    limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .context("failed to open graphics device")?;

        let render_format = surface
            .get_preferred_format(&adapter)
            .context("surface is incompatible with the adapter")?;

        let gfx = GraphicsContext {
            window,
            device: Arc::new(device),
            queue: Arc::new(queue),
            render_format,
            depth_format: DEPTH_FORMAT,
        };
        let depth_view = configure(&gfx, &surface);

        Ok(Self {
            surface,
            depth_view,
            gfx,
        })
    }

    pub fn resized(&mut self) {
        self.depth_view = configure(&self.gfx, &self.surface);
    }

    pub fn depth_view(&self) -> &wgpu::TextureView {
        &self.depth_view
    }

    pub fn current_frame(&mut self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        match self.surface.get_current_texture() {
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("surface lost, reconfiguring");
                self.resized();
                self.surface.get_current_texture()
            }
            other => other,
        }
    }
}

fn configure(gfx: &GraphicsContext, surface: &wgpu::Surface) -> wgpu::TextureView {
    let size = gfx.window.inner_size();
    let width = size.width.max(1);
    let height = size.height.max(1);

    surface.configure(
        &gfx.device,
        &wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: gfx.render_format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
        },
    );

    let depth_texture = gfx.device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Display::depth_texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: gfx.depth_format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
    });
    depth_texture.create_view(&Default::default())
}
