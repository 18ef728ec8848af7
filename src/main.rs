use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use geodesic_demos::{
    config::{DrawMode, ViewConfig},
    controls::InputSurface,
    gfx::Display,
    logging, palette,
    polygon::PolygonOutline,
    raster,
    scene::{Scene, Subject},
    IcosahedronMesh, Quality,
};
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::WindowBuilder,
};

/// Geodesic sphere viewer and regular-polygon rasterizer
#[derive(Parser, Debug)]
#[command(name = "geodesic-demos", version, about)]
struct Cli {
    #[command(subcommand)]
    demo: Demo,
}

#[derive(Subcommand, Debug)]
enum Demo {
    /// Open a window with a rotating geodesic sphere
    Sphere {
        /// Number of subdivision passes applied to the icosahedron
        #[arg(long, default_value_t = Quality::default())]
        quality: Quality,

        /// Start in wireframe mode
        #[arg(long)]
        wireframe: bool,
    },
    /// Open a window with a filled regular polygon
    Polygon {
        /// Number of sides (3-10)
        #[arg(long, value_parser = PolygonOutline::parse_sides)]
        sides: u32,

        #[arg(long, default_value_t = 1.0)]
        radius: f32,
    },
    /// Rasterize a regular polygon to a PNG without opening a window
    Rasterize {
        /// Number of sides (3-10)
        #[arg(long, value_parser = PolygonOutline::parse_sides)]
        sides: u32,

        #[arg(long, default_value_t = 1.0)]
        radius: f32,

        /// Image width and height in pixels
        #[arg(long, default_value_t = 512)]
        size: u32,

        #[arg(long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Print the size of a geodesic sphere
    Stats {
        #[arg(long, default_value_t = Quality::default())]
        quality: Quality,
    },
}

fn main() -> anyhow::Result<()> {
    logging::init();
    let cli = Cli::parse();

    match cli.demo {
        Demo::Sphere { quality, wireframe } => {
            let config = ViewConfig {
                quality,
                draw_mode: if wireframe {
                    DrawMode::Wireframe
                } else {
                    DrawMode::Triangles
                },
                ..Default::default()
            };
            run_window("Geodesic sphere", Subject::Sphere, config)
        }
        Demo::Polygon { sides, radius } => {
            let outline = PolygonOutline::new(sides, radius)?;
            let title = format!("{}-sided polygon", sides);
            run_window(&title, Subject::Polygon(outline), ViewConfig::default())
        }
        Demo::Rasterize {
            sides,
            radius,
            size,
            output,
        } => {
            let outline = PolygonOutline::new(sides, radius)?;
            raster::write_png(&outline, size, palette::RED, &output)
        }
        Demo::Stats { quality } => {
            let mesh = IcosahedronMesh::new(quality);
            println!("quality:   {}", mesh.quality());
            println!("vertices:  {}", mesh.vertex_count());
            println!("edges:     {}", mesh.edges().len());
            println!("triangles: {}", mesh.triangle_count());
            Ok(())
        }
    }
}

fn run_window(title: &str, subject: Subject, config: ViewConfig) -> anyhow::Result<()> {
    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(title)
        .build(&event_loop)
        .context("failed to create window")?;

    let mut display = pollster::block_on(Display::new(window))?;
    let mut scene = Scene::new(&display.gfx, subject, config)?;
    let mut input = InputSurface::new();

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Poll;

        if let Some(change) = input.event(&event, scene.config()) {
            scene.apply(change);
        }

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => {
                    display.resized();
                }
                _ => {}
            },
            Event::MainEventsCleared => display.gfx.window.request_redraw(),
            Event::RedrawRequested(_) => {
                scene.update();
                let frame = match display.current_frame() {
                    Ok(frame) => frame,
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("surface out of memory");
                        *control_flow = ControlFlow::Exit;
                        return;
                    }
                    Err(e) => {
                        log::warn!("dropped frame: {}", e);
                        return;
                    }
                };
                let frame_view = frame.texture.create_view(&Default::default());
                let mut encoder =
                    display
                        .gfx
                        .device
                        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                            label: Some("frame_encoder"),
                        });
                scene.draw(&mut encoder, &frame_view, display.depth_view());
                display.gfx.queue.submit(Some(encoder.finish()));
                frame.present();
            }
            _ => {}
        }
    })
}
