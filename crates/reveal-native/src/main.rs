mod render;

use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::thread;

use clap::{Parser, ValueEnum};
use reveal_core::assets::{self, TextureImage};
use reveal_core::constants::{SPHERE_HEIGHT_SEGMENTS, SPHERE_RADIUS, SPHERE_WIDTH_SEGMENTS};
use reveal_core::{
    Camera, FrameLoop, LoadedSurface, Mesh, PointerSample, SceneConfig, SceneVariant, SettleMode,
    SlotId, Surface, TextureHandle,
};
use winit::{event::*, event_loop::EventLoop, window::WindowBuilder};

use crate::render::GpuState;

const MODEL_TEXTURE: TextureHandle = TextureHandle(1);

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Scene {
    /// Spinning textured model with the reveal ramp
    Can,
    /// Sphere with the expanding ring decal
    Sphere,
}

#[derive(Parser, Debug)]
#[command(name = "hover-reveal", version, about = "Pointer-driven surface reveal effects")]
struct Cli {
    #[arg(long, value_enum, default_value_t = Scene::Can)]
    scene: Scene,

    /// glTF/GLB model for the can scene
    #[arg(long)]
    model: Option<PathBuf>,

    /// Colour texture for the can scene
    #[arg(long)]
    texture: Option<PathBuf>,

    /// Ripple debug mode (2 highlights the hover point)
    #[arg(long, default_value_t = 1.0)]
    debug: f32,

    /// Drop reveal progress back to rest when a transition completes
    #[arg(long)]
    snap: bool,
}

impl Cli {
    fn into_config(self) -> SceneConfig {
        let mut config = SceneConfig {
            variant: match self.scene {
                Scene::Can => SceneVariant::Can,
                Scene::Sphere => SceneVariant::Sphere,
            },
            debug_mode: self.debug,
            ..SceneConfig::default()
        };
        if let Some(model) = self.model {
            config.model_path = model;
        }
        if let Some(texture) = self.texture {
            config.texture_path = texture;
        }
        if self.snap {
            config.settle = SettleMode::SnapToRest;
        }
        config
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let config = Cli::parse().into_config();
    log::info!("[main] {:?} scene", config.variant);

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Hover Reveal")
        .build(&event_loop)?;

    let (texture_tx, texture_rx) = mpsc::channel();
    let mut gpu = pollster::block_on(GpuState::new(&window, texture_rx))?;

    let size = window.inner_size();
    let mut frame_loop = FrameLoop::new(Camera::with_aspect(size.width, size.height));
    let slot = frame_loop.reserve_slot();
    let (surface_tx, surface_rx) = mpsc::channel();
    frame_loop.attach_loader(surface_rx);
    spawn_loader(config, slot, surface_tx, texture_tx)?;

    let window = &window;
    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => {
            gpu.resize(size);
            frame_loop.resize(size.width, size.height);
        }
        Event::WindowEvent {
            event: WindowEvent::CursorMoved { position, .. },
            ..
        } => {
            let size = window.inner_size();
            frame_loop.on_pointer_move(PointerSample {
                x: position.x as f32,
                y: position.y as f32,
                width: size.width as f32,
                height: size.height as f32,
            });
        }
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => elwt.exit(),
        Event::AboutToWait => {
            gpu.set_time(frame_loop.elapsed());
            frame_loop.tick_now(&mut gpu);
            match gpu.take_surface_error() {
                None => window.request_redraw(),
                Some(wgpu::SurfaceError::Lost) => gpu.resize(gpu.size()),
                Some(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("[main] GPU out of memory");
                    elwt.exit();
                }
                Some(e) => log::warn!("[main] frame skipped: {e}"),
            }
        }
        _ => {}
    })?;
    Ok(())
}

/// Build the scene's surface off the event-loop thread. Textures go to the
/// renderer before the surface goes to the frame loop, so a surface never
/// shows up ahead of its image.
fn spawn_loader(
    config: SceneConfig,
    slot: SlotId,
    surfaces: Sender<LoadedSurface>,
    textures: Sender<(TextureHandle, TextureImage)>,
) -> anyhow::Result<()> {
    thread::Builder::new()
        .name("asset-loader".into())
        .spawn(move || {
            let surface = build_surface(&config, &textures);
            if surfaces.send(LoadedSurface { slot, surface }).is_err() {
                log::warn!("[loader] frame loop went away before the surface arrived");
            }
        })?;
    Ok(())
}

fn build_surface(config: &SceneConfig, textures: &Sender<(TextureHandle, TextureImage)>) -> Surface {
    match config.variant {
        SceneVariant::Can => {
            let mesh = assets::load_mesh(&config.model_path).unwrap_or_else(|e| {
                log::warn!("[loader] {e}; using a sphere instead");
                fallback_sphere()
            });
            let image = assets::load_texture(&config.texture_path).unwrap_or_else(|e| {
                log::warn!("[loader] {e}; using a flat texture");
                TextureImage::solid([200, 200, 200, 255])
            });
            if textures.send((MODEL_TEXTURE, image)).is_err() {
                log::warn!("[loader] renderer went away before the texture arrived");
            }
            Surface::reveal(mesh, MODEL_TEXTURE, config.settle)
        }
        SceneVariant::Sphere => Surface::ripple(fallback_sphere(), config.debug_mode),
    }
}

fn fallback_sphere() -> Mesh {
    Mesh::uv_sphere(SPHERE_RADIUS, SPHERE_WIDTH_SEGMENTS, SPHERE_HEIGHT_SEGMENTS)
}
