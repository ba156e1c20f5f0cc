use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use log::info;
use pollster::block_on;
use thiserror::Error;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::platform::run_return::EventLoopExtRunReturn;
use winit::window::WindowBuilder;

use spincube::{bootstrap, CameraParams, LightingParams, Renderer, SceneContext};

const DEFAULT_WIDTH: u32 = 1280;
const DEFAULT_HEIGHT: u32 = 720;

/// Frames simulated when no display is available.
const HEADLESS_FRAMES: u32 = 60;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let ctx = bootstrap(DEFAULT_WIDTH, DEFAULT_HEIGHT).context("failed to assemble scene")?;

    println!(
        "Built scene with {} meshes and {} lights",
        ctx.scene.meshes().len(),
        ctx.scene.lights().len()
    );
    for mesh in ctx.scene.meshes() {
        let style = if mesh.material.wireframe {
            "wireframe"
        } else {
            "solid"
        };
        println!(" - {} ({style})", mesh.name);
    }

    let fallback = ctx.clone();
    match run_interactive(ctx) {
        Ok(()) => Ok(()),
        Err(err) => {
            if err.downcast_ref::<WindowInitError>().is_some() {
                eprintln!(
                    "{err}. Falling back to a headless run (set DISPLAY or install X11 libs to enable rendering)."
                );
                run_headless(fallback)
            } else {
                Err(err)
            }
        }
    }
}

/// Advances the frame tick a fixed number of times without a GPU, then
/// reports where the entities ended up.
fn run_headless(mut ctx: SceneContext) -> Result<()> {
    for _ in 0..HEADLESS_FRAMES {
        ctx.advance_frame();
    }
    print_final_state(&ctx);
    Ok(())
}

fn run_interactive(mut ctx: SceneContext) -> Result<()> {
    // Window-system init panics deep inside winit when no backend is
    // available; catch it so the caller can fall back to a headless run.
    let default_hook = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    let event_loop = panic::catch_unwind(AssertUnwindSafe(EventLoop::new));
    panic::set_hook(default_hook);
    let event_loop =
        event_loop.map_err(|panic| WindowInitError::from_panic("event loop", panic))?;

    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Spincube")
            .with_inner_size(LogicalSize::new(
                DEFAULT_WIDTH as f64,
                DEFAULT_HEIGHT as f64,
            ))
            .build(&event_loop)
            .map_err(|err| WindowInitError::from_error("window", err))?,
    );

    let renderer = block_on(Renderer::new(Arc::clone(&window), &ctx.scene))?;
    let size = window.inner_size();
    ctx.resize(size.width, size.height);

    let mut app = AppState {
        renderer,
        ctx,
        last_error: None,
    };

    let mut event_loop = event_loop;
    event_loop.run_return(|event, _, control_flow| {
        *control_flow = ControlFlow::Poll;
        if let Err(err) = app.process_event(&event, control_flow) {
            app.last_error = Some(err);
            control_flow.set_exit();
        }
    });

    print_final_state(&app.ctx);

    if let Some(err) = app.last_error {
        return Err(err);
    }

    Ok(())
}

struct AppState {
    renderer: Renderer,
    ctx: SceneContext,
    last_error: Option<anyhow::Error>,
}

impl AppState {
    fn process_event(&mut self, event: &Event<()>, control_flow: &mut ControlFlow) -> Result<()> {
        match event {
            Event::WindowEvent { event, window_id } if *window_id == self.renderer.window_id() => {
                match event {
                    WindowEvent::CloseRequested => {
                        control_flow.set_exit();
                    }
                    WindowEvent::Resized(size) => {
                        self.handle_resize(*size);
                    }
                    WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                        self.handle_resize(**new_inner_size);
                    }
                    _ => {}
                }
            }
            Event::RedrawRequested(window_id) if *window_id == self.renderer.window_id() => {
                self.ctx.advance_frame();
                let camera = CameraParams {
                    view_proj: self.ctx.camera.view_proj(),
                    position: self.ctx.camera.position,
                };
                let lighting = LightingParams::from_scene(&self.ctx.scene);
                self.renderer.update_globals(&camera, &lighting);
                if let Err(err) = self.renderer.render(&self.ctx.scene) {
                    match err {
                        wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                            let size = self.renderer.window().inner_size();
                            self.handle_resize(size);
                        }
                        wgpu::SurfaceError::OutOfMemory => {
                            return Err(anyhow!("GPU is out of memory"));
                        }
                        wgpu::SurfaceError::Timeout => {
                            info!("Surface timeout; retrying next frame");
                        }
                    }
                }
            }
            Event::MainEventsCleared => {
                self.renderer.window().request_redraw();
            }
            _ => {}
        }
        Ok(())
    }

    fn handle_resize(&mut self, size: PhysicalSize<u32>) {
        self.renderer.resize(size);
        self.ctx.resize(size.width, size.height);
    }
}

fn print_final_state(ctx: &SceneContext) {
    println!("Final entity states:");
    for mesh in ctx.scene.meshes() {
        println!(
            " - {} rotation=({:.2}, {:.2}, {:.2})",
            mesh.name, mesh.rotation.x, mesh.rotation.y, mesh.rotation.z
        );
    }
    for light in ctx.scene.lights() {
        println!(" - {} intensity={:.2}", light.name, light.intensity);
    }
}

#[derive(Debug, Error)]
#[error("{message}")]
struct WindowInitError {
    message: String,
}

impl WindowInitError {
    fn from_panic(stage: &str, panic: Box<dyn Any + Send>) -> Self {
        Self {
            message: format!("failed to initialize {stage}: {}", panic_message(panic)),
        }
    }

    fn from_error(stage: &str, err: impl std::fmt::Display) -> Self {
        Self {
            message: format!("failed to initialize {stage}: {err}"),
        }
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    match panic.downcast::<String>() {
        Ok(msg) => *msg,
        Err(panic) => match panic.downcast::<&'static str>() {
            Ok(msg) => (*msg).to_string(),
            Err(_) => "unknown panic".into(),
        },
    }
}
