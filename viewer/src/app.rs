use std::ffi::CString;
use std::num::NonZeroU32;
use std::time::Instant;

use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContextSurfaceAccessor,
    PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SurfaceAttributesBuilder, WindowSurface};

use glutin_winit::DisplayBuilder;

use raw_window_handle::HasRawWindowHandle;

use thiserror::Error;

use winit::dpi::{PhysicalSize, Size};
use winit::event::{ElementState, Event, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use gl_wrapper::geometry::{Geometry, GeometryBuilder, GeometryError};
use gl_wrapper::program::{Program, ProgramBuilder, ProgramError, UniformLocation};
use gl_wrapper::renderer::FrameRenderer;

use crate::args::Args;
use crate::scene::SceneConfig;

pub struct App {
    event_loop: EventLoop<()>,
    gl_context: PossiblyCurrentContext,
    gl_window: GlWindow,
    geometry: Geometry,
    program: Program,
    uniform: Option<UniformLocation>,
    scene: SceneConfig,
    started: Instant,
}

impl App {
    /// Creates the window and GL context, loads the GL function pointers and
    /// uploads the scene's program and geometry. Any failure here is fatal.
    pub fn new(args: &Args, scene: SceneConfig) -> Result<Self, AppError> {
        let event_loop = EventLoop::new();
        let window_builder = WindowBuilder::new()
            .with_inner_size(Size::Physical(PhysicalSize::new(args.width, args.height)))
            .with_title(scene.title);
        let display_builder = DisplayBuilder::new().with_window_builder(Some(window_builder));
        let template = ConfigTemplateBuilder::new();

        // The picker closure must return a `Config`; an empty iterator can
        // only panic here. Drivers that enumerate zero configs fail earlier
        // inside `build` on every platform we target.
        let (window, gl_config) = display_builder
            .build(&event_loop, template, |mut configs| {
                configs.next().expect("no matching GL config")
            })
            .map_err(|e| AppError::Display(e.to_string()))?;

        let window = window.ok_or_else(|| AppError::Display("no window was created".into()))?;
        let handle = window.raw_window_handle();
        let gl_display = gl_config.display();

        let context_attr = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .with_profile(GlProfile::Core)
            .build(Some(handle));

        let gl_window = GlWindow::new(window, &gl_config)?;

        let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attr)? }
            .make_current(&gl_window.surface)?;

        gl::load_with(|s| {
            gl_display
                .get_proc_address(CString::new(s).unwrap().as_c_str())
                .cast()
        });

        tracing::info!(title = scene.title, "window and GL context ready");

        let mut geometry_builder = GeometryBuilder::new(scene.vertices);
        for attr in scene.attributes {
            geometry_builder = geometry_builder.with_attribute(*attr);
        }
        let geometry = geometry_builder.build()?;

        let program = ProgramBuilder::new(scene.vertex_src, scene.fragment_src)?.build()?;

        let uniform = match scene.animated_uniform {
            Some(name) => {
                let location = program.uniform_location(name)?;
                if !location.is_valid() {
                    tracing::warn!(name, "uniform not present in linked program");
                }
                Some(location)
            }
            None => None,
        };

        Ok(Self {
            event_loop,
            gl_context,
            gl_window,
            geometry,
            program,
            uniform,
            scene,
            started: Instant::now(),
        })
    }

    pub fn run(self) -> ! {
        let App {
            event_loop,
            gl_context,
            gl_window,
            geometry,
            program,
            uniform,
            scene,
            started,
        } = self;

        let mut renderer = FrameRenderer::new();

        event_loop.run(move |event, _window_target, control_flow| {
            *control_flow = ControlFlow::Wait;
            match event {
                Event::RedrawEventsCleared => {
                    gl_window.window.request_redraw();
                    if let Err(e) = gl_window.surface.swap_buffers(&gl_context) {
                        tracing::error!("failed to present frame: {e}");
                    }
                }
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::Resized(size) => {
                        if size.width != 0 && size.height != 0 {
                            gl_window.surface.resize(
                                &gl_context,
                                NonZeroU32::new(size.width).unwrap(),
                                NonZeroU32::new(size.height).unwrap(),
                            );
                            renderer.resize(size.width, size.height);
                        }
                    }
                    WindowEvent::KeyboardInput { input, .. } => {
                        if input.virtual_keycode == Some(VirtualKeyCode::Escape)
                            && input.state == ElementState::Pressed
                        {
                            control_flow.set_exit();
                        }
                    }
                    WindowEvent::CloseRequested => control_flow.set_exit(),
                    _ => (),
                },
                Event::RedrawRequested(_) => {
                    let [r, g, b] = scene.clear_color;
                    renderer.clear(r, g, b);

                    if let Some(value) = scene.uniform_value(started.elapsed().as_secs_f32()) {
                        renderer.bind_program(&program);
                        if let Some(location) = uniform {
                            program.set_float(location, value);
                        }
                        tracing::trace!(value, "frame uniform");
                    }

                    for call in scene.draw_calls {
                        renderer.draw_range(&geometry, &program, call.first, call.count);
                    }
                }
                _ => (),
            }
        })
    }
}

pub struct GlWindow {
    // XXX the surface must be dropped before the window.
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

impl GlWindow {
    pub fn new(window: Window, config: &Config) -> Result<Self, AppError> {
        let (width, height): (u32, u32) = window.inner_size().into();
        let raw_window_handle = window.raw_window_handle();
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            NonZeroU32::new(width).ok_or(AppError::ZeroSize)?,
            NonZeroU32::new(height).ok_or(AppError::ZeroSize)?,
        );

        let surface = unsafe { config.display().create_window_surface(config, &attrs)? };

        Ok(Self { window, surface })
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("window and display creation failed: {0}")]
    Display(String),
    #[error("window has a zero-sized drawable area")]
    ZeroSize,
    #[error("OpenGL context setup failed: {0}")]
    Context(#[from] glutin::error::Error),
    #[error(transparent)]
    Program(#[from] ProgramError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error("invalid uniform name: {0}")]
    UniformName(#[from] std::ffi::NulError),
}
