use std::num::NonZeroU32;
use std::rc::Rc;

use anyhow::{anyhow, Context, Result};
use glutin::config::{ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentContext, Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::prelude::GlSurface;
use glutin::surface::{Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use glutin_winit::DisplayBuilder;
use raw_window_handle::HasWindowHandle;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use lantern_engine::device::gl::{GlBackend, GlInit};

use crate::config::StudioConfig;
use crate::scene::Scene;

/// Runs the studio until its window closes.
pub fn run(config: StudioConfig) -> Result<()> {
    let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut state = StudioState::new(config);
    event_loop
        .run_app(&mut state)
        .context("winit event loop terminated with error")?;

    Ok(())
}

/// One window with its GL surface and the scene drawn into it.
///
/// Field order is drop order: the scene's GL objects go before the context.
struct WindowEntry {
    scene: Scene,
    surface: Surface<WindowSurface>,
    context: PossiblyCurrentContext,
    window: Window,
}

impl WindowEntry {
    fn create(event_loop: &ActiveEventLoop, config: &StudioConfig) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(config.initial_size);

        let template = ConfigTemplateBuilder::new().with_alpha_size(8);
        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attrs))
            .build(event_loop, template, |configs| {
                configs
                    .reduce(|best, config| if config.num_samples() > best.num_samples() { config } else { best })
                    .expect("display reported no GL configs")
            })
            .map_err(|err| anyhow!("failed to create GL display: {err}"))?;
        let window = window.context("display builder returned no window")?;

        let size = window.inner_size();
        let raw = window.window_handle().context("window has no native handle")?.as_raw();
        let display = gl_config.display();

        let context_attrs = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(3, 3))))
            .build(Some(raw));
        let not_current = unsafe { display.create_context(&gl_config, &context_attrs) }
            .context("failed to create OpenGL 3.3 context")?;

        let surface_attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw,
            NonZeroU32::new(size.width).unwrap_or(NonZeroU32::MIN),
            NonZeroU32::new(size.height).unwrap_or(NonZeroU32::MIN),
        );
        let surface = unsafe { display.create_window_surface(&gl_config, &surface_attrs) }
            .context("failed to create window surface")?;
        let context = not_current
            .make_current(&surface)
            .context("failed to make GL context current")?;

        if config.vsync {
            if let Err(err) = surface.set_swap_interval(&context, SwapInterval::Wait(NonZeroU32::MIN)) {
                log::warn!("vsync unavailable: {err}");
            }
        }

        let gl = unsafe { glow::Context::from_loader_function_cstr(|name| display.get_proc_address(name)) };
        let backend = GlBackend::new(
            Rc::new(gl),
            GlInit {
                surface_size: (size.width, size.height),
                ..GlInit::default()
            },
        )
        .context("failed to initialize GL backend")?;

        log::info!("window ready ({}x{} physical)", size.width, size.height);

        Ok(Self {
            scene: Scene::new(backend)?,
            surface,
            context,
            window,
        })
    }

    fn resize(&self, width: u32, height: u32) {
        if let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) {
            self.surface.resize(&self.context, w, h);
            self.scene.resize(width, height);
        }
    }

    fn redraw(&self) -> Result<()> {
        let size = self.window.inner_size();
        self.scene.draw(size.width, size.height)?;
        self.surface
            .swap_buffers(&self.context)
            .context("failed to swap buffers")?;
        Ok(())
    }
}

struct StudioState {
    config: StudioConfig,
    entry: Option<WindowEntry>,
}

impl StudioState {
    fn new(config: StudioConfig) -> Self {
        Self { config, entry: None }
    }
}

impl ApplicationHandler for StudioState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() {
            return;
        }

        match WindowEntry::create(event_loop, &self.config) {
            Ok(entry) => {
                entry.window.request_redraw();
                self.entry = Some(entry);
            }
            Err(e) => {
                log::error!("failed to create studio window: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(entry) = self.entry.as_ref() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => {
                self.entry = None;
                event_loop.exit();
            }
            WindowEvent::Resized(size) => entry.resize(size.width, size.height),
            WindowEvent::RedrawRequested => {
                if let Err(e) = entry.redraw() {
                    log::error!("frame failed: {e:#}");
                    self.entry = None;
                    event_loop.exit();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(entry) = &self.entry {
            entry.window.request_redraw();
        }
    }
}
