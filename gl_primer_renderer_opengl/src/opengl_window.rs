/// OpenGlWindow - winit window with a current glutin OpenGL core context
///
/// Owns the event loop, the window, the surface and the context. Events are
/// pumped without blocking from `poll_events`; the render loop drives
/// everything from the creating thread.

use std::ffi::CString;
use std::num::NonZeroU32;
use std::ptr;
use std::time::Duration;

use glutin::config::{Config as GlutinConfig, ConfigTemplateBuilder, GlConfig};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentGlContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::surface::{GlSurface, Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasWindowHandle;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{Key, NamedKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window as WinitWindow, WindowId};

use gl_primer::primer::render::Config;
use gl_primer::primer::render_loop::Window;
use gl_primer::primer::{Error, Result};
use gl_primer::{engine_debug, engine_error, engine_info, engine_warn};

use crate::opengl_debug::enable_debug_output;
use crate::opengl_device::OpenGlDevice;

const LOG_SOURCE: &str = "primer::opengl";

/// Window state updated by pumped events
#[derive(Debug, Default)]
struct WindowEvents {
    close_requested: bool,
    resized: Option<PhysicalSize<u32>>,
}

impl ApplicationHandler for WindowEvents {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {}

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.close_requested = true,
            WindowEvent::Resized(size) => self.resized = Some(size),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && event.logical_key == Key::Named(NamedKey::Escape)
                {
                    self.close_requested = true;
                }
            }
            _ => {}
        }
    }
}

/// OpenGL window and context
pub struct OpenGlWindow {
    // Drop order: context, surface, window, event loop
    context: PossiblyCurrentContext,
    surface: Surface<WindowSurface>,
    window: WinitWindow,
    event_loop: EventLoop<()>,
    events: WindowEvents,
    exited: bool,
    pending_resize: Option<(u32, u32)>,
}

impl OpenGlWindow {
    /// Create the window, make its context current and load GL entry points
    ///
    /// Window, surface and context failures are `Error::WindowCreation`; an
    /// unusable function table is `Error::LoaderInit`. Both abort startup.
    pub fn new(config: &Config) -> Result<(Self, OpenGlDevice)> {
        let event_loop = create_event_loop()?;

        let window_config = &config.window;
        let window_attributes = WinitWindow::default_attributes()
            .with_title(window_config.title.clone())
            .with_inner_size(PhysicalSize::new(window_config.width, window_config.height))
            .with_visible(window_config.visible);

        let template = ConfigTemplateBuilder::new().with_alpha_size(8);
        let display_builder = DisplayBuilder::new().with_window_attributes(Some(window_attributes));
        let (window, gl_config) = display_builder
            .build(&event_loop, template, pick_config)
            .map_err(|e| window_error(format!("no suitable GL config: {}", e)))?;
        let window = window.ok_or_else(|| window_error("display builder created no window".to_string()))?;

        let (major, minor) = config.gl_version;
        let raw_window_handle = window.window_handle().ok().map(|handle| handle.as_raw());
        let context_attributes = ContextAttributesBuilder::new()
            .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
            .with_profile(GlProfile::Core)
            .with_debug(config.debug_output)
            .build(raw_window_handle);

        let gl_display = gl_config.display();
        let not_current = unsafe { gl_display.create_context(&gl_config, &context_attributes) }
            .map_err(|e| window_error(format!("OpenGL {}.{} core context: {}", major, minor, e)))?;

        let surface_attributes = window
            .build_surface_attributes(Default::default())
            .map_err(|e| window_error(format!("surface attributes: {}", e)))?;
        let surface = unsafe { gl_display.create_window_surface(&gl_config, &surface_attributes) }
            .map_err(|e| window_error(format!("window surface: {}", e)))?;

        let context = not_current
            .make_current(&surface)
            .map_err(|e| window_error(format!("make context current: {}", e)))?;

        let interval = if window_config.vsync {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = surface.set_swap_interval(&context, interval) {
            engine_warn!(LOG_SOURCE, "Could not set swap interval: {}", e);
        }

        let device = OpenGlDevice::load(|symbol| match CString::new(symbol) {
            Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()),
            Err(_) => ptr::null(),
        })?;

        if config.debug_output {
            enable_debug_output();
        }

        engine_info!(
            LOG_SOURCE,
            "Window '{}' created ({}x{}, vsync {})",
            window_config.title,
            window_config.width,
            window_config.height,
            window_config.vsync
        );

        let opengl_window = Self {
            context,
            surface,
            window,
            event_loop,
            events: WindowEvents::default(),
            exited: false,
            pending_resize: None,
        };
        Ok((opengl_window, device))
    }
}

impl Window for OpenGlWindow {
    fn should_close(&self) -> bool {
        self.events.close_requested || self.exited
    }

    fn swap_buffers(&mut self) -> Result<()> {
        self.surface
            .swap_buffers(&self.context)
            .map_err(|e| Error::BackendError(format!("swap buffers: {}", e)))
    }

    fn poll_events(&mut self) {
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.events);
        if let PumpStatus::Exit(code) = status {
            engine_debug!(LOG_SOURCE, "Event loop exited with code {}", code);
            self.exited = true;
        }

        if let Some(size) = self.events.resized.take() {
            if let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
                self.surface.resize(&self.context, width, height);
                self.pending_resize = Some((size.width, size.height));
            }
        }
    }

    fn take_resize(&mut self) -> Option<(u32, u32)> {
        self.pending_resize.take()
    }

    fn framebuffer_size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }
}

fn window_error(message: String) -> Error {
    engine_error!(LOG_SOURCE, "Window creation failed: {}", message);
    Error::WindowCreation(message)
}

/// Build the event loop, allowing a non-main thread where the platform needs it
fn create_event_loop() -> Result<EventLoop<()>> {
    let mut builder = EventLoop::builder();

    #[cfg(target_os = "windows")]
    {
        use winit::platform::windows::EventLoopBuilderExtWindows;
        builder.with_any_thread(true);
    }
    #[cfg(target_os = "linux")]
    {
        use winit::platform::x11::EventLoopBuilderExtX11;
        builder.with_any_thread(true);
    }

    builder
        .build()
        .map_err(|e| window_error(format!("event loop: {}", e)))
}

/// Prefer single-sampled configs so pixel readback is exact
fn pick_config(configs: Box<dyn Iterator<Item = GlutinConfig> + '_>) -> GlutinConfig {
    configs
        .reduce(|best, candidate| {
            if candidate.num_samples() < best.num_samples() {
                candidate
            } else {
                best
            }
        })
        // find_configs reports an error before an empty list reaches the picker
        .expect("display offered no GL configs")
}
