use std::time::Duration;

use anyhow::Context;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::WindowId;

use meridian_engine::core::{App as EngineApp, AppControl, FrameCtx, WindowCtx};
use meridian_engine::device::GpuInit;
use meridian_engine::render::SceneRenderer;
use meridian_engine::scene::DrawList;
use meridian_engine::text::{FontId, FontSystem};
use meridian_engine::window::{Runtime, RuntimeConfig};

use crate::animator::BatchMode;
use crate::config::{ClockConfig, ClockSpec};
use crate::controller::{ClockController, FramePacing};
use crate::time_source::SystemTimeSource;

const LATE_FRAME: Duration = Duration::from_millis(100);

/// Clock window builder.
///
/// ```rust,ignore
/// Application::new()
///     .title("Meridian")
///     .font(std::fs::read("DejaVuSans.ttf")?)
///     .clock(ClockSpec::new("clock_tokyo", "Asia/Tokyo").named("Tokyo"))
///     .run()?;
/// ```
///
/// Clocks added with [`clock`](Self::clock) replace the default three.
pub struct Application {
    title: String,
    width: f64,
    height: f64,
    fonts: Vec<Vec<u8>>,
    config: ClockConfig,
    custom_clocks: bool,
}

impl Application {
    pub fn new() -> Self {
        Self {
            title: "meridian".to_string(),
            width: 1200.0,
            height: 520.0,
            fonts: Vec::new(),
            config: ClockConfig::default(),
            custom_clocks: false,
        }
    }

    /// Set the window title.
    pub fn title(mut self, t: impl Into<String>) -> Self {
        self.title = t.into();
        self
    }

    /// Set the initial window size in logical pixels.
    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Register a label font. The first one that parses is used.
    pub fn font(mut self, data: Vec<u8>) -> Self {
        self.fonts.push(data);
        self
    }

    /// Add a clock.
    pub fn clock(mut self, spec: ClockSpec) -> Self {
        if !self.custom_clocks {
            self.config.clocks.clear();
            self.custom_clocks = true;
        }
        self.config.clocks.push(spec);
        self
    }

    /// Replace the clock list.
    pub fn clocks(mut self, specs: Vec<ClockSpec>) -> Self {
        self.config.clocks = specs;
        self.custom_clocks = true;
        self
    }

    pub fn batch_mode(mut self, mode: BatchMode) -> Self {
        self.config.batch_mode = mode;
        self
    }

    /// Replace the whole clock configuration.
    pub fn config(mut self, config: ClockConfig) -> Self {
        self.config = config;
        self.custom_clocks = true;
        self
    }

    /// Validates the configuration, opens the window and runs until it closes.
    ///
    /// Configuration errors are returned before any window is created.
    pub fn run(self) -> anyhow::Result<()> {
        let controller = ClockController::new(self.config, SystemTimeSource)
            .context("invalid clock configuration")?;

        let mut fonts = FontSystem::new();
        let mut font = None;
        for (i, bytes) in self.fonts.iter().enumerate() {
            match fonts.load_font(bytes) {
                Ok(id) => {
                    font = Some(id);
                    break;
                }
                Err(e) => log::warn!("font #{i} rejected: {e}"),
            }
        }
        if font.is_none() {
            log::warn!("no usable font, clock labels are hidden");
        }

        let state = ClockApp {
            controller,
            scene: SceneRenderer::new(),
            draw_list: DrawList::new(),
            fonts,
            font,
        };

        let config = RuntimeConfig {
            title: self.title,
            initial_size: LogicalSize::new(self.width, self.height),
            min_size: Some(LogicalSize::new(320.0, 240.0)),
        };
        Runtime::run(config, GpuInit::default(), state)
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

/// Engine-facing side of the application. User code never sees this type.
struct ClockApp {
    controller: ClockController<SystemTimeSource>,
    scene: SceneRenderer,
    draw_list: DrawList,
    fonts: FontSystem,
    font: Option<FontId>,
}

impl EngineApp for ClockApp {
    fn on_window_event(&mut self, _window_id: WindowId, event: &WindowEvent) -> AppControl {
        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                log::info!("escape pressed, exiting");
                AppControl::Exit
            }
            _ => AppControl::Continue,
        }
    }

    fn on_resized(&mut self, window: &WindowCtx<'_>) {
        if self.controller.is_initialized() {
            self.controller.on_resize(window.logical_size());
        }
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if !self.controller.is_initialized() {
            self.controller.initialize(ctx.window.logical_size());
        }

        // A sweep advances one degree per frame, so a late frame shows as a stutter.
        if self.controller.animator().is_running() && ctx.time.is_late(LATE_FRAME) {
            log::debug!("frame {} late by {:?} mid-sweep", ctx.time.frame_index, ctx.time.gap);
        }

        self.controller.on_frame();
        self.controller.paint(&mut self.draw_list, &self.fonts, self.font);

        if let FramePacing::At(deadline) = self.controller.pacing() {
            ctx.runtime.redraw_at(deadline);
        }

        let scene = &mut self.scene;
        let list = &mut self.draw_list;
        let fonts = &self.fonts;
        ctx.render(self.controller.clear_color(), |rctx, target| {
            scene.render(rctx, target, list, fonts);
        })
    }
}
