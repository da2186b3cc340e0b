pub use crate::config::BackendConfig;
use crate::coords::Vec2;
use crate::device::{DeviceObjects, TextureRegistry};
use crate::error::{BackendError, ConfigError, Result};
use crate::gl::Gl;
use crate::gui::{BackendFlags, DrawData, Io, TextureId};
use crate::input::{poll_gamepads, translate_event, ClipboardCache, EventDisposition, Gamepad, HostEvent};
pub use crate::platform::HostCursor;
use crate::platform::resolve_cursor;
use crate::render;
use crate::time::{DisplayMetrics, FrameClock};

/// What the host reports at the start of a frame.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Host frame timestamp in milliseconds.
    pub timestamp_ms: f64,
    /// Surface size in logical pixels; zero means unknown.
    pub logical_size: Vec2,
    /// Drawing-buffer size in physical pixels; zero means "same as logical".
    pub drawing_buffer_size: Vec2,
    /// Gamepad slots as the host enumerates them.
    pub gamepads: Vec<Option<Gamepad>>,
}

/// Requests for the host after `new_frame`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutput {
    /// Cursor to show; `None` leaves the host cursor alone.
    pub cursor: Option<HostCursor>,
    /// Pointer warp requested by the GUI, logical pixels.
    pub set_mouse_pos: Option<Vec2>,
}

/// Platform backend for one GUI context on one GL context.
///
/// Lifecycle: [`Backend::initialize`] once, then per frame
/// [`Backend::new_frame`] and [`Backend::render_draw_data`], with
/// [`Backend::handle_event`] for each host event in between; finally
/// [`Backend::shutdown`]. The backend may be initialized again after shutdown.
pub struct Backend<G: Gl> {
    gl: G,
    config: BackendConfig,
    objects: Option<DeviceObjects<G>>,
    textures: TextureRegistry<G::Texture>,
    font_texture_id: Option<TextureId>,
    clock: FrameClock,
    clipboard: ClipboardCache,
}

impl<G: Gl> Backend<G> {
    pub fn new(gl: G, config: BackendConfig) -> Self {
        let clock = FrameClock::with_clamps(config.dt_min, config.dt_max, config.first_frame_dt);
        Self {
            gl,
            config,
            objects: None,
            textures: TextureRegistry::new(),
            font_texture_id: None,
            clock,
            clipboard: ClipboardCache::new(),
        }
    }

    #[inline]
    pub fn gl(&self) -> &G {
        &self.gl
    }

    #[inline]
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Clipboard text shared with the GUI's clipboard callbacks.
    #[inline]
    pub fn clipboard(&self) -> &ClipboardCache {
        &self.clipboard
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.objects.is_some()
    }

    /// Creates GPU objects, uploads the font atlas and wires `io` to this
    /// backend (key map, backend flags, clipboard callbacks).
    ///
    /// Fails with [`ConfigError::AlreadyInitialized`] if already initialized;
    /// nothing is created in that case.
    pub fn initialize(&mut self, io: &mut Io) -> Result<()> {
        if self.objects.is_some() {
            return Err(ConfigError::AlreadyInitialized.into());
        }

        let objects = DeviceObjects::create(&self.gl, &io.fonts)?;
        let font_id = self.textures.insert(objects.font_texture);
        io.fonts.tex_id = Some(font_id);
        self.font_texture_id = Some(font_id);
        self.objects = Some(objects);

        io.key_map = self.config.key_map;
        io.backend_flags |= BackendFlags::HAS_MOUSE_CURSORS;
        io.opt_mac_osx_behaviors = self.config.mac_osx_behaviors;
        self.clipboard.install(io);
        self.clock.reset();

        log::debug!("backend initialized (font texture {font_id:?})");
        Ok(())
    }

    /// Releases every GPU object and clears `io.fonts.tex_id`. Safe to call
    /// more than once.
    pub fn shutdown(&mut self, io: &mut Io) {
        io.fonts.tex_id = None;
        if let Some(id) = self.font_texture_id.take() {
            self.textures.remove(id);
        }
        if let Some(objects) = self.objects.take() {
            objects.destroy(&self.gl);
            log::debug!("backend shut down");
        }
    }

    /// Makes a host-owned texture drawable under the returned id.
    pub fn register_texture(&mut self, texture: G::Texture) -> TextureId {
        self.textures.insert(texture)
    }

    /// Forgets a texture registered with [`Backend::register_texture`]. The
    /// GL object itself stays with the host.
    pub fn unregister_texture(&mut self, id: TextureId) -> Option<G::Texture> {
        if Some(id) == self.font_texture_id {
            log::debug!("refusing to unregister the font texture");
            return None;
        }
        self.textures.remove(id)
    }

    /// GPU texture behind `id`, if registered.
    pub fn texture(&self, id: TextureId) -> Option<G::Texture> {
        self.textures.get(id)
    }

    /// Applies one host event to `io`.
    pub fn handle_event(&self, io: &mut Io, event: &HostEvent) -> Result<EventDisposition> {
        translate_event(io, &self.clipboard, event)
    }

    /// Per-frame update: display metrics, delta time, gamepads and cursor.
    pub fn new_frame(&mut self, io: &mut Io, input: &FrameInput) -> FrameOutput {
        let metrics = DisplayMetrics::resolve(
            input.logical_size,
            input.drawing_buffer_size,
            self.config.fallback_display_size,
        );
        io.display_size = metrics.display_size;
        io.display_framebuffer_scale = metrics.framebuffer_scale;

        let ft = self.clock.tick(input.timestamp_ms);
        io.delta_time = ft.dt;

        poll_gamepads(io, &input.gamepads);

        FrameOutput {
            cursor: resolve_cursor(io),
            set_mouse_pos: io.want_set_mouse_pos.then_some(io.mouse_pos),
        }
    }

    /// Renders the GUI's draw data for this frame.
    ///
    /// `draw_data` is `None` when the GUI produced no frame; that is an
    /// invalid argument, not a silent skip.
    pub fn render_draw_data(&self, io: &Io, draw_data: Option<&DrawData>) -> Result<()> {
        let draw_data =
            draw_data.ok_or_else(|| BackendError::invalid("no draw data for this frame"))?;
        let objects = self.objects.as_ref().ok_or(ConfigError::NotInitialized)?;
        render::render_draw_data(&self.gl, objects, &self.textures, io, draw_data)
    }

    /// Releases GPU objects (without touching any `Io`) and returns the
    /// context.
    pub fn into_inner(mut self) -> G {
        if let Some(objects) = self.objects.take() {
            objects.destroy(&self.gl);
        }
        self.gl
    }
}
