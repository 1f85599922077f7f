mod state;

use glam::UVec2;

pub use self::state::ViewState;
use crate::error::TrackviewError;
use crate::gpu::{RenderContext, ShaderComposer};
use crate::input::{InputEvent, KeyAction};
use crate::options::Options;
use crate::renderer::Renderer;

/// The viewer engine: GPU context, renderer and interactive state.
///
/// # Construction
///
/// Use [`TrackviewEngine::new`] with a window surface target, or
/// [`TrackviewEngine::new_from_context`] with a pre-built
/// [`RenderContext`] (headless or embedded rendering).
///
/// # Frame loop
///
/// Each frame, call [`render`](Self::render) to draw and present. Call
/// [`resize`](Self::resize) when the window size changes. Input is forwarded
/// via [`handle_input`](Self::handle_input) and
/// [`handle_key_press`](Self::handle_key_press).
pub struct TrackviewEngine {
    /// Core wgpu device, queue, and surface.
    pub context: RenderContext,
    _shader_composer: ShaderComposer,
    renderer: Renderer,
    /// Options, camera controller, scene and pointer state.
    pub state: ViewState,
}

impl TrackviewEngine {
    /// Engine rendering into a window surface.
    ///
    /// # Errors
    ///
    /// Returns [`TrackviewError`] if GPU initialization or shader
    /// composition fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, TrackviewError> {
        let context = RenderContext::new(window, size).await?;
        Self::new_from_context(context, options)
    }

    /// Engine from a pre-built [`RenderContext`].
    ///
    /// Use [`RenderContext::from_device`] to create a surface-less context
    /// from an externally-owned `wgpu::Device` and `wgpu::Queue`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackviewError::Shader`] if shader composition fails.
    pub fn new_from_context(
        context: RenderContext,
        options: Options,
    ) -> Result<Self, TrackviewError> {
        let mut shader_composer = ShaderComposer::new()?;
        let (width, height) = context.size();
        let state = ViewState::new(options, UVec2::new(width, height));
        let renderer = Renderer::new(
            &context,
            &mut shader_composer,
            &state.scene,
            &state.options.display,
        )?;
        log::info!(
            "engine ready: {width}x{height}, {} drawables",
            renderer.drawable_count()
        );
        Ok(Self {
            context,
            _shader_composer: shader_composer,
            renderer,
            state,
        })
    }

    /// Process a platform-agnostic input event.
    ///
    /// Returns `true` if a redraw is needed. Resize events also resize the
    /// surface and depth target.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        if let InputEvent::Resized { width, height } = event {
            self.resize(width, height);
            return width > 0 && height > 0;
        }
        self.state.handle_input(event)
    }

    /// Resolve and execute the action bound to a physical key string.
    pub fn handle_key_press(&mut self, key: &str) -> Option<KeyAction> {
        self.state.handle_key(key)
    }

    /// Whether a quit action has been executed.
    #[must_use]
    pub fn quit_requested(&self) -> bool {
        self.state.quit_requested()
    }

    /// Draw one frame and present it.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain frame cannot be
    /// acquired.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.render_to_texture(&view);
        frame.present();
        Ok(())
    }

    /// Render the scene to the given texture view. The caller owns the
    /// texture; nothing is presented. [`render`](Self::render) goes
    /// through here with the swapchain frame.
    ///
    /// Display options are re-read every frame, so changes made through
    /// [`ViewState::set_options`] show up on the next draw.
    pub fn render_to_texture(&mut self, view: &wgpu::TextureView) {
        self.renderer
            .apply_display(&self.state.options.display, self.context.format());
        self.renderer.prepare(
            &self.context.queue,
            &self.state.camera_controller,
            &self.state.scene,
        );
        let mut encoder = self.context.create_encoder();
        self.renderer.encode(&mut encoder, view, &self.state.scene);
        self.context.submit(encoder);
    }

    /// Resize the surface, depth target and camera projection. Ignores
    /// zero-sized dimensions.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.renderer.resize(&self.context);
        let _ = self
            .state
            .handle_input(InputEvent::Resized { width, height });
    }

    /// Reconfigure the surface after it was lost or became outdated.
    pub fn recover_surface(&self) {
        self.context.reconfigure();
    }
}
