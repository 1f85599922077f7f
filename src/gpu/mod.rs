//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, the depth attachment,
//! sampled textures and shader composition.

/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Depth attachment and sampled textures.
pub mod texture;

pub use render_context::{RenderContext, RenderContextError};
pub use shader_composer::{Shader, ShaderComposer};
pub use texture::{DepthTarget, SampledTexture, DEPTH_FORMAT};
