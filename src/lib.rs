// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Trackball-controlled 3D viewer built on wgpu.
//!
//! A virtual trackball maps left-button drags to incremental rotations of
//! the viewed object; the scroll wheel dollies the camera along its
//! forward axis.
//!
//! # Key entry points
//!
//! - [`camera::CameraController`] - trackball orientation and zoom, usable
//!   without a GPU
//! - [`camera::project_to_sphere`] - pointer to unit-sphere mapping
//! - [`engine::TrackviewEngine`] - GPU context, renderer and input state
//! - [`options::Options`] - TOML-backed configuration
//! - `Viewer` - standalone winit window (feature `viewer`)
//!
//! # Architecture
//!
//! Raw window events become [`InputEvent`]s. The
//! [`input::InputProcessor`] tracks the cursor and held buttons and drives
//! the controller. The renderer reads the controller's matrices every
//! frame and draws the [`scene::Scene`]: Phong-lit meshes first, then
//! textured ones, then vertex-colored 2D overlays.

/// Trackball, camera controller and projection.
pub mod camera;
/// GPU engine and GPU-free view state.
pub mod engine;
/// Crate error type.
pub mod error;
/// wgpu context, shader composition, depth target and sampled textures.
pub mod gpu;
/// Platform-agnostic input events and the input processor.
pub mod input;
/// TOML options and presets.
pub mod options;
/// Pipelines and per-frame drawing of the scene.
pub mod renderer;
/// Drawables, meshes, primitives, textures and colors.
pub mod scene;
#[cfg(feature = "viewer")]
mod viewer;

pub use camera::CameraController;
pub use engine::{TrackviewEngine, ViewState};
pub use error::TrackviewError;
pub use input::{InputEvent, KeyAction, MouseButton, MouseButtons};
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
