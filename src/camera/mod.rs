//! Camera system for the viewer.
//!
//! Provides the virtual trackball, the controller that owns the object
//! orientation and camera distance, and the projection/uniform types.

/// Trackball-driven orientation and dolly zoom.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;
/// Pointer-to-sphere projection and incremental drag rotation.
pub mod trackball;

pub use controller::CameraController;
pub use trackball::{project_to_sphere, Trackball, TrackballRotation};
