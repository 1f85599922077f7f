//! Centralized viewer options with TOML preset support.
//!
//! All tweakable settings (camera, trackball, display, keybindings) are
//! consolidated here. Options serialize to/from TOML so a viewer session
//! can be started from a preset file.

mod camera;
mod display;
mod keybindings;
mod trackball;

use std::path::{Path, PathBuf};

pub use camera::CameraOptions;
pub use display::DisplayOptions;
pub use keybindings::KeybindingOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use trackball::TrackballOptions;

use crate::error::TrackviewError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[camera]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Camera projection, placement, and zoom parameters.
    pub camera: CameraOptions,
    /// Virtual trackball tuning.
    pub trackball: TrackballOptions,
    /// Colors, lighting, and overlay toggles.
    pub display: DisplayOptions,
    /// Keyboard binding options.
    #[schemars(skip)]
    pub keybindings: KeybindingOptions,
}

impl Options {
    /// Generate JSON Schema describing the user-facing options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    pub fn from_toml(content: &str) -> Result<Self, TrackviewError> {
        let mut options: Self = toml::from_str(content)
            .map_err(|e| TrackviewError::OptionsParse(e.to_string()))?;
        options.keybindings.rebuild_reverse_map();
        options.validate()?;
        Ok(options)
    }

    /// Reject values the camera controller cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`TrackviewError::OptionsParse`] naming the first offending
    /// field.
    pub fn validate(&self) -> Result<(), TrackviewError> {
        let camera = &self.camera;
        ensure(camera.fovy > 0.0 && camera.fovy < 180.0, || {
            format!("camera.fovy must be in (0, 180), got {}", camera.fovy)
        })?;
        ensure(camera.znear > 0.0 && camera.zfar > camera.znear, || {
            format!(
                "camera.znear/zfar must satisfy 0 < znear < zfar, got {} / {}",
                camera.znear, camera.zfar
            )
        })?;
        ensure(camera.distance.is_finite(), || {
            format!("camera.distance must be finite, got {}", camera.distance)
        })?;
        ensure(camera.zoom_factor > 0.0 && camera.zoom_factor < 1.0, || {
            format!(
                "camera.zoom_factor must be in (0, 1), got {}",
                camera.zoom_factor
            )
        })?;
        ensure(
            camera.min_distance > 0.0 && camera.min_distance.is_finite(),
            || {
                format!(
                    "camera.min_distance must be positive, got {}",
                    camera.min_distance
                )
            },
        )?;
        ensure(
            camera.max_distance >= camera.min_distance
                && camera.max_distance.is_finite(),
            || {
                format!(
                    "camera.max_distance ({}) must not be below \
                     camera.min_distance ({})",
                    camera.max_distance, camera.min_distance
                )
            },
        )?;
        let epsilon = self.trackball.degenerate_epsilon;
        ensure(epsilon > 0.0 && epsilon.is_finite(), || {
            format!(
                "trackball.degenerate_epsilon must be positive, got {epsilon}"
            )
        })
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, TrackviewError> {
        let content =
            std::fs::read_to_string(path).map_err(TrackviewError::Io)?;
        let options = Self::from_toml(&content)?;
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Serialize to a pretty-printed TOML string.
    pub fn to_toml(&self) -> Result<String, TrackviewError> {
        toml::to_string_pretty(self)
            .map_err(|e| TrackviewError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), TrackviewError> {
        let content = self.to_toml()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(TrackviewError::Io)?;
        }
        std::fs::write(path, content).map_err(TrackviewError::Io)
    }

    /// Path of the preset `name` inside `dir`.
    #[must_use]
    pub fn preset_path(dir: &Path, name: &str) -> PathBuf {
        dir.join(format!("{name}.toml"))
    }

    /// Load the preset `name` from `dir`.
    ///
    /// # Errors
    ///
    /// Returns [`TrackviewError::Io`] if the preset file cannot be read,
    /// or [`TrackviewError::OptionsParse`] if it is malformed.
    pub fn load_preset(dir: &Path, name: &str) -> Result<Self, TrackviewError> {
        let options = Self::load(&Self::preset_path(dir, name))?;
        log::info!("loaded preset '{name}'");
        Ok(options)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

fn ensure(
    ok: bool,
    message: impl FnOnce() -> String,
) -> Result<(), TrackviewError> {
    if ok {
        Ok(())
    } else {
        Err(TrackviewError::OptionsParse(message()))
    }
}
