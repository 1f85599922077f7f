use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

use crate::error::TrackviewError;

/// Pipeline shaders known to the composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shader {
    /// Phong-lit indexed mesh.
    Phong,
    /// Phong-lit indexed mesh with a diffuse texture.
    TexturedPhong,
    /// Unlit vertex-colored 2D geometry.
    VertexColor2D,
}

impl Shader {
    /// Every pipeline shader.
    pub const ALL: [Self; 3] =
        [Self::Phong, Self::TexturedPhong, Self::VertexColor2D];

    fn source(self) -> &'static str {
        match self {
            Self::Phong => {
                include_str!("../../assets/shaders/raster/phong.wgsl")
            }
            Self::TexturedPhong => include_str!(
                "../../assets/shaders/raster/textured_phong.wgsl"
            ),
            Self::VertexColor2D => {
                include_str!("../../assets/shaders/raster/vertex_color_2d.wgsl")
            }
        }
    }

    fn file_path(self) -> &'static str {
        match self {
            Self::Phong => "raster/phong.wgsl",
            Self::TexturedPhong => "raster/textured_phong.wgsl",
            Self::VertexColor2D => "raster/vertex_color_2d.wgsl",
        }
    }
}

/// Shared module definition.
struct ModuleDef {
    source: &'static str,
    file_path: &'static str,
}

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Pre-loads the shared WGSL modules at construction time. Consuming
/// shaders use `#import trackview::module_name` to pull in shared code. The
/// composer produces `naga::Module` IR directly, skipping WGSL re-parse at
/// runtime.
pub struct ShaderComposer {
    composer: Composer,
}

impl ShaderComposer {
    /// Create a composer with all shared modules registered.
    ///
    /// # Errors
    ///
    /// Returns [`TrackviewError::Shader`] if a shared module fails to
    /// parse.
    pub fn new() -> Result<Self, TrackviewError> {
        let mut composer = Composer::default();

        // Dependency order: modules with no imports first.
        let modules: &[ModuleDef] = &[
            ModuleDef {
                source: include_str!("../../assets/shaders/modules/camera.wgsl"),
                file_path: "modules/camera.wgsl",
            },
            ModuleDef {
                source: include_str!(
                    "../../assets/shaders/modules/phong_light.wgsl"
                ),
                file_path: "modules/phong_light.wgsl",
            },
        ];

        for m in modules {
            let registered = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: m.source,
                    file_path: m.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map(|_| ());
            if let Err(e) = registered {
                return Err(TrackviewError::Shader(format!(
                    "failed to register module '{}': {}",
                    m.file_path,
                    e.emit_to_string(&composer)
                )));
            }
            log::debug!("registered shader module {}", m.file_path);
        }

        Ok(Self { composer })
    }

    /// Compose a pipeline shader into a `wgpu::ShaderModule` ready for
    /// pipeline creation.
    ///
    /// # Errors
    ///
    /// Returns [`TrackviewError::Shader`] if composition fails.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        shader: Shader,
    ) -> Result<wgpu::ShaderModule, TrackviewError> {
        let naga_module = self.compose_naga(shader)?;
        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(naga_module)),
        }))
    }

    /// Compose a pipeline shader into a `naga::Module` without a device.
    ///
    /// # Errors
    ///
    /// Returns [`TrackviewError::Shader`] if composition fails.
    pub fn compose_naga(
        &mut self,
        shader: Shader,
    ) -> Result<naga::Module, TrackviewError> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source: shader.source(),
                file_path: shader.file_path(),
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| {
                TrackviewError::Shader(format!(
                    "failed to compose '{}': {}",
                    shader.file_path(),
                    e.emit_to_string(&self.composer)
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_shaders_compose() {
        let mut composer = ShaderComposer::new().unwrap();
        for shader in Shader::ALL {
            let module = composer
                .compose_naga(shader)
                .unwrap_or_else(|e| panic!("{shader:?}: {e}"));
            let entry_points: Vec<_> =
                module.entry_points.iter().map(|ep| ep.name.as_str()).collect();
            assert!(entry_points.contains(&"vs_main"), "{shader:?}");
            assert!(entry_points.contains(&"fs_main"), "{shader:?}");
        }
    }

    #[test]
    fn lit_shaders_validate() {
        let mut composer = ShaderComposer::new().unwrap();
        for shader in [Shader::Phong, Shader::TexturedPhong] {
            let module = composer.compose_naga(shader).unwrap();
            let mut validator = naga::valid::Validator::new(
                naga::valid::ValidationFlags::all(),
                naga::valid::Capabilities::empty(),
            );
            assert!(validator.validate(&module).is_ok(), "{shader:?}");
        }
    }

    #[test]
    fn textured_shader_binds_texture_and_sampler() {
        let mut composer = ShaderComposer::new().unwrap();
        let module = composer.compose_naga(Shader::TexturedPhong).unwrap();
        let bindings: Vec<_> = module
            .global_variables
            .iter()
            .filter_map(|(_, var)| var.binding.as_ref())
            .map(|b| (b.group, b.binding))
            .collect();
        for expected in [(0, 0), (1, 0), (1, 1), (1, 2)] {
            assert!(bindings.contains(&expected), "missing {expected:?}");
        }
    }
}
