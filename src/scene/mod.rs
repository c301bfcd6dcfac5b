//! Preparing and rendering a scene.
//!
//! [`SceneComposer`] owns the texture and material registries of one scene. It fills them from a
//! [`SceneDescription`] once, then renders every frame by pushing lighting and per-draw state
//! through a [`ShaderBridge`] and drawing shapes in description order.

pub mod description;

use std::path::Path;

use glam::{Mat4, Vec3};

pub use description::*;

use crate::{
    abs::TextureDevice,
    error::TextureError,
    registry::{MaterialRegistry, TextureRegistry},
    render::{
        binding::ShaderBinder,
        shapes::{Shape, ShapeRenderer},
        uniforms::{ShaderBridge, UniformKey},
    },
};

/// Camera state for one frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameParams {
    pub view: Mat4,
    pub projection: Mat4,
    pub view_position: Vec3,
}

/// What went wrong while preparing a scene. Nothing here stops the scene from rendering.
#[derive(Debug, Default)]
pub struct PrepareReport {
    pub textures_loaded: usize,
    pub texture_failures: Vec<(String, TextureError)>,
    pub shape_failures: Vec<(Shape, String)>,
}

impl PrepareReport {
    pub fn is_clean(&self) -> bool {
        self.texture_failures.is_empty() && self.shape_failures.is_empty()
    }
}

pub struct SceneComposer<D: TextureDevice> {
    description: SceneDescription,
    textures: TextureRegistry<D>,
    materials: MaterialRegistry,
}

impl<D: TextureDevice> SceneComposer<D> {
    pub fn new(description: SceneDescription, device: D) -> Self {
        Self {
            description,
            textures: TextureRegistry::new(device),
            materials: MaterialRegistry::new(),
        }
    }

    /// Loads every shape, texture and material the scene uses. Texture paths are resolved
    /// against `asset_dir`. Failures are logged and collected, never fatal.
    pub fn prepare<S: ShapeRenderer>(&mut self, shapes: &mut S, asset_dir: &Path) -> PrepareReport {
        let mut report = PrepareReport::default();

        for shape in self.description.shapes() {
            if let Err(e) = shapes.load_shape(shape) {
                log::error!("Failed to load {shape:?} mesh: {e}");
                report.shape_failures.push((shape, e));
            }
        }

        for source in &self.description.textures {
            let path = asset_dir.join(&source.path);
            match self.textures.register(&path, &source.tag) {
                Ok(slot) => {
                    log::debug!("Texture '{}' in slot {}", source.tag, slot);
                    report.textures_loaded += 1;
                }
                Err(e) => {
                    log::error!("Failed to load texture '{}': {e}", source.tag);
                    report.texture_failures.push((source.tag.clone(), e));
                }
            }
        }

        for material in &self.description.materials {
            self.materials.register(material.clone());
        }

        for tag in self.description.missing_materials() {
            log::warn!("Material '{tag}' is used but never defined");
        }

        report
    }

    /// Renders every draw of the scene. The scene shader must already be in use.
    pub fn render<B: ShaderBridge, S: ShapeRenderer>(
        &mut self,
        bridge: &mut B,
        shapes: &mut S,
        frame: &FrameParams,
    ) {
        self.textures.bind_all();

        bridge.push(UniformKey::View, frame.view.into());
        bridge.push(UniformKey::Projection, frame.projection.into());
        self.description.lighting.push(bridge, frame.view_position);

        let mut binder = ShaderBinder::new(bridge, &self.textures, &self.materials);
        for draw in &self.description.draws {
            log::trace!("Drawing '{}'", draw.name);
            binder.apply(&draw.state);
            shapes.draw_shape(draw.shape);
        }
    }

    /// Destroys every GPU texture of the scene.
    pub fn release(&mut self) {
        self.textures.release_all();
    }

    pub fn description(&self) -> &SceneDescription {
        &self.description
    }

    pub fn textures(&self) -> &TextureRegistry<D> {
        &self.textures
    }

    pub fn materials(&self) -> &MaterialRegistry {
        &self.materials
    }
}
