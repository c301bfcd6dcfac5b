//! Surface materials for the lighting model.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// The diffuse/specular response of a surface, looked up by tag.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Material {
    pub tag: String,
    pub diffuse_color: Vec3,
    pub specular_color: Vec3,
    pub shininess: f32,
}

impl Material {
    /// A white, matte material. Pushed when a draw asks for a material that does not exist.
    pub fn fallback() -> Self {
        Self {
            tag: String::new(),
            diffuse_color: Vec3::ONE,
            specular_color: Vec3::ZERO,
            shininess: 1.0,
        }
    }
}

/// Append-only list of materials. The first material with a given tag wins.
#[derive(Default, Debug)]
pub struct MaterialRegistry {
    materials: Vec<Material>,
}

impl MaterialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, material: Material) {
        self.materials.push(material);
    }

    pub fn get(&self, tag: &str) -> Option<&Material> {
        self.materials.iter().find(|material| material.tag == tag)
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}
