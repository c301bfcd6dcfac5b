//! Scene descriptions: the data a scene is prepared and rendered from.

use std::{collections::BTreeSet, path::Path};

use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::{
    error::SceneError,
    registry::Material,
    render::{
        binding::{DrawState, Shading},
        lighting::{Lighting, MAX_POINT_LIGHTS},
        shapes::Shape,
    },
};

const BUNDLED_SCENE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/campsite.json"
));

/// An image file to load and the tag it is registered under.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextureSource {
    pub tag: String,
    pub path: String,
}

/// One shape drawn with a complete set of shader state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawCall {
    /// Shown in debug logs only.
    #[serde(default)]
    pub name: String,
    pub shape: Shape,
    #[serde(flatten)]
    pub state: DrawState,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDescription {
    #[serde(default = "default_background")]
    pub background: Vec4,
    #[serde(default)]
    pub textures: Vec<TextureSource>,
    #[serde(default)]
    pub materials: Vec<Material>,
    #[serde(default)]
    pub lighting: Lighting,
    pub draws: Vec<DrawCall>,
}

fn default_background() -> Vec4 {
    Vec4::new(0.05, 0.05, 0.1, 1.0)
}

impl SceneDescription {
    /// The campsite scene compiled into the binary.
    pub fn bundled() -> Result<Self, SceneError> {
        Self::parse(BUNDLED_SCENE)
    }

    pub fn from_file(path: &Path) -> Result<Self, SceneError> {
        let data = std::fs::read_to_string(path).map_err(|source| SceneError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&data)
    }

    pub fn parse(data: &str) -> Result<Self, SceneError> {
        let description: Self = serde_json::from_str(data)?;
        let count = description.lighting.point_lights.len();
        if count > MAX_POINT_LIGHTS {
            return Err(SceneError::TooManyPointLights {
                count,
                max: MAX_POINT_LIGHTS,
            });
        }
        Ok(description)
    }

    /// The shapes the draws use, each once.
    pub fn shapes(&self) -> BTreeSet<Shape> {
        self.draws.iter().map(|draw| draw.shape).collect()
    }

    /// Texture tags used by draws that no texture source provides.
    pub fn missing_textures(&self) -> Vec<&str> {
        self.draws
            .iter()
            .filter_map(|draw| match &draw.state.shading {
                Shading::Texture(tag) => Some(tag.as_str()),
                Shading::Color(_) => None,
            })
            .filter(|tag| !self.textures.iter().any(|source| source.tag == *tag))
            .collect()
    }

    /// Material tags used by draws that no material defines.
    pub fn missing_materials(&self) -> Vec<&str> {
        self.draws
            .iter()
            .filter_map(|draw| draw.state.material.as_deref())
            .filter(|tag| !self.materials.iter().any(|material| material.tag == *tag))
            .collect()
    }
}
