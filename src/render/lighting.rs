//! Scene lighting: one directional light and a handful of point lights.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::render::uniforms::{
    DirLightField, PointLightField, ShaderBridge, UniformKey, UniformValue,
};

/// The length of the `pointLights` array in the scene shader.
pub const MAX_POINT_LIGHTS: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectionalLight {
    pub direction: Vec3,
    #[serde(default)]
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

/// A point light with constant/linear/quadratic distance attenuation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointLight {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
    pub constant: f32,
    pub linear: f32,
    pub quadratic: f32,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Lighting {
    pub directional: Option<DirectionalLight>,
    pub point_lights: Vec<PointLight>,
}

impl Lighting {
    /// Writes every light into the shader. Unused point light entries are switched off.
    pub fn push<B: ShaderBridge>(&self, bridge: &mut B, view_position: Vec3) {
        let mut push = |key: UniformKey, value: UniformValue| bridge.push(key, value);

        push(UniformKey::UseLighting, true.into());
        push(UniformKey::ViewPosition, view_position.into());

        let dir = |field| UniformKey::DirLight(field);
        match &self.directional {
            Some(light) => {
                push(dir(DirLightField::Direction), light.direction.into());
                push(dir(DirLightField::Ambient), light.ambient.into());
                push(dir(DirLightField::Diffuse), light.diffuse.into());
                push(dir(DirLightField::Specular), light.specular.into());
                push(dir(DirLightField::Active), true.into());
            }
            None => push(dir(DirLightField::Active), false.into()),
        }

        for index in 0..MAX_POINT_LIGHTS {
            let key = |field| UniformKey::PointLight(index, field);
            let Some(light) = self.point_lights.get(index) else {
                push(key(PointLightField::Active), false.into());
                continue;
            };
            push(key(PointLightField::Position), light.position.into());
            push(key(PointLightField::Ambient), light.ambient.into());
            push(key(PointLightField::Diffuse), light.diffuse.into());
            push(key(PointLightField::Specular), light.specular.into());
            push(key(PointLightField::Constant), light.constant.into());
            push(key(PointLightField::Linear), light.linear.into());
            push(key(PointLightField::Quadratic), light.quadratic.into());
            push(key(PointLightField::Active), true.into());
        }
    }
}
