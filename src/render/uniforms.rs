//! The uniforms of the scene shader.
//!
//! The rest of the crate names uniforms with [`UniformKey`] and only the [`ShaderBridge`] sees the
//! GLSL identifiers they map to.

use std::borrow::Cow;

use glam::{Mat4, Vec2, Vec3, Vec4};

/// Fields of the `dirLight` struct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DirLightField {
    Direction,
    Ambient,
    Diffuse,
    Specular,
    Active,
}

/// Fields of an entry of the `pointLights` array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointLightField {
    Position,
    Ambient,
    Diffuse,
    Specular,
    Constant,
    Linear,
    Quadratic,
    Active,
}

/// Every uniform the scene shader declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UniformKey {
    Model,
    View,
    Projection,
    ViewPosition,
    ObjectColor,
    ObjectTexture,
    UseTexture,
    UseLighting,
    UvScale,
    MaterialDiffuse,
    MaterialSpecular,
    MaterialShininess,
    DirLight(DirLightField),
    PointLight(usize, PointLightField),
}

impl UniformKey {
    /// Returns the identifier of the uniform in the shader source.
    pub fn name(&self) -> Cow<'static, str> {
        match self {
            UniformKey::Model => "model".into(),
            UniformKey::View => "view".into(),
            UniformKey::Projection => "projection".into(),
            UniformKey::ViewPosition => "viewPosition".into(),
            UniformKey::ObjectColor => "objectColor".into(),
            UniformKey::ObjectTexture => "objectTexture".into(),
            UniformKey::UseTexture => "bUseTexture".into(),
            UniformKey::UseLighting => "bUseLighting".into(),
            UniformKey::UvScale => "UVscale".into(),
            UniformKey::MaterialDiffuse => "material.diffuseColor".into(),
            UniformKey::MaterialSpecular => "material.specularColor".into(),
            UniformKey::MaterialShininess => "material.shininess".into(),
            UniformKey::DirLight(field) => {
                let field = match field {
                    DirLightField::Direction => "direction",
                    DirLightField::Ambient => "ambient",
                    DirLightField::Diffuse => "diffuse",
                    DirLightField::Specular => "specular",
                    DirLightField::Active => "bActive",
                };
                format!("dirLight.{field}").into()
            }
            UniformKey::PointLight(index, field) => {
                let field = match field {
                    PointLightField::Position => "position",
                    PointLightField::Ambient => "ambient",
                    PointLightField::Diffuse => "diffuse",
                    PointLightField::Specular => "specular",
                    PointLightField::Constant => "constant",
                    PointLightField::Linear => "linear",
                    PointLightField::Quadratic => "quadratic",
                    PointLightField::Active => "bActive",
                };
                format!("pointLights[{index}].{field}").into()
            }
        }
    }
}

/// A value written into a uniform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UniformValue {
    Bool(bool),
    Int(i32),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
}

impl From<bool> for UniformValue {
    fn from(value: bool) -> Self {
        UniformValue::Bool(value)
    }
}

impl From<i32> for UniformValue {
    fn from(value: i32) -> Self {
        UniformValue::Int(value)
    }
}

impl From<f32> for UniformValue {
    fn from(value: f32) -> Self {
        UniformValue::Float(value)
    }
}

impl From<Vec2> for UniformValue {
    fn from(value: Vec2) -> Self {
        UniformValue::Vec2(value)
    }
}

impl From<Vec3> for UniformValue {
    fn from(value: Vec3) -> Self {
        UniformValue::Vec3(value)
    }
}

impl From<Vec4> for UniformValue {
    fn from(value: Vec4) -> Self {
        UniformValue::Vec4(value)
    }
}

impl From<Mat4> for UniformValue {
    fn from(value: Mat4) -> Self {
        UniformValue::Mat4(value)
    }
}

/// Accepts uniform writes. Written values stay in effect until they are overwritten.
pub trait ShaderBridge {
    fn push(&mut self, key: UniformKey, value: UniformValue);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_names() {
        assert_eq!(UniformKey::Model.name(), "model");
        assert_eq!(UniformKey::UseTexture.name(), "bUseTexture");
        assert_eq!(UniformKey::UvScale.name(), "UVscale");
        assert_eq!(UniformKey::MaterialShininess.name(), "material.shininess");
        assert_eq!(
            UniformKey::DirLight(DirLightField::Active).name(),
            "dirLight.bActive"
        );
        assert_eq!(
            UniformKey::PointLight(1, PointLightField::Quadratic).name(),
            "pointLights[1].quadratic"
        );
    }
}
