//! Per-draw shader state.
//!
//! The scene shader keeps every uniform until it is overwritten, so a draw that does not set
//! something inherits it from the draw before. [`ShaderBinder::apply`] takes a complete
//! [`DrawState`] and writes all of it.

use glam::{Mat4, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::{
    abs::TextureDevice,
    error::BindError,
    registry::{Material, MaterialRegistry, TextureRegistry},
    render::uniforms::{ShaderBridge, UniformKey, UniformValue},
};

/// Builds a model matrix. Points are scaled first, then rotated about X, Y and Z (in that
/// order, angles in degrees) and finally translated.
pub fn compose_transform(
    scale: Vec3,
    x_rotation_degrees: f32,
    y_rotation_degrees: f32,
    z_rotation_degrees: f32,
    translation: Vec3,
) -> Mat4 {
    Mat4::from_translation(translation)
        * Mat4::from_rotation_z(z_rotation_degrees.to_radians())
        * Mat4::from_rotation_y(y_rotation_degrees.to_radians())
        * Mat4::from_rotation_x(x_rotation_degrees.to_radians())
        * Mat4::from_scale(scale)
}

/// Placement of one object.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transform {
    pub scale: Vec3,
    /// Rotation about X, Y and Z in degrees.
    pub rotation: Vec3,
    pub position: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: Vec3::ONE,
            rotation: Vec3::ZERO,
            position: Vec3::ZERO,
        }
    }
}

impl Transform {
    pub fn matrix(&self) -> Mat4 {
        compose_transform(
            self.scale,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
            self.position,
        )
    }
}

/// How the surface colour of a draw is produced. Colour and texture are mutually exclusive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Shading {
    Color(Vec4),
    Texture(String),
}

/// Everything the shader needs for one draw.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawState {
    #[serde(default)]
    pub transform: Transform,
    pub shading: Shading,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default = "default_uv_scale")]
    pub uv_scale: Vec2,
    #[serde(default = "default_lighting")]
    pub lighting: bool,
}

fn default_uv_scale() -> Vec2 {
    Vec2::ONE
}

fn default_lighting() -> bool {
    true
}

/// Writes transforms, materials and textures into a [`ShaderBridge`].
pub struct ShaderBinder<'a, B: ShaderBridge, D: TextureDevice> {
    bridge: &'a mut B,
    textures: &'a TextureRegistry<D>,
    materials: &'a MaterialRegistry,
}

impl<'a, B: ShaderBridge, D: TextureDevice> ShaderBinder<'a, B, D> {
    pub fn new(
        bridge: &'a mut B,
        textures: &'a TextureRegistry<D>,
        materials: &'a MaterialRegistry,
    ) -> Self {
        Self {
            bridge,
            textures,
            materials,
        }
    }

    fn push(&mut self, key: UniformKey, value: impl Into<UniformValue>) {
        self.bridge.push(key, value.into());
    }

    pub fn set_transform(&mut self, transform: &Transform) {
        self.push(UniformKey::Model, transform.matrix());
    }

    /// Switches texturing off and draws with a flat colour.
    pub fn set_color(&mut self, color: Vec4) {
        self.push(UniformKey::UseTexture, false);
        self.push(UniformKey::ObjectColor, color);
    }

    /// Switches texturing on and samples from the unit the texture is bound to.
    ///
    /// An unknown tag turns texturing back off, so the draw never samples an unrelated unit.
    pub fn set_texture(&mut self, tag: &str) -> Result<(), BindError> {
        match self.textures.slot(tag) {
            Some(slot) => {
                self.push(UniformKey::UseTexture, true);
                self.push(UniformKey::ObjectTexture, slot as i32);
                Ok(())
            }
            None => {
                self.push(UniformKey::UseTexture, false);
                Err(BindError::UnknownTexture(tag.to_string()))
            }
        }
    }

    pub fn set_uv_scale(&mut self, uv_scale: Vec2) {
        self.push(UniformKey::UvScale, uv_scale);
    }

    /// Pushes the material registered under `tag`, or [`Material::fallback`] when there is none.
    pub fn set_material(&mut self, tag: &str) -> Result<(), BindError> {
        let materials = self.materials;
        match materials.get(tag) {
            Some(material) => {
                self.push_material(material);
                Ok(())
            }
            None => {
                self.push_material(&Material::fallback());
                Err(BindError::UnknownMaterial(tag.to_string()))
            }
        }
    }

    fn push_material(&mut self, material: &Material) {
        self.push(UniformKey::MaterialDiffuse, material.diffuse_color);
        self.push(UniformKey::MaterialSpecular, material.specular_color);
        self.push(UniformKey::MaterialShininess, material.shininess);
    }

    pub fn set_lighting_enabled(&mut self, enabled: bool) {
        self.push(UniformKey::UseLighting, enabled);
    }

    /// Writes the complete state of one draw. Missing textures or materials are logged and the
    /// draw goes ahead with the fallbacks.
    pub fn apply(&mut self, state: &DrawState) {
        self.set_transform(&state.transform);
        match &state.shading {
            Shading::Color(color) => self.set_color(*color),
            Shading::Texture(tag) => {
                if let Err(e) = self.set_texture(tag) {
                    log::error!("{e}");
                    self.push(UniformKey::ObjectColor, Vec4::ONE);
                }
            }
        }
        self.set_uv_scale(state.uv_scale);
        let material = match &state.material {
            Some(tag) => self.set_material(tag),
            None => {
                self.push_material(&Material::fallback());
                Ok(())
            }
        };
        if let Err(e) = material {
            log::warn!("{e}");
        }
        self.set_lighting_enabled(state.lighting);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeDevice, RecordingBridge};
    use image::{DynamicImage, Rgb, RgbImage};

    fn assert_close(a: Vec3, b: Vec3) {
        assert!((a - b).length() < 1e-5, "{a} != {b}");
    }

    fn registries() -> (TextureRegistry<FakeDevice>, MaterialRegistry) {
        let mut textures = TextureRegistry::new(FakeDevice::default());
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(2, 2, Rgb([0, 0, 0])));
        textures.register_image(image.clone(), "ground").unwrap();
        textures.register_image(image, "tent").unwrap();
        let mut materials = MaterialRegistry::new();
        materials.register(Material {
            tag: "tent".to_string(),
            diffuse_color: Vec3::new(0.2, 0.4, 0.1),
            specular_color: Vec3::splat(0.2),
            shininess: 16.0,
        });
        (textures, materials)
    }

    #[test]
    fn test_identity_transform() {
        let m = compose_transform(Vec3::ONE, 0.0, 0.0, 0.0, Vec3::ZERO);
        assert!(m.abs_diff_eq(Mat4::IDENTITY, 1e-6));
        assert!(Transform::default().matrix().abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn test_y_rotation_maps_x_to_negative_z() {
        let m = compose_transform(Vec3::ONE, 0.0, 90.0, 0.0, Vec3::ZERO);
        assert_close(m.transform_point3(Vec3::X), Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_rotation_order_is_x_then_y() {
        let p = Vec3::Y;
        let composed = compose_transform(Vec3::ONE, 90.0, 90.0, 0.0, Vec3::ZERO);
        let y_then_x =
            Mat4::from_rotation_x(90f32.to_radians()) * Mat4::from_rotation_y(90f32.to_radians());

        assert_close(composed.transform_point3(p), Vec3::X);
        assert_close(y_then_x.transform_point3(p), Vec3::Z);
    }

    #[test]
    fn test_scale_rotate_translate_order() {
        let m = compose_transform(Vec3::new(2.0, 1.0, 1.0), 0.0, 0.0, 90.0, Vec3::new(0.0, 0.0, 5.0));
        assert_close(m.transform_point3(Vec3::X), Vec3::new(0.0, 2.0, 5.0));
    }

    #[test]
    fn test_color_disables_texturing() {
        let (textures, materials) = registries();
        let mut bridge = RecordingBridge::default();
        let mut binder = ShaderBinder::new(&mut bridge, &textures, &materials);
        binder.set_texture("tent").unwrap();
        binder.set_color(Vec4::new(1.0, 0.0, 0.0, 1.0));

        assert_eq!(
            bridge.last(UniformKey::UseTexture),
            Some(UniformValue::Bool(false))
        );
        assert_eq!(
            bridge.last(UniformKey::ObjectColor),
            Some(UniformValue::Vec4(Vec4::new(1.0, 0.0, 0.0, 1.0)))
        );
    }

    #[test]
    fn test_texture_resolves_to_slot() {
        let (textures, materials) = registries();
        let mut bridge = RecordingBridge::default();
        let mut binder = ShaderBinder::new(&mut bridge, &textures, &materials);
        binder.set_texture("tent").unwrap();

        assert_eq!(
            bridge.last(UniformKey::UseTexture),
            Some(UniformValue::Bool(true))
        );
        assert_eq!(
            bridge.last(UniformKey::ObjectTexture),
            Some(UniformValue::Int(1))
        );
    }

    #[test]
    fn test_unknown_texture_turns_texturing_off() {
        let (textures, materials) = registries();
        let mut bridge = RecordingBridge::default();
        let mut binder = ShaderBinder::new(&mut bridge, &textures, &materials);
        let result = binder.set_texture("sky");

        assert!(matches!(result, Err(BindError::UnknownTexture(tag)) if tag == "sky"));
        assert_eq!(
            bridge.last(UniformKey::UseTexture),
            Some(UniformValue::Bool(false))
        );
        assert_eq!(bridge.last(UniformKey::ObjectTexture), None);
    }

    #[test]
    fn test_material_values_are_pushed() {
        let (textures, materials) = registries();
        let mut bridge = RecordingBridge::default();
        let mut binder = ShaderBinder::new(&mut bridge, &textures, &materials);
        binder.set_material("tent").unwrap();

        assert_eq!(
            bridge.last(UniformKey::MaterialDiffuse),
            Some(UniformValue::Vec3(Vec3::new(0.2, 0.4, 0.1)))
        );
        assert_eq!(
            bridge.last(UniformKey::MaterialSpecular),
            Some(UniformValue::Vec3(Vec3::splat(0.2)))
        );
        assert_eq!(
            bridge.last(UniformKey::MaterialShininess),
            Some(UniformValue::Float(16.0))
        );
    }

    #[test]
    fn test_unknown_material_pushes_fallback() {
        let (textures, materials) = registries();
        let mut bridge = RecordingBridge::default();
        let mut binder = ShaderBinder::new(&mut bridge, &textures, &materials);
        binder.set_material("tent").unwrap();
        let result = binder.set_material("rock");

        assert!(matches!(result, Err(BindError::UnknownMaterial(_))));
        let fallback = Material::fallback();
        assert_eq!(
            bridge.last(UniformKey::MaterialDiffuse),
            Some(UniformValue::Vec3(fallback.diffuse_color))
        );
        assert_eq!(
            bridge.last(UniformKey::MaterialShininess),
            Some(UniformValue::Float(fallback.shininess))
        );
    }

    #[test]
    fn test_apply_writes_every_uniform() {
        let (textures, materials) = registries();
        let mut bridge = RecordingBridge::default();
        let state = DrawState {
            transform: Transform {
                position: Vec3::new(1.0, 2.0, 3.0),
                ..Transform::default()
            },
            shading: Shading::Texture("ground".to_string()),
            material: Some("tent".to_string()),
            uv_scale: Vec2::splat(10.0),
            lighting: false,
        };
        ShaderBinder::new(&mut bridge, &textures, &materials).apply(&state);

        for key in [
            UniformKey::Model,
            UniformKey::UseTexture,
            UniformKey::ObjectTexture,
            UniformKey::UvScale,
            UniformKey::MaterialDiffuse,
            UniformKey::MaterialSpecular,
            UniformKey::MaterialShininess,
            UniformKey::UseLighting,
        ] {
            assert!(bridge.last(key).is_some(), "{key:?} was not written");
        }
        assert_eq!(
            bridge.last(UniformKey::Model),
            Some(UniformValue::Mat4(Mat4::from_translation(Vec3::new(
                1.0, 2.0, 3.0
            ))))
        );
        assert_eq!(
            bridge.last(UniformKey::UvScale),
            Some(UniformValue::Vec2(Vec2::splat(10.0)))
        );
        assert_eq!(
            bridge.last(UniformKey::UseLighting),
            Some(UniformValue::Bool(false))
        );
    }

    #[test]
    fn test_apply_does_not_inherit_previous_draw() {
        let (textures, materials) = registries();
        let mut bridge = RecordingBridge::default();
        let textured = DrawState {
            transform: Transform::default(),
            shading: Shading::Texture("tent".to_string()),
            material: Some("tent".to_string()),
            uv_scale: Vec2::splat(4.0),
            lighting: true,
        };
        let plain = DrawState {
            transform: Transform::default(),
            shading: Shading::Color(Vec4::ONE),
            material: None,
            uv_scale: Vec2::ONE,
            lighting: true,
        };
        let mut binder = ShaderBinder::new(&mut bridge, &textures, &materials);
        binder.apply(&textured);
        binder.apply(&plain);

        assert_eq!(
            bridge.last(UniformKey::UseTexture),
            Some(UniformValue::Bool(false))
        );
        assert_eq!(
            bridge.last(UniformKey::UvScale),
            Some(UniformValue::Vec2(Vec2::ONE))
        );
        assert_eq!(
            bridge.last(UniformKey::MaterialShininess),
            Some(UniformValue::Float(Material::fallback().shininess))
        );
    }

    #[test]
    fn test_draw_state_defaults_from_json() {
        let state: DrawState = serde_json::from_str(r#"{ "shading": { "texture": "rock" } }"#).unwrap();
        assert_eq!(state.transform, Transform::default());
        assert_eq!(state.shading, Shading::Texture("rock".to_string()));
        assert_eq!(state.material, None);
        assert_eq!(state.uv_scale, Vec2::ONE);
        assert!(state.lighting);
    }
}
