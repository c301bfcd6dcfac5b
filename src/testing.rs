//! Recording stand-ins for the GPU, shared by the unit tests.

use crate::{
    abs::{DecodedImage, TextureDevice},
    error::TextureError,
    render::{
        shapes::{Shape, ShapeRenderer},
        uniforms::{ShaderBridge, UniformKey, UniformValue},
    },
};

/// Hands out increasing texture ids and remembers which are still alive.
#[derive(Default)]
pub(crate) struct FakeDevice {
    next: u32,
    pub live: Vec<u32>,
    pub bound: Vec<(u32, u32)>,
    pub uploads: Vec<(u32, u32, u8)>,
}

impl TextureDevice for FakeDevice {
    type Handle = u32;

    fn upload(&mut self, image: &DecodedImage) -> Result<u32, TextureError> {
        self.next += 1;
        self.live.push(self.next);
        self.uploads
            .push((image.width, image.height, image.layout.channels()));
        Ok(self.next)
    }

    fn bind(&mut self, handle: u32, unit: u32) {
        self.bound.push((handle, unit));
    }

    fn delete(&mut self, handle: u32) {
        self.live.retain(|h| *h != handle);
    }
}

#[derive(Default)]
pub(crate) struct RecordingBridge {
    pub pushes: Vec<(UniformKey, UniformValue)>,
}

impl RecordingBridge {
    /// The value the shader would currently hold for `key`.
    pub fn last(&self, key: UniformKey) -> Option<UniformValue> {
        self.pushes
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
    }

    pub fn count(&self, key: UniformKey) -> usize {
        self.pushes.iter().filter(|(k, _)| *k == key).count()
    }
}

impl ShaderBridge for RecordingBridge {
    fn push(&mut self, key: UniformKey, value: UniformValue) {
        self.pushes.push((key, value));
    }
}

#[derive(Default)]
pub(crate) struct RecordingShapes {
    pub loaded: Vec<Shape>,
    pub drawn: Vec<Shape>,
}

impl ShapeRenderer for RecordingShapes {
    fn load_shape(&mut self, shape: Shape) -> Result<(), String> {
        if !self.loaded.contains(&shape) {
            self.loaded.push(shape);
        }
        Ok(())
    }

    fn draw_shape(&mut self, shape: Shape) {
        self.drawn.push(shape);
    }
}
