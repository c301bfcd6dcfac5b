//! Structs and functions for handling textures.
//!
//! The module provides [`DecodedImage`], the CPU side of a texture, and the [`TextureDevice`]
//! trait which turns decoded images into GPU texture objects. [`GlTextureDevice`] is the OpenGL
//! implementation of that trait.

use std::{path::Path, sync::Arc};

use glow::HasContext;
use image::{DynamicImage, GenericImageView};

use crate::error::TextureError;

/// The channel layouts a texture can be uploaded with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    /// 3 channels, opaque.
    Rgb,
    /// 4 channels, with transparency.
    Rgba,
}

impl PixelLayout {
    /// Returns the amount of bytes per pixel.
    pub fn channels(self) -> u8 {
        match self {
            PixelLayout::Rgb => 3,
            PixelLayout::Rgba => 4,
        }
    }

    fn internal_format(self) -> i32 {
        match self {
            PixelLayout::Rgb => glow::RGB8 as i32,
            PixelLayout::Rgba => glow::RGBA8 as i32,
        }
    }

    fn format(self) -> u32 {
        match self {
            PixelLayout::Rgb => glow::RGB,
            PixelLayout::Rgba => glow::RGBA,
        }
    }
}

/// Raw 8-bit pixel data ready to be uploaded, rows ordered bottom to top.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Decodes the image file at `path`.
    pub fn open(path: &Path) -> Result<Self, TextureError> {
        let image = image::open(path).map_err(|source| TextureError::Decode {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_dynamic(image)
    }

    /// Converts an already decoded image, flipping it vertically so the first row in memory is
    /// the bottom row, which is what OpenGL expects.
    ///
    /// Only 3 and 4 channel images are accepted. Anything else is rejected instead of being
    /// converted.
    pub fn from_dynamic(image: DynamicImage) -> Result<Self, TextureError> {
        let layout = match image.color().channel_count() {
            3 => PixelLayout::Rgb,
            4 => PixelLayout::Rgba,
            channels => return Err(TextureError::UnsupportedChannels { channels }),
        };
        let image = image.flipv();
        let (width, height) = image.dimensions();
        let pixels = match layout {
            PixelLayout::Rgb => image.into_rgb8().into_raw(),
            PixelLayout::Rgba => image.into_rgba8().into_raw(),
        };

        Ok(Self {
            width,
            height,
            layout,
            pixels,
        })
    }
}

/// Something that can own GPU texture objects.
pub trait TextureDevice {
    /// The handle identifying one texture object.
    type Handle: Copy + std::fmt::Debug + PartialEq;

    /// Creates a texture object with repeat wrapping and trilinear filtering, uploads the image
    /// and generates its mipmap chain.
    fn upload(&mut self, image: &DecodedImage) -> Result<Self::Handle, TextureError>;

    /// Binds the texture to the specified texture unit.
    fn bind(&mut self, handle: Self::Handle, unit: u32);

    /// Destroys the texture object.
    fn delete(&mut self, handle: Self::Handle);
}

/// [`TextureDevice`] backed by an OpenGL context.
pub struct GlTextureDevice {
    gl: Arc<glow::Context>,
}

impl GlTextureDevice {
    pub fn new(gl: &Arc<glow::Context>) -> Self {
        Self { gl: Arc::clone(gl) }
    }
}

impl TextureDevice for GlTextureDevice {
    type Handle = glow::Texture;

    fn upload(&mut self, image: &DecodedImage) -> Result<Self::Handle, TextureError> {
        unsafe {
            let texture = self.gl.create_texture().map_err(TextureError::Creation)?;
            self.gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            self.gl
                .tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR_MIPMAP_LINEAR as i32,
            );
            self.gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );
            // RGB rows are not 4-byte aligned in general.
            self.gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                image.layout.internal_format(),
                image.width as i32,
                image.height as i32,
                0,
                image.layout.format(),
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(image.pixels.as_slice())),
            );
            self.gl.generate_mipmap(glow::TEXTURE_2D);
            self.gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 4);
            self.gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(texture)
        }
    }

    fn bind(&mut self, handle: Self::Handle, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(handle));
        }
    }

    fn delete(&mut self, handle: Self::Handle) {
        unsafe {
            self.gl.delete_texture(handle);
        }
    }
}
