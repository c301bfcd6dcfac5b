//! Error types.
//!
//! Every failure in texture loading and shader binding is recoverable: the caller gets one of
//! these back, logs it and keeps rendering with degraded visuals. Only [`AppError`] is fatal, and
//! only during start-up.

use std::path::PathBuf;

/// Failures while registering or resolving textures.
#[derive(thiserror::Error, Debug)]
pub enum TextureError {
    /// The image file is missing, corrupt or in a format the decoder does not know.
    #[error("could not load image {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The image decoded fine but has a channel layout other than RGB or RGBA.
    #[error("cannot handle image with {channels} channels")]
    UnsupportedChannels { channels: u8 },

    /// Every texture slot is already taken.
    #[error("texture registry is full ({capacity} slots), '{tag}' not stored")]
    CapacityExceeded { tag: String, capacity: usize },

    /// A texture with this tag is already registered.
    #[error("texture tag '{0}' is already registered")]
    DuplicateTag(String),

    /// The graphics driver refused to allocate a texture object.
    #[error("failed to create texture: {0}")]
    Creation(String),

    /// No texture is registered under this tag.
    #[error("texture tag '{0}' not found")]
    UnknownTag(String),
}

/// Failures while pushing per-draw state into the shader.
#[derive(thiserror::Error, Debug)]
pub enum BindError {
    #[error("texture tag '{0}' not found")]
    UnknownTexture(String),

    #[error("material tag '{0}' not found")]
    UnknownMaterial(String),
}

/// Failures while reading a scene description.
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    #[error("could not read scene file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed scene description: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("scene uses {count} point lights, at most {max} are supported")]
    TooManyPointLights { count: usize, max: usize },
}

/// Failures while reading or writing the config file.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("could not access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Fatal start-up failures.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("SDL error: {0}")]
    Sdl(String),

    #[error("shader error: {0}")]
    Shader(String),

    #[error("mesh error: {0}")]
    Mesh(String),

    #[error("logger error: {0}")]
    Logger(String),

    #[error(transparent)]
    Scene(#[from] SceneError),
}
