//! Campsite3D: textures, materials and a Phong-lit scene of primitive shapes rendered with
//! OpenGL.
//!
//! The interesting parts are the [`registry`] module, which owns GPU textures and materials by
//! tag, and [`render::binding`], which turns a per-draw state bundle into shader uniforms.

pub mod abs;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod registry;
pub mod render;
pub mod scene;

#[cfg(test)]
pub(crate) mod testing;
