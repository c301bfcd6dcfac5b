//! Module for anything related to rendering.
//!
//! This module contains the shader uniform protocol, per-draw state binding, lighting, the
//! primitive shapes, the camera and all used shaders.

pub mod binding;
pub mod camera;
pub mod lighting;
pub mod shapes;
pub mod uniforms;
