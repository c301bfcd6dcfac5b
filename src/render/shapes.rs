//! Primitive meshes the scene is built from.
//!
//! Every shape is generated at unit size around its own origin and placed with a model matrix:
//!
//! * plane: 2×2 in the XZ plane, facing +Y
//! * box: unit cube centered on the origin
//! * cylinder: radius 1, from y = 0 to y = 1, capped
//! * torus: ring of radius 1 around the Z axis with a tube radius of [`TORUS_TUBE_RADIUS`]
//! * sphere: radius 1
//!
//! Front faces wind counter-clockwise seen from outside.

use std::{collections::HashMap, f32::consts::TAU, sync::Arc};

use glam::{Vec2, Vec3};
use glow::HasContext;
use serde::{Deserialize, Serialize};

use crate::abs::{Mesh, Vertex};

const CYLINDER_SEGMENTS: u32 = 36;
const SPHERE_STACKS: u32 = 18;
const SPHERE_SLICES: u32 = 36;
const TORUS_MAJOR_SEGMENTS: u32 = 36;
const TORUS_MINOR_SEGMENTS: u32 = 18;
pub const TORUS_TUBE_RADIUS: f32 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Plane,
    Box,
    Cylinder,
    Torus,
    Sphere,
}

impl Shape {
    pub const ALL: [Shape; 5] = [
        Shape::Plane,
        Shape::Box,
        Shape::Cylinder,
        Shape::Torus,
        Shape::Sphere,
    ];

    /// Generates the vertices and triangle indices of the shape.
    pub fn geometry(self) -> (Vec<SceneVertex>, Vec<u32>) {
        let mut builder = GeometryBuilder::default();
        match self {
            Shape::Plane => builder.quad(Vec3::ZERO, Vec3::X, Vec3::NEG_Z, Vec3::Y),
            Shape::Box => {
                for (normal, u, v) in [
                    (Vec3::X, Vec3::NEG_Z, Vec3::Y),
                    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
                    (Vec3::Y, Vec3::X, Vec3::NEG_Z),
                    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
                    (Vec3::Z, Vec3::X, Vec3::Y),
                    (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
                ] {
                    builder.quad(normal * 0.5, u * 0.5, v * 0.5, normal);
                }
            }
            Shape::Cylinder => {
                builder.grid(1, CYLINDER_SEGMENTS, |s, t| {
                    let (sin, cos) = (s * TAU).sin_cos();
                    SceneVertex {
                        position: Vec3::new(sin, t, cos),
                        normal: Vec3::new(sin, 0.0, cos),
                        uv: Vec2::new(s, t),
                    }
                });
                builder.disc(1.0, Vec3::Y, CYLINDER_SEGMENTS);
                builder.disc(0.0, Vec3::NEG_Y, CYLINDER_SEGMENTS);
            }
            Shape::Torus => {
                builder.grid(TORUS_MINOR_SEGMENTS, TORUS_MAJOR_SEGMENTS, |s, t| {
                    let (sin_u, cos_u) = (s * TAU).sin_cos();
                    let (sin_v, cos_v) = (t * TAU).sin_cos();
                    let normal = Vec3::new(cos_v * cos_u, cos_v * sin_u, sin_v);
                    SceneVertex {
                        position: Vec3::new(cos_u, sin_u, 0.0) + normal * TORUS_TUBE_RADIUS,
                        normal,
                        uv: Vec2::new(s, t),
                    }
                });
            }
            Shape::Sphere => {
                builder.grid(SPHERE_STACKS, SPHERE_SLICES, |s, t| {
                    let (sin_theta, cos_theta) = (s * TAU).sin_cos();
                    let (sin_phi, cos_phi) = (t * std::f32::consts::PI).sin_cos();
                    let normal = Vec3::new(sin_phi * sin_theta, -cos_phi, sin_phi * cos_theta);
                    SceneVertex {
                        position: normal,
                        normal,
                        uv: Vec2::new(s, t),
                    }
                });
            }
        }
        (builder.vertices, builder.indices)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct SceneVertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

impl Vertex for SceneVertex {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            let stride = std::mem::size_of::<SceneVertex>() as i32;

            // Position attribute
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);

            // Normal attribute
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(1, 3, glow::FLOAT, false, stride, size_of::<Vec3>() as i32);

            // UV attribute
            gl.enable_vertex_attrib_array(2);
            gl.vertex_attrib_pointer_f32(
                2,
                2,
                glow::FLOAT,
                false,
                stride,
                (2 * size_of::<Vec3>()) as i32,
            );
        }
    }
}

#[derive(Default)]
struct GeometryBuilder {
    vertices: Vec<SceneVertex>,
    indices: Vec<u32>,
}

impl GeometryBuilder {
    /// Adds a rectangle spanning `center ± u ± v`. `u × v` must point along `normal`.
    fn quad(&mut self, center: Vec3, u: Vec3, v: Vec3, normal: Vec3) {
        let base = self.vertices.len() as u32;
        for (du, dv, uv) in [
            (-1.0, -1.0, Vec2::new(0.0, 0.0)),
            (1.0, -1.0, Vec2::new(1.0, 0.0)),
            (1.0, 1.0, Vec2::new(1.0, 1.0)),
            (-1.0, 1.0, Vec2::new(0.0, 1.0)),
        ] {
            self.vertices.push(SceneVertex {
                position: center + u * du + v * dv,
                normal,
                uv,
            });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Adds a `(rows + 1) × (cols + 1)` vertex grid. `vertex` gets the column and row fraction in
    /// `[0, 1]`; moving along a column crossed with moving along a row must point outwards.
    fn grid(&mut self, rows: u32, cols: u32, mut vertex: impl FnMut(f32, f32) -> SceneVertex) {
        let base = self.vertices.len() as u32;
        for row in 0..=rows {
            for col in 0..=cols {
                self.vertices
                    .push(vertex(col as f32 / cols as f32, row as f32 / rows as f32));
            }
        }
        for row in 0..rows {
            for col in 0..cols {
                let p00 = base + row * (cols + 1) + col;
                let p01 = p00 + 1;
                let p10 = p00 + cols + 1;
                let p11 = p10 + 1;
                self.indices
                    .extend_from_slice(&[p00, p01, p11, p00, p11, p10]);
            }
        }
    }

    /// Adds a unit disc at height `y` facing `normal` (which is either +Y or -Y).
    fn disc(&mut self, y: f32, normal: Vec3, segments: u32) {
        let center = self.vertices.len() as u32;
        self.vertices.push(SceneVertex {
            position: Vec3::new(0.0, y, 0.0),
            normal,
            uv: Vec2::splat(0.5),
        });
        for i in 0..=segments {
            let (sin, cos) = (i as f32 / segments as f32 * TAU).sin_cos();
            self.vertices.push(SceneVertex {
                position: Vec3::new(sin, y, cos),
                normal,
                uv: Vec2::new(0.5 + 0.5 * sin, 0.5 + 0.5 * cos),
            });
        }
        for i in 0..segments {
            let (a, b) = (center + 1 + i, center + 2 + i);
            if normal.y > 0.0 {
                self.indices.extend_from_slice(&[center, a, b]);
            } else {
                self.indices.extend_from_slice(&[center, b, a]);
            }
        }
    }
}

/// Uploads shapes once and draws them with the currently bound shader state.
pub trait ShapeRenderer {
    /// Makes `shape` drawable. Loading a shape twice is a no-op.
    fn load_shape(&mut self, shape: Shape) -> Result<(), String>;

    /// Issues one draw call for `shape`.
    fn draw_shape(&mut self, shape: Shape);
}

/// GPU meshes for every loaded shape.
pub struct ShapeMeshes {
    gl: Arc<glow::Context>,
    meshes: HashMap<Shape, Mesh>,
}

impl ShapeMeshes {
    pub fn new(gl: &Arc<glow::Context>) -> Self {
        Self {
            gl: Arc::clone(gl),
            meshes: HashMap::new(),
        }
    }
}

impl ShapeRenderer for ShapeMeshes {
    fn load_shape(&mut self, shape: Shape) -> Result<(), String> {
        if self.meshes.contains_key(&shape) {
            return Ok(());
        }
        let (vertices, indices) = shape.geometry();
        let mesh = Mesh::new(&self.gl, &vertices, &indices, glow::TRIANGLES)?;
        log::debug!("Loaded {:?} mesh with {} indices", shape, mesh.index_count());
        self.meshes.insert(shape, mesh);
        Ok(())
    }

    fn draw_shape(&mut self, shape: Shape) {
        match self.meshes.get(&shape) {
            Some(mesh) => mesh.draw(),
            None => log::warn!("{shape:?} mesh drawn before it was loaded"),
        }
    }
}
