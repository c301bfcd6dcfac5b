//! A free-flying camera.

use glam::{Mat4, Vec3};
use sdl2::{keyboard::Keycode, mouse::MouseButton};

use crate::{config::CameraConfig, input::UpdateContext};

pub struct Camera {
    pub position: Vec3,
    /// Degrees, 0 looks down -Z.
    pub yaw: f32,
    /// Degrees, positive looks up.
    pub pitch: f32,
    pub fov: f32,
    pub speed: f32,
    pub sensitivity: f32,
}

impl Camera {
    pub fn new(config: &CameraConfig) -> Self {
        Self {
            position: config.position,
            yaw: config.yaw,
            pitch: config.pitch,
            fov: config.fov,
            speed: config.speed,
            sensitivity: config.sensitivity,
        }
    }

    pub fn forward(&self) -> Vec3 {
        let pitch_rad = self.pitch.to_radians();
        let yaw_rad = self.yaw.to_radians();

        Vec3::new(
            yaw_rad.sin() * pitch_rad.cos(),
            pitch_rad.sin(),
            -yaw_rad.cos() * pitch_rad.cos(),
        )
        .normalize()
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    pub fn projection(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov.to_radians(), aspect_ratio, 0.1, 2000.0)
    }

    /// Moves with WASD, Space and Shift and looks around while the right mouse button is held.
    pub fn update(&mut self, ctx: &UpdateContext) {
        if ctx.mouse.down.contains(&MouseButton::Right) {
            self.yaw += ctx.mouse.delta.x * self.sensitivity;
            self.pitch = (self.pitch - ctx.mouse.delta.y * self.sensitivity).clamp(-89.0, 89.0);
        }

        let forward = self.forward().with_y(0.0).normalize_or_zero();
        let right = forward.cross(Vec3::Y).normalize_or_zero();
        let mut movement = Vec3::ZERO;
        let down = |key| ctx.keyboard.down.contains(&key);
        if down(Keycode::W) {
            movement += forward;
        }
        if down(Keycode::S) {
            movement -= forward;
        }
        if down(Keycode::D) {
            movement += right;
        }
        if down(Keycode::A) {
            movement -= right;
        }
        if down(Keycode::Space) {
            movement += Vec3::Y;
        }
        if down(Keycode::LShift) {
            movement -= Vec3::Y;
        }
        self.position += movement.normalize_or_zero() * self.speed * ctx.delta_time;
    }
}
