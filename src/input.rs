use std::collections::HashSet;

use glam::Vec2;
use sdl2::{event::Event, keyboard::Keycode, mouse::MouseButton};

/// The current state of the keyboard.
#[derive(Default)]
pub struct KeyboardState {
    pub down: HashSet<Keycode>,
    pub pressed: HashSet<Keycode>,
}

/// The current state of the mouse.
#[derive(Default)]
pub struct MouseState {
    pub position: Vec2,
    pub delta: Vec2,
    pub down: HashSet<MouseButton>,
}

impl KeyboardState {
    /// Clears the per-frame state.
    pub fn begin_frame(&mut self) {
        self.pressed.clear();
    }
}

impl MouseState {
    /// Clears the per-frame state.
    pub fn begin_frame(&mut self) {
        self.delta = Vec2::ZERO;
    }
}

/// Feeds one SDL event into the input state.
pub fn handle_event(keyboard: &mut KeyboardState, mouse: &mut MouseState, event: &Event) {
    match event {
        Event::MouseMotion {
            x, y, xrel, yrel, ..
        } => {
            mouse.position = Vec2::new(*x as f32, *y as f32);
            mouse.delta += Vec2::new(*xrel as f32, *yrel as f32);
        }
        Event::MouseButtonDown { mouse_btn, .. } => {
            mouse.down.insert(*mouse_btn);
        }
        Event::MouseButtonUp { mouse_btn, .. } => {
            mouse.down.remove(mouse_btn);
        }
        Event::KeyDown {
            keycode: Some(keycode),
            repeat: false,
            ..
        } => {
            keyboard.down.insert(*keycode);
            keyboard.pressed.insert(*keycode);
        }
        Event::KeyUp {
            keycode: Some(keycode),
            repeat: false,
            ..
        } => {
            keyboard.down.remove(keycode);
        }
        _ => {}
    }
}

/// Input and timing for one frame.
pub struct UpdateContext<'a> {
    pub keyboard: &'a KeyboardState,
    pub mouse: &'a MouseState,
    pub delta_time: f32,
}

impl<'a> UpdateContext<'a> {
    /// Creates a new `UpdateContext` from the given keyboard and mouse states and delta time.
    pub fn new(keyboard: &'a KeyboardState, mouse: &'a MouseState, delta_time: f32) -> Self {
        Self {
            keyboard,
            mouse,
            delta_time,
        }
    }
}
