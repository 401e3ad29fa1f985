use macroquad::input::{is_key_down, KeyCode};
use macroquad::math::Vec2;

/// Direction keys held during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    /// Left arrow or `A`.
    pub left: bool,
    /// Right arrow or `D`.
    pub right: bool,
    /// Up arrow or `W`.
    pub up: bool,
    /// Down arrow or `S`.
    pub down: bool,
}

impl InputState {
    /// Reads arrows / WASD from macroquad. Only valid inside the window loop.
    pub fn poll() -> Self {
        let any = |keys: &[KeyCode]| keys.iter().any(|&k| is_key_down(k));
        Self {
            left: any(&[KeyCode::Left, KeyCode::A]),
            right: any(&[KeyCode::Right, KeyCode::D]),
            up: any(&[KeyCode::Up, KeyCode::W]),
            down: any(&[KeyCode::Down, KeyCode::S]),
        }
    }

    /// Unnormalised step direction; opposite keys cancel.
    pub fn direction(&self) -> Vec2 {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        Vec2::new(axis(self.left, self.right), axis(self.up, self.down))
    }
}
