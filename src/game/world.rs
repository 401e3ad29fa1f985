use macroquad::math::Vec2;

use crate::game::camera::Camera;
use crate::game::entities::{Coin, Enemy, Player};
use crate::game::input::InputState;

/// Everything that changes from frame to frame.
#[derive(Debug, Clone)]
pub struct World {
    /// The controlled character.
    pub player: Player,
    /// Live enemies.
    pub enemies: Vec<Enemy>,
    /// Uncollected coins.
    pub coins: Vec<Coin>,
    /// Follows the player.
    pub camera: Camera,
    /// Map extent in pixels, for camera clamping.
    pub map_size: Vec2,
    /// Step size for every chasing enemy.
    pub enemy_speed: f32,
}

impl World {
    /// Advances one frame: move the player, let enemies chase it, then
    /// re-centre the camera.
    pub fn update(&mut self, input: &InputState, screen_size: Vec2) {
        self.player.sprite.position += input.direction() * self.player.speed;

        let target = self.player.sprite.position;
        for enemy in self.enemies.iter_mut().filter(|e| e.follows_player) {
            enemy.chase(target, self.enemy_speed);
        }

        let center = self.player.sprite.center();
        self.camera
            .follow_target(center.x, center.y, screen_size.x, screen_size.y);
        self.camera
            .constrain(self.map_size.x, self.map_size.y, screen_size.x, screen_size.y);
    }
}
