use macroquad::math::Vec2;

/// Anything placed on the map. Sprites are 16x16 and anchored top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    /// Top-left corner in map pixels.
    pub position: Vec2,
}

impl Sprite {
    /// Edge length in pixels.
    pub const SIZE: f32 = 16.0;

    /// Sprite with its top-left corner at `(x, y)`.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
        }
    }

    /// Centre of the sprite's square.
    pub fn center(&self) -> Vec2 {
        self.position + Vec2::splat(Self::SIZE / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Combat style of the player.
pub enum PlayerClass {
    /// Close range.
    Melee,
    /// Long range, extended by `range_bonus`.
    Ranged { range_bonus: f32 },
}

impl PlayerClass {
    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            PlayerClass::Melee => "Melee",
            PlayerClass::Ranged { .. } => "Ranged",
        }
    }

    /// Reach in tiles.
    pub fn attack_range(&self) -> f32 {
        match self {
            PlayerClass::Melee => 1.5,
            PlayerClass::Ranged { range_bonus } => 10.0 + range_bonus,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// The controllable character.
pub struct Player {
    /// Position on the map.
    pub sprite: Sprite,
    /// Hit points.
    pub health: u32,
    /// Collected experience.
    pub experience: u32,
    /// Pixels per frame.
    pub speed: f32,
    /// Picked at startup.
    pub class: PlayerClass,
}

#[derive(Debug, Clone, PartialEq)]
/// A hostile creature.
pub struct Enemy {
    /// Position on the map.
    pub sprite: Sprite,
    /// Chases the player each frame when set.
    pub follows_player: bool,
    /// Combat flags. Stored but not acted on.
    pub can_attack_player: bool,
    /// See `can_attack_player`.
    pub can_attack_enemy: bool,
}

impl Enemy {
    /// Steps `speed` along each axis toward `target`. Ties step in the
    /// positive direction.
    pub fn chase(&mut self, target: Vec2, speed: f32) {
        let pos = &mut self.sprite.position;
        pos.x += if target.x < pos.x { -speed } else { speed };
        pos.y += if target.y < pos.y { -speed } else { speed };
    }
}

#[derive(Debug, Clone, PartialEq)]
/// A pickup granting experience.
pub struct Coin {
    /// Position on the map.
    pub sprite: Sprite,
    /// Experience granted on pickup.
    pub amount_xp: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_attack_ranges() {
        assert_eq!(PlayerClass::Melee.attack_range(), 1.5);
        assert_eq!(PlayerClass::Ranged { range_bonus: 2.0 }.attack_range(), 12.0);
        assert_eq!(PlayerClass::Ranged { range_bonus: 0.0 }.name(), "Ranged");
    }

    #[test]
    fn chase_steps_toward_target() {
        let mut enemy = Enemy {
            sprite: Sprite::new(150.0, 100.0),
            follows_player: true,
            can_attack_player: false,
            can_attack_enemy: false,
        };
        enemy.chase(Vec2::new(100.0, 120.0), 0.5);
        assert_eq!(enemy.sprite.position, Vec2::new(149.5, 100.5));

        // already aligned on y
        enemy.chase(Vec2::new(100.0, 100.5), 0.5);
        assert_eq!(enemy.sprite.position, Vec2::new(149.0, 101.0));
    }
}
