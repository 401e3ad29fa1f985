//! Game-side state driven by the frame loop.

mod camera;
mod entities;
mod input;
mod world;

pub use camera::Camera;
pub use entities::{Coin, Enemy, Player, PlayerClass, Sprite};
pub use input::InputState;
pub use world::World;
