#![warn(missing_docs)]

//! Tiled-style JSON tilemaps & tilesets for a small Macroquad RPG.

mod error;
pub mod config;
pub mod game;
pub mod gid;
mod path;
pub mod render;
mod tilemap;
mod tileset;

pub use config::GameConfig;
pub use error::MapError;
pub use path::resolve_relative;
pub use render::{compose, DrawCommand, MapRenderer};
pub use tilemap::{generate_tilesets, load_tilemap, Layer, TilemapDescriptor, TilesetReference};
pub use tileset::{
    DynamicTileset, PixelRect, TileImage, Tileset, UniformTileset, DEFAULT_COLUMNS,
    DEFAULT_TILE_SIZE,
};
