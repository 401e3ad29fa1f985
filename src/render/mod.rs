//! Turning a loaded map into draw calls.

mod compose;
mod draw;
mod lookup;

pub use compose::{compose, DrawCommand};
pub use draw::{is_visible, texture_from_image, MapRenderer};
pub use lookup::TilesetLookup;
