use log::{debug, warn};
use macroquad::math::{vec2, Vec2};

use crate::gid::TileId;
use crate::render::lookup::TilesetLookup;
use crate::tilemap::TilemapDescriptor;
use crate::tileset::{PixelRect, Tileset};

/// One tile to draw: which texture, which part of it, and where.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    /// Index into `TilemapDescriptor::layers`.
    pub layer_index: usize,
    /// Index into the tileset slice passed to [`compose`].
    pub tileset_index: usize,
    /// Backing image within the tileset, see `TileImage::slot`.
    pub slot: usize,
    /// Source pixels inside the backing image.
    pub src: PixelRect,
    /// Map-space pixel position of the cell's top-left corner.
    pub dest: Vec2,
    /// Mirror horizontally (Tiled bit 31).
    pub flip_x: bool,
    /// Mirror vertically (Tiled bit 30).
    pub flip_y: bool,
}

/// Turns every non-empty cell of every visible tile layer into a draw
/// command, in layer order then row-major order.
///
/// Cells whose gid no tileset covers are skipped with a warning.
pub fn compose(map: &TilemapDescriptor, tilesets: &[Tileset]) -> Vec<DrawCommand> {
    let lookup = TilesetLookup::new(tilesets);
    let tw = map.tile_width as f32;
    let th = map.tile_height as f32;
    let mut commands = Vec::new();

    for (layer_index, layer) in map.layers.iter().enumerate() {
        if !layer.visible || !layer.is_tile_layer() {
            debug!("Skipping layer '{}'", layer.name);
            continue;
        }

        for (col, row, raw) in layer.cells() {
            let id = TileId(raw);
            if id.is_empty() {
                continue;
            }

            let gid = id.clean();
            let Some(tileset_index) = lookup.tileset_for(gid) else {
                warn!(
                    "Layer '{}' cell ({col}, {row}): gid {gid} is not covered by any tileset (max {})",
                    layer.name,
                    lookup.max_gid()
                );
                continue;
            };

            let Some(img) = tilesets[tileset_index].image(gid) else {
                continue;
            };

            commands.push(DrawCommand {
                layer_index,
                tileset_index,
                slot: img.slot(),
                src: img.rect(),
                dest: vec2(col as f32 * tw, row as f32 * th),
                flip_x: id.flip_h(),
                flip_y: id.flip_v(),
            });
        }
    }

    debug!("Composed {} draw commands", commands.len());
    commands
}
