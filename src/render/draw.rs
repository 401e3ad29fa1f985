use image::RgbaImage;
use log::{info, warn};
use macroquad::prelude::*;

use crate::render::compose::{compose, DrawCommand};
use crate::tilemap::TilemapDescriptor;
use crate::tileset::Tileset;

/// `(width, height)` as texture dimensions, `None` past `u16::MAX`.
fn texture_size(img: &RgbaImage) -> Option<(u16, u16)> {
    let size = u16::try_from(img.width()).ok().zip(u16::try_from(img.height()).ok());
    if size.is_none() {
        warn!(
            "Image {}x{} is too large for a texture; skipping",
            img.width(),
            img.height()
        );
    }
    size
}

/// Uploads a decoded image as a pixel-art texture. Needs a live window.
///
/// Images wider or taller than `u16::MAX` are skipped.
pub fn texture_from_image(img: &RgbaImage) -> Option<Texture2D> {
    let (w, h) = texture_size(img)?;
    let tex = Texture2D::from_rgba8(w, h, img.as_raw());
    tex.set_filter(FilterMode::Nearest);
    Some(tex)
}

/// `true` if a `size` rect at `dest + offset` overlaps `[0, view]`.
#[inline]
pub fn is_visible(dest: Vec2, size: Vec2, offset: Vec2, view: Vec2) -> bool {
    let min = dest + offset;
    let max = min + size;
    max.x > 0.0 && max.y > 0.0 && min.x < view.x && min.y < view.y
}

/// A composed map plus the textures its commands draw from.
pub struct MapRenderer {
    /// `textures[tileset_index][slot]`, `None` for images that could not be uploaded.
    textures: Vec<Vec<Option<Texture2D>>>,
    commands: Vec<DrawCommand>,
}

impl MapRenderer {
    /// Composes `map` and uploads every tileset image. Needs a live window.
    pub fn new(map: &TilemapDescriptor, tilesets: &[Tileset]) -> Self {
        let textures = tilesets
            .iter()
            .map(|ts| ts.images().iter().map(texture_from_image).collect())
            .collect();
        let commands = compose(map, tilesets);
        info!("Map renderer ready: {} tiles", commands.len());
        Self { textures, commands }
    }

    /// Draws the map shifted by the camera `offset`, culled to a
    /// `view_size` screen.
    pub fn draw(&self, offset: Vec2, view_size: Vec2) {
        for cmd in &self.commands {
            let size = vec2(cmd.src.w as f32, cmd.src.h as f32);
            if !is_visible(cmd.dest, size, offset, view_size) {
                continue;
            }
            let Some(tex) = self
                .textures
                .get(cmd.tileset_index)
                .and_then(|slots| slots.get(cmd.slot))
                .and_then(Option::as_ref)
            else {
                continue;
            };

            draw_texture_ex(
                tex,
                cmd.dest.x + offset.x,
                cmd.dest.y + offset.y,
                WHITE,
                DrawTextureParams {
                    source: Some(cmd.src.to_rect()),
                    flip_x: cmd.flip_x,
                    flip_y: cmd.flip_y,
                    ..Default::default()
                },
            );
        }
    }
}
