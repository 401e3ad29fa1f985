use std::fs;
use std::path::{Path, PathBuf};

use image::{GenericImageView, RgbaImage, SubImage};
use log::{debug, info, warn};
use macroquad::math::Rect;
use serde::Deserialize;

use crate::error::MapError;
use crate::path::resolve_relative;

/// Cell size used when a sheet descriptor does not declare one.
pub const DEFAULT_TILE_SIZE: u32 = 16;
/// Sheet width in cells used when a sheet descriptor does not declare one.
pub const DEFAULT_COLUMNS: u32 = 22;

fn default_tile_size() -> u32 {
    DEFAULT_TILE_SIZE
}
fn default_columns() -> u32 {
    DEFAULT_COLUMNS
}

#[derive(Deserialize)]
struct JsonTileset {
    #[serde(default)]
    image: Option<String>,
    #[serde(default = "default_tile_size")]
    tilewidth: u32,
    #[serde(default = "default_tile_size")]
    tileheight: u32,
    #[serde(default = "default_columns")]
    columns: u32,
    #[serde(default)]
    spacing: u32,
    #[serde(default)]
    margin: u32,
    #[serde(default)]
    tiles: Vec<JsonTile>,
}

impl JsonTileset {
    /// Image-collection tilesets list one image per tile. Sheet tilesets may
    /// also carry `tiles`, but only for per-tile metadata without images.
    fn is_image_collection(&self) -> bool {
        !self.tiles.is_empty() && self.tiles.iter().all(|t| t.image.is_some())
    }
}

#[derive(Deserialize)]
struct JsonTile {
    #[serde(default)]
    id: u32,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    imagewidth: Option<u32>,
    #[serde(default)]
    imageheight: Option<u32>,
}

/// Pixel rectangle inside a backing image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width.
    pub w: u32,
    /// Height.
    pub h: u32,
}

impl PixelRect {
    /// Rect at `(x, y)` of size `w` x `h`.
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Exclusive right edge, `None` past `u32::MAX`.
    #[inline]
    pub fn right(&self) -> Option<u32> {
        self.x.checked_add(self.w)
    }

    /// Exclusive bottom edge, `None` past `u32::MAX`.
    #[inline]
    pub fn bottom(&self) -> Option<u32> {
        self.y.checked_add(self.h)
    }

    fn fits_in(&self, img: &RgbaImage) -> bool {
        matches!(
            (self.right(), self.bottom()),
            (Some(r), Some(b)) if r <= img.width() && b <= img.height()
        )
    }

    /// Source rect for `draw_texture_ex`.
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x as f32, self.y as f32, self.w as f32, self.h as f32)
    }
}

/// Borrowed view of one tile inside a tileset's backing image.
#[derive(Clone, Copy)]
pub struct TileImage<'a> {
    source: &'a RgbaImage,
    rect: PixelRect,
    slot: usize,
}

impl<'a> TileImage<'a> {
    /// The whole backing image (sheet or per-tile image).
    pub fn source(&self) -> &'a RgbaImage {
        self.source
    }

    /// Where the tile sits in [`TileImage::source`].
    pub fn rect(&self) -> PixelRect {
        self.rect
    }

    /// Index of the backing image in [`Tileset::images`].
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Zero-copy view of the tile's pixels.
    pub fn view(&self) -> SubImage<&'a RgbaImage> {
        self.source
            .view(self.rect.x, self.rect.y, self.rect.w, self.rect.h)
    }
}

/// One sprite sheet sliced into equal cells.
#[derive(Debug)]
pub struct UniformTileset {
    first_gid: u32,
    sheet: RgbaImage,
    tile_w: u32,
    tile_h: u32,
    columns: u32,
    spacing: u32,
    margin: u32,
}

impl UniformTileset {
    /// A sheet of default-sized cells, [`DEFAULT_COLUMNS`] per row, no spacing.
    pub fn from_image(first_gid: u32, sheet: RgbaImage) -> Self {
        Self {
            first_gid,
            sheet,
            tile_w: DEFAULT_TILE_SIZE,
            tile_h: DEFAULT_TILE_SIZE,
            columns: DEFAULT_COLUMNS,
            spacing: 0,
            margin: 0,
        }
    }

    /// Number of full rows that fit in the sheet.
    fn rows(&self) -> u32 {
        let avail = self
            .sheet
            .height()
            .saturating_add(self.spacing)
            .saturating_sub(self.margin.saturating_mul(2));
        avail / self.tile_h.saturating_add(self.spacing)
    }

    /// Cells that fit entirely inside the sheet.
    pub fn tile_count(&self) -> u32 {
        self.columns.saturating_mul(self.rows())
    }

    /// Pixel rect of cell `local`, or `None` if it cannot be addressed in
    /// `u32` pixel space.
    pub fn cell_rect(&self, local: u32) -> Option<PixelRect> {
        let col = local % self.columns;
        let row = local / self.columns;
        let x = col
            .checked_mul(self.tile_w.checked_add(self.spacing)?)?
            .checked_add(self.margin)?;
        let y = row
            .checked_mul(self.tile_h.checked_add(self.spacing)?)?
            .checked_add(self.margin)?;
        Some(PixelRect::new(x, y, self.tile_w, self.tile_h))
    }

    /// Sub-image for `tile_id`, see [`Tileset::image`].
    pub fn image(&self, tile_id: u32) -> Option<TileImage<'_>> {
        let local = local_index(tile_id, self.first_gid)?;
        let rect = self.cell_rect(local).filter(|r| r.fits_in(&self.sheet));
        let Some(rect) = rect else {
            warn!(
                "Tile id {tile_id} (local {local}) lies outside the {}x{} sheet",
                self.sheet.width(),
                self.sheet.height()
            );
            return None;
        };
        Some(TileImage {
            source: &self.sheet,
            rect,
            slot: 0,
        })
    }
}

/// One discrete image per tile, indexed in declaration order.
#[derive(Debug)]
pub struct DynamicTileset {
    first_gid: u32,
    images: Vec<RgbaImage>,
}

impl DynamicTileset {
    /// Tile `first_gid + i` is `images[i]`.
    pub fn from_images(first_gid: u32, images: Vec<RgbaImage>) -> Self {
        Self { first_gid, images }
    }

    /// The whole image for `tile_id`.
    pub fn image(&self, tile_id: u32) -> Option<TileImage<'_>> {
        let local = local_index(tile_id, self.first_gid)? as usize;
        let Some(img) = self.images.get(local) else {
            warn!(
                "Tile id {tile_id} (local {local}) is out of range for a {}-image tileset",
                self.images.len()
            );
            return None;
        };
        Some(TileImage {
            source: img,
            rect: PixelRect::new(0, 0, img.width(), img.height()),
            slot: local,
        })
    }
}

/// A loaded tileset.
#[derive(Debug)]
pub enum Tileset {
    /// Cells cut from a single sheet.
    Uniform(UniformTileset),
    /// One image per tile.
    Dynamic(DynamicTileset),
}

impl Tileset {
    /// Loads the tileset described by `path`, owning gids from `first_gid`.
    ///
    /// Image paths inside the descriptor are relative to the descriptor.
    /// Any unreadable or undecodable image aborts the whole tileset.
    pub fn load(path: impl AsRef<Path>, first_gid: u32) -> Result<Self, MapError> {
        let path = path.as_ref();
        info!("Loading tileset {} with first gid {first_gid}", path.display());

        let txt = fs::read_to_string(path).map_err(|source| MapError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let desc: JsonTileset = serde_json::from_str(&txt).map_err(|source| MapError::Json {
            path: path.to_path_buf(),
            source,
        })?;

        if desc.is_image_collection() {
            let mut images = Vec::with_capacity(desc.tiles.len());
            for tile in &desc.tiles {
                // checked by is_image_collection
                let Some(rel) = tile.image.as_deref() else { continue };
                let img_path = resolve_relative(path, rel);
                let img = load_image(&img_path)?;
                check_declared_size(tile, &img, &img_path);
                images.push(img);
            }
            info!(
                "Created dynamic tileset with {} images, first gid {first_gid}",
                images.len()
            );
            return Ok(Tileset::Dynamic(DynamicTileset::from_images(first_gid, images)));
        }

        let Some(rel) = desc.image.as_deref() else {
            return Err(MapError::InvalidTileset {
                path: path.to_path_buf(),
                reason: "expected an `image` field or a `tiles` array with images".into(),
            });
        };
        if desc.columns == 0 || desc.tilewidth == 0 || desc.tileheight == 0 {
            return Err(MapError::InvalidTileset {
                path: path.to_path_buf(),
                reason: format!(
                    "columns and tile size must be non-zero (columns={}, tile={}x{})",
                    desc.columns, desc.tilewidth, desc.tileheight
                ),
            });
        }

        let img_path = resolve_relative(path, rel);
        let sheet = load_image(&img_path)?;
        info!(
            "Created uniform tileset from {}, first gid {first_gid}",
            img_path.display()
        );
        Ok(Tileset::Uniform(UniformTileset {
            first_gid,
            sheet,
            tile_w: desc.tilewidth,
            tile_h: desc.tileheight,
            columns: desc.columns,
            spacing: desc.spacing,
            margin: desc.margin,
        }))
    }

    /// First gid this tileset owns.
    pub fn first_gid(&self) -> u32 {
        match self {
            Tileset::Uniform(t) => t.first_gid,
            Tileset::Dynamic(t) => t.first_gid,
        }
    }

    /// Size of the gid range this tileset owns.
    pub fn tile_count(&self) -> u32 {
        match self {
            Tileset::Uniform(t) => t.tile_count(),
            Tileset::Dynamic(t) => t.images.len() as u32,
        }
    }

    /// `true` if `gid` falls inside `[first_gid, first_gid + tile_count)`.
    pub fn contains(&self, gid: u32) -> bool {
        gid >= self.first_gid() && gid - self.first_gid() < self.tile_count()
    }

    /// Image for `tile_id`, or `None` for empty cells and ids this tileset
    /// does not cover.
    pub fn image(&self, tile_id: u32) -> Option<TileImage<'_>> {
        match self {
            Tileset::Uniform(t) => t.image(tile_id),
            Tileset::Dynamic(t) => t.image(tile_id),
        }
    }

    /// Backing images, indexed by [`TileImage::slot`].
    pub fn images(&self) -> &[RgbaImage] {
        match self {
            Tileset::Uniform(t) => std::slice::from_ref(&t.sheet),
            Tileset::Dynamic(t) => &t.images,
        }
    }
}

fn local_index(tile_id: u32, first_gid: u32) -> Option<u32> {
    if tile_id == 0 {
        return None;
    }
    let local = tile_id.checked_sub(first_gid);
    if local.is_none() {
        warn!("Tile id {tile_id} is less than first gid {first_gid}");
    }
    local
}

fn load_image(path: &Path) -> Result<RgbaImage, MapError> {
    debug!("Loading tile image {}", path.display());
    image::open(path)
        .map(|img| img.into_rgba8())
        .map_err(|source| MapError::ImageDecode {
            path: PathBuf::from(path),
            source,
        })
}

fn check_declared_size(tile: &JsonTile, img: &RgbaImage, path: &Path) {
    let declared_w = tile.imagewidth.unwrap_or(img.width());
    let declared_h = tile.imageheight.unwrap_or(img.height());
    if (declared_w, declared_h) != img.dimensions() {
        warn!(
            "Tile {} declares {declared_w}x{declared_h} but {} is {}x{}",
            tile.id,
            path.display(),
            img.width(),
            img.height()
        );
    }
}
