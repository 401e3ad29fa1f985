use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::path::resolve_relative;
use crate::tileset::{Tileset, DEFAULT_TILE_SIZE};

const TILE_LAYER: &str = "tilelayer";

fn default_true() -> bool {
    true
}
fn default_tile_size() -> u32 {
    DEFAULT_TILE_SIZE
}
fn default_layer_kind() -> String {
    TILE_LAYER.to_owned()
}

/// One grid of gids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    #[serde(default)]
    /// Layer name; duplicates are allowed.
    pub name: String,
    #[serde(default)]
    /// Size in cells.
    pub width: usize,
    #[serde(default)]
    /// Size in cells.
    pub height: usize,
    /// Row-major gids, `0` = no tile.
    #[serde(default)]
    pub data: Vec<u32>,
    #[serde(default = "default_true")]
    /// Hidden layers are skipped by the renderer.
    pub visible: bool,
    #[serde(rename = "type", default = "default_layer_kind")]
    /// Tiled layer `type`; only `tilelayer` is drawn.
    pub kind: String,
}

impl Layer {
    /// A visible tile layer.
    pub fn new(name: impl Into<String>, width: usize, height: usize, data: Vec<u32>) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            data,
            visible: true,
            kind: default_layer_kind(),
        }
    }

    /// `true` for grid layers, `false` for object groups and the like.
    pub fn is_tile_layer(&self) -> bool {
        self.kind == TILE_LAYER
    }

    /// Raw cell value at `(col, row)`, `None` outside the grid.
    pub fn tile_at(&self, col: usize, row: usize) -> Option<u32> {
        if col >= self.width || row >= self.height {
            return None;
        }
        let idx = row.checked_mul(self.width)?.checked_add(col)?;
        self.data.get(idx).copied()
    }

    /// `(col, row, gid)` for every cell, row-major, empty cells included.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        let width = self.width.max(1);
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &gid)| (i % width, i / width, gid))
    }
}

/// A tileset as referenced from a map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TilesetReference {
    #[serde(rename = "firstgid")]
    /// First gid the referenced tileset owns.
    pub first_gid: u32,
    /// Tileset descriptor path, relative to the map file.
    pub source: String,
}

/// Parsed map document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TilemapDescriptor {
    #[serde(rename = "tilewidth", default = "default_tile_size")]
    /// Grid cell size in pixels.
    pub tile_width: u32,
    #[serde(rename = "tileheight", default = "default_tile_size")]
    /// See `tile_width`.
    pub tile_height: u32,
    /// Back to front.
    pub layers: Vec<Layer>,
    /// In declaration order.
    pub tilesets: Vec<TilesetReference>,
}

impl TilemapDescriptor {
    /// Reads, parses and validates the map at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let p = path.as_ref();
        info!("Loading tilemap {}", p.display());

        let txt = fs::read_to_string(p).map_err(|source| MapError::Io {
            path: p.to_path_buf(),
            source,
        })?;
        let map: TilemapDescriptor =
            serde_json::from_str(&txt).map_err(|source| MapError::Json {
                path: p.to_path_buf(),
                source,
            })?;
        map.validate()?;

        info!(
            "Loaded tilemap with {} layers and {} tileset references",
            map.layers.len(),
            map.tilesets.len()
        );
        Ok(map)
    }

    /// Checks layer sizes, firstgids and tile size.
    pub fn validate(&self) -> Result<(), MapError> {
        for l in self.layers.iter().filter(|l| l.is_tile_layer()) {
            let Some(expected) = l.width.checked_mul(l.height) else {
                return Err(MapError::InvalidMap(format!(
                    "layer '{}' is too large: {}x{} cells",
                    l.name, l.width, l.height
                )));
            };
            if l.data.len() != expected {
                return Err(MapError::InvalidLayerSize {
                    layer: l.name.clone(),
                    expected,
                    actual: l.data.len(),
                });
            }
        }
        if let Some(ts) = self.tilesets.iter().find(|ts| ts.first_gid == 0) {
            return Err(MapError::InvalidMap(format!(
                "tileset {} has firstgid 0; gids start at 1",
                ts.source
            )));
        }
        if self.tile_width == 0 || self.tile_height == 0 {
            return Err(MapError::InvalidMap(format!(
                "tile size must be non-zero, got {}x{}",
                self.tile_width, self.tile_height
            )));
        }
        Ok(())
    }

    /// Loads every referenced tileset in declaration order.
    ///
    /// `map_path` is the file this descriptor came from; tileset sources are
    /// resolved against its directory. Stops at the first failure.
    pub fn generate_tilesets(&self, map_path: impl AsRef<Path>) -> Result<Vec<Tileset>, MapError> {
        let map_path = map_path.as_ref();
        let tilesets = self
            .tilesets
            .iter()
            .map(|r| Tileset::load(resolve_relative(map_path, &r.source), r.first_gid))
            .collect::<Result<Vec<_>, _>>()?;
        info!("Loaded {} tilesets", tilesets.len());
        Ok(tilesets)
    }

    /// Map extent in pixels, taken from the largest tile layer.
    pub fn pixel_size(&self) -> (f32, f32) {
        let (w, h) = self
            .layers
            .iter()
            .filter(|l| l.is_tile_layer())
            .fold((0, 0), |(w, h), l| (w.max(l.width), h.max(l.height)));
        (
            w as f32 * self.tile_width as f32,
            h as f32 * self.tile_height as f32,
        )
    }
}

/// See [`TilemapDescriptor::load`].
pub fn load_tilemap(path: impl AsRef<Path>) -> Result<TilemapDescriptor, MapError> {
    TilemapDescriptor::load(path)
}

/// See [`TilemapDescriptor::generate_tilesets`].
pub fn generate_tilesets(
    map: &TilemapDescriptor,
    map_path: impl AsRef<Path>,
) -> Result<Vec<Tileset>, MapError> {
    map.generate_tilesets(map_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_are_row_major() {
        let layer = Layer::new("ground", 3, 2, vec![1, 2, 3, 4, 5, 6]);
        let cells: Vec<_> = layer.cells().collect();
        assert_eq!(cells[0], (0, 0, 1));
        assert_eq!(cells[2], (2, 0, 3));
        assert_eq!(cells[4], (1, 1, 5));
        assert_eq!(layer.tile_at(2, 1), Some(6));
        assert_eq!(layer.tile_at(3, 0), None);
    }

    #[test]
    fn object_layers_skip_size_validation() {
        let map: TilemapDescriptor = serde_json::from_str(
            r#"{
              "layers": [
                { "type": "objectgroup", "name": "spawns", "objects": [] },
                { "name": "ground", "width": 1, "height": 1, "data": [0] }
              ],
              "tilesets": []
            }"#,
        )
        .expect("parse");
        assert!(map.validate().is_ok());
        assert!(!map.layers[0].is_tile_layer());
        assert_eq!(map.tile_width, 16);
    }

    #[test]
    fn rejects_zero_first_gid() {
        let map = TilemapDescriptor {
            tile_width: 16,
            tile_height: 16,
            layers: vec![],
            tilesets: vec![TilesetReference {
                first_gid: 0,
                source: "floor.json".into(),
            }],
        };
        assert!(matches!(map.validate(), Err(MapError::InvalidMap(_))));
    }

    #[test]
    fn pixel_size_does_not_truncate_wide_layers() {
        let mut wide = Layer::new("wide", 0, 1, vec![]);
        wide.width = 1 << 33;
        let map = TilemapDescriptor {
            tile_width: 16,
            tile_height: 16,
            layers: vec![wide],
            tilesets: vec![],
        };
        assert_eq!(map.pixel_size(), ((1u64 << 37) as f32, 16.0));
    }

    #[test]
    fn pixel_size_uses_largest_layer() {
        let map = TilemapDescriptor {
            tile_width: 16,
            tile_height: 16,
            layers: vec![
                Layer::new("a", 4, 2, vec![0; 8]),
                Layer::new("b", 2, 5, vec![0; 10]),
            ],
            tilesets: vec![],
        };
        assert_eq!(map.pixel_size(), (64.0, 80.0));
    }
}
