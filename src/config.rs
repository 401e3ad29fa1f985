//! Startup settings read from `assets/game.json`.

use std::path::{Path, PathBuf};

use anyhow::Context;
use log::info;
use serde::Deserialize;

/// Startup settings. Every field is optional in the JSON file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Window caption.
    pub window_title: String,
    /// Initial window width in pixels.
    pub window_width: i32,
    /// Initial window height in pixels.
    pub window_height: i32,
    /// Tilemap JSON to load at startup.
    pub map: PathBuf,
    /// Drawn for the player.
    pub player_image: PathBuf,
    /// Drawn for every enemy.
    pub enemy_image: PathBuf,
    /// Drawn for every coin.
    pub coin_image: PathBuf,
    /// Player spawn point in map pixels.
    pub player_start: [f32; 2],
    /// Pixels per frame.
    pub player_speed: f32,
    /// One enemy per entry.
    pub enemy_spawns: Vec<[f32; 2]>,
    /// Pixels per frame, per axis.
    pub enemy_speed: f32,
    /// One coin per entry.
    pub coin_spawns: Vec<[f32; 2]>,
    /// Experience granted by each coin.
    pub coin_xp: u32,
    /// RGBA clear colour.
    pub background: [u8; 4],
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_title: "Tile RPG".into(),
            window_width: 640,
            window_height: 480,
            map: "assets/maps/spawnMap.json".into(),
            player_image: "assets/players/samurai.png".into(),
            enemy_image: "assets/enemys/lion.png".into(),
            coin_image: "assets/misc/goldcoin.png".into(),
            player_start: [100.0, 100.0],
            player_speed: 2.0,
            enemy_spawns: vec![[150.0, 100.0]],
            enemy_speed: 0.5,
            coin_spawns: vec![[150.0, 100.0]],
            coin_xp: 100,
            background: [0x80, 0xa0, 0xc0, 0xff],
        }
    }
}

impl GameConfig {
    /// Parses a config document; missing fields take their defaults.
    pub fn from_json(txt: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(txt)?)
    }

    /// Reads `path`, falling back to defaults if the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let txt = std::fs::read_to_string(path)
            .with_context(|| format!("Reading config file {}", path.display()))?;
        Self::from_json(&txt).with_context(|| format!("Parsing config file {}", path.display()))
    }
}
