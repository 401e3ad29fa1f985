#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use image::{Rgba, RgbaImage};

static COUNTER: AtomicU32 = AtomicU32::new(0);

pub fn temp_dir() -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock went backwards")
        .as_nanos();
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!("mq_tile_rpg_{nanos}_{n}"));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

pub fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create parent dir");
    }
    fs::write(path, contents).expect("failed to write fixture");
}

/// Colour of the sheet cell at `(col, row)`.
pub fn cell_color(col: u32, row: u32) -> Rgba<u8> {
    Rgba([col as u8 * 10, row as u8 * 10, 200, 255])
}

/// A `cols` x `rows` sheet of 16px cells, each filled with `cell_color`.
pub fn write_sheet(path: &Path, cols: u32, rows: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create parent dir");
    }
    RgbaImage::from_fn(cols * 16, rows * 16, |x, y| cell_color(x / 16, y / 16))
        .save(path)
        .expect("failed to write sheet");
}

pub fn write_solid(path: &Path, w: u32, h: u32, color: Rgba<u8>) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("failed to create parent dir");
    }
    RgbaImage::from_pixel(w, h, color)
        .save(path)
        .expect("failed to write image");
}
