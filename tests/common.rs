#![allow(dead_code)]

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use portfolio_prep::catalog::{Catalog, Category, Work};
use portfolio_prep::{Config, TextConsole};
use std::fs;
use std::io::Cursor;
use std::path::Path;
use tempfile::TempDir;

pub type ScriptedConsole = TextConsole<Cursor<Vec<u8>>, Vec<u8>>;

pub fn scripted(input: &str) -> ScriptedConsole {
    TextConsole::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
}

pub fn transcript(console: ScriptedConsole) -> String {
    String::from_utf8(console.into_output()).unwrap()
}

/// Temp workspace with the default `src/`, `images/` and `data/` layout.
pub fn create_workspace() -> (TempDir, Config) {
    let temp_dir = TempDir::new().unwrap();
    let mut config = Config::rooted_at(temp_dir.path());
    config.compression.max_width = 64;
    config.compression.max_height = 48;
    fs::create_dir_all(&config.src_dir).unwrap();
    (temp_dir, config)
}

pub fn write_rgb_image(path: &Path, width: u32, height: u32) {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 7 % 256) as u8, (y * 5 % 256) as u8, ((x ^ y) % 256) as u8])
    })
    .save(path)
    .unwrap();
}

pub fn write_rgba_image(path: &Path, width: u32, height: u32) {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 90, ((x + y) % 256) as u8])
    })
    .save(path)
    .unwrap();
}

pub fn write_corrupt_image(path: &Path) {
    fs::write(path, b"definitely not an image").unwrap();
}

pub fn sample_work(filename: &str) -> Work {
    Work {
        filename: filename.to_string(),
        title: "Existing".to_string(),
        category: Category::Photography,
        description: "kept from an earlier run".to_string(),
        price: 10,
        date: "2025-01".to_string(),
    }
}

pub fn load_catalog(config: &Config) -> Catalog {
    Catalog::load(&config.metadata_path()).unwrap()
}

pub fn filenames(catalog: &Catalog) -> Vec<String> {
    catalog.works.iter().map(|w| w.filename.clone()).collect()
}
