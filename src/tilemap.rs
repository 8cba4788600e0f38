//! Tiled map model
//!
//! Parses the map editor's JSON export: an ordered list of tile layers and
//! an ordered list of tileset references. Loaded once at scene start and
//! never mutated; the renderer walks it every frame.
//!
//! Invariant inherited from map authoring: the layer/tileset association is
//! positional, `layers[i]` draws through `tilesets[i]`. It is not inferred
//! from gid ranges, so maps must declare tilesets in layer order.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::constants::TILE_SIZE;
use crate::tileset::{LoadError, Tileset};

/// One full-grid plane of tile ids, row-major, 0 = empty.
#[derive(Debug, Deserialize)]
pub struct TilemapLayer {
    pub data: Vec<u32>,
    pub width: u32,
    pub height: u32,
}

impl TilemapLayer {
    /// Grid coordinate of a flat index.
    pub fn grid_pos(&self, index: usize) -> (u32, u32) {
        (index as u32 % self.width, index as u32 / self.width)
    }
}

/// A tileset declaration: descriptor path (relative to the map file) and
/// the first global id this tileset covers.
#[derive(Debug, Deserialize)]
pub struct TilesetRef {
    pub source: String,
    pub firstgid: u32,
}

/// The parsed map document plus the directory it was loaded from
/// (tileset sources resolve against it).
#[derive(Debug, Deserialize)]
pub struct TilemapJson {
    pub layers: Vec<TilemapLayer>,
    pub tilesets: Vec<TilesetRef>,
    #[serde(skip)]
    map_dir: PathBuf,
}

impl TilemapJson {
    /// Read and parse a map file. Any I/O or parse failure is fatal to the
    /// scene load.
    pub fn load(path: &Path) -> Result<TilemapJson, LoadError> {
        let contents =
            fs::read(path).map_err(|e| LoadError::Io(format!("{}: {}", path.display(), e)))?;
        let mut map: TilemapJson = serde_json::from_slice(&contents)
            .map_err(|e| LoadError::Json(format!("{}: {}", path.display(), e)))?;
        map.map_dir = path.parent().unwrap_or(Path::new("")).to_path_buf();
        Ok(map)
    }

    /// Global tile id at a flat index of a layer; `None` when either index
    /// is out of range.
    pub fn tile_at(&self, layer: usize, index: usize) -> Option<u32> {
        self.layers.get(layer)?.data.get(index).copied()
    }

    /// Map width in cells (layer 0 sets the map bounds).
    pub fn width(&self) -> u32 {
        self.layers.first().map(|l| l.width).unwrap_or(0)
    }

    /// Map height in cells.
    pub fn height(&self) -> u32 {
        self.layers.first().map(|l| l.height).unwrap_or(0)
    }

    /// Map size in world pixels, for camera clamping.
    pub fn width_px(&self) -> f32 {
        (self.width() as i32 * TILE_SIZE) as f32
    }

    pub fn height_px(&self) -> f32 {
        (self.height() as i32 * TILE_SIZE) as f32
    }

    /// Build one tileset resolver per declaration, in declaration order.
    /// One failed tileset fails the whole map load.
    pub fn load_tilesets(&self) -> Result<Vec<Tileset>, LoadError> {
        let mut tilesets = Vec::with_capacity(self.tilesets.len());
        for reference in &self.tilesets {
            let descriptor_path = self.map_dir.join(&reference.source);
            tilesets.push(Tileset::load(&descriptor_path, reference.firstgid)?);
        }
        Ok(tilesets)
    }
}
