//! Tileset resolvers
//!
//! A tileset maps a global tile id (gid) to a source sub-image. Two shapes
//! exist in the map data:
//!
//! - *Uniform*: one sheet image with a fixed column count; id arithmetic
//!   derives the source cell.
//! - *Dynamic*: one discrete image per declared tile; the gid indexes an
//!   ordered image list and the region is the whole image.
//!
//! The variant is decided once at load time from the descriptor path: a
//! `buildings` segment selects the dynamic variant. That is a map-authoring
//! convention this project inherits, not something inferable from the JSON
//! shape alone, so it is dispatched here and nowhere else.

use std::fs;
use std::path::{Path, PathBuf};

use macroquad::prelude::{FilterMode, Rect, Texture2D};
use serde::Deserialize;

use crate::constants::{ASSETS_DIR, TILE_SIZE_F, UNIFORM_TILESET_COLUMNS};

/// Fatal load failure: missing/corrupt file or malformed JSON.
///
/// Raised only while a scene is loading; per-frame logic never produces
/// one. A failed load leaves no partial tileset behind.
#[derive(Debug)]
pub enum LoadError {
    /// File I/O error (message includes the offending path)
    Io(String),
    /// Malformed map or tileset JSON
    Json(String),
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io(msg) => write!(f, "I/O error: {}", msg),
            LoadError::Json(msg) => write!(f, "JSON error: {}", msg),
        }
    }
}

impl std::error::Error for LoadError {}

impl LoadError {
    fn io(path: &Path, err: std::io::Error) -> Self {
        LoadError::Io(format!("{}: {}", path.display(), err))
    }

    fn json(path: &Path, err: serde_json::Error) -> Self {
        LoadError::Json(format!("{}: {}", path.display(), err))
    }
}

/// Uniform descriptor: `{"image": "..."}`
#[derive(Debug, Deserialize)]
struct UniformDescriptor {
    image: String,
}

/// Dynamic descriptor: `{"tiles": [{"id", "image", "imagewidth", "imageheight"}]}`
#[derive(Debug, Deserialize)]
struct DynamicDescriptor {
    tiles: Vec<TileDescriptor>,
}

#[derive(Debug, Deserialize)]
struct TileDescriptor {
    #[serde(default)]
    id: u32,
    image: String,
    #[serde(default)]
    imagewidth: u32,
    #[serde(default)]
    imageheight: u32,
}

/// Parsed descriptor, variant already decided from the path.
#[derive(Debug)]
enum Descriptor {
    Uniform(UniformDescriptor),
    Dynamic(DynamicDescriptor),
}

/// Load-time dispatch rule: a `buildings` marker anywhere in the descriptor
/// path selects the dynamic (image-per-tile) variant.
fn is_dynamic_descriptor(path: &Path) -> bool {
    path.to_string_lossy().contains("buildings")
}

fn parse_descriptor(path: &Path, contents: &[u8]) -> Result<Descriptor, LoadError> {
    if is_dynamic_descriptor(path) {
        let desc: DynamicDescriptor =
            serde_json::from_slice(contents).map_err(|e| LoadError::json(path, e))?;
        Ok(Descriptor::Dynamic(desc))
    } else {
        let desc: UniformDescriptor =
            serde_json::from_slice(contents).map_err(|e| LoadError::json(path, e))?;
        Ok(Descriptor::Uniform(desc))
    }
}

/// Rewrite a descriptor-relative image path to an assets-root path.
///
/// Map-editor descriptors reference images relative to the descriptor file
/// with backslash separators, e.g. `..\/..\/images\/buildings\/b1.png`.
/// Normalize separators, strip up to two leading `../` segments, then
/// resolve under the assets root.
pub fn rewrite_asset_path(raw: &str) -> PathBuf {
    let mut clean = raw.replace('\\', "/");
    for _ in 0..2 {
        if let Some(rest) = clean.strip_prefix("../") {
            clean = rest.to_string();
        }
    }
    Path::new(ASSETS_DIR).join(clean)
}

/// Source cell for a local (first-gid-relative) id in a uniform sheet.
fn uniform_source_rect(local_id: u32) -> Rect {
    let column = local_id % UNIFORM_TILESET_COLUMNS;
    let row = local_id / UNIFORM_TILESET_COLUMNS;
    Rect::new(
        column as f32 * TILE_SIZE_F,
        row as f32 * TILE_SIZE_F,
        TILE_SIZE_F,
        TILE_SIZE_F,
    )
}

/// A resolved tile: which texture to sample and the source region in it.
/// The region height drives bottom anchoring for tiles taller than the grid.
pub struct TileImage<'a> {
    pub texture: &'a Texture2D,
    pub source: Rect,
}

/// One tileset resolver per declared tileset reference, built at scene load.
#[derive(Debug)]
pub enum Tileset {
    Uniform { first_gid: u32, sheet: Texture2D },
    Dynamic { first_gid: u32, tiles: Vec<Texture2D> },
}

impl Tileset {
    /// Load a tileset from its descriptor file. Any missing or corrupt
    /// descriptor or referenced image is fatal; there is no partial state.
    pub fn load(path: &Path, first_gid: u32) -> Result<Tileset, LoadError> {
        let contents = fs::read(path).map_err(|e| LoadError::io(path, e))?;

        match parse_descriptor(path, &contents)? {
            Descriptor::Uniform(desc) => {
                let sheet = load_texture_file(&rewrite_asset_path(&desc.image))?;
                Ok(Tileset::Uniform { first_gid, sheet })
            }
            Descriptor::Dynamic(desc) => {
                let mut tiles = Vec::with_capacity(desc.tiles.len());
                for (index, tile) in desc.tiles.iter().enumerate() {
                    if tile.id as usize != index {
                        // Lookup is positional; a gap in declared ids means
                        // the map editor export disagrees with it.
                        eprintln!(
                            "{}: tile {} declared with id {}, lookup stays positional",
                            path.display(),
                            index,
                            tile.id
                        );
                    }
                    let texture = load_texture_file(&rewrite_asset_path(&tile.image))?;
                    if tile.imagewidth != 0
                        && (texture.width() as u32, texture.height() as u32)
                            != (tile.imagewidth, tile.imageheight)
                    {
                        eprintln!(
                            "{}: tile {} image is {}x{}, descriptor says {}x{}",
                            path.display(),
                            index,
                            texture.width(),
                            texture.height(),
                            tile.imagewidth,
                            tile.imageheight
                        );
                    }
                    tiles.push(texture);
                }
                Ok(Tileset::Dynamic { first_gid, tiles })
            }
        }
    }

    /// Resolve a global tile id to its source sub-image.
    ///
    /// Ids below this tileset's first gid or past its tile range resolve to
    /// `None` and are skipped by the renderer; a bad tile must never halt a
    /// frame.
    pub fn resolve(&self, gid: u32) -> Option<TileImage<'_>> {
        match self {
            Tileset::Uniform { first_gid, sheet } => {
                let local = gid.checked_sub(*first_gid)?;
                let source = uniform_source_rect(local);
                if source.y + source.h > sheet.height() {
                    return None;
                }
                Some(TileImage { texture: sheet, source })
            }
            Tileset::Dynamic { first_gid, tiles } => {
                let local = gid.checked_sub(*first_gid)?;
                let texture = tiles.get(local as usize)?;
                Some(TileImage {
                    texture,
                    source: Rect::new(0.0, 0.0, texture.width(), texture.height()),
                })
            }
        }
    }
}

/// Read and decode an image file into a GPU texture (nearest filtering,
/// it's pixel art). Also used by scenes for entity textures.
pub fn load_texture_file(path: &Path) -> Result<Texture2D, LoadError> {
    let bytes = fs::read(path).map_err(|e| LoadError::io(path, e))?;
    let texture = Texture2D::from_file_with_format(&bytes, None);
    texture.set_filter(FilterMode::Nearest);
    Ok(texture)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn uniform_id_arithmetic() {
        // firstgid=1: gid 24 -> local 23 -> column 1, row 1
        let local = 24u32 - 1;
        let rect = uniform_source_rect(local);
        assert_eq!(rect, Rect::new(16.0, 16.0, 16.0, 16.0));

        // First tile of the sheet
        assert_eq!(uniform_source_rect(0), Rect::new(0.0, 0.0, 16.0, 16.0));
        // Last column before wrapping
        assert_eq!(uniform_source_rect(21).x, 21.0 * 16.0);
        assert_eq!(uniform_source_rect(22), Rect::new(0.0, 16.0, 16.0, 16.0));
    }

    #[test]
    fn descriptor_dispatch_is_path_driven() {
        assert!(is_dynamic_descriptor(Path::new("assets/maps/buildings.tsj")));
        assert!(is_dynamic_descriptor(Path::new(
            "assets/maps/buildings/house.tsj"
        )));
        assert!(!is_dynamic_descriptor(Path::new("assets/maps/floor.tsj")));
    }

    #[test]
    fn parses_uniform_descriptor() {
        let json = br#"{"image": "../../images/tileset-floor.png"}"#;
        let desc = parse_descriptor(Path::new("assets/maps/floor.tsj"), json).unwrap();
        match desc {
            Descriptor::Uniform(u) => assert_eq!(u.image, "../../images/tileset-floor.png"),
            Descriptor::Dynamic(_) => panic!("expected uniform descriptor"),
        }
    }

    #[test]
    fn parses_dynamic_descriptor() {
        let json = br#"{"tiles": [
            {"id": 0, "image": "..\/..\/images\/buildings\/b1.png", "imagewidth": 32, "imageheight": 48},
            {"id": 1, "image": "..\/..\/images\/buildings\/b2.png", "imagewidth": 16, "imageheight": 16}
        ]}"#;
        let desc = parse_descriptor(Path::new("assets/maps/buildings.tsj"), json).unwrap();
        match desc {
            Descriptor::Dynamic(d) => {
                assert_eq!(d.tiles.len(), 2);
                assert_eq!(d.tiles[1].image, "../../images/buildings/b2.png");
                assert_eq!(d.tiles[0].imageheight, 48);
            }
            Descriptor::Uniform(_) => panic!("expected dynamic descriptor"),
        }
    }

    #[test]
    fn malformed_descriptor_is_a_json_error() {
        let err = parse_descriptor(Path::new("assets/maps/floor.tsj"), b"{not json").unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn rewrites_descriptor_relative_paths() {
        assert_eq!(
            rewrite_asset_path(r"..\..\images\buildings\b1.png"),
            Path::new("assets/images/buildings/b1.png")
        );
        assert_eq!(
            rewrite_asset_path("../../images/tileset-floor.png"),
            Path::new("assets/images/tileset-floor.png")
        );
        // Only two up-segments are stripped
        assert_eq!(
            rewrite_asset_path("../../../images/x.png"),
            Path::new("assets/../images/x.png")
        );
        // Already-relative paths just move under the assets root
        assert_eq!(rewrite_asset_path("images/x.png"), Path::new("assets/images/x.png"));
    }

    #[test]
    fn missing_descriptor_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = Tileset::load(&dir.path().join("nope.tsj"), 1).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn missing_referenced_image_is_fatal() {
        // A valid descriptor whose image file does not exist: the whole
        // tileset load fails, never a partial tileset.
        let dir = tempfile::tempdir().unwrap();
        let descriptor = dir.path().join("floor.tsj");
        let mut f = std::fs::File::create(&descriptor).unwrap();
        f.write_all(br#"{"image": "../../images/does-not-exist.png"}"#)
            .unwrap();

        let err = Tileset::load(&descriptor, 1).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }
}
