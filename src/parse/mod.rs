//! Readers for the Tiled XML formats: `.tsx` tilesets and the `.tmx` maps
//! that reference them. Parsing is attribute-order independent and skips
//! unknown constructs, matching Tiled's own forward compatibility.
mod map;
mod tileset;

use std::num::ParseIntError;
use std::path::Path;
use anyhow::Context;
use derive_more::*;
use crate::{TiledMap, Tileset};

#[derive(Error, Display, From, Debug)]
pub enum ParseError {
    XmlError(roxmltree::Error),
    #[display(fmt="{_0}")]
    ParseIntError(ParseIntError),
    #[display(fmt="Missing element '{tag_name}'")]
    #[from(ignore)]
    MissingElement { tag_name: String },
    #[display(fmt="Missing attribute '{attribute}' on '{tag_name}'")]
    #[from(ignore)]
    MissingAttribute { tag_name: String, attribute: String },
    #[display(fmt="Unexpected value '{value}'")]
    #[from(ignore)]
    InvalidAttributeValue { value: String },
    #[display(fmt="Duplicate tile id {id}")]
    #[from(ignore)]
    DuplicateTileId { id: u32 },
    #[display(fmt="Tile {id} has no image")]
    #[from(ignore)]
    MissingImage { id: u32 },
    #[display(fmt="Unsupported layer data encoding '{encoding}'")]
    #[from(ignore)]
    UnsupportedEncoding { encoding: String },
}

/// Reads and parses a `.tsx` tileset file.
pub fn load_tileset(path: impl AsRef<Path>) -> anyhow::Result<Tileset> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed reading {}", path.display()))?;
    let tileset = Tileset::parse_str(&source)
        .with_context(|| format!("Failed parsing {}", path.display()))?;
    Ok(tileset)
}

/// Reads and parses a `.tmx` map file.
/// External tileset references are kept verbatim; see [`crate::check_map_file`]
/// for resolving them against the filesystem.
pub fn load_map(path: impl AsRef<Path>) -> anyhow::Result<TiledMap> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed reading {}", path.display()))?;
    let map = TiledMap::parse_str(&source)
        .with_context(|| format!("Failed parsing {}", path.display()))?;
    Ok(map)
}
