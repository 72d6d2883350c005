use crate::{Orientation, ParseError, Tileset};

pub const FLIPPED_HORIZONTALLY: u32 = 0x8000_0000;
pub const FLIPPED_VERTICALLY: u32 = 0x4000_0000;
pub const FLIPPED_DIAGONALLY: u32 = 0x2000_0000;
pub const ROTATED_HEXAGONAL_120: u32 = 0x1000_0000;

/// Clears the flip/rotation flags Tiled stores in the high bits of a GID.
pub fn strip_flip_flags(gid: u32) -> u32 {
    gid & !(FLIPPED_HORIZONTALLY | FLIPPED_VERTICALLY | FLIPPED_DIAGONALLY | ROTATED_HEXAGONAL_120)
}

/// A mostly 1:1 mapping of the TMX `<map>` specification, retaining only what
/// is needed to audit tile references against the tilesets they cite.
#[derive(Clone, Default, Debug)]
pub struct TiledMap {
    pub version: String,
    pub orientation: Orientation,
    pub render_order: RenderOrder,
    pub width: u32,
    pub height: u32,
    pub tile_width: u32,
    pub tile_height: u32,
    pub infinite: bool,
    pub tilesets: Vec<TilesetEntry>,
    pub layers: Vec<Layer>,
}

impl TiledMap {

    /// Maps a raw GID from layer data to the tileset entry that claims it.
    /// Flip flags are stripped first. GID 0 (empty cell) maps to nothing, as
    /// does a GID below every `first_gid`.
    pub fn resolve_gid(&self, raw: u32) -> Option<Gid> {
        let gid = strip_flip_flags(raw);
        if gid == 0 {
            return None;
        }
        let mut best: Option<(usize, u32)> = None;
        for (index, entry) in self.tilesets.iter().enumerate() {
            let first_gid = entry.first_gid();
            if first_gid <= gid && best.map_or(true, |(_, best_gid)| first_gid >= best_gid) {
                best = Some((index, first_gid));
            }
        }
        best.map(|(tileset_index, first_gid)| Gid {
            tileset_index,
            tile_id: gid - first_gid,
        })
    }
}

/// A single tileset stored in a [`TiledMap`].
/// Either stores the tileset, or references it in another file.
#[derive(Clone, Debug)]
pub enum TilesetEntry {
    Internal {
        first_gid: u32,
        tileset: Tileset,
    },
    External {
        first_gid: u32,
        source: String,
    },
}

impl TilesetEntry {
    pub fn first_gid(&self) -> u32 {
        match self {
            Self::Internal { first_gid, .. } => *first_gid,
            Self::External { first_gid, .. } => *first_gid,
        }
    }
}

/// A finite tile layer with decoded cell data.
#[derive(Clone, Default, Debug)]
pub struct Layer {
    pub id: u32,
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Raw GIDs in row-major order, flip flags still set.
    pub data: Vec<u32>,
}

impl Layer {
    /// Raw GIDs of every cell, including empty ones.
    pub fn gids(&self) -> impl Iterator<Item = u32> + '_ {
        self.data.iter().copied()
    }
}

/// Global tile id resolved to its tileset.
#[derive(Copy, Clone, Eq, PartialEq, Default, Debug, Hash, Ord, PartialOrd)]
pub struct Gid {
    pub tileset_index: usize,
    pub tile_id: u32,
}

#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub enum RenderOrder {
    #[default]
    RightDown,
    RightUp,
    LeftDown,
    LeftUp,
}

impl RenderOrder {

    pub fn from_str(str: &str) -> Result<Self, ParseError> {
        match str {
            "right-down" => Ok(Self::RightDown),
            "right-up" => Ok(Self::RightUp),
            "left-down" => Ok(Self::LeftDown),
            "left-up" => Ok(Self::LeftUp),
            _ => Err(ParseError::InvalidAttributeValue { value: String::from(str) })
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RightDown => "right-down",
            Self::RightUp => "right-up",
            Self::LeftDown => "left-down",
            Self::LeftUp => "left-up",
        }
    }
}
