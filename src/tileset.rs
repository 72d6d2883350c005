use std::collections::BTreeMap;
use std::path::Path;
use crate::ParseError;

/// File stem of the texture that marks the "no tile here" placeholder entry.
const PLACEHOLDER_STEM: &str = "none";

/// An image-collection tileset: a catalog mapping tile ids to individual
/// texture files. Ids are unique and non-negative; gaps are permitted.
#[derive(Clone, Default, Debug)]
pub struct Tileset {
    pub version: String,
    pub tiled_version: String,
    pub name: String,
    pub class: String,
    pub tile_width: u32,
    pub tile_height: u32,
    pub spacing: u32,
    pub margin: u32,
    /// Tile count as authored in the document.
    /// May disagree with the number of entries; see [`Self::recomputed_tile_count`].
    pub tile_count: u32,
    /// 0 marks an image-collection tileset rather than a sprite sheet.
    pub columns: u32,
    pub grid: Option<Grid>,
    pub tiles: BTreeMap<u32, Tile>,
}

impl Tileset {

    pub fn get(&self, id: u32) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    pub fn contains(&self, id: u32) -> bool {
        self.tiles.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Tiles in ascending id order, regardless of document order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.values()
    }

    /// (id, image source) pairs in ascending id order.
    pub fn image_sources(&self) -> impl Iterator<Item = (u32, &str)> {
        self.tiles.values().map(|tile| (tile.id, tile.image.source.as_str()))
    }

    /// Inserts a tile, replacing and returning any previous entry with the same id.
    pub fn insert(&mut self, tile: Tile) -> Option<Tile> {
        self.tiles.insert(tile.id, tile)
    }

    pub fn remove(&mut self, id: u32) -> Option<Tile> {
        self.tiles.remove(&id)
    }

    pub fn max_id(&self) -> Option<u32> {
        self.tiles.keys().next_back().copied()
    }

    /// Number of entries actually present, as opposed to the authored `tilecount`.
    pub fn recomputed_tile_count(&self) -> u32 {
        self.tiles.len() as u32
    }

    /// Ids backed by the given image source.
    /// A texture may back several ids (the Backrooms catalog reuses `floor2.png`).
    pub fn ids_for_source(&self, source: &str) -> Vec<u32> {
        self.tiles
            .values()
            .filter(|tile| tile.image.source == source)
            .map(|tile| tile.id)
            .collect()
    }

    /// Id of the designated empty/none placeholder entry, if present.
    pub fn placeholder_id(&self) -> Option<u32> {
        self.tiles
            .values()
            .find(|tile| tile.image.stem() == Some(PLACEHOLDER_STEM))
            .map(|tile| tile.id)
    }

    pub fn is_image_collection(&self) -> bool {
        self.columns == 0
    }
}

#[derive(Clone, Eq, PartialEq, Default, Debug)]
pub struct Tile {
    /// ID of tile local to its tileset
    pub id: u32,
    pub image: Image,
}

impl Tile {
    pub fn new(id: u32, image: Image) -> Self {
        Self { id, image }
    }
}

/// Reference to a texture file, relative to the tileset document.
#[derive(Clone, Eq, PartialEq, Default, Debug)]
pub struct Image {
    pub source: String,
    pub format: Option<String>,
    pub trans: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Image {

    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    pub fn sized(source: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            source: source.into(),
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    /// File stem of the source path.
    pub fn stem(&self) -> Option<&str> {
        Path::new(&self.source).file_stem()?.to_str()
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub struct Grid {
    pub orientation: Orientation,
    pub width: u32,
    pub height: u32,
}

#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub enum Orientation {
    #[default]
    Orthogonal,
    Isometric,
    Staggered,
    Hexagonal,
}

impl Orientation {

    pub fn from_str(str: &str) -> Result<Self, ParseError> {
        match str {
            "orthogonal" => Ok(Self::Orthogonal),
            "isometric" => Ok(Self::Isometric),
            "staggered" => Ok(Self::Staggered),
            "hexagonal" => Ok(Self::Hexagonal),
            _ => Err(ParseError::InvalidAttributeValue { value: String::from(str) })
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Orthogonal => "orthogonal",
            Self::Isometric => "isometric",
            Self::Staggered => "staggered",
            Self::Hexagonal => "hexagonal",
        }
    }
}
