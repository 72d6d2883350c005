use serde::{Deserialize, Serialize};
use crate::Tileset;

/// Differences between two revisions of a tileset catalog.
#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct TilesetDiff {
    /// Ids present only in the newer revision, ascending.
    pub added: Vec<u32>,
    /// Ids present only in the older revision, ascending.
    pub removed: Vec<u32>,
    /// Ids whose image source changed.
    pub retargeted: Vec<Retargeted>,
    /// Ids whose image dimensions changed.
    pub resized: Vec<Resized>,
    /// Tileset-level attribute changes.
    pub metadata: Vec<MetadataChange>,
}

impl TilesetDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.retargeted.is_empty()
            && self.resized.is_empty()
            && self.metadata.is_empty()
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Retargeted {
    pub id: u32,
    pub old_source: String,
    pub new_source: String,
}

#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct Resized {
    pub id: u32,
    pub old_width: Option<u32>,
    pub old_height: Option<u32>,
    pub new_width: Option<u32>,
    pub new_height: Option<u32>,
}

#[derive(Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
pub struct MetadataChange {
    pub field: String,
    pub old: String,
    pub new: String,
}

/// Compares two revisions of a catalog, `old` to `new`.
pub fn diff(old: &Tileset, new: &Tileset) -> TilesetDiff {
    let mut result = TilesetDiff::default();

    for tile in new.iter() {
        match old.get(tile.id) {
            None => result.added.push(tile.id),
            Some(old_tile) => {
                if old_tile.image.source != tile.image.source {
                    result.retargeted.push(Retargeted {
                        id: tile.id,
                        old_source: old_tile.image.source.clone(),
                        new_source: tile.image.source.clone(),
                    });
                }
                if old_tile.image.width != tile.image.width
                    || old_tile.image.height != tile.image.height
                {
                    result.resized.push(Resized {
                        id: tile.id,
                        old_width: old_tile.image.width,
                        old_height: old_tile.image.height,
                        new_width: tile.image.width,
                        new_height: tile.image.height,
                    });
                }
            },
        }
    }
    for tile in old.iter() {
        if !new.contains(tile.id) {
            result.removed.push(tile.id);
        }
    }

    metadata_change(&mut result.metadata, "name", &old.name, &new.name);
    metadata_change(&mut result.metadata, "version", &old.version, &new.version);
    metadata_change(&mut result.metadata, "tiledversion", &old.tiled_version, &new.tiled_version);
    metadata_change(&mut result.metadata, "tilewidth", &old.tile_width.to_string(), &new.tile_width.to_string());
    metadata_change(&mut result.metadata, "tileheight", &old.tile_height.to_string(), &new.tile_height.to_string());
    metadata_change(&mut result.metadata, "tilecount", &old.tile_count.to_string(), &new.tile_count.to_string());
    metadata_change(&mut result.metadata, "columns", &old.columns.to_string(), &new.columns.to_string());
    result
}

fn metadata_change(changes: &mut Vec<MetadataChange>, field: &str, old: &str, new: &str) {
    if old != new {
        changes.push(MetadataChange {
            field: String::from(field),
            old: String::from(old),
            new: String::from(new),
        });
    }
}
