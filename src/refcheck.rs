use std::path::Path;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use crate::util::{HashMap, HashSet};
use crate::{load_map, load_tileset, strip_flip_flags, TiledMap, Tileset, TilesetEntry};

/// A tile reference in a map that does not resolve to a catalog entry.
#[derive(Clone, Eq, PartialEq, Debug, Display, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RefFinding {
    /// A layer cites a local tile id absent from the tileset claiming its GID range.
    #[display(fmt="layer '{layer}': tile {tile_id} not in '{tileset}' ({occurrences} cells)")]
    DanglingTile {
        layer: String,
        tileset: String,
        tile_id: u32,
        occurrences: usize,
    },
    /// A nonzero GID below every tileset's `first_gid`.
    #[display(fmt="layer '{layer}': gid {gid} not claimed by any tileset ({occurrences} cells)")]
    UnmappedGid {
        layer: String,
        gid: u32,
        occurrences: usize,
    },
    /// An external tileset entry whose parsed tileset was not supplied.
    #[display(fmt="external tileset '{source}' could not be resolved")]
    UnresolvedTileset { source: String },
}

/// Audits every tile reference in `map` against the tilesets it cites.
/// `external` maps the verbatim `source` strings of external entries to their
/// parsed tilesets; entries missing from it are reported, not assumed valid.
pub fn check_refs(map: &TiledMap, external: &HashMap<String, Tileset>) -> Vec<RefFinding> {
    let mut findings = Vec::new();
    let mut unresolved: HashSet<&str> = HashSet::default();

    for layer in &map.layers {

        // Occurrence counts per distinct nonzero GID
        let mut counts: HashMap<u32, usize> = HashMap::default();
        for raw in layer.gids() {
            let gid = strip_flip_flags(raw);
            if gid != 0 {
                *counts.entry(gid).or_default() += 1;
            }
        }
        let mut gids: Vec<u32> = counts.keys().copied().collect();
        gids.sort_unstable();

        for gid in gids {
            let occurrences = counts[&gid];
            let Some(resolved) = map.resolve_gid(gid) else {
                findings.push(RefFinding::UnmappedGid {
                    layer: layer.name.clone(),
                    gid,
                    occurrences,
                });
                continue;
            };
            match &map.tilesets[resolved.tileset_index] {
                TilesetEntry::Internal { tileset, .. } => {
                    if !tileset.contains(resolved.tile_id) {
                        findings.push(RefFinding::DanglingTile {
                            layer: layer.name.clone(),
                            tileset: tileset.name.clone(),
                            tile_id: resolved.tile_id,
                            occurrences,
                        });
                    }
                },
                TilesetEntry::External { source, .. } => match external.get(source) {
                    Some(tileset) => {
                        if !tileset.contains(resolved.tile_id) {
                            findings.push(RefFinding::DanglingTile {
                                layer: layer.name.clone(),
                                tileset: source.clone(),
                                tile_id: resolved.tile_id,
                                occurrences,
                            });
                        }
                    },
                    None => {
                        unresolved.insert(source.as_str());
                    },
                },
            }
        }
    }

    let mut unresolved: Vec<&str> = unresolved.into_iter().collect();
    unresolved.sort_unstable();
    for source in unresolved {
        findings.push(RefFinding::UnresolvedTileset { source: String::from(source) });
    }
    findings
}

/// Loads a map, loads the external tilesets it references relative to the map
/// file, and audits its tile references.
pub fn check_map_file(path: impl AsRef<Path>) -> anyhow::Result<Vec<RefFinding>> {
    let path = path.as_ref();
    let map = load_map(path)?;
    let map_dir = path.parent().unwrap_or(Path::new(""));

    let mut external: HashMap<String, Tileset> = HashMap::default();
    for entry in &map.tilesets {
        if let TilesetEntry::External { source, .. } = entry {
            let tileset_path = map_dir.join(source);
            match load_tileset(&tileset_path) {
                Ok(tileset) => {
                    external.insert(source.clone(), tileset);
                },
                Err(err) => {
                    log::warn!("Failed loading tileset {}: {err:#}", tileset_path.display());
                },
            }
        }
    }
    Ok(check_refs(&map, &external))
}
