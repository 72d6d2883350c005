use std::collections::BTreeMap;
use std::path::Path;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use crate::Tileset;

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[display(fmt="info")]
    Info,
    #[display(fmt="warning")]
    Warning,
    #[display(fmt="error")]
    Error,
}

/// One structural defect or oddity found in a tileset.
#[derive(Clone, Eq, PartialEq, Debug, Display, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    #[display(fmt="columns is {columns}, expected 0 for an image-collection tileset")]
    NotImageCollection { columns: u32 },
    #[display(fmt="tilecount is {declared} but {actual} entries are present")]
    TileCountMismatch { declared: u32, actual: u32 },
    #[display(fmt="tile {id} image is {width}x{height}")]
    WrongTileSize { id: u32, width: u32, height: u32 },
    #[display(fmt="tile {id} image has no dimensions")]
    MissingDimensions { id: u32 },
    #[display(fmt="'{source}' backs tiles {ids:?}")]
    DuplicatePath { source: String, ids: Vec<u32> },
    #[display(fmt="tile {id} references missing file '{source}'")]
    MissingImageFile { id: u32, source: String },
}

impl Finding {
    pub fn severity(&self) -> Severity {
        match self {
            Self::NotImageCollection { .. } => Severity::Warning,
            Self::TileCountMismatch { .. } => Severity::Warning,
            Self::WrongTileSize { .. } => Severity::Error,
            Self::MissingDimensions { .. } => Severity::Warning,
            Self::DuplicatePath { .. } => Severity::Info,
            Self::MissingImageFile { .. } => Severity::Error,
        }
    }
}

pub fn max_severity(findings: &[Finding]) -> Option<Severity> {
    findings.iter().map(Finding::severity).max()
}

/// Structural checks over a parsed tileset, in document-independent terms:
/// id uniqueness is already guaranteed by parsing and by the typed API, so
/// the checks cover everything else the catalog promises its consumers.
/// Purely in-memory; see [`validate_against_dir`] to also verify files exist.
pub fn validate(tileset: &Tileset) -> Vec<Finding> {
    let mut findings = Vec::new();
    let placeholder = tileset.placeholder_id();

    if !tileset.is_image_collection() {
        findings.push(Finding::NotImageCollection { columns: tileset.columns });
    }
    let actual = tileset.recomputed_tile_count();
    if tileset.tile_count != actual {
        findings.push(Finding::TileCountMismatch { declared: tileset.tile_count, actual });
    }

    // The placeholder is exempt from dimension checks
    for tile in tileset.iter() {
        if Some(tile.id) == placeholder {
            continue;
        }
        match (tile.image.width, tile.image.height) {
            (Some(width), Some(height)) => {
                if width != tileset.tile_width || height != tileset.tile_height {
                    findings.push(Finding::WrongTileSize { id: tile.id, width, height });
                }
            },
            _ => findings.push(Finding::MissingDimensions { id: tile.id }),
        }
    }

    // Several ids sharing one texture is legal; surfaced for catalog audits
    let mut by_source: BTreeMap<&str, Vec<u32>> = BTreeMap::new();
    for tile in tileset.iter() {
        by_source.entry(tile.image.source.as_str()).or_default().push(tile.id);
    }
    for (source, ids) in by_source {
        if ids.len() > 1 {
            findings.push(Finding::DuplicatePath { source: String::from(source), ids });
        }
    }

    findings
}

/// Structural checks plus image-file existence, with sources resolved
/// relative to `base_dir` (normally the tileset document's directory).
pub fn validate_against_dir(tileset: &Tileset, base_dir: &Path) -> Vec<Finding> {
    let mut findings = validate(tileset);
    for tile in tileset.iter() {
        if !base_dir.join(&tile.image.source).exists() {
            findings.push(Finding::MissingImageFile {
                id: tile.id,
                source: tile.image.source.clone(),
            });
        }
    }
    findings
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{Image, Tile, Tileset};

    fn catalog() -> Tileset {
        let mut tileset = Tileset {
            name: String::from("Backrooms"),
            tile_width: 64,
            tile_height: 64,
            tile_count: 3,
            ..Tileset::default()
        };
        tileset.insert(Tile::new(2, Image::new("../textures/none.png")));
        tileset.insert(Tile::new(3, Image::sized("../textures/wall1.png", 64, 64)));
        tileset.insert(Tile::new(5, Image::sized("../textures/floor1.png", 64, 64)));
        tileset
    }

    #[test]
    fn clean_catalog_has_no_findings() {
        assert!(validate(&catalog()).is_empty());
    }

    #[test]
    fn placeholder_is_exempt_from_dimension_checks() {
        // The none tile above has no dimensions at all; still clean
        let findings = validate(&catalog());
        assert!(!findings.iter().any(|f| matches!(f, Finding::MissingDimensions { .. })));
    }

    #[test]
    fn reports_tilecount_mismatch() {
        let mut tileset = catalog();
        tileset.tile_count = 56;
        let findings = validate(&tileset);
        assert!(findings.contains(&Finding::TileCountMismatch { declared: 56, actual: 3 }));
        assert_eq!(max_severity(&findings), Some(Severity::Warning));
    }

    #[test]
    fn reports_wrong_tile_size() {
        let mut tileset = catalog();
        tileset.insert(Tile::new(9, Image::sized("../textures/big.png", 128, 64)));
        tileset.tile_count = 4;
        let findings = validate(&tileset);
        assert!(findings.contains(&Finding::WrongTileSize { id: 9, width: 128, height: 64 }));
        assert_eq!(max_severity(&findings), Some(Severity::Error));
    }

    #[test]
    fn reports_shared_sources() {
        let mut tileset = catalog();
        tileset.insert(Tile::new(8, Image::sized("../textures/floor1.png", 64, 64)));
        tileset.tile_count = 4;
        let findings = validate(&tileset);
        assert!(findings.contains(&Finding::DuplicatePath {
            source: String::from("../textures/floor1.png"),
            ids: vec![5, 8],
        }));
        assert_eq!(max_severity(&findings), Some(Severity::Info));
    }

    #[test]
    fn reports_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let findings = validate_against_dir(&catalog(), dir.path());
        let missing = findings
            .iter()
            .filter(|f| matches!(f, Finding::MissingImageFile { .. }))
            .count();
        assert_eq!(missing, 3);
    }
}
