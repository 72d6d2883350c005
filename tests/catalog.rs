use std::path::{Path, PathBuf};
use backrooms_tiles::{
    check_map_file, diff, load_tileset, max_severity, validate, write_tsx, Finding, RefFinding,
    Severity, Tileset,
};

fn current_catalog_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/levelsrc/BackroomsTileset.tsx")
}

fn pinned_catalog_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/BackroomsTileset-1.9.tsx")
}

#[test]
fn current_catalog_exposes_the_new_wall_tiles() {
    let tileset = load_tileset(current_catalog_path()).unwrap();
    assert_eq!(tileset.name, "BackroomsTileset");
    assert_eq!(tileset.get(62).unwrap().image.source, "../textures/wall1mid.png");
    assert_eq!(tileset.get(65).unwrap().image.source, "../textures/wall3alt1mid.png");
    assert!(tileset.contains(58));
    assert_eq!(tileset.max_id(), Some(65));
    assert_eq!(tileset.tile_count, 64);
    assert_eq!(tileset.recomputed_tile_count(), 64);
}

#[test]
fn pinned_revision_lacks_the_new_tiles() {
    let tileset = load_tileset(pinned_catalog_path()).unwrap();
    assert!(!tileset.contains(58));
    assert!(tileset.contains(57));
    assert_eq!(tileset.max_id(), Some(57));
    assert_eq!(tileset.tile_count, 56);
    assert_eq!(tileset.recomputed_tile_count(), 56);
}

#[test]
fn both_revisions_mark_tile_2_as_placeholder() {
    for path in [pinned_catalog_path(), current_catalog_path()] {
        let tileset = load_tileset(path).unwrap();
        assert_eq!(tileset.placeholder_id(), Some(2));
        assert!(tileset.is_image_collection());
        assert_eq!((tileset.tile_width, tileset.tile_height), (64, 64));
    }
}

#[test]
fn shared_ids_agree_across_revisions() {
    // The two revisions differ in attribute order and the added entries only
    let old = load_tileset(pinned_catalog_path()).unwrap();
    let new = load_tileset(current_catalog_path()).unwrap();
    for tile in old.iter() {
        assert_eq!(
            new.get(tile.id).unwrap().image.source,
            tile.image.source,
            "tile {} retargeted between revisions",
            tile.id
        );
    }
}

#[test]
fn diff_between_revisions_is_additions_only() {
    let old = load_tileset(pinned_catalog_path()).unwrap();
    let new = load_tileset(current_catalog_path()).unwrap();
    let result = diff(&old, &new);
    assert_eq!(result.added, (58..=65).collect::<Vec<u32>>());
    assert!(result.removed.is_empty());
    assert!(result.retargeted.is_empty());
    assert!(result.resized.is_empty());
    let fields: Vec<&str> = result.metadata.iter().map(|c| c.field.as_str()).collect();
    assert_eq!(fields, vec!["version", "tiledversion", "tilecount"]);
}

#[test]
fn both_revisions_round_trip() {
    for path in [pinned_catalog_path(), current_catalog_path()] {
        let tileset = load_tileset(&path).unwrap();
        let reparsed = Tileset::parse_str(&write_tsx(&tileset)).unwrap();
        assert_eq!(reparsed.tiles, tileset.tiles);
        assert_eq!(reparsed.name, tileset.name);
        assert_eq!(reparsed.tile_count, tileset.tile_count);
        assert_eq!(reparsed.columns, tileset.columns);
        assert_eq!(reparsed.grid, tileset.grid);
    }
}

#[test]
fn serialization_canonicalizes_attribute_order() {
    // The pinned revision writes width/height before source; re-serializing
    // emits the newer source-first order without changing the mapping
    let tileset = load_tileset(pinned_catalog_path()).unwrap();
    let xml = write_tsx(&tileset);
    assert!(xml.contains("<image source=\"../textures/none.png\" width=\"64\" height=\"64\"/>"));
    assert!(!xml.contains("width=\"64\" height=\"64\" source="));
}

#[test]
fn both_revisions_validate_without_errors() {
    for path in [pinned_catalog_path(), current_catalog_path()] {
        let tileset = load_tileset(path).unwrap();
        let findings = validate(&tileset);
        assert!(max_severity(&findings) < Some(Severity::Warning), "{findings:?}");
    }
}

#[test]
fn catalog_audit_surfaces_shared_textures() {
    // floor2.png backs ids 6 and 8, door1sidewall.png backs 52 and 53
    let tileset = load_tileset(pinned_catalog_path()).unwrap();
    let findings = validate(&tileset);
    assert!(findings.contains(&Finding::DuplicatePath {
        source: String::from("../textures/floor2.png"),
        ids: vec![6, 8],
    }));
    assert!(findings.contains(&Finding::DuplicatePath {
        source: String::from("../textures/door1sidewall.png"),
        ids: vec![52, 53],
    }));
}

#[test]
fn refcheck_catches_ids_missing_from_the_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let levelsrc = dir.path().join("levelsrc");
    let maps = dir.path().join("maps");
    std::fs::create_dir_all(&levelsrc).unwrap();
    std::fs::create_dir_all(&maps).unwrap();
    std::fs::copy(current_catalog_path(), levelsrc.join("BackroomsTileset.tsx")).unwrap();

    // GID 4 -> tile 3 (present); GID 101 -> tile 100 (absent); GID 1 -> tile 0 (absent)
    let map = r#"<?xml version="1.0" encoding="UTF-8"?>
<map version="1.10" orientation="orthogonal" renderorder="right-down" width="2" height="2" tilewidth="64" tileheight="64" infinite="0">
 <tileset firstgid="1" source="../levelsrc/BackroomsTileset.tsx"/>
 <layer id="1" name="walls" width="2" height="2">
  <data encoding="csv">
4,101,
1,0
</data>
 </layer>
</map>"#;
    let map_path = maps.join("level0.tmx");
    std::fs::write(&map_path, map).unwrap();

    let findings = check_map_file(&map_path).unwrap();
    assert_eq!(findings, vec![
        RefFinding::DanglingTile {
            layer: String::from("walls"),
            tileset: String::from("../levelsrc/BackroomsTileset.tsx"),
            tile_id: 0,
            occurrences: 1,
        },
        RefFinding::DanglingTile {
            layer: String::from("walls"),
            tileset: String::from("../levelsrc/BackroomsTileset.tsx"),
            tile_id: 100,
            occurrences: 1,
        },
    ]);
}

#[test]
fn refcheck_accepts_a_consistent_level() {
    let dir = tempfile::tempdir().unwrap();
    let levelsrc = dir.path().join("levelsrc");
    std::fs::create_dir_all(&levelsrc).unwrap();
    std::fs::copy(current_catalog_path(), levelsrc.join("BackroomsTileset.tsx")).unwrap();

    // Cites the placeholder (gid 3), a wall (gid 4) and the new mid tiles
    let map = r#"<map version="1.10" orientation="orthogonal" width="2" height="2" tilewidth="64" tileheight="64">
 <tileset firstgid="1" source="levelsrc/BackroomsTileset.tsx"/>
 <layer id="1" name="walls" width="2" height="2">
  <data encoding="csv">3,4,63,66</data>
 </layer>
</map>"#;
    let map_path = dir.path().join("level0.tmx");
    std::fs::write(&map_path, map).unwrap();

    assert!(check_map_file(&map_path).unwrap().is_empty());
}
