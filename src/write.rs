use std::path::Path;
use anyhow::Context;
use crate::Tileset;

/// Serializes a tileset to Tiled-compatible XML.
/// Entries are emitted in ascending id order with a fixed attribute order;
/// `tilecount` is written as stored, never recomputed.
pub fn write_tsx(tileset: &Tileset) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<tileset");
    if !tileset.version.is_empty() {
        xml.push_str(&format!(" version=\"{}\"", escape_xml(&tileset.version)));
    }
    if !tileset.tiled_version.is_empty() {
        xml.push_str(&format!(" tiledversion=\"{}\"", escape_xml(&tileset.tiled_version)));
    }
    xml.push_str(&format!(" name=\"{}\"", escape_xml(&tileset.name)));
    if !tileset.class.is_empty() {
        xml.push_str(&format!(" class=\"{}\"", escape_xml(&tileset.class)));
    }
    xml.push_str(&format!(
        " tilewidth=\"{}\" tileheight=\"{}\"",
        tileset.tile_width, tileset.tile_height
    ));
    if tileset.spacing != 0 {
        xml.push_str(&format!(" spacing=\"{}\"", tileset.spacing));
    }
    if tileset.margin != 0 {
        xml.push_str(&format!(" margin=\"{}\"", tileset.margin));
    }
    xml.push_str(&format!(
        " tilecount=\"{}\" columns=\"{}\">\n",
        tileset.tile_count, tileset.columns
    ));

    if let Some(grid) = &tileset.grid {
        xml.push_str(&format!(
            " <grid orientation=\"{}\" width=\"{}\" height=\"{}\"/>\n",
            grid.orientation.as_str(), grid.width, grid.height
        ));
    }

    for tile in tileset.iter() {
        xml.push_str(&format!(" <tile id=\"{}\">\n", tile.id));
        let image = &tile.image;
        xml.push_str(&format!("  <image source=\"{}\"", escape_xml(&image.source)));
        if let Some(format) = &image.format {
            xml.push_str(&format!(" format=\"{}\"", escape_xml(format)));
        }
        if let Some(trans) = &image.trans {
            xml.push_str(&format!(" trans=\"{}\"", escape_xml(trans)));
        }
        if let Some(width) = image.width {
            xml.push_str(&format!(" width=\"{width}\""));
        }
        if let Some(height) = image.height {
            xml.push_str(&format!(" height=\"{height}\""));
        }
        xml.push_str("/>\n");
        xml.push_str(" </tile>\n");
    }
    xml.push_str("</tileset>\n");
    xml
}

/// Serializes a tileset and writes it to `path`.
pub fn save_tileset(tileset: &Tileset, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let path = path.as_ref();
    std::fs::write(path, write_tsx(tileset))
        .with_context(|| format!("Failed writing {}", path.display()))?;
    Ok(())
}

fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
