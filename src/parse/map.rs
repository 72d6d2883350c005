use roxmltree::{Document, Node};
use crate::{Layer, Orientation, ParseError, RenderOrder, TiledMap, Tileset, TilesetEntry};

impl TiledMap {

    pub fn parse_str(source: &str) -> Result<Self, ParseError> {
        let doc = Document::parse(source)?;
        Self::parse_doc(&doc)
    }

    pub fn parse_doc(doc: &Document) -> Result<Self, ParseError> {
        let root = doc.root();
        for node in root.children() {
            if node.tag_name().name() == "map" {
                let mut map = TiledMap::default();
                map.parse(node)?;
                return Ok(map);
            }
        }
        Err(ParseError::MissingElement { tag_name: String::from("map") })
    }

    fn parse(&mut self, map_node: Node) -> Result<(), ParseError> {

        // Parses map attributes
        for attribute in map_node.attributes() {
            let name = attribute.name();
            let value = attribute.value();
            match name {
                "version" => self.version = String::from(value),
                "orientation" => self.orientation = Orientation::from_str(value)?,
                "renderorder" => self.render_order = RenderOrder::from_str(value)?,
                "width" => self.width = value.parse()?,
                "height" => self.height = value.parse()?,
                "tilewidth" => self.tile_width = value.parse()?,
                "tileheight" => self.tile_height = value.parse()?,
                "infinite" => self.infinite = match value {
                    "0" => false,
                    "1" => true,
                    _ => return Err(ParseError::InvalidAttributeValue { value: String::from(value) }),
                },
                _ => {}
            }
        }

        // Tileset entries are direct children; layers may sit inside groups
        for node in map_node.children() {
            if node.tag_name().name() == "tileset" {
                self.tilesets.push(TilesetEntry::parse(node)?);
            }
        }
        for node in map_node.descendants() {
            if node.tag_name().name() == "layer" {
                self.layers.push(Layer::parse(node)?);
            }
        }
        Ok(())
    }
}

impl TilesetEntry {
    fn parse(entry_node: Node) -> Result<Self, ParseError> {
        let first_gid: u32 = entry_node
            .attributes()
            .find(|attr| attr.name() == "firstgid")
            .ok_or(ParseError::MissingAttribute {
                tag_name: String::from("tileset"),
                attribute: String::from("firstgid"),
            })?
            .value()
            .parse()?;
        let source: Option<&str> = entry_node
            .attributes()
            .find(|attr| attr.name() == "source")
            .map(|attr| attr.value());

        if let Some(source) = source {
            Ok(TilesetEntry::External { first_gid, source: String::from(source) })
        }
        else {
            let mut tileset = Tileset::default();
            tileset.parse(entry_node)?;
            Ok(TilesetEntry::Internal { first_gid, tileset })
        }
    }
}

impl Layer {
    fn parse(layer_node: Node) -> Result<Self, ParseError> {
        let mut layer = Layer::default();
        for attribute in layer_node.attributes() {
            let name = attribute.name();
            let value = attribute.value();
            match name {
                "id" => layer.id = value.parse()?,
                "name" => layer.name = String::from(value),
                "width" => layer.width = value.parse()?,
                "height" => layer.height = value.parse()?,
                _ => {}
            }
        }
        for child in layer_node.children() {
            if child.tag_name().name() == "data" {
                layer.data = parse_layer_data(child)?;
            }
        }
        Ok(layer)
    }
}

fn parse_layer_data(data_node: Node) -> Result<Vec<u32>, ParseError> {
    let encoding = data_node
        .attributes()
        .find(|attr| attr.name() == "encoding")
        .map(|attr| attr.value());
    match encoding {
        Some("csv") => {},
        Some(other) => return Err(ParseError::UnsupportedEncoding { encoding: String::from(other) }),
        // Tile data as child <tile> elements predates the csv encoding
        None => return Err(ParseError::UnsupportedEncoding { encoding: String::from("xml") }),
    }

    let text = data_node.text().unwrap_or("");
    let mut gids = Vec::new();
    for cell in text.split(',') {
        let cell = cell.trim();
        if cell.is_empty() {
            continue;
        }
        gids.push(cell.parse()?);
    }
    Ok(gids)
}
