use roxmltree::{Document, Node};
use crate::{Grid, Image, Orientation, ParseError, Tile, Tileset};

impl Tileset {

    pub fn parse_str(source: &str) -> Result<Self, ParseError> {
        let doc = Document::parse(source)?;
        Self::parse_doc(&doc)
    }

    pub fn parse_doc(doc: &Document) -> Result<Self, ParseError> {
        let root = doc.root();
        for node in root.children() {
            if node.tag_name().name() == "tileset" {
                let mut tileset = Tileset::default();
                tileset.parse(node)?;
                return Ok(tileset);
            }
        }
        Err(ParseError::MissingElement { tag_name: String::from("tileset") })
    }

    pub(crate) fn parse(&mut self, tileset_node: Node) -> Result<(), ParseError> {

        // Parses attributes
        for attribute in tileset_node.attributes() {
            let name = attribute.name();
            let value = attribute.value();
            match name {
                "version" => self.version = String::from(value),
                "tiledversion" => self.tiled_version = String::from(value),
                "name" => self.name = String::from(value),
                "class" => self.class = String::from(value),
                "tilewidth" => self.tile_width = value.parse()?,
                "tileheight" => self.tile_height = value.parse()?,
                "spacing" => self.spacing = value.parse()?,
                "margin" => self.margin = value.parse()?,
                "tilecount" => self.tile_count = value.parse()?,
                "columns" => self.columns = value.parse()?,
                _ => {}
            }
        }

        // Parses children
        for child in tileset_node.children() {
            match child.tag_name().name() {
                "grid" => self.grid = Some(Grid::parse(child)?),
                "tile" => {
                    let tile = Tile::parse(child)?;
                    let id = tile.id;
                    if self.tiles.insert(id, tile).is_some() {
                        return Err(ParseError::DuplicateTileId { id });
                    }
                },
                "" => {},
                tag => log::debug!("Skipping tileset element '{tag}'"),
            }
        }
        Ok(())
    }
}

impl Tile {
    fn parse(tile_node: Node) -> Result<Tile, ParseError> {
        let id: u32 = tile_node
            .attributes()
            .find(|attr| attr.name() == "id")
            .ok_or(ParseError::MissingAttribute {
                tag_name: String::from("tile"),
                attribute: String::from("id"),
            })?
            .value()
            .parse()?;
        let mut image = None;
        for child in tile_node.children() {
            match child.tag_name().name() {
                "image" => image = Some(Image::parse(child)?),
                _ => {}
            }
        }
        let image = image.ok_or(ParseError::MissingImage { id })?;
        Ok(Tile { id, image })
    }
}

impl Image {
    fn parse(image_node: Node) -> Result<Image, ParseError> {
        let mut image = Image::default();
        for attribute in image_node.attributes() {
            let name = attribute.name();
            let value = attribute.value();
            match name {
                "format" => image.format = Some(String::from(value)),
                "source" => image.source = String::from(value),
                "trans" => image.trans = Some(String::from(value)),
                "width" => image.width = Some(value.parse()?),
                "height" => image.height = Some(value.parse()?),
                _ => {}
            }
        }
        Ok(image)
    }
}

impl Grid {
    pub(crate) fn parse(grid_node: Node) -> Result<Grid, ParseError> {
        let mut grid = Grid::default();
        for attribute in grid_node.attributes() {
            let name = attribute.name();
            let value = attribute.value();
            match name {
                "orientation" => grid.orientation = Orientation::from_str(value)?,
                "width" => grid.width = value.parse()?,
                "height" => grid.height = value.parse()?,
                _ => {}
            }
        }
        Ok(grid)
    }
}
