use otbm_codec::{
    Attributes, Document, Item, MapData, MapHeader, Node, Position, Tile, TileArea, Town, Towns,
};

/// Map with `areas` full 16x16 tile areas, each tile carrying a ground item
/// and a stack of a few decorations
pub fn synthetic_map(areas: u16) -> Document {
    let mut features: Vec<Node> = (0..areas)
        .map(|i| {
            let tiles = (0..=255u8)
                .map(|offset| {
                    let items = (0..u16::from(offset % 4) + 1)
                        .map(|n| {
                            Item {
                                id: 100 + n,
                                attributes: Attributes {
                                    aid: (n == 2).then_some(0xFEFD),
                                    ..Attributes::default()
                                },
                                content: vec![],
                            }
                            .into()
                        })
                        .collect();

                    Tile {
                        x: offset & 0x0F,
                        y: offset >> 4,
                        items,
                        ..Tile::default()
                    }
                    .into()
                })
                .collect();

            TileArea {
                position: Position::new(1000 + (i % 64) * 16, 1000 + (i / 64) * 16, 7),
                tiles,
            }
            .into()
        })
        .collect();

    features.push(
        Towns {
            towns: vec![
                Town {
                    town_id: 1,
                    name: "Thais".to_string(),
                    position: Position::new(100, 200, 7),
                }
                .into(),
            ],
        }
        .into(),
    );

    Document::new(MapHeader {
        version: 2,
        width: 2048,
        height: 2048,
        items_major_version: 3,
        items_minor_version: 57,
        nodes: vec![
            MapData {
                features,
                ..MapData::default()
            }
            .into(),
        ],
    })
}
