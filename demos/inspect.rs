use otbm_codec::{EmptyCatalogue, MapReader, Node, NodeKind, Position, TracingDiagnostics};
use std::collections::BTreeMap;
use std::env;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <otbm-file> [--json]", args[0]);
        std::process::exit(1);
    }

    let mut diagnostics = TracingDiagnostics;
    let document = MapReader::new(&EmptyCatalogue)
        .with_diagnostics(&mut diagnostics)
        .read_path(&args[1])?;

    if args.get(2).is_some_and(|arg| arg == "--json") {
        return print_json(&document);
    }

    println!("=== OTBM File Info ===");
    println!("Identifier: {:?}", document.identifier);
    if let Some(header) = document.header() {
        println!("Version: {}", header.version);
        println!("Size: {}x{}", header.width, header.height);
        println!(
            "Items: {}.{}",
            header.items_major_version, header.items_minor_version
        );
    }

    let mut counts = BTreeMap::new();
    count_kinds(&document.root, &mut counts);

    println!("\n=== Nodes ===");
    for (kind, count) in &counts {
        println!("{kind:?}: {count}");
    }

    println!("\n=== Towns ===");
    print_towns(&document.root);

    if let Some(first) = first_tile(&document.root, Position::default()) {
        println!("\nFirst tile at {}/{}/{}", first.x, first.y, first.z);
    }

    Ok(())
}

fn count_kinds(node: &Node, counts: &mut BTreeMap<NodeKind, usize>) {
    *counts.entry(node.kind()).or_insert(0) += 1;
    for child in node.children() {
        count_kinds(child, counts);
    }
}

fn print_towns(node: &Node) {
    if let Node::Town(town) = node {
        let p = town.position;
        println!("{}. {} (temple {}/{}/{})", town.town_id, town.name, p.x, p.y, p.z);
    }
    for child in node.children() {
        print_towns(child);
    }
}

fn first_tile(node: &Node, area: Position) -> Option<Position> {
    match node {
        Node::TileArea(tile_area) => tile_area
            .tiles
            .iter()
            .find_map(|tile| first_tile(tile, tile_area.position)),
        Node::Tile(tile) => Some(tile.position(area)),
        Node::HouseTile(tile) => Some(tile.position(area)),
        _ => node
            .children()
            .iter()
            .find_map(|child| first_tile(child, area)),
    }
}

#[cfg(feature = "serde")]
fn print_json(document: &otbm_codec::Document) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(document)?);
    Ok(())
}

#[cfg(not(feature = "serde"))]
fn print_json(_document: &otbm_codec::Document) -> Result<(), Box<dyn std::error::Error>> {
    Err("JSON output requires the `serde` feature".into())
}
