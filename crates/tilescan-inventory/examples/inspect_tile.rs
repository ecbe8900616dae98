//! Example: Show where a tile key lives on disk and whether it is there.
//!
//! Usage: cargo run --example inspect_tile -- <x-y> [tiles_dir]

use std::env;
use std::path::Path;
use tilescan_inventory::{stat_tile_file, TileCoord, TileFileStatus, DEFAULT_TILES_DIR};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <x-y> [tiles_dir]", args[0]);
        eprintln!("Example: {} 600-1402 ./tiles", args[0]);
        std::process::exit(1);
    }

    let coord = match TileCoord::parse_key(&args[1]) {
        Ok(coord) => coord,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    let tiles_dir = args.get(2).map(|s| s.as_str()).unwrap_or(DEFAULT_TILES_DIR);

    let (shard_x, shard_y) = coord.shard();
    let path = coord.shard_path(Path::new(tiles_dir));
    println!("Tile {} -> shard ({}, {})", coord, shard_x, shard_y);
    println!("Path: {}", path.display());

    match stat_tile_file(&path) {
        TileFileStatus::Found(size) => println!("Present: {} bytes", size),
        TileFileStatus::Missing => println!("Missing"),
        TileFileStatus::Unreadable(e) => println!("Unreadable: {}", e),
    }
}
