use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use warren_core::{MapGenerator, RoomTag};
use warren_tools::config::WarrenConfig;
use warren_tools::render::render_map;

#[derive(Parser)]
#[command(author, version, about = "Generate a dungeon and print its map", long_about = None)]
struct Args {
    /// TOML or JSON file with `[dungeon]` and `[session]` tables
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    /// Print the room graph as JSON instead of the ASCII map
    #[arg(long)]
    json: bool,
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    warren_tools::init_logging(args.verbose);

    let config = WarrenConfig::load_or_default(args.config.as_deref())?;
    info!(seed = args.seed, "generating dungeon");
    let dungeon = MapGenerator::new(config.dungeon, args.seed)
        .generate()
        .with_context(|| format!("Dungeon generation failed for seed {}", args.seed))?;
    let graph = &dungeon.graph;

    if args.json {
        let rooms: Vec<_> = graph
            .rooms()
            .map(|room| {
                let doors: Vec<_> = room.doors().iter().collect();
                serde_json::json!({ "pos": room.pos(), "tag": room.tag(), "doors": doors })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rooms)?);
        return Ok(());
    }

    print!("{}", render_map(graph, &[]));
    println!();
    println!("Seed: {}", args.seed);
    println!("Rooms: {}", graph.len());
    for (index, branch) in dungeon.branches.iter().enumerate() {
        println!("Branch {index}: {}/{} rooms", branch.built, branch.requested);
    }
    println!("Exits: {}", graph.count_tagged(RoomTag::Exit));
    println!("Collectibles: {}", dungeon.collectibles.len());
    println!("Fingerprint: {:016x}", graph.fingerprint());

    Ok(())
}
