use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;

use tileset_fixture::{
    generate::TilesetGenerator,
    persist::load_config,
    state::TilesetConfig,
};

/// Generate a labeled placeholder tileset PNG for editor tests.
#[derive(Parser, Debug)]
struct Args {
    /// JSON file with generator settings; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Edge length of a single tile, in pixels
    #[arg(long)]
    tile_size: Option<u32>,

    /// Number of tiles per side
    #[arg(long)]
    grid_size: Option<u32>,

    /// Destination PNG file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Leave tiles unlabeled
    #[arg(long)]
    no_labels: bool,

    /// Also write a JSON tileset descriptor next to the image
    #[arg(long)]
    descriptor: bool,
}

fn build_config(args: &Args) -> Result<TilesetConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => TilesetConfig::default(),
    };
    if let Some(tile_size) = args.tile_size {
        config.tile_size = tile_size;
    }
    if let Some(grid_size) = args.grid_size {
        config.grid_size = grid_size;
    }
    if let Some(output) = &args.output {
        config.output_path = output.clone();
    }
    if args.no_labels {
        config.labels = false;
    }
    if args.descriptor {
        config.write_descriptor = true;
    }
    config.validate()?;
    Ok(config)
}

pub fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = build_config(&args)?;
    let tileset = TilesetGenerator::generate(&config)?;
    if let Some(path) = &tileset.descriptor_path {
        info!("Wrote descriptor {}", path.display());
    }
    println!(
        "Created {} ({}x{}, {}x{} tiles)",
        tileset.path.display(),
        tileset.width,
        tileset.height,
        tileset.tile_size,
        tileset.tile_size
    );
    Ok(())
}
