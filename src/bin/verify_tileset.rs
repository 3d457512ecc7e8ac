use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use tileset_fixture::{persist::load_config, state::TilesetConfig, verify::verify};

/// Check that a tileset PNG has the expected grid, borders and tile colors.
#[derive(Parser, Debug)]
struct Args {
    /// PNG file to check
    path: PathBuf,

    /// JSON file with the settings the tileset was generated with
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    tile_size: Option<u32>,

    #[arg(long)]
    grid_size: Option<u32>,
}

pub fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
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

    let report = verify(&args.path, &config)?;
    for mismatch in &report.mismatches {
        println!("{}", mismatch);
    }
    if !report.is_ok() {
        bail!(
            "{} problem(s) found in {}",
            report.mismatches.len(),
            args.path.display()
        );
    }
    println!(
        "{} OK ({}x{}, {} tiles)",
        args.path.display(),
        report.width,
        report.height,
        report.tiles_checked
    );
    Ok(())
}
