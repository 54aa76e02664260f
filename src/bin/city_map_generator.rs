//! Generates a city builder map and writes a preview of it.

use std::{fs, path::PathBuf, process::ExitCode};

use clap::{Parser, ValueEnum};
use log::{error, info};

use city_map_generator::{GameMap, MapParameters, MapType, Result, generate_map};

/// Procedural island map generator for tile-based city builders.
#[derive(Parser)]
#[command(name = "city_map_generator")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON file with map parameters. Flags given on the command line take precedence.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Kind of map to generate.
    #[arg(short, long)]
    map_type: Option<MapKind>,

    /// More rain erodes more and grows more rivers and forests.
    #[arg(long)]
    rainfall: Option<i32>,

    /// More resources seed more ore veins.
    #[arg(long)]
    resources: Option<i32>,

    /// Map size: 0 is 32×32 tiles, 1 is 128×128, 2 and above is 256×256.
    #[arg(long)]
    size: Option<u32>,

    /// Random seed for reproducible generation.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Where to write the PNG preview.
    #[arg(short, long, default_value = "map.png")]
    output: PathBuf,

    /// Also dump the generated map as JSON.
    #[arg(long)]
    json: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum MapKind {
    Island,
    Continents,
    Highlands,
    Deserts,
}

impl From<MapKind> for MapType {
    fn from(kind: MapKind) -> Self {
        match kind {
            MapKind::Island => MapType::Island,
            MapKind::Continents => MapType::Continents,
            MapKind::Highlands => MapType::Highlands,
            MapKind::Deserts => MapType::Deserts,
        }
    }
}

impl Cli {
    fn map_parameters(&self) -> Result<MapParameters> {
        let mut map_parameters = match &self.config {
            Some(path) => MapParameters::from_json(&fs::read_to_string(path)?)?,
            None => MapParameters::default(),
        };
        if let Some(map_type) = self.map_type {
            map_parameters.map_type = map_type.into();
        }
        if let Some(rainfall) = self.rainfall {
            map_parameters.rainfall = rainfall;
        }
        if let Some(resources) = self.resources {
            map_parameters.resources = resources;
        }
        if let Some(size) = self.size {
            map_parameters.size = size;
        }
        if let Some(seed) = self.seed {
            map_parameters.seed = seed;
        }
        Ok(map_parameters)
    }
}

fn write_outputs(cli: &Cli, game_map: &GameMap) -> Result<()> {
    game_map.tile_grid.to_preview_image().save(&cli.output)?;
    info!("preview written to {}", cli.output.display());

    if let Some(path) = &cli.json {
        let json = serde_json::to_string(game_map)?;
        fs::write(path, json)?;
        info!("map written to {}", path.display());
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let map_parameters = cli.map_parameters()?;
    info!(
        "generating {} map, seed {}",
        map_parameters.map_type.name(),
        map_parameters.seed
    );
    let game_map = generate_map(&map_parameters)?;
    write_outputs(cli, &game_map)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            error!("{error}");
            ExitCode::FAILURE
        }
    }
}
