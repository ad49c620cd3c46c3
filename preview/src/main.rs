use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use perlin_engine::{ColorMap, EngineConfig, Levels, NoiseEngine, PerlinEngine};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

mod preview;

use preview::PngSurface;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Palette {
    Grayscale,
    Terrain,
}

#[derive(Debug, Parser)]
#[command(name = "perlin_preview")]
#[command(about = "Render a seeded Perlin noise field to a PNG file")]
struct Cli {
    #[arg(long, default_value_t = 256)]
    width: u32,
    #[arg(long, default_value_t = 256)]
    height: u32,
    /// RON or JSON config file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    octaves: Option<u32>,
    #[arg(long)]
    persistence: Option<f64>,
    #[arg(long)]
    lacunarity: Option<f64>,
    #[arg(long)]
    scale: Option<f64>,
    /// Lattice cells across the longer side; overrides the scale.
    #[arg(long)]
    cells: Option<f64>,
    /// Stretch the field to its own min/max before coloring.
    #[arg(long)]
    stretch: bool,
    #[arg(long, value_enum)]
    palette: Option<Palette>,
    #[arg(long, short, default_value = "noise.png")]
    output: PathBuf,
}

impl Cli {
    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => EngineConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(octaves) = self.octaves {
            config.octaves = octaves;
        }
        if let Some(persistence) = self.persistence {
            config.persistence = persistence;
        }
        if let Some(lacunarity) = self.lacunarity {
            config.lacunarity = lacunarity;
        }
        if let Some(scale) = self.scale {
            config.scale = scale;
        }
        if let Some(cells) = self.cells {
            config.cells = Some(cells);
        }
        if self.stretch {
            config.levels = Levels::Stretch;
        }
        match self.palette {
            Some(Palette::Grayscale) => config.color_map = ColorMap::Grayscale,
            Some(Palette::Terrain) => config.color_map = ColorMap::terrain(),
            None => {}
        }
        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<EngineConfig> {
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => EngineConfig::from_json_str(&text),
        _ => EngineConfig::from_ron_str(&text),
    };
    config.with_context(|| format!("parsing {}", path.display()))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.engine_config()?;
    debug!(?config, "resolved config");

    let engine = PerlinEngine::new(config.seed);
    let mut surface = PngSurface::new(&cli.output);
    engine.draw(&mut surface, cli.width, cli.height, Some(&config)).with_context(|| {
        format!("rendering {}x{} to {}", cli.width, cli.height, surface.path().display())
    })?;
    info!(seed = config.seed, octaves = config.octaves, "done");
    Ok(())
}
