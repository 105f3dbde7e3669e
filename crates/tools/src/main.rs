//! Generates one dungeon blueprint and prints a summary of the layout.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use segment_core::{
    BlockPos, BlueprintFile, GenerationConfig, LoadedPack, SegmentGenerator, TemplatePack,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Template pack JSON file; the builtin pack is used when omitted
    #[arg(short, long)]
    templates: Option<PathBuf>,
    /// Generation config TOML file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Overrides the seed from the config file
    #[arg(short, long)]
    seed: Option<u64>,
    /// Root origin of the hub as `x,y,z`
    #[arg(long, default_value = "0,0,0", value_parser = parse_origin)]
    origin: BlockPos,
    /// Write the blueprint JSON here
    #[arg(short, long)]
    out: Option<PathBuf>,
}

fn parse_origin(value: &str) -> Result<BlockPos, String> {
    let parts: Vec<_> = value.split(',').map(str::trim).collect();
    let [x, y, z] = parts[..] else {
        return Err(format!("expected x,y,z but got `{value}`"));
    };
    let coordinate = |part: &str| {
        part.parse::<i32>().map_err(|error| format!("invalid coordinate `{part}`: {error}"))
    };
    Ok(BlockPos::new(coordinate(x)?, coordinate(y)?, coordinate(z)?))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let LoadedPack { pack, failures } = match &args.templates {
        Some(path) => TemplatePack::load(path)
            .with_context(|| format!("Failed to load template pack: {}", path.display()))?,
        None => LoadedPack { pack: TemplatePack::builtin(), failures: Vec::new() },
    };
    if !failures.is_empty() {
        println!("Skipped {} invalid template(s):", failures.len());
        for failure in &failures {
            println!("  #{} {}: {}", failure.index, failure.name, failure.error);
        }
    }

    let mut config = match &args.config {
        Some(path) => GenerationConfig::load(path)
            .with_context(|| format!("Failed to load generation config: {}", path.display()))?,
        None => GenerationConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    let blueprint = SegmentGenerator::new(config)
        .generate(&pack, args.origin)
        .context("Dungeon generation failed")?;

    println!("Generation complete.");
    println!("Seed: {}", blueprint.seed());
    println!("Segments: {} of {} templates", blueprint.placements().len(), pack.len());
    println!("Termination: {:?}", blueprint.termination());
    println!("Open entry points: {}", blueprint.open_entry_points().len());
    println!("Coin budget: {}", blueprint.total_coin_budget());
    for (color, locations) in blueprint.vault_locations() {
        println!("Vault {color}: {locations:?}");
    }
    for (color, locations) in blueprint.key_locations() {
        println!("Key {color}: {locations:?}");
    }
    if blueprint.is_hub_only() {
        println!("Only the hub was placed; try another seed.");
    }

    if let Some(path) = &args.out {
        BlueprintFile::from_blueprint(&blueprint)
            .write_atomic(path)
            .with_context(|| format!("Failed to write blueprint: {}", path.display()))?;
        info!(path = %path.display(), "wrote blueprint");
    }

    Ok(())
}
