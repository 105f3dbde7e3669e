use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use clap::Parser;
use segment_core::{BlockPos, GenerationConfig, SegmentGenerator, TemplatePack, derive_dungeon_seed};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 1000)]
    runs: u32,
    /// Generation config TOML; its seed is replaced per run
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
    let args = Args::parse();

    let base_config = match &args.config {
        Some(path) => GenerationConfig::load(path)
            .with_context(|| format!("Failed to load generation config: {}", path.display()))?,
        None => GenerationConfig::default(),
    };
    let pack = TemplatePack::builtin();

    println!("Starting fuzz harness on seed {} for {} runs...", args.seed, args.runs);
    let mut hub_only = 0;
    let mut placed = 0;
    for run in 0..args.runs {
        let seed = derive_dungeon_seed(args.seed, run);
        let config = GenerationConfig { seed, ..base_config.clone() };
        let root = BlockPos::new((run % 4_096) as i32 * 1_000, 64, 0);

        let blueprint = SegmentGenerator::new(config.clone())
            .generate(&pack, root)
            .with_context(|| format!("run {run} (seed {}) failed", config.seed))?;
        blueprint
            .check_layout(config.max_distance)
            .with_context(|| format!("Invariant failed on run {run} (seed {})", config.seed))?;

        let replayed = SegmentGenerator::new(config.clone()).generate(&pack, root)?;
        ensure!(
            replayed.canonical_bytes() == blueprint.canonical_bytes(),
            "Invariant failed: seed {} is not deterministic",
            config.seed
        );

        hub_only += usize::from(blueprint.is_hub_only());
        placed += blueprint.placements().len();
    }

    println!("Fuzzing completed successfully.");
    println!(
        "Average segments per dungeon: {:.1}, hub-only dungeons: {hub_only}",
        placed as f64 / f64::from(args.runs.max(1))
    );
    Ok(())
}
