use anyhow::{Context, Result};
use clap::Parser;
use genesis_core::config::{AppConfig, GenerationEndMode};
use genesis_core::init_logging;
use genesis_data::LiveEvent;
use genesis_lib::World;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Stop after this many generations have completed
    #[arg(short, long)]
    generations: Option<u32>,

    /// World seed, overriding the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// End each generation after this many seconds instead of at majority death
    #[arg(long)]
    fixed_time: Option<f64>,

    /// Run ticks back to back instead of pacing at the target FPS
    #[arg(long)]
    fast: bool,

    /// Write the best genome as hex to this file on exit
    #[arg(long)]
    export_best: Option<PathBuf>,

    /// Seed the first founder with a genome previously exported as hex
    #[arg(long)]
    import: Option<PathBuf>,

    /// Write the generation statistics history as JSON to this file on exit
    #[arg(long)]
    stats_out: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if args.config.exists() {
        let content = std::fs::read_to_string(&args.config)
            .with_context(|| format!("reading {}", args.config.display()))?;
        AppConfig::from_toml(&content)?
    } else {
        tracing::info!(path = %args.config.display(), "Config file not found, using defaults");
        AppConfig::default()
    };
    if let Some(seed) = args.seed {
        config.world.seed = Some(seed);
    }
    if let Some(seconds) = args.fixed_time {
        config.evolution.generation_end = GenerationEndMode::FixedTime { seconds };
    }
    config.validate()?;
    Ok(config)
}

fn write_outputs(world: &World, args: &Args) -> Result<()> {
    if let Some(path) = &args.export_best {
        if let Some(hex) = world.best_genotype_hex() {
            std::fs::write(path, hex).with_context(|| format!("writing {}", path.display()))?;
            tracing::info!(path = %path.display(), "Exported best genome");
        }
    }
    if let Some(path) = &args.stats_out {
        let json = world.history.to_json()?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        tracing::info!(
            path = %path.display(),
            generations = world.history.len(),
            "Exported statistics"
        );
    }
    Ok(())
}

async fn run(world: &mut World, limit: Option<u32>, fast: bool, frame: Duration) -> Result<()> {
    let mut completed = 0u32;
    loop {
        let events = world.update()?;
        completed += events
            .iter()
            .filter(|e| matches!(e, LiveEvent::GenerationEnd { .. }))
            .count() as u32;
        if limit.is_some_and(|limit| completed >= limit) {
            return Ok(());
        }
        if fast {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(frame).await;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let config = load_config(&args)?;
    let frame = Duration::from_secs_f64(1.0 / config.target_fps as f64);

    let mut world = World::new(config)?;
    if let Some(path) = &args.import {
        let hex = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        world.seed_genome(&hex)?;
    }

    tokio::select! {
        res = run(&mut world, args.generations, args.fast, frame) => res?,
        _ = tokio::signal::ctrl_c() => tracing::info!("Interrupted"),
    }

    tracing::info!(
        generation = world.generation,
        best_fitness = world.history.best_fitness(),
        restarts = world.history.restarts(),
        ticks_per_second = world.metrics.ticks_per_second(),
        "Run finished"
    );
    write_outputs(&world, &args)?;
    Ok(())
}
