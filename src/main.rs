use idealgas::core::stats;
use idealgas::{SimulationConfig, SpeedHistogram, TickSummary};

use anyhow::{Context, Result};
use clap::Parser;

use std::path::PathBuf;

/// Headless ideal gas run: load a JSON configuration, advance it and report statistics.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Path to the JSON configuration.
    #[arg(short, long, default_value = "config.json")]
    config: PathBuf,

    /// Number of ticks to simulate.
    #[arg(short, long, default_value_t = 1000)]
    ticks: usize,

    /// Seed for population sampling; random when omitted.
    #[arg(short, long)]
    seed: Option<u64>,

    /// Log a progress line every N ticks (0 disables).
    #[arg(long, default_value_t = 100)]
    report_every: usize,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let cfg = SimulationConfig::from_path(&args.config)
        .with_context(|| format!("failed to load {}", args.config.display()))?;
    let mut gas = cfg.build_container(args.seed)?;
    log::info!(
        "arena {}x{}, {} particles in {} species, K={}",
        gas.width(),
        gas.height(),
        gas.len(),
        gas.species().len(),
        gas.neighbor_window()
    );

    let e0 = gas.kinetic_energy();
    let mut total = TickSummary::default();
    for tick in 1..=args.ticks {
        total += gas.increment();
        if args.report_every > 0 && tick % args.report_every == 0 {
            log::info!(
                "tick {tick}: E={:.6} T={:.6} particle collisions={} wall reflections={}",
                gas.kinetic_energy(),
                stats::temperature(gas.particles()).unwrap_or(0.0),
                total.particle_collisions,
                total.wall_reflections
            );
        }
    }
    if total.degenerate_pairs > 0 {
        log::warn!("{} coincident pairs were skipped", total.degenerate_pairs);
    }
    log::info!(
        "energy drift over {} ticks: {:.3e}",
        args.ticks,
        gas.kinetic_energy() - e0
    );

    for (name, speeds) in stats::speeds_by_species(gas.species(), gas.particles()) {
        if speeds.is_empty() {
            continue;
        }
        let hist = SpeedHistogram::from_values(&speeds, cfg.histogram.bin_count, None)?;
        println!("{name} ({} particles)", speeds.len());
        for ((lo, hi), bar) in hist
            .edges
            .iter()
            .zip(hist.edges.iter().skip(1))
            .zip(hist.normalized())
        {
            let width = (bar * 40.0).round() as usize;
            println!("  {lo:>9.3} .. {hi:<9.3} {}", "#".repeat(width));
        }
    }
    Ok(())
}
