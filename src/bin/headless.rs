use gravity_sandbox::{diagnostics, utils, Playfield, Scenario, SimConfig, Simulation};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, LevelFilter};
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;

use std::path::PathBuf;

/// Runs the simulation without a window and logs a summary once per second
/// of simulated time.
#[derive(Parser, Debug)]
struct Args {
    /// Scenario JSON file to load.
    #[arg(short, long, conflicts_with = "random")]
    scenario: Option<PathBuf>,

    /// Scatter this many random bodies over the default playfield instead.
    #[arg(short, long, default_value_t = 20)]
    random: usize,

    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Number of frames to run.
    #[arg(short, long, default_value_t = 700)]
    frames: u64,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

fn init_logging(level: LevelFilter) -> Result<()> {
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new("{d(%H:%M:%S%.3f)} {h({l})} {t} - {m}{n}")))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(level))?;
    log4rs::init_config(config)?;
    Ok(())
}

fn load(args: &Args) -> Result<Simulation> {
    let sim = match &args.scenario {
        Some(path) => Scenario::from_path(path)
            .and_then(|scenario| scenario.build())
            .with_context(|| format!("loading scenario {}", path.display()))?,
        None => {
            let config = SimConfig::default();
            let field = config.playfield.unwrap_or_else(Playfield::default);
            let specs = utils::random_field(args.random, &field, args.seed);
            Simulation::with_bodies(config, &specs)?
        }
    };
    Ok(sim)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_level)?;

    let mut sim = load(&args)?;
    info!(
        "starting with {} bodies, G={}, collisions={:?}, decay={}",
        sim.bodies.len(),
        sim.gravity(),
        sim.config.collisions,
        sim.config.decay
    );

    let fps = sim.config.fps as u64;
    let mut removed = 0;
    for _ in 0..args.frames {
        removed += sim.step().removed();

        if sim.frame % fps == 0 {
            let p = diagnostics::total_momentum(&sim.bodies);
            info!(
                "t={:>4}s bodies={} removed={} mass={:.1} momentum=({:.1}, {:.1}) kinetic={:.1}",
                sim.frame / fps,
                sim.bodies.len(),
                removed,
                diagnostics::total_mass(&sim.bodies),
                p.x,
                p.y,
                diagnostics::kinetic_energy(&sim.bodies)
            );
        }
    }

    Ok(())
}
