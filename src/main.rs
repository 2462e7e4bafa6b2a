use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use glyphfall::{
    engine::EngineBuilder,
    render::{Screen, TerminalScreen},
    scenario::{Scenario, ScenarioLoader},
    systems::{InputSystem, PhysicsSystem},
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Fixed-timestep glyph simulation")]
struct Cli {
    /// Path to a scenario YAML file (uses the built-in freefall demo when omitted)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Override the run duration in milliseconds
    #[arg(long)]
    max_run_ms: Option<f64>,

    /// Run until interrupted instead of for the scenario's duration
    #[arg(long, conflicts_with = "max_run_ms")]
    untimed: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so they never race the frame writes on stdout; quiet
    // unless RUST_LOG opts in.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut scenario = match &cli.scenario {
        Some(path) => ScenarioLoader::new(".").load(path)?,
        None => Scenario::freefall(),
    };
    if cli.untimed {
        scenario.max_run_ms = None;
    } else if let Some(ms) = cli.max_run_ms {
        scenario.max_run_ms = Some(ms);
    }

    let mut world = scenario.build_world()?;
    let mut engine = EngineBuilder::new(scenario.engine_settings())
        .with_system(InputSystem::terminal())
        .with_system(PhysicsSystem::new())
        .build();

    let mut screen = TerminalScreen::new();
    screen.init()?;
    let outcome = engine.run(&mut world, &mut screen);
    world.teardown();
    screen.shutdown()?;
    let summary = outcome?;

    println!(
        "Scenario '{}' completed after {} ticks ({} frames drawn).",
        scenario.name, summary.ticks, summary.frames
    );
    Ok(())
}
