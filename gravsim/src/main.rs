use gravsim::{BallScene, DemoKind, GravityScene, ScenarioConfig};
use gravsim::{Clock, FixedClock, ManualClock, ScriptedInput, TextRenderer};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Gravity and bouncy ball demos")]
struct Args {
    /// Scenario file, looked up under `scenarios/`
    #[arg(short, long = "file", default_value = "gravity.yaml")]
    file_name: String,

    /// Number of ticks to run headless
    #[arg(short, long, default_value_t = 300)]
    ticks: u64,

    /// Spawn one planet every N ticks (0 = never)
    #[arg(short, long, default_value_t = 0)]
    spawn_every: u64,

    /// Pace ticks in real time instead of running as fast as possible
    #[arg(long)]
    realtime: bool,

    /// Open the bevy window (needs the `viewer` feature)
    #[arg(long)]
    viewer: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path).with_context(|| format!("opening {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg = ScenarioConfig::from_reader(reader)?;
    Ok(scenario_cfg)
}

fn scripted_spawns(ticks: u64, every: u64) -> ScriptedInput {
    let mut input = ScriptedInput::new();
    if every > 0 {
        for tick in (0..ticks).step_by(every as usize) {
            input = input.spawn_at(tick, 1);
        }
    }
    input
}

fn run_headless<C: Clock>(args: &Args, cfg: &ScenarioConfig, clock: &mut C) -> Result<()> {
    let stdout = io::stdout();
    match cfg.demo {
        DemoKind::Gravity => {
            let mut scene = GravityScene::build(cfg)?;
            let mut renderer = TextRenderer::new(BufWriter::new(stdout.lock()), scene.viewport.clone());
            let mut input = scripted_spawns(args.ticks, args.spawn_every);
            scene.render(&mut renderer)?;
            scene.run(&mut input, clock, &mut renderer, args.ticks)?;
        }
        DemoKind::BouncyBall => {
            let mut scene = BallScene::build(cfg)?;
            let mut renderer = TextRenderer::new(BufWriter::new(stdout.lock()), scene.viewport.clone());
            scene.render(&mut renderer)?;
            scene.run(clock, &mut renderer, args.ticks)?;
            tracing::info!(bounces = scene.bounces(), "bouncy ball finished");
        }
    }
    Ok(())
}

#[cfg(feature = "viewer")]
fn run_viewer(cfg: &ScenarioConfig) -> Result<()> {
    match cfg.demo {
        DemoKind::Gravity => gravsim::run_gravity_2d(GravityScene::build(cfg)?),
        DemoKind::BouncyBall => gravsim::run_ball_2d(BallScene::build(cfg)?),
    }
    Ok(())
}

#[cfg(not(feature = "viewer"))]
fn run_viewer(_cfg: &ScenarioConfig) -> Result<()> {
    anyhow::bail!("built without the `viewer` feature, rebuild with `--features viewer`")
}

fn main() -> Result<()> {
    let args = Args::parse();
    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;

    if args.viewer {
        // bevy installs its own subscriber through LogPlugin
        return run_viewer(&scenario_cfg);
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let dt = scenario_cfg.parameters.delta_time;
    if args.realtime {
        run_headless(&args, &scenario_cfg, &mut FixedClock::new(dt))
    } else {
        run_headless(&args, &scenario_cfg, &mut ManualClock::new(dt))
    }
}

