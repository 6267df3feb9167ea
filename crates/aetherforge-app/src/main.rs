use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use aetherforge_advisor::{Advisor, OfflineService, ScriptedService};
use aetherforge_app::demo::{self, Autopilot, SessionSummary};
use aetherforge_app::game_loop::TICK_DURATION;
use aetherforge_app::host::{self, AppState};
use aetherforge_app::logging;
use aetherforge_core::config::GameConfig;
use aetherforge_core::enums::{Difficulty, MapId};
use aetherforge_core::state::GameState;
use aetherforge_sim::engine::{SimConfig, SimulationEngine};

/// Run a scripted Aetherforge session.
#[derive(Debug, Parser)]
#[command(name = "aetherforge", version)]
struct Args {
    /// RNG seed. Same seed, same session.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    #[arg(long, value_enum, default_value_t = MapArg::Etherfields)]
    map: MapArg,

    #[arg(long, value_enum, default_value_t = DifficultyArg::Engineer)]
    difficulty: DifficultyArg,

    /// Frames to simulate (60 per second).
    #[arg(long, default_value_t = 18_000)]
    frames: u64,

    /// Towers the autopilot builds before it starts upgrading.
    #[arg(long, default_value_t = 6)]
    towers: usize,

    /// JSON file overriding the built-in archetype and map tables.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the final game state here as JSON.
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Pace the session at 60 Hz on the game loop thread.
    #[arg(long)]
    realtime: bool,

    /// Answer advice requests with the local rule-based advisor.
    #[arg(long)]
    advisor: bool,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = logging::DEFAULT_FILTER)]
    log: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MapArg {
    Etherfields,
    IceSpire,
    BurningMaw,
    Xeros,
}

impl From<MapArg> for MapId {
    fn from(arg: MapArg) -> Self {
        match arg {
            MapArg::Etherfields => MapId::Etherfields,
            MapArg::IceSpire => MapId::IceSpire,
            MapArg::BurningMaw => MapId::BurningMaw,
            MapArg::Xeros => MapId::Xeros,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DifficultyArg {
    Apprentice,
    Engineer,
    Master,
    VoidTouched,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Apprentice => Difficulty::Apprentice,
            DifficultyArg::Engineer => Difficulty::Engineer,
            DifficultyArg::Master => Difficulty::Master,
            DifficultyArg::VoidTouched => Difficulty::VoidTouched,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(&args.log);

    let game = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            GameConfig::from_json(&json).with_context(|| format!("loading {}", path.display()))?
        }
        None => GameConfig::default(),
    };
    let config = SimConfig {
        seed: args.seed,
        game: game.clone(),
    };
    let advisor = if args.advisor {
        Advisor::spawn(ScriptedService)
    } else {
        Advisor::spawn(OfflineService)
    }
    .context("spawning advisor")?;
    let mut pilot = Autopilot::new(args.map.into(), args.difficulty.into(), game, args.towers);

    tracing::info!(seed = args.seed, map = ?args.map, difficulty = ?args.difficulty, "session starting");
    let started = Instant::now();
    let (summary, final_state) = if args.realtime {
        run_realtime(config, advisor, &mut pilot, args.frames)?
    } else {
        let mut engine = SimulationEngine::with_advisor(config, advisor);
        let summary = demo::run_headless(&mut engine, &mut pilot, args.frames);
        (summary, engine.state().clone())
    };
    tracing::info!(elapsed = ?started.elapsed(), "session finished");

    println!("{}", serde_json::to_string_pretty(&summary)?);
    if let Some(path) = &args.snapshot {
        let json = serde_json::to_string(&final_state)?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}

/// Drive the game loop thread through the host control surface.
fn run_realtime(
    config: SimConfig,
    advisor: Advisor,
    pilot: &mut Autopilot,
    frames: u64,
) -> Result<(SessionSummary, GameState)> {
    let app = AppState::new();
    host::start_simulation(&app, config, Some(advisor))?;

    let mut summary = SessionSummary::default();
    let mut last_seen = None;
    let mut acted_at: Option<u64> = None;
    let mut latest = GameState::default();

    while summary.frames < frames {
        std::thread::sleep(TICK_DURATION);
        let Some(state) = host::get_snapshot(&app)? else {
            // Nothing published yet; the first decision starts the run.
            if acted_at.is_none() {
                for command in pilot.decide(&latest) {
                    host::send_command(&app, command)?;
                }
                acted_at = Some(0);
            }
            continue;
        };
        let frame = state.time.frame;
        if last_seen == Some(frame) {
            continue;
        }
        last_seen = Some(frame);
        summary.observe(&state);

        // Commands sent at frame F are applied by F + 2 at the latest. A run
        // start resets the clock.
        let applied = acted_at.map_or(true, |at| frame >= at + 2 || frame < at);
        if applied {
            for command in pilot.decide(&state) {
                host::send_command(&app, command)?;
            }
            acted_at = Some(frame);
        }

        let over = state.is_game_over;
        latest = state;
        if over {
            break;
        }
    }

    host::stop_simulation(&app)?;
    Ok((summary, latest))
}
