//! Flappy Core headless host
//!
//! Drives the simulation with a fixed-timestep loop and an optional autopilot,
//! logging game events. Rendering hosts follow the same loop shape.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use flappy_core::consts::*;
use flappy_core::platform::{EdgeDetector, HostInput};
use flappy_core::sim::{GameEvent, RenderState, SimConfig, Simulation};
use flappy_core::Settings;

#[derive(Debug, Parser)]
#[command(name = "flappy-core", about = "Run a headless flappy session")]
struct Cli {
    /// JSON settings file (missing fields use defaults)
    #[arg(long)]
    settings: Option<PathBuf>,
    /// RNG seed, overrides the settings file
    #[arg(long)]
    seed: Option<u64>,
    /// Number of host frames to run
    #[arg(long, default_value_t = 3600)]
    frames: u32,
    /// Never flap; the player just falls
    #[arg(long)]
    no_autopilot: bool,
    /// Write the effective settings to this path before running
    #[arg(long)]
    save_settings: Option<PathBuf>,
}

/// Flaps whenever the player sinks below the next gap's center
fn autopilot(render: &RenderState, config: &SimConfig) -> bool {
    if render.is_game_over {
        return true;
    }
    let player = render.player_position;
    let player_half_width = config.player_size.x / 2.0;
    let target_y = render
        .obstacles
        .iter()
        .filter_map(|o| {
            let top = o.top?;
            (top.right() >= player.x - player_half_width).then(|| top.bottom())
        })
        .next()
        .map(|gap_top| gap_top + GAP_SIZE / 2.0)
        .unwrap_or(config.screen_height / 2.0);
    player.y > target_y + GAP_SIZE / 6.0
}

/// Session counters for the summary line
#[derive(Debug, Default)]
struct Stats {
    flaps: u32,
    spawned: u32,
    passed: u32,
    runs_ended: u32,
}

/// Host instance holding all state
struct Host {
    sim: Simulation,
    edges: EdgeDetector,
    accumulator: f32,
    max_frame_dt: f32,
    autopilot: bool,
    flap_held: bool,
    stats: Stats,
}

impl Host {
    fn new(settings: &Settings, seed: u64, autopilot: bool) -> Self {
        Self {
            sim: Simulation::new(settings.sim, seed),
            edges: EdgeDetector::new(),
            accumulator: 0.0,
            max_frame_dt: settings.max_frame_dt,
            autopilot,
            flap_held: false,
            stats: Stats::default(),
        }
    }

    /// Run simulation steps for one host frame. Returns true to quit.
    fn update(&mut self, frame_dt: f32) -> bool {
        self.accumulator += frame_dt.min(self.max_frame_dt);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let render = self.sim.render_state();
            let want_flap = self.autopilot && autopilot(&render, self.sim.config());
            // Release for a frame after each press so edges keep firing
            self.flap_held = want_flap && !self.flap_held;

            let input = self.edges.update(HostInput {
                flap_held: self.flap_held,
                exit_held: false,
            });
            let out = self.sim.step(&input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;

            for event in &out.events {
                match event {
                    GameEvent::Flapped => self.stats.flaps += 1,
                    GameEvent::ObstacleSpawned { .. } => self.stats.spawned += 1,
                    GameEvent::ObstacleDespawned => self.stats.passed += 1,
                    GameEvent::GameOver { cause } => {
                        self.stats.runs_ended += 1;
                        log::info!(
                            "Run {} ended ({:?}) at y={:.1}",
                            self.stats.runs_ended,
                            cause,
                            self.sim.player.pos.y
                        );
                    }
                    GameEvent::Reset => log::info!("Restarting"),
                }
            }
            if out.exit_requested {
                return true;
            }
        }
        false
    }
}

fn session_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("Flappy Core (headless) starting...");

    let mut settings = match &cli.settings {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    if let Some(path) = &cli.save_settings {
        if let Err(e) = settings.save_to(path) {
            log::error!("Could not save settings: {}", e);
        }
    }

    let seed = settings.seed.unwrap_or_else(session_seed);
    log::info!("Simulation initialized with seed: {}", seed);

    let mut host = Host::new(&settings, seed, !cli.no_autopilot);
    let mut frames = 0;
    while frames < cli.frames {
        frames += 1;
        if host.update(SIM_DT) {
            log::info!("Exit requested");
            break;
        }
    }

    let render = host.sim.render_state();
    println!(
        "frames={} flaps={} pipes_spawned={} pipes_passed={} runs_ended={} game_over={} player_y={:.1}",
        frames,
        host.stats.flaps,
        host.stats.spawned,
        host.stats.passed,
        host.stats.runs_ended,
        render.is_game_over,
        render.player_position.y
    );
}
