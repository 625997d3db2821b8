//! Game state and core simulation types
//!
//! Everything needed to snapshot or restore a run lives in [`Simulation`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::obstacle::ObstaclePair;
use super::rect::Rect;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended, waiting for a flap to restart
    GameOver,
}

/// What ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    /// Fell past the bottom of the screen
    Floor,
    /// Hit a pipe
    Obstacle,
}

/// Notable things that happened during a step, in order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Flapped,
    ObstacleSpawned { gap_y: f32 },
    ObstacleDespawned,
    GameOver { cause: GameOverCause },
    Reset,
}

/// Construction constants supplied by the host, fixed for a simulation's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub screen_width: f32,
    pub screen_height: f32,
    /// Player hitbox, taken from the player sprite's dimensions
    pub player_size: Vec2,
    /// Pipe sprite width before `PIPE_SCALE` is applied
    pub pipe_texture_width: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            screen_width: DEFAULT_SCREEN_WIDTH,
            screen_height: DEFAULT_SCREEN_HEIGHT,
            player_size: Vec2::splat(DEFAULT_PLAYER_SIZE),
            pipe_texture_width: DEFAULT_PIPE_TEXTURE_WIDTH,
        }
    }
}

impl SimConfig {
    /// Width of a spawned pipe pair
    pub fn pipe_width(&self) -> f32 {
        self.pipe_texture_width * PIPE_SCALE
    }

    /// Range the gap center is drawn from, keeping both pipes on screen.
    ///
    /// `min > max` when the screen is too short to fit a gap plus margins.
    pub fn gap_bounds(&self) -> (f32, f32) {
        let min = GAP_SIZE / 2.0 + GAP_MARGIN;
        let max = self.screen_height - GAP_SIZE / 2.0 - GAP_MARGIN;
        (min, max)
    }

    /// Where the player starts and respawns
    pub fn player_start(&self) -> Vec2 {
        Vec2::new(PLAYER_START_X, self.screen_height / 2.0)
    }
}

/// The player. Only ever moves vertically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub pos: Vec2,
    /// Vertical velocity, positive is downward
    pub vel_y: f32,
}

impl Body {
    pub fn new(pos: Vec2) -> Self {
        Self { pos, vel_y: 0.0 }
    }

    /// Hitbox centered on the body
    pub fn bounds(&self, size: Vec2) -> Rect {
        Rect::from_center(self.pos, size)
    }
}

/// Complete simulation state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    config: SimConfig,
    /// Current phase
    pub phase: GamePhase,
    /// Player body
    pub player: Body,
    /// Live pipe pairs in spawn order (also left-to-right)
    pub obstacles: Vec<ObstaclePair>,
    /// Seconds accumulated toward the next spawn
    pub spawn_timer: f32,
    /// Gap placement RNG
    pub(crate) rng: Pcg32,
}

impl Simulation {
    /// Create a new simulation with the given seed
    pub fn new(config: SimConfig, seed: u64) -> Self {
        Self::with_rng(config, Pcg32::seed_from_u64(seed))
    }

    /// Create a new simulation with a host-provided generator
    pub fn with_rng(config: SimConfig, rng: Pcg32) -> Self {
        let start = config.player_start();
        Self {
            config,
            phase: GamePhase::Playing,
            player: Body::new(start),
            obstacles: Vec::new(),
            spawn_timer: 0.0,
            rng,
        }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Player hitbox at its current position
    pub fn player_bounds(&self) -> Rect {
        self.player.bounds(self.config.player_size)
    }

    /// Start a fresh run: player centered, no pipes, timer cleared.
    ///
    /// The RNG keeps its stream, so consecutive runs get different pipes.
    pub fn reset(&mut self) {
        self.player = Body::new(self.config.player_start());
        self.obstacles.clear();
        self.spawn_timer = 0.0;
        self.phase = GamePhase::Playing;
        log::info!("Run reset");
    }
}
