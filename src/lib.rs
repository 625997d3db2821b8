//! Flappy Core - simulation engine for a side-scrolling flappy game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, pipe spawning, collisions, game phase)
//! - `platform`: Host-side glue (input edge detection)
//! - `settings`: Host-supplied construction constants, persisted as JSON

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};
pub use sim::{RenderState, SimConfig, Simulation, StepInput, StepOutput};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the native host loop
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest frame delta the host feeds into its accumulator
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Downward acceleration (pixels/s²)
    pub const GRAVITY: f32 = 500.0;
    /// Velocity set by a flap; negative moves upward
    pub const FLAP_VELOCITY: f32 = -200.0;
    /// Fixed horizontal position of the player
    pub const PLAYER_START_X: f32 = 100.0;

    /// Pipe scroll speed (pixels/s)
    pub const PIPE_SPEED: f32 = 100.0;
    /// Seconds between pipe spawns
    pub const PIPE_SPAWN_INTERVAL: f32 = 5.0;
    /// Vertical opening of every pipe pair
    pub const GAP_SIZE: f32 = 150.0;
    /// Minimum distance between the gap and the screen edges
    pub const GAP_MARGIN: f32 = 20.0;
    /// Pipe width relative to its texture width
    pub const PIPE_SCALE: f32 = 0.5;

    /// Host defaults (the usual 800x480 back buffer)
    pub const DEFAULT_SCREEN_WIDTH: f32 = 800.0;
    pub const DEFAULT_SCREEN_HEIGHT: f32 = 480.0;
    pub const DEFAULT_PLAYER_SIZE: f32 = 32.0;
    pub const DEFAULT_PIPE_TEXTURE_WIDTH: f32 = 104.0;
}
