//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod obstacle;
pub mod rect;
pub mod render;
pub mod state;
pub mod tick;

pub use obstacle::ObstaclePair;
pub use rect::Rect;
pub use render::{ObstacleRects, RenderState};
pub use state::{Body, GameOverCause, GameEvent, GamePhase, SimConfig, Simulation};
pub use tick::{StepInput, StepOutput};
