//! Drawable snapshot of the simulation
//!
//! The host reads this after each step; it never feeds back into the sim.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::obstacle::ObstaclePair;
use super::rect::Rect;
use super::state::Simulation;

/// Rects for one pipe pair. Empty (zero or negative height) pipes are `None`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleRects {
    pub top: Option<Rect>,
    pub bottom: Option<Rect>,
}

impl From<&ObstaclePair> for ObstacleRects {
    fn from(pair: &ObstaclePair) -> Self {
        let drawable = |r: Rect| (!r.is_empty()).then_some(r);
        Self {
            top: drawable(pair.top_segment()),
            bottom: drawable(pair.bottom_segment()),
        }
    }
}

/// Everything the host needs to draw a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderState {
    /// Player center
    pub player_position: Vec2,
    pub is_game_over: bool,
    /// Pipe pairs in spawn order
    pub obstacles: Vec<ObstacleRects>,
}

impl Simulation {
    pub fn render_state(&self) -> RenderState {
        RenderState {
            player_position: self.player.pos,
            is_game_over: self.is_game_over(),
            obstacles: self.obstacles.iter().map(ObstacleRects::from).collect(),
        }
    }
}
