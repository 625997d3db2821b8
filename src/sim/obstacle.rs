//! Scrolling pipe pair with a vertical gap
//!
//! A pair knows only its own geometry. The owning simulation moves it,
//! culls it once it leaves the screen, and asks it about collisions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// One top/bottom pipe pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePair {
    /// Top-left of the pair's container (y is always 0)
    pub pos: Vec2,
    /// Vertical center of the gap
    pub gap_y: f32,
    /// Vertical size of the gap
    pub gap_size: f32,
    /// Visual width of both pipes
    pub width: f32,
    /// Screen height, bounds the bottom pipe
    pub screen_height: f32,
}

impl ObstaclePair {
    /// The caller is responsible for choosing a `gap_y` that keeps both
    /// pipes on screen.
    pub fn new(start_x: f32, gap_y: f32, gap_size: f32, width: f32, screen_height: f32) -> Self {
        Self {
            pos: Vec2::new(start_x, 0.0),
            gap_y,
            gap_size,
            width,
            screen_height,
        }
    }

    /// Scroll left by `speed * dt`
    pub fn advance(&mut self, dt: f32, speed: f32) {
        self.pos.x -= speed * dt;
    }

    /// Upper edge of the gap
    #[inline]
    pub fn gap_top(&self) -> f32 {
        self.gap_y - self.gap_size / 2.0
    }

    /// Lower edge of the gap
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_y + self.gap_size / 2.0
    }

    /// Pipe hanging from the top of the screen down to the gap
    pub fn top_segment(&self) -> Rect {
        Rect::new(self.pos.x, 0.0, self.width, self.gap_top())
    }

    /// Pipe rising from the gap to the bottom of the screen
    pub fn bottom_segment(&self) -> Rect {
        let top = self.gap_bottom();
        Rect::new(self.pos.x, top, self.width, self.screen_height - top)
    }

    /// Fully past the left edge
    pub fn is_offscreen(&self) -> bool {
        self.pos.x + self.width < 0.0
    }

    /// Strict overlap against either non-empty pipe
    pub fn collides_with(&self, player: &Rect) -> bool {
        player.intersects(&self.top_segment()) || player.intersects(&self.bottom_segment())
    }
}
