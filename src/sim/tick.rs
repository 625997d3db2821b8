//! Variable timestep simulation step
//!
//! Core game loop that advances the world by one frame.

use rand::Rng;

use super::obstacle::ObstaclePair;
use super::state::{GameEvent, GameOverCause, GamePhase, Simulation};
use crate::consts::*;

/// Input edges for a single step. The host computes the edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepInput {
    /// Flap/confirm went from released to pressed this frame
    pub flap_pressed: bool,
    /// Host asked to quit (passed through untouched)
    pub exit_requested: bool,
}

/// What a step reports back to the host
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepOutput {
    pub exit_requested: bool,
    pub events: Vec<GameEvent>,
}

impl Simulation {
    /// Advance the simulation by `dt` seconds
    pub fn step(&mut self, input: &StepInput, dt: f32) -> StepOutput {
        let mut out = StepOutput {
            exit_requested: input.exit_requested,
            events: Vec::new(),
        };

        // Negative or NaN dt is a host bug; never let it corrupt state
        let dt = if dt.is_finite() && dt >= 0.0 {
            dt
        } else {
            log::warn!("Ignoring invalid step dt: {}", dt);
            0.0
        };

        match self.phase {
            GamePhase::Playing => self.step_playing(input, dt, &mut out.events),
            GamePhase::GameOver => {
                if input.flap_pressed {
                    self.reset();
                    out.events.push(GameEvent::Reset);
                }
            }
        }

        out
    }

    fn step_playing(&mut self, input: &StepInput, dt: f32, events: &mut Vec<GameEvent>) {
        // --- Player physics ---
        if input.flap_pressed {
            self.player.vel_y = FLAP_VELOCITY;
            events.push(GameEvent::Flapped);
        }

        self.player.vel_y += GRAVITY * dt;
        self.player.pos.y += self.player.vel_y * dt;

        // Soft ceiling
        if self.player.pos.y < 0.0 {
            self.player.pos.y = 0.0;
            self.player.vel_y = 0.0;
        }
        // Hard floor ends the run (plain y check, not a rect test)
        let screen_height = self.config().screen_height;
        if self.player.pos.y > screen_height {
            self.player.pos.y = screen_height;
            self.end_run(GameOverCause::Floor, events);
        }

        // --- Pipe spawning ---
        self.spawn_timer += dt;
        if self.spawn_timer >= PIPE_SPAWN_INTERVAL {
            self.spawn_timer = 0.0;
            let gap_y = self.spawn_obstacle();
            events.push(GameEvent::ObstacleSpawned { gap_y });
        }

        // --- Pipe movement, culling and collision ---
        let player = self.player_bounds();
        let mut hit = false;
        for i in (0..self.obstacles.len()).rev() {
            self.obstacles[i].advance(dt, PIPE_SPEED);

            if self.obstacles[i].is_offscreen() {
                self.obstacles.remove(i);
                events.push(GameEvent::ObstacleDespawned);
            } else if self.obstacles[i].collides_with(&player) {
                // Keep moving the rest of the pipes this step
                hit = true;
            }
        }
        if hit {
            self.end_run(GameOverCause::Obstacle, events);
        }
    }

    /// Append a pipe pair at the right edge with a random gap.
    ///
    /// Returns the chosen gap center.
    pub fn spawn_obstacle(&mut self) -> f32 {
        let config = *self.config();
        let (min_gap_y, max_gap_y) = config.gap_bounds();
        let gap_y = if max_gap_y > min_gap_y {
            self.rng.random_range(min_gap_y..max_gap_y)
        } else {
            // Screen too short for the margins; center the gap
            (min_gap_y + max_gap_y) / 2.0
        };

        self.obstacles.push(ObstaclePair::new(
            config.screen_width,
            gap_y,
            GAP_SIZE,
            config.pipe_width(),
            config.screen_height,
        ));
        log::debug!("Spawned pipe pair, gap at y={:.1}", gap_y);
        gap_y
    }

    fn end_run(&mut self, cause: GameOverCause, events: &mut Vec<GameEvent>) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        events.push(GameEvent::GameOver { cause });
        log::info!("Game over: {:?}", cause);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::SimConfig;
    use glam::Vec2;

    const FLAP: StepInput = StepInput {
        flap_pressed: true,
        exit_requested: false,
    };

    fn sim() -> Simulation {
        Simulation::new(SimConfig::default(), 12345)
    }

    #[test]
    fn test_gravity_integration_order() {
        let mut sim = sim();
        sim.step(&StepInput::default(), 0.1);
        // v = 500 * 0.1 = 50, y = 240 + 50 * 0.1 = 245
        assert!((sim.player.vel_y - 50.0).abs() < 1e-4);
        assert!((sim.player.pos.y - 245.0).abs() < 1e-4);
    }

    #[test]
    fn test_flap_overrides_velocity() {
        for initial in [-500.0, 0.0, 350.0] {
            let mut sim = sim();
            sim.player.vel_y = initial;
            let out = sim.step(&FLAP, 0.0);
            assert_eq!(sim.player.vel_y, FLAP_VELOCITY);
            assert_eq!(out.events, vec![GameEvent::Flapped]);
        }
    }

    #[test]
    fn test_ceiling_clamp() {
        let mut sim = sim();
        sim.player.pos.y = 5.0;
        sim.player.vel_y = -1000.0;
        sim.step(&StepInput::default(), 0.1);
        assert_eq!(sim.player.pos.y, 0.0);
        assert_eq!(sim.player.vel_y, 0.0);
        assert_eq!(sim.phase, GamePhase::Playing);
    }

    #[test]
    fn test_floor_ends_run() {
        let mut sim = sim();
        sim.player.pos.y = 475.0;
        sim.player.vel_y = 400.0;
        let out = sim.step(&StepInput::default(), 0.1);
        assert_eq!(sim.player.pos.y, 480.0);
        assert_eq!(sim.phase, GamePhase::GameOver);
        assert!(out.events.contains(&GameEvent::GameOver {
            cause: GameOverCause::Floor
        }));
    }

    #[test]
    fn test_spawn_on_interval() {
        let mut sim = sim();
        sim.spawn_timer = PIPE_SPAWN_INTERVAL - 0.5;
        sim.player.vel_y = -100.0; // stay airborne
        let out = sim.step(&StepInput::default(), 0.5);

        assert_eq!(sim.obstacles.len(), 1);
        assert_eq!(sim.spawn_timer, 0.0);
        // Spawned at the right edge, then moved with everything else this step
        let pipe = &sim.obstacles[0];
        assert!((pipe.pos.x - (800.0 - PIPE_SPEED * 0.5)).abs() < 1e-3);
        let (min, max) = sim.config().gap_bounds();
        assert!(pipe.gap_y >= min && pipe.gap_y <= max);
        assert!(matches!(
            out.events.as_slice(),
            [GameEvent::ObstacleSpawned { .. }]
        ));
    }

    #[test]
    fn test_spawn_obstacle_at_right_edge() {
        let mut sim = sim();
        let gap_y = sim.spawn_obstacle();
        assert_eq!(sim.obstacles.len(), 1);
        assert_eq!(sim.obstacles[0].pos.x, 800.0);
        assert_eq!(sim.obstacles[0].gap_y, gap_y);
        assert_eq!(sim.obstacles[0].width, 52.0);
    }

    #[test]
    fn test_spawn_on_short_screen_centers_gap() {
        let config = SimConfig {
            screen_height: 100.0,
            ..SimConfig::default()
        };
        let mut sim = Simulation::new(config, 3);
        let gap_y = sim.spawn_obstacle();
        assert_eq!(gap_y, 50.0);
    }

    #[test]
    fn test_offscreen_pipe_removed() {
        let mut sim = sim();
        sim.obstacles
            .push(ObstaclePair::new(-50.0, 240.0, GAP_SIZE, 52.0, 480.0));
        let out = sim.step(&StepInput::default(), 0.05);
        assert!(sim.obstacles.is_empty());
        assert!(out.events.contains(&GameEvent::ObstacleDespawned));
    }

    #[test]
    fn test_obstacle_collision_still_moves_all_pipes() {
        let mut sim = sim();
        // Index 0 is far right, index 1 overlaps the player's top pipe
        sim.obstacles
            .push(ObstaclePair::new(400.0, 240.0, GAP_SIZE, 52.0, 480.0));
        sim.obstacles
            .push(ObstaclePair::new(90.0, 400.0, GAP_SIZE, 52.0, 480.0));

        let out = sim.step(&StepInput::default(), 0.01);
        assert_eq!(sim.phase, GamePhase::GameOver);
        assert!((sim.obstacles[0].pos.x - 399.0).abs() < 1e-3);
        assert!((sim.obstacles[1].pos.x - 89.0).abs() < 1e-3);
        let game_overs = out
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(game_overs, 1);
    }

    #[test]
    fn test_player_in_gap_is_safe() {
        let mut sim = sim();
        sim.obstacles
            .push(ObstaclePair::new(90.0, 240.0, GAP_SIZE, 52.0, 480.0));
        sim.step(&StepInput::default(), 0.01);
        assert_eq!(sim.phase, GamePhase::Playing);
    }

    #[test]
    fn test_game_over_freezes_world() {
        let mut sim = sim();
        sim.obstacles
            .push(ObstaclePair::new(300.0, 240.0, GAP_SIZE, 52.0, 480.0));
        sim.spawn_timer = 2.0;
        sim.phase = GamePhase::GameOver;
        let before = sim.clone();

        let exit = StepInput {
            flap_pressed: false,
            exit_requested: true,
        };
        let out = sim.step(&StepInput::default(), 1.0);
        assert!(out.events.is_empty());
        let out = sim.step(&exit, 10.0);
        assert!(out.exit_requested);
        assert_eq!(sim, before);
    }

    #[test]
    fn test_flap_restarts_after_game_over() {
        let mut sim = sim();
        sim.player.pos.y = 480.0;
        sim.phase = GamePhase::GameOver;

        let out = sim.step(&FLAP, 0.5);
        assert_eq!(sim.phase, GamePhase::Playing);
        assert_eq!(out.events, vec![GameEvent::Reset]);
        // The restart step does not integrate physics
        assert_eq!(sim.player.pos, Vec2::new(PLAYER_START_X, 240.0));
        assert_eq!(sim.player.vel_y, 0.0);
    }

    #[test]
    fn test_invalid_dt_treated_as_zero() {
        let mut sim = sim();
        let before = sim.clone();
        sim.step(&StepInput::default(), -1.0);
        sim.step(&StepInput::default(), f32::NAN);
        assert_eq!(sim, before);
    }

    #[test]
    fn test_exit_passthrough_while_playing() {
        let mut sim = sim();
        let out = sim.step(
            &StepInput {
                flap_pressed: false,
                exit_requested: true,
            },
            0.016,
        );
        assert!(out.exit_requested);
        assert_eq!(sim.phase, GamePhase::Playing);
    }

    #[test]
    fn test_determinism() {
        // Two simulations with same seed should produce identical results
        let mut a = sim();
        let mut b = sim();
        for frame in 0..2000 {
            let input = StepInput {
                flap_pressed: frame % 25 == 0,
                exit_requested: false,
            };
            a.step(&input, SIM_DT);
            b.step(&input, SIM_DT);
        }
        assert_eq!(a, b);
    }
}
