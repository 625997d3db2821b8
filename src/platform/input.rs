//! Turn held-button samples into the edges the simulation consumes

use crate::sim::StepInput;

/// Raw "is it held down right now" samples for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostInput {
    pub flap_held: bool,
    pub exit_held: bool,
}

/// Remembers last frame's samples to detect rising edges
#[derive(Debug, Clone, Default)]
pub struct EdgeDetector {
    previous: HostInput,
}

impl EdgeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this frame's samples, get the edges to pass to `Simulation::step`.
    ///
    /// Flap fires only on released -> pressed. Exit is level-triggered, like
    /// holding Escape.
    pub fn update(&mut self, current: HostInput) -> StepInput {
        let input = StepInput {
            flap_pressed: current.flap_held && !self.previous.flap_held,
            exit_requested: current.exit_held,
        };
        self.previous = current;
        input
    }
}
