use crate::constants::SIMULATED_STEP_DEGREES;
use crate::models::{Coordinates, Direction, PositionSample};

/// Manually driven position for testing without GPS hardware.
#[derive(Debug, Clone)]
pub struct SimulatedSource {
    position: Coordinates,
    step_degrees: f64,
    active: bool,
}

impl SimulatedSource {
    pub fn new(start: Coordinates) -> Self {
        SimulatedSource {
            position: start,
            step_degrees: SIMULATED_STEP_DEGREES,
            active: false,
        }
    }

    /// Mark active and report the current position.
    pub fn activate(&mut self) -> PositionSample {
        self.active = true;
        tracing::debug!("Simulated position active at {}", self.position);
        PositionSample::new(self.position)
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn position(&self) -> Coordinates {
        self.position
    }

    /// Move one step. Returns `None` while inactive.
    pub fn step(&mut self, direction: Direction) -> Option<PositionSample> {
        if !self.active {
            return None;
        }
        let (dlat, dlng) = direction.unit();
        self.position = self
            .position
            .offset(dlat * self.step_degrees, dlng * self.step_degrees);
        Some(PositionSample::new(self.position))
    }
}
