use crate::models::Coordinates;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One reading from a position source. Each sample supersedes the last.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PositionSample {
    pub location: Coordinates,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy_m: Option<f64>,
}

impl PositionSample {
    pub fn new(location: Coordinates) -> Self {
        PositionSample {
            location,
            accuracy_m: None,
        }
    }

    pub fn with_accuracy(mut self, accuracy_m: f64) -> Self {
        self.accuracy_m = Some(accuracy_m);
        self
    }

    /// Accuracy to one decimal, halves rounded away from zero (7.25 -> "7.3").
    pub fn accuracy_label(&self) -> Option<String> {
        self.accuracy_m
            .map(|acc| format!("{:.1}", (acc * 10.0).round() / 10.0))
    }

    /// Popup text for the user marker.
    pub fn popup_text(&self) -> String {
        match self.accuracy_label() {
            Some(acc) => format!("You are here! Accuracy: {} meters", acc),
            None => "You are here!".to_string(),
        }
    }
}

/// Which producer drives the session position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Live,
    #[default]
    Simulated,
}

impl Mode {
    pub fn toggled(self) -> Self {
        match self {
            Mode::Live => Mode::Simulated,
            Mode::Simulated => Mode::Live,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Live => write!(f, "live"),
            Mode::Simulated => write!(f, "simulated"),
        }
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "live" | "gps" => Ok(Mode::Live),
            "simulated" | "testing" => Ok(Mode::Simulated),
            _ => Err(format!(
                "Invalid mode: {}. Use 'live' or 'simulated'",
                s
            )),
        }
    }
}

/// Manual step direction for the simulated source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// (lat, lng) sign of one step.
    pub fn unit(self) -> (f64, f64) {
        match self {
            Direction::North => (1.0, 0.0),
            Direction::South => (-1.0, 0.0),
            Direction::East => (0.0, 1.0),
            Direction::West => (0.0, -1.0),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "n" | "north" | "up" => Ok(Direction::North),
            "s" | "south" | "down" => Ok(Direction::South),
            "e" | "east" | "right" => Ok(Direction::East),
            "w" | "west" | "left" => Ok(Direction::West),
            _ => Err(format!("Invalid direction: {}", s)),
        }
    }
}
