//! Screen-space gaze types.

use serde::{Deserialize, Serialize};

/// A predicted on-screen gaze position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GazePoint {
    /// Screen x in pixels
    pub x: i32,
    /// Screen y in pixels
    pub y: i32,
    /// Monotonic seconds of the frame that produced this point
    pub t: f64,
}

impl GazePoint {
    pub fn new(x: i32, y: i32, t: f64) -> Self {
        Self { x, y, t }
    }

    /// Euclidean distance to another point, in pixels.
    pub fn distance_to(&self, other: &GazePoint) -> f64 {
        let dx = (self.x - other.x) as f64;
        let dy = (self.y - other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A completed blink, emitted on the falling edge of the blink flag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlinkEvent {
    /// Timestamp of the frame where the flag rose
    pub start_t: f64,
    /// Timestamp of the frame where the flag fell
    pub end_t: f64,
}

impl BlinkEvent {
    /// Blink duration in seconds. Never negative.
    pub fn duration(&self) -> f64 {
        (self.end_t - self.start_t).max(0.0)
    }
}
