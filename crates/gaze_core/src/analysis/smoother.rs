//! Moving-average smoothing for predicted gaze points.
//!
//! Raw predictions jitter by a few pixels frame to frame. A short
//! sliding window keeps the cursor steady without adding noticeable lag.
//! Until the window holds enough points the input passes through
//! unchanged rather than being dragged toward a half-filled average.

use std::collections::VecDeque;

use crate::config::SmoothingConfig;
use crate::models::GazePoint;

/// Sliding-window mean over recent gaze points.
#[derive(Debug, Clone)]
pub struct GazeSmoother {
    window: VecDeque<GazePoint>,
    capacity: usize,
    min_points: usize,
}

impl GazeSmoother {
    pub fn new() -> Self {
        Self::with_config(&SmoothingConfig::default())
    }

    pub fn with_config(config: &SmoothingConfig) -> Self {
        let capacity = config.window_size.max(1);
        Self {
            window: VecDeque::with_capacity(capacity),
            capacity,
            min_points: config.min_points_to_smooth,
        }
    }

    /// Pushes a point into the window and returns the smoothed position.
    ///
    /// The returned point keeps the input's timestamp.
    pub fn smooth(&mut self, point: GazePoint) -> GazePoint {
        if self.window.len() == self.capacity {
            self.window.pop_front();
        }
        self.window.push_back(point);

        if self.window.len() < self.min_points {
            return point;
        }

        let n = self.window.len() as f64;
        let avg_x = self.window.iter().map(|p| p.x as f64).sum::<f64>() / n;
        let avg_y = self.window.iter().map(|p| p.y as f64).sum::<f64>() / n;

        GazePoint::new(avg_x as i32, avg_y as i32, point.t)
    }

    pub fn len(&self) -> usize {
        self.window.len()
    }

    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }

    pub fn clear(&mut self) {
        self.window.clear();
    }
}

impl Default for GazeSmoother {
    fn default() -> Self {
        Self::new()
    }
}
