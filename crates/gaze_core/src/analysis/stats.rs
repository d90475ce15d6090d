//! Session accumulators and the metrics derived from them.
//!
//! [`SessionStats`] holds raw counters the monitoring session bumps
//! once per frame. [`SessionMetrics`] is the derived, rate-normalized
//! view handed to scoring. Every rate guards its denominator so a
//! short or empty session yields zeros instead of NaN.

use serde::{Deserialize, Serialize};

use crate::models::{GazeDirection, GazePoint};

/// Per-direction frame counts. Blinking frames count as `blinking`
/// regardless of ratios; frames without ratios count as `unknown`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionCounts {
    pub left: u64,
    pub center: u64,
    pub right: u64,
    pub blinking: u64,
    pub unknown: u64,
}

impl DirectionCounts {
    pub fn record(&mut self, direction: GazeDirection) {
        match direction {
            GazeDirection::Left => self.left += 1,
            GazeDirection::Center => self.center += 1,
            GazeDirection::Right => self.right += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.left + self.center + self.right + self.blinking + self.unknown
    }
}

/// Raw accumulators for one monitoring session.
#[derive(Debug, Clone, Default)]
pub struct SessionStats {
    /// Timestamp of the first processed frame.
    pub started_at: Option<f64>,
    /// Timestamp of the most recent frame.
    pub last_frame_at: f64,
    pub frame_count: u64,
    /// Frames where the tracker located both pupils.
    pub detected_frames: u64,
    pub blink_count: u32,
    pub blink_durations: Vec<f64>,
    /// Smoothed on-screen gaze positions.
    pub gaze_points: Vec<GazePoint>,
    pub velocities: Vec<f64>,
    pub saccade_count: u32,
    pub center_count: u64,
    pub edge_count: u64,
    /// Sum of center distances over center-zone hits only.
    pub center_distance_sum: f64,
    /// Transitions from the center zone to anywhere else.
    pub look_away_count: u32,
    pub directions: DirectionCounts,
}

impl SessionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_seconds(&self) -> f64 {
        match self.started_at {
            Some(start) => (self.last_frame_at - start).max(0.0),
            None => 0.0,
        }
    }

    pub fn session_minutes(&self) -> f64 {
        self.session_seconds() / 60.0
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Rate-normalized metrics derived from a session's accumulators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionMetrics {
    pub session_minutes: f64,
    pub blink_rate_per_min: f64,
    pub avg_blink_duration_secs: f64,
    /// Population variance of successive blink-duration deltas.
    pub blink_duration_variance: f64,
    pub saccade_rate_per_min: f64,
    pub avg_velocity_px_s: f64,
    /// Share of gaze points inside the center zone.
    pub center_ratio: f64,
    /// Share of gaze points inside the edge band.
    pub edge_ratio: f64,
    /// Share of frames where both pupils were located.
    pub detection_rate: f64,
    /// How tightly center-zone hits cluster at the midpoint, 0..=1.
    pub center_gaze_accuracy: f64,
    pub look_away_per_min: f64,
}

impl SessionMetrics {
    pub fn from_stats(stats: &SessionStats, center_radius_px: f64) -> Self {
        let minutes = stats.session_minutes();
        let per_minute = |count: f64| if minutes > 0.0 { count / minutes } else { 0.0 };

        let gaze_total = stats.gaze_points.len().max(1) as f64;

        let detection_rate = if stats.frame_count > 0 {
            stats.detected_frames as f64 / stats.frame_count as f64
        } else {
            0.0
        };

        let center_gaze_accuracy = if stats.center_count > 0 {
            let avg_distance = stats.center_distance_sum / stats.center_count as f64;
            ((center_radius_px - avg_distance) / center_radius_px).max(0.0)
        } else {
            0.0
        };

        // Too few positions to speak of transitions at all
        let look_away_per_min = if stats.gaze_points.len() < 2 {
            0.0
        } else {
            stats.look_away_count as f64 / minutes.max(0.1)
        };

        Self {
            session_minutes: minutes,
            blink_rate_per_min: per_minute(stats.blink_count as f64),
            avg_blink_duration_secs: mean_or_zero(&stats.blink_durations),
            blink_duration_variance: blink_delta_variance(&stats.blink_durations),
            saccade_rate_per_min: per_minute(stats.saccade_count as f64),
            avg_velocity_px_s: mean_or_zero(&stats.velocities),
            center_ratio: stats.center_count as f64 / gaze_total,
            edge_ratio: stats.edge_count as f64 / gaze_total,
            detection_rate,
            center_gaze_accuracy,
            look_away_per_min,
        }
    }
}

fn mean_or_zero(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

/// Population variance of the deltas between consecutive blink
/// durations. An erratic rhythm produces spread-out deltas.
fn blink_delta_variance(durations: &[f64]) -> f64 {
    if durations.len() < 2 {
        return 0.0;
    }
    let deltas: Vec<f64> = durations.windows(2).map(|w| w[1] - w[0]).collect();
    let mean = deltas.iter().sum::<f64>() / deltas.len() as f64;
    deltas.iter().map(|d| (d - mean) * (d - mean)).sum::<f64>() / deltas.len() as f64
}
