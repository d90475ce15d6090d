//! Blink and gaze-velocity tracking.
//!
//! Blinks are detected on edges of the per-frame blink flag: a rising
//! edge opens an event, the falling edge closes it and reports the
//! duration. Velocity is measured between consecutive smoothed gaze
//! points; a frame pair whose velocity exceeds the saccade threshold
//! counts as one saccade.

use crate::config::MotionConfig;
use crate::models::{BlinkEvent, GazePoint};

/// Gaze velocity above this counts as a saccade, in px/s.
pub const SACCADE_THRESHOLD_PX_S: f64 = 300.0;

/// Velocity measured between two consecutive gaze points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocitySample {
    pub velocity_px_s: f64,
    pub is_saccade: bool,
}

/// Stateful blink and velocity detector fed one frame at a time.
#[derive(Debug, Clone)]
pub struct MotionAnalyzer {
    saccade_threshold_px_s: f64,
    blink_started_at: Option<f64>,
    last_point: Option<GazePoint>,
}

impl MotionAnalyzer {
    pub fn new() -> Self {
        Self::with_config(&MotionConfig::default())
    }

    pub fn with_config(config: &MotionConfig) -> Self {
        Self {
            saccade_threshold_px_s: config.saccade_threshold_px_s,
            blink_started_at: None,
            last_point: None,
        }
    }

    /// Feeds the per-frame blink flag. Returns a completed event on the
    /// falling edge, `None` otherwise.
    pub fn update_blink(&mut self, is_blinking: bool, timestamp: f64) -> Option<BlinkEvent> {
        match (self.blink_started_at, is_blinking) {
            // Eyes just closed
            (None, true) => {
                self.blink_started_at = Some(timestamp);
                None
            }
            // Eyes reopened: the blink is complete
            (Some(start_t), false) => {
                self.blink_started_at = None;
                Some(BlinkEvent {
                    start_t,
                    end_t: timestamp,
                })
            }
            // Steady state, either open or mid-blink
            _ => None,
        }
    }

    /// True while a blink has started but not yet ended.
    pub fn is_mid_blink(&self) -> bool {
        self.blink_started_at.is_some()
    }

    /// Feeds the next gaze point and returns the velocity relative to
    /// the previous one.
    ///
    /// Returns `None` for the first point and for frame pairs with a
    /// non-positive time delta (duplicate or reordered timestamps). The
    /// new point still replaces the stored one in that case.
    pub fn update_position(&mut self, point: GazePoint) -> Option<VelocitySample> {
        let prev = self.last_point.replace(point)?;

        let dt = point.t - prev.t;
        if dt <= 0.0 {
            return None;
        }

        let velocity_px_s = prev.distance_to(&point) / dt;
        Some(VelocitySample {
            velocity_px_s,
            is_saccade: velocity_px_s > self.saccade_threshold_px_s,
        })
    }

    pub fn reset(&mut self) {
        self.blink_started_at = None;
        self.last_point = None;
    }
}

impl Default for MotionAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
