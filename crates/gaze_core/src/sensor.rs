//! Frame sources.
//!
//! The eye detector is an external capability. Everything in this crate
//! pulls [`FrameReading`]s through the [`FrameSource`] trait so the real
//! camera-backed detector, a scripted replay, or a synthetic generator
//! can sit behind the same pipeline.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::models::FrameReading;

/// Interval between synthetic frames, seconds (20 Hz).
const FRAME_INTERVAL_SECS: f64 = 0.05;
/// Horizontal distance between the two synthetic eye features, pixels.
const EYE_GAP_PX: f32 = 60.0;
/// Camera-space region the synthetic eye features move in.
const FEATURE_MIN_X: f32 = 200.0;
const FEATURE_SPAN_X: f32 = 240.0;
const FEATURE_MIN_Y: f32 = 150.0;
const FEATURE_SPAN_Y: f32 = 180.0;
/// Positional jitter of the synthetic features, pixels.
const FEATURE_NOISE_SIGMA: f32 = 1.5;
/// Jitter on the synthetic gaze ratios.
const RATIO_NOISE_SIGMA: f32 = 0.005;

/// A pull-based stream of frame readings.
pub trait FrameSource {
    /// Next reading, or None when the stream ends.
    fn next_frame(&mut self) -> Option<FrameReading>;
}

/// Replays a fixed sequence of readings, then ends.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    frames: Vec<FrameReading>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(frames: Vec<FrameReading>) -> Self {
        Self { frames, cursor: 0 }
    }

    /// Readings not yet consumed.
    pub fn remaining(&self) -> usize {
        self.frames.len() - self.cursor
    }
}

impl FrameSource for ScriptedSource {
    fn next_frame(&mut self) -> Option<FrameReading> {
        let frame = self.frames.get(self.cursor).copied();
        self.cursor += 1;
        frame
    }
}

/// Generates detector readings for a simulated subject fixating a screen
/// point. Deterministic per seed.
///
/// Screen positions map linearly into a camera-space feature region; the
/// horizontal ratio follows the mirrored-image convention (screen left
/// produces a high ratio). During a blink the eyes are closed, so the
/// frame carries no features.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    rng: ChaCha8Rng,
    screen_width: u32,
    screen_height: u32,
    target: (f32, f32),
    blink_frames_left: u32,
    clock: f64,
}

impl SyntheticSource {
    pub fn new(screen_width: u32, screen_height: u32, seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            screen_width,
            screen_height,
            target: (screen_width as f32 / 2.0, screen_height as f32 / 2.0),
            blink_frames_left: 0,
            clock: 0.0,
        }
    }

    /// Points the simulated gaze at a screen position.
    pub fn look_at(&mut self, screen_x: i32, screen_y: i32) {
        self.target = (screen_x as f32, screen_y as f32);
    }

    /// Closes the eyes for the next `frames` readings.
    pub fn blink_for(&mut self, frames: u32) {
        self.blink_frames_left = frames;
    }

    fn noise(&mut self, sigma: f32) -> f32 {
        let n: f32 = StandardNormal.sample(&mut self.rng);
        n * sigma
    }
}

impl FrameSource for SyntheticSource {
    fn next_frame(&mut self) -> Option<FrameReading> {
        let timestamp = self.clock;
        self.clock += FRAME_INTERVAL_SECS;

        if self.blink_frames_left > 0 {
            self.blink_frames_left -= 1;
            // Closed eyes: no pupils, no ratios
            let mut frame = FrameReading::empty(timestamp);
            frame.is_blinking = true;
            return Some(frame);
        }

        let nx = self.target.0 / self.screen_width as f32;
        let ny = self.target.1 / self.screen_height as f32;

        let center_x = FEATURE_MIN_X + nx * FEATURE_SPAN_X + self.noise(FEATURE_NOISE_SIGMA);
        let center_y = FEATURE_MIN_Y + ny * FEATURE_SPAN_Y + self.noise(FEATURE_NOISE_SIGMA);

        let h_ratio = (1.0 - nx + self.noise(RATIO_NOISE_SIGMA)).clamp(0.0, 1.0);
        let v_ratio = (ny + self.noise(RATIO_NOISE_SIGMA)).clamp(0.0, 1.0);

        Some(FrameReading {
            pupils_located: true,
            is_blinking: false,
            left_feature: Some((center_x - EYE_GAP_PX / 2.0, center_y)),
            right_feature: Some((center_x + EYE_GAP_PX / 2.0, center_y)),
            horizontal_ratio: Some(h_ratio),
            vertical_ratio: Some(v_ratio),
            timestamp,
        })
    }
}
