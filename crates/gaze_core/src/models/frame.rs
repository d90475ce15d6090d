//! Raw sensor frame contract.
//!
//! One [`FrameReading`] is produced per camera frame by an external eye
//! detector. Everything downstream (calibration, prediction, analysis)
//! consumes this contract and nothing else, so the detector can be swapped
//! for a scripted or synthetic source in tests.

use serde::{Deserialize, Serialize};

/// Horizontal ratio at or below this means the eye is turned right.
pub const RIGHT_RATIO_MAX: f32 = 0.35;
/// Horizontal ratio at or above this means the eye is turned left.
pub const LEFT_RATIO_MIN: f32 = 0.65;

/// One reading from the eye detector.
///
/// Feature coordinates are in camera space, not screen space. `timestamp`
/// is monotonic seconds; consecutive readings never go backwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameReading {
    /// Both pupils were located in this frame
    pub pupils_located: bool,
    /// Eyelids are closed or closing
    pub is_blinking: bool,
    /// Left eye feature position, camera space
    pub left_feature: Option<(f32, f32)>,
    /// Right eye feature position, camera space
    pub right_feature: Option<(f32, f32)>,
    /// Horizontal gaze ratio in [0, 1], low = right, high = left
    pub horizontal_ratio: Option<f32>,
    /// Vertical gaze ratio in [0, 1], low = up, high = down
    pub vertical_ratio: Option<f32>,
    /// Monotonic seconds
    pub timestamp: f64,
}

impl FrameReading {
    /// A frame where the detector found nothing.
    pub fn empty(timestamp: f64) -> Self {
        Self {
            pupils_located: false,
            is_blinking: false,
            left_feature: None,
            right_feature: None,
            horizontal_ratio: None,
            vertical_ratio: None,
            timestamp,
        }
    }

    /// Collapses the two eyes into one sample by averaging feature
    /// positions. None unless both features and both ratios are present.
    pub fn feature_sample(&self) -> Option<EyeFeatureSample> {
        let (lx, ly) = self.left_feature?;
        let (rx, ry) = self.right_feature?;
        let h_ratio = self.horizontal_ratio?;
        let v_ratio = self.vertical_ratio?;

        Some(EyeFeatureSample {
            x: (lx + rx) / 2.0,
            y: (ly + ry) / 2.0,
            h_ratio,
            v_ratio,
        })
    }
}

/// Averaged eye feature for one frame: camera-space position plus gaze ratios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EyeFeatureSample {
    pub x: f32,
    pub y: f32,
    pub h_ratio: f32,
    pub v_ratio: f32,
}

impl EyeFeatureSample {
    /// Euclidean distance in camera space.
    pub fn feature_distance(&self, other: &EyeFeatureSample) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Euclidean distance in gaze-ratio space.
    pub fn ratio_distance(&self, other: &EyeFeatureSample) -> f32 {
        let dh = self.h_ratio - other.h_ratio;
        let dv = self.v_ratio - other.v_ratio;
        (dh * dh + dv * dv).sqrt()
    }

    /// Coordinate-wise mean over a batch. None for an empty batch.
    pub fn mean_of(samples: &[EyeFeatureSample]) -> Option<EyeFeatureSample> {
        if samples.is_empty() {
            return None;
        }
        let n = samples.len() as f32;
        Some(EyeFeatureSample {
            x: samples.iter().map(|s| s.x).sum::<f32>() / n,
            y: samples.iter().map(|s| s.y).sum::<f32>() / n,
            h_ratio: samples.iter().map(|s| s.h_ratio).sum::<f32>() / n,
            v_ratio: samples.iter().map(|s| s.v_ratio).sum::<f32>() / n,
        })
    }
}

/// Coarse gaze direction derived from the horizontal ratio.
///
/// The camera image is mirrored, so a low ratio means the subject is
/// looking to their right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GazeDirection {
    Left,
    Center,
    Right,
}

impl GazeDirection {
    pub const ALL: [GazeDirection; 3] = [
        GazeDirection::Left,
        GazeDirection::Center,
        GazeDirection::Right,
    ];

    /// Classifies a horizontal ratio.
    pub fn from_ratio(h_ratio: f32) -> Self {
        if h_ratio <= RIGHT_RATIO_MAX {
            GazeDirection::Right
        } else if h_ratio >= LEFT_RATIO_MIN {
            GazeDirection::Left
        } else {
            GazeDirection::Center
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GazeDirection::Left => "left",
            GazeDirection::Center => "center",
            GazeDirection::Right => "right",
        }
    }
}
