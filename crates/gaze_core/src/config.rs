//! Centralized tracker configuration.
//!
//! All tunable thresholds live here, grouped by pipeline stage:
//!
//! | Group | Stage |
//! |-------|-------|
//! | [`CalibrationConfig`] | Sample collection, outlier filtering, prediction |
//! | [`SmoothingConfig`] | Gaze point moving average |
//! | [`MotionConfig`] | Saccade detection |
//! | [`ZoneConfig`] | Center/edge zone classification |
//! | [`ScoringConfig`] | Anxiety indicator thresholds |
//!
//! ## Usage
//!
//! ```rust
//! use gaze_core::config::TrackerConfig;
//!
//! let config = TrackerConfig::default();
//! assert!(config.zones.center_radius_px > 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::analysis::{motion, zones};
use crate::calibration::sample_filter;

/// Top-level configuration for the whole tracking pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    pub calibration: CalibrationConfig,
    pub smoothing: SmoothingConfig,
    pub motion: MotionConfig,
    pub zones: ZoneConfig,
    pub scoring: ScoringConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            calibration: CalibrationConfig::default(),
            smoothing: SmoothingConfig::default(),
            motion: MotionConfig::default(),
            zones: ZoneConfig::default(),
            scoring: ScoringConfig::default(),
        }
    }
}

/// Calibration collection and prediction parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationConfig {
    /// Inward offset of the four corner targets, in pixels
    pub target_margin_px: u32,
    /// Samples to collect per target before moving on
    pub samples_per_point: usize,
    /// Per-target collection ceiling in seconds
    pub collection_secs: f64,
    /// Delay between sensor polls during collection, in milliseconds
    pub poll_interval_ms: u64,
    /// Minimum raw samples for a target to be accepted
    pub min_samples_per_point: usize,
    /// Max pixel distance from the batch median for a sample to be kept
    pub outlier_threshold_px: f32,
    /// Targets that must succeed for the calibration to be usable
    pub min_points_for_completion: usize,
    /// Stored points required before prediction is attempted
    pub min_points_for_prediction: usize,
    /// Nearest calibration points blended per prediction
    pub neighbor_count: usize,
    /// Multiplier lifting ratio-space distances into pixel scale
    pub ratio_distance_scale: f32,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            target_margin_px: 150,
            samples_per_point: 10,
            collection_secs: 3.0,
            poll_interval_ms: 50, // 20 Hz sampling
            min_samples_per_point: 5,
            outlier_threshold_px: sample_filter::OUTLIER_THRESHOLD_PX,
            min_points_for_completion: 4,
            min_points_for_prediction: 3,
            neighbor_count: 4,
            ratio_distance_scale: 100.0,
        }
    }
}

/// Moving-average smoothing parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// Sliding window capacity
    pub window_size: usize,
    /// Points required before averaging kicks in
    pub min_points_to_smooth: usize,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            window_size: 5,
            min_points_to_smooth: 3,
        }
    }
}

/// Eye movement analysis parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Gaze velocity above which a movement counts as a saccade, px/s
    pub saccade_threshold_px_s: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            saccade_threshold_px_s: motion::SACCADE_THRESHOLD_PX_S,
        }
    }
}

/// Screen zone classification parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneConfig {
    /// Radius of the center zone around the screen midpoint, in pixels
    pub center_radius_px: f64,
    /// Band width along each screen border that counts as edge, in pixels
    pub edge_margin_px: f64,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            center_radius_px: zones::CENTER_RADIUS_PX,
            edge_margin_px: zones::EDGE_MARGIN_PX,
        }
    }
}

/// Thresholds for the anxiety indicator rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Blink rate above this is flagged high, blinks/min
    pub high_blink_rate_per_min: f64,
    /// Blink rate below this is flagged suppressed, blinks/min
    pub low_blink_rate_per_min: f64,
    /// Average blink duration below this is flagged rapid, seconds
    pub rapid_blink_secs: f64,
    /// Average blink duration above this is flagged prolonged, seconds
    pub prolonged_blink_secs: f64,
    /// Variance of successive blink-duration deltas above this is irregular
    pub blink_variance_threshold: f64,
    /// Saccade rate above this is flagged excessive, saccades/min
    pub saccade_rate_per_min: f64,
    /// Center ratio below this is strong avoidance
    pub strong_avoidance_ratio: f64,
    /// Center ratio below this (but at least strong) is moderate avoidance
    pub moderate_avoidance_ratio: f64,
    /// Edge ratio above this is flagged as edge fixation
    pub edge_fixation_ratio: f64,
    /// Average gaze velocity above this is rapid scanning, px/s
    pub rapid_scan_velocity_px_s: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            high_blink_rate_per_min: 30.0,
            low_blink_rate_per_min: 8.0,
            rapid_blink_secs: 0.1,
            prolonged_blink_secs: 0.5,
            blink_variance_threshold: 0.2,
            saccade_rate_per_min: 6.0,
            strong_avoidance_ratio: 0.2,
            moderate_avoidance_ratio: 0.4,
            edge_fixation_ratio: 0.3,
            rapid_scan_velocity_px_s: 150.0,
        }
    }
}
