//! # gaze_core - Gaze Calibration and Anxiety-Pattern Analysis
//!
//! This library maps eye-tracker pupil features to screen coordinates
//! through a five-target calibration, monitors gaze behavior frame by
//! frame and scores anxiety-related patterns over a session.
//!
//! ## Features
//! - Five-target calibration with outlier-filtered sample averaging
//! - Distance-weighted nearest-neighbor gaze mapping
//! - Per-resolution calibration persistence with atomic writes
//! - Blink, saccade and screen-zone statistics per monitoring session
//! - Rule-based anxiety indicator scoring with severity bands
//! - Deterministic synthetic frame source for tests and demos

// Allow unused code for features under development
#![allow(dead_code)]

pub mod analysis;
pub mod calibration;
pub mod config;
pub mod error;
pub mod models;
pub mod sensor;
pub mod session;

// Re-export the calibration pipeline
pub use calibration::{
    calibration_targets, collect_target_samples, run_calibration, CalibrationModel,
    CalibrationPoint, CalibrationRecord, CalibrationStatus, CalibrationStore, CalibrationTarget,
    TargetPosition,
};

// Re-export frame and gaze primitives
pub use models::{BlinkEvent, EyeFeatureSample, FrameReading, GazeDirection, GazePoint};

// Re-export the analysis layer
pub use analysis::{
    score_metrics, AnxietyAssessment, DirectionCounts, GazeSmoother, Indicator, IndicatorCategory,
    MotionAnalyzer, SessionMetrics, SessionStats, Severity, VelocitySample, ZoneClassifier,
    ZoneHit,
};

// Re-export session orchestration
pub use session::{MonitorSession, SessionReport};

// Re-export configuration and errors
pub use config::{
    CalibrationConfig, MotionConfig, ScoringConfig, SmoothingConfig, TrackerConfig, ZoneConfig,
};
pub use error::{Result, StoreError};

// Re-export frame sources
pub use sensor::{FrameSource, ScriptedSource, SyntheticSource};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
