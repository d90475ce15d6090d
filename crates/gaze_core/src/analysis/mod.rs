//! # Analysis Module
//!
//! Per-frame gaze analysis and session-level scoring.
//!
//! ## Submodules
//!
//! - `smoother` - Moving-average smoothing of predicted gaze points
//! - `motion` - Blink edge detection and velocity/saccade tracking
//! - `zones` - Center and edge zone classification
//! - `stats` - Session accumulators and derived metrics
//! - `scoring` - Anxiety indicator rules over session metrics

pub mod motion;
pub mod scoring;
pub mod smoother;
pub mod stats;
pub mod zones;

pub use motion::{MotionAnalyzer, VelocitySample};
pub use scoring::{score_metrics, AnxietyAssessment, Indicator, IndicatorCategory, Severity};
pub use smoother::GazeSmoother;
pub use stats::{DirectionCounts, SessionMetrics, SessionStats};
pub use zones::{ZoneClassifier, ZoneHit};
