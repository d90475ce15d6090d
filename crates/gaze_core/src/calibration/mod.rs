//! Gaze calibration: target layout, sample collection, the
//! feature-to-screen model, and record persistence.

pub mod collector;
pub mod model;
pub mod sample_filter;
pub mod store;
pub mod targets;

pub use collector::{collect_target_samples, run_calibration};
pub use model::{CalibrationModel, CalibrationPoint, CalibrationStatus};
pub use sample_filter::filter_outliers;
pub use store::{CalibrationRecord, CalibrationStore};
pub use targets::{calibration_targets, CalibrationTarget, TargetPosition};
