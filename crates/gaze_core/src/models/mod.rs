//! Core data types shared across the pipeline.

pub mod frame;
pub mod gaze;

pub use frame::{EyeFeatureSample, FrameReading, GazeDirection};
pub use gaze::{BlinkEvent, GazePoint};
