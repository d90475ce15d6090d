//! Calibration sample collection.
//!
//! For each target the source is polled until enough usable samples
//! arrive or the per-target time window closes, whichever comes first.
//! Frames without located pupils or with partial features are skipped.

use std::time::{Duration, Instant};

use crate::calibration::model::CalibrationModel;
use crate::calibration::targets::{calibration_targets, CalibrationTarget};
use crate::config::CalibrationConfig;
use crate::models::EyeFeatureSample;
use crate::sensor::FrameSource;

/// Collects samples for one target.
pub fn collect_target_samples<S: FrameSource>(
    source: &mut S,
    config: &CalibrationConfig,
) -> Vec<EyeFeatureSample> {
    let mut samples = Vec::with_capacity(config.samples_per_point);
    let started = Instant::now();

    while samples.len() < config.samples_per_point
        && started.elapsed().as_secs_f64() < config.collection_secs
    {
        let Some(frame) = source.next_frame() else {
            break;
        };

        if frame.pupils_located {
            if let Some(sample) = frame.feature_sample() {
                samples.push(sample);
            }
        }

        if config.poll_interval_ms > 0 {
            std::thread::sleep(Duration::from_millis(config.poll_interval_ms));
        }
    }

    samples
}

/// Runs the full five-target calibration sequence against a source.
///
/// `on_target` fires before each target's collection window so the
/// embedding UI can move its marker there. Returns the outcome of
/// [`CalibrationModel::complete`].
pub fn run_calibration<S: FrameSource>(
    source: &mut S,
    model: &mut CalibrationModel,
    mut on_target: impl FnMut(&CalibrationTarget),
) -> bool {
    let (width, height) = model.screen_size();
    let config = model.config().clone();
    let targets = calibration_targets(width, height, config.target_margin_px);

    let mut successful = 0;
    for target in &targets {
        on_target(target);

        let samples = collect_target_samples(source, &config);
        log::debug!(
            "Collected {} samples for {} target",
            samples.len(),
            target.position.as_str()
        );

        if model.add_calibration_point(&samples, target.screen_x, target.screen_y) {
            successful += 1;
        }
    }

    model.complete(successful)
}
