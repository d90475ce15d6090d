//! Feature-to-screen calibration model.
//!
//! ## Algorithm
//! 1. Each accepted target contributes one [`CalibrationPoint`]: the mean
//!    of its filtered samples paired with the target's screen position.
//! 2. Prediction finds the nearest stored points under a combined metric:
//!    camera-space distance plus ratio-space distance scaled into pixel
//!    range (ratios live in [0, 1], roughly two orders of magnitude below
//!    pixel coordinates).
//! 3. The predicted position is the inverse-distance weighted average of
//!    the nearest points' screen positions, clamped to the screen.

use serde::{Deserialize, Serialize};

use crate::calibration::sample_filter::filter_outliers;
use crate::config::CalibrationConfig;
use crate::models::{EyeFeatureSample, FrameReading, GazePoint};

/// One calibrated anchor: averaged eye feature at a known screen position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationPoint {
    pub feature: EyeFeatureSample,
    pub screen_x: i32,
    pub screen_y: i32,
}

/// Snapshot of the model state for status queries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationStatus {
    pub is_calibrated: bool,
    pub point_count: usize,
    pub screen_width: u32,
    pub screen_height: u32,
}

/// Maps averaged eye features to screen coordinates.
#[derive(Debug, Clone)]
pub struct CalibrationModel {
    screen_width: u32,
    screen_height: u32,
    points: Vec<CalibrationPoint>,
    is_ready: bool,
    config: CalibrationConfig,
}

impl CalibrationModel {
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Self::with_config(screen_width, screen_height, CalibrationConfig::default())
    }

    pub fn with_config(screen_width: u32, screen_height: u32, config: CalibrationConfig) -> Self {
        Self {
            screen_width,
            screen_height,
            points: Vec::new(),
            is_ready: false,
            config,
        }
    }

    pub fn screen_size(&self) -> (u32, u32) {
        (self.screen_width, self.screen_height)
    }

    /// True once a calibration run has completed successfully.
    pub fn is_ready(&self) -> bool {
        self.is_ready
    }

    pub fn points(&self) -> &[CalibrationPoint] {
        &self.points
    }

    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    pub fn status(&self) -> CalibrationStatus {
        CalibrationStatus {
            is_calibrated: self.is_ready,
            point_count: self.points.len(),
            screen_width: self.screen_width,
            screen_height: self.screen_height,
        }
    }

    /// Folds one target's samples into a calibration point.
    ///
    /// Rejects the target when too few samples were collected or when
    /// outlier filtering leaves nothing behind.
    pub fn add_calibration_point(
        &mut self,
        samples: &[EyeFeatureSample],
        screen_x: i32,
        screen_y: i32,
    ) -> bool {
        if samples.len() < self.config.min_samples_per_point {
            log::warn!(
                "Target at ({}, {}) rejected: {} samples, need {}",
                screen_x,
                screen_y,
                samples.len(),
                self.config.min_samples_per_point
            );
            return false;
        }

        let filtered = filter_outliers(samples, self.config.outlier_threshold_px);
        let Some(feature) = EyeFeatureSample::mean_of(&filtered) else {
            log::warn!(
                "Target at ({}, {}) rejected: no stable samples after filtering",
                screen_x,
                screen_y
            );
            return false;
        };

        log::debug!(
            "Target at ({}, {}) accepted with {}/{} samples",
            screen_x,
            screen_y,
            filtered.len(),
            samples.len()
        );
        self.points.push(CalibrationPoint { feature, screen_x, screen_y });
        true
    }

    /// Finishes a calibration run.
    ///
    /// With too few successful targets the whole run is discarded; a
    /// calibration built from sparse coverage drifts badly at the screen
    /// edges.
    pub fn complete(&mut self, successful_points: usize) -> bool {
        if successful_points >= self.config.min_points_for_completion {
            self.is_ready = true;
            log::info!(
                "Calibration complete: {} targets, {} stored points",
                successful_points,
                self.points.len()
            );
            true
        } else {
            log::warn!(
                "Calibration discarded: only {} of {} required targets succeeded",
                successful_points,
                self.config.min_points_for_completion
            );
            self.points.clear();
            self.is_ready = false;
            false
        }
    }

    /// Predicts the on-screen gaze position for one frame.
    ///
    /// None when the model is not ready, the frame has no located
    /// pupils, or any feature field is missing.
    pub fn predict_frame(&self, frame: &FrameReading) -> Option<GazePoint> {
        if !frame.pupils_located {
            return None;
        }
        let sample = frame.feature_sample()?;
        self.predict(&sample, frame.timestamp)
    }

    /// Predicts the on-screen gaze position for an averaged feature sample.
    pub fn predict(&self, feature: &EyeFeatureSample, timestamp: f64) -> Option<GazePoint> {
        if !self.is_ready || self.points.len() < self.config.min_points_for_prediction {
            return None;
        }

        let mut distances: Vec<(f32, i32, i32)> = self
            .points
            .iter()
            .map(|p| {
                let spatial = feature.feature_distance(&p.feature);
                let ratio = feature.ratio_distance(&p.feature);
                let combined = spatial + ratio * self.config.ratio_distance_scale;
                (combined, p.screen_x, p.screen_y)
            })
            .collect();

        distances.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

        let neighbor_count = self.config.neighbor_count.min(distances.len());
        let mut weighted_x = 0.0f32;
        let mut weighted_y = 0.0f32;
        let mut total_weight = 0.0f32;

        for (dist, screen_x, screen_y) in distances.iter().take(neighbor_count) {
            // The +1 bounds the weight at distance zero
            let weight = 1.0 / (dist + 1.0);
            weighted_x += *screen_x as f32 * weight;
            weighted_y += *screen_y as f32 * weight;
            total_weight += weight;
        }

        if total_weight <= 0.0 {
            return None;
        }

        let x = ((weighted_x / total_weight) as i32).clamp(0, self.screen_width as i32);
        let y = ((weighted_y / total_weight) as i32).clamp(0, self.screen_height as i32);

        Some(GazePoint::new(x, y, timestamp))
    }

    /// Drops all calibration state.
    pub fn reset(&mut self) {
        self.points.clear();
        self.is_ready = false;
        log::info!("Calibration reset");
    }

    /// Replaces the model state with points from a persisted record.
    pub(crate) fn restore(&mut self, points: Vec<CalibrationPoint>) {
        self.points = points;
        self.is_ready = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_sample(x: f32, y: f32, h: f32, v: f32) -> EyeFeatureSample {
        EyeFeatureSample { x, y, h_ratio: h, v_ratio: v }
    }

    /// A tight batch of samples around the given feature.
    fn make_batch(x: f32, y: f32, h: f32, v: f32, n: usize) -> Vec<EyeFeatureSample> {
        (0..n)
            .map(|i| make_sample(x + (i % 3) as f32, y - (i % 2) as f32, h, v))
            .collect()
    }

    /// A ready model with four widely separated anchors.
    fn calibrated_model() -> CalibrationModel {
        let mut model = CalibrationModel::new(1920, 1080);
        let anchors = [
            (make_batch(100.0, 100.0, 0.2, 0.2, 8), 150, 150),
            (make_batch(500.0, 100.0, 0.8, 0.2, 8), 1770, 150),
            (make_batch(100.0, 400.0, 0.2, 0.8, 8), 150, 930),
            (make_batch(500.0, 400.0, 0.8, 0.8, 8), 1770, 930),
        ];
        let mut successful = 0;
        for (samples, sx, sy) in anchors {
            if model.add_calibration_point(&samples, sx, sy) {
                successful += 1;
            }
        }
        assert!(model.complete(successful));
        model
    }

    #[test]
    fn test_add_point_requires_min_samples() {
        let mut model = CalibrationModel::new(1920, 1080);
        let thin = make_batch(100.0, 100.0, 0.5, 0.5, 4);
        assert!(!model.add_calibration_point(&thin, 960, 540));
        assert_eq!(model.points().len(), 0);

        let enough = make_batch(100.0, 100.0, 0.5, 0.5, 5);
        assert!(model.add_calibration_point(&enough, 960, 540));
        assert_eq!(model.points().len(), 1);
    }

    #[test]
    fn test_add_point_averages_filtered_samples() {
        let mut model = CalibrationModel::new(1920, 1080);
        let mut samples = vec![
            make_sample(100.0, 200.0, 0.5, 0.5),
            make_sample(102.0, 202.0, 0.5, 0.5),
            make_sample(104.0, 204.0, 0.5, 0.5),
            make_sample(102.0, 202.0, 0.5, 0.5),
        ];
        // Glitch sample the filter must discard before averaging
        samples.push(make_sample(400.0, 400.0, 0.5, 0.5));

        assert!(model.add_calibration_point(&samples, 960, 540));
        let point = model.points()[0];
        assert!((point.feature.x - 102.0).abs() < 1e-3);
        assert!((point.feature.y - 202.0).abs() < 1e-3);
        assert_eq!(point.screen_x, 960);
        assert_eq!(point.screen_y, 540);
    }

    #[test]
    fn test_add_point_rejects_unstable_batch() {
        let mut model = CalibrationModel::new(1920, 1080);
        // No sample sits within the threshold of both medians (50, 50)
        let samples = vec![
            make_sample(0.0, 0.0, 0.5, 0.5),
            make_sample(0.0, 0.0, 0.5, 0.5),
            make_sample(50.0, 100.0, 0.5, 0.5),
            make_sample(100.0, 50.0, 0.5, 0.5),
            make_sample(100.0, 100.0, 0.5, 0.5),
        ];
        assert!(!model.add_calibration_point(&samples, 960, 540));
        assert_eq!(model.points().len(), 0);
    }

    #[test]
    fn test_complete_requires_four_targets() {
        let mut model = CalibrationModel::new(1920, 1080);
        for i in 0..3 {
            let batch = make_batch(100.0 * i as f32, 100.0, 0.5, 0.5, 8);
            assert!(model.add_calibration_point(&batch, 100 * i, 100));
        }

        assert!(!model.complete(3));
        assert!(!model.is_ready());
        // A failed run leaves nothing behind
        assert_eq!(model.points().len(), 0);
    }

    #[test]
    fn test_complete_with_four_of_five() {
        let model = calibrated_model();
        assert!(model.is_ready());
        assert_eq!(model.points().len(), 4);
    }

    #[test]
    fn test_predict_requires_readiness() {
        let mut model = CalibrationModel::new(1920, 1080);
        for i in 0..4 {
            let batch = make_batch(100.0 + 200.0 * i as f32, 100.0, 0.5, 0.5, 8);
            model.add_calibration_point(&batch, 150 + 500 * i, 150);
        }
        // Not completed, so no predictions yet
        let query = make_sample(100.0, 100.0, 0.5, 0.5);
        assert!(model.predict(&query, 1.0).is_none());
    }

    #[test]
    fn test_predict_requires_three_points() {
        let mut model = CalibrationModel::new(1920, 1080);
        model.restore(vec![
            CalibrationPoint {
                feature: make_sample(100.0, 100.0, 0.2, 0.2),
                screen_x: 150,
                screen_y: 150,
            },
            CalibrationPoint {
                feature: make_sample(500.0, 400.0, 0.8, 0.8),
                screen_x: 1770,
                screen_y: 930,
            },
        ]);

        assert!(model.is_ready());
        let query = make_sample(100.0, 100.0, 0.2, 0.2);
        assert!(model.predict(&query, 1.0).is_none());
    }

    #[test]
    fn test_predict_frame_requires_features() {
        let model = calibrated_model();
        let frame = FrameReading::empty(1.0);
        assert!(model.predict_frame(&frame).is_none());

        let frame = FrameReading {
            pupils_located: true,
            is_blinking: false,
            left_feature: Some((100.0, 100.0)),
            right_feature: Some((102.0, 100.0)),
            horizontal_ratio: None, // ratio dropout
            vertical_ratio: Some(0.2),
            timestamp: 1.0,
        };
        assert!(model.predict_frame(&frame).is_none());

        // Stale features without located pupils are ignored
        let frame = FrameReading {
            pupils_located: false,
            is_blinking: false,
            left_feature: Some((100.0, 100.0)),
            right_feature: Some((102.0, 100.0)),
            horizontal_ratio: Some(0.5),
            vertical_ratio: Some(0.5),
            timestamp: 1.0,
        };
        assert!(model.predict_frame(&frame).is_none());
    }

    #[test]
    fn test_predict_self_consistency_at_anchors() {
        let model = calibrated_model();

        for point in model.points() {
            let predicted = model.predict(&point.feature, 1.0).unwrap();
            // Distant anchors carry negligible weight, so the prediction
            // lands on the anchor itself up to rounding
            assert!(
                (predicted.x - point.screen_x).abs() <= 1,
                "x {} vs {}",
                predicted.x,
                point.screen_x
            );
            assert!((predicted.y - point.screen_y).abs() <= 1);
        }
    }

    #[test]
    fn test_predict_pulls_toward_nearest_anchor() {
        let model = calibrated_model();
        // Query close to the top-left anchor in both metrics
        let query = make_sample(110.0, 110.0, 0.25, 0.25);
        let predicted = model.predict(&query, 1.0).unwrap();

        let top_left = GazePoint::new(150, 150, 1.0);
        let bottom_right = GazePoint::new(1770, 930, 1.0);
        assert!(predicted.distance_to(&top_left) < predicted.distance_to(&bottom_right));
    }

    #[test]
    fn test_predict_clamps_out_of_range_anchors() {
        let mut model = CalibrationModel::new(1920, 1080);
        // A tampered record can carry off-screen anchors; predictions
        // must still land on the screen
        model.restore(vec![
            CalibrationPoint {
                feature: make_sample(100.0, 100.0, 0.2, 0.2),
                screen_x: -800,
                screen_y: -400,
            },
            CalibrationPoint {
                feature: make_sample(120.0, 100.0, 0.2, 0.2),
                screen_x: -700,
                screen_y: -350,
            },
            CalibrationPoint {
                feature: make_sample(500.0, 400.0, 0.8, 0.8),
                screen_x: 1770,
                screen_y: 930,
            },
        ]);

        let query = make_sample(100.0, 100.0, 0.2, 0.2);
        let predicted = model.predict(&query, 1.0).unwrap();
        assert_eq!(predicted.x, 0);
        assert_eq!(predicted.y, 0);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut model = calibrated_model();
        model.reset();
        assert!(!model.is_ready());
        assert_eq!(model.points().len(), 0);

        let query = make_sample(100.0, 100.0, 0.2, 0.2);
        assert!(model.predict(&query, 1.0).is_none());
    }

    #[test]
    fn test_status_snapshot() {
        let model = calibrated_model();
        let status = model.status();
        assert!(status.is_calibrated);
        assert_eq!(status.point_count, 4);
        assert_eq!(status.screen_width, 1920);
        assert_eq!(status.screen_height, 1080);
    }
}
