//! Calibration record persistence.
//!
//! Records are plain JSON, one file per screen resolution
//! (`calibration_1920x1080.json`), so a machine with several monitors
//! keeps an independent calibration for each. Writes go through a temp
//! file and rename so a crash mid-write never corrupts an existing
//! record.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::calibration::model::{CalibrationModel, CalibrationPoint};
use crate::error::{Result, StoreError};
use crate::models::EyeFeatureSample;

/// On-disk calibration record.
///
/// Each point row is `[feature_x, feature_y, screen_x, screen_y,
/// h_ratio, v_ratio]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalibrationRecord {
    pub screen_width: u32,
    pub screen_height: u32,
    pub calibration_points: Vec<[f32; 6]>,
    /// Unix epoch seconds at save time
    pub timestamp: f64,
}

impl CalibrationRecord {
    /// Captures the model's current points.
    pub fn from_model(model: &CalibrationModel) -> Self {
        let (screen_width, screen_height) = model.screen_size();
        let calibration_points = model
            .points()
            .iter()
            .map(|p| {
                [
                    p.feature.x,
                    p.feature.y,
                    p.screen_x as f32,
                    p.screen_y as f32,
                    p.feature.h_ratio,
                    p.feature.v_ratio,
                ]
            })
            .collect();

        Self {
            screen_width,
            screen_height,
            calibration_points,
            timestamp: Utc::now().timestamp_millis() as f64 / 1000.0,
        }
    }

    fn to_points(&self) -> Vec<CalibrationPoint> {
        self.calibration_points
            .iter()
            .map(|row| CalibrationPoint {
                feature: EyeFeatureSample {
                    x: row[0],
                    y: row[1],
                    h_ratio: row[4],
                    v_ratio: row[5],
                },
                screen_x: row[2] as i32,
                screen_y: row[3] as i32,
            })
            .collect()
    }
}

/// Saves and loads calibration records under a base directory.
#[derive(Debug, Clone)]
pub struct CalibrationStore {
    dir: PathBuf,
}

impl CalibrationStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// File path for a resolution's record.
    pub fn record_path(&self, width: u32, height: u32) -> PathBuf {
        self.dir.join(format!("calibration_{}x{}.json", width, height))
    }

    pub fn record_exists(&self, width: u32, height: u32) -> bool {
        self.record_path(width, height).exists()
    }

    /// Persists the model's calibration for its screen resolution.
    pub fn save(&self, model: &CalibrationModel) -> Result<()> {
        let (width, height) = model.screen_size();
        let path = self.record_path(width, height);
        let record = CalibrationRecord::from_model(model);

        self.save_to_path(&path, &record)?;
        log::info!(
            "Saved calibration for {}x{} ({} points) to {:?}",
            width,
            height,
            record.calibration_points.len(),
            path
        );
        Ok(())
    }

    fn save_to_path(&self, path: &Path, record: &CalibrationRecord) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let bytes = serde_json::to_vec_pretty(record)?;

        // Write to a temp file first, then rename (atomic on the same fs)
        let temp_path = path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(&bytes)?;
            file.flush()?;
            // sync_all ensures data is written to disk (portable fsync)
            file.sync_all()?;
        }
        std::fs::rename(&temp_path, path)?;

        log::debug!("Wrote {} bytes to {:?}", bytes.len(), path);
        Ok(())
    }

    /// Loads the record matching the model's resolution into the model.
    ///
    /// Returns the number of restored points. The model is only touched
    /// after the record passes validation.
    pub fn load(&self, model: &mut CalibrationModel) -> Result<usize> {
        let (width, height) = model.screen_size();
        self.load_path(&self.record_path(width, height), model)
    }

    /// Loads an explicit record file into the model.
    pub fn load_path(&self, path: &Path, model: &mut CalibrationModel) -> Result<usize> {
        if !path.exists() {
            return Err(StoreError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let bytes = std::fs::read(path)?;
        let record: CalibrationRecord = serde_json::from_slice(&bytes)?;

        let (width, height) = model.screen_size();
        if record.screen_width != width || record.screen_height != height {
            return Err(StoreError::ResolutionMismatch {
                found_width: record.screen_width,
                found_height: record.screen_height,
                expected_width: width,
                expected_height: height,
            });
        }

        let points = record.to_points();
        let count = points.len();
        model.restore(points);

        log::info!(
            "Loaded calibration for {}x{} ({} points) from {:?}",
            width,
            height,
            count,
            path
        );
        Ok(count)
    }

    /// Removes a resolution's record if present.
    pub fn delete(&self, width: u32, height: u32) -> Result<()> {
        let path = self.record_path(width, height);
        if path.exists() {
            std::fs::remove_file(&path)?;
            log::info!("Deleted calibration record {:?}", path);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn make_sample(x: f32, y: f32, h: f32, v: f32) -> EyeFeatureSample {
        EyeFeatureSample { x, y, h_ratio: h, v_ratio: v }
    }

    fn calibrated_model(width: u32, height: u32) -> CalibrationModel {
        let mut model = CalibrationModel::new(width, height);
        let anchors = [
            (100.0, 100.0, 0.2, 0.2, 150, 150),
            (500.0, 100.0, 0.8, 0.2, 1770, 150),
            (100.0, 400.0, 0.2, 0.8, 150, 930),
            (500.0, 400.0, 0.8, 0.8, 1770, 930),
        ];
        let mut successful = 0;
        for (x, y, h, v, sx, sy) in anchors {
            let samples: Vec<_> = (0..8)
                .map(|i| make_sample(x + i as f32 * 0.5, y - i as f32 * 0.5, h, v))
                .collect();
            if model.add_calibration_point(&samples, sx, sy) {
                successful += 1;
            }
        }
        assert!(model.complete(successful));
        model
    }

    #[test]
    fn test_save_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let store = CalibrationStore::new(temp.path());

        let model = calibrated_model(1920, 1080);
        store.save(&model).unwrap();
        assert!(store.record_exists(1920, 1080));

        let mut restored = CalibrationModel::new(1920, 1080);
        let count = store.load(&mut restored).unwrap();

        assert_eq!(count, 4);
        assert!(restored.is_ready());
        assert_eq!(restored.points(), model.points());

        // The restored model predicts like the original
        let query = make_sample(101.0, 99.0, 0.2, 0.2);
        assert_eq!(restored.predict(&query, 1.0), model.predict(&query, 1.0));
    }

    #[test]
    fn test_save_is_atomic() {
        let temp = TempDir::new().unwrap();
        let store = CalibrationStore::new(temp.path());

        let model = calibrated_model(1920, 1080);
        store.save(&model).unwrap();

        let path = store.record_path(1920, 1080);
        let temp_path = path.with_extension("tmp");
        assert!(path.exists());
        assert!(!temp_path.exists(), "temp file should not survive save");
    }

    #[test]
    fn test_load_missing_record() {
        let temp = TempDir::new().unwrap();
        let store = CalibrationStore::new(temp.path());

        let mut model = CalibrationModel::new(1920, 1080);
        let err = store.load(&mut model).unwrap_err();

        assert!(matches!(err, StoreError::FileNotFound { .. }));
        assert!(err.is_recoverable());
        assert!(!model.is_ready());
    }

    #[test]
    fn test_resolution_mismatch_leaves_model_untouched() {
        let temp = TempDir::new().unwrap();
        let store = CalibrationStore::new(temp.path());

        // A record for a different resolution
        let other = calibrated_model(1280, 720);
        store.save(&other).unwrap();

        let mut model = calibrated_model(1920, 1080);
        let points_before = model.points().to_vec();

        let err = store
            .load_path(&store.record_path(1280, 720), &mut model)
            .unwrap_err();

        assert!(matches!(
            err,
            StoreError::ResolutionMismatch {
                found_width: 1280,
                found_height: 720,
                expected_width: 1920,
                expected_height: 1080,
            }
        ));
        assert!(model.is_ready());
        assert_eq!(model.points(), points_before.as_slice());
    }

    #[test]
    fn test_load_corrupt_record() {
        let temp = TempDir::new().unwrap();
        let store = CalibrationStore::new(temp.path());

        let path = store.record_path(1920, 1080);
        std::fs::write(&path, b"{ not json").unwrap();

        let mut model = CalibrationModel::new(1920, 1080);
        let err = store.load(&mut model).unwrap_err();

        assert!(matches!(err, StoreError::Format(_)));
        assert!(!err.is_recoverable());
        assert!(!model.is_ready());
    }

    #[test]
    fn test_load_sparse_record_restores_but_cannot_predict() {
        let temp = TempDir::new().unwrap();
        let store = CalibrationStore::new(temp.path());

        // A hand-rolled record with too few points for prediction
        let record = CalibrationRecord {
            screen_width: 1920,
            screen_height: 1080,
            calibration_points: vec![
                [100.0, 100.0, 150.0, 150.0, 0.2, 0.2],
                [500.0, 400.0, 1770.0, 930.0, 0.8, 0.8],
            ],
            timestamp: 0.0,
        };
        let path = store.record_path(1920, 1080);
        std::fs::write(&path, serde_json::to_vec_pretty(&record).unwrap()).unwrap();

        let mut model = CalibrationModel::new(1920, 1080);
        assert_eq!(store.load(&mut model).unwrap(), 2);
        assert!(model.is_ready());

        let query = make_sample(100.0, 100.0, 0.2, 0.2);
        assert!(model.predict(&query, 1.0).is_none());
    }

    #[test]
    fn test_delete_record() {
        let temp = TempDir::new().unwrap();
        let store = CalibrationStore::new(temp.path());

        let model = calibrated_model(1920, 1080);
        store.save(&model).unwrap();
        assert!(store.record_exists(1920, 1080));

        store.delete(1920, 1080).unwrap();
        assert!(!store.record_exists(1920, 1080));

        // Deleting again is a no-op
        store.delete(1920, 1080).unwrap();
    }
}
