//! # Monitoring Session
//!
//! Drives one analysis session over a stream of tracker frames. Each
//! frame updates the raw counters; smoothed gaze positions, blink
//! events and zone hits accumulate in [`SessionStats`] until the
//! caller asks for metrics, an assessment or a full report.
//!
//! Frames are processed even while the calibration model is not ready:
//! blink and direction counters work without screen mapping, gaze
//! positions simply stay empty.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::motion::MotionAnalyzer;
use crate::analysis::scoring::{score_metrics, AnxietyAssessment};
use crate::analysis::smoother::GazeSmoother;
use crate::analysis::stats::{DirectionCounts, SessionMetrics, SessionStats};
use crate::analysis::zones::ZoneClassifier;
use crate::calibration::CalibrationModel;
use crate::config::TrackerConfig;
use crate::models::{FrameReading, GazeDirection, GazePoint};

/// Serializable end-of-session report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub session_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub duration_seconds: f64,
    pub total_frames: u64,
    pub detected_frames: u64,
    pub gaze_sample_count: usize,
    pub blink_count: u32,
    pub saccade_count: u32,
    pub directions: DirectionCounts,
    pub metrics: SessionMetrics,
    pub assessment: AnxietyAssessment,
}

/// One monitoring session over a calibrated gaze model.
pub struct MonitorSession {
    model: CalibrationModel,
    smoother: GazeSmoother,
    motion: MotionAnalyzer,
    zones: ZoneClassifier,
    stats: SessionStats,
    /// Center membership of the previous gaze point, for look-away edges.
    prev_in_center: Option<bool>,
    config: TrackerConfig,
    session_id: Uuid,
    started_at_utc: DateTime<Utc>,
}

impl MonitorSession {
    pub fn new(model: CalibrationModel) -> Self {
        Self::with_config(model, TrackerConfig::default())
    }

    pub fn with_config(model: CalibrationModel, config: TrackerConfig) -> Self {
        let (width, height) = model.screen_size();
        let session_id = Uuid::new_v4();
        log::info!(
            "Monitoring session {} started ({}x{}, calibrated: {})",
            session_id,
            width,
            height,
            model.is_ready()
        );

        Self {
            model,
            smoother: GazeSmoother::with_config(&config.smoothing),
            motion: MotionAnalyzer::with_config(&config.motion),
            zones: ZoneClassifier::with_config(width, height, &config.zones),
            stats: SessionStats::new(),
            prev_in_center: None,
            session_id,
            started_at_utc: Utc::now(),
            config,
        }
    }

    /// Feeds one frame and returns the smoothed on-screen gaze point,
    /// if the model could map it.
    pub fn process_frame(&mut self, frame: &FrameReading) -> Option<GazePoint> {
        if self.stats.started_at.is_none() {
            self.stats.started_at = Some(frame.timestamp);
        }
        self.stats.frame_count += 1;
        self.stats.last_frame_at = frame.timestamp;

        if frame.pupils_located {
            self.stats.detected_frames += 1;
        }

        if let Some(event) = self.motion.update_blink(frame.is_blinking, frame.timestamp) {
            self.stats.blink_count += 1;
            self.stats.blink_durations.push(event.duration());
        }

        if frame.is_blinking {
            self.stats.directions.blinking += 1;
        } else if let Some(h_ratio) = frame.horizontal_ratio {
            self.stats.directions.record(GazeDirection::from_ratio(h_ratio));
        } else {
            self.stats.directions.unknown += 1;
        }

        let raw = self.model.predict_frame(frame)?;
        let smoothed = self.smoother.smooth(raw);
        self.stats.gaze_points.push(smoothed);

        if let Some(sample) = self.motion.update_position(smoothed) {
            self.stats.velocities.push(sample.velocity_px_s);
            if sample.is_saccade {
                self.stats.saccade_count += 1;
            }
        }

        let hit = self.zones.classify(&smoothed);
        if hit.in_center {
            self.stats.center_count += 1;
            self.stats.center_distance_sum += hit.center_distance;
        }
        if hit.near_edge {
            self.stats.edge_count += 1;
        }
        if self.prev_in_center == Some(true) && !hit.in_center {
            self.stats.look_away_count += 1;
        }
        self.prev_in_center = Some(hit.in_center);

        Some(smoothed)
    }

    /// Derived metrics for the session so far.
    pub fn metrics(&self) -> SessionMetrics {
        SessionMetrics::from_stats(&self.stats, self.config.zones.center_radius_px)
    }

    /// Scores the session so far against the configured rule set.
    pub fn assess(&self) -> AnxietyAssessment {
        score_metrics(&self.metrics(), &self.config.scoring)
    }

    /// Full report for the session so far.
    pub fn report(&self) -> SessionReport {
        SessionReport {
            session_id: self.session_id,
            started_at: self.started_at_utc,
            duration_seconds: self.stats.session_seconds(),
            total_frames: self.stats.frame_count,
            detected_frames: self.stats.detected_frames,
            gaze_sample_count: self.stats.gaze_points.len(),
            blink_count: self.stats.blink_count,
            saccade_count: self.stats.saccade_count,
            directions: self.stats.directions,
            metrics: self.metrics(),
            assessment: self.assess(),
        }
    }

    /// Clears all accumulators and starts a fresh session id.
    pub fn reset(&mut self) {
        self.stats.reset();
        self.smoother.clear();
        self.motion.reset();
        self.prev_in_center = None;
        self.session_id = Uuid::new_v4();
        self.started_at_utc = Utc::now();
        log::info!("Monitoring session reset, new id {}", self.session_id);
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn calibration(&self) -> &CalibrationModel {
        &self.model
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }
}
