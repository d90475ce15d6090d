//! Screen-zone classification for gaze points.
//!
//! Two zones matter for avoidance scoring: a circular center zone
//! around the screen midpoint, and an edge band along the borders. The
//! zones are judged independently, so on a small screen a point can
//! belong to both.

use crate::config::ZoneConfig;
use crate::models::GazePoint;

/// Radius of the center zone, in pixels.
pub const CENTER_RADIUS_PX: f64 = 200.0;

/// Width of the edge band along each border, in pixels.
pub const EDGE_MARGIN_PX: f64 = 100.0;

/// Zone membership of a single gaze point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneHit {
    pub in_center: bool,
    pub near_edge: bool,
    /// Distance from the screen midpoint, in pixels.
    pub center_distance: f64,
}

/// Classifies gaze points against a fixed screen geometry.
#[derive(Debug, Clone)]
pub struct ZoneClassifier {
    width: f64,
    height: f64,
    center_x: f64,
    center_y: f64,
    center_radius: f64,
    edge_margin: f64,
}

impl ZoneClassifier {
    pub fn new(screen_width: u32, screen_height: u32) -> Self {
        Self::with_config(screen_width, screen_height, &ZoneConfig::default())
    }

    pub fn with_config(screen_width: u32, screen_height: u32, config: &ZoneConfig) -> Self {
        Self {
            width: screen_width as f64,
            height: screen_height as f64,
            center_x: (screen_width / 2) as f64,
            center_y: (screen_height / 2) as f64,
            center_radius: config.center_radius_px,
            edge_margin: config.edge_margin_px,
        }
    }

    pub fn classify(&self, point: &GazePoint) -> ZoneHit {
        let center_distance = self.center_distance(point);
        ZoneHit {
            in_center: center_distance <= self.center_radius,
            near_edge: self.is_near_edge(point),
            center_distance,
        }
    }

    pub fn center_distance(&self, point: &GazePoint) -> f64 {
        let dx = point.x as f64 - self.center_x;
        let dy = point.y as f64 - self.center_y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_in_center(&self, point: &GazePoint) -> bool {
        self.center_distance(point) <= self.center_radius
    }

    pub fn is_near_edge(&self, point: &GazePoint) -> bool {
        let x = point.x as f64;
        let y = point.y as f64;
        x <= self.edge_margin
            || x >= self.width - self.edge_margin
            || y <= self.edge_margin
            || y >= self.height - self.edge_margin
    }

    pub fn center_radius(&self) -> f64 {
        self.center_radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> GazePoint {
        GazePoint::new(x, y, 0.0)
    }

    fn classifier() -> ZoneClassifier {
        ZoneClassifier::new(1920, 1080)
    }

    #[test]
    fn test_midpoint_is_center_not_edge() {
        let hit = classifier().classify(&p(960, 540));
        assert!(hit.in_center);
        assert!(!hit.near_edge);
        assert_eq!(hit.center_distance, 0.0);
    }

    #[test]
    fn test_center_boundary_is_inclusive() {
        let zones = classifier();

        // Exactly 200 px right of the midpoint
        let on_boundary = zones.classify(&p(1160, 540));
        assert_eq!(on_boundary.center_distance, 200.0);
        assert!(on_boundary.in_center);

        assert!(!zones.is_in_center(&p(1161, 540)));
    }

    #[test]
    fn test_edge_band_boundaries_are_inclusive() {
        let zones = classifier();

        assert!(zones.is_near_edge(&p(100, 540)));
        assert!(!zones.is_near_edge(&p(101, 540)));

        assert!(zones.is_near_edge(&p(1820, 540)));
        assert!(!zones.is_near_edge(&p(1819, 540)));

        assert!(zones.is_near_edge(&p(960, 100)));
        assert!(!zones.is_near_edge(&p(960, 101)));

        assert!(zones.is_near_edge(&p(960, 980)));
        assert!(!zones.is_near_edge(&p(960, 979)));
    }

    #[test]
    fn test_corner_is_edge_not_center() {
        let hit = classifier().classify(&p(0, 0));
        assert!(hit.near_edge);
        assert!(!hit.in_center);
    }

    #[test]
    fn test_zones_overlap_on_small_screens() {
        // On a 300x300 screen the 200 px center circle reaches into the
        // 100 px edge band
        let zones = ZoneClassifier::new(300, 300);
        let hit = zones.classify(&p(50, 150));

        assert_eq!(hit.center_distance, 100.0);
        assert!(hit.in_center);
        assert!(hit.near_edge);
    }

    #[test]
    fn test_custom_config_overrides_geometry() {
        let config = ZoneConfig {
            center_radius_px: 50.0,
            edge_margin_px: 10.0,
        };
        let zones = ZoneClassifier::with_config(1920, 1080, &config);

        assert!(!zones.is_in_center(&p(1060, 540)));
        assert!(!zones.is_near_edge(&p(100, 540)));
        assert!(zones.is_near_edge(&p(10, 540)));
        assert_eq!(zones.center_radius(), 50.0);
    }
}
