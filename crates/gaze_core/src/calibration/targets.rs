//! Calibration target layout.
//!
//! Five targets cover the screen: the midpoint plus the four corners
//! pulled inward by a margin. Collection order puts the center first so
//! the subject starts from a natural resting gaze.

use serde::{Deserialize, Serialize};

/// One of the five canonical target positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetPosition {
    Center,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl TargetPosition {
    /// All positions in collection order.
    pub const ALL: [TargetPosition; 5] = [
        TargetPosition::Center,
        TargetPosition::TopLeft,
        TargetPosition::TopRight,
        TargetPosition::BottomLeft,
        TargetPosition::BottomRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TargetPosition::Center => "center",
            TargetPosition::TopLeft => "top-left",
            TargetPosition::TopRight => "top-right",
            TargetPosition::BottomLeft => "bottom-left",
            TargetPosition::BottomRight => "bottom-right",
        }
    }

    /// Screen coordinates of this target for the given resolution.
    pub fn screen_point(&self, width: u32, height: u32, margin: u32) -> (i32, i32) {
        let right = width.saturating_sub(margin) as i32;
        let bottom = height.saturating_sub(margin) as i32;
        let m = margin as i32;

        match self {
            TargetPosition::Center => ((width / 2) as i32, (height / 2) as i32),
            TargetPosition::TopLeft => (m, m),
            TargetPosition::TopRight => (right, m),
            TargetPosition::BottomLeft => (m, bottom),
            TargetPosition::BottomRight => (right, bottom),
        }
    }
}

/// A target placed on a concrete screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationTarget {
    pub position: TargetPosition,
    pub screen_x: i32,
    pub screen_y: i32,
}

/// Lays out the five calibration targets for a resolution.
pub fn calibration_targets(width: u32, height: u32, margin: u32) -> [CalibrationTarget; 5] {
    TargetPosition::ALL.map(|position| {
        let (screen_x, screen_y) = position.screen_point(width, height, margin);
        CalibrationTarget { position, screen_x, screen_y }
    })
}
