//! Median-based outlier rejection for calibration samples.
//!
//! ## Algorithm
//! 1. With fewer than 3 samples there is no meaningful median; the batch
//!    passes through unchanged.
//! 2. Compute the median of the x coordinates and the median of the y
//!    coordinates independently.
//! 3. Keep only samples strictly within the threshold of both medians.
//!
//! The filtered batch can be empty: with a wildly unstable detector no
//! sample may sit near both medians at once. Callers treat that as a
//! failed target.

use crate::models::EyeFeatureSample;

/// Max pixel distance from the batch median for a sample to survive.
pub const OUTLIER_THRESHOLD_PX: f32 = 20.0;

/// Median of a slice. Averages the two middle values for even lengths.
fn median(values: &[f32]) -> f32 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Removes samples whose camera-space position strays from the batch median.
pub fn filter_outliers(samples: &[EyeFeatureSample], threshold_px: f32) -> Vec<EyeFeatureSample> {
    if samples.len() < 3 {
        return samples.to_vec();
    }

    let xs: Vec<f32> = samples.iter().map(|s| s.x).collect();
    let ys: Vec<f32> = samples.iter().map(|s| s.y).collect();
    let median_x = median(&xs);
    let median_y = median(&ys);

    samples
        .iter()
        .filter(|s| (s.x - median_x).abs() < threshold_px && (s.y - median_y).abs() < threshold_px)
        .copied()
        .collect()
}


#[cfg(all(test, feature = "proptest"))]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_sample() -> impl Strategy<Value = EyeFeatureSample> {
        (0.0f32..640.0, 0.0f32..480.0, 0.0f32..1.0, 0.0f32..1.0).prop_map(|(x, y, h, v)| {
            EyeFeatureSample { x, y, h_ratio: h, v_ratio: v }
        })
    }

    proptest! {
        /// Property: every survivor sits within the threshold of both medians.
        #[test]
        fn prop_survivors_near_median(samples in prop::collection::vec(arb_sample(), 3..30)) {
            let xs: Vec<f32> = samples.iter().map(|s| s.x).collect();
            let ys: Vec<f32> = samples.iter().map(|s| s.y).collect();
            let median_x = median(&xs);
            let median_y = median(&ys);

            for s in filter_outliers(&samples, OUTLIER_THRESHOLD_PX) {
                prop_assert!((s.x - median_x).abs() < OUTLIER_THRESHOLD_PX);
                prop_assert!((s.y - median_y).abs() < OUTLIER_THRESHOLD_PX);
            }
        }

        /// Property: filtering never grows the batch.
        #[test]
        fn prop_never_grows(samples in prop::collection::vec(arb_sample(), 0..30)) {
            prop_assert!(filter_outliers(&samples, OUTLIER_THRESHOLD_PX).len() <= samples.len());
        }
    }
}
