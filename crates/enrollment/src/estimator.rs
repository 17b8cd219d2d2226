//! Enrollment estimate heuristic.
//!
//! Base value by course code, scaled by semester, plus Gaussian noise. No
//! historical data is consulted, and the target year does not enter the formula.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use tracing::warn;

pub const MIN_ESTIMATE: i64 = 50;
pub const FALLBACK_ESTIMATE: i64 = 100;
pub const NOISE_STD_DEV: f64 = 10.0;

/// Point estimate with a ±20% display band.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstimateBand {
    pub predicted_enrollment: i64,
    pub lower_bound: i64,
    pub upper_bound: i64,
}

impl EstimateBand {
    pub fn from_prediction(prediction: i64) -> Self {
        let p = prediction as f64;
        Self {
            predicted_enrollment: prediction,
            lower_bound: ((0.8 * p).round() as i64).max(0),
            upper_bound: (1.2 * p).round() as i64,
        }
    }
}

/// Expected value before noise.
pub fn base_enrollment(course: &str, semester: &str) -> f64 {
    let base = if course.contains("BSBA") {
        120.0
    } else if course == "BSCS" || course == "BSIT" {
        80.0
    } else {
        100.0
    };

    if semester == "1" {
        base * 1.1
    } else {
        base * 0.9
    }
}

pub fn estimate(course: &str, year: &str, semester: &str) -> i64 {
    estimate_with_rng(course, year, semester, &mut rand::thread_rng())
}

pub fn estimate_with_rng<R: Rng + ?Sized>(
    course: &str,
    _year: &str,
    semester: &str,
    rng: &mut R,
) -> i64 {
    let normal = match Normal::new(0.0, NOISE_STD_DEV) {
        Ok(n) => n,
        Err(e) => {
            warn!(error = %e, "prediction error");
            return FALLBACK_ESTIMATE;
        }
    };

    let value = (base_enrollment(course, semester) + normal.sample(rng)).round();
    if !value.is_finite() {
        return FALLBACK_ESTIMATE;
    }
    (value as i64).max(MIN_ESTIMATE)
}
