use crate::core::ballistics::{LaunchParameters, max_range};

pub const DEFAULT_ERROR_MARGIN: f64 = 0.02;

/// Ideal range with a tolerance band around it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeEstimate {
    pub predicted_m: f64,
    pub lower_m: f64,
    pub upper_m: f64,
}

impl RangeEstimate {
    pub fn compute(launch: LaunchParameters, gravity_mps2: f64, margin_fraction: f64) -> Self {
        let predicted_m = max_range(launch.speed_mps, launch.angle_deg, gravity_mps2);
        Self {
            predicted_m,
            lower_m: predicted_m * (1.0 - margin_fraction),
            upper_m: predicted_m * (1.0 + margin_fraction),
        }
    }

    pub fn margin_m(&self) -> f64 {
        (self.upper_m - self.predicted_m).abs()
    }

    pub fn contains(&self, distance_m: f64) -> bool {
        distance_m >= self.lower_m.min(self.upper_m) && distance_m <= self.upper_m.max(self.lower_m)
    }
}
