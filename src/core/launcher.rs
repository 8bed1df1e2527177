use crate::core::ballistics::LaunchParameters;

pub const MIN_ANGLE_DEG: f64 = 0.0;
pub const MAX_ANGLE_DEG: f64 = 90.0;
pub const MIN_STRENGTH: f64 = 10.0;
pub const MAX_STRENGTH: f64 = 100.0;

/// Bow aim. Draw strength doubles as the arrow's initial speed in m/s.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Launcher {
    angle_deg: f64,
    strength: f64,
}

impl Launcher {
    pub fn new(angle_deg: f64, strength: f64) -> Self {
        let mut launcher = Self {
            angle_deg: 45.0,
            strength: 50.0,
        };
        launcher.set_angle(angle_deg);
        launcher.set_strength(strength);
        launcher
    }

    pub fn angle_deg(&self) -> f64 {
        self.angle_deg
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    pub fn launch_parameters(&self) -> LaunchParameters {
        LaunchParameters::new(self.strength, self.angle_deg)
    }

    pub fn adjust_angle(&mut self, delta: f64) {
        self.set_angle(self.angle_deg + delta);
    }

    pub fn adjust_strength(&mut self, delta: f64) {
        self.set_strength(self.strength + delta);
    }

    pub fn set_angle(&mut self, angle_deg: f64) {
        if angle_deg.is_nan() {
            return;
        }
        self.angle_deg = angle_deg.clamp(MIN_ANGLE_DEG, MAX_ANGLE_DEG);
    }

    pub fn set_strength(&mut self, strength: f64) {
        if strength.is_nan() {
            return;
        }
        self.strength = strength.clamp(MIN_STRENGTH, MAX_STRENGTH);
    }
}

impl Default for Launcher {
    fn default() -> Self {
        Self::new(45.0, 50.0)
    }
}
