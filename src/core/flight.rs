use tracing::{debug, info};

use crate::core::ballistics::{
    LaunchParameters, heading_deg, horizontal_position, velocity_x, velocity_y, vertical_position,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlightPhase {
    Idle,
    Flying,
    Landed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    Skipped,
    Flying,
    Landed,
}

/// One arrow from release to landing.
///
/// Positions are stored in physics space (metres, y up). Gravity is captured
/// at fire time so changing the preset mid-flight cannot bend a shot that is
/// already in the air.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectileFlight {
    launch: LaunchParameters,
    gravity_mps2: f64,
    elapsed_s: f64,
    phase: FlightPhase,
    samples: Vec<(f64, f64)>,
    origin: (f64, f64),
    max_samples: Option<usize>,
}

impl ProjectileFlight {
    pub fn new(origin: (f64, f64), max_samples: Option<usize>) -> Self {
        Self {
            launch: LaunchParameters::new(0.0, 0.0),
            gravity_mps2: 0.0,
            elapsed_s: 0.0,
            phase: FlightPhase::Idle,
            samples: vec![origin],
            origin,
            max_samples: max_samples.map(|max| max.max(2)),
        }
    }

    pub fn phase(&self) -> FlightPhase {
        self.phase
    }

    pub fn is_flying(&self) -> bool {
        self.phase == FlightPhase::Flying
    }

    pub fn launch(&self) -> LaunchParameters {
        self.launch
    }

    pub fn gravity_mps2(&self) -> f64 {
        self.gravity_mps2
    }

    pub fn elapsed_s(&self) -> f64 {
        self.elapsed_s
    }

    pub fn samples(&self) -> &[(f64, f64)] {
        &self.samples
    }

    pub fn origin(&self) -> (f64, f64) {
        self.origin
    }

    /// Starts a shot. Returns `false` and changes nothing while a shot is in the air.
    pub fn fire(&mut self, launch: LaunchParameters, gravity_mps2: f64) -> bool {
        if self.is_flying() {
            debug!("fire ignored: arrow already in flight");
            return false;
        }

        self.launch = launch;
        self.gravity_mps2 = gravity_mps2;
        self.elapsed_s = 0.0;
        self.samples.clear();
        self.samples.push(self.origin);
        self.phase = FlightPhase::Flying;
        info!(
            speed_mps = launch.speed_mps,
            angle_deg = launch.angle_deg,
            gravity_mps2,
            "arrow fired"
        );
        true
    }

    pub fn advance(&mut self, dt: f64) -> StepOutcome {
        if !self.is_flying() || !dt.is_finite() || dt <= 0.0 {
            return StepOutcome::Skipped;
        }

        self.elapsed_s += dt;
        let x = self.origin.0
            + horizontal_position(self.launch.speed_mps, self.launch.angle_deg, self.elapsed_s);
        let y = self.origin.1
            + vertical_position(
                self.launch.speed_mps,
                self.launch.angle_deg,
                self.elapsed_s,
                self.gravity_mps2,
            );
        self.push_sample((x, y));

        // The overshooting sample stays as the final point; no interpolation.
        if y <= 0.0 {
            self.phase = FlightPhase::Landed;
            info!(
                distance_m = x - self.origin.0,
                elapsed_s = self.elapsed_s,
                "arrow landed"
            );
            return StepOutcome::Landed;
        }

        StepOutcome::Flying
    }

    pub fn reset(&mut self) {
        self.phase = FlightPhase::Idle;
        self.elapsed_s = 0.0;
        self.samples.clear();
        self.samples.push(self.origin);
    }

    pub fn position(&self) -> (f64, f64) {
        self.samples.last().copied().unwrap_or(self.origin)
    }

    pub fn distance_m(&self) -> f64 {
        self.position().0 - self.origin.0
    }

    pub fn velocity(&self) -> (f64, f64) {
        (
            velocity_x(self.launch.speed_mps, self.launch.angle_deg),
            velocity_y(
                self.launch.speed_mps,
                self.launch.angle_deg,
                self.elapsed_s,
                self.gravity_mps2,
            ),
        )
    }

    pub fn heading_deg(&self) -> f64 {
        heading_deg(
            self.launch.speed_mps,
            self.launch.angle_deg,
            self.elapsed_s,
            self.gravity_mps2,
        )
    }

    /// Index of the highest sample; splits the path into its rising and falling halves.
    pub fn apex_index(&self) -> usize {
        self.samples
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |(best_idx, best_y), (idx, &(_, y))| {
                if y > best_y { (idx, y) } else { (best_idx, best_y) }
            })
            .0
    }

    fn push_sample(&mut self, sample: (f64, f64)) {
        self.samples.push(sample);
        if let Some(max) = self.max_samples {
            let overflow = self.samples.len().saturating_sub(max);
            if overflow > 0 {
                self.samples.drain(..overflow);
            }
        }
    }
}
