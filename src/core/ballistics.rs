//! Closed-form kinematics for ideal projectile motion under constant gravity.
//!
//! Every angle argument is in degrees. Nothing here validates its inputs:
//! the launcher keeps speed and angle in range and gravity always comes from
//! a preset (or a positive CLI value).

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaunchParameters {
    pub speed_mps: f64,
    pub angle_deg: f64,
}

impl LaunchParameters {
    pub fn new(speed_mps: f64, angle_deg: f64) -> Self {
        Self {
            speed_mps,
            angle_deg,
        }
    }
}

pub fn horizontal_position(speed_mps: f64, angle_deg: f64, time_s: f64) -> f64 {
    velocity_x(speed_mps, angle_deg) * time_s
}

pub fn vertical_position(speed_mps: f64, angle_deg: f64, time_s: f64, gravity_mps2: f64) -> f64 {
    let vy0 = speed_mps * angle_deg.to_radians().sin();
    (vy0 * time_s) - (0.5 * gravity_mps2 * time_s * time_s)
}

pub fn velocity_x(speed_mps: f64, angle_deg: f64) -> f64 {
    speed_mps * angle_deg.to_radians().cos()
}

pub fn velocity_y(speed_mps: f64, angle_deg: f64, time_s: f64, gravity_mps2: f64) -> f64 {
    speed_mps * angle_deg.to_radians().sin() - gravity_mps2 * time_s
}

pub fn max_range(speed_mps: f64, angle_deg: f64, gravity_mps2: f64) -> f64 {
    (speed_mps * speed_mps * (2.0 * angle_deg).to_radians().sin()) / gravity_mps2
}

pub fn max_height(speed_mps: f64, angle_deg: f64, gravity_mps2: f64) -> f64 {
    let sin_theta = angle_deg.to_radians().sin();
    (speed_mps * speed_mps * sin_theta * sin_theta) / (2.0 * gravity_mps2)
}

pub fn flight_time(speed_mps: f64, angle_deg: f64, gravity_mps2: f64) -> f64 {
    (2.0 * speed_mps * angle_deg.to_radians().sin()) / gravity_mps2
}

/// Direction of travel in degrees above the horizontal.
pub fn heading_deg(speed_mps: f64, angle_deg: f64, time_s: f64, gravity_mps2: f64) -> f64 {
    let vx = velocity_x(speed_mps, angle_deg);
    let vy = velocity_y(speed_mps, angle_deg, time_s, gravity_mps2);
    vy.atan2(vx).to_degrees()
}

pub fn trajectory_at_time(launch: LaunchParameters, time_s: f64, gravity_mps2: f64) -> (f64, f64) {
    (
        horizontal_position(launch.speed_mps, launch.angle_deg, time_s),
        vertical_position(launch.speed_mps, launch.angle_deg, time_s, gravity_mps2),
    )
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShotSummary {
    pub range_m: f64,
    pub max_height_m: f64,
    pub flight_time_s: f64,
}

impl ShotSummary {
    pub fn compute(launch: LaunchParameters, gravity_mps2: f64) -> Self {
        Self {
            range_m: max_range(launch.speed_mps, launch.angle_deg, gravity_mps2),
            max_height_m: max_height(launch.speed_mps, launch.angle_deg, gravity_mps2),
            flight_time_s: flight_time(launch.speed_mps, launch.angle_deg, gravity_mps2),
        }
    }
}

/// Evenly timed points along the ideal curve, launch and landing included.
pub fn sample_trajectory(
    launch: LaunchParameters,
    gravity_mps2: f64,
    samples: usize,
) -> Vec<(f64, f64)> {
    let time_of_flight_s = flight_time(launch.speed_mps, launch.angle_deg, gravity_mps2).max(0.0);
    let sample_count = samples.max(2);
    (0..=sample_count)
        .map(|i| {
            let t = (i as f64 * time_of_flight_s) / sample_count as f64;
            trajectory_at_time(launch, t, gravity_mps2)
        })
        .collect()
}
