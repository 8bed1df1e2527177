use std::env;
use std::io::{self, Write};
use std::path::PathBuf;

use chrono::Local;
use parabolic_archery::core::ballistics::{ShotSummary, sample_trajectory};
use parabolic_archery::core::flight::{ProjectileFlight, StepOutcome};
use parabolic_archery::core::gravity::GravityPreset;
use parabolic_archery::core::launcher::Launcher;
use parabolic_archery::core::plot::{PlotError, ShotPlot, render_shot_png};
use parabolic_archery::core::range::{DEFAULT_ERROR_MARGIN, RangeEstimate};
use thiserror::Error;

const STEP_S: f64 = 1.0 / 60.0;
const PLOT_SIZE: (u32, u32) = (1200, 600);
const CURVE_SAMPLES: usize = 240;
const MAX_SIM_TIME_S: f64 = 600.0;

#[derive(Debug, Error)]
enum CliError {
    #[error("Invalid {label}: '{value}'. Expected a number.")]
    InvalidNumber { label: &'static str, value: String },
    #[error("Invalid gravity: '{0}'. Use earth, moon, mars or a positive number.")]
    InvalidGravity(String),
    #[error("{0}")]
    Usage(String),
    #[error("Could not read input: {0}")]
    Io(#[from] io::Error),
    #[error("Input ended unexpectedly (EOF).")]
    Eof,
    #[error(transparent)]
    Plot(#[from] PlotError),
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Inputs {
    angle_deg: f64,
    speed_mps: f64,
    gravity_mps2: f64,
}

#[derive(Debug, PartialEq)]
struct Options {
    inputs: Option<Inputs>,
    plot: Option<PathBuf>,
}

fn parse_f64(value: &str, label: &'static str) -> Result<f64, CliError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CliError::InvalidNumber {
            label,
            value: value.to_string(),
        })
}

fn parse_gravity(value: &str) -> Result<f64, CliError> {
    if let Some(preset) = GravityPreset::from_name(value) {
        return Ok(preset.gravity_mps2());
    }
    match value.trim().parse::<f64>() {
        Ok(g) if g.is_finite() && g > 0.0 => Ok(g),
        _ => Err(CliError::InvalidGravity(value.to_string())),
    }
}

fn read_line(prompt: &str) -> Result<String, CliError> {
    print!("{prompt}");
    io::stdout().flush()?;

    let mut line = String::new();
    let bytes = io::stdin().read_line(&mut line)?;
    if bytes == 0 {
        return Err(CliError::Eof);
    }
    Ok(line)
}

fn read_f64(prompt: &str, label: &'static str) -> Result<f64, CliError> {
    loop {
        match parse_f64(&read_line(prompt)?, label) {
            Ok(v) => return Ok(v),
            Err(_) => eprintln!("Please enter a valid number (e.g., 45 or 12.5)."),
        }
    }
}

fn get_inputs_from_user() -> Result<Inputs, CliError> {
    let angle_deg = read_f64("Angle (degrees): ", "angle")?;
    let speed_mps = read_f64("Velocity (m/s): ", "velocity")?;
    let gravity_mps2 = loop {
        let line = read_line("Gravity (earth/moon/mars or m/s^2, blank for earth): ")?;
        if line.trim().is_empty() {
            break GravityPreset::Earth.gravity_mps2();
        }
        match parse_gravity(&line) {
            Ok(g) => break g,
            Err(err) => eprintln!("{err}"),
        }
    };
    Ok(Inputs {
        angle_deg,
        speed_mps,
        gravity_mps2,
    })
}

fn parse_args(args: &[String]) -> Result<Options, CliError> {
    let mut positional = Vec::new();
    let mut plot = None;
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--plot" {
            let path = iter
                .next()
                .ok_or_else(|| CliError::Usage("--plot needs an output path.".to_string()))?;
            plot = Some(PathBuf::from(path));
        } else {
            positional.push(arg.as_str());
        }
    }

    let inputs = match positional.as_slice() {
        [] => None,
        [angle, speed] => Some(Inputs {
            angle_deg: parse_f64(angle, "angle")?,
            speed_mps: parse_f64(speed, "velocity")?,
            gravity_mps2: GravityPreset::Earth.gravity_mps2(),
        }),
        [angle, speed, gravity] => Some(Inputs {
            angle_deg: parse_f64(angle, "angle")?,
            speed_mps: parse_f64(speed, "velocity")?,
            gravity_mps2: parse_gravity(gravity)?,
        }),
        _ => {
            return Err(CliError::Usage(
                "Expected 2 or 3 arguments: <angle_deg> <velocity_mps> [gravity].".to_string(),
            ));
        }
    };

    Ok(Options { inputs, plot })
}

struct Report {
    angle_deg: f64,
    speed_mps: f64,
    gravity_mps2: f64,
    summary: ShotSummary,
    estimate: RangeEstimate,
    simulated_range_m: f64,
    simulated_time_s: f64,
    landed: bool,
    samples: Vec<(f64, f64)>,
}

/// Origin plus one sample per step up to the time limit.
fn sample_cap() -> usize {
    (MAX_SIM_TIME_S / STEP_S).ceil() as usize + 2
}

fn simulate(inputs: Inputs) -> Report {
    // Same limits the bow enforces in the interactive view.
    let launcher = Launcher::new(inputs.angle_deg, inputs.speed_mps);
    let launch = launcher.launch_parameters();

    let mut flight = ProjectileFlight::new((0.0, 0.0), Some(sample_cap()));
    flight.fire(launch, inputs.gravity_mps2);
    let mut outcome = StepOutcome::Flying;
    while outcome == StepOutcome::Flying && flight.elapsed_s() < MAX_SIM_TIME_S {
        outcome = flight.advance(STEP_S);
    }
    let landed = outcome == StepOutcome::Landed;
    if !landed {
        tracing::warn!(
            elapsed_s = flight.elapsed_s(),
            flight_time_s = ShotSummary::compute(launch, inputs.gravity_mps2).flight_time_s,
            "simulation stopped before landing"
        );
    }

    Report {
        angle_deg: launch.angle_deg,
        speed_mps: launch.speed_mps,
        gravity_mps2: inputs.gravity_mps2,
        summary: ShotSummary::compute(launch, inputs.gravity_mps2),
        estimate: RangeEstimate::compute(launch, inputs.gravity_mps2, DEFAULT_ERROR_MARGIN),
        simulated_range_m: flight.distance_m(),
        simulated_time_s: flight.elapsed_s(),
        landed,
        samples: flight.samples().to_vec(),
    }
}

fn print_report(report: &Report) {
    println!("\nShot report ({})", Local::now().format("%Y-%m-%d %H:%M:%S"));
    println!(
        "Angle: {:.1} deg | Velocity: {:.1} m/s | Gravity: {:.2} m/s^2",
        report.angle_deg, report.speed_mps, report.gravity_mps2
    );
    println!("Range R = v0^2*sin(2θ)/g: {:.3} m", report.summary.range_m);
    println!("Max height H = v0^2*sin^2(θ)/(2g): {:.3} m", report.summary.max_height_m);
    println!("Time of flight T = 2*v0*sin(θ)/g: {:.3} s", report.summary.flight_time_s);
    println!(
        "Expected band (±{:.0}%): [{:.2} - {:.2}] m",
        DEFAULT_ERROR_MARGIN * 100.0,
        report.estimate.lower_m,
        report.estimate.upper_m
    );
    if report.landed {
        println!(
            "Simulated landing (dt = 1/60 s): {:.3} m after {:.3} s (difference {:+.3} m)",
            report.simulated_range_m,
            report.simulated_time_s,
            report.simulated_range_m - report.summary.range_m
        );
    } else {
        println!(
            "Simulated arrow did not land within {MAX_SIM_TIME_S:.0} s (still airborne at x = {:.3} m)",
            report.simulated_range_m
        );
    }
}

fn print_usage(program: &str) {
    println!("Usage:");
    println!("  {program}");
    println!("  {program} <angle_deg> <velocity_mps> [gravity] [--plot <file.png>]");
    println!();
    println!("Gravity is earth (default), moon, mars or a value in m/s^2.");
    println!();
    println!("Examples:");
    println!("  {program} 45 50");
    println!("  {program} 30 80 moon --plot shot.png");
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let json = matches!(env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(io::stderr)
            .compact()
            .init();
    }
}

fn run() -> Result<(), CliError> {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "-h" || a == "--help") {
        print_usage(&args[0]);
        return Ok(());
    }

    let options = parse_args(&args)?;
    let inputs = match options.inputs {
        Some(inputs) => inputs,
        None => get_inputs_from_user()?,
    };

    let report = simulate(inputs);
    print_report(&report);

    if let Some(path) = options.plot {
        let launch = Launcher::new(report.angle_deg, report.speed_mps).launch_parameters();
        let ideal = sample_trajectory(launch, report.gravity_mps2, CURVE_SAMPLES);
        render_shot_png(
            &path,
            &ShotPlot {
                ideal: &ideal,
                simulated: &report.samples,
                estimate: report.estimate,
                apex_height_m: report.summary.max_height_m,
            },
            PLOT_SIZE,
        )?;
        tracing::info!(path = %path.display(), "trajectory plot written");
        println!("Plot written to {}", path.display());
    }

    Ok(())
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        print_usage("cargo run --");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{
        CliError, Inputs, MAX_SIM_TIME_S, STEP_S, parse_args, parse_gravity, sample_cap, simulate,
    };

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual={actual}, expected={expected}, tolerance={tolerance}"
        );
    }

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("parabolic_archery")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn parses_angle_speed_and_preset() {
        let options = parse_args(&args(&["30", "80", "moon", "--plot", "out.png"]))
            .expect("valid arguments");
        let inputs = options.inputs.expect("inputs");

        assert_eq!(inputs.angle_deg, 30.0);
        assert_eq!(inputs.speed_mps, 80.0);
        assert_eq!(inputs.gravity_mps2, 1.62);
        assert_eq!(options.plot.as_deref(), Some(std::path::Path::new("out.png")));
    }

    #[test]
    fn no_arguments_means_interactive() {
        let options = parse_args(&args(&[])).expect("valid arguments");
        assert!(options.inputs.is_none());
        assert!(options.plot.is_none());
    }

    #[test]
    fn rejects_bad_numbers_and_gravity() {
        assert!(matches!(
            parse_args(&args(&["abc", "50"])),
            Err(CliError::InvalidNumber { label: "angle", .. })
        ));
        assert!(matches!(parse_gravity("-9.8"), Err(CliError::InvalidGravity(_))));
        assert!(matches!(parse_gravity("pluto"), Err(CliError::InvalidGravity(_))));
        assert!(matches!(
            parse_args(&args(&["1", "2", "3", "4"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            parse_args(&args(&["45", "50", "--plot"])),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn simulated_landing_is_close_to_closed_form() {
        let report = simulate(Inputs {
            angle_deg: 45.0,
            speed_mps: 50.0,
            gravity_mps2: 9.8,
        });

        assert_close(report.summary.range_m, 255.10, 0.005);
        assert_close(report.simulated_range_m, report.summary.range_m, 1.0);
        assert_close(report.simulated_time_s, report.summary.flight_time_s, 1.0 / 60.0);
    }

    #[test]
    fn weak_gravity_stops_at_the_time_limit() {
        let report = simulate(Inputs {
            angle_deg: 45.0,
            speed_mps: 50.0,
            gravity_mps2: 1e-3,
        });

        assert!(!report.landed);
        assert!(report.summary.flight_time_s > MAX_SIM_TIME_S);
        assert!(report.simulated_time_s <= MAX_SIM_TIME_S + STEP_S);
        assert!(report.samples.len() <= sample_cap());
        assert!(report.simulated_range_m > 0.0);
    }

    #[test]
    fn long_moon_shot_keeps_its_whole_path() {
        let report = simulate(Inputs {
            angle_deg: 90.0,
            speed_mps: 100.0,
            gravity_mps2: 1.62,
        });

        assert!(report.landed);
        assert_eq!(report.samples[0], (0.0, 0.0));
        assert_close(report.simulated_time_s, report.summary.flight_time_s, STEP_S);
    }

    #[test]
    fn out_of_range_inputs_are_clamped_like_the_bow() {
        let report = simulate(Inputs {
            angle_deg: 120.0,
            speed_mps: 500.0,
            gravity_mps2: 3.7,
        });

        assert_eq!(report.angle_deg, 90.0);
        assert_eq!(report.speed_mps, 100.0);
    }
}
