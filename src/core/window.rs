//! Physics-space to screen-space mapping for the plot area.

pub const DISTANCE_TO_HEIGHT_RATIO: f64 = 2.0; // x:y data window ratio

const X_PADDING_RATIO: f64 = 0.06;
const Y_PADDING_RATIO: f64 = 0.10;

/// Screen rectangle (pixels, y down) that the physics window is drawn into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl PlotArea {
    pub fn width(&self) -> f64 {
        (self.right - self.left).max(1.0)
    }

    pub fn height(&self) -> f64 {
        (self.bottom - self.top).max(1.0)
    }
}

pub fn fixed_ratio_axis_window(raw_max_x: f64, raw_max_y: f64) -> (f64, f64) {
    let raw_x_span = raw_max_x.max(1.0);
    let raw_y_span = raw_max_y.max(1.0);
    let x_pad = raw_x_span * X_PADDING_RATIO;
    let y_pad = raw_y_span * Y_PADDING_RATIO;

    let mut x_span = (raw_max_x + x_pad).max(1.0);
    let mut y_span = (raw_max_y + y_pad).max(1.0);

    if x_span / y_span < DISTANCE_TO_HEIGHT_RATIO {
        x_span = y_span * DISTANCE_TO_HEIGHT_RATIO;
    } else {
        y_span = x_span / DISTANCE_TO_HEIGHT_RATIO;
    }

    (x_span, y_span)
}

/// Visible physics window that fits the predicted band, the apex and every
/// sample already flown.
pub fn compute_world_window(
    predicted_upper_m: f64,
    apex_height_m: f64,
    samples: &[(f64, f64)],
    max_distance_m: f64,
) -> (f64, f64) {
    let (sample_max_x, sample_max_y) = samples
        .iter()
        .fold((0.0f64, 0.0f64), |(mx, my), &(x, y)| (mx.max(x), my.max(y)));
    let raw_max_x = predicted_upper_m
        .max(sample_max_x)
        .max(max_distance_m)
        .max(1.0);
    let raw_max_y = apex_height_m.max(sample_max_y).max(1.0);
    fixed_ratio_axis_window(raw_max_x, raw_max_y)
}

pub fn world_to_screen(
    world: (f64, f64),
    world_max_x: f64,
    world_max_y: f64,
    area: PlotArea,
) -> (f64, f64) {
    let x = area.left + (world.0 / world_max_x.max(1.0)) * area.width();
    let y = area.bottom - (world.1 / world_max_y.max(1.0)) * area.height();
    (x, y)
}

pub fn screen_to_world(
    screen: (f64, f64),
    world_max_x: f64,
    world_max_y: f64,
    area: PlotArea,
) -> (f64, f64) {
    let world_x = ((screen.0 - area.left) / area.width()) * world_max_x.max(1.0);
    let world_y = ((area.bottom - screen.1) / area.height()) * world_max_y.max(1.0);
    (world_x, world_y)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RulerTick {
    pub value_m: f64,
    pub major: bool,
}

/// Smallest 1/2/5 x 10^k step giving at most `max_ticks` intervals over `span`.
pub fn nice_step(span: f64, max_ticks: usize) -> f64 {
    let span = span.abs().max(1e-9);
    let raw = span / max_ticks.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    [1.0, 2.0, 5.0, 10.0]
        .into_iter()
        .map(|m| m * magnitude)
        .find(|step| *step >= raw)
        .unwrap_or(10.0 * magnitude)
}

/// Minor ticks every `nice_step`, every fifth one major.
pub fn ruler_ticks(world_max: f64, max_ticks: usize) -> Vec<RulerTick> {
    let step = nice_step(world_max, max_ticks);
    let count = (world_max / step).floor() as usize;
    (0..=count)
        .map(|i| RulerTick {
            value_m: i as f64 * step,
            major: i % 5 == 0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const AREA: PlotArea = PlotArea {
        left: 100.0,
        right: 1100.0,
        top: 50.0,
        bottom: 550.0,
    };

    #[test]
    fn window_keeps_two_to_one_ratio() {
        let (x, y) = fixed_ratio_axis_window(255.0, 64.0);
        assert!((x / y - DISTANCE_TO_HEIGHT_RATIO).abs() < 1e-9);
        assert!(x >= 255.0 && y >= 64.0);

        let (x, y) = fixed_ratio_axis_window(10.0, 500.0);
        assert!((x / y - DISTANCE_TO_HEIGHT_RATIO).abs() < 1e-9);
        assert!(y >= 500.0);
    }

    #[test]
    fn window_covers_flown_samples_beyond_prediction() {
        let samples = [(0.0, 0.0), (300.0, 40.0), (420.0, -0.3)];
        let (x, y) = compute_world_window(255.0, 63.8, &samples, 0.0);
        assert!(x >= 420.0);
        assert!(y >= 63.8);
    }

    #[test]
    fn origin_maps_to_bottom_left_and_back() {
        assert_eq!(world_to_screen((0.0, 0.0), 200.0, 100.0, AREA), (100.0, 550.0));
        assert_eq!(world_to_screen((200.0, 100.0), 200.0, 100.0, AREA), (1100.0, 50.0));

        let screen = world_to_screen((37.5, 12.25), 200.0, 100.0, AREA);
        let world = screen_to_world(screen, 200.0, 100.0, AREA);
        assert!((world.0 - 37.5).abs() < 1e-9);
        assert!((world.1 - 12.25).abs() < 1e-9);
    }

    #[test]
    fn steps_snap_to_one_two_five() {
        assert!((nice_step(100.0, 10) - 10.0).abs() < 1e-9);
        assert!((nice_step(130.0, 10) - 20.0).abs() < 1e-9);
        assert!((nice_step(400.0, 10) - 50.0).abs() < 1e-9);
        assert!((nice_step(7.0, 10) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn ruler_marks_every_fifth_tick_major() {
        let ticks = ruler_ticks(100.0, 20);
        assert_eq!(ticks.len(), 21);
        assert!(ticks[0].major && ticks[5].major && ticks[20].major);
        assert!(!ticks[1].major);
        assert_eq!(ticks[20].value_m, 100.0);
    }
}
