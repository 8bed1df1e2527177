use macroquad::prelude::*;
use parabolic_archery::core::flight::ProjectileFlight;
use parabolic_archery::core::range::RangeEstimate;
use parabolic_archery::core::window::{PlotArea, ruler_ticks, world_to_screen};

use crate::constants::{
    ARROW_LENGTH_PX, BAND_COLOR, BOW_HALF_HEIGHT_PX, BOW_STRING_PX, DISTANCE_RULER_TICKS,
    FALLING_COLOR, GROUND_COLOR, HEIGHT_RULER_TICKS, RISING_COLOR, RULER_THICKNESS, SKY_COLOR,
    STRING_COLOR, WOOD_COLOR,
};

/// Physics window currently mapped onto the plot area.
#[derive(Clone, Copy)]
pub(crate) struct View {
    pub(crate) area: PlotArea,
    pub(crate) world_max_x: f64,
    pub(crate) world_max_y: f64,
}

impl View {
    pub(crate) fn to_screen(&self, world: (f64, f64)) -> Vec2 {
        let (x, y) = world_to_screen(world, self.world_max_x, self.world_max_y, self.area);
        vec2(x as f32, y as f32)
    }

    fn left(&self) -> f32 {
        self.area.left as f32
    }

    fn right(&self) -> f32 {
        self.area.right as f32
    }

    fn top(&self) -> f32 {
        self.area.top as f32
    }

    fn bottom(&self) -> f32 {
        self.area.bottom as f32
    }
}

fn format_meters(value: f64, step: f64) -> String {
    if step >= 1.0 {
        format!("{value:.0}m")
    } else {
        format!("{value:.1}m")
    }
}

pub(crate) fn draw_ui_text(
    text: &str,
    x: f32,
    y: f32,
    font_size: u16,
    color: Color,
    font: Option<&Font>,
) {
    draw_text_ex(
        text,
        x,
        y,
        TextParams {
            font,
            font_size,
            color,
            ..Default::default()
        },
    );
}

pub(crate) fn draw_backdrop(view: &View, screen_w: f32, screen_h: f32) {
    clear_background(SKY_COLOR);
    draw_rectangle(
        0.0,
        view.bottom(),
        screen_w,
        screen_h - view.bottom(),
        GROUND_COLOR,
    );
}

pub(crate) fn draw_grid(view: &View, font: Option<&Font>) {
    let grid_color = Color::new(1.0, 1.0, 1.0, 0.55);
    let x_ticks = ruler_ticks(view.world_max_x, DISTANCE_RULER_TICKS / 4);
    let step_x = x_ticks.get(1).map_or(1.0, |t| t.value_m);
    for tick in x_ticks.iter().skip(1) {
        let p = view.to_screen((tick.value_m, 0.0));
        draw_line(p.x, view.top(), p.x, view.bottom(), 1.0, grid_color);
        draw_ui_text(
            &format_meters(tick.value_m, step_x),
            p.x - 15.0,
            view.bottom() - 6.0,
            14,
            WHITE,
            font,
        );
    }
    for tick in ruler_ticks(view.world_max_y, HEIGHT_RULER_TICKS / 4).iter().skip(1) {
        let p = view.to_screen((0.0, tick.value_m));
        draw_line(view.left(), p.y, view.right(), p.y, 1.0, grid_color);
    }
}

/// Ground texture: short marks for minor ticks, long ones for majors.
pub(crate) fn draw_ground_marks(view: &View) {
    for tick in ruler_ticks(view.world_max_x, DISTANCE_RULER_TICKS) {
        let p = view.to_screen((tick.value_m, 0.0));
        let (length, color) = if tick.major {
            (18.0, Color::from_rgba(20, 80, 20, 255))
        } else {
            (6.0, Color::from_rgba(45, 150, 45, 255))
        };
        draw_line(p.x, view.bottom(), p.x, view.bottom() + length, 1.0, color);
    }
}

pub(crate) fn draw_distance_ruler(view: &View, y: f32, font: Option<&Font>) {
    draw_rectangle(
        view.left(),
        y,
        view.right() - view.left(),
        RULER_THICKNESS,
        Color::from_rgba(50, 50, 50, 255),
    );
    let ticks = ruler_ticks(view.world_max_x, DISTANCE_RULER_TICKS);
    let step = ticks.get(1).map_or(1.0, |t| t.value_m);
    for tick in &ticks {
        let p = view.to_screen((tick.value_m, 0.0));
        if tick.major {
            draw_line(p.x, y, p.x, y + RULER_THICKNESS, 2.0, WHITE);
            draw_ui_text(
                &format_meters(tick.value_m, step),
                p.x - 12.0,
                y + RULER_THICKNESS + 16.0,
                14,
                WHITE,
                font,
            );
        } else {
            draw_line(p.x, y, p.x, y + RULER_THICKNESS * 0.5, 1.0, LIGHTGRAY);
        }
    }
}

pub(crate) fn draw_height_ruler(view: &View, font: Option<&Font>) {
    let x = view.left() - RULER_THICKNESS - 40.0;
    draw_rectangle(
        x,
        view.top(),
        RULER_THICKNESS,
        view.bottom() - view.top(),
        Color::from_rgba(50, 50, 50, 255),
    );
    let ticks = ruler_ticks(view.world_max_y, HEIGHT_RULER_TICKS);
    let step = ticks.get(1).map_or(1.0, |t| t.value_m);
    for tick in &ticks {
        let p = view.to_screen((0.0, tick.value_m));
        if tick.major {
            draw_line(x, p.y, x + RULER_THICKNESS, p.y, 2.0, WHITE);
            draw_ui_text(
                &format_meters(tick.value_m, step),
                x + RULER_THICKNESS + 4.0,
                p.y + 4.0,
                14,
                WHITE,
                font,
            );
        } else {
            draw_line(x, p.y, x + RULER_THICKNESS * 0.5, p.y, 1.0, LIGHTGRAY);
        }
    }
}

pub(crate) fn draw_range_band(view: &View, estimate: &RangeEstimate) {
    let lower = view.to_screen((estimate.lower_m.max(0.0), 0.0));
    let upper = view.to_screen((estimate.upper_m.max(0.0), 0.0));
    draw_rectangle(
        lower.x,
        view.bottom() - 8.0,
        (upper.x - lower.x).max(2.0),
        16.0,
        BAND_COLOR,
    );
    let predicted = view.to_screen((estimate.predicted_m.max(0.0), 0.0));
    draw_line(
        predicted.x,
        view.bottom() - 14.0,
        predicted.x,
        view.bottom() + 14.0,
        2.0,
        DARKGREEN,
    );
}

pub(crate) fn draw_max_distance_marker(view: &View, max_distance_m: f64) {
    if max_distance_m <= 0.0 {
        return;
    }
    let p = view.to_screen((max_distance_m, 0.0));
    draw_triangle(
        vec2(p.x, view.bottom() - 2.0),
        vec2(p.x - 7.0, view.bottom() - 16.0),
        vec2(p.x + 7.0, view.bottom() - 16.0),
        RED,
    );
}

pub(crate) fn draw_path(points: &[(f64, f64)], view: &View, thickness: f32, color: Color) {
    if points.len() < 2 {
        return;
    }
    let mut prev = view.to_screen(points[0]);
    for point in points.iter().skip(1).copied() {
        let cur = view.to_screen(point);
        draw_line(prev.x, prev.y, cur.x, cur.y, thickness, color);
        prev = cur;
    }
}

/// Rising part in red, falling part in blue, split at the highest sample.
pub(crate) fn draw_trajectory(flight: &ProjectileFlight, view: &View) {
    let samples = flight.samples();
    if samples.len() < 2 {
        return;
    }
    let apex = flight.apex_index();
    draw_path(&samples[..=apex], view, 2.0, RISING_COLOR);
    draw_path(&samples[apex..], view, 2.0, FALLING_COLOR);
}

pub(crate) fn draw_bow(origin: Vec2, angle_deg: f64) {
    let aim = (angle_deg as f32).to_radians();
    let dir = vec2(aim.cos(), -aim.sin());
    let across = vec2(-dir.y, dir.x);

    let top_tip = origin + across * BOW_HALF_HEIGHT_PX;
    let bottom_tip = origin - across * BOW_HALF_HEIGHT_PX;
    let belly = origin + dir * (BOW_HALF_HEIGHT_PX * 0.45);

    // Quadratic limb from tip to tip through the belly.
    let segments = 16;
    let mut prev = top_tip;
    for i in 1..=segments {
        let t = i as f32 / segments as f32;
        let u = 1.0 - t;
        let point = top_tip * (u * u) + belly * (2.0 * u * t) + bottom_tip * (t * t);
        draw_line(prev.x, prev.y, point.x, point.y, 5.0, WOOD_COLOR);
        prev = point;
    }
    draw_line(
        top_tip.x,
        top_tip.y,
        bottom_tip.x,
        bottom_tip.y,
        1.5,
        STRING_COLOR,
    );

    let aim_end = origin + dir * BOW_STRING_PX;
    draw_line(origin.x, origin.y, aim_end.x, aim_end.y, 2.0, STRING_COLOR);
}

pub(crate) fn draw_arrow(flight: &ProjectileFlight, view: &View) {
    let tail = view.to_screen(flight.position());
    if !flight.is_flying() {
        draw_circle(tail.x, tail.y, 5.0, Color::from_rgba(100, 100, 100, 255));
        return;
    }

    let heading = (flight.heading_deg() as f32).to_radians();
    let dir = vec2(heading.cos(), -heading.sin());
    let head = tail + dir * ARROW_LENGTH_PX;
    draw_line(tail.x, tail.y, head.x, head.y, 3.0, BLACK);

    let back = head - dir * 10.0;
    let side = vec2(-dir.y, dir.x) * 4.0;
    draw_triangle(head, back + side, back - side, BLACK);
}
