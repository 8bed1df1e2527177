use macroquad::prelude::*;
use parabolic_archery::core::ballistics::ShotSummary;
use parabolic_archery::core::entry::{EditField, format_committed};
use parabolic_archery::core::flight::FlightPhase;
use parabolic_archery::core::session::{ControlMode, Session};

use crate::constants::{
    FORMULA_COLOR, FORMULA_PANEL_W, INFO_PANEL_H, INFO_PANEL_W, NOTE_COLOR, PANEL_BORDER,
    PANEL_COLOR, PANEL_MARGIN,
};
use crate::input::field_rect;
use crate::render::draw_ui_text;

pub(crate) fn phase_text(phase: FlightPhase) -> &'static str {
    match phase {
        FlightPhase::Idle => "Ready",
        FlightPhase::Flying => "In flight",
        FlightPhase::Landed => "Landed",
    }
}

fn draw_panel(x: f32, y: f32, w: f32, h: f32) {
    draw_rectangle(x, y, w, h, PANEL_COLOR);
    draw_rectangle_lines(x, y, w, h, 2.0, PANEL_BORDER);
}

fn draw_field(session: &Session, field: EditField, font: Option<&Font>) {
    let rect = field_rect(field);
    let (text, active) = match session.mode() {
        ControlMode::Editing(entry) if entry.field() == field => (entry.text().to_string(), true),
        _ => {
            let committed = match field {
                EditField::Angle => session.launcher().angle_deg(),
                EditField::Strength => session.launcher().strength(),
            };
            (format_committed(committed), false)
        }
    };

    draw_rectangle(rect.x, rect.y, rect.w, rect.h, WHITE);
    if active {
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 2.0, BLUE);
    } else {
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 1.0, LIGHTGRAY);
    }
    draw_ui_text(&text, rect.x + 6.0, rect.y + rect.h - 7.0, 20, BLACK, font);
    if active && (get_time() * 2.0) as i64 % 2 == 0 {
        let caret_x = rect.x + 8.0 + measure_text(&text, font, 20, 1.0).width;
        draw_line(
            caret_x,
            rect.y + 5.0,
            caret_x,
            rect.y + rect.h - 5.0,
            1.5,
            BLACK,
        );
    }
}

pub(crate) fn draw_info_panel(session: &Session, font: Option<&Font>) {
    let x = PANEL_MARGIN;
    let y = PANEL_MARGIN;
    draw_panel(x, y, INFO_PANEL_W, INFO_PANEL_H);
    draw_ui_text("Parameters", x + 5.0, y + 22.0, 22, BLACK, font);

    draw_ui_text("Angle (deg):", x + 5.0, field_rect(EditField::Angle).y + 19.0, 18, BLACK, font);
    draw_ui_text(
        "Speed (m/s):",
        x + 5.0,
        field_rect(EditField::Strength).y + 19.0,
        18,
        BLACK,
        font,
    );
    draw_field(session, EditField::Angle, font);
    draw_field(session, EditField::Strength, font);

    let gravity = session.gravity();
    let estimate = session.range_estimate();
    let flight = session.flight();
    let lines = [
        (
            format!("Gravity: {} {:.2} m/s^2", gravity.name(), gravity.gravity_mps2()),
            BLACK,
        ),
        (format!("State: {}", phase_text(flight.phase())), BLACK),
        (
            format!("Prediction: {:.2} m", estimate.predicted_m),
            Color::from_rgba(0, 0, 255, 255),
        ),
        (
            format!("Range: [{:.2} - {:.2}]", estimate.lower_m, estimate.upper_m),
            Color::from_rgba(0, 100, 0, 255),
        ),
        (
            format!("Max distance: {:.2} m", session.max_distance_m()),
            Color::from_rgba(255, 0, 0, 255),
        ),
        (format!("Time: {:.2} s", flight.elapsed_s()), BLACK),
    ];
    let mut line_y = y + 132.0;
    for (text, color) in &lines {
        draw_ui_text(text, x + 5.0, line_y, 18, *color, font);
        line_y += 24.0;
    }
}

pub(crate) fn draw_formula_panel(session: &Session, font: Option<&Font>) {
    let x = PANEL_MARGIN * 2.0 + INFO_PANEL_W;
    let y = PANEL_MARGIN;
    draw_panel(x, y, FORMULA_PANEL_W, INFO_PANEL_H);
    draw_ui_text("Physics formulas", x + 10.0, y + 22.0, 22, BLACK, font);

    let launch = session.launch_parameters();
    let g = session.gravity().gravity_mps2();
    let theta = launch.angle_deg.to_radians();
    let v0 = launch.speed_mps;
    let summary = ShotSummary::compute(launch, g);

    let formulas = [
        format!(
            "x(t) = v0*cos(θ)*t = {v0:.1}*{:.3}*t",
            theta.cos()
        ),
        format!(
            "y(t) = v0*sin(θ)*t - ½g*t² = {v0:.1}*{:.3}*t - 0.5*{g:.2}*t²",
            theta.sin()
        ),
        format!(
            "R = v0²*sin(2θ)/g = ({v0:.1}²*{:.3})/{g:.2} = {:.3} m",
            (2.0 * theta).sin(),
            summary.range_m
        ),
        format!(
            "H = v0²*sin²(θ)/(2g) = ({v0:.1}²*{:.3}²)/(2*{g:.2}) = {:.3} m",
            theta.sin(),
            summary.max_height_m
        ),
        format!(
            "T = 2*v0*sin(θ)/g = (2*{v0:.1}*{:.3})/{g:.2} = {:.3} s",
            theta.sin(),
            summary.flight_time_s
        ),
    ];
    let mut line_y = y + 52.0;
    for formula in &formulas {
        draw_ui_text(formula, x + 10.0, line_y, 17, FORMULA_COLOR, font);
        line_y += 26.0;
    }

    line_y += 8.0;
    draw_ui_text(
        "Prediction and flown distance differ because of:",
        x + 10.0,
        line_y,
        16,
        NOTE_COLOR,
        font,
    );
    for reason in [
        "- time steps of one frame (the landing point overshoots)",
        "- floating point rounding",
        "- pixel resolution of the drawing",
    ] {
        line_y += 20.0;
        draw_ui_text(reason, x + 20.0, line_y, 16, NOTE_COLOR, font);
    }
}

pub(crate) fn draw_controls_line(screen_h: f32, font: Option<&Font>) {
    draw_ui_text(
        "Up/Down angle | +/- speed | Space fire | R reset | G gravity | L grid | I info | F formulas | T path | click a field to type, Enter/Esc",
        PANEL_MARGIN,
        screen_h - 8.0,
        16,
        WHITE,
        font,
    );
}
