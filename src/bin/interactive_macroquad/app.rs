use macroquad::prelude::*;
use parabolic_archery::core::ballistics::{ShotSummary, sample_trajectory};
use parabolic_archery::core::config::SessionConfig;
use parabolic_archery::core::session::Session;
use parabolic_archery::core::window::{PlotArea, compute_world_window};
use tracing::{info, warn};

use crate::constants::{
    GROUND_HEIGHT, INITIAL_WINDOW_HEIGHT, INITIAL_WINDOW_WIDTH, LEFT_MARGIN, MAX_FRAME_STEP_S,
    MSAA_SAMPLES, PREVIEW_SAMPLES, RIGHT_MARGIN, TOP_MARGIN, UI_FONT_PATH,
};
use crate::hud::{draw_controls_line, draw_formula_panel, draw_info_panel};
use crate::input::capture_input;
use crate::render::{
    View, draw_arrow, draw_backdrop, draw_bow, draw_distance_ruler, draw_grid, draw_ground_marks,
    draw_height_ruler, draw_max_distance_marker, draw_path, draw_range_band, draw_trajectory,
};

pub(crate) fn window_conf() -> Conf {
    Conf {
        window_title: "Parabolic Archery".to_string(),
        window_width: INITIAL_WINDOW_WIDTH,
        window_height: INITIAL_WINDOW_HEIGHT,
        high_dpi: true,
        sample_count: MSAA_SAMPLES,
        ..Default::default()
    }
}

fn plot_area(screen_w: f32, screen_h: f32) -> PlotArea {
    PlotArea {
        left: LEFT_MARGIN as f64,
        right: (screen_w - RIGHT_MARGIN) as f64,
        top: TOP_MARGIN as f64,
        bottom: (screen_h - GROUND_HEIGHT).max(TOP_MARGIN + 1.0) as f64,
    }
}

pub(crate) async fn run() {
    let ui_font = match load_ttf_font(UI_FONT_PATH).await {
        Ok(font) => Some(font),
        Err(err) => {
            warn!(path = UI_FONT_PATH, error = %err, "falling back to default font");
            None
        }
    };

    let mut session = Session::new(SessionConfig::from_env());
    info!(
        angle_deg = session.launcher().angle_deg(),
        strength = session.launcher().strength(),
        gravity = session.gravity().name(),
        "session started"
    );

    loop {
        let frame_dt = get_frame_time().min(MAX_FRAME_STEP_S) as f64;
        let screen_w = screen_width();
        let screen_h = screen_height();

        let input = capture_input(session.display().info_panel);
        session.tick(&input, frame_dt);

        let launch = session.launch_parameters();
        let gravity_mps2 = session.gravity().gravity_mps2();
        let summary = ShotSummary::compute(launch, gravity_mps2);
        let estimate = session.range_estimate();
        let flight = session.flight();
        let area = plot_area(screen_w, screen_h);
        let (world_max_x, world_max_y) = compute_world_window(
            estimate.upper_m,
            summary.max_height_m,
            flight.samples(),
            session.max_distance_m(),
        );
        let view = View {
            area,
            world_max_x,
            world_max_y,
        };
        let display = session.display();
        let font = ui_font.as_ref();

        draw_backdrop(&view, screen_w, screen_h);
        if display.grid {
            draw_grid(&view, font);
        }
        draw_height_ruler(&view, font);
        draw_ground_marks(&view);
        draw_distance_ruler(&view, view.to_screen((0.0, 0.0)).y + 30.0, font);
        draw_range_band(&view, &estimate);
        draw_max_distance_marker(&view, session.max_distance_m());

        if display.trajectory {
            if !flight.is_flying() {
                let preview = sample_trajectory(launch, gravity_mps2, PREVIEW_SAMPLES);
                draw_path(&preview, &view, 1.5, Color::from_rgba(255, 255, 255, 140));
            }
            draw_trajectory(flight, &view);
        }

        draw_bow(view.to_screen(flight.origin()), launch.angle_deg);
        draw_arrow(flight, &view);

        if display.info_panel {
            draw_info_panel(&session, font);
        }
        if display.formulas {
            draw_formula_panel(&session, font);
        }
        draw_controls_line(screen_h, font);

        next_frame().await;
    }
}
