use macroquad::prelude::Color;

pub const INITIAL_WINDOW_WIDTH: i32 = 1280;
pub const INITIAL_WINDOW_HEIGHT: i32 = 720;
pub const MSAA_SAMPLES: i32 = 4;
pub const UI_FONT_PATH: &str = "assets/fonts/Lato-Regular.ttf";

pub const LEFT_MARGIN: f32 = 90.0;
pub const RIGHT_MARGIN: f32 = 40.0;
pub const TOP_MARGIN: f32 = 290.0;
pub const GROUND_HEIGHT: f32 = 110.0;

pub const MAX_FRAME_STEP_S: f32 = 0.10;
pub const PREVIEW_SAMPLES: usize = 120;
pub const DISTANCE_RULER_TICKS: usize = 40;
pub const HEIGHT_RULER_TICKS: usize = 20;
pub const RULER_THICKNESS: f32 = 20.0;

pub const PANEL_MARGIN: f32 = 10.0;
pub const INFO_PANEL_W: f32 = 260.0;
pub const INFO_PANEL_H: f32 = 270.0;
pub const FORMULA_PANEL_W: f32 = 560.0;
pub const FIELD_X: f32 = 120.0;
pub const FIELD_W: f32 = 80.0;
pub const FIELD_H: f32 = 26.0;
pub const ANGLE_FIELD_Y: f32 = 44.0;
pub const STRENGTH_FIELD_Y: f32 = 76.0;

pub const BOW_HALF_HEIGHT_PX: f32 = 36.0;
pub const BOW_STRING_PX: f32 = 40.0;
pub const ARROW_LENGTH_PX: f32 = 20.0;

pub const SKY_COLOR: Color = Color::new(0.53, 0.81, 0.92, 1.0);
pub const GROUND_COLOR: Color = Color::new(0.13, 0.55, 0.13, 1.0);
pub const PANEL_COLOR: Color = Color::new(0.94, 0.94, 0.94, 0.95);
pub const PANEL_BORDER: Color = Color::new(0.39, 0.39, 0.39, 1.0);
pub const FORMULA_COLOR: Color = Color::new(0.04, 0.04, 0.31, 1.0);
pub const NOTE_COLOR: Color = Color::new(0.39, 0.0, 0.0, 1.0);
pub const RISING_COLOR: Color = Color::new(1.0, 0.0, 0.0, 1.0);
pub const FALLING_COLOR: Color = Color::new(0.0, 0.0, 1.0, 1.0);
pub const BAND_COLOR: Color = Color::new(0.0, 0.39, 0.0, 0.45);
pub const WOOD_COLOR: Color = Color::new(0.55, 0.27, 0.07, 1.0);
pub const STRING_COLOR: Color = Color::new(0.86, 0.86, 0.86, 1.0);
