use macroquad::prelude::*;
use parabolic_archery::core::entry::EditField;
use parabolic_archery::core::session::{FocusChange, InputSnapshot};

use crate::constants::{ANGLE_FIELD_Y, FIELD_H, FIELD_W, FIELD_X, STRENGTH_FIELD_Y};

pub(crate) fn field_rect(field: EditField) -> Rect {
    let y = match field {
        EditField::Angle => ANGLE_FIELD_Y,
        EditField::Strength => STRENGTH_FIELD_Y,
    };
    Rect::new(FIELD_X, y, FIELD_W, FIELD_H)
}

fn clicked_focus(fields_visible: bool) -> Option<FocusChange> {
    if !is_mouse_button_pressed(MouseButton::Left) {
        return None;
    }

    let mouse = mouse_position();
    let mouse_v = vec2(mouse.0, mouse.1);
    if fields_visible {
        for field in [EditField::Angle, EditField::Strength] {
            if field_rect(field).contains(mouse_v) {
                return Some(FocusChange::Field(field));
            }
        }
    }
    Some(FocusChange::Blur)
}

/// Polls the keyboard and mouse once for this frame.
pub(crate) fn capture_input(fields_visible: bool) -> InputSnapshot {
    let mut typed = Vec::new();
    while let Some(ch) = get_char_pressed() {
        typed.push(ch);
    }

    InputSnapshot {
        fire: is_key_pressed(KeyCode::Space),
        reset: is_key_pressed(KeyCode::R),
        cycle_gravity: is_key_pressed(KeyCode::G),
        toggle_grid: is_key_pressed(KeyCode::L),
        toggle_info: is_key_pressed(KeyCode::I),
        toggle_formulas: is_key_pressed(KeyCode::F),
        toggle_trajectory: is_key_pressed(KeyCode::T),
        focus: clicked_focus(fields_visible),
        typed,
        backspace: is_key_pressed(KeyCode::Backspace),
        confirm: is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::KpEnter),
        cancel: is_key_pressed(KeyCode::Escape),
        angle_up: is_key_down(KeyCode::Up),
        angle_down: is_key_down(KeyCode::Down),
        strength_up: is_key_down(KeyCode::Equal) || is_key_down(KeyCode::KpAdd),
        strength_down: is_key_down(KeyCode::Minus) || is_key_down(KeyCode::KpSubtract),
    }
}
