//! Interaction controller: one explicit state struct per simulation run.
//!
//! Each frame the front end builds an [`InputSnapshot`], hands it to
//! [`Session::handle_input`], then calls [`Session::update`] with the frame
//! time. Rendering only ever borrows the session immutably.

use tracing::debug;

use crate::core::ballistics::LaunchParameters;
use crate::core::config::{MaxDistancePolicy, SessionConfig};
use crate::core::entry::{EditField, TextEntry};
use crate::core::flight::{ProjectileFlight, StepOutcome};
use crate::core::gravity::GravityPreset;
use crate::core::launcher::Launcher;
use crate::core::range::RangeEstimate;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusChange {
    Field(EditField),
    Blur,
}

/// Everything the input device reported for one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputSnapshot {
    pub fire: bool,
    pub reset: bool,
    pub cycle_gravity: bool,
    pub toggle_grid: bool,
    pub toggle_info: bool,
    pub toggle_formulas: bool,
    pub toggle_trajectory: bool,
    pub focus: Option<FocusChange>,
    pub typed: Vec<char>,
    pub backspace: bool,
    pub confirm: bool,
    pub cancel: bool,
    pub angle_up: bool,
    pub angle_down: bool,
    pub strength_up: bool,
    pub strength_down: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ControlMode {
    Aiming,
    Editing(TextEntry),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DisplayOptions {
    pub grid: bool,
    pub info_panel: bool,
    pub formulas: bool,
    pub trajectory: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            grid: true,
            info_panel: true,
            formulas: true,
            trajectory: true,
        }
    }
}

pub struct Session {
    config: SessionConfig,
    launcher: Launcher,
    gravity: GravityPreset,
    flight: ProjectileFlight,
    estimate: RangeEstimate,
    max_distance_m: f64,
    mode: ControlMode,
    display: DisplayOptions,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let launcher = Launcher::new(config.initial_angle_deg, config.initial_strength);
        let gravity = config.initial_gravity;
        let estimate = RangeEstimate::compute(
            launcher.launch_parameters(),
            gravity.gravity_mps2(),
            config.error_margin_fraction,
        );
        Self {
            flight: ProjectileFlight::new((0.0, 0.0), Some(config.max_samples)),
            config,
            launcher,
            gravity,
            estimate,
            max_distance_m: 0.0,
            mode: ControlMode::Aiming,
            display: DisplayOptions::default(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn launch_parameters(&self) -> LaunchParameters {
        self.launcher.launch_parameters()
    }

    pub fn launcher(&self) -> &Launcher {
        &self.launcher
    }

    pub fn gravity(&self) -> GravityPreset {
        self.gravity
    }

    pub fn flight(&self) -> &ProjectileFlight {
        &self.flight
    }

    pub fn range_estimate(&self) -> RangeEstimate {
        self.estimate
    }

    pub fn max_distance_m(&self) -> f64 {
        self.max_distance_m
    }

    pub fn mode(&self) -> &ControlMode {
        &self.mode
    }

    pub fn display(&self) -> DisplayOptions {
        self.display
    }

    pub fn editing_field(&self) -> Option<EditField> {
        match &self.mode {
            ControlMode::Editing(entry) => Some(entry.field()),
            ControlMode::Aiming => None,
        }
    }

    /// Discrete events first, then held keys, then the pending text entry.
    pub fn handle_input(&mut self, input: &InputSnapshot, dt: f64) {
        self.apply_discrete(input);
        self.apply_held_keys(input, dt);
        self.settle_entry(input);
    }

    /// Advances the shot. Only airborne samples count toward max distance;
    /// the landing sample is already below ground.
    pub fn update(&mut self, dt: f64) {
        if self.flight.advance(dt) == StepOutcome::Flying {
            self.max_distance_m = self.max_distance_m.max(self.flight.distance_m());
        }
    }

    pub fn tick(&mut self, input: &InputSnapshot, dt: f64) {
        self.handle_input(input, dt);
        self.update(dt);
    }

    pub fn fire(&mut self) -> bool {
        let started = self
            .flight
            .fire(self.launcher.launch_parameters(), self.gravity.gravity_mps2());
        if started && self.config.max_distance_policy == MaxDistancePolicy::ClearOnFire {
            self.max_distance_m = 0.0;
        }
        started
    }

    pub fn reset(&mut self) {
        self.flight.reset();
        if self.config.max_distance_policy == MaxDistancePolicy::ClearOnReset {
            self.max_distance_m = 0.0;
        }
        debug!(max_distance_m = self.max_distance_m, "flight reset");
    }

    pub fn cycle_gravity(&mut self) {
        self.gravity = self.gravity.next();
        self.recompute_estimate();
        debug!(
            preset = self.gravity.name(),
            gravity_mps2 = self.gravity.gravity_mps2(),
            "gravity changed"
        );
    }

    fn apply_discrete(&mut self, input: &InputSnapshot) {
        match input.focus {
            Some(FocusChange::Field(field)) => self.begin_edit(field),
            Some(FocusChange::Blur) => self.mode = ControlMode::Aiming,
            None => {}
        }

        if let ControlMode::Editing(entry) = &mut self.mode {
            for &ch in &input.typed {
                entry.push_char(ch);
            }
            if input.backspace {
                entry.backspace();
            }
            return;
        }

        if input.fire {
            self.fire();
        }
        if input.reset {
            self.reset();
        }
        if input.cycle_gravity {
            self.cycle_gravity();
        }
        if input.toggle_grid {
            self.display.grid = !self.display.grid;
        }
        if input.toggle_info {
            self.display.info_panel = !self.display.info_panel;
        }
        if input.toggle_formulas {
            self.display.formulas = !self.display.formulas;
        }
        if input.toggle_trajectory {
            self.display.trajectory = !self.display.trajectory;
        }
    }

    fn apply_held_keys(&mut self, input: &InputSnapshot, dt: f64) {
        if !matches!(self.mode, ControlMode::Aiming) || !dt.is_finite() || dt <= 0.0 {
            return;
        }

        let angle_step = self.config.angle_rate_deg_per_s * dt;
        let strength_step = self.config.strength_rate_per_s * dt;
        if input.angle_up {
            self.launcher.adjust_angle(angle_step);
            self.recompute_estimate();
        }
        if input.angle_down {
            self.launcher.adjust_angle(-angle_step);
            self.recompute_estimate();
        }
        if input.strength_up {
            self.launcher.adjust_strength(strength_step);
            self.recompute_estimate();
        }
        if input.strength_down {
            self.launcher.adjust_strength(-strength_step);
            self.recompute_estimate();
        }
    }

    fn settle_entry(&mut self, input: &InputSnapshot) {
        let ControlMode::Editing(entry) = &self.mode else {
            return;
        };

        if input.cancel {
            debug!(field = entry.field().label(), "edit cancelled");
            self.mode = ControlMode::Aiming;
            return;
        }
        if !input.confirm {
            return;
        }

        match entry.parse() {
            Ok(value) => {
                match entry.field() {
                    EditField::Angle => self.launcher.set_angle(value),
                    EditField::Strength => self.launcher.set_strength(value),
                }
                self.recompute_estimate();
            }
            Err(err) => {
                debug!(field = entry.field().label(), error = %err, "edit discarded");
            }
        }
        self.mode = ControlMode::Aiming;
    }

    fn begin_edit(&mut self, field: EditField) {
        let committed = match field {
            EditField::Angle => self.launcher.angle_deg(),
            EditField::Strength => self.launcher.strength(),
        };
        self.mode = ControlMode::Editing(TextEntry::begin(field, committed));
    }

    fn recompute_estimate(&mut self) {
        self.estimate = RangeEstimate::compute(
            self.launcher.launch_parameters(),
            self.gravity.gravity_mps2(),
            self.config.error_margin_fraction,
        );
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ballistics::max_range;
    use crate::core::flight::FlightPhase;

    const DT: f64 = 1.0 / 60.0;

    fn press(build: impl FnOnce(&mut InputSnapshot)) -> InputSnapshot {
        let mut input = InputSnapshot::default();
        build(&mut input);
        input
    }

    fn airborne_distance(session: &Session) -> f64 {
        let samples = session.flight().samples();
        samples[samples.len() - 2].0
    }

    fn type_into(session: &mut Session, field: EditField, text: &str) {
        session.handle_input(&press(|i| i.focus = Some(FocusChange::Field(field))), DT);
        let clear: Vec<InputSnapshot> = (0..8).map(|_| press(|i| i.backspace = true)).collect();
        for input in &clear {
            session.handle_input(input, DT);
        }
        session.handle_input(&press(|i| i.typed = text.chars().collect()), DT);
    }

    #[test]
    fn garbage_angle_entry_restores_previous_angle() {
        let mut session = Session::default();
        let before = session.launcher().angle_deg();
        let estimate_before = session.range_estimate();

        type_into(&mut session, EditField::Angle, "abc");
        session.handle_input(&press(|i| i.confirm = true), DT);

        assert_eq!(session.launcher().angle_deg(), before);
        assert_eq!(session.range_estimate(), estimate_before);
        assert_eq!(session.mode(), &ControlMode::Aiming);
    }

    #[test]
    fn confirmed_entry_is_clamped_and_updates_estimate() {
        let mut session = Session::default();

        type_into(&mut session, EditField::Strength, "250");
        session.handle_input(&press(|i| i.confirm = true), DT);

        assert_eq!(session.launcher().strength(), 100.0);
        let expected = max_range(100.0, 45.0, 9.8);
        assert!((session.range_estimate().predicted_m - expected).abs() < 1e-9);
    }

    #[test]
    fn cancel_keeps_committed_value() {
        let mut session = Session::default();
        type_into(&mut session, EditField::Angle, "12");
        session.handle_input(&press(|i| i.cancel = true), DT);

        assert_eq!(session.launcher().angle_deg(), 45.0);
        assert_eq!(session.editing_field(), None);
    }

    #[test]
    fn hotkeys_are_ignored_while_editing() {
        let mut session = Session::default();
        session.handle_input(
            &press(|i| i.focus = Some(FocusChange::Field(EditField::Angle))),
            DT,
        );
        session.handle_input(
            &press(|i| {
                i.fire = true;
                i.cycle_gravity = true;
                i.angle_up = true;
            }),
            DT,
        );

        assert_eq!(session.flight().phase(), FlightPhase::Idle);
        assert_eq!(session.gravity(), GravityPreset::Earth);
        assert_eq!(session.launcher().angle_deg(), 45.0);
        assert_eq!(session.editing_field(), Some(EditField::Angle));
    }

    #[test]
    fn held_keys_scale_with_frame_time() {
        let mut session = Session::default();
        session.handle_input(&press(|i| i.angle_up = true), 0.5);
        assert!((session.launcher().angle_deg() - 60.0).abs() < 1e-9);

        session.handle_input(&press(|i| i.strength_down = true), 1.0);
        assert!((session.launcher().strength() - 38.0).abs() < 1e-9);

        let expected = max_range(38.0, 60.0, 9.8);
        assert!((session.range_estimate().predicted_m - expected).abs() < 1e-9);
    }

    #[test]
    fn three_gravity_cycles_return_to_earth() {
        let mut session = Session::default();
        let cycle = press(|i| i.cycle_gravity = true);

        session.handle_input(&cycle, DT);
        assert_eq!(session.gravity().gravity_mps2(), 1.62);
        session.handle_input(&cycle, DT);
        assert_eq!(session.gravity().gravity_mps2(), 3.7);
        session.handle_input(&cycle, DT);
        assert_eq!(session.gravity().gravity_mps2(), 9.8);
    }

    #[test]
    fn gravity_change_mid_flight_keeps_captured_gravity() {
        let mut session = Session::default();
        session.tick(&press(|i| i.fire = true), DT);
        session.tick(&press(|i| i.cycle_gravity = true), DT);

        assert_eq!(session.gravity(), GravityPreset::Moon);
        assert_eq!(session.flight().gravity_mps2(), 9.8);
        let expected = max_range(50.0, 45.0, 1.62);
        assert!((session.range_estimate().predicted_m - expected).abs() < 1e-9);
    }

    #[test]
    fn fire_while_flying_does_not_restart_the_shot() {
        let mut session = Session::default();
        session.tick(&press(|i| i.fire = true), DT);
        for _ in 0..10 {
            session.tick(&InputSnapshot::default(), DT);
        }
        let elapsed = session.flight().elapsed_s();

        session.tick(&press(|i| i.fire = true), DT);
        assert!(session.flight().elapsed_s() > elapsed);
    }

    #[test]
    fn max_distance_persists_across_reset_by_default() {
        let mut session = Session::default();
        session.tick(&press(|i| i.fire = true), DT);
        while session.flight().is_flying() {
            session.tick(&InputSnapshot::default(), DT);
        }
        let best = session.max_distance_m();
        assert!(best > 250.0, "best={best}");
        assert_eq!(best, airborne_distance(&session));

        session.tick(&press(|i| i.reset = true), DT);
        assert_eq!(session.flight().phase(), FlightPhase::Idle);
        assert_eq!(session.max_distance_m(), best);
        assert_eq!(session.launcher().angle_deg(), 45.0);
    }

    #[test]
    fn max_distance_policy_can_clear_on_reset_or_fire() {
        let mut on_reset = Session::new(SessionConfig {
            max_distance_policy: MaxDistancePolicy::ClearOnReset,
            ..SessionConfig::default()
        });
        on_reset.tick(&press(|i| i.fire = true), DT);
        on_reset.tick(&InputSnapshot::default(), DT);
        assert!(on_reset.max_distance_m() > 0.0);
        on_reset.tick(&press(|i| i.reset = true), DT);
        assert_eq!(on_reset.max_distance_m(), 0.0);

        let mut on_fire = Session::new(SessionConfig {
            max_distance_policy: MaxDistancePolicy::ClearOnFire,
            ..SessionConfig::default()
        });
        on_fire.tick(&press(|i| i.fire = true), DT);
        on_fire.tick(&InputSnapshot::default(), DT);
        on_fire.tick(&press(|i| i.reset = true), DT);
        assert!(on_fire.max_distance_m() > 0.0);
        on_fire.handle_input(&press(|i| i.fire = true), DT);
        assert_eq!(on_fire.max_distance_m(), 0.0);
    }

    #[test]
    fn landing_sample_does_not_count_toward_max_distance() {
        let mut session = Session::default();
        session.tick(&press(|i| i.fire = true), DT);
        while session.flight().is_flying() {
            session.tick(&InputSnapshot::default(), DT);
        }

        let landing_x = session.flight().distance_m();
        assert!(session.max_distance_m() < landing_x);
        assert_eq!(session.max_distance_m(), airborne_distance(&session));
    }

    #[test]
    fn shot_landing_on_first_step_leaves_max_distance_untouched() {
        let mut session = Session::new(SessionConfig {
            initial_angle_deg: 0.0,
            ..SessionConfig::default()
        });
        session.tick(&press(|i| i.fire = true), DT);

        assert_eq!(session.flight().phase(), FlightPhase::Landed);
        assert_eq!(session.max_distance_m(), 0.0);
    }

    #[test]
    fn display_toggles_flip_once_per_event() {
        let mut session = Session::default();
        session.handle_input(
            &press(|i| {
                i.toggle_grid = true;
                i.toggle_trajectory = true;
            }),
            DT,
        );

        let display = session.display();
        assert!(!display.grid);
        assert!(!display.trajectory);
        assert!(display.info_panel);
        assert!(display.formulas);
    }
}
