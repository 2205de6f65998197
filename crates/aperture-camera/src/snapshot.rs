//! Per-tick input snapshot plumbing.
//!
//! Action callbacks fire whenever the input subsystem delivers events,
//! decoupled in time from the simulation tick. [`InputIntake`] is the
//! accumulator those callbacks write into; [`InputIntake::take_snapshot`]
//! is the single read point per tick, so updaters never observe values
//! torn between mid-tick deliveries. Deltas (look, view, wheel) are
//! consumed by the snapshot; held axis values and modifier flags persist
//! until the input subsystem reports a release.

use aperture_input::{ActionEvent, ActionKind};
use glam::Vec2;

/// Accumulated input state between two ticks. Written by action
/// callbacks, drained once per tick.
#[derive(Debug, Clone, Default)]
pub struct InputIntake {
    move_forward: f32,
    move_right: f32,
    move_up: f32,
    look: Vec2,
    view: Vec2,
    wheel: f32,
    pan: bool,
    zoom: bool,
    rotate: bool,
    click: bool,
}

impl InputIntake {
    /// Fold one action event into the accumulator.
    pub fn apply(&mut self, kind: ActionKind, event: ActionEvent) {
        match kind {
            // Held axes: the latest delivery wins.
            ActionKind::MoveForward => self.move_forward = event.intensity,
            ActionKind::MoveRight => self.move_right = event.intensity,
            ActionKind::MoveUp => self.move_up = event.intensity,
            // Deltas: multiple deliveries between ticks add up.
            ActionKind::LookHorizontal => self.look.x += event.intensity,
            ActionKind::LookVertical => self.look.y += event.intensity,
            ActionKind::ViewHorizontal => self.view.x += event.intensity,
            ActionKind::ViewVertical => self.view.y += event.intensity,
            ActionKind::Wheel => self.wheel += event.intensity,
            // Modifiers: track held state.
            ActionKind::Pan => self.pan = event.pressed,
            ActionKind::Zoom => self.zoom = event.pressed,
            ActionKind::Rotate => self.rotate = event.pressed,
            ActionKind::Click => self.click = event.pressed,
        }
    }

    /// Copy the current state into a snapshot and reset the deltas.
    /// Held values and modifier flags carry over to the next tick.
    pub fn take_snapshot(&mut self) -> InputSnapshot {
        let snapshot = InputSnapshot {
            move_forward: self.move_forward,
            move_right: self.move_right,
            move_up: self.move_up,
            look: self.look,
            view: self.view,
            wheel: self.wheel,
            pan: self.pan,
            zoom: self.zoom,
            rotate: self.rotate,
            click: self.click,
        };
        self.look = Vec2::ZERO;
        self.view = Vec2::ZERO;
        self.wheel = 0.0;
        snapshot
    }
}

/// Immutable view of one tick's worth of input, consumed by the pose
/// updaters.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputSnapshot {
    /// Signed forward-axis value, typically in `[-1, 1]`.
    pub move_forward: f32,
    /// Signed right-axis value.
    pub move_right: f32,
    /// Signed up-axis value.
    pub move_up: f32,
    /// Accumulated look delta since the previous tick (x = yaw, y = pitch).
    pub look: Vec2,
    /// Accumulated viewer drag delta since the previous tick.
    pub view: Vec2,
    /// Accumulated scroll wheel delta since the previous tick.
    pub wheel: f32,
    /// Viewer pan modifier held.
    pub pan: bool,
    /// Viewer zoom modifier held.
    pub zoom: bool,
    /// Viewer rotate modifier held.
    pub rotate: bool,
    /// Viewer drag button held.
    pub click: bool,
}
