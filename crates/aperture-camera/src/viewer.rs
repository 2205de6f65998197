//! Viewer camera mode: click-drag inspection orbit with pan, zoom, and
//! rotate modifiers.
//!
//! Modifier precedence is fixed at rotate > pan > zoom: when several
//! modifiers are held at once, exactly one drag effect applies per tick.
//! Wheel zoom applies unconditionally, with or without a drag.

use glam::{Vec2, Vec3};

use crate::direction::{direction_vectors, up_from};
use crate::snapshot::InputSnapshot;
use crate::view::Pose;

/// Settings and private state for the viewer mode.
#[derive(Debug, Clone)]
pub struct ViewerSettings {
    /// The inspected point the camera orbits and looks at.
    pub look_at: Vec3,
    /// Horizontal view angle in radians.
    pub yaw: f32,
    /// Vertical view angle in radians.
    pub pitch: f32,
    /// Accumulated zoom scalar. Positive zooms in; distance shrinks
    /// multiplicatively per unit.
    pub zoom: f32,
    /// View direction (unit), from camera toward `look_at`.
    pub in_direction: Vec3,
    /// Right direction (unit).
    pub right: Vec3,
    /// Up direction (unit).
    pub up: Vec3,
    /// Pan modifier held this tick.
    pub is_pan_modifier: bool,
    /// Zoom modifier held this tick.
    pub is_zoom_modifier: bool,
    /// Rotate modifier held this tick.
    pub is_rotate_modifier: bool,
    /// Distance from `look_at` at `zoom == 0`.
    pub base_distance: f32,
    /// Lower bound on the view distance.
    pub min_distance: f32,
    /// Multiplicative distance change per zoom unit (> 1).
    pub zoom_step: f32,
    /// Zoom units per wheel unit.
    pub wheel_sensitivity: f32,
    /// Radians per drag unit while rotating.
    pub rotate_sensitivity: f32,
    /// Pan units per drag unit, scaled by the current distance.
    pub pan_sensitivity: f32,
    /// Zoom units per vertical drag unit while the zoom modifier is held.
    pub drag_zoom_sensitivity: f32,
    /// Maximum pitch angle in radians.
    pub pitch_limit: f32,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        let (in_direction, right) = direction_vectors(0.0, 0.0);
        Self {
            look_at: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            zoom: 0.0,
            in_direction,
            right,
            up: up_from(in_direction, right),
            is_pan_modifier: false,
            is_zoom_modifier: false,
            is_rotate_modifier: false,
            base_distance: 5.0,
            min_distance: 0.1,
            zoom_step: 1.2,
            wheel_sensitivity: 1.0,
            rotate_sensitivity: 0.005,
            pan_sensitivity: 0.002,
            drag_zoom_sensitivity: 0.01,
            pitch_limit: 89.0_f32.to_radians(),
        }
    }
}

impl ViewerSettings {
    /// View distance for the current zoom scalar.
    #[must_use]
    pub fn view_distance(&self) -> f32 {
        (self.base_distance * self.zoom_step.powf(-self.zoom)).max(self.min_distance)
    }
}

/// Advance the viewer pose by one tick.
pub fn update(settings: &mut ViewerSettings, input: &InputSnapshot) -> Pose {
    settings.is_pan_modifier = input.pan;
    settings.is_zoom_modifier = input.zoom;
    settings.is_rotate_modifier = input.rotate;

    // Wheel zoom is always live.
    settings.zoom += input.wheel * settings.wheel_sensitivity;

    // Drag effects require the click button; precedence rotate > pan > zoom.
    if input.click {
        if settings.is_rotate_modifier {
            apply_rotate(settings, input.view);
        } else if settings.is_pan_modifier {
            apply_pan(settings, input.view);
        } else if settings.is_zoom_modifier {
            settings.zoom += input.view.y * settings.drag_zoom_sensitivity;
        }
    }

    let position = settings.look_at - settings.in_direction * settings.view_distance();
    Pose {
        position,
        forward: settings.in_direction,
        right: settings.right,
        up: settings.up,
    }
}

fn apply_rotate(settings: &mut ViewerSettings, view: Vec2) {
    settings.yaw += view.x * settings.rotate_sensitivity;
    settings.pitch = (settings.pitch + view.y * settings.rotate_sensitivity)
        .clamp(-settings.pitch_limit, settings.pitch_limit);

    let (in_direction, right) = direction_vectors(settings.yaw, settings.pitch);
    settings.in_direction = in_direction;
    settings.right = right;
    settings.up = up_from(in_direction, right);
}

fn apply_pan(settings: &mut ViewerSettings, view: Vec2) {
    // Dragging carries the scene with the cursor, so the look-at point
    // moves against the drag, in the camera's right/up plane.
    let scale = settings.pan_sensitivity * settings.view_distance();
    settings.look_at -= (settings.right * view.x + settings.up * view.y) * scale;
}
