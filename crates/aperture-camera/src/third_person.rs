//! Third-person orbit camera: smoothed follow, horizontal orbit,
//! exponential zoom, and an aim point decoupled from the orbit center.

use aperture_scene::WorldTransform;
use glam::{Quat, Vec3};

use crate::snapshot::InputSnapshot;
use crate::view::Pose;

/// Settings and private state for the third-person mode.
#[derive(Debug, Clone)]
pub struct ThirdPersonSettings {
    /// Smoothed orbit center, tracking the followed entity's position.
    pub current_look_at: Vec3,
    /// Unit vector from the orbit center to the camera. Horizontal
    /// azimuth is rotated by `delta_phi`; the vertical component is
    /// governed by `pitch`.
    pub current_offset_direction: Vec3,
    /// Accumulated zoom input. Orbit distance is an exponential function
    /// of this value.
    pub zoom_exponent: f32,
    /// Vertical orbit angle in radians. 0 = level with the subject,
    /// π/2 = looking straight down from above.
    pub pitch: f32,
    /// Angle in radians between the camera's line of sight and the orbit
    /// center. 0 = camera looks exactly at the center.
    pub camera_elevation: f32,
    /// Horizontal rotation to apply on the next update, in radians.
    /// Consumed and reset to zero every tick; inputs arriving between
    /// ticks accumulate additively.
    pub delta_phi: f32,
    /// Orbit distance at `zoom_exponent == 0`.
    pub base_distance: f32,
    /// Lower bound on the orbit distance, keeping the camera off the
    /// subject.
    pub min_distance: f32,
    /// Multiplicative distance growth per unit of zoom exponent (> 1).
    pub zoom_factor: f32,
    /// Zoom exponent change per wheel unit.
    pub zoom_sensitivity: f32,
    /// Sensitivity for orbit rotation from look deltas.
    pub orbit_sensitivity: f32,
    /// Exponential smoothing rate for the look-at point, per second.
    /// Higher snaps faster; the smoothing is frame-rate independent.
    pub follow_rate: f32,
    /// Minimum orbit pitch in radians.
    pub pitch_min: f32,
    /// Maximum orbit pitch in radians.
    pub pitch_max: f32,
}

impl Default for ThirdPersonSettings {
    fn default() -> Self {
        Self {
            current_look_at: Vec3::ZERO,
            current_offset_direction: Vec3::Z,
            zoom_exponent: 0.0,
            pitch: 20.0_f32.to_radians(),
            camera_elevation: 0.0,
            delta_phi: 0.0,
            base_distance: 5.0,
            min_distance: 0.5,
            zoom_factor: 1.2,
            zoom_sensitivity: 1.0,
            orbit_sensitivity: 0.005,
            follow_rate: 10.0,
            pitch_min: 0.0,
            pitch_max: 85.0_f32.to_radians(),
        }
    }
}

impl ThirdPersonSettings {
    /// Orbit distance for the current zoom exponent: exponential in the
    /// accumulated zoom input, bounded away from zero.
    #[must_use]
    pub fn orbit_distance(&self) -> f32 {
        (self.base_distance * self.zoom_factor.powf(self.zoom_exponent)).max(self.min_distance)
    }
}

/// Advance the third-person orbit pose by one tick.
///
/// An invalid followed reference freezes `current_look_at` at its last
/// value; orbit, zoom, and aim keep working around the frozen center.
pub fn update(
    settings: &mut ThirdPersonSettings,
    input: &InputSnapshot,
    delta_time: f32,
    followed: Option<&WorldTransform>,
) -> Pose {
    // 1. Converge the orbit center onto the live target position.
    if let Some(transform) = followed {
        let t = 1.0 - (-settings.follow_rate * delta_time).exp();
        settings.current_look_at = settings
            .current_look_at
            .lerp(transform.position, t.clamp(0.0, 1.0));
    }

    // 2. Fold this tick's look input into the orbit angles, then consume
    //    the accumulated horizontal rotation.
    settings.delta_phi += input.look.x * settings.orbit_sensitivity;
    settings.pitch = (settings.pitch + input.look.y * settings.orbit_sensitivity)
        .clamp(settings.pitch_min, settings.pitch_max);

    let horizontal = horizontal_azimuth(settings.current_offset_direction);
    let horizontal = Quat::from_rotation_y(settings.delta_phi) * horizontal;
    settings.delta_phi = 0.0;

    // 3. Exponential zoom mapping.
    settings.zoom_exponent -= input.wheel * settings.zoom_sensitivity;
    let distance = settings.orbit_distance();

    // 4. Compose the camera position.
    let (sin_pitch, cos_pitch) = settings.pitch.sin_cos();
    let offset = Vec3::new(
        horizontal.x * cos_pitch,
        sin_pitch,
        horizontal.z * cos_pitch,
    );
    settings.current_offset_direction = offset;
    let position = settings.current_look_at + offset * distance;

    // 5. Aim at the orbit center, tilted up by the elevation angle about
    //    the camera's right axis.
    let to_center = -offset;
    let right = Vec3::new(horizontal.z, 0.0, -horizontal.x);
    let forward = Quat::from_axis_angle(right, settings.camera_elevation) * to_center;

    Pose::from_basis(position, forward, right)
}

/// Unit horizontal azimuth of an offset direction. The pitch clamp keeps
/// the stored offset off the vertical axis, but a caller-written offset
/// may be degenerate; fall back to the canonical behind-the-subject
/// azimuth in that case.
fn horizontal_azimuth(offset: Vec3) -> Vec3 {
    let flat = Vec3::new(offset.x, 0.0, offset.z);
    if flat.length_squared() > 1e-8 {
        flat.normalize()
    } else {
        Vec3::Z
    }
}
