//! Free-flight camera mode: unrestricted noclip movement for development.

use glam::{Vec2, Vec3};

use crate::direction::{direction_vectors, up_from};
use crate::snapshot::InputSnapshot;
use crate::view::Pose;

/// Settings and private state for the free-flight mode.
#[derive(Debug, Clone)]
pub struct FreeFlightSettings {
    /// Camera position in world units.
    pub position: Vec3,
    /// Current yaw in radians.
    pub yaw: f32,
    /// Current pitch in radians.
    pub pitch: f32,
    /// Base movement speed in world units per second.
    pub move_speed: f32,
    /// Look sensitivity applied to raw look deltas.
    pub look_sensitivity: f32,
    /// Maximum pitch angle in radians. Clamped to ±pitch_limit.
    pub pitch_limit: f32,
}

impl Default for FreeFlightSettings {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            move_speed: 1.0,
            look_sensitivity: 0.003,
            pitch_limit: 89.0_f32.to_radians(),
        }
    }
}

/// Advance the free-flight pose by one tick.
///
/// Look deltas rotate yaw/pitch, then the position advances along the
/// rederived forward/right/up basis, scaled by the debug move-speed
/// multiplier. No follow reference is consulted.
pub fn update(
    settings: &mut FreeFlightSettings,
    input: &InputSnapshot,
    delta_time: f32,
    speed_multiplier: f32,
) -> Pose {
    apply_look(settings, input.look);

    let (forward, right) = direction_vectors(settings.yaw, settings.pitch);
    let up = up_from(forward, right);

    let direction =
        forward * input.move_forward + right * input.move_right + up * input.move_up;
    settings.position += direction * settings.move_speed * speed_multiplier * delta_time;

    Pose {
        position: settings.position,
        forward,
        right,
        up,
    }
}

fn apply_look(settings: &mut FreeFlightSettings, look: Vec2) {
    settings.yaw += look.x * settings.look_sensitivity;
    settings.pitch = (settings.pitch + look.y * settings.look_sensitivity)
        .clamp(-settings.pitch_limit, settings.pitch_limit);
}
