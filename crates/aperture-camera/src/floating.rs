//! Static camera mode: a raw floating pose with no input bindings.
//!
//! The pose only changes through external writes (the settings block or
//! a hard transform override); the per-tick update returns it verbatim.

use glam::Vec3;

use crate::direction::{direction_vectors, up_from};
use crate::view::Pose;

/// Settings for the static mode: an explicitly stored pose.
#[derive(Debug, Clone)]
pub struct FloatingSettings {
    /// Camera position in world units.
    pub position: Vec3,
    /// Yaw the basis vectors were last derived from.
    pub yaw: f32,
    /// Pitch the basis vectors were last derived from.
    pub pitch: f32,
    /// Stored forward vector.
    pub forward: Vec3,
    /// Stored right vector.
    pub right: Vec3,
    /// Stored up vector.
    pub up: Vec3,
}

impl Default for FloatingSettings {
    fn default() -> Self {
        let (forward, right) = direction_vectors(0.0, 0.0);
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            forward,
            right,
            up: up_from(forward, right),
        }
    }
}

impl FloatingSettings {
    /// Overwrite the stored orientation from a yaw/pitch pair, keeping
    /// the basis vectors consistent with the angles.
    pub fn set_angles(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch;
        let (forward, right) = direction_vectors(yaw, pitch);
        self.forward = forward;
        self.right = right;
        self.up = up_from(forward, right);
    }
}

/// Return the stored pose unchanged. No input is read in this mode.
pub fn update(settings: &FloatingSettings) -> Pose {
    Pose {
        position: settings.position,
        forward: settings.forward,
        right: settings.right,
        up: settings.up,
    }
}
