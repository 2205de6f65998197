//! Pose and view-transform builder shared by all camera modes.

use glam::{Mat4, Vec3};

use crate::direction::{direction_vectors, up_from};

/// A camera pose: position plus an orthonormal orientation basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Position in world units.
    pub position: Vec3,
    /// View direction (unit).
    pub forward: Vec3,
    /// Right direction (unit).
    pub right: Vec3,
    /// Up direction (unit).
    pub up: Vec3,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            forward: Vec3::NEG_Z,
            right: Vec3::X,
            up: Vec3::Y,
        }
    }
}

impl Pose {
    /// Build a pose at `position` oriented by `yaw`/`pitch`.
    #[must_use]
    pub fn from_angles(position: Vec3, yaw: f32, pitch: f32) -> Self {
        let (forward, right) = direction_vectors(yaw, pitch);
        Self {
            position,
            forward,
            right,
            up: up_from(forward, right),
        }
    }

    /// Build a pose at `position` looking along `forward` with the given
    /// `right` vector; up is completed orthonormally.
    #[must_use]
    pub fn from_basis(position: Vec3, forward: Vec3, right: Vec3) -> Self {
        Self {
            position,
            forward,
            right,
            up: up_from(forward, right),
        }
    }

    /// Compute the view matrix: maps world-space coordinates into camera
    /// space. Mode-agnostic; every updater's pose goes through here.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward, self.up)
    }
}
