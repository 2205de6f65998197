//! Yaw/pitch to direction-vector conversion shared by every
//! orientation-based camera mode.

use glam::Vec3;

/// Transform a yaw/pitch pair into the corresponding (forward, right)
/// direction vectors.
///
/// Conventions: right-handed, Y-up. At `yaw = 0, pitch = 0` forward is
/// `-Z` and right is `+X`. Positive yaw turns left (counter-clockwise
/// seen from above), positive pitch looks up. `right` always lies in the
/// horizontal plane, so `pitch == 0` yields a forward with zero vertical
/// component. Both results are unit length and mutually orthogonal.
#[must_use]
pub fn direction_vectors(yaw: f32, pitch: f32) -> (Vec3, Vec3) {
    let (sin_yaw, cos_yaw) = yaw.sin_cos();
    let (sin_pitch, cos_pitch) = pitch.sin_cos();

    let forward = Vec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch);
    let right = Vec3::new(cos_yaw, 0.0, -sin_yaw);
    (forward, right)
}

/// Orthonormal completion: the up vector for a (forward, right) pair.
#[must_use]
pub fn up_from(forward: Vec3, right: Vec3) -> Vec3 {
    right.cross(forward)
}
