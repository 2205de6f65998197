//! First-person camera mode: rigidly attached to the followed entity.

use aperture_scene::WorldTransform;
use glam::Vec3;

use crate::direction::{direction_vectors, up_from};
use crate::snapshot::InputSnapshot;
use crate::view::Pose;

/// Settings and private state for the first-person mode.
///
/// `position` is the last position resolved from the followed entity;
/// it is retained verbatim while the reference is invalid so the camera
/// never snaps to an arbitrary origin.
#[derive(Debug, Clone)]
pub struct FirstPersonSettings {
    /// Last valid camera position (the followed entity's position plus
    /// the eye offset).
    pub position: Vec3,
    /// Current yaw in radians.
    pub yaw: f32,
    /// Current pitch in radians.
    pub pitch: f32,
    /// Vertical offset from the entity origin to the eye.
    pub eye_height: f32,
    /// Look sensitivity applied to raw look deltas.
    pub look_sensitivity: f32,
    /// Maximum pitch angle in radians.
    pub pitch_limit: f32,
}

impl Default for FirstPersonSettings {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            eye_height: 1.7,
            look_sensitivity: 0.003,
            pitch_limit: 89.0_f32.to_radians(),
        }
    }
}

/// Advance the first-person pose by one tick.
///
/// The camera position snaps to the followed entity's transform when it
/// resolves; orientation updates from look deltas either way. Movement
/// actions are bound in this mode but drive entity locomotion elsewhere,
/// not the camera.
pub fn update(
    settings: &mut FirstPersonSettings,
    input: &InputSnapshot,
    followed: Option<&WorldTransform>,
) -> Pose {
    if let Some(transform) = followed {
        settings.position = transform.position + Vec3::Y * settings.eye_height;
    }

    settings.yaw += input.look.x * settings.look_sensitivity;
    settings.pitch = (settings.pitch + input.look.y * settings.look_sensitivity)
        .clamp(-settings.pitch_limit, settings.pitch_limit);

    let (forward, right) = direction_vectors(settings.yaw, settings.pitch);
    Pose {
        position: settings.position,
        forward,
        right,
        up: up_from(forward, right),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_position_tracks_followed_entity() {
        let mut settings = FirstPersonSettings {
            eye_height: 0.0,
            ..Default::default()
        };
        let transform = WorldTransform::from_position(Vec3::new(10.0, 0.0, -3.0));

        let pose = update(&mut settings, &InputSnapshot::default(), Some(&transform));
        assert!((pose.position - transform.position).length() < 1e-6);
    }

    #[test]
    fn test_eye_height_raises_camera() {
        let mut settings = FirstPersonSettings::default();
        let transform = WorldTransform::from_position(Vec3::ZERO);

        let pose = update(&mut settings, &InputSnapshot::default(), Some(&transform));
        assert!((pose.position.y - settings.eye_height).abs() < 1e-6);
    }

    #[test]
    fn test_invalid_reference_retains_last_position() {
        let mut settings = FirstPersonSettings {
            eye_height: 0.0,
            ..Default::default()
        };
        let transform = WorldTransform::from_position(Vec3::new(5.0, 1.0, 2.0));
        update(&mut settings, &InputSnapshot::default(), Some(&transform));

        for _ in 0..10 {
            let pose = update(&mut settings, &InputSnapshot::default(), None);
            assert!((pose.position - Vec3::new(5.0, 1.0, 2.0)).length() < 1e-6);
        }
    }

    #[test]
    fn test_look_still_applies_without_followed_entity() {
        let mut settings = FirstPersonSettings {
            look_sensitivity: 1.0,
            ..Default::default()
        };
        let input = InputSnapshot {
            look: Vec2::new(std::f32::consts::FRAC_PI_2, 0.0),
            ..Default::default()
        };

        let pose = update(&mut settings, &input, None);
        assert!((pose.forward - Vec3::NEG_X).length() < 1e-5);
        assert!((settings.yaw - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_pitch_clamps_at_limit() {
        let mut settings = FirstPersonSettings {
            look_sensitivity: 1.0,
            ..Default::default()
        };
        let input = InputSnapshot {
            look: Vec2::new(0.0, -10.0),
            ..Default::default()
        };

        update(&mut settings, &input, None);
        assert!((settings.pitch + settings.pitch_limit).abs() < 1e-6);
    }

    #[test]
    fn test_movement_input_does_not_move_camera() {
        let mut settings = FirstPersonSettings::default();
        let input = InputSnapshot {
            move_forward: 1.0,
            move_right: 1.0,
            ..Default::default()
        };

        let before = settings.position;
        update(&mut settings, &input, None);
        assert!((settings.position - before).length() < 1e-6);
    }
}
