//! The camera controller: mode state machine, binding lifecycle, and the
//! per-tick update entry point.
//!
//! One controller owns one camera. Each mode declares a fixed set of
//! input actions; switching modes tears the old set down completely
//! before installing the new one, so the registry never holds a mix of
//! two modes' bindings. All per-mode state lives in [`CameraSettings`]
//! and survives switches, so returning to a mode resumes where it left
//! off.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use aperture_input::{ActionHandle, ActionKind, ActionRegistry};
use aperture_scene::resolve_transform;
use bevy_ecs::entity::Entity;
use bevy_ecs::world::World;
use glam::{Mat4, Vec3};
use tracing::debug;

use crate::first_person::{self, FirstPersonSettings};
use crate::floating::{self, FloatingSettings};
use crate::free_flight::{self, FreeFlightSettings};
use crate::snapshot::InputIntake;
use crate::third_person::{self, ThirdPersonSettings};
use crate::view::Pose;
use crate::viewer::{self, ViewerSettings};

/// How the camera behaves with respect to input and the followed entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraMode {
    /// Unconstrained flight steered by move/look actions.
    Free,
    /// A raw floating pose; reads no input.
    Static,
    /// Rigidly attached to the followed entity.
    FirstPerson,
    /// Orbits the followed entity.
    ThirdPerson,
    /// Click-drag inspection orbit around a free look-at point.
    Viewer,
}

/// One settings block per mode. Blocks are independent storage: switching
/// modes never clears a non-active block, so e.g. third-person zoom and
/// pitch persist across a detour into free flight.
#[derive(Debug, Clone, Default)]
pub struct CameraSettings {
    /// Free-flight mode block.
    pub free: FreeFlightSettings,
    /// First-person mode block.
    pub first_person: FirstPersonSettings,
    /// Third-person mode block.
    pub third_person: ThirdPersonSettings,
    /// Static mode block.
    pub floating: FloatingSettings,
    /// Viewer mode block.
    pub viewer: ViewerSettings,
}

/// The input actions a mode listens to while active.
///
/// First-person registers movement actions as well: they belong to the
/// mode's declared set (entity locomotion consumes them), even though
/// the camera updater itself only reads the look deltas.
#[must_use]
pub fn binding_set(mode: CameraMode) -> &'static [ActionKind] {
    match mode {
        CameraMode::Free => &[
            ActionKind::MoveForward,
            ActionKind::MoveRight,
            ActionKind::MoveUp,
            ActionKind::LookHorizontal,
            ActionKind::LookVertical,
        ],
        CameraMode::Static => &[],
        CameraMode::FirstPerson => &[
            ActionKind::MoveForward,
            ActionKind::MoveRight,
            ActionKind::LookHorizontal,
            ActionKind::LookVertical,
        ],
        CameraMode::ThirdPerson => &[
            ActionKind::Wheel,
            ActionKind::LookHorizontal,
            ActionKind::LookVertical,
        ],
        CameraMode::Viewer => &[
            ActionKind::ViewHorizontal,
            ActionKind::ViewVertical,
            ActionKind::Pan,
            ActionKind::Zoom,
            ActionKind::Rotate,
            ActionKind::Click,
            ActionKind::Wheel,
        ],
    }
}

/// Drives one camera from accumulated input and the followed entity's
/// transform, producing a pose and view matrix once per tick.
pub struct CameraController {
    registry: Rc<RefCell<ActionRegistry>>,
    intake: Rc<RefCell<InputIntake>>,
    mode: CameraMode,
    active: bool,
    followed: Option<Entity>,
    settings: CameraSettings,
    bindings: HashMap<CameraMode, Vec<(ActionKind, ActionHandle)>>,
    move_speed_multiplier: f32,
    pose: Pose,
    view_matrix: Mat4,
}

impl CameraController {
    /// Create a controller in [`CameraMode::Free`] with that mode's
    /// bindings installed and input reading active.
    #[must_use]
    pub fn new(registry: Rc<RefCell<ActionRegistry>>) -> Self {
        let pose = Pose::default();
        let mut controller = Self {
            registry,
            intake: Rc::new(RefCell::new(InputIntake::default())),
            mode: CameraMode::Free,
            active: true,
            followed: None,
            settings: CameraSettings::default(),
            bindings: HashMap::new(),
            move_speed_multiplier: 1.0,
            view_matrix: pose.view_matrix(),
            pose,
        };
        controller.install_bindings(CameraMode::Free);
        controller
    }

    /// Switch the active camera mode.
    ///
    /// Tears down every binding owned by the current mode, then installs
    /// the new mode's set, then flips the mode, in that order, so an
    /// action kind shared by both modes is never registered twice.
    /// Calling with the already-active mode leaves the bindings alone.
    pub fn set_camera_mode(&mut self, mode: CameraMode) {
        if mode == self.mode {
            return;
        }
        debug!(from = ?self.mode, to = ?mode, "switching camera mode");
        self.clear_bindings();
        self.install_bindings(mode);
        self.mode = mode;
    }

    /// Whether tick updates read input and mutate the pose. Deactivating
    /// freezes the pose and view transform but keeps bindings installed.
    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// Replace the followed entity reference. Validated lazily on each
    /// update, never eagerly.
    pub fn follow_entity(&mut self, entity: Option<Entity>) {
        self.followed = entity;
    }

    /// Multiplier applied to free-flight movement speed.
    pub fn set_debug_move_speed(&mut self, multiplier: f32) {
        self.move_speed_multiplier = multiplier;
    }

    /// Hard pose override: place the camera at `position` oriented by
    /// `yaw`/`pitch`, bypassing the active updater. The free, first-person
    /// and static blocks are rewritten so their next update resumes from
    /// here.
    pub fn set_transforms(&mut self, position: Vec3, yaw: f32, pitch: f32) {
        self.settings.free.position = position;
        self.settings.free.yaw = yaw;
        self.settings.free.pitch = pitch;

        self.settings.first_person.position = position;
        self.settings.first_person.yaw = yaw;
        self.settings.first_person.pitch = pitch;

        self.settings.floating.position = position;
        self.settings.floating.set_angles(yaw, pitch);

        self.pose = Pose::from_angles(position, yaw, pitch);
        self.view_matrix = self.pose.view_matrix();
    }

    /// Called on game tick. Reads the accumulated input snapshot exactly
    /// once, resolves the followed entity, and runs the active mode's
    /// updater. Does nothing while inactive.
    pub fn on_update(&mut self, delta_time: f32, world: &World) {
        if !self.active {
            return;
        }

        let input = self.intake.borrow_mut().take_snapshot();
        let followed = self
            .followed
            .and_then(|entity| resolve_transform(world, entity));

        self.pose = match self.mode {
            CameraMode::Free => free_flight::update(
                &mut self.settings.free,
                &input,
                delta_time,
                self.move_speed_multiplier,
            ),
            CameraMode::Static => floating::update(&self.settings.floating),
            CameraMode::FirstPerson => {
                first_person::update(&mut self.settings.first_person, &input, followed.as_ref())
            }
            CameraMode::ThirdPerson => third_person::update(
                &mut self.settings.third_person,
                &input,
                delta_time,
                followed.as_ref(),
            ),
            CameraMode::Viewer => viewer::update(&mut self.settings.viewer, &input),
        };
        self.view_matrix = self.pose.view_matrix();
    }

    /// Access to the settings of this camera.
    #[must_use]
    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    /// Mutable access to the settings of this camera.
    pub fn settings_mut(&mut self) -> &mut CameraSettings {
        &mut self.settings
    }

    /// The pose computed by the most recent update.
    #[must_use]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// The current world-to-camera view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    /// The active camera mode.
    #[must_use]
    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Whether tick updates currently run.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The bindings currently recorded for `mode`. Non-empty only for
    /// the active mode.
    #[must_use]
    pub fn registered_bindings(&self, mode: CameraMode) -> &[(ActionKind, ActionHandle)] {
        self.bindings.get(&mode).map_or(&[], |v| v.as_slice())
    }

    /// Register the binding set declared for `mode`, wiring each action
    /// into the shared input intake.
    fn install_bindings(&mut self, mode: CameraMode) {
        let mut registry = self.registry.borrow_mut();
        let entries = self.bindings.entry(mode).or_default();
        for &kind in binding_set(mode) {
            let intake = Rc::clone(&self.intake);
            let handle = registry.register(kind, move |event| {
                intake.borrow_mut().apply(kind, event);
            });
            entries.push((kind, handle));
        }
        debug!(?mode, count = entries.len(), "installed mode bindings");
    }

    /// Unregister every binding recorded for the active mode and empty
    /// its record. Completes before any new registration, so the input
    /// subsystem can no longer deliver events for the old handles.
    fn clear_bindings(&mut self) {
        let Some(entries) = self.bindings.remove(&self.mode) else {
            return;
        };
        let mut registry = self.registry.borrow_mut();
        for (kind, handle) in entries {
            if !registry.unregister(handle) {
                debug!(?kind, "binding handle was already dead");
            }
        }
    }
}
