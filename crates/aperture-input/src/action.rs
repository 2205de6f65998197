//! Action registry: connects typed action kinds to subscriber callbacks.
//!
//! Callers register a callback for an [`ActionKind`] and receive an
//! [`ActionHandle`] back. Raw device events are translated (by
//! [`BindingMap`](crate::BindingMap) or by tests directly) into
//! [`ActionEvent`]s and pushed through [`ActionRegistry::dispatch`], which
//! invokes every live callback for that kind. Handles are generational:
//! once unregistered, a stale handle can never reach a later occupant of
//! the same slot.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Semantic camera actions that can be bound to physical inputs.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum ActionKind {
    /// Move along the camera's forward axis (signed).
    MoveForward,
    /// Strafe along the camera's right axis (signed).
    MoveRight,
    /// Move along the camera's up axis (signed).
    MoveUp,
    /// Horizontal look delta (yaw).
    LookHorizontal,
    /// Vertical look delta (pitch).
    LookVertical,
    /// Horizontal drag delta in viewer mode.
    ViewHorizontal,
    /// Vertical drag delta in viewer mode.
    ViewVertical,
    /// Scroll wheel delta.
    Wheel,
    /// Viewer pan modifier (held).
    Pan,
    /// Viewer zoom modifier (held).
    Zoom,
    /// Viewer rotate modifier (held).
    Rotate,
    /// Viewer primary drag button (held).
    Click,
}

/// A single delivery to an action callback.
///
/// Digital actions report `pressed` edges with an intensity of 1.0 on
/// press and 0.0 on release. Analog actions carry a per-event delta in
/// `intensity` with `pressed` always true.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionEvent {
    /// Whether the physical input is currently engaged.
    pub pressed: bool,
    /// Axis delta or digital intensity.
    pub intensity: f32,
}

impl ActionEvent {
    /// A press/release edge of a digital input.
    #[must_use]
    pub fn digital(pressed: bool) -> Self {
        Self {
            pressed,
            intensity: if pressed { 1.0 } else { 0.0 },
        }
    }

    /// An analog delta (mouse axis, scroll wheel).
    #[must_use]
    pub fn analog(delta: f32) -> Self {
        Self {
            pressed: true,
            intensity: delta,
        }
    }
}

/// Opaque handle returned by [`ActionRegistry::register`].
///
/// Pairs a slot index with the generation it was issued under, so a
/// handle outliving its registration is detectably dead rather than
/// silently aliasing a newer registration in the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActionHandle {
    slot: u32,
    generation: u32,
}

type Callback = Box<dyn FnMut(ActionEvent)>;

struct Slot {
    generation: u32,
    entry: Option<(ActionKind, Callback)>,
}

/// Stores action callbacks and dispatches events to them synchronously.
///
/// Single-threaded by design: dispatch happens on the same thread that
/// registers and unregisters, so after [`unregister`](Self::unregister)
/// returns no further event can reach the removed callback.
#[derive(Default)]
pub struct ActionRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl ActionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `callback` for events of `kind`.
    pub fn register(
        &mut self,
        kind: ActionKind,
        callback: impl FnMut(ActionEvent) + 'static,
    ) -> ActionHandle {
        let entry = Some((kind, Box::new(callback) as Callback));
        let slot = match self.free.pop() {
            Some(index) => {
                self.slots[index as usize].entry = entry;
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    entry,
                });
                (self.slots.len() - 1) as u32
            }
        };
        let generation = self.slots[slot as usize].generation;
        debug!(?kind, slot, generation, "registered action callback");
        ActionHandle { slot, generation }
    }

    /// Remove the callback behind `handle`.
    ///
    /// Returns false if the handle is stale or was already unregistered.
    /// The slot's generation is bumped so the handle can never resolve
    /// to a future occupant.
    pub fn unregister(&mut self, handle: ActionHandle) -> bool {
        let Some(slot) = self.slots.get_mut(handle.slot as usize) else {
            return false;
        };
        if slot.generation != handle.generation {
            return false;
        }
        let Some((kind, _)) = slot.entry.take() else {
            return false;
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.slot);
        debug!(?kind, slot = handle.slot, "unregistered action callback");
        true
    }

    /// Whether `handle` still refers to a live registration.
    #[must_use]
    pub fn is_registered(&self, handle: ActionHandle) -> bool {
        self.slots
            .get(handle.slot as usize)
            .is_some_and(|s| s.generation == handle.generation && s.entry.is_some())
    }

    /// Number of live registrations across all kinds.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.entry.is_some()).count()
    }

    /// Deliver `event` to every live callback registered for `kind`,
    /// in registration (slot) order.
    pub fn dispatch(&mut self, kind: ActionKind, event: ActionEvent) {
        trace!(?kind, ?event, "dispatching action event");
        for slot in &mut self.slots {
            if let Some((registered_kind, callback)) = slot.entry.as_mut()
                && *registered_kind == kind
            {
                callback(event);
            }
        }
    }
}
