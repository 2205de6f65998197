//! Physical binding layer: maps keyboard and mouse inputs to [`ActionKind`]s.
//!
//! [`BindingMap`] is the user-editable table (RON on disk) that decides
//! which physical input feeds which action, and with what sign. The
//! `route_*` methods translate raw device events into
//! [`ActionRegistry::dispatch`] calls.

use crate::action::{ActionEvent, ActionKind, ActionRegistry};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Serde helper module for [`KeyCode`] which doesn't implement serde natively.
mod keycode_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use winit::keyboard::KeyCode;

    /// Serialize a [`KeyCode`] as its debug string (e.g., `"KeyW"`).
    pub fn serialize<S: Serializer>(code: &KeyCode, s: S) -> Result<S::Ok, S::Error> {
        format!("{code:?}").serialize(s)
    }

    /// Deserialize a [`KeyCode`] from its debug string.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<KeyCode, D::Error> {
        let name = String::deserialize(d)?;
        string_to_keycode(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown key: {name}")))
    }

    fn string_to_keycode(s: &str) -> Option<KeyCode> {
        // Match the Debug output of KeyCode variants
        Some(match s {
            "KeyA" => KeyCode::KeyA,
            "KeyD" => KeyCode::KeyD,
            "KeyE" => KeyCode::KeyE,
            "KeyQ" => KeyCode::KeyQ,
            "KeyS" => KeyCode::KeyS,
            "KeyW" => KeyCode::KeyW,
            "Space" => KeyCode::Space,
            "Enter" => KeyCode::Enter,
            "Escape" => KeyCode::Escape,
            "Tab" => KeyCode::Tab,
            "ShiftLeft" => KeyCode::ShiftLeft,
            "ShiftRight" => KeyCode::ShiftRight,
            "ControlLeft" => KeyCode::ControlLeft,
            "ControlRight" => KeyCode::ControlRight,
            "AltLeft" => KeyCode::AltLeft,
            "AltRight" => KeyCode::AltRight,
            "ArrowUp" => KeyCode::ArrowUp,
            "ArrowDown" => KeyCode::ArrowDown,
            "ArrowLeft" => KeyCode::ArrowLeft,
            "ArrowRight" => KeyCode::ArrowRight,
            _ => return None,
        })
    }
}

/// Which mouse axis to read for an analog binding.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum MouseAxisBinding {
    /// Horizontal mouse delta.
    X,
    /// Vertical mouse delta.
    Y,
    /// Scroll wheel.
    Scroll,
}

/// Wrapper for [`winit::event::MouseButton`] that supports serde.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum MouseButtonBinding {
    /// Left mouse button.
    Left,
    /// Right mouse button.
    Right,
    /// Middle mouse button.
    Middle,
}

impl MouseButtonBinding {
    /// Convert to the winit [`MouseButton`] type.
    #[must_use]
    pub fn to_winit(self) -> MouseButton {
        match self {
            Self::Left => MouseButton::Left,
            Self::Right => MouseButton::Right,
            Self::Middle => MouseButton::Middle,
        }
    }
}

/// A physical input source that can be bound to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputBinding {
    /// A keyboard key (physical scan code).
    Key(#[serde(with = "keycode_serde")] KeyCode),
    /// A mouse button.
    MouseButton(MouseButtonBinding),
    /// A mouse axis (analog).
    MouseAxis(MouseAxisBinding),
}

/// A binding plus the sign/scale it contributes to its action.
///
/// Signed axes (e.g. `MoveForward`) are fed by two keys with opposite
/// scales rather than by two separate action kinds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaledBinding {
    /// The physical input.
    pub binding: InputBinding,
    /// Multiplier applied to the event intensity.
    pub scale: f32,
}

impl ScaledBinding {
    /// Binding contributing with its raw intensity.
    #[must_use]
    pub fn positive(binding: InputBinding) -> Self {
        Self {
            binding,
            scale: 1.0,
        }
    }

    /// Binding contributing with inverted sign.
    #[must_use]
    pub fn negative(binding: InputBinding) -> Self {
        Self {
            binding,
            scale: -1.0,
        }
    }
}

/// A binding conflict: the same physical input feeds multiple actions.
#[derive(Debug, Clone)]
pub struct Conflict {
    /// The duplicated physical input.
    pub binding: InputBinding,
    /// Actions that share this binding.
    pub actions: Vec<ActionKind>,
}

/// Errors from persisting a [`BindingMap`].
#[derive(Debug, thiserror::Error)]
pub enum BindingMapError {
    /// Writing the file failed.
    #[error("could not write binding file: {0}")]
    Io(#[from] std::io::Error),
    /// RON serialization failed.
    #[error("could not serialize bindings: {0}")]
    Serialize(#[from] ron::Error),
}

/// Maps [`ActionKind`]s to lists of [`ScaledBinding`]s.
///
/// Multiple bindings per action are supported; each event is routed to
/// every action its physical input is bound to. Serializable to RON for
/// user-editable config files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingMap {
    /// The binding table.
    pub bindings: HashMap<ActionKind, Vec<ScaledBinding>>,
}

impl Default for BindingMap {
    fn default() -> Self {
        Self::default_camera()
    }
}

impl BindingMap {
    /// Create an empty binding map with no bindings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Standard camera bindings: WASD + QE for flight, mouse for look,
    /// modifier keys for the viewer drags.
    ///
    /// Mouse Y is inverted for the look/view axes so that dragging up
    /// pitches the camera up.
    #[must_use]
    pub fn default_camera() -> Self {
        let mut bindings: HashMap<ActionKind, Vec<ScaledBinding>> = HashMap::new();

        bindings.insert(
            ActionKind::MoveForward,
            vec![
                ScaledBinding::positive(InputBinding::Key(KeyCode::KeyW)),
                ScaledBinding::negative(InputBinding::Key(KeyCode::KeyS)),
            ],
        );
        bindings.insert(
            ActionKind::MoveRight,
            vec![
                ScaledBinding::positive(InputBinding::Key(KeyCode::KeyD)),
                ScaledBinding::negative(InputBinding::Key(KeyCode::KeyA)),
            ],
        );
        bindings.insert(
            ActionKind::MoveUp,
            vec![
                ScaledBinding::positive(InputBinding::Key(KeyCode::KeyE)),
                ScaledBinding::negative(InputBinding::Key(KeyCode::KeyQ)),
            ],
        );
        bindings.insert(
            ActionKind::LookHorizontal,
            vec![ScaledBinding::positive(InputBinding::MouseAxis(
                MouseAxisBinding::X,
            ))],
        );
        bindings.insert(
            ActionKind::LookVertical,
            vec![ScaledBinding::negative(InputBinding::MouseAxis(
                MouseAxisBinding::Y,
            ))],
        );
        bindings.insert(
            ActionKind::ViewHorizontal,
            vec![ScaledBinding::positive(InputBinding::MouseAxis(
                MouseAxisBinding::X,
            ))],
        );
        bindings.insert(
            ActionKind::ViewVertical,
            vec![ScaledBinding::negative(InputBinding::MouseAxis(
                MouseAxisBinding::Y,
            ))],
        );
        bindings.insert(
            ActionKind::Wheel,
            vec![ScaledBinding::positive(InputBinding::MouseAxis(
                MouseAxisBinding::Scroll,
            ))],
        );
        bindings.insert(
            ActionKind::Pan,
            vec![ScaledBinding::positive(InputBinding::Key(
                KeyCode::ShiftLeft,
            ))],
        );
        bindings.insert(
            ActionKind::Zoom,
            vec![ScaledBinding::positive(InputBinding::Key(
                KeyCode::ControlLeft,
            ))],
        );
        bindings.insert(
            ActionKind::Rotate,
            vec![ScaledBinding::positive(InputBinding::Key(
                KeyCode::AltLeft,
            ))],
        );
        bindings.insert(
            ActionKind::Click,
            vec![ScaledBinding::positive(InputBinding::MouseButton(
                MouseButtonBinding::Left,
            ))],
        );

        Self { bindings }
    }

    /// Set the bindings for an action, replacing any existing ones.
    pub fn set_bindings(&mut self, action: ActionKind, bindings: Vec<ScaledBinding>) {
        self.bindings.insert(action, bindings);
    }

    /// Get the bindings for an action.
    #[must_use]
    pub fn get_bindings(&self, action: &ActionKind) -> &[ScaledBinding] {
        self.bindings.get(action).map_or(&[], |v| v.as_slice())
    }

    /// Route a key press/release into the registry.
    pub fn route_key(&self, registry: &mut ActionRegistry, key: KeyCode, pressed: bool) {
        self.route(registry, InputBinding::Key(key), |scale| ActionEvent {
            pressed,
            intensity: if pressed { scale } else { 0.0 },
        });
    }

    /// Route a mouse button press/release into the registry.
    pub fn route_mouse_button(
        &self,
        registry: &mut ActionRegistry,
        button: MouseButtonBinding,
        pressed: bool,
    ) {
        self.route(registry, InputBinding::MouseButton(button), |scale| {
            ActionEvent {
                pressed,
                intensity: if pressed { scale } else { 0.0 },
            }
        });
    }

    /// Route a mouse axis delta into the registry.
    pub fn route_mouse_axis(
        &self,
        registry: &mut ActionRegistry,
        axis: MouseAxisBinding,
        delta: f32,
    ) {
        self.route(registry, InputBinding::MouseAxis(axis), |scale| {
            ActionEvent::analog(delta * scale)
        });
    }

    fn route(
        &self,
        registry: &mut ActionRegistry,
        physical: InputBinding,
        event: impl Fn(f32) -> ActionEvent,
    ) {
        for (action, bindings) in &self.bindings {
            for scaled in bindings {
                if scaled.binding == physical {
                    registry.dispatch(*action, event(scaled.scale));
                }
            }
        }
    }

    /// Detect all binding conflicts (same physical input in multiple
    /// actions). Sharing across actions owned by different camera modes
    /// is legitimate; this is a diagnostic for rebind UIs, not an error.
    #[must_use]
    pub fn detect_conflicts(&self) -> Vec<Conflict> {
        let mut seen: HashMap<InputBinding, Vec<ActionKind>> = HashMap::new();

        for (action, bindings) in &self.bindings {
            for scaled in bindings {
                seen.entry(scaled.binding).or_default().push(*action);
            }
        }

        seen.into_iter()
            .filter(|(_, actions)| actions.len() > 1)
            .map(|(binding, actions)| Conflict { binding, actions })
            .collect()
    }

    /// Serialize to RON string.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Deserialize from RON string.
    ///
    /// # Errors
    /// Returns an error if the RON string is malformed.
    pub fn from_ron(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }

    /// Save the binding map to a RON file at `path`.
    ///
    /// # Errors
    /// Returns an error if serialization or file writing fails.
    pub fn save(&self, path: &Path) -> Result<(), BindingMapError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let ron_str = self.to_ron()?;
        std::fs::write(path, ron_str)?;
        Ok(())
    }

    /// Load a binding map from a RON file at `path`.
    ///
    /// Falls back to [`BindingMap::default`] if the file is missing or
    /// malformed, logging a warning in either case.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_ron(&contents) {
                Ok(map) => map,
                Err(e) => {
                    warn!(
                        "Malformed binding file {}: {e}; using defaults",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!(
                    "Could not read binding file {}: {e}; using defaults",
                    path.display()
                );
                Self::default()
            }
        }
    }

    /// Returns the platform config path for `camera_bindings.ron`.
    #[must_use]
    pub fn default_config_path() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|d| d.join("aperture").join("camera_bindings.ron"))
    }
}
