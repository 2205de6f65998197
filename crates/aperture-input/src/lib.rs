//! Input-action subsystem: typed camera actions, a callback registry with
//! generational handles, and configurable physical bindings.

pub mod action;
pub mod binding_map;

pub use action::{ActionEvent, ActionHandle, ActionKind, ActionRegistry};
pub use binding_map::{
    BindingMap, BindingMapError, Conflict, InputBinding, MouseAxisBinding, MouseButtonBinding,
    ScaledBinding,
};
