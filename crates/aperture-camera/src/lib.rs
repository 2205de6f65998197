//! Camera control: the mode state machine, per-mode pose updaters, and
//! view-transform derivation.
//!
//! On every simulation tick the controller turns accumulated input and
//! the followed entity's transform into a camera [`Pose`](view::Pose),
//! from which the view matrix is derived for rendering. Five mutually
//! exclusive modes each own a private settings block; all of them route
//! orientation through the same yaw/pitch direction math.

pub mod controller;
pub mod direction;
pub mod first_person;
pub mod floating;
pub mod free_flight;
pub mod snapshot;
pub mod third_person;
pub mod view;
pub mod viewer;

pub use controller::{CameraController, CameraMode, CameraSettings, binding_set};
pub use direction::{direction_vectors, up_from};
pub use first_person::FirstPersonSettings;
pub use floating::FloatingSettings;
pub use free_flight::FreeFlightSettings;
pub use snapshot::{InputIntake, InputSnapshot};
pub use third_person::ThirdPersonSettings;
pub use view::Pose;
pub use viewer::ViewerSettings;
