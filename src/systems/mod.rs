mod input;
mod physics;

pub use input::InputSystem;
pub use physics::{PhysicsSystem, FALL_RATE};
