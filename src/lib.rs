pub mod clock;
pub mod engine;
pub mod input;
pub mod render;
pub mod scenario;
pub mod systems;
pub mod world;

pub use engine::{Engine, EngineBuilder, EngineSettings, EngineState};
pub use scenario::Scenario;
pub use world::{Entity, World};
