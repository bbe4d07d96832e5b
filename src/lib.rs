pub mod assets;
pub mod bus;
pub mod character;
pub mod distraction;
pub mod fsm;
pub mod geometry;
pub mod input;
pub mod settings;
pub mod sprite;
pub mod states;
pub mod window;

/// Velocity components at or below this magnitude never flip orientation.
/// Keeps near-zero float jitter from flickering the sprite direction.
pub const ORIENTATION_EPSILON: f32 = 0.01;

/// Simulation ticks per second for the fixed-timestep host loop.
pub const TARGET_UPS: u32 = 60;
