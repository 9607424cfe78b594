//! Fruit Drop - A gravity-drop merge puzzle
//!
//! Core modules:
//! - `sim`: Simulation (piece physics, collisions, merges, game state)
//! - `config`: Construction-time tuning and validation
//! - `host`: Fixed-timestep driver with injected renderer and input

pub mod config;
pub mod host;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use host::{Host, InputFrame, InputSource, Renderer};
pub use sim::{Session, TickReport};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the host loop (60 Hz, one physics step per frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta the host will accept before clamping (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Well dimensions
    pub const WELL_WIDTH: f32 = 400.0;
    pub const WELL_HEIGHT: f32 = 600.0;

    /// Per-tick physics constants (not wall-clock scaled)
    pub const GRAVITY: f32 = 0.5;
    pub const FRICTION: f32 = 0.98;
    pub const RESTITUTION: f32 = 0.7;
    /// Cosmetic spin per tick (radians)
    pub const ROTATION_STEP: f32 = 0.1;

    /// Spawn defaults
    pub const SPAWN_HEIGHT: f32 = 50.0;
    pub const SPAWN_TIER_COUNT: usize = 3;

    /// Pieces further than this below the floor are garbage collected
    pub const CLEANUP_MARGIN: f32 = 100.0;
}
