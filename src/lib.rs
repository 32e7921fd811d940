//! Runner Dash - A side-scrolling jump-and-duck runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, scoring, game state)
//! - `game`: Drives a session against the host engine
//! - `control`: Player jump/duck control layer
//! - `engine`: Host engine collaborator traits and a headless implementation
//! - `tuning`: Data-driven game balance

pub mod control;
pub mod engine;
pub mod game;
pub mod hud;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Frame length the headless runner steps with (60 Hz)
    pub const FRAME_MS: u64 = 1000 / 60;

    /// Top of the ground strip (player feet rest on this line)
    pub const GROUND_Y: f32 = 540.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_START_Y: f32 = 450.0;
    pub const GRAVITY: f32 = 1000.0;

    /// Score defaults
    pub const START_SCORE: i64 = 100;
    pub const WIN_SCORE: i64 = 1000;
    pub const LOSE_SCORE: i64 = 0;

    /// Spawn defaults (milliseconds between emissions)
    pub const ENEMY_INTERVAL_MS: u64 = 2000;
    pub const BONUS_INTERVAL_MS: u64 = 10_000;
    pub const SPECIAL_INTERVAL_MS: u64 = 60_000;

    /// Off-screen spawn column and scroll speed (pixels/s, leftward)
    pub const SPAWN_X: f32 = 800.0;
    pub const SCROLL_SPEED: f32 = 200.0;
    /// Upward jump impulse (pixels/s, negative is up)
    pub const JUMP_VELOCITY: f32 = -600.0;
}
