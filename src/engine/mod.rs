//! Host engine collaborator interface
//!
//! The simulation never renders, simulates gravity, or reads devices. A host
//! engine implements these traits and reports player contacts back as
//! `ContactEvent`s.

pub mod headless;

use glam::Vec2;

use crate::control::PlayerPose;
use crate::sim::{EntityId, Variant};

pub use headless::HeadlessEngine;

/// Output side of the host engine
pub trait Engine {
    /// Create the sprite and body for a new entity
    fn spawn(&mut self, id: EntityId, variant: Variant, pos: Vec2);
    /// Horizontal velocity of an entity body (pixels/s)
    fn set_velocity(&mut self, id: EntityId, vx: f32);
    /// Destroy an entity's sprite and body
    fn despawn(&mut self, id: EntityId);
    /// Freeze all physics (called once, on game over)
    fn pause_physics(&mut self);
    fn set_player_velocity_y(&mut self, vy: f32);
    fn set_player_pose(&mut self, pose: PlayerPose);
    /// Replace the HUD text line
    fn set_text(&mut self, text: &str);
}

/// Input side of the host engine
pub trait InputSource {
    fn is_jump_pressed(&self) -> bool;
    fn is_duck_pressed(&self) -> bool;
    fn is_grounded(&self) -> bool;
}
