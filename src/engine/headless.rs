//! In-process engine without a window
//!
//! Mirrors sprites, integrates player gravity, and reports box overlaps
//! between the player and live entities. Used by the native runner and tests.

use std::collections::BTreeMap;

use glam::Vec2;

use super::{Engine, InputSource};
use crate::consts::*;
use crate::control::PlayerPose;
use crate::sim::{ContactEvent, EntityId, EntityRegistry, Variant};

/// Entity box half extent (32x32 sprites)
pub const ENTITY_HALF: Vec2 = Vec2::new(16.0, 16.0);
/// Player box half extents
pub const PLAYER_HALF_STANDING: Vec2 = Vec2::new(20.0, 48.0);
pub const PLAYER_HALF_DUCKING: Vec2 = Vec2::new(20.0, 24.0);

/// A mirrored entity sprite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub variant: Variant,
    pub vx: f32,
}

/// Player body (center position)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerBody {
    pub pos: Vec2,
    pub vel_y: f32,
    pub pose: PlayerPose,
}

impl PlayerBody {
    pub fn half_extents(&self) -> Vec2 {
        match self.pose {
            PlayerPose::Ducking => PLAYER_HALF_DUCKING,
            _ => PLAYER_HALF_STANDING,
        }
    }

    pub fn bottom(&self) -> f32 {
        self.pos.y + self.half_extents().y
    }
}

#[derive(Debug, Clone)]
pub struct HeadlessEngine {
    player: PlayerBody,
    sprites: BTreeMap<EntityId, Sprite>,
    paused: bool,
    text: String,
    jump_held: bool,
    duck_held: bool,
}

impl Default for HeadlessEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self {
            player: PlayerBody {
                pos: Vec2::new(PLAYER_X, PLAYER_START_Y),
                vel_y: 0.0,
                pose: PlayerPose::Running,
            },
            sprites: BTreeMap::new(),
            paused: false,
            text: String::new(),
            jump_held: false,
            duck_held: false,
        }
    }

    /// Set which buttons are held this frame
    pub fn hold(&mut self, jump: bool, duck: bool) {
        self.jump_held = jump;
        self.duck_held = duck;
    }

    pub fn player(&self) -> &PlayerBody {
        &self.player
    }

    pub fn sprites(&self) -> &BTreeMap<EntityId, Sprite> {
        &self.sprites
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Integrate player gravity over `dt_ms` and rest it on the ground
    pub fn step(&mut self, dt_ms: u64) {
        if self.paused {
            return;
        }
        let dt = dt_ms as f32 / 1000.0;
        self.player.vel_y += GRAVITY * dt;
        self.player.pos.y += self.player.vel_y * dt;

        let half = self.player.half_extents().y;
        if self.player.pos.y + half >= GROUND_Y {
            self.player.pos.y = GROUND_Y - half;
            self.player.vel_y = 0.0;
        }
    }

    /// Overlaps between the player and live entities, in id order. Nothing is
    /// reported while physics is paused.
    pub fn contacts(&self, registry: &EntityRegistry) -> Vec<ContactEvent> {
        if self.paused {
            return Vec::new();
        }
        let player_half = self.player.half_extents();
        registry
            .iter()
            .filter(|e| {
                let d = (e.pos - self.player.pos).abs();
                d.x < player_half.x + ENTITY_HALF.x && d.y < player_half.y + ENTITY_HALF.y
            })
            .map(|e| ContactEvent::new(e.id, e.kind()))
            .collect()
    }
}

impl Engine for HeadlessEngine {
    fn spawn(&mut self, id: EntityId, variant: Variant, _pos: Vec2) {
        self.sprites.insert(id, Sprite { variant, vx: 0.0 });
    }

    fn set_velocity(&mut self, id: EntityId, vx: f32) {
        if let Some(sprite) = self.sprites.get_mut(&id) {
            sprite.vx = vx;
        }
    }

    fn despawn(&mut self, id: EntityId) {
        self.sprites.remove(&id);
    }

    fn pause_physics(&mut self) {
        self.paused = true;
    }

    fn set_player_velocity_y(&mut self, vy: f32) {
        self.player.vel_y = vy;
    }

    fn set_player_pose(&mut self, pose: PlayerPose) {
        // Keep the feet where they are when the box changes height
        let bottom = self.player.bottom();
        self.player.pose = pose;
        self.player.pos.y = bottom - self.player.half_extents().y;
    }

    fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
    }
}

impl InputSource for HeadlessEngine {
    fn is_jump_pressed(&self) -> bool {
        self.jump_held
    }

    fn is_duck_pressed(&self) -> bool {
        self.duck_held
    }

    fn is_grounded(&self) -> bool {
        self.player.vel_y >= 0.0 && self.player.bottom() >= GROUND_Y - 0.5
    }
}
