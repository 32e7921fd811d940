//! Events crossing the simulation boundary
//!
//! `ContactEvent` flows in from the host's physics; `GameEvent` flows out to
//! the host's rendering and HUD.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::registry::EntityId;
use super::scoring::Termination;
use super::state::{EntityKind, Variant};

/// Identifies the player body in contact reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl PlayerId {
    pub const PRIMARY: PlayerId = PlayerId(0);
}

/// Overlap between the player and a live entity, as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactEvent {
    pub player_id: PlayerId,
    pub entity_id: EntityId,
    pub kind: EntityKind,
}

impl ContactEvent {
    pub fn new(entity_id: EntityId, kind: EntityKind) -> Self {
        Self {
            player_id: PlayerId::PRIMARY,
            entity_id,
            kind,
        }
    }
}

/// Something the host should react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Entity created at the off-screen column
    Spawned {
        id: EntityId,
        variant: Variant,
        pos: Vec2,
        vel: Vec2,
    },
    /// Entity scrolled past the left edge (no score effect)
    Expired { id: EntityId },
    /// Entity touched by the player and destroyed
    Collected {
        id: EntityId,
        variant: Variant,
        delta: i64,
        score: i64,
    },
    /// Run ended
    GameOver {
        final_score: i64,
        termination: Termination,
    },
}
