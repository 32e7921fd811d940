//! Deterministic simulation module
//!
//! All gameplay rules live here. This module must be pure and deterministic:
//! - Elapsed time comes from the caller
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod event;
pub mod registry;
pub mod scoring;
pub mod spawn;
pub mod state;
pub mod tick;

pub use event::{ContactEvent, GameEvent, PlayerId};
pub use registry::{EntityId, EntityRegistry};
pub use scoring::{ContactOutcome, Scoring, Termination, Threshold};
pub use spawn::{SpawnCategory, SpawnScheduler, Watermark};
pub use state::{
    BonusVariant, EnemyVariant, Entity, EntityKind, GamePhase, GameSession, SessionStats,
    SessionSummary, Variant,
};
pub use tick::tick;
