//! Game session and core simulation types
//!
//! Everything a single run mutates lives in `GameSession`; nothing is global.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::event::{GameEvent, PlayerId};
use super::registry::{EntityId, EntityRegistry};
use super::scoring::{Scoring, Termination};
use super::spawn::{SpawnCategory, SpawnScheduler};
use crate::tuning::{Tuning, TuningError};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended (terminal)
    GameOver,
}

/// Broad entity class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Enemy,
    Bonus,
}

/// Enemy catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyVariant {
    Green,
    Blue,
    Red,
    Yellow,
    /// High-danger enemy: worth `-score` at spawn and ends the run on contact
    Special,
}

impl EnemyVariant {
    /// Ordinary enemies drawn uniformly by the scheduler. `Special` is not part of it.
    pub const CATALOG: [EnemyVariant; 4] = [
        EnemyVariant::Green,
        EnemyVariant::Blue,
        EnemyVariant::Red,
        EnemyVariant::Yellow,
    ];
}

/// Bonus catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusVariant {
    Red,
    Blue,
    Black,
}

impl BonusVariant {
    pub const CATALOG: [BonusVariant; 3] =
        [BonusVariant::Red, BonusVariant::Blue, BonusVariant::Black];
}

/// Tagged entity variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variant {
    Enemy(EnemyVariant),
    Bonus(BonusVariant),
}

impl Variant {
    pub const SPECIAL: Variant = Variant::Enemy(EnemyVariant::Special);

    pub fn kind(&self) -> EntityKind {
        match self {
            Variant::Enemy(_) => EntityKind::Enemy,
            Variant::Bonus(_) => EntityKind::Bonus,
        }
    }

    pub fn is_special(&self) -> bool {
        *self == Variant::SPECIAL
    }

    /// Point value for this variant given the score at spawn time
    pub fn point_value(&self, tuning: &Tuning, score: i64) -> i64 {
        let enemy = tuning.enemy_points;
        let bonus = tuning.bonus_points;
        match self {
            Variant::Enemy(EnemyVariant::Green) => enemy.green,
            Variant::Enemy(EnemyVariant::Blue) => enemy.blue,
            Variant::Enemy(EnemyVariant::Red) => enemy.red,
            Variant::Enemy(EnemyVariant::Yellow) => enemy.yellow,
            Variant::Enemy(EnemyVariant::Special) => -score,
            Variant::Bonus(BonusVariant::Red) => bonus.red,
            Variant::Bonus(BonusVariant::Blue) => bonus.blue,
            Variant::Bonus(BonusVariant::Black) => bonus.black,
        }
    }
}

/// A live enemy or bonus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub variant: Variant,
    /// Signed score delta applied on contact
    pub point_value: i64,
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        self.variant.kind()
    }
}

/// Counters for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub enemies_spawned: u32,
    pub specials_spawned: u32,
    pub bonuses_spawned: u32,
    pub expired: u32,
    pub enemy_contacts: u32,
    pub bonus_contacts: u32,
}

/// End-of-run report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    pub seed: u64,
    pub phase: GamePhase,
    pub score: i64,
    pub elapsed_ms: u64,
    pub ticks: u64,
    pub live_entities: usize,
    pub termination: Option<Termination>,
    pub stats: SessionStats,
}

/// One play of the game
#[derive(Debug, Clone)]
pub struct GameSession {
    pub(super) seed: u64,
    pub(super) tuning: Tuning,
    pub(super) player_id: PlayerId,
    pub(super) phase: GamePhase,
    pub(super) scoring: Scoring,
    pub(super) scheduler: SpawnScheduler,
    pub(super) registry: EntityRegistry,
    pub(super) rng: Pcg32,
    /// Latest elapsed time seen by `tick`
    pub(super) elapsed_ms: u64,
    pub(super) last_tick_ms: Option<u64>,
    pub(super) ticks: u64,
    pub(super) termination: Option<Termination>,
    pub(super) stats: SessionStats,
    /// Outbound events for the host engine, drained each frame
    pub(super) events: Vec<GameEvent>,
}

impl GameSession {
    /// Create a new session with the given seed.
    ///
    /// Rejects a `Tuning` that fails `validate`, so spawn and scoring never see
    /// an empty lane range or a zero interval.
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self {
            seed,
            player_id: PlayerId::PRIMARY,
            phase: GamePhase::Playing,
            scoring: Scoring::new(&tuning),
            scheduler: SpawnScheduler::new(&tuning),
            registry: EntityRegistry::new(),
            rng: Pcg32::seed_from_u64(seed),
            elapsed_ms: 0,
            last_tick_ms: None,
            ticks: 0,
            termination: None,
            stats: SessionStats::default(),
            events: Vec::new(),
            tuning,
        })
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn score(&self) -> i64 {
        self.scoring.score()
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn scheduler(&self) -> &SpawnScheduler {
        &self.scheduler
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Why the run ended, once it has
    pub fn termination(&self) -> Option<&Termination> {
        self.termination.as_ref()
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            seed: self.seed,
            phase: self.phase,
            score: self.score(),
            elapsed_ms: self.elapsed_ms,
            ticks: self.ticks,
            live_entities: self.registry.len(),
            termination: self.termination.clone(),
            stats: self.stats.clone(),
        }
    }

    /// Emit one entity for a due spawn category
    pub(super) fn spawn_category(&mut self, category: SpawnCategory) -> Option<EntityId> {
        let variant = category.choose_variant(&mut self.rng);
        self.spawn_variant(variant)
    }

    /// Spawn a specific variant at the off-screen column.
    ///
    /// The point value is fixed at this moment, so a `Special` enemy carries
    /// the negation of the current score. Returns `None` once the run is over.
    pub fn spawn_variant(&mut self, variant: Variant) -> Option<EntityId> {
        if self.is_over() {
            return None;
        }

        let point_value = variant.point_value(&self.tuning, self.score());
        let y = self
            .rng
            .random_range(self.tuning.lane_min_y..=self.tuning.lane_max_y);
        let pos = Vec2::new(self.tuning.spawn_x, y);
        let vel = Vec2::new(-self.tuning.scroll_speed, 0.0);
        let id = self.registry.insert(variant, point_value, pos, vel);

        match variant {
            Variant::Enemy(EnemyVariant::Special) => {
                self.stats.specials_spawned += 1;
                log::info!("Special enemy {} spawned worth {}", id, point_value);
            }
            Variant::Enemy(_) => {
                self.stats.enemies_spawned += 1;
                log::debug!("Enemy {} {:?} spawned at y={:.0}", id, variant, y);
            }
            Variant::Bonus(_) => {
                self.stats.bonuses_spawned += 1;
                log::debug!("Bonus {} {:?} spawned at y={:.0}", id, variant, y);
            }
        }

        self.events.push(GameEvent::Spawned {
            id,
            variant,
            pos,
            vel,
        });
        Some(id)
    }

    /// Enter the terminal phase. Later calls are ignored.
    pub(super) fn end(&mut self, termination: Termination) {
        if self.is_over() {
            return;
        }
        self.phase = GamePhase::GameOver;
        let final_score = self.score();
        log::info!(
            "Game over at {} ms: final score {} ({:?})",
            self.elapsed_ms,
            final_score,
            termination
        );
        self.events.push(GameEvent::GameOver {
            final_score,
            termination: termination.clone(),
        });
        self.termination = Some(termination);
    }
}
