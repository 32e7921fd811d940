//! Time-driven spawn scheduling
//!
//! Each spawn category keeps a watermark: the elapsed time at or after which it
//! may emit again. Emitting moves the watermark one interval past the current
//! tick time, so a category never fires twice within its interval.

use rand::Rng;

use super::state::{BonusVariant, EnemyVariant, Variant};
use crate::tuning::{SpawnPolicy, Tuning};

/// A spawn class with its own watermark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpawnCategory {
    /// Ordinary enemy from the catalog
    Enemy,
    /// Bonus from the catalog
    Bonus,
    /// Coin flip between `Enemy` and `Bonus` (merged policy)
    Mixed,
    /// The high-danger enemy
    Special,
}

impl SpawnCategory {
    /// Pick the variant to emit. Catalog draws are uniform.
    pub fn choose_variant(&self, rng: &mut impl Rng) -> Variant {
        match self {
            SpawnCategory::Enemy => {
                let i = rng.random_range(0..EnemyVariant::CATALOG.len());
                Variant::Enemy(EnemyVariant::CATALOG[i])
            }
            SpawnCategory::Bonus => {
                let i = rng.random_range(0..BonusVariant::CATALOG.len());
                Variant::Bonus(BonusVariant::CATALOG[i])
            }
            SpawnCategory::Mixed => {
                if rng.random_bool(0.5) {
                    SpawnCategory::Enemy.choose_variant(rng)
                } else {
                    SpawnCategory::Bonus.choose_variant(rng)
                }
            }
            SpawnCategory::Special => Variant::SPECIAL,
        }
    }
}

/// Next-eligible time for one category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Watermark {
    pub category: SpawnCategory,
    pub interval_ms: u64,
    pub next_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnScheduler {
    watermarks: Vec<Watermark>,
}

impl SpawnScheduler {
    pub fn new(tuning: &Tuning) -> Self {
        let first = tuning.first_spawn_ms;
        let mark = |category, interval_ms| Watermark {
            category,
            interval_ms,
            next_ms: first,
        };

        let watermarks = match tuning.spawn_policy {
            SpawnPolicy::PerCategory => vec![
                mark(SpawnCategory::Enemy, tuning.enemy_interval_ms),
                mark(SpawnCategory::Bonus, tuning.bonus_interval_ms),
                mark(SpawnCategory::Special, tuning.special_interval_ms),
            ],
            SpawnPolicy::Merged => vec![
                mark(SpawnCategory::Mixed, tuning.merged_interval_ms),
                mark(SpawnCategory::Special, tuning.special_interval_ms),
            ],
        };
        Self { watermarks }
    }

    /// Categories due at `now_ms`, in watermark order. Each due watermark
    /// moves to `now_ms + interval`.
    pub fn poll(&mut self, now_ms: u64) -> Vec<SpawnCategory> {
        let mut due = Vec::new();
        for mark in &mut self.watermarks {
            if mark.next_ms <= now_ms {
                mark.next_ms = now_ms.saturating_add(mark.interval_ms);
                due.push(mark.category);
            }
        }
        due
    }

    pub fn watermarks(&self) -> &[Watermark] {
        &self.watermarks
    }

    /// Next eligible time for a category, if the policy schedules it
    pub fn next_due(&self, category: SpawnCategory) -> Option<u64> {
        self.watermarks
            .iter()
            .find(|m| m.category == category)
            .map(|m| m.next_ms)
    }
}
