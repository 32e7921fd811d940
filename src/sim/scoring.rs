//! Contact resolution and end-of-run thresholds

use serde::{Deserialize, Serialize};

use super::event::{ContactEvent, GameEvent};
use super::registry::EntityId;
use super::state::{EntityKind, GameSession, Variant};
use crate::tuning::Tuning;

/// Which score bound ended the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Threshold {
    /// `score >= win_score`
    Upper,
    /// `score <= lose_score`
    Lower,
}

/// Cause(s) of a game over. Both may hold at once (special enemy contact that
/// also drives the score to the lower bound).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Termination {
    pub threshold: Option<Threshold>,
    pub special_contact: bool,
}

/// Running score with its two terminal bounds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoring {
    score: i64,
    win_score: i64,
    lose_score: i64,
}

impl Scoring {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: tuning.start_score,
            win_score: tuning.win_score,
            lose_score: tuning.lose_score,
        }
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    /// Add a signed delta and return the new score
    pub fn apply(&mut self, delta: i64) -> i64 {
        self.score = self.score.saturating_add(delta);
        self.score
    }

    /// The bound the current score has reached, if any
    pub fn threshold(&self) -> Option<Threshold> {
        if self.score >= self.win_score {
            Some(Threshold::Upper)
        } else if self.score <= self.lose_score {
            Some(Threshold::Lower)
        } else {
            None
        }
    }
}

/// Result of a contact that was applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactOutcome {
    pub entity_id: EntityId,
    pub variant: Variant,
    pub delta: i64,
    pub score: i64,
    /// The contact ended the run
    pub ended: bool,
}

impl GameSession {
    /// Apply one contact reported by the host physics.
    ///
    /// Returns `None` when nothing changed: the run is over, the entity is no
    /// longer live, or the report does not match the entity.
    pub fn on_contact(&mut self, contact: &ContactEvent) -> Option<ContactOutcome> {
        if self.is_over() {
            return None;
        }
        if contact.player_id != self.player_id {
            log::debug!("Ignoring contact from unknown player {:?}", contact.player_id);
            return None;
        }
        let Some(entity) = self.registry.get(contact.entity_id) else {
            log::debug!("Ignoring contact with dead entity {}", contact.entity_id);
            return None;
        };
        if entity.kind() != contact.kind {
            log::debug!(
                "Ignoring contact with entity {}: reported {:?}, is {:?}",
                contact.entity_id,
                contact.kind,
                entity.kind()
            );
            return None;
        }

        match contact.kind {
            EntityKind::Enemy => self.on_enemy_contact(contact.entity_id),
            EntityKind::Bonus => self.on_bonus_contact(contact.entity_id),
        }
    }

    /// Player hit an enemy: apply its (negative) value and destroy it. The
    /// special enemy ends the run whatever the resulting score.
    pub fn on_enemy_contact(&mut self, id: EntityId) -> Option<ContactOutcome> {
        self.resolve(id, EntityKind::Enemy)
    }

    /// Player touched a bonus: apply its value and destroy it
    pub fn on_bonus_contact(&mut self, id: EntityId) -> Option<ContactOutcome> {
        self.resolve(id, EntityKind::Bonus)
    }

    /// End the run if the score sits on a bound
    pub fn evaluate_thresholds(&mut self) -> bool {
        if self.is_over() {
            return true;
        }
        match self.scoring.threshold() {
            Some(threshold) => {
                self.end(Termination {
                    threshold: Some(threshold),
                    special_contact: false,
                });
                true
            }
            None => false,
        }
    }

    fn resolve(&mut self, id: EntityId, kind: EntityKind) -> Option<ContactOutcome> {
        if self.is_over() || self.registry.get(id)?.kind() != kind {
            return None;
        }
        let entity = self.registry.remove(id)?;
        let delta = entity.point_value;
        let score = self.scoring.apply(delta);

        match kind {
            EntityKind::Enemy => self.stats.enemy_contacts += 1,
            EntityKind::Bonus => self.stats.bonus_contacts += 1,
        }
        log::debug!(
            "Contact with {} {:?}: {:+} -> {}",
            id,
            entity.variant,
            delta,
            score
        );
        self.events.push(GameEvent::Collected {
            id,
            variant: entity.variant,
            delta,
            score,
        });

        let special_contact = entity.variant.is_special();
        let threshold = self.scoring.threshold();
        let ended = special_contact || threshold.is_some();
        if ended {
            self.end(Termination {
                threshold,
                special_contact,
            });
        }

        Some(ContactOutcome {
            entity_id: id,
            variant: entity.variant,
            delta,
            score,
            ended,
        })
    }
}
