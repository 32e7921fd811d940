//! Session driver
//!
//! Owns a `GameSession` and the player control layer, and translates session
//! events into host engine calls once per frame.

use crate::control::{ControlInput, PlayerControl};
use crate::engine::Engine;
use crate::hud;
use crate::sim::{ContactEvent, ContactOutcome, GameEvent, GameSession, tick};
use crate::tuning::{Tuning, TuningError};

pub struct Game {
    session: GameSession,
    control: PlayerControl,
}

impl Game {
    pub fn new(seed: u64, tuning: Tuning) -> Result<Self, TuningError> {
        let control = PlayerControl::new(tuning.jump_velocity);
        Ok(Self {
            session: GameSession::new(seed, tuning)?,
            control,
        })
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Run one frame at `now_ms` elapsed. A no-op once the run is over.
    pub fn update<E: Engine + ?Sized>(&mut self, now_ms: u64, input: ControlInput, engine: &mut E) {
        if self.session.is_over() {
            return;
        }

        let out = self.control.update(input);
        if let Some(vy) = out.velocity_y {
            engine.set_player_velocity_y(vy);
        }
        if let Some(pose) = out.pose {
            engine.set_player_pose(pose);
        }

        tick(&mut self.session, now_ms);
        self.flush(engine);

        if !self.session.is_over() {
            engine.set_text(&hud::score_line(self.session.score()));
        }
    }

    /// Apply a contact reported by the host physics
    pub fn on_contact<E: Engine + ?Sized>(
        &mut self,
        contact: ContactEvent,
        engine: &mut E,
    ) -> Option<ContactOutcome> {
        let outcome = self.session.on_contact(&contact);
        self.flush(engine);
        outcome
    }

    fn flush<E: Engine + ?Sized>(&mut self, engine: &mut E) {
        for event in self.session.drain_events() {
            match event {
                GameEvent::Spawned { id, variant, pos, vel } => {
                    engine.spawn(id, variant, pos);
                    engine.set_velocity(id, vel.x);
                }
                GameEvent::Expired { id } | GameEvent::Collected { id, .. } => {
                    engine.despawn(id);
                }
                GameEvent::GameOver { final_score, .. } => {
                    engine.pause_physics();
                    engine.set_text(&hud::game_over_line(final_score));
                }
            }
        }
    }
}
