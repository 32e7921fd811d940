//! Per-frame simulation tick
//!
//! Advances a session to a new elapsed time: move, spawn, prune, then check
//! the score bounds. A finished session is never touched again.

use super::event::GameEvent;
use super::state::GameSession;

/// Advance the session to `now_ms` of elapsed game time.
///
/// Time never runs backwards: an earlier `now_ms` than the previous tick is
/// treated as no elapsed time.
pub fn tick(session: &mut GameSession, now_ms: u64) {
    if session.is_over() {
        return;
    }

    let now_ms = now_ms.max(session.elapsed_ms);
    let dt_ms = session
        .last_tick_ms
        .map(|last| now_ms.saturating_sub(last))
        .unwrap_or(0);
    session.last_tick_ms = Some(now_ms);
    session.elapsed_ms = now_ms;
    session.ticks += 1;

    session.registry.advance(dt_ms);

    for category in session.scheduler.poll(now_ms) {
        session.spawn_category(category);
    }

    let expired = session.registry.prune();
    if !expired.is_empty() {
        log::debug!("Pruned {} off-screen entities", expired.len());
    }
    session.stats.expired += expired.len() as u32;
    session
        .events
        .extend(expired.into_iter().map(|id| GameEvent::Expired { id }));

    session.evaluate_thresholds();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::event::ContactEvent;
    use crate::sim::spawn::SpawnCategory;
    use crate::sim::state::{EntityKind, GamePhase, Variant};
    use crate::tuning::{SpawnPolicy, Tuning};
    use proptest::prelude::*;

    #[test]
    fn test_first_tick_spawns_each_category() {
        let mut session = GameSession::new(12345, Tuning::default()).unwrap();
        tick(&mut session, 0);

        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.registry().count(EntityKind::Enemy), 2);
        assert_eq!(session.registry().count(EntityKind::Bonus), 1);
        let special = session
            .registry()
            .iter()
            .find(|e| e.variant.is_special())
            .unwrap();
        assert_eq!(special.point_value, -100);
    }

    #[test]
    fn test_special_enemy_from_schedule() {
        let tuning = Tuning {
            start_score: 500,
            ..Tuning::default()
        };
        let mut session = GameSession::new(5, tuning).unwrap();
        tick(&mut session, 0);

        let special = session
            .registry()
            .iter()
            .find(|e| e.variant == Variant::SPECIAL)
            .map(|e| (e.id, e.point_value))
            .unwrap();
        assert_eq!(special.1, -500);

        let outcome = session
            .on_contact(&ContactEvent::new(special.0, EntityKind::Enemy))
            .unwrap();
        assert_eq!(outcome.score, 0);
        assert!(session.is_over());
        let termination = session.termination().unwrap();
        assert!(termination.special_contact);
        assert!(termination.threshold.is_some());
    }

    #[test]
    fn test_entity_scrolls_off_after_expected_ticks() {
        // Only the first tick spawns anything within this test's horizon
        let tuning = Tuning {
            enemy_interval_ms: 1_000_000,
            bonus_interval_ms: 1_000_000,
            special_interval_ms: 1_000_000,
            ..Tuning::default()
        };
        let mut session = GameSession::new(77, tuning).unwrap();
        tick(&mut session, 0);
        let id = session
            .registry()
            .iter()
            .find(|e| !e.variant.is_special() && e.kind() == EntityKind::Enemy)
            .map(|e| e.id)
            .unwrap();
        assert_eq!(session.registry().get(id).unwrap().pos.x, 800.0);

        // 200 px/s at 50 ms per tick is 10 px per tick: x hits 0 after 80
        // ticks and goes negative on the 81st
        let step = 50;
        for n in 1..=80u64 {
            tick(&mut session, n * step);
            let x = session.registry().get(id).unwrap().pos.x;
            assert!((x - (800.0 - 10.0 * n as f32)).abs() < 1e-3);
        }
        tick(&mut session, 81 * step);
        assert!(session.registry().get(id).is_none());

        let expired = session
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, GameEvent::Expired { id: gone } if *gone == id))
            .count();
        assert_eq!(expired, 1);
        assert_eq!(session.score(), 100);

        // Never revisited
        assert!(session.on_contact(&ContactEvent::new(id, EntityKind::Enemy)).is_none());
        tick(&mut session, 82 * step);
        assert_eq!(session.score(), 100);
    }

    #[test]
    fn test_game_over_tick_is_noop() {
        let mut session = GameSession::new(1, Tuning::default()).unwrap();
        tick(&mut session, 0);
        let special = session
            .registry()
            .iter()
            .find(|e| e.variant.is_special())
            .map(|e| e.id)
            .unwrap();
        session.on_contact(&ContactEvent::new(special, EntityKind::Enemy));
        assert!(session.is_over());
        session.drain_events();

        let live = session.registry().len();
        let ticks = session.ticks();
        for n in 1..100 {
            tick(&mut session, n * 1000);
        }
        assert_eq!(session.registry().len(), live);
        assert_eq!(session.ticks(), ticks);
        assert_eq!(session.elapsed_ms(), 0);
        assert!(session.drain_events().is_empty());
    }

    #[test]
    fn test_time_never_runs_backwards() {
        let mut session = GameSession::new(2, Tuning::default()).unwrap();
        tick(&mut session, 1000);
        let before: Vec<_> = session.registry().iter().map(|e| e.pos).collect();
        tick(&mut session, 500);
        let after: Vec<_> = session.registry().iter().map(|e| e.pos).collect();
        assert_eq!(before, after);
        assert_eq!(session.elapsed_ms(), 1000);
    }

    #[test]
    fn test_determinism() {
        // Two sessions with same seed should produce identical results
        let mut a = GameSession::new(99999, Tuning::default()).unwrap();
        let mut b = GameSession::new(99999, Tuning::default()).unwrap();
        for n in 0..600u64 {
            tick(&mut a, n * 100);
            tick(&mut b, n * 100);
        }
        let a_entities: Vec<_> = a.registry().iter().cloned().collect();
        let b_entities: Vec<_> = b.registry().iter().cloned().collect();
        assert_eq!(a_entities, b_entities);
        assert_eq!(a.drain_events(), b.drain_events());
    }

    #[test]
    fn test_merged_policy_spawns_one_per_interval() {
        let tuning = Tuning {
            spawn_policy: SpawnPolicy::Merged,
            special_interval_ms: 1_000_000,
            ..Tuning::default()
        };
        let mut session = GameSession::new(4, tuning).unwrap();
        for n in 0..10u64 {
            tick(&mut session, n * 2000);
        }
        let stats = session.stats();
        assert_eq!(stats.enemies_spawned + stats.bonuses_spawned, 10);
        assert_eq!(stats.specials_spawned, 1);
        assert_eq!(session.scheduler().next_due(SpawnCategory::Mixed), Some(20_000));
    }

    proptest! {
        #[test]
        fn prop_no_live_entity_off_screen(steps in prop::collection::vec(1u64..500, 1..300)) {
            let mut session = GameSession::new(21, Tuning::default()).unwrap();
            let mut now = 0;
            tick(&mut session, now);
            for step in steps {
                now += step;
                tick(&mut session, now);
                prop_assert!(session.registry().iter().all(|e| e.pos.x >= 0.0));
            }
        }

        #[test]
        fn prop_score_frozen_after_game_over(
            steps in prop::collection::vec(1u64..2000, 1..50),
            probes in prop::collection::vec(1u32..64, 1..50),
        ) {
            let mut session = GameSession::new(22, Tuning::default()).unwrap();
            tick(&mut session, 0);
            let special = session
                .registry()
                .iter()
                .find(|e| e.variant.is_special())
                .map(|e| e.id)
                .unwrap();
            session.on_contact(&ContactEvent::new(special, EntityKind::Enemy));
            let frozen = session.score();

            let mut now = 0;
            for (step, probe) in steps.into_iter().zip(probes) {
                now += step;
                tick(&mut session, now);
                for kind in [EntityKind::Enemy, EntityKind::Bonus] {
                    prop_assert!(session.on_contact(&ContactEvent::new(probe, kind)).is_none());
                }
                prop_assert_eq!(session.score(), frozen);
                prop_assert_eq!(session.phase(), GamePhase::GameOver);
            }
        }
    }
}
