use runner_dash::consts::FRAME_MS;
use runner_dash::control::ControlInput;
use runner_dash::engine::HeadlessEngine;
use runner_dash::sim::{GamePhase, GameSession};
use runner_dash::{Game, Tuning};

/// One host frame: input, tick, physics, contacts
fn frame(game: &mut Game, engine: &mut HeadlessEngine, now_ms: u64) {
    let input = ControlInput::poll(&*engine);
    game.update(now_ms, input, engine);
    engine.step(FRAME_MS);
    for contact in engine.contacts(game.session().registry()) {
        game.on_contact(contact, engine);
    }
}

fn run_until_over(game: &mut Game, engine: &mut HeadlessEngine, max_frames: u64) -> u64 {
    let mut now_ms = 0;
    for _ in 0..max_frames {
        frame(game, engine, now_ms);
        if game.session().is_over() {
            break;
        }
        now_ms += FRAME_MS;
    }
    now_ms
}

fn assert_sprites_mirror_registry(session: &GameSession, engine: &HeadlessEngine) {
    let live: Vec<_> = session.registry().iter().map(|e| e.id).collect();
    let sprites: Vec<_> = engine.sprites().keys().copied().collect();
    assert_eq!(live, sprites);
}

#[test]
fn idle_player_is_caught_by_the_opening_wave() {
    let mut game = Game::new(2024, Tuning::default()).unwrap();
    let mut engine = HeadlessEngine::new();

    let ended_at = run_until_over(&mut game, &mut engine, 60 * 30);
    let session = game.session();

    // Everything spawned at t=0 shares a column and reaches the player together;
    // the special enemy among them ends the run
    assert_eq!(session.phase(), GamePhase::GameOver);
    assert!(session.termination().unwrap().special_contact);
    assert!(ended_at < 4000, "ended at {ended_at} ms");

    assert!(engine.is_paused());
    assert_eq!(
        engine.text(),
        format!("Game Over! Final Score: {}", session.score())
    );
    assert_sprites_mirror_registry(session, &engine);
}

#[test]
fn hud_tracks_score_while_playing() {
    let mut game = Game::new(7, Tuning::default()).unwrap();
    let mut engine = HeadlessEngine::new();

    let mut now_ms = 0;
    for _ in 0..60 {
        frame(&mut game, &mut engine, now_ms);
        assert_eq!(engine.text(), format!("Score: {}", game.session().score()));
        assert_sprites_mirror_registry(game.session(), &engine);
        now_ms += FRAME_MS;
    }
    assert_eq!(game.session().phase(), GamePhase::Playing);
}

#[test]
fn nothing_changes_after_game_over() {
    let mut game = Game::new(99, Tuning::default()).unwrap();
    let mut engine = HeadlessEngine::new();
    let ended_at = run_until_over(&mut game, &mut engine, 60 * 30);
    assert!(game.session().is_over());

    let summary = game.session().summary();
    let text = engine.text().to_string();
    let player = *engine.player();

    let mut now_ms = ended_at;
    for _ in 0..600 {
        now_ms += FRAME_MS;
        engine.hold(true, false);
        frame(&mut game, &mut engine, now_ms);
    }

    let after = game.session().summary();
    assert_eq!(after.score, summary.score);
    assert_eq!(after.ticks, summary.ticks);
    assert_eq!(after.stats, summary.stats);
    assert_eq!(after.live_entities, summary.live_entities);
    assert_eq!(engine.text(), text);
    assert_eq!(*engine.player(), player);
}

#[test]
fn same_seed_same_run() {
    let play = |seed| {
        let mut game = Game::new(seed, Tuning::default()).unwrap();
        let mut engine = HeadlessEngine::new();
        run_until_over(&mut game, &mut engine, 60 * 30);
        serde_json::to_string(&game.session().summary()).unwrap()
    };
    assert_eq!(play(31337), play(31337));
}
