//! Runner Dash entry point
//!
//! Runs a headless session against the in-process engine and prints the
//! end-of-run summary as JSON.

use std::path::PathBuf;

use clap::Parser;
use runner_dash::consts::*;
use runner_dash::control::ControlInput;
use runner_dash::engine::HeadlessEngine;
use runner_dash::sim::{EntityKind, GameSession};
use runner_dash::{Game, Tuning};

/// Command line options
#[derive(Parser, Debug)]
#[command(name = "runner-dash")]
#[command(about = "Run a headless Runner Dash session and print its summary")]
struct Args {
    /// RNG seed for spawn lanes and catalog draws
    #[arg(long, default_value_t = 0x5EED)]
    seed: u64,

    /// Frames to simulate at 60 fps (default is ten minutes of play)
    #[arg(long, default_value_t = 60 * 60 * 10)]
    frames: u64,

    /// JSON tuning file; missing keys keep their defaults
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Jump over low enemies and duck under high ones automatically
    #[arg(long)]
    autopilot: bool,
}

/// Jump over ground-lane enemies, duck under high ones, ignore bonuses
fn autopilot(session: &GameSession, engine: &HeadlessEngine) -> (bool, bool) {
    let mut ahead: Option<(f32, f32)> = None;
    session.registry().for_each_live(EntityKind::Enemy, |e| {
        let dx = e.pos.x - PLAYER_X;
        if dx > -20.0 && dx < 110.0 && ahead.is_none_or(|(best, _)| dx < best) {
            ahead = Some((dx, e.pos.y));
        }
    });

    match ahead {
        Some((_, y)) if y >= 470.0 => (engine.player().vel_y >= 0.0, false),
        Some(_) => (false, true),
        None => (false, false),
    }
}

fn main() {
    env_logger::init();

    let args = Args::parse();

    let tuning = match &args.tuning {
        Some(path) => Tuning::load(path).unwrap_or_else(|e| {
            log::warn!("{e}; using default tuning");
            Tuning::default()
        }),
        None => Tuning::default(),
    };

    log::info!("Runner Dash (headless) starting with seed {:#x}", args.seed);

    let mut game = match Game::new(args.seed, tuning) {
        Ok(game) => game,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(2);
        }
    };
    let mut engine = HeadlessEngine::new();
    let mut now_ms = 0;

    for _ in 0..args.frames {
        if args.autopilot {
            let (jump, duck) = autopilot(game.session(), &engine);
            engine.hold(jump, duck);
        }

        let input = ControlInput::poll(&engine);
        game.update(now_ms, input, &mut engine);
        engine.step(FRAME_MS);

        for contact in engine.contacts(game.session().registry()) {
            game.on_contact(contact, &mut engine);
        }

        if game.session().is_over() {
            break;
        }
        now_ms += FRAME_MS;
    }

    log::info!("{}", engine.text());

    match serde_json::to_string_pretty(&game.session().summary()) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            log::error!("Failed to encode summary: {e}");
            std::process::exit(1);
        }
    }
}
