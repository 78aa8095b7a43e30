//! Arena shooter headless driver
//!
//! Runs the simulation at its fixed rate with a scripted player: strafe,
//! aim at the nearest hostile, fire, and swap weapons now and then. Useful for
//! soak-testing room generation and combat without a frontend.
//!
//! Usage: `arena-shooter [settings.json] [ticks] [snapshot.json]`
//!
//! When a snapshot path is given the final session is written there as JSON.

use glam::Vec2;

use arena_shooter::Settings;
use arena_shooter::sim::{GameState, MoveIntent, TickInput, tick};

const DEFAULT_TICKS: u64 = 3600;

fn main() {
    env_logger::init();
    log::info!("Arena shooter (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(&path).unwrap_or_else(|e| {
            log::warn!("{e}, using defaults");
            Settings::default()
        }),
        None => Settings::default(),
    };
    let ticks = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_TICKS);
    let snapshot_path = args.next();

    let seed = settings.seed.unwrap_or_else(rand::random);
    let tick_ms = settings.tick_ms();
    let mut now_ms = 0;
    let mut state = GameState::new(seed, settings.playfield(), settings.scenario, now_ms);
    log::info!(
        "Session initialized with seed: {} ({} scenario)",
        seed,
        settings.scenario.as_str()
    );

    for n in 0..ticks {
        let input = scripted_input(&state, n);
        tick(&mut state, &input, now_ms);
        now_ms += tick_ms;
    }

    let player = &state.player;
    log::info!(
        "Done after {} ticks: room {}, {} transitions, {} kills, level {}, health {}{}",
        state.time_ticks,
        state.rooms_generated,
        state.transitions,
        player.kills,
        player.progression.level,
        player.health,
        if player.alive { "" } else { " (dead)" }
    );

    if let Some(path) = snapshot_path {
        match state.to_json() {
            Ok(json) => match std::fs::write(&path, json) {
                Ok(()) => log::info!("Snapshot written to {path}"),
                Err(e) => log::warn!("Failed to write snapshot to {path}: {e}"),
            },
            Err(e) => log::warn!("Failed to serialize snapshot: {e}"),
        }
    }
}

/// Simple bot: sweep sideways, shoot the nearest hostile, restart on death
fn scripted_input(state: &GameState, n: u64) -> TickInput {
    let player = &state.player;
    let phase = (n / 120) % 4;
    let movement = MoveIntent {
        up: phase == 1,
        down: phase == 3,
        left: phase == 2,
        right: phase == 0,
    };

    let here = player.center();
    let fire_at = state
        .room
        .hostiles
        .iter()
        .map(|h| h.center())
        .min_by(|a, b| a.distance(here).total_cmp(&b.distance(here)))
        .filter(|_| n % 15 == 0);

    TickInput {
        movement,
        fire_at: fire_at.or_else(|| (n % 45 == 0).then(|| here + Vec2::X)),
        switch_weapon: if n % 600 == 599 { 1 } else { 0 },
        throw_grenade: player.grenades > 0 && n % 90 == 0,
        restart: !player.alive,
    }
}
