//! Fixed timestep simulation tick
//!
//! Phases run in a fixed order and each one completes before the next starts:
//! intents → player → room transition → hostiles → projectiles → hits →
//! particles. Timers compare stored timestamps against `now_ms`.

use glam::Vec2;

use super::collision::rects_overlap;
use super::hostile::HostileKind;
use super::particle::tick_particles;
use super::player::MoveIntent;
use super::projectile::{Shooter, advance_all, resolve_hit};
use super::room::{clear_spawn, detect_exit};
use super::state::GameState;
use crate::consts::*;

/// Input intents for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Directions held
    pub movement: MoveIntent,
    /// Fire at a point (click)
    pub fire_at: Option<Vec2>,
    /// Weapon switch direction (wheel), 0 = none
    pub switch_weapon: i32,
    pub throw_grenade: bool,
    /// Restart after death
    pub restart: bool,
}

/// Advance the session by one fixed tick at time `now_ms`
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: u64) {
    state.time_ticks += 1;

    if input.restart && !state.player.alive {
        state.restart(now_ms);
    }

    if input.switch_weapon != 0 {
        state.player.switch_weapon(input.switch_weapon.signum());
    }
    if let Some(target) = input.fire_at {
        state
            .player
            .fire(target, now_ms, &mut state.projectiles, &mut state.rng);
    }
    if input.throw_grenade {
        throw_grenade(state);
    }

    state
        .player
        .update(&input.movement, &state.room.walls, now_ms);
    collect_pickups(state);

    check_room_transition(state, now_ms);

    {
        let GameState {
            room,
            player,
            playfield,
            projectiles,
            rng,
            ..
        } = state;
        for hostile in room.hostiles.iter_mut() {
            hostile.update(player, &room.walls, playfield, now_ms, projectiles, rng);
        }
    }

    advance_all(&mut state.projectiles, &state.playfield);
    resolve_collisions(state);
    tick_particles(&mut state.particles);
}

/// Swap in a new room once the player has fully left the playfield
///
/// Returns true if a transition happened.
pub fn check_room_transition(state: &mut GameState, now_ms: u64) -> bool {
    let Some(exit) = detect_exit(&state.player.rect, &state.playfield) else {
        return false;
    };

    state.advance_room(now_ms);
    state
        .player
        .rect
        .translate(exit.reentry_offset(&state.playfield));
    clear_spawn(&mut state.player.rect, &state.room.walls, &state.playfield);
    state.transitions += 1;
    log::info!(
        "Exited {:?}, entered room {} at ({:.0}, {:.0})",
        exit,
        state.rooms_generated,
        state.player.center().x,
        state.player.center().y
    );
    true
}

/// Test every projectile against the targets its shooter may hit
///
/// Player shots only hit hostiles, enemy shots only hit the player. Each
/// projectile resolves at most one hit and is removed by it.
fn resolve_collisions(state: &mut GameState) {
    let mut kills: Vec<HostileKind> = Vec::new();
    {
        let GameState {
            room,
            player,
            projectiles,
            particles,
            rng,
            ..
        } = state;

        projectiles.retain(|p| match p.shooter {
            Shooter::Player => {
                let hit = room.hostiles.iter().find_map(|h| {
                    resolve_hit(p, &h.rect, &mut *rng, &mut *particles).map(|dmg| (h.id, dmg))
                });
                match hit {
                    Some((id, true)) => {
                        if let Some(kind) = room.damage_hostile(id) {
                            kills.push(kind);
                        }
                        false
                    }
                    Some((_, false)) => false,
                    None => true,
                }
            }
            Shooter::Enemy => match resolve_hit(p, &player.rect, &mut *rng, &mut *particles) {
                Some(true) => {
                    player.take_damage();
                    false
                }
                Some(false) => false,
                None => true,
            },
        });
    }

    for kind in kills {
        state.award_kill(kind);
    }
}

fn throw_grenade(state: &mut GameState) {
    let player = &mut state.player;
    if !player.alive || player.grenades == 0 {
        return;
    }
    player.grenades -= 1;
    let center = player.center();
    let caught: Vec<u32> = state
        .room
        .hostiles
        .iter()
        .filter(|h| h.center().distance(center) < GRENADE_RADIUS)
        .map(|h| h.id)
        .collect();
    log::debug!("Grenade caught {} hostiles", caught.len());
    for id in caught {
        state.damage_hostile(id);
    }
}

fn collect_pickups(state: &mut GameState) {
    let player = &mut state.player;
    if !player.alive {
        return;
    }
    state.room.pickups.retain(|pickup| {
        if rects_overlap(&pickup.rect, &player.rect) {
            player.collect(pickup.kind);
            false
        } else {
            true
        }
    });
}
