//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, time passed in explicitly
//! - Seeded RNG only
//! - Stable iteration order (roster order, then projectile order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod hostile;
pub mod particle;
pub mod player;
pub mod progression;
pub mod projectile;
pub mod rect;
pub mod room;
pub mod state;
pub mod tick;

pub use collision::{has_line_of_sight, overlaps_any, rects_overlap};
pub use hostile::{Hostile, HostileKind};
pub use particle::Particle;
pub use player::{FireOutcome, MoveIntent, Player, WEAPONS, Weapon};
pub use progression::{Perk, Progression, Quest};
pub use projectile::{Projectile, Shooter, resolve_hit};
pub use rect::Rect;
pub use room::{Exit, Pickup, PickupKind, Room};
pub use state::{GameState, Playfield};
pub use tick::{TickInput, check_room_transition, tick};
