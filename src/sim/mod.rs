//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Wall-clock time enters only as explicit `now_ms` arguments
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Hitbox, obstacle_hitbox, player_hitbox, projectile_hitbox};
pub use physics::{HorizontalInput, apply_gravity, apply_horizontal_input, apply_jump_impulse};
pub use spawn::{ObstacleBand, charge_power, fire_projectile, spawn_interval};
pub use state::{
    GameEvent, GameMode, GamePhase, GameState, LossCause, ModeTuning, Obstacle, Player, Projectile,
};
pub use tick::{TickInput, tick};
