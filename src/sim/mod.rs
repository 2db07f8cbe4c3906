//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, owned by the session state
//! - Stable collection order (two-phase rebuilds, no mid-iteration mutation)
//! - No rendering or platform dependencies
//!
//! The frontend drives it through three entry points: `tick`, `fire_at` and
//! `GameState::reset_session`.

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{blocked_by_obstacle, circles_overlap, clamp_to_bounds};
pub use spawn::{spawn_batch, spawn_enemy, spawn_item_near, spawn_obstacle};
pub use state::{
    Enemy, EnemyKind, GameConfig, GamePhase, GameState, Item, Obstacle, Player, Projectile,
    Ruleset,
};
pub use tick::{InputState, fire_at, tick};
