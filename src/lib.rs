//! Swarm Survivor - a single-screen survival arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, combat, spawning, session state)
//!
//! The binary wraps the simulation in a wasm32 canvas frontend; on native it
//! runs a short headless session for smoke-testing.

pub mod sim;

use glam::Vec2;

/// Game tuning constants
pub mod consts {
    /// Duration of one 60 Hz frame in milliseconds; per-frame speeds are
    /// scaled by `delta_ms / BASE_FRAME_MS`
    pub const BASE_FRAME_MS: f32 = 1000.0 / 60.0;

    /// Default canvas bounds
    pub const DEFAULT_WIDTH: f32 = 800.0;
    pub const DEFAULT_HEIGHT: f32 = 600.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 16.0;
    pub const PLAYER_SPEED: f32 = 3.0;
    pub const PLAYER_START_HP: f32 = 3.0;
    /// Health lost per enemy contact
    pub const CONTACT_DAMAGE: f32 = 0.5;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 6.0;
    pub const PROJECTILE_SPEED: f32 = 6.0;
    /// Off-screen margin beyond which projectiles are culled
    pub const PROJECTILE_CULL_MARGIN: f32 = 10.0;
    /// Total fan angle for multi-shot fire (radians)
    pub const FAN_SPREAD: f32 = std::f32::consts::PI / 8.0;

    /// Enemy defaults
    pub const ENEMY_RADIUS: f32 = 16.0;
    /// Sentinel hp for enemies force-killed by player contact (Classic);
    /// the death sweep removes these without score or drop credit
    pub const CONTACT_KILLED_HP: f32 = -999.0;
    /// Per-spawn speed jitter upper bound
    pub const SPEED_JITTER: f32 = 0.3;
    /// Speed bonus per second of elapsed time
    pub const SPEED_TIME_SCALE: f32 = 0.002;
    /// Health bonus per second of elapsed time
    pub const HP_TIME_SCALE: f32 = 0.03;
    /// Seconds per difficulty-tier bucket
    pub const TIER_BUCKET_SECS: f32 = 10.0;
    /// Seconds per +1 enemy in a spawn batch
    pub const BATCH_GROWTH_SECS: f32 = 15.0;

    /// Enemy spawn cadence, decays each spawn cycle
    pub const SPAWN_INTERVAL_START_MS: f32 = 1200.0;
    pub const SPAWN_INTERVAL_FLOOR_MS: f32 = 400.0;
    pub const SPAWN_INTERVAL_STEP_MS: f32 = 10.0;

    /// Survivor ruleset: invincibility window after contact damage
    pub const INVINCIBILITY_MS: f32 = 3000.0;
    /// Survivor ruleset: blink half-period while invincible
    pub const BLINK_PERIOD_MS: f32 = 100.0;
    /// Survivor ruleset: auto-fire interval start / upgrade step / floor
    pub const AUTO_FIRE_START_MS: f32 = 1000.0;
    pub const AUTO_FIRE_STEP_MS: f32 = 300.0;
    pub const AUTO_FIRE_FLOOR_MS: f32 = 200.0;
    /// Survivor ruleset: obstacle spawn cadence (wall clock)
    pub const OBSTACLE_INTERVAL_MS: f64 = 6000.0;
    pub const OBSTACLE_RADIUS: f32 = 20.0;
    /// Survivor ruleset: number of obstacle shades to pick from
    pub const OBSTACLE_SHADES: u8 = 3;
    /// Survivor ruleset: item drops
    pub const ITEM_DROP_CHANCE: f64 = 0.3;
    pub const ITEM_RADIUS: f32 = 10.0;
    pub const ITEM_TTL_MS: f32 = 6000.0;
    /// Max offset of a dropped item from the death position (per axis)
    pub const ITEM_DROP_OFFSET: f32 = 20.0;
}

/// Angle of the line from `from` to `to` (radians)
#[inline]
pub fn angle_between(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Unit vector pointing along `angle`
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}
