//! Session state and entity types
//!
//! Everything the simulation mutates lives in one `GameState` aggregate so a
//! session can be reset, snapshotted, or replayed deterministically.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Running,
    /// Player health reached zero; updates are skipped until reset
    GameOver,
}

/// The two preserved rule variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ruleset {
    /// Contact force-kills the enemy (no score credit) and costs 0.5 hp
    Classic,
    /// Contact grants an invincibility window; enemy survives. Adds
    /// auto-fire, obstacles and item drops.
    Survivor,
}

/// Per-session configuration: canvas bounds and rule variant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub width: f32,
    pub height: f32,
    pub ruleset: Ruleset,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            ruleset: Ruleset::Classic,
        }
    }
}

/// The player circle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Movement speed in px per 60 Hz frame
    pub speed: f32,
    pub hp: f32,
    pub invincible: bool,
    /// Remaining invincibility window (ms)
    pub invincible_ms: f32,
    /// Visual blink flag, toggled while invincible
    pub blink: bool,
    /// Auto-fire period (ms, Survivor); reduced by item pickups
    pub fire_interval_ms: f32,
    /// Projectiles per shot, fanned across `FAN_SPREAD`
    pub shot_count: u32,
}

impl Player {
    fn new(config: &GameConfig) -> Self {
        Self {
            pos: Vec2::new(config.width / 2.0, config.height / 2.0),
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            hp: PLAYER_START_HP,
            invincible: false,
            invincible_ms: 0.0,
            blink: false,
            fire_interval_ms: AUTO_FIRE_START_MS,
            shot_count: 1,
        }
    }
}

/// A player-fired shot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// Velocity in px per 60 Hz frame
    pub vel: Vec2,
    pub radius: f32,
    /// Marked on impact; removed by the same tick's sweep
    pub hit: bool,
}

impl Projectile {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            radius: PROJECTILE_RADIUS,
            hit: false,
        }
    }
}

/// Enemy archetypes, selected by elapsed-time tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    Grunt,
    Tanker,
    Runner,
}

impl EnemyKind {
    /// Base speed in px per 60 Hz frame, before jitter and time scaling
    pub fn base_speed(&self) -> f32 {
        match self {
            Self::Grunt => 1.2,
            Self::Tanker => 0.8,
            Self::Runner => 1.6,
        }
    }

    /// Base health before time scaling
    pub fn base_hp(&self) -> f32 {
        match self {
            Self::Grunt => 1.0,
            Self::Tanker => 2.0,
            Self::Runner => 0.7,
        }
    }

    /// Fill color for the renderer
    pub fn color(&self) -> &'static str {
        match self {
            Self::Grunt => "#e74c3c",
            Self::Tanker => "#f1c40f",
            Self::Runner => "#8e44ad",
        }
    }
}

/// A homing enemy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub pos: Vec2,
    pub radius: f32,
    /// Speed in px per 60 Hz frame, fixed at spawn
    pub speed: f32,
    pub hp: f32,
    /// Fixed at spawn; drives the health-bar ratio
    pub max_hp: f32,
}

/// A static blocker (Survivor). Never removed once placed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    pub radius: f32,
    /// Visual variant index, < `OBSTACLE_SHADES`
    pub shade: u8,
}

/// A dropped pickup (Survivor)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub pos: Vec2,
    pub radius: f32,
    /// Remaining lifetime (ms); expires if not picked up
    pub ttl_ms: f32,
}

/// Complete session state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub config: GameConfig,
    /// Session seed, kept for reproducibility
    pub seed: u64,
    /// Seeded RNG; the live stream serializes with the state
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Elapsed simulation time (seconds)
    pub time_s: f32,
    pub score: u64,
    /// Enemy spawn cadence; decays toward `SPAWN_INTERVAL_FLOOR_MS`
    pub spawn_interval_ms: f32,
    /// Simulation time of the last enemy spawn cycle (seconds)
    pub last_spawn_s: f32,
    /// Wall clock of the last auto-fire shot (ms); 0 = unarmed
    pub last_auto_fire_ms: f64,
    /// Wall clock of the last obstacle spawn (ms); 0 = unarmed
    pub last_obstacle_ms: f64,
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub enemies: Vec<Enemy>,
    pub obstacles: Vec<Obstacle>,
    pub items: Vec<Item>,
}

impl GameState {
    /// Create a fresh session: player centered, collections empty
    pub fn new(config: GameConfig, seed: u64) -> Self {
        Self {
            player: Player::new(&config),
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            time_s: 0.0,
            score: 0,
            spawn_interval_ms: SPAWN_INTERVAL_START_MS,
            last_spawn_s: 0.0,
            last_auto_fire_ms: 0.0,
            last_obstacle_ms: 0.0,
            projectiles: Vec::new(),
            enemies: Vec::new(),
            obstacles: Vec::new(),
            items: Vec::new(),
        }
    }

    /// Reinitialize all state from the config and a new seed. Calling this
    /// twice in a row yields exactly the state of calling it once.
    pub fn reset_session(&mut self, seed: u64) {
        log::info!("session reset (seed {seed})");
        *self = Self::new(self.config, seed);
    }
}
