//! Entity spawning: difficulty tiers, edge placement, obstacles, item drops

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::state::{Enemy, EnemyKind, GameConfig, GameState, Item, Obstacle};
use crate::consts::*;

/// Archetype for the current difficulty tier: `floor(time/10)` buckets,
/// Tanker past bucket 20, Runner past bucket 40
pub fn kind_for_time(time_s: f32) -> EnemyKind {
    let bucket = (time_s / TIER_BUCKET_SECS).floor();
    if bucket > 40.0 {
        EnemyKind::Runner
    } else if bucket > 20.0 {
        EnemyKind::Tanker
    } else {
        EnemyKind::Grunt
    }
}

/// Uniform point on one of the four screen edges (edge chosen uniformly,
/// then uniform along it)
fn edge_point(rng: &mut Pcg32, config: &GameConfig) -> Vec2 {
    match rng.random_range(0..4u8) {
        0 => Vec2::new(0.0, rng.random_range(0.0..config.height)),
        1 => Vec2::new(config.width, rng.random_range(0.0..config.height)),
        2 => Vec2::new(rng.random_range(0.0..config.width), 0.0),
        _ => Vec2::new(rng.random_range(0.0..config.width), config.height),
    }
}

/// Spawn one enemy at a random edge, scaled by elapsed time: speed gains a
/// random jitter plus 0.002/s, health gains 0.03/s
pub fn spawn_enemy(state: &mut GameState) {
    let kind = kind_for_time(state.time_s);
    let pos = edge_point(&mut state.rng, &state.config);
    let speed = kind.base_speed()
        + state.rng.random_range(0.0..SPEED_JITTER)
        + state.time_s * SPEED_TIME_SCALE;
    let hp = kind.base_hp() + state.time_s * HP_TIME_SCALE;
    log::debug!("spawn {kind:?} at ({:.0}, {:.0}) hp {hp:.2}", pos.x, pos.y);
    state.enemies.push(Enemy {
        kind,
        pos,
        radius: ENEMY_RADIUS,
        speed,
        hp,
        max_hp: hp,
    });
}

/// Spawn a batch of enemies in one cycle (not staggered)
pub fn spawn_batch(state: &mut GameState, count: u32) {
    for _ in 0..count {
        spawn_enemy(state);
    }
}

/// Place one static obstacle at a random edge point (Survivor)
pub fn spawn_obstacle(state: &mut GameState) {
    let pos = edge_point(&mut state.rng, &state.config);
    let shade = state.rng.random_range(0..OBSTACLE_SHADES);
    log::debug!("obstacle at ({:.0}, {:.0})", pos.x, pos.y);
    state.obstacles.push(Obstacle {
        pos,
        radius: OBSTACLE_RADIUS,
        shade,
    });
}

/// Drop an item near an enemy death position, offset randomly per axis
/// (Survivor; the 30% roll happens at the death site)
pub fn spawn_item_near(state: &mut GameState, pos: Vec2) {
    let offset = Vec2::new(
        state.rng.random_range(-ITEM_DROP_OFFSET..ITEM_DROP_OFFSET),
        state.rng.random_range(-ITEM_DROP_OFFSET..ITEM_DROP_OFFSET),
    );
    state.items.push(Item {
        pos: pos + offset,
        radius: ITEM_RADIUS,
        ttl_ms: ITEM_TTL_MS,
    });
}
