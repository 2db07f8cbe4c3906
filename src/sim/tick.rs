//! Per-frame simulation step
//!
//! `tick` advances the whole session by one variable-length frame; `fire_at`
//! translates a pointer click into a fan of projectiles. Both are pure over
//! `GameState` so the frontend stays a thin translation layer.

use glam::Vec2;
use rand::Rng;

use super::collision::{blocked_by_obstacle, circles_overlap, clamp_to_bounds};
use super::spawn::{spawn_batch, spawn_item_near, spawn_obstacle};
use super::state::{GamePhase, GameState, Player, Projectile, Ruleset};
use crate::consts::*;
use crate::{angle_between, heading};

/// Held movement keys, written by the frontend's key handlers
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl InputState {
    /// Raw (un-normalized) direction from the held keys
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }
}

/// Advance the session by one frame.
///
/// `delta_ms` is the wall-clock time since the previous frame; all movement
/// scales by `delta_ms / BASE_FRAME_MS`. `now_ms` drives the wall-clock
/// timers (auto-fire, obstacle cadence). No-op once the phase is GameOver.
pub fn tick(state: &mut GameState, input: &InputState, delta_ms: f32, now_ms: f64) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    let step = delta_ms / BASE_FRAME_MS;
    let survivor = state.config.ruleset == Ruleset::Survivor;

    move_player(state, input, step);
    update_invincibility(&mut state.player, delta_ms);
    if survivor {
        auto_fire(state, now_ms);
    }
    advance_projectiles(state, step);
    advance_enemies(state, step);
    resolve_projectile_hits(state);
    sweep_dead_enemies(state);
    resolve_player_contact(state);
    if survivor {
        update_items(state, delta_ms);
    }
    advance_clock(state, delta_ms, now_ms);

    if state.player.hp <= 0.0 {
        state.phase = GamePhase::GameOver;
        log::info!(
            "game over: score {} after {:.1}s",
            state.score,
            state.time_s
        );
    }
}

/// Fire a fan of projectiles from the player toward `target` (pointer click)
pub fn fire_at(state: &mut GameState, target: Vec2) {
    if state.phase == GamePhase::GameOver {
        return;
    }
    let aim = angle_between(state.player.pos, target);
    fire_fan(state, aim);
}

/// Grant a pickup's upgrade: either a faster auto-fire interval (floored) or
/// one more simultaneous shot
pub fn apply_item_upgrade(player: &mut Player, faster_fire: bool) {
    if faster_fire {
        player.fire_interval_ms =
            (player.fire_interval_ms - AUTO_FIRE_STEP_MS).max(AUTO_FIRE_FLOOR_MS);
    } else {
        player.shot_count += 1;
    }
}

fn move_player(state: &mut GameState, input: &InputState, step: f32) {
    let dir = input.direction();
    // No keys held: no move, no clamp
    if dir == Vec2::ZERO {
        return;
    }
    let candidate = state.player.pos + dir.normalize() * state.player.speed * step;
    // Whole-move rejection against obstacles, no sliding; the clamp only
    // applies to accepted moves
    if state.config.ruleset == Ruleset::Survivor
        && blocked_by_obstacle(candidate, state.player.radius, &state.obstacles)
    {
        return;
    }
    state.player.pos = clamp_to_bounds(
        candidate,
        state.player.radius,
        state.config.width,
        state.config.height,
    );
}

fn update_invincibility(player: &mut Player, delta_ms: f32) {
    if !player.invincible {
        return;
    }
    player.invincible_ms -= delta_ms;
    if player.invincible_ms <= 0.0 {
        player.invincible = false;
        player.invincible_ms = 0.0;
        player.blink = false;
    } else {
        let elapsed = INVINCIBILITY_MS - player.invincible_ms;
        player.blink = (elapsed / BLINK_PERIOD_MS) as u32 % 2 == 1;
    }
}

/// Periodic shot at the nearest enemy. The timer arms on the first tick
/// after construction or reset so a halted game-over span never produces a
/// catch-up burst; it is only stamped when a shot actually fires.
fn auto_fire(state: &mut GameState, now_ms: f64) {
    if state.last_auto_fire_ms == 0.0 {
        state.last_auto_fire_ms = now_ms;
        return;
    }
    if now_ms - state.last_auto_fire_ms < f64::from(state.player.fire_interval_ms) {
        return;
    }
    let player_pos = state.player.pos;
    let aim = state
        .enemies
        .iter()
        .min_by(|a, b| {
            let da = a.pos.distance_squared(player_pos);
            let db = b.pos.distance_squared(player_pos);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|nearest| angle_between(player_pos, nearest.pos));
    if let Some(aim) = aim {
        fire_fan(state, aim);
        state.last_auto_fire_ms = now_ms;
    }
}

/// Spawn `shot_count` projectiles fanned evenly across `FAN_SPREAD`,
/// centered on `aim`
fn fire_fan(state: &mut GameState, aim: f32) {
    let count = state.player.shot_count.max(1);
    let origin = state.player.pos;
    if count == 1 {
        state
            .projectiles
            .push(Projectile::new(origin, heading(aim) * PROJECTILE_SPEED));
        return;
    }
    let start = aim - FAN_SPREAD / 2.0;
    let angle_step = FAN_SPREAD / (count - 1) as f32;
    for i in 0..count {
        let angle = start + angle_step * i as f32;
        state
            .projectiles
            .push(Projectile::new(origin, heading(angle) * PROJECTILE_SPEED));
    }
}

fn advance_projectiles(state: &mut GameState, step: f32) {
    for p in &mut state.projectiles {
        p.pos += p.vel * step;
    }
    let (w, h) = (state.config.width, state.config.height);
    state.projectiles.retain(|p| {
        p.pos.x > -PROJECTILE_CULL_MARGIN
            && p.pos.x < w + PROJECTILE_CULL_MARGIN
            && p.pos.y > -PROJECTILE_CULL_MARGIN
            && p.pos.y < h + PROJECTILE_CULL_MARGIN
    });
}

/// Pure pursuit: each enemy heads straight at the player's current position
fn advance_enemies(state: &mut GameState, step: f32) {
    let target = state.player.pos;
    let survivor = state.config.ruleset == Ruleset::Survivor;
    let obstacles = &state.obstacles;
    for enemy in &mut state.enemies {
        let candidate = enemy.pos + heading(angle_between(enemy.pos, target)) * enemy.speed * step;
        if survivor && blocked_by_obstacle(candidate, enemy.radius, obstacles) {
            continue;
        }
        enemy.pos = candidate;
    }
}

/// Pairwise enemy/projectile overlap: 1 hp per hit. A projectile keeps
/// hitting other overlapping enemies within the same tick even after being
/// marked, then all marked projectiles are removed at once.
fn resolve_projectile_hits(state: &mut GameState) {
    for enemy in &mut state.enemies {
        for p in &mut state.projectiles {
            if circles_overlap(enemy.pos, enemy.radius, p.pos, p.radius) {
                enemy.hp -= 1.0;
                p.hit = true;
            }
        }
    }
    state.projectiles.retain(|p| !p.hit);
}

/// Two-phase removal of dead enemies. Genuine kills score and roll the item
/// drop; contact-killed enemies (sentinel hp) are removed silently.
fn sweep_dead_enemies(state: &mut GameState) {
    let enemies = std::mem::take(&mut state.enemies);
    let mut drop_sites = Vec::new();
    for enemy in enemies {
        if enemy.hp > 0.0 {
            state.enemies.push(enemy);
        } else if enemy.hp > CONTACT_KILLED_HP {
            state.score += 1;
            drop_sites.push(enemy.pos);
        }
    }
    if state.config.ruleset == Ruleset::Survivor {
        for pos in drop_sites {
            if state.rng.random_bool(ITEM_DROP_CHANCE) {
                spawn_item_near(state, pos);
            }
        }
    }
}

fn resolve_player_contact(state: &mut GameState) {
    let player_pos = state.player.pos;
    let player_radius = state.player.radius;
    match state.config.ruleset {
        Ruleset::Classic => {
            for enemy in &mut state.enemies {
                if circles_overlap(enemy.pos, enemy.radius, player_pos, player_radius) {
                    state.player.hp -= CONTACT_DAMAGE;
                    enemy.hp = CONTACT_KILLED_HP;
                }
            }
        }
        Ruleset::Survivor => {
            for enemy in &state.enemies {
                if state.player.invincible {
                    break;
                }
                if circles_overlap(enemy.pos, enemy.radius, player_pos, player_radius) {
                    state.player.hp -= CONTACT_DAMAGE;
                    state.player.invincible = true;
                    state.player.invincible_ms = INVINCIBILITY_MS;
                }
            }
        }
    }
}

/// Item upkeep: tick down lifetimes, apply pickups, drop expired items
fn update_items(state: &mut GameState, delta_ms: f32) {
    let items = std::mem::take(&mut state.items);
    for mut item in items {
        item.ttl_ms -= delta_ms;
        if circles_overlap(item.pos, item.radius, state.player.pos, state.player.radius) {
            let faster = state.rng.random_bool(0.5);
            apply_item_upgrade(&mut state.player, faster);
            log::debug!(
                "pickup: fire interval {:.0}ms, {} shots",
                state.player.fire_interval_ms,
                state.player.shot_count
            );
        } else if item.ttl_ms > 0.0 {
            state.items.push(item);
        }
    }
}

/// Advance the simulation clock and run the spawn schedules: obstacles on a
/// fixed wall-clock interval (Survivor), enemy batches on the decaying
/// spawn interval
fn advance_clock(state: &mut GameState, delta_ms: f32, now_ms: f64) {
    state.time_s += delta_ms / 1000.0;

    if state.config.ruleset == Ruleset::Survivor {
        if state.last_obstacle_ms == 0.0 {
            state.last_obstacle_ms = now_ms;
        } else if now_ms - state.last_obstacle_ms >= OBSTACLE_INTERVAL_MS {
            spawn_obstacle(state);
            state.last_obstacle_ms = now_ms;
        }
    }

    if state.time_s - state.last_spawn_s > state.spawn_interval_ms / 1000.0 {
        let count = 1 + (state.time_s / BATCH_GROWTH_SECS) as u32;
        spawn_batch(state, count);
        state.last_spawn_s = state.time_s;
        if state.spawn_interval_ms > SPAWN_INTERVAL_FLOOR_MS {
            state.spawn_interval_ms -= SPAWN_INTERVAL_STEP_MS;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Enemy, EnemyKind, GameConfig, Item, Obstacle};
    use proptest::prelude::*;

    const TICK_MS: f32 = BASE_FRAME_MS;

    fn classic() -> GameState {
        GameState::new(GameConfig::default(), 42)
    }

    fn survivor() -> GameState {
        GameState::new(
            GameConfig {
                ruleset: Ruleset::Survivor,
                ..GameConfig::default()
            },
            42,
        )
    }

    fn enemy_at(pos: Vec2, hp: f32) -> Enemy {
        Enemy {
            kind: EnemyKind::Grunt,
            pos,
            radius: ENEMY_RADIUS,
            speed: 1.2,
            hp,
            max_hp: hp,
        }
    }

    fn still_projectile(pos: Vec2) -> Projectile {
        Projectile::new(pos, Vec2::ZERO)
    }

    #[test]
    fn test_player_clamped_at_right_edge() {
        let mut state = classic();
        state.player.pos = Vec2::new(780.0, 300.0);
        let input = InputState {
            right: true,
            ..Default::default()
        };
        for _ in 0..5 {
            tick(&mut state, &input, TICK_MS, 1000.0);
        }
        assert!((state.player.pos.x - (800.0 - PLAYER_RADIUS)).abs() < 1e-3);
        assert_eq!(state.player.pos.y, 300.0);
    }

    #[test]
    fn test_no_movement_without_input() {
        let mut state = classic();
        let before = state.player.pos;
        tick(&mut state, &InputState::default(), TICK_MS, 1000.0);
        assert_eq!(state.player.pos, before);
    }

    #[test]
    fn test_diagonal_movement_is_normalized() {
        let mut state = classic();
        let before = state.player.pos;
        let input = InputState {
            right: true,
            down: true,
            ..Default::default()
        };
        tick(&mut state, &input, TICK_MS, 1000.0);
        let moved = state.player.pos - before;
        assert!((moved.length() - PLAYER_SPEED).abs() < 1e-3);
        assert!((moved.x - moved.y).abs() < 1e-3);
    }

    #[test]
    fn test_enemy_homes_toward_player() {
        let mut state = classic();
        state.enemies.push(enemy_at(Vec2::new(100.0, 300.0), 5.0));
        let before = state.enemies[0].pos.distance(state.player.pos);
        tick(&mut state, &InputState::default(), TICK_MS, 1000.0);
        let after = state.enemies[0].pos.distance(state.player.pos);
        assert!(after < before);
    }

    #[test]
    fn test_projectile_hit_kills_and_scores() {
        let mut state = classic();
        state.enemies.push(enemy_at(Vec2::new(200.0, 300.0), 1.0));
        state
            .projectiles
            .push(still_projectile(Vec2::new(200.0, 300.0)));
        tick(&mut state, &InputState::default(), TICK_MS, 1000.0);
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, 1);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_tanker_survives_single_hit() {
        let mut state = classic();
        let mut tanker = enemy_at(Vec2::new(200.0, 300.0), 2.0);
        tanker.kind = EnemyKind::Tanker;
        state.enemies.push(tanker);
        state
            .projectiles
            .push(still_projectile(Vec2::new(200.0, 300.0)));
        tick(&mut state, &InputState::default(), TICK_MS, 1000.0);
        assert_eq!(state.enemies.len(), 1);
        assert!((state.enemies[0].hp - 1.0).abs() < 1e-4);
        assert_eq!(state.score, 0);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_one_projectile_hits_all_overlapping_enemies() {
        let mut state = classic();
        state.enemies.push(enemy_at(Vec2::new(200.0, 300.0), 5.0));
        state.enemies.push(enemy_at(Vec2::new(210.0, 300.0), 5.0));
        state
            .projectiles
            .push(still_projectile(Vec2::new(205.0, 300.0)));
        tick(&mut state, &InputState::default(), TICK_MS, 1000.0);
        assert!(state.enemies.iter().all(|e| (e.hp - 4.0).abs() < 1e-4));
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_offscreen_projectile_culled_before_collision() {
        let mut state = classic();
        state.enemies.push(enemy_at(Vec2::new(-20.0, 300.0), 1.0));
        state
            .projectiles
            .push(still_projectile(Vec2::new(-20.0, 300.0)));
        tick(&mut state, &InputState::default(), TICK_MS, 1000.0);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.enemies[0].hp, 1.0);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_classic_contact_damages_and_force_kills() {
        let mut state = classic();
        state.enemies.push(enemy_at(state.player.pos, 5.0));
        tick(&mut state, &InputState::default(), TICK_MS, 1000.0);
        assert!((state.player.hp - 2.5).abs() < 1e-4);
        // Force-killed but still present until the next tick's sweep
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].hp, CONTACT_KILLED_HP);

        tick(&mut state, &InputState::default(), TICK_MS, 1016.0);
        assert!(state.enemies.is_empty());
        // Contact kills carry no score credit
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_survivor_contact_grants_invincibility() {
        let mut state = survivor();
        state.enemies.push(enemy_at(state.player.pos, 50.0));

        tick(&mut state, &InputState::default(), TICK_MS, 1000.0);
        assert!((state.player.hp - 2.5).abs() < 1e-4);
        assert!(state.player.invincible);
        // Enemy survives under the Survivor rules
        assert_eq!(state.enemies.len(), 1);

        // Still overlapping, but no further damage while the window holds
        // (7 * 400 ms leaves 200 ms of invincibility)
        for i in 0..7u32 {
            let now = 1000.0 + f64::from(i + 1) * 400.0;
            tick(&mut state, &InputState::default(), 400.0, now);
            assert!((state.player.hp - 2.5).abs() < 1e-4);
        }

        // Window lapses; damage resumes exactly once it does
        tick(&mut state, &InputState::default(), 400.0, 4200.0);
        assert!((state.player.hp - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_invincibility_shields_second_contact_same_tick() {
        let mut state = survivor();
        state.enemies.push(enemy_at(state.player.pos, 50.0));
        state.enemies.push(enemy_at(state.player.pos, 50.0));
        tick(&mut state, &InputState::default(), TICK_MS, 1000.0);
        assert!((state.player.hp - 2.5).abs() < 1e-4);
    }

    #[test]
    fn test_blink_toggles_while_invincible() {
        let mut state = survivor();
        state.enemies.push(enemy_at(state.player.pos, 50.0));
        tick(&mut state, &InputState::default(), TICK_MS, 1000.0);
        assert!(state.player.invincible);
        assert!(!state.player.blink);

        tick(&mut state, &InputState::default(), BLINK_PERIOD_MS, 1100.0);
        assert!(state.player.blink);
        tick(&mut state, &InputState::default(), BLINK_PERIOD_MS, 1200.0);
        assert!(!state.player.blink);
    }

    #[test]
    fn test_auto_fire_needs_enemies() {
        let mut state = survivor();
        // First tick arms the timer, later ticks are past the interval
        tick(&mut state, &InputState::default(), TICK_MS, 1000.0);
        tick(&mut state, &InputState::default(), TICK_MS, 2500.0);
        assert!(state.projectiles.is_empty());

        state.enemies.push(enemy_at(Vec2::new(100.0, 300.0), 50.0));
        tick(&mut state, &InputState::default(), TICK_MS, 2600.0);
        assert!(!state.projectiles.is_empty());
    }

    #[test]
    fn test_auto_fire_targets_nearest_enemy() {
        let mut state = survivor();
        tick(&mut state, &InputState::default(), TICK_MS, 1000.0);
        state.enemies.push(enemy_at(Vec2::new(700.0, 300.0), 50.0));
        state.enemies.push(enemy_at(Vec2::new(300.0, 300.0), 50.0));
        tick(&mut state, &InputState::default(), TICK_MS, 2100.0);
        assert_eq!(state.projectiles.len(), 1);
        // Nearest enemy is to the left
        assert!(state.projectiles[0].vel.x < -5.9);
        assert!(state.projectiles[0].vel.y.abs() < 0.5);
    }

    #[test]
    fn test_item_pickup_applies_one_upgrade() {
        let mut state = survivor();
        state.items.push(Item {
            pos: state.player.pos,
            radius: ITEM_RADIUS,
            ttl_ms: ITEM_TTL_MS,
        });
        tick(&mut state, &InputState::default(), TICK_MS, 1000.0);
        assert!(state.items.is_empty());
        let p = &state.player;
        let faster =
            p.fire_interval_ms == AUTO_FIRE_START_MS - AUTO_FIRE_STEP_MS && p.shot_count == 1;
        let wider = p.fire_interval_ms == AUTO_FIRE_START_MS && p.shot_count == 2;
        assert!(faster || wider);
    }

    #[test]
    fn test_item_expires_without_pickup() {
        let mut state = survivor();
        state.items.push(Item {
            pos: Vec2::new(100.0, 100.0),
            radius: ITEM_RADIUS,
            ttl_ms: 10.0,
        });
        tick(&mut state, &InputState::default(), TICK_MS, 1000.0);
        assert!(state.items.is_empty());
        assert_eq!(state.player.shot_count, 1);
        assert_eq!(state.player.fire_interval_ms, AUTO_FIRE_START_MS);
    }

    #[test]
    fn test_upgrade_interval_step_and_floor() {
        let mut player = survivor().player;
        apply_item_upgrade(&mut player, true);
        assert_eq!(player.fire_interval_ms, 700.0);

        player.fire_interval_ms = 400.0;
        apply_item_upgrade(&mut player, true);
        assert_eq!(player.fire_interval_ms, AUTO_FIRE_FLOOR_MS);
        apply_item_upgrade(&mut player, true);
        assert_eq!(player.fire_interval_ms, AUTO_FIRE_FLOOR_MS);

        apply_item_upgrade(&mut player, false);
        assert_eq!(player.shot_count, 2);
    }

    #[test]
    fn test_game_over_edge_and_halt() {
        let mut state = classic();
        state.player.hp = 0.5;
        state.enemies.push(enemy_at(state.player.pos, 5.0));
        tick(&mut state, &InputState::default(), TICK_MS, 1000.0);
        assert_eq!(state.phase, GamePhase::GameOver);

        // Updates cease entirely
        let snapshot = state.clone();
        tick(&mut state, &InputState::default(), TICK_MS, 1016.0);
        assert_eq!(state, snapshot);
    }

    #[test]
    fn test_fire_at_single_shot() {
        let mut state = classic();
        fire_at(&mut state, Vec2::new(500.0, 300.0));
        assert_eq!(state.projectiles.len(), 1);
        let vel = state.projectiles[0].vel;
        assert!((vel.x - PROJECTILE_SPEED).abs() < 1e-4);
        assert!(vel.y.abs() < 1e-4);
    }

    #[test]
    fn test_fire_at_fans_across_spread() {
        let mut state = survivor();
        state.player.shot_count = 3;
        fire_at(&mut state, Vec2::new(500.0, 300.0));
        assert_eq!(state.projectiles.len(), 3);

        let mut angles: Vec<f32> = state
            .projectiles
            .iter()
            .map(|p| p.vel.y.atan2(p.vel.x))
            .collect();
        angles.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert!((angles[2] - angles[0] - FAN_SPREAD).abs() < 1e-4);
        assert!(angles[1].abs() < 1e-4);
        for p in &state.projectiles {
            assert!((p.vel.length() - PROJECTILE_SPEED).abs() < 1e-3);
        }
    }

    #[test]
    fn test_fire_at_ignored_when_game_over() {
        let mut state = classic();
        state.phase = GamePhase::GameOver;
        fire_at(&mut state, Vec2::new(500.0, 300.0));
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_obstacle_blocks_player_whole_move() {
        let mut state = survivor();
        state.obstacles.push(Obstacle {
            pos: Vec2::new(436.0, 300.0),
            radius: OBSTACLE_RADIUS,
            shade: 0,
        });
        let input = InputState {
            right: true,
            ..Default::default()
        };
        let before = state.player.pos;
        for _ in 0..10 {
            tick(&mut state, &input, TICK_MS, 1000.0);
        }
        assert_eq!(state.player.pos, before);
    }

    #[test]
    fn test_obstacle_blocks_enemy() {
        let mut state = survivor();
        state.obstacles.push(Obstacle {
            pos: Vec2::new(450.0, 300.0),
            radius: OBSTACLE_RADIUS,
            shade: 0,
        });
        let mut enemy = enemy_at(Vec2::new(487.0, 300.0), 5.0);
        enemy.speed = 2.0;
        state.enemies.push(enemy);
        tick(&mut state, &InputState::default(), TICK_MS, 1000.0);
        assert_eq!(state.enemies[0].pos, Vec2::new(487.0, 300.0));
    }

    #[test]
    fn test_obstacle_spawn_cadence() {
        let mut state = survivor();
        tick(&mut state, &InputState::default(), TICK_MS, 1000.0);
        assert!(state.obstacles.is_empty());
        tick(&mut state, &InputState::default(), TICK_MS, 7001.0);
        assert_eq!(state.obstacles.len(), 1);
        tick(&mut state, &InputState::default(), TICK_MS, 7100.0);
        assert_eq!(state.obstacles.len(), 1);
    }

    #[test]
    fn test_spawn_cycle_batch_and_interval_decay() {
        let mut state = classic();
        state.time_s = 30.0;
        tick(&mut state, &InputState::default(), TICK_MS, 1000.0);
        // 1 + floor(30 / 15) enemies in one batch
        assert_eq!(state.enemies.len(), 3);
        assert_eq!(
            state.spawn_interval_ms,
            SPAWN_INTERVAL_START_MS - SPAWN_INTERVAL_STEP_MS
        );
        assert!((state.last_spawn_s - state.time_s).abs() < 1e-6);
    }

    #[test]
    fn test_spawn_interval_floor_holds() {
        let mut state = classic();
        state.spawn_interval_ms = SPAWN_INTERVAL_FLOOR_MS;
        state.time_s = 10.0;
        tick(&mut state, &InputState::default(), TICK_MS, 1000.0);
        assert!(!state.enemies.is_empty());
        assert_eq!(state.spawn_interval_ms, SPAWN_INTERVAL_FLOOR_MS);
    }

    #[test]
    fn test_enemy_hp_never_exceeds_max() {
        let mut state = survivor();
        for i in 0..600u32 {
            let now = 1000.0 + f64::from(i) * f64::from(TICK_MS);
            tick(&mut state, &InputState::default(), TICK_MS, now);
            assert!(state.enemies.iter().all(|e| e.hp <= e.max_hp));
        }
    }

    #[test]
    fn test_determinism_same_seed_same_run() {
        let config = GameConfig {
            ruleset: Ruleset::Survivor,
            ..GameConfig::default()
        };
        let mut a = GameState::new(config, 99);
        let mut b = GameState::new(config, 99);
        let input = InputState {
            right: true,
            down: true,
            ..Default::default()
        };
        for i in 0..180u32 {
            let now = 1000.0 + f64::from(i) * f64::from(TICK_MS);
            tick(&mut a, &input, TICK_MS, now);
            tick(&mut b, &input, TICK_MS, now);
        }
        assert_eq!(a, b);
    }

    proptest! {
        #[test]
        fn prop_player_stays_in_bounds(
            moves in proptest::collection::vec(
                (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()),
                1..150,
            )
        ) {
            let mut state = classic();
            for (i, (up, down, left, right)) in moves.into_iter().enumerate() {
                let input = InputState { up, down, left, right };
                let now = 1000.0 + i as f64 * f64::from(TICK_MS);
                tick(&mut state, &input, TICK_MS, now);
                let p = &state.player;
                prop_assert!(p.pos.x >= p.radius && p.pos.x <= 800.0 - p.radius);
                prop_assert!(p.pos.y >= p.radius && p.pos.y <= 600.0 - p.radius);
            }
        }
    }
}
