//! Arena domain: player locomotion and the player's slash.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::arena::{
    ArenaInput, BOSS_SIZE, BossController, FightOutcome, GameLayer, Player, PlayerHealth,
    PlayerMotion, PlayerTuning,
};
use crate::combat::{Facing, Grounded};

pub(crate) fn detect_ground(
    spatial_query: SpatialQuery,
    mut query: Query<(&Transform, &Collider, &mut PlayerMotion), With<Player>>,
) {
    // Filter to only hit Ground layer entities
    let ground_filter = SpatialQueryFilter::from_mask(GameLayer::Ground);

    for (transform, collider, mut motion) in &mut query {
        let was_on_ground = motion.on_ground;

        let half_height = match collider.shape_scaled().as_cuboid() {
            Some(c) => c.half_extents.y,
            None => 24.0,
        };

        let ray_origin = transform.translation.truncate() - Vec2::new(0.0, half_height);
        let hit = spatial_query.cast_ray(ray_origin, Dir2::NEG_Y, 4.0, true, &ground_filter);
        motion.on_ground = hit.is_some();

        if motion.on_ground && !was_on_ground {
            motion.coyote_timer = 0.0;
            debug!("Player landed");
        }
    }
}

pub(crate) fn update_player_timers(
    time: Res<Time>,
    mut query: Query<&mut PlayerMotion, With<Player>>,
) {
    let dt = time.delta_secs();

    for mut motion in &mut query {
        if !motion.on_ground {
            motion.coyote_timer += dt;
        }
        motion.jump_buffer_timer = (motion.jump_buffer_timer - dt).max(0.0);
        motion.attack_cooldown = (motion.attack_cooldown - dt).max(0.0);
        motion.invulnerable_timer = (motion.invulnerable_timer - dt).max(0.0);
        motion.hurt_timer = (motion.hurt_timer - dt).max(0.0);
    }
}

/// Whether a buffered jump may start now: grounded, or within coyote time.
fn can_jump<G: Grounded>(body: &G, coyote_timer: f32, tuning: &PlayerTuning) -> bool {
    body.is_grounded() || coyote_timer < tuning.coyote_time
}

pub(crate) fn apply_player_movement(
    time: Res<Time>,
    input: Res<ArenaInput>,
    tuning: Res<PlayerTuning>,
    mut query: Query<(&mut PlayerMotion, &PlayerHealth, &mut LinearVelocity), With<Player>>,
) {
    let dt = time.delta_secs();

    for (mut motion, health, mut velocity) in &mut query {
        if health.is_dead() {
            velocity.x = 0.0;
            continue;
        }
        // Knockback owns the body for a moment
        if motion.hurt_timer > 0.0 {
            continue;
        }

        // Horizontal
        let target_vx = input.axis_x * tuning.max_speed;
        if input.axis_x.abs() > 0.1 {
            let accel = tuning.accel * dt;
            if velocity.x < target_vx {
                velocity.x = (velocity.x + accel).min(target_vx);
            } else {
                velocity.x = (velocity.x - accel).max(target_vx);
            }
            motion.facing = if input.axis_x > 0.0 {
                Facing::Right
            } else {
                Facing::Left
            };
        } else {
            let decel = tuning.decel * dt;
            if velocity.x > 0.0 {
                velocity.x = (velocity.x - decel).max(0.0);
            } else {
                velocity.x = (velocity.x + decel).min(0.0);
            }
        }

        // Jump
        if input.jump_just_pressed {
            motion.jump_buffer_timer = tuning.jump_buffer_time;
        }
        if motion.jump_buffer_timer > 0.0 && can_jump(&*motion, motion.coyote_timer, &tuning) {
            velocity.y = tuning.jump_velocity;
            motion.jump_buffer_timer = 0.0;
            motion.coyote_timer = tuning.coyote_time;
        }

        // Variable jump height
        if !input.jump_held && velocity.y > 0.0 && !motion.on_ground {
            velocity.y *= 0.5;
        }
    }
}

pub(crate) fn apply_player_gravity(
    time: Res<Time>,
    tuning: Res<PlayerTuning>,
    mut query: Query<(&PlayerMotion, &mut LinearVelocity), With<Player>>,
) {
    let dt = time.delta_secs();

    for (motion, mut velocity) in &mut query {
        if motion.on_ground && velocity.y <= 0.0 {
            velocity.y = 0.0;
            continue;
        }
        velocity.y -= tuning.gravity * dt;
    }
}

pub(crate) fn player_attack(
    input: Res<ArenaInput>,
    tuning: Res<PlayerTuning>,
    outcome: Res<FightOutcome>,
    mut player_query: Query<(&Transform, &mut PlayerMotion, &PlayerHealth), With<Player>>,
    mut boss_query: Query<(&Transform, &mut BossController), Without<Player>>,
) {
    if !input.attack_just_pressed || *outcome != FightOutcome::InProgress {
        return;
    }
    let Ok((transform, mut motion, health)) = player_query.single_mut() else {
        return;
    };
    if health.is_dead() || motion.attack_cooldown > 0.0 {
        return;
    }
    motion.attack_cooldown = tuning.attack_cooldown;

    let origin = transform.translation.truncate();
    let direction = motion.facing.sign();
    for (boss_transform, mut controller) in &mut boss_query {
        let offset = boss_transform.translation.truncate() - origin;
        let in_front = offset.x * direction >= 0.0;
        let in_reach = offset.x.abs() <= tuning.attack_reach + BOSS_SIZE.x / 2.0
            && offset.y.abs() <= BOSS_SIZE.y;
        if !(in_front && in_reach) {
            continue;
        }

        controller.boss.apply_damage(
            tuning.attack_damage,
            Vec2::new(direction, 0.0),
            tuning.attack_knockback,
        );
        debug!(
            "Player slash hit {} ({}/{} HP)",
            controller.boss.name(),
            controller.boss.current_hp(),
            controller.boss.max_hp()
        );
    }
}
