//! Arena domain: boss hits on the player, fight outcome, and reset.

use avian2d::prelude::*;
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::arena::host::to_world;
use crate::arena::{
    BOSS_SPAWN, BossAnimation, BossController, FightOutcome, FightResetMessage, PLAYER_SPAWN,
    Player, PlayerHealth, PlayerHitMessage, PlayerMotion, PlayerTuning,
};
use crate::combat::CombatState;

const PLAYER_COLOR: Color = Color::srgb(0.9, 0.9, 0.9);
const PLAYER_HURT_COLOR: Color = Color::srgb(1.0, 0.5, 0.5);
/// Minimum upward knockback to give a small lift
const MIN_VERTICAL_KNOCKBACK: f32 = 100.0;

pub(crate) fn apply_player_hits(
    mut hits: MessageReader<PlayerHitMessage>,
    tuning: Res<PlayerTuning>,
    mut query: Query<
        (
            &mut PlayerHealth,
            &mut PlayerMotion,
            &mut LinearVelocity,
            &mut Sprite,
        ),
        With<Player>,
    >,
) {
    for hit in hits.read() {
        for (mut health, mut motion, mut velocity, mut sprite) in &mut query {
            if health.is_dead() || motion.invulnerable_timer > 0.0 {
                continue;
            }

            let dealt = health.take_damage(hit.damage);
            motion.invulnerable_timer = tuning.iframes;
            motion.hurt_timer = tuning.hurt_lock;
            sprite.color = PLAYER_HURT_COLOR;

            velocity.x = hit.knockback.x;
            velocity.y = hit.knockback.y.max(MIN_VERTICAL_KNOCKBACK);
            velocity.0 = velocity.0.clamp_length_max(tuning.max_knockback_speed);

            debug!(
                "Player took {} from {} ({}/{} HP), knockback {:?}",
                dealt, hit.tag, health.current, health.max, velocity.0
            );
        }
    }

    for (_, motion, _, mut sprite) in &mut query {
        if motion.invulnerable_timer <= 0.0 {
            sprite.color = PLAYER_COLOR;
        }
    }
}

pub(crate) fn track_outcome(
    mut outcome: ResMut<FightOutcome>,
    player_query: Query<&PlayerHealth, With<Player>>,
    boss_query: Query<&BossController>,
) {
    if *outcome != FightOutcome::InProgress {
        return;
    }

    if boss_query.iter().any(|c| !c.boss.is_alive()) {
        info!("Fight won");
        *outcome = FightOutcome::BossDefeated;
    } else if player_query.iter().any(PlayerHealth::is_dead) {
        info!("Fight lost");
        *outcome = FightOutcome::PlayerDefeated;
    }
}

/// Restart on a reset message, or on Enter/R once the fight is decided.
pub(crate) fn reset_fight(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut resets: MessageReader<FightResetMessage>,
    mut outcome: ResMut<FightOutcome>,
    mut player_query: Query<
        (
            &mut Transform,
            &mut PlayerHealth,
            &mut PlayerMotion,
            &mut LinearVelocity,
        ),
        (With<Player>, Without<BossController>),
    >,
    mut boss_query: Query<
        (
            &mut Transform,
            &mut BossController,
            &mut BossAnimation,
            &mut LinearVelocity,
        ),
        Without<Player>,
    >,
) {
    let requested = resets.read().count() > 0;
    let retry = *outcome != FightOutcome::InProgress
        && (keyboard.just_pressed(KeyCode::Enter) || keyboard.just_pressed(KeyCode::KeyR));
    if !requested && !retry {
        return;
    }

    for (mut transform, mut health, mut motion, mut velocity) in &mut player_query {
        transform.translation = PLAYER_SPAWN.extend(transform.translation.z);
        health.restore();
        *motion = PlayerMotion::default();
        velocity.0 = Vec2::ZERO;
    }

    for (mut transform, mut controller, mut animation, mut velocity) in &mut boss_query {
        transform.translation = BOSS_SPAWN.extend(transform.translation.z);
        controller.boss.reset(to_world(BOSS_SPAWN));
        animation.play(CombatState::Idle.animation());
        velocity.0 = Vec2::ZERO;
    }

    *outcome = FightOutcome::InProgress;
    info!("Fight reset");
}
