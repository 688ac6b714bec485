//! Arena domain: drives the boss core and applies what it asked for.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::arena::host::{to_pixels, to_world};
use crate::arena::systems::presentation::{AnimationEvent, clip_event, spawn_effect};
use crate::arena::{
    ArenaCamera, ArenaHost, BOSS_REST_Y, BossAnimation, BossController, CameraShake,
    PIXELS_PER_UNIT, Player, PlayerHitMessage,
};
use crate::combat::{BossEvent, CombatState, Facing};

pub(crate) fn drive_boss(
    mut commands: Commands,
    time: Res<Time>,
    player_query: Query<&Transform, (With<Player>, Without<BossController>)>,
    mut boss_query: Query<(
        &Transform,
        &mut BossController,
        &mut BossAnimation,
        &mut LinearVelocity,
        &mut Sprite,
    )>,
    mut camera_query: Query<&mut CameraShake, With<ArenaCamera>>,
    mut player_hits: MessageWriter<PlayerHitMessage>,
) {
    let dt = time.delta_secs();
    let player = player_query
        .iter()
        .next()
        .map(|transform| transform.translation.truncate());

    for (transform, mut controller, mut animation, mut velocity, mut sprite) in &mut boss_query {
        let boss_px = transform.translation.truncate();
        let boss = &mut controller.boss;
        boss.sync_position(to_world(boss_px));

        // Animation events fire from the clip clock, before the core advances.
        let before = animation.elapsed;
        animation.elapsed += dt;
        match clip_event(&animation.clip, before, animation.elapsed) {
            Some(AnimationEvent::JumpApex) => boss.on_jump_apex(),
            Some(AnimationEvent::PhaseEnd) => boss.on_attack_phase_end(),
            None => {}
        }

        let mut host = ArenaHost::new(player, BOSS_REST_Y, boss.facing());
        boss.tick(dt, &mut host);

        velocity.0 = host.velocity_px();
        if let Some(facing) = host.facing_changed {
            sprite.flip_x = facing == Facing::Left;
        }
        if let Some(clip) = host.animation.take() {
            animation.play(&clip);
        }
        for effect in host.effects.drain(..) {
            spawn_effect(&mut commands, boss_px, &effect);
        }
        if let Some((intensity, duration)) = host.shake {
            for mut shake in &mut camera_query {
                shake.start(intensity * PIXELS_PER_UNIT, duration);
            }
        }

        sprite.color = boss_tint(boss.current_state(), boss.is_enraged());

        for event in boss.drain_events() {
            match event {
                BossEvent::PlayerHit {
                    tag,
                    damage,
                    knockback,
                } => {
                    player_hits.write(PlayerHitMessage {
                        tag,
                        damage,
                        knockback: to_pixels(knockback),
                    });
                }
                BossEvent::Enraged => info!("{} is enraged", boss.name()),
                BossEvent::Died => info!("{} has fallen", boss.name()),
                BossEvent::SlamImpact { position } => {
                    debug!("Slam impact at {:?}", to_pixels(position));
                }
                BossEvent::StateChanged { .. }
                | BossEvent::DamageTaken { .. }
                | BossEvent::Stunned { .. } => {}
            }
        }
    }
}

fn boss_tint(state: CombatState, enraged: bool) -> Color {
    match state {
        CombatState::Dead => Color::srgb(0.2, 0.2, 0.2),
        CombatState::Stagger => Color::srgb(0.9, 0.6, 0.6),
        CombatState::EnrageTransition => Color::srgb(1.0, 0.35, 0.1),
        _ if enraged => Color::srgb(0.75, 0.2, 0.05),
        _ => Color::srgb(0.55, 0.1, 0.12),
    }
}
