//! Arena domain: boss animation clock, effect sprites, and camera shake.

use bevy::prelude::*;
use rand::Rng;

use crate::arena::{ArenaCamera, CameraShake, EffectRequest, EffectSprite, PIXELS_PER_UNIT};

/// The slam jump clip reaches its apex frame here
const SLAM_JUMP_APEX: f32 = 0.45;
/// The cross slash clip finishes its recovery pose here
const CROSS_SLASH_RECOVERED: f32 = 0.85;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEvent {
    JumpApex,
    PhaseEnd,
}

/// Event keyed into `clip` that falls within (`before`, `after`].
pub fn clip_event(clip: &str, before: f32, after: f32) -> Option<AnimationEvent> {
    let crosses = |mark: f32| before < mark && after >= mark;
    match clip {
        "slam_jump" if crosses(SLAM_JUMP_APEX) => Some(AnimationEvent::JumpApex),
        "cross_slash" if crosses(CROSS_SLASH_RECOVERED) => Some(AnimationEvent::PhaseEnd),
        _ => None,
    }
}

fn effect_color(effect_id: &str) -> Color {
    match effect_id {
        "telegraph_flash" => Color::srgba(1.0, 0.9, 0.3, 0.9),
        "enrage_aura" => Color::srgba(1.0, 0.25, 0.05, 0.5),
        "slam_shockwave" => Color::srgba(0.9, 0.8, 0.7, 0.7),
        "landing_dust" => Color::srgba(0.6, 0.55, 0.5, 0.6),
        "boss_hit_spark" => Color::srgba(1.0, 1.0, 1.0, 0.9),
        _ => Color::srgba(0.8, 0.8, 0.8, 0.6),
    }
}

pub(crate) fn spawn_effect(commands: &mut Commands, boss_px: Vec2, effect: &EffectRequest) {
    let size = Vec2::splat(effect.scale.max(0.1) * PIXELS_PER_UNIT);
    let position = boss_px + effect.offset * PIXELS_PER_UNIT;
    commands.spawn((
        EffectSprite {
            remaining: effect.duration,
            duration: effect.duration.max(f32::EPSILON),
        },
        Sprite {
            color: effect_color(&effect.effect_id),
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(position.extend(2.0)),
    ));
}

pub(crate) fn update_effects(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut EffectSprite, &mut Sprite)>,
) {
    let dt = time.delta_secs();

    for (entity, mut effect, mut sprite) in &mut query {
        effect.remaining -= dt;
        if effect.remaining <= 0.0 {
            commands.entity(entity).despawn();
            continue;
        }
        let alpha = (effect.remaining / effect.duration).clamp(0.0, 1.0);
        sprite.color.set_alpha(alpha);
    }
}

pub(crate) fn update_camera_shake(
    time: Res<Time>,
    mut query: Query<(&mut CameraShake, &mut Transform), With<ArenaCamera>>,
) {
    let dt = time.delta_secs();
    let mut rng = rand::rng();

    for (mut shake, mut transform) in &mut query {
        if shake.remaining <= 0.0 {
            transform.translation.x = 0.0;
            transform.translation.y = 0.0;
            continue;
        }
        shake.remaining = (shake.remaining - dt).max(0.0);
        let amplitude = shake.intensity * shake.fraction_left();
        transform.translation.x = rng.random_range(-amplitude..=amplitude);
        transform.translation.y = rng.random_range(-amplitude..=amplitude);
    }
}
