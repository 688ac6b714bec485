//! Arena domain: per-frame adapter between the boss core and the ECS world.
//!
//! The core works in world units; the arena renders in pixels. `ArenaHost`
//! converts on the way in, records what the core asked for during `tick`, and
//! the boss driver applies those requests to components afterwards.

use bevy::prelude::*;

use crate::arena::{BOSS_SIZE, PIXELS_PER_UNIT, PLAYER_SIZE};
use crate::combat::{Facing, MotionSink, PhysicsQuery, Presentation};

pub fn to_world(pixels: Vec2) -> Vec2 {
    pixels / PIXELS_PER_UNIT
}

pub fn to_pixels(world: Vec2) -> Vec2 {
    world * PIXELS_PER_UNIT
}

/// Player center shifted so that both bodies standing on the floor share a
/// height. Range checks then measure feet to feet.
pub fn player_anchor(player_center: Vec2) -> Vec2 {
    player_center + Vec2::new(0.0, (BOSS_SIZE.y - PLAYER_SIZE.y) / 2.0)
}

/// Effect spawn request recorded from `Presentation::spawn_effect`.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectRequest {
    pub effect_id: String,
    /// World units, x already mirrored by the facing at request time
    pub offset: Vec2,
    pub scale: f32,
    pub duration: f32,
}

#[derive(Debug, Default)]
pub struct ArenaHost {
    player: Option<Vec2>,
    ground: f32,
    velocity: Vec2,
    facing: Facing,
    pub(crate) facing_changed: Option<Facing>,
    pub(crate) animation: Option<String>,
    pub(crate) effects: Vec<EffectRequest>,
    pub(crate) shake: Option<(f32, f32)>,
}

impl ArenaHost {
    /// `player_px` is the player's body center, `boss_rest_y_px` the boss
    /// center height when standing on the floor.
    pub fn new(player_px: Option<Vec2>, boss_rest_y_px: f32, facing: Facing) -> Self {
        Self {
            player: player_px.map(|center| to_world(player_anchor(center))),
            ground: boss_rest_y_px / PIXELS_PER_UNIT,
            facing,
            ..default()
        }
    }

    /// Velocity the core asked for, in pixels per second.
    pub fn velocity_px(&self) -> Vec2 {
        to_pixels(self.velocity)
    }
}

impl Presentation for ArenaHost {
    fn play_animation(&mut self, name: &str) {
        self.animation = Some(name.to_string());
    }

    fn set_facing(&mut self, facing: Facing) {
        self.facing = facing;
        self.facing_changed = Some(facing);
    }

    fn spawn_effect(&mut self, effect_id: &str, offset: Vec2, scale: f32, duration: f32) {
        self.effects.push(EffectRequest {
            effect_id: effect_id.to_string(),
            offset: Vec2::new(offset.x * self.facing.sign(), offset.y),
            scale,
            duration,
        });
    }

    fn play_sound(&mut self, clip_id: &str, volume: f32, pitch: f32) {
        // No audio assets ship with the arena; the cue is traced instead.
        debug!("sound '{}' (volume {:.2}, pitch {:.2})", clip_id, volume, pitch);
    }

    fn shake_camera(&mut self, intensity: f32, duration: f32) {
        if self.shake.is_none_or(|(current, _)| intensity > current) {
            self.shake = Some((intensity, duration));
        }
    }
}

impl PhysicsQuery for ArenaHost {
    fn player_position(&self) -> Option<Vec2> {
        self.player
    }

    fn ground_level(&self) -> f32 {
        self.ground
    }
}

impl MotionSink for ArenaHost {
    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }
}
