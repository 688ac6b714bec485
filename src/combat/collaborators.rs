//! Combat domain: collaborator traits the boss core talks to.
//!
//! The core never owns rendering, audio, or physics. A host hands it an object
//! implementing these traits on every tick.

use bevy::prelude::*;

use crate::combat::state::Facing;

/// Fire-and-forget presentation sink (animation, effects, audio, camera).
pub trait Presentation {
    fn play_animation(&mut self, name: &str);
    fn set_facing(&mut self, facing: Facing);
    fn spawn_effect(&mut self, effect_id: &str, offset: Vec2, scale: f32, duration: f32);
    fn play_sound(&mut self, clip_id: &str, volume: f32, pitch: f32);
    fn shake_camera(&mut self, intensity: f32, duration: f32);
}

/// Read-only world queries.
pub trait PhysicsQuery {
    /// Position of the player, or `None` when no target exists this tick.
    fn player_position(&self) -> Option<Vec2>;

    fn distance_to(&self, a: Vec2, b: Vec2) -> f32 {
        a.distance(b)
    }

    /// Height of the arena floor the boss lands on.
    fn ground_level(&self) -> f32;
}

/// Receives the velocity the core wants; integration belongs to the host.
pub trait MotionSink {
    fn set_velocity(&mut self, velocity: Vec2);
}

/// Capability check for movement controllers of any kind.
pub trait Grounded {
    fn is_grounded(&self) -> bool;
}

/// Everything `BossEntity::tick` needs from its host.
pub trait BossHost: Presentation + PhysicsQuery + MotionSink {}

impl<T: Presentation + PhysicsQuery + MotionSink + ?Sized> BossHost for T {}

/// A buffered presentation call. The core queues these and flushes them to
/// the host at the end of each tick.
#[derive(Debug, Clone, PartialEq)]
pub enum Cue {
    Animation(&'static str),
    Facing(Facing),
    Effect {
        effect_id: &'static str,
        offset: Vec2,
        scale: f32,
        duration: f32,
    },
    Sound {
        clip_id: &'static str,
        volume: f32,
        pitch: f32,
    },
    CameraShake {
        intensity: f32,
        duration: f32,
    },
}

impl Cue {
    pub fn deliver<P: Presentation + ?Sized>(&self, presentation: &mut P) {
        match *self {
            Cue::Animation(name) => presentation.play_animation(name),
            Cue::Facing(facing) => presentation.set_facing(facing),
            Cue::Effect {
                effect_id,
                offset,
                scale,
                duration,
            } => presentation.spawn_effect(effect_id, offset, scale, duration),
            Cue::Sound {
                clip_id,
                volume,
                pitch,
            } => presentation.play_sound(clip_id, volume, pitch),
            Cue::CameraShake {
                intensity,
                duration,
            } => presentation.shake_camera(intensity, duration),
        }
    }
}
