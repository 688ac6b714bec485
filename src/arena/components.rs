//! Arena domain: components and physics layers for the fight.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::{BossEntity, Facing, Grounded};

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Floor of the arena
    Ground,
    /// Side walls
    Wall,
    Player,
    /// The boss body; it passes through the player, hits go through the damage window
    Boss,
}

#[derive(Component, Debug)]
pub struct Player;

/// Locomotion and combat timers for the player.
#[derive(Component, Debug, Default)]
pub struct PlayerMotion {
    pub on_ground: bool,
    pub facing: Facing,
    pub coyote_timer: f32,
    pub jump_buffer_timer: f32,
    pub attack_cooldown: f32,
    pub invulnerable_timer: f32,
    /// Knockback lockout: no air control while positive
    pub hurt_timer: f32,
}

impl Grounded for PlayerMotion {
    fn is_grounded(&self) -> bool {
        self.on_ground
    }
}

#[derive(Component, Debug)]
pub struct PlayerHealth {
    pub current: i32,
    pub max: i32,
}

impl PlayerHealth {
    pub fn new(max: i32) -> Self {
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let actual = amount.clamp(0, self.current);
        self.current -= actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    pub fn percent(&self) -> f32 {
        if self.max <= 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }

    pub fn restore(&mut self) {
        self.current = self.max;
    }
}

/// Owns the boss core. The arena drives it once per frame.
#[derive(Component, Debug)]
pub struct BossController {
    pub boss: BossEntity,
}

/// Clip the boss is currently playing and how long it has been running.
#[derive(Component, Debug, Default)]
pub struct BossAnimation {
    pub clip: String,
    pub elapsed: f32,
}

impl BossAnimation {
    pub fn play(&mut self, clip: &str) {
        self.clip.clear();
        self.clip.push_str(clip);
        self.elapsed = 0.0;
    }
}

/// Short-lived presentation sprite spawned from a boss effect cue.
#[derive(Component, Debug)]
pub struct EffectSprite {
    pub remaining: f32,
    pub duration: f32,
}

#[derive(Component, Debug)]
pub struct ArenaCamera;

/// Screen shake applied around the camera's rest position.
#[derive(Component, Debug, Default)]
pub struct CameraShake {
    pub intensity: f32,
    pub remaining: f32,
    pub duration: f32,
}

impl CameraShake {
    /// Start a shake; a weaker request never cuts a stronger one short.
    pub fn start(&mut self, intensity: f32, duration: f32) {
        if intensity >= self.intensity * self.fraction_left() {
            self.intensity = intensity;
            self.duration = duration.max(f32::EPSILON);
            self.remaining = duration;
        }
    }

    pub fn fraction_left(&self) -> f32 {
        if self.duration <= 0.0 {
            0.0
        } else {
            (self.remaining / self.duration).clamp(0.0, 1.0)
        }
    }
}

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Marker for wall colliders
#[derive(Component, Debug)]
pub struct Wall;
