//! Arena domain: player tuning and input resources.

use bevy::prelude::*;

/// Player controller tuning, in pixels and seconds.
#[derive(Resource, Debug, Clone)]
pub struct PlayerTuning {
    pub max_hp: i32,
    pub max_speed: f32,
    pub accel: f32,
    pub decel: f32,
    pub jump_velocity: f32,
    pub gravity: f32,
    pub coyote_time: f32,
    pub jump_buffer_time: f32,
    pub attack_damage: i32,
    /// Horizontal reach of the player's slash, measured from the body center
    pub attack_reach: f32,
    pub attack_cooldown: f32,
    /// Knockback handed to the boss, in world units per second
    pub attack_knockback: f32,
    pub iframes: f32,
    pub hurt_lock: f32,
    pub max_knockback_speed: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            max_hp: 100,
            max_speed: 320.0,
            accel: 3000.0,
            decel: 2600.0,
            jump_velocity: 680.0,
            gravity: 1800.0,
            coyote_time: 0.12,
            jump_buffer_time: 0.12,
            attack_damage: 12,
            attack_reach: 72.0,
            attack_cooldown: 0.35,
            attack_knockback: 3.0,
            iframes: 0.6,
            hurt_lock: 0.25,
            max_knockback_speed: 800.0,
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct ArenaInput {
    pub axis_x: f32,
    pub jump_just_pressed: bool,
    pub jump_held: bool,
    pub attack_just_pressed: bool,
}

/// Tracks the fight outcome so the UI shows one banner per result.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FightOutcome {
    #[default]
    InProgress,
    BossDefeated,
    PlayerDefeated,
}
