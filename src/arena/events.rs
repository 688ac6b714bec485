//! Arena domain: messages between the boss driver, the player, and the UI.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::combat::AttackTag;

/// The boss damage window connected with the player.
#[derive(Debug)]
pub struct PlayerHitMessage {
    pub tag: AttackTag,
    pub damage: i32,
    /// Pixels per second
    pub knockback: Vec2,
}

impl Message for PlayerHitMessage {}

/// Restart the fight from the spawn positions.
#[derive(Debug)]
pub struct FightResetMessage;

impl Message for FightResetMessage {}
