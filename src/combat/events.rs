//! Combat domain: one-way notifications emitted by the boss core.

use bevy::prelude::*;

use crate::combat::damage_window::AttackTag;
use crate::combat::state::CombatState;

/// Drained by the host after each tick with `BossEntity::drain_events`.
#[derive(Debug, Clone, PartialEq)]
pub enum BossEvent {
    StateChanged {
        from: CombatState,
        to: CombatState,
    },
    /// The damage window connected with the player
    PlayerHit {
        tag: AttackTag,
        damage: i32,
        knockback: Vec2,
    },
    DamageTaken {
        amount: i32,
        remaining: i32,
    },
    Enraged,
    Stunned {
        duration: f32,
    },
    SlamImpact {
        position: Vec2,
    },
    Died,
}
