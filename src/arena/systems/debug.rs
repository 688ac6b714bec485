//! Arena domain: developer hotkeys for poking at the boss.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::arena::{BossController, FightResetMessage};

const DEBUG_STUN_SECONDS: f32 = 1.5;

/// F2 stuns the boss, F3 dumps a snapshot, F4 resets the fight.
pub(crate) fn debug_keys(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut boss_query: Query<&mut BossController>,
    mut resets: MessageWriter<FightResetMessage>,
) {
    if keyboard.just_pressed(KeyCode::F2) {
        for mut controller in &mut boss_query {
            controller.boss.stun_boss(DEBUG_STUN_SECONDS);
            info!("Debug: stunned {} for {}s", controller.boss.name(), DEBUG_STUN_SECONDS);
        }
    }

    if keyboard.just_pressed(KeyCode::F3) {
        for controller in &boss_query {
            match serde_json::to_string_pretty(&controller.boss.snapshot()) {
                Ok(json) => info!("Boss snapshot:\n{}", json),
                Err(e) => warn!("Failed to serialize boss snapshot: {}", e),
            }
        }
    }

    if keyboard.just_pressed(KeyCode::F4) {
        info!("Debug: fight reset requested");
        resets.write(FightResetMessage);
    }
}
