//! UI domain: fight HUD and the outcome banner.

mod hud_boss;
mod hud_player;
mod outcome;


use bevy::prelude::*;

use crate::ui::hud_boss::{cleanup_boss_healthbar, spawn_boss_healthbar, update_boss_healthbar};
use crate::ui::hud_player::{spawn_player_healthbar_ui, update_player_healthbar};
use crate::ui::outcome::{handle_retry_button, sync_outcome_screen};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_player_healthbar_ui).add_systems(
            Update,
            (
                update_player_healthbar,
                spawn_boss_healthbar,
                update_boss_healthbar,
                cleanup_boss_healthbar,
                sync_outcome_screen,
                handle_retry_button,
            ),
        );
    }
}
