//! Arena domain: system modules for the fight loop.

pub(crate) mod boss;
#[cfg(feature = "dev-tools")]
pub(crate) mod debug;
pub(crate) mod flow;
pub(crate) mod input;
pub(crate) mod player;
pub(crate) mod presentation;

pub(crate) use boss::drive_boss;
#[cfg(feature = "dev-tools")]
pub(crate) use debug::debug_keys;
pub(crate) use flow::{apply_player_hits, reset_fight, track_outcome};
pub(crate) use input::read_input;
pub(crate) use player::{
    apply_player_gravity, apply_player_movement, detect_ground, player_attack,
    update_player_timers,
};
pub(crate) use presentation::{update_camera_shake, update_effects};
