//! Arena domain: the Bevy host that runs the Igris fight.
//!
//! One floor, two walls, a player, and the boss. The boss body is a kinematic
//! puppet of `BossEntity`: the core picks velocities, avian integrates them,
//! and the resulting position is synced back before the next tick.

mod components;
mod events;
mod host;
mod resources;
mod spawn;
mod systems;


pub use components::{
    ArenaCamera, BossAnimation, BossController, CameraShake, EffectSprite, GameLayer, Ground,
    Player, PlayerHealth, PlayerMotion, Wall,
};
pub use events::{FightResetMessage, PlayerHitMessage};
pub use host::{ArenaHost, EffectRequest, player_anchor, to_pixels, to_world};
pub use resources::{ArenaInput, FightOutcome, PlayerTuning};

use bevy::prelude::*;

use crate::arena::spawn::{setup_camera, spawn_arena, spawn_boss, spawn_player};
use crate::arena::systems::{
    apply_player_gravity, apply_player_hits, apply_player_movement, detect_ground,
    drive_boss, player_attack, read_input, reset_fight, track_outcome, update_camera_shake,
    update_effects, update_player_timers,
};

pub const PIXELS_PER_UNIT: f32 = 32.0;
/// Top surface of the floor collider
pub const FLOOR_TOP: f32 = -160.0;
pub const ARENA_HALF_WIDTH: f32 = 560.0;
pub const BOSS_SIZE: Vec2 = Vec2::new(48.0, 96.0);
pub const PLAYER_SIZE: Vec2 = Vec2::new(24.0, 48.0);
/// Boss center height when standing on the floor
pub const BOSS_REST_Y: f32 = FLOOR_TOP + BOSS_SIZE.y / 2.0;
pub const BOSS_SPAWN: Vec2 = Vec2::new(240.0, BOSS_REST_Y);
pub const PLAYER_SPAWN: Vec2 = Vec2::new(-240.0, FLOOR_TOP + PLAYER_SIZE.y / 2.0);

pub struct ArenaPlugin;

impl Plugin for ArenaPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerTuning>()
            .init_resource::<ArenaInput>()
            .init_resource::<FightOutcome>()
            .add_message::<PlayerHitMessage>()
            .add_message::<FightResetMessage>()
            .add_systems(
                Startup,
                (setup_camera, spawn_arena, spawn_player, spawn_boss),
            )
            .add_systems(
                Update,
                (
                    read_input,
                    detect_ground,
                    update_player_timers,
                    apply_player_movement,
                    apply_player_gravity,
                    player_attack,
                    drive_boss,
                    apply_player_hits,
                    track_outcome,
                    reset_fight,
                )
                    .chain(),
            )
            .add_systems(Update, (update_effects, update_camera_shake));

        #[cfg(feature = "dev-tools")]
        app.add_systems(Update, systems::debug_keys.before(reset_fight));
    }
}
