//! Arena domain: camera, arena geometry, player, and boss spawning.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::arena::host::to_world;
use crate::arena::{
    ARENA_HALF_WIDTH, ArenaCamera, BOSS_SIZE, BOSS_SPAWN, BossAnimation, BossController,
    CameraShake, FLOOR_TOP, GameLayer, Ground, PLAYER_SIZE, PLAYER_SPAWN, Player, PlayerHealth,
    PlayerMotion, PlayerTuning, Wall,
};
use crate::combat::{BossEntity, CombatState};
use crate::content::BossTuning;

const FLOOR_THICKNESS: f32 = 40.0;
const WALL_HEIGHT: f32 = 600.0;
const WALL_THICKNESS: f32 = 32.0;

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, ArenaCamera, CameraShake::default()));
}

pub(crate) fn spawn_arena(mut commands: Commands) {
    let ground_layers =
        CollisionLayers::new(GameLayer::Ground, [GameLayer::Player, GameLayer::Boss]);
    let wall_layers = CollisionLayers::new(GameLayer::Wall, [GameLayer::Player, GameLayer::Boss]);
    let floor_width = ARENA_HALF_WIDTH * 2.0 + WALL_THICKNESS * 2.0;

    // Floor
    commands.spawn((
        Ground,
        Sprite {
            color: Color::srgb(0.25, 0.22, 0.28),
            custom_size: Some(Vec2::new(floor_width, FLOOR_THICKNESS)),
            ..default()
        },
        Transform::from_xyz(0.0, FLOOR_TOP - FLOOR_THICKNESS / 2.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(floor_width, FLOOR_THICKNESS),
        ground_layers,
    ));

    // Walls
    for side in [-1.0, 1.0] {
        commands.spawn((
            Wall,
            Sprite {
                color: Color::srgb(0.18, 0.16, 0.22),
                custom_size: Some(Vec2::new(WALL_THICKNESS, WALL_HEIGHT)),
                ..default()
            },
            Transform::from_xyz(
                side * (ARENA_HALF_WIDTH + WALL_THICKNESS / 2.0),
                FLOOR_TOP + WALL_HEIGHT / 2.0,
                0.0,
            ),
            RigidBody::Static,
            Collider::rectangle(WALL_THICKNESS, WALL_HEIGHT),
            wall_layers,
        ));
    }
}

pub(crate) fn spawn_player(mut commands: Commands, tuning: Res<PlayerTuning>) {
    commands.spawn((
        // Identity & state
        (
            Player,
            PlayerMotion::default(),
            PlayerHealth::new(tuning.max_hp),
        ),
        // Rendering
        Sprite {
            color: Color::srgb(0.9, 0.9, 0.9),
            custom_size: Some(PLAYER_SIZE),
            ..default()
        },
        Transform::from_translation(PLAYER_SPAWN.extend(1.0)),
        // Physics
        (
            RigidBody::Dynamic,
            Collider::rectangle(PLAYER_SIZE.x, PLAYER_SIZE.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            GravityScale(0.0), // Gravity is applied by the player systems
            Friction::new(0.0),
            CollisionLayers::new(GameLayer::Player, [GameLayer::Ground, GameLayer::Wall]),
        ),
    ));
}

pub(crate) fn spawn_boss(mut commands: Commands, tuning: Option<Res<BossTuning>>) {
    let tuning = match tuning {
        Some(tuning) => (*tuning).clone(),
        None => {
            warn!("BossTuning not available, using default boss tuning");
            BossTuning::default()
        }
    };

    info!("Spawning {} ({} HP, seed {})", tuning.name, tuning.max_hp, tuning.seed);
    let boss = BossEntity::new(tuning, to_world(BOSS_SPAWN));

    commands.spawn((
        (
            BossController { boss },
            BossAnimation {
                clip: CombatState::Idle.animation().to_string(),
                elapsed: 0.0,
            },
        ),
        Sprite {
            color: Color::srgb(0.55, 0.1, 0.12),
            custom_size: Some(BOSS_SIZE),
            ..default()
        },
        Transform::from_translation(BOSS_SPAWN.extend(0.5)),
        (
            RigidBody::Dynamic,
            Collider::rectangle(BOSS_SIZE.x, BOSS_SIZE.y),
            LockedAxes::ROTATION_LOCKED,
            LinearVelocity::default(),
            // The boss core owns gravity
            GravityScale(0.0),
            Friction::new(0.0),
            CollisionLayers::new(GameLayer::Boss, [GameLayer::Ground, GameLayer::Wall]),
        ),
    ));
}
