//! UI domain: boss health bar UI.

use bevy::prelude::*;

use crate::arena::BossController;

const BOSS_HEALTHBAR_WIDTH: f32 = 400.0;
const BOSS_HEALTHBAR_HEIGHT: f32 = 24.0;
const BOSS_HEALTHBAR_BOTTOM: f32 = 40.0;

/// Marker for the boss health bar UI container
#[derive(Component)]
pub struct BossHealthBarUI;

/// Marker for the boss health bar fill element
#[derive(Component)]
pub struct BossHealthBarFill {
    pub owner: Entity,
}

/// Marker for boss name label
#[derive(Component)]
pub struct BossNameLabel;

pub(crate) fn spawn_boss_healthbar(
    mut commands: Commands,
    boss_query: Query<(Entity, &BossController), Added<BossController>>,
    existing_bars: Query<&BossHealthBarFill>,
) {
    for (boss_entity, controller) in &boss_query {
        if existing_bars.iter().any(|bar| bar.owner == boss_entity) {
            continue;
        }

        commands
            .spawn((
                BossHealthBarUI,
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(BOSS_HEALTHBAR_BOTTOM),
                    left: Val::Percent(50.0),
                    margin: UiRect::left(Val::Px(-BOSS_HEALTHBAR_WIDTH / 2.0)),
                    width: Val::Px(BOSS_HEALTHBAR_WIDTH),
                    height: Val::Px(BOSS_HEALTHBAR_HEIGHT),
                    flex_direction: FlexDirection::Column,
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                BackgroundColor(Color::srgba(0.05, 0.05, 0.05, 0.9)),
                BorderColor::all(Color::srgb(0.6, 0.1, 0.1)),
            ))
            .with_children(|parent| {
                parent.spawn((
                    BossHealthBarFill { owner: boss_entity },
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.8, 0.1, 0.1)),
                ));
            });

        commands.spawn((
            BossNameLabel,
            Text::new(controller.boss.name().to_uppercase()),
            TextFont {
                font_size: 18.0,
                ..default()
            },
            TextColor(Color::srgb(0.9, 0.9, 0.9)),
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(BOSS_HEALTHBAR_BOTTOM + BOSS_HEALTHBAR_HEIGHT + 8.0),
                left: Val::Percent(50.0),
                margin: UiRect::left(Val::Px(-30.0)),
                ..default()
            },
        ));
    }
}

/// Fill fraction for the bar; zero when max HP is unusable.
pub(crate) fn health_fraction(current: i32, max: i32) -> f32 {
    if max <= 0 {
        0.0
    } else {
        (current as f32 / max as f32).clamp(0.0, 1.0)
    }
}

pub(crate) fn update_boss_healthbar(
    boss_query: Query<&BossController>,
    mut fill_query: Query<(&BossHealthBarFill, &mut Node, &mut BackgroundColor)>,
) {
    for (fill, mut node, mut bg_color) in &mut fill_query {
        if let Ok(controller) = boss_query.get(fill.owner) {
            let boss = &controller.boss;
            node.width = Val::Percent(health_fraction(boss.current_hp(), boss.max_hp()) * 100.0);

            // Second phase burns orange
            bg_color.0 = if boss.is_enraged() {
                Color::srgb(0.95, 0.45, 0.1)
            } else {
                Color::srgb(0.8, 0.1, 0.1)
            };
        }
    }
}

pub(crate) fn cleanup_boss_healthbar(
    mut commands: Commands,
    boss_query: Query<Entity, With<BossController>>,
    bar_query: Query<Entity, With<BossHealthBarUI>>,
    fill_query: Query<&BossHealthBarFill>,
    name_query: Query<Entity, With<BossNameLabel>>,
) {
    let has_valid_owner = fill_query
        .iter()
        .any(|fill| boss_query.get(fill.owner).is_ok());

    if !has_valid_owner {
        for bar_entity in &bar_query {
            commands.entity(bar_entity).despawn();
        }
        for name_entity in &name_query {
            commands.entity(name_entity).despawn();
        }
    }
}
