//! UI domain: end-of-fight banner and retry flow.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::arena::{FightOutcome, FightResetMessage};

/// Marker for the outcome overlay
#[derive(Component)]
pub struct OutcomeScreenUI;

/// Marker for the retry button on the outcome overlay
#[derive(Component)]
pub struct RetryButton;

/// Headline, subtext, and headline color for a decided fight.
pub(crate) fn banner_text(outcome: FightOutcome) -> Option<(&'static str, &'static str, Color)> {
    match outcome {
        FightOutcome::InProgress => None,
        FightOutcome::PlayerDefeated => Some((
            "YOU DIED",
            "The knight stands over you.",
            Color::srgb(0.8, 0.15, 0.15),
        )),
        FightOutcome::BossDefeated => Some((
            "IGRIS DEFEATED",
            "The crimson knight falls.",
            Color::srgb(0.95, 0.75, 0.3),
        )),
    }
}

/// Show the banner when the fight is decided and clear it on reset.
pub(crate) fn sync_outcome_screen(
    mut commands: Commands,
    outcome: Res<FightOutcome>,
    screen_query: Query<Entity, With<OutcomeScreenUI>>,
) {
    if !outcome.is_changed() {
        return;
    }

    for entity in &screen_query {
        commands.entity(entity).despawn();
    }
    if let Some((headline, subtext, color)) = banner_text(*outcome) {
        spawn_outcome_screen(&mut commands, headline, subtext, color);
    }
}

fn spawn_outcome_screen(commands: &mut Commands, headline: &str, subtext: &str, color: Color) {
    commands
        .spawn((
            OutcomeScreenUI,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.75)),
            ZIndex(100),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(headline),
                TextFont {
                    font_size: 72.0,
                    ..default()
                },
                TextColor(color),
                Node {
                    margin: UiRect::bottom(Val::Px(40.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::new(subtext),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(0.6, 0.6, 0.6)),
                Node {
                    margin: UiRect::bottom(Val::Px(60.0)),
                    ..default()
                },
            ));

            parent
                .spawn((
                    RetryButton,
                    Button,
                    Node {
                        padding: UiRect::axes(Val::Px(40.0), Val::Px(16.0)),
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.2, 0.2, 0.25)),
                    BorderColor::all(Color::srgb(0.5, 0.5, 0.6)),
                ))
                .with_child((
                    Text::new("FIGHT AGAIN"),
                    TextFont {
                        font_size: 28.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.9, 0.9, 0.9)),
                ));

            parent.spawn((
                Text::new("Press [Enter] or [R] to retry"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.4, 0.4, 0.45)),
                Node {
                    margin: UiRect::top(Val::Px(20.0)),
                    ..default()
                },
            ));
        });
}

pub(crate) fn handle_retry_button(
    button_query: Query<&Interaction, (With<RetryButton>, Changed<Interaction>)>,
    mut resets: MessageWriter<FightResetMessage>,
) {
    if button_query
        .iter()
        .any(|interaction| *interaction == Interaction::Pressed)
    {
        resets.write(FightResetMessage);
    }
}
