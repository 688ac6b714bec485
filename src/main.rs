use avian2d::prelude::*;
use bevy::prelude::*;

use igris_arena::arena::ArenaPlugin;
use igris_arena::content::ContentPlugin;
use igris_arena::ui::UiPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Igris Arena".to_string(),
                resolution: (1280, 720).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(PhysicsPlugins::default())
        .insert_resource(ClearColor(Color::srgb(0.08, 0.06, 0.1)))
        .add_plugins((ContentPlugin, ArenaPlugin, UiPlugin))
        .run();
}
