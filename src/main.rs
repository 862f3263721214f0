// Main
mod audio;
mod config;
mod content;
mod ending;
mod intro;
mod menu;
mod preload;
mod quiz;
mod screens;
mod session;
mod summary;
mod transition;
mod victory;
mod widgets;

use audio::AudioDirectorPlugin;
use bevy::prelude::*;
use config::ConfigPlugin;
use ending::EndingPlugin;
use intro::IntroPlugin;
use menu::MenuPlugin;
use preload::PreloadPlugin;
use quiz::QuizPlugin;
use screens::{AppPhase, Screen};
use session::SessionPlugin;
use summary::SummaryPlugin;
use transition::TransitionPlugin;
use victory::VictoryPlugin;
use widgets::WidgetsPlugin;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Cici's Fiber Quest".to_string(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(ConfigPlugin)
        .insert_resource(ClearColor(widgets::NIGHT_BLUE))
        .init_state::<AppPhase>()
        .add_sub_state::<Screen>()
        .add_systems(Startup, spawn_camera)
        .add_plugins((
            WidgetsPlugin,
            PreloadPlugin,
            SessionPlugin,
            AudioDirectorPlugin,
            MenuPlugin,
            IntroPlugin,
            QuizPlugin,
            TransitionPlugin,
            SummaryPlugin,
            EndingPlugin,
            VictoryPlugin,
        ))
        .run();
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}
