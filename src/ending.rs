// Ending cutscene. Runs for a fixed length with its own soundtrack, then reports that
// the "video" ended. A click skips it.

use std::time::Duration;

use bevy::audio::Volume;
use bevy::prelude::*;

use crate::config::GameConfig;
use crate::content::images;
use crate::preload::GameImages;
use crate::screens::Screen;
use crate::session::{GameCommand, Session};
use crate::widgets::{CommandButton, UiFont, full_screen, label};

pub struct EndingPlugin;

impl Plugin for EndingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Screen::Ending), setup_ending)
            .add_systems(OnExit(Screen::Ending), exit_ending)
            .add_systems(
                Update,
                (ending_timer, drift_hero).run_if(in_state(Screen::Ending)),
            );
    }
}

const SOUNDTRACK_PATH: &str = "sounds/ending.ogg";

#[derive(Resource)]
struct EndingState {
    timer: Timer,
    reported: bool,
}

impl EndingState {
    fn new(duration: Duration) -> Self {
        Self {
            timer: Timer::new(duration, TimerMode::Once),
            reported: false,
        }
    }

    /// True on the one frame the cutscene runs out.
    fn advance(&mut self, delta: Duration) -> bool {
        self.timer.tick(delta);
        if self.reported || !self.timer.is_finished() {
            return false;
        }
        self.reported = true;
        true
    }
}

#[derive(Component)]
struct EndingHero;

fn setup_ending(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<GameConfig>,
    session: Res<Session>,
    font: Res<UiFont>,
    game_images: Res<GameImages>,
) {
    commands.insert_resource(EndingState::new(Duration::from_secs_f32(
        config.ending_duration_secs.max(0.0),
    )));

    if session.state().is_audio_unlocked {
        commands.spawn((
            AudioPlayer::new(asset_server.load(SOUNDTRACK_PATH)),
            PlaybackSettings::DESPAWN.with_volume(Volume::Linear(config.effect_volume)),
            DespawnOnExit(Screen::Ending),
        ));
    }

    commands
        .spawn((
            CommandButton(GameCommand::VideoEnded),
            Button,
            Node {
                row_gap: Val::Px(32.0),
                ..full_screen()
            },
            BackgroundColor(Color::BLACK),
            DespawnOnExit(Screen::Ending),
        ))
        .with_children(|parent| {
            parent.spawn((
                ImageNode::new(game_images.get(images::CLOUD)),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Percent(10.0),
                    width: Val::Percent(40.0),
                    ..default()
                },
            ));
            parent.spawn((
                EndingHero,
                ImageNode::new(game_images.get(images::HEDGEHOG_HAPPY)),
                Node {
                    width: Val::Px(320.0),
                    height: Val::Px(320.0),
                    ..default()
                },
            ));
            parent.spawn(label(
                &font,
                "睡眠星球恢復了平靜...",
                36.0,
                Color::WHITE,
            ));
            parent.spawn(label(
                &font,
                "點擊跳過",
                16.0,
                Color::srgba(1.0, 1.0, 1.0, 0.4),
            ));
        });
}

fn ending_timer(
    mut state: ResMut<EndingState>,
    time: Res<Time>,
    mut commands: MessageWriter<GameCommand>,
) {
    if state.advance(time.delta()) {
        commands.write(GameCommand::VideoEnded);
    }
}

fn drift_hero(time: Res<Time>, mut hero: Query<&mut Node, With<EndingHero>>) {
    let Ok(mut node) = hero.single_mut() else {
        return;
    };
    node.margin = UiRect::top(Val::Px(12.0 * (time.elapsed_secs() * 1.5).sin()));
}

fn exit_ending(mut commands: Commands) {
    commands.remove_resource::<EndingState>();
}
