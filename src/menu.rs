// Start screen, plus the tap-to-enable-sound gate that sits over everything until
// the first click.

use bevy::prelude::*;
use bevy::ui::FocusPolicy;
use rand::Rng;

use crate::content::images;
use crate::preload::GameImages;
use crate::screens::{AppPhase, Screen};
use crate::session::{GameCommand, Session};
use crate::widgets::{CommandButton, SCRIM, UiFont, full_screen, label, overlay, spawn_button};

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(AppPhase::Ready), spawn_sound_gate)
            .add_systems(OnEnter(Screen::Start), setup_start)
            .add_systems(
                Update,
                (
                    close_sound_gate.run_if(in_state(AppPhase::Ready)),
                    twinkle.run_if(in_state(Screen::Start)),
                ),
            );
    }
}

const STAR_COUNT: usize = 50;

#[derive(Component)]
struct SoundGate;

#[derive(Component)]
struct Star {
    phase: f32,
}

fn spawn_sound_gate(mut commands: Commands, font: Res<UiFont>, session: Res<Session>) {
    if session.state().is_audio_unlocked {
        return;
    }
    commands
        .spawn((
            SoundGate,
            CommandButton(GameCommand::InitAudio),
            Button,
            FocusPolicy::Block,
            overlay(),
            BackgroundColor(SCRIM),
            GlobalZIndex(300),
        ))
        .with_children(|parent| {
            parent.spawn(label(&font, "點擊畫面開啟音效", 40.0, Color::WHITE));
        });
}

fn close_sound_gate(
    mut commands: Commands,
    session: Res<Session>,
    gate: Query<Entity, With<SoundGate>>,
) {
    if !session.state().is_audio_unlocked {
        return;
    }
    for entity in &gate {
        commands.entity(entity).despawn();
    }
}

fn setup_start(mut commands: Commands, font: Res<UiFont>, game_images: Res<GameImages>) {
    let mut rng = rand::rng();

    commands
        .spawn((
            full_screen(),
            ImageNode::new(game_images.get(images::START_BG)),
            DespawnOnExit(Screen::Start),
        ))
        .with_children(|parent| {
            for _ in 0..STAR_COUNT {
                let size = rng.random_range(2.0..6.0);
                parent.spawn((
                    Star {
                        phase: rng.random_range(0.0..3.0),
                    },
                    Node {
                        position_type: PositionType::Absolute,
                        top: Val::Percent(rng.random_range(0.0..100.0)),
                        left: Val::Percent(rng.random_range(0.0..100.0)),
                        width: Val::Px(size),
                        height: Val::Px(size),
                        ..default()
                    },
                    BackgroundColor(Color::WHITE),
                ));
            }

            parent
                .spawn(Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Percent(10.0),
                    width: Val::Percent(100.0),
                    justify_content: JustifyContent::Center,
                    ..default()
                })
                .with_children(|row| {
                    spawn_button(row, &font, "開始遊戲", GameCommand::Start);
                });
        });
}

fn twinkle(time: Res<Time>, mut stars: Query<(&Star, &mut BackgroundColor)>) {
    let t = time.elapsed_secs();
    for (star, mut bg) in &mut stars {
        let alpha = 0.3 + 0.7 * (0.5 + 0.5 * ((t + star.phase) * 2.0).sin());
        bg.0 = Color::srgba(1.0, 1.0, 1.0, alpha);
    }
}
