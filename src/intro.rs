// Intro section: a scripted dialogue. Clicking anywhere advances it.

use bevy::prelude::*;

use crate::content::{STORY_SCRIPT, images};
use crate::preload::GameImages;
use crate::screens::Screen;
use crate::session::{GameCommand, Session};
use crate::widgets::{CommandButton, GOLD, INK, PANEL, UiFont, full_screen, label};

pub struct IntroPlugin;

impl Plugin for IntroPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Screen::Intro), setup_intro)
            .add_systems(Update, show_story_line.run_if(in_state(Screen::Intro)));
    }
}

/// Which script line the dialogue widgets currently show.
#[derive(Component)]
struct ShownLine(usize);

#[derive(Component)]
struct DialogueText;

#[derive(Component)]
struct SpeakerText;

#[derive(Component)]
struct Portrait;

fn setup_intro(mut commands: Commands, font: Res<UiFont>, game_images: Res<GameImages>) {
    let first = &STORY_SCRIPT[0];

    commands
        .spawn((
            ShownLine(0),
            CommandButton(GameCommand::AdvanceStory),
            Button,
            Node {
                justify_content: JustifyContent::FlexEnd,
                ..full_screen()
            },
            ImageNode::new(game_images.get(images::INTRO_BG)).with_color(Color::srgb(0.5, 0.5, 0.5)),
            DespawnOnExit(Screen::Intro),
        ))
        .with_children(|parent| {
            parent.spawn((
                Portrait,
                ImageNode::new(game_images.get(first.portrait)),
                Node {
                    width: Val::Px(320.0),
                    height: Val::Px(320.0),
                    margin: UiRect::bottom(Val::Px(16.0)),
                    ..default()
                },
            ));

            // Dialogue box.
            parent
                .spawn((
                    Node {
                        width: Val::Percent(80.0),
                        min_height: Val::Px(160.0),
                        flex_direction: FlexDirection::Column,
                        justify_content: JustifyContent::Center,
                        padding: UiRect::all(Val::Px(24.0)),
                        margin: UiRect::bottom(Val::Px(24.0)),
                        border: UiRect::all(Val::Px(8.0)),
                        row_gap: Val::Px(12.0),
                        ..default()
                    },
                    BackgroundColor(PANEL),
                    BorderColor::all(Color::srgb(0.23, 0.51, 0.96)),
                ))
                .with_children(|dialogue| {
                    dialogue.spawn((SpeakerText, label(&font, first.speaker, 22.0, GOLD)));
                    dialogue.spawn((DialogueText, label(&font, first.text, 28.0, INK)));
                });

            parent.spawn(label(
                &font,
                "點擊繼續...",
                18.0,
                Color::srgba(1.0, 1.0, 1.0, 0.5),
            ));
        });
}

fn show_story_line(
    session: Res<Session>,
    game_images: Res<GameImages>,
    mut shown: Query<&mut ShownLine>,
    mut texts: Query<&mut Text, (With<DialogueText>, Without<SpeakerText>)>,
    mut speakers: Query<&mut Text, With<SpeakerText>>,
    mut portraits: Query<&mut ImageNode, With<Portrait>>,
) {
    let Ok(mut shown) = shown.single_mut() else {
        return;
    };
    let index = session.state().story_index;
    if shown.0 == index {
        return;
    }
    let Some(line) = STORY_SCRIPT.get(index) else {
        return;
    };
    shown.0 = index;

    for mut text in &mut texts {
        **text = line.text.to_string();
    }
    for mut speaker in &mut speakers {
        **speaker = line.speaker.to_string();
    }
    for mut portrait in &mut portraits {
        portrait.image = game_images.get(line.portrait);
    }
}
