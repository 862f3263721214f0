// Quiz levels: question panel, two answers, and the reward / failure overlays.

use bevy::prelude::*;
use bevy::ui::FocusPolicy;

use crate::content::{QuizLevel, images, item_icon, level_for};
use crate::preload::GameImages;
use crate::screens::Screen;
use crate::session::{GameCommand, LEVEL_COUNT, Session};
use crate::widgets::{GOLD, INK, PANEL, SCRIM, UiFont, full_screen, label, overlay, spawn_button};

pub struct QuizPlugin;

impl Plugin for QuizPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Screen::Level1), setup_level)
            .add_systems(OnEnter(Screen::Level2), setup_level)
            .add_systems(OnEnter(Screen::Level3), setup_level)
            .add_systems(OnEnter(Screen::Level4), setup_level)
            .add_systems(Update, sync_overlays.run_if(in_quiz));
    }
}

#[derive(Component)]
struct QuestionPanel;

#[derive(Component)]
struct Enemy;

#[derive(Component)]
struct RewardOverlay;

#[derive(Component)]
struct FailOverlay;

fn in_quiz(screen: Option<Res<State<Screen>>>) -> bool {
    screen.is_some_and(|s| s.get().is_level())
}

fn setup_level(
    mut commands: Commands,
    screen: Res<State<Screen>>,
    font: Res<UiFont>,
    game_images: Res<GameImages>,
) {
    let screen = *screen.get();
    let (Some(level), Some(index)) = (level_for(screen), screen.level_index()) else {
        return;
    };

    commands
        .spawn((
            full_screen(),
            ImageNode::new(game_images.get(level.background)),
            DespawnOnExit(screen),
        ))
        .with_children(|parent| {
            parent.spawn((
                ImageNode::new(game_images.get(images::HEDGEHOG_BATTLE)),
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Percent(5.0),
                    bottom: Val::Percent(25.0),
                    width: Val::Percent(30.0),
                    ..default()
                },
            ));
            parent.spawn((
                Enemy,
                ImageNode::new(game_images.get(level.enemy_image)),
                Node {
                    position_type: PositionType::Absolute,
                    right: Val::Percent(5.0),
                    top: Val::Percent(8.0),
                    width: Val::Percent(35.0),
                    ..default()
                },
            ));

            parent
                .spawn((
                    QuestionPanel,
                    Node {
                        position_type: PositionType::Absolute,
                        bottom: Val::Px(32.0),
                        width: Val::Percent(80.0),
                        flex_direction: FlexDirection::Column,
                        padding: UiRect::all(Val::Px(32.0)),
                        border: UiRect::all(Val::Px(6.0)),
                        row_gap: Val::Px(20.0),
                        ..default()
                    },
                    BackgroundColor(PANEL),
                    BorderColor::all(Color::srgb(0.75, 0.86, 1.0)),
                ))
                .with_children(|panel| {
                    panel.spawn(label(
                        &font,
                        format!("LEVEL {} / {}  {}", index + 1, LEVEL_COUNT, level.context),
                        22.0,
                        Color::srgb(0.12, 0.23, 0.54),
                    ));
                    panel.spawn(label(&font, level.question, 34.0, INK));
                    panel
                        .spawn(Node {
                            column_gap: Val::Px(24.0),
                            justify_content: JustifyContent::Center,
                            ..default()
                        })
                        .with_children(|row| {
                            for (option, letter) in level.options.iter().zip(["A", "B"]) {
                                spawn_button(
                                    row,
                                    &font,
                                    &format!("{letter}. {}", option.label),
                                    GameCommand::Answer {
                                        correct: option.is_correct,
                                    },
                                );
                            }
                        });
                });
        });
}

fn sync_overlays(
    mut commands: Commands,
    session: Res<Session>,
    font: Res<UiFont>,
    game_images: Res<GameImages>,
    mut panels: Query<&mut Node, With<QuestionPanel>>,
    mut enemies: Query<&mut Visibility, With<Enemy>>,
    rewards: Query<Entity, With<RewardOverlay>>,
    fails: Query<Entity, With<FailOverlay>>,
) {
    let state = session.state();
    let Some(level) = session.current_level() else {
        return;
    };

    let display = if state.is_reward_shown {
        Display::None
    } else {
        Display::Flex
    };
    for mut node in &mut panels {
        if node.display != display {
            node.display = display;
        }
    }
    let enemy_visibility = if state.is_reward_shown {
        Visibility::Hidden
    } else {
        Visibility::Inherited
    };
    for mut visibility in &mut enemies {
        visibility.set_if_neq(enemy_visibility);
    }

    match (state.is_reward_shown, rewards.iter().next()) {
        (true, None) => spawn_reward_overlay(&mut commands, &font, &game_images, level),
        (false, Some(entity)) => commands.entity(entity).despawn(),
        _ => {}
    }
    match (state.is_answer_failed, fails.iter().next()) {
        (true, None) => spawn_fail_overlay(&mut commands, &font, &game_images, level.id),
        (false, Some(entity)) => commands.entity(entity).despawn(),
        _ => {}
    }
}

fn spawn_reward_overlay(
    commands: &mut Commands,
    font: &UiFont,
    game_images: &GameImages,
    level: &QuizLevel,
) {
    let boss = level.id == Screen::Level4;
    let (title, subtitle, proceed) = if boss {
        ("最終試煉通過！", "成功守護了睡眠星球！", "成功抵擋毛球 ➔")
    } else {
        ("怪物擊破！", "成功守護了布料結構", "繼續冒險 ➔")
    };

    commands
        .spawn((
            RewardOverlay,
            overlay(),
            BackgroundColor(SCRIM),
            FocusPolicy::Block,
            GlobalZIndex(50),
            DespawnOnExit(level.id),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(40.0)),
                        border: UiRect::all(Val::Px(8.0)),
                        row_gap: Val::Px(16.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(1.0, 0.98, 0.88)),
                    BorderColor::all(GOLD),
                ))
                .with_children(|modal| {
                    modal.spawn(label(font, title, 44.0, Color::srgb(0.79, 0.54, 0.02)));
                    modal.spawn(label(font, subtitle, 22.0, Color::srgb(0.42, 0.42, 0.45)));
                    modal.spawn((
                        ImageNode::new(game_images.get(item_icon(level.reward_item))),
                        Node {
                            width: Val::Px(192.0),
                            height: Val::Px(192.0),
                            ..default()
                        },
                    ));
                    modal.spawn(label(font, "獲得道具", 20.0, Color::srgb(0.23, 0.51, 0.96)));
                    modal.spawn(label(font, level.reward_name, 30.0, INK));
                    spawn_button(modal, font, proceed, GameCommand::AcknowledgeReward);
                });
        });
}

fn spawn_fail_overlay(
    commands: &mut Commands,
    font: &UiFont,
    game_images: &GameImages,
    screen: Screen,
) {
    commands
        .spawn((
            FailOverlay,
            overlay(),
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.8)),
            FocusPolicy::Block,
            GlobalZIndex(60),
            DespawnOnExit(screen),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(40.0)),
                        row_gap: Val::Px(24.0),
                        ..default()
                    },
                    BackgroundColor(Color::WHITE),
                ))
                .with_children(|modal| {
                    modal.spawn((
                        ImageNode::new(game_images.get(images::HEDGEHOG_CRY)),
                        Node {
                            width: Val::Px(192.0),
                            height: Val::Px(192.0),
                            ..default()
                        },
                    ));
                    modal.spawn(label(font, "防禦失敗！", 48.0, INK));
                    spawn_button(modal, font, "重新挑戰", GameCommand::Retry);
                });
        });
}
