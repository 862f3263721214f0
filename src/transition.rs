// The inter-level screen, and the title cards that fade over each level as it opens.

use bevy::prelude::*;

use crate::content::images;
use crate::preload::GameImages;
use crate::screens::Screen;
use crate::widgets::{UiFont, full_screen, label, overlay};

pub struct TransitionPlugin;

impl Plugin for TransitionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Screen::InterLevel), setup_inter_level)
            .add_systems(OnEnter(Screen::Level1), spawn_title_card)
            .add_systems(OnEnter(Screen::Level2), spawn_title_card)
            .add_systems(OnEnter(Screen::Level3), spawn_title_card)
            .add_systems(OnEnter(Screen::Level4), spawn_title_card)
            .add_systems(Update, (fade_title_cards, race_stripes));
    }
}

const CARD_REVEAL: f32 = 0.1;
const CARD_HOLD: f32 = 0.8;
const CARD_FADE: f32 = 0.6;

const STRIPE_COUNT: usize = 12;
const STRIPE_SPEED: f32 = 160.0;

/// Black card with the level's title, owned by that level's screen.
#[derive(Component, Default)]
struct TitleCard {
    elapsed: f32,
}

#[derive(Component)]
struct TitleCardText;

#[derive(Component)]
struct Stripe;

fn card_title(screen: Screen) -> Option<&'static str> {
    match screen {
        Screen::Level1 => Some("LEVEL 1"),
        Screen::Level2 => Some("LEVEL 2"),
        Screen::Level3 => Some("LEVEL 3"),
        Screen::Level4 => Some("FINAL BOSS"),
        Screen::Start
        | Screen::Intro
        | Screen::InterLevel
        | Screen::Summary
        | Screen::Ending
        | Screen::Victory => None,
    }
}

/// `(title alpha, backdrop alpha)` at `elapsed` seconds, or `None` once the card is spent.
/// The title pops in over a solid backdrop, holds, then both fade together.
fn card_alpha(elapsed: f32) -> Option<(f32, f32)> {
    let fade_start = CARD_REVEAL + CARD_HOLD;
    if elapsed >= fade_start + CARD_FADE {
        None
    } else if elapsed >= fade_start {
        let left = 1.0 - (elapsed - fade_start) / CARD_FADE;
        Some((left, left))
    } else {
        Some(((elapsed / CARD_REVEAL).min(1.0), 1.0))
    }
}

fn spawn_title_card(mut commands: Commands, screen: Res<State<Screen>>, font: Res<UiFont>) {
    let screen = *screen.get();
    let Some(title) = card_title(screen) else {
        return;
    };

    // Dims the level only; never takes clicks.
    commands
        .spawn((
            TitleCard::default(),
            overlay(),
            BackgroundColor(Color::BLACK),
            GlobalZIndex(100),
            DespawnOnExit(screen),
        ))
        .with_children(|parent| {
            parent.spawn((
                TitleCardText,
                label(&font, title, 64.0, Color::srgba(1.0, 1.0, 1.0, 0.0)),
            ));
        });
}

fn fade_title_cards(
    mut commands: Commands,
    time: Res<Time>,
    mut cards: Query<(Entity, &mut TitleCard, &mut BackgroundColor, &Children)>,
    mut texts: Query<&mut TextColor, With<TitleCardText>>,
) {
    for (entity, mut card, mut backdrop, children) in &mut cards {
        card.elapsed += time.delta_secs();
        let Some((title_alpha, backdrop_alpha)) = card_alpha(card.elapsed) else {
            commands.entity(entity).despawn();
            continue;
        };
        backdrop.0 = Color::srgba(0.0, 0.0, 0.0, backdrop_alpha);
        for child in children.iter() {
            if let Ok(mut color) = texts.get_mut(child) {
                color.0 = Color::srgba(1.0, 1.0, 1.0, title_alpha);
            }
        }
    }
}

fn setup_inter_level(mut commands: Commands, font: Res<UiFont>, game_images: Res<GameImages>) {
    commands
        .spawn((
            full_screen(),
            BackgroundColor(Color::BLACK),
            DespawnOnExit(Screen::InterLevel),
        ))
        .with_children(|parent| {
            for i in 0..STRIPE_COUNT {
                parent.spawn((
                    Stripe,
                    Node {
                        position_type: PositionType::Absolute,
                        top: Val::Percent(100.0 * i as f32 / STRIPE_COUNT as f32),
                        left: Val::Px(-(i as f32 * 97.0 % 600.0)),
                        width: Val::Percent(60.0),
                        height: Val::Px(4.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.38, 0.65, 0.98, 0.2)),
                ));
            }

            parent.spawn((
                ImageNode::new(game_images.get(images::HEDGEHOG_GO)),
                Node {
                    width: Val::Px(192.0),
                    height: Val::Px(192.0),
                    ..default()
                },
            ));
            parent.spawn(label(&font, "前往下一世界...", 40.0, Color::WHITE));
        });
}

/// Stripes slide left and wrap, so the hedgehog looks like it is running.
fn race_stripes(
    time: Res<Time>,
    windows: Query<&Window>,
    mut stripes: Query<&mut Node, With<Stripe>>,
) {
    let width = windows.iter().next().map_or(1280.0, |w| w.width());
    for mut node in &mut stripes {
        let Val::Px(left) = node.left else {
            continue;
        };
        let mut next = left - STRIPE_SPEED * time.delta_secs();
        if next < -width {
            next += 2.0 * width;
        }
        node.left = Val::Px(next);
    }
}
