// Summary: what the four answers had in common, then on to the ending.

use bevy::prelude::*;
use strum::IntoEnumIterator;

use crate::content::{images, item_icon};
use crate::preload::GameImages;
use crate::screens::{ItemKey, Screen};
use crate::session::{GameCommand, Session};
use crate::widgets::{GOLD, INK, PANEL, UiFont, full_screen, label, spawn_button};

pub struct SummaryPlugin;

impl Plugin for SummaryPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Screen::Summary), setup_summary);
    }
}

const EXPLAINER: &str = "使用 Micro LF 級天絲纖維，透過特殊工藝處理，\n有效降低原纖化現象，即使多次洗滌也能\n防止起毛球，維持光澤與柔軟觸感！";

fn setup_summary(
    mut commands: Commands,
    session: Res<Session>,
    font: Res<UiFont>,
    game_images: Res<GameImages>,
) {
    let inventory = session.state().inventory;

    commands
        .spawn((
            Node {
                row_gap: Val::Px(24.0),
                ..full_screen()
            },
            ImageNode::new(game_images.get(images::SUMMARY_BG)),
            DespawnOnExit(Screen::Summary),
        ))
        .with_children(|parent| {
            parent.spawn((
                ImageNode::new(game_images.get(images::HEDGEHOG_END)),
                Node {
                    width: Val::Px(288.0),
                    height: Val::Px(288.0),
                    ..default()
                },
            ));

            parent
                .spawn((
                    Node {
                        width: Val::Percent(80.0),
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(40.0)),
                        border: UiRect::all(Val::Px(8.0)),
                        row_gap: Val::Px(24.0),
                        ..default()
                    },
                    BackgroundColor(PANEL),
                    BorderColor::all(GOLD),
                ))
                .with_children(|panel| {
                    panel.spawn(label(
                        &font,
                        "天絲 Plus+ 的秘密",
                        44.0,
                        Color::srgb(0.12, 0.23, 0.54),
                    ));
                    panel.spawn(label(&font, EXPLAINER, 26.0, INK));

                    // Collected treasures.
                    panel
                        .spawn(Node {
                            column_gap: Val::Px(16.0),
                            align_items: AlignItems::Center,
                            ..default()
                        })
                        .with_children(|row| {
                            for key in ItemKey::iter().filter(|&key| inventory.has(key)) {
                                row.spawn((
                                    ImageNode::new(game_images.get(item_icon(key))),
                                    Node {
                                        width: Val::Px(64.0),
                                        height: Val::Px(64.0),
                                        ..default()
                                    },
                                ));
                            }
                            row.spawn(label(
                                &font,
                                format!("{} / {}", inventory.collected(), ItemKey::iter().count()),
                                22.0,
                                INK,
                            ));
                        });

                    spawn_button(panel, &font, "下一頁 ➔", GameCommand::FinishSummary);
                });
        });
}
