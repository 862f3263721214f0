// Victory: the timed offer screen. The session counts it down and resets on its own.

use bevy::prelude::*;

use crate::content::images;
use crate::preload::GameImages;
use crate::screens::Screen;
use crate::session::{GameCommand, Session};
use crate::widgets::{GOLD, INK, PANEL, UiFont, full_screen, label, spawn_button};

pub struct VictoryPlugin;

impl Plugin for VictoryPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Screen::Victory), setup_victory)
            .add_systems(Update, show_countdown.run_if(in_state(Screen::Victory)));
    }
}

#[derive(Component)]
struct CountdownText(u32);

fn countdown_line(seconds: u32) -> String {
    format!("畫面將在 {seconds} 秒後關閉")
}

fn setup_victory(
    mut commands: Commands,
    session: Res<Session>,
    font: Res<UiFont>,
    game_images: Res<GameImages>,
) {
    let seconds = session.state().countdown_seconds;

    commands
        .spawn((
            Node {
                justify_content: JustifyContent::FlexEnd,
                ..full_screen()
            },
            ImageNode::new(game_images.get(images::END_BG)),
            DespawnOnExit(Screen::Victory),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        width: Val::Percent(100.0),
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(24.0)),
                        border: UiRect::top(Val::Px(8.0)),
                        row_gap: Val::Px(8.0),
                        ..default()
                    },
                    BackgroundColor(PANEL),
                    BorderColor::all(GOLD),
                ))
                .with_children(|bar| {
                    bar.spawn(label(&font, "請拍攝此畫面，購買 天絲PLUS雲柔被1件", 22.0, INK));
                    bar.spawn(label(
                        &font,
                        "加贈 \"限量版小童枕1個\"",
                        30.0,
                        Color::srgb(0.94, 0.27, 0.27),
                    ));
                    bar.spawn(label(
                        &font,
                        "(限時優惠，請把握機會！)",
                        14.0,
                        Color::srgb(0.42, 0.42, 0.45),
                    ));

                    bar.spawn(Node {
                        column_gap: Val::Px(24.0),
                        align_items: AlignItems::Center,
                        margin: UiRect::top(Val::Px(12.0)),
                        ..default()
                    })
                    .with_children(|row| {
                        row.spawn((
                            CountdownText(seconds),
                            label(&font, countdown_line(seconds), 20.0, INK),
                        ));
                        spawn_button(row, &font, "前往購買", GameCommand::Purchase);
                        spawn_button(row, &font, "回到首頁", GameCommand::ResetNow);
                    });
                });
        });
}

fn show_countdown(session: Res<Session>, mut texts: Query<(&mut CountdownText, &mut Text)>) {
    let seconds = session.state().countdown_seconds;
    for (mut shown, mut text) in &mut texts {
        if shown.0 != seconds {
            shown.0 = seconds;
            **text = countdown_line(seconds);
        }
    }
}
