// Shared UI pieces: palette, font, labels and buttons that issue game commands.

use bevy::prelude::*;

use crate::screens::AppPhase;
use crate::session::GameCommand;

pub struct WidgetsPlugin;

impl Plugin for WidgetsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_font).add_systems(
            Update,
            (button_visuals, button_actions).run_if(in_state(AppPhase::Ready)),
        );
    }
}

pub const NIGHT_BLUE: Color = Color::srgb(0.024, 0.043, 0.157);
pub const GOLD: Color = Color::srgb(0.98, 0.8, 0.08);
pub const INK: Color = Color::srgb(0.12, 0.12, 0.16);
pub const PANEL: Color = Color::srgba(1.0, 1.0, 1.0, 0.95);
pub const SCRIM: Color = Color::srgba(0.0, 0.0, 0.0, 0.7);

const NORMAL_BUTTON: Color = Color::srgb(0.23, 0.45, 0.9);
const HOVERED_BUTTON: Color = Color::srgb(0.3, 0.53, 0.96);
const PRESSED_BUTTON: Color = Color::srgb(0.15, 0.33, 0.75);

const FONT_PATH: &str = "fonts/NotoSansTC-Bold.ttf";

/// The copy is Traditional Chinese, so every label needs a CJK font.
#[derive(Resource)]
pub struct UiFont(pub Handle<Font>);

/// Pressing this entity sends the wrapped command.
#[derive(Component, Debug, Clone, Copy)]
pub struct CommandButton(pub GameCommand);

/// Buttons that get hover/press colours.
#[derive(Component)]
struct StyledButton;

fn load_font(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(UiFont(asset_server.load(FONT_PATH)));
}

pub fn label(font: &UiFont, text: impl Into<String>, size: f32, color: Color) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font: font.0.clone(),
            font_size: size,
            ..default()
        },
        TextColor(color),
    )
}

pub fn full_screen() -> Node {
    Node {
        width: Val::Percent(100.0),
        height: Val::Percent(100.0),
        flex_direction: FlexDirection::Column,
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        ..default()
    }
}

/// An absolutely positioned layer over the whole window.
pub fn overlay() -> Node {
    Node {
        position_type: PositionType::Absolute,
        ..full_screen()
    }
}

pub fn spawn_button(
    parent: &mut ChildSpawnerCommands,
    font: &UiFont,
    text: &str,
    command: GameCommand,
) {
    parent
        .spawn((
            CommandButton(command),
            StyledButton,
            Button,
            Node {
                min_width: Val::Px(200.0),
                height: Val::Px(56.0),
                padding: UiRect::horizontal(Val::Px(24.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(3.0)),
                ..default()
            },
            BorderColor::all(Color::WHITE),
            BackgroundColor(NORMAL_BUTTON),
        ))
        .with_children(|btn| {
            btn.spawn(label(font, text, 24.0, Color::WHITE));
        });
}

fn button_visuals(
    mut query: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<StyledButton>),
    >,
) {
    for (interaction, mut bg) in &mut query {
        *bg = match *interaction {
            Interaction::Pressed => PRESSED_BUTTON.into(),
            Interaction::Hovered => HOVERED_BUTTON.into(),
            Interaction::None => NORMAL_BUTTON.into(),
        };
    }
}

fn button_actions(
    query: Query<(&Interaction, &CommandButton), Changed<Interaction>>,
    mut commands: MessageWriter<GameCommand>,
) {
    for (interaction, button) in &query {
        if *interaction == Interaction::Pressed {
            commands.write(button.0);
        }
    }
}
