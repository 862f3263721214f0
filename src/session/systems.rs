// Session domain: systems that feed commands and time into the machine.

use bevy::prelude::*;

use super::{GameCommand, Session, Timings};
use crate::audio::PlayEffect;
use crate::config::GameConfig;
use crate::screens::Screen;

pub fn setup_session(mut commands: Commands, config: Res<GameConfig>) {
    commands.insert_resource(Session::new(Timings::from(config.as_ref())));
}

pub fn drive_session(
    time: Res<Time>,
    mut reader: MessageReader<GameCommand>,
    mut session: ResMut<Session>,
    mut effects: MessageWriter<PlayEffect>,
) {
    for effect in session.step(time.delta(), reader.read().copied()) {
        effects.write(PlayEffect(effect));
    }
}

/// Mirror the session's screen into the Bevy state so `OnEnter`/`DespawnOnExit` fire.
pub fn sync_screen(
    session: Res<Session>,
    screen: Res<State<Screen>>,
    mut next_screen: ResMut<NextState<Screen>>,
) {
    if session.screen() != *screen.get() {
        next_screen.set(session.screen());
    }
}
