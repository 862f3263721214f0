// Session domain: plugin wiring and public exports.

mod commands;
mod machine;
mod systems;

#[cfg(test)]
mod tests;

pub use commands::GameCommand;
pub use machine::{LEVEL_COUNT, Session, Timings};

use bevy::prelude::*;

use crate::screens::AppPhase;
use crate::session::systems::{drive_session, setup_session, sync_screen};

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<GameCommand>()
            .add_systems(Startup, setup_session)
            .add_systems(
                Update,
                (drive_session, sync_screen)
                    .chain()
                    .run_if(in_state(AppPhase::Ready)),
            );
    }
}
