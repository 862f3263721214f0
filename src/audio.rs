// Audio director: one looping background track chosen from the screen, plus one-shot effects.

use bevy::audio::{AudioSinkPlayback, Volume};
use bevy::prelude::*;

use crate::config::GameConfig;
use crate::screens::{AppPhase, Screen};
use crate::session::Session;

pub struct AudioDirectorPlugin;

impl Plugin for AudioDirectorPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PlayEffect>()
            .add_systems(Startup, load_sounds)
            .add_systems(
                Update,
                (play_effects, reconcile_music).run_if(in_state(AppPhase::Ready)),
            );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    Correct,
    Wrong,
    Victory,
    Click,
    BossDefeat,
}

#[derive(Message, Debug, Clone, Copy)]
pub struct PlayEffect(pub SoundEffect);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackgroundTrack {
    Start,
    Transition,
    Level1,
    Level2,
    Level3,
    Level4,
    Victory,
}

impl BackgroundTrack {
    /// `None` means silence: the ending cutscene brings its own audio.
    pub fn for_screen(screen: Screen) -> Option<Self> {
        match screen {
            Screen::Start | Screen::Intro => Some(Self::Start),
            Screen::InterLevel => Some(Self::Transition),
            Screen::Level1 => Some(Self::Level1),
            Screen::Level2 => Some(Self::Level2),
            Screen::Level3 => Some(Self::Level3),
            Screen::Level4 => Some(Self::Level4),
            Screen::Summary | Screen::Victory => Some(Self::Victory),
            Screen::Ending => None,
        }
    }
}

#[derive(Resource)]
struct GameSounds {
    correct: Handle<AudioSource>,
    wrong: Handle<AudioSource>,
    victory: Handle<AudioSource>,
    click: Handle<AudioSource>,
    boss_defeat: Handle<AudioSource>,
    bgm_start: Handle<AudioSource>,
    bgm_transition: Handle<AudioSource>,
    bgm_levels: [Handle<AudioSource>; 4],
    bgm_victory: Handle<AudioSource>,
}

impl GameSounds {
    fn effect(&self, effect: SoundEffect) -> Handle<AudioSource> {
        match effect {
            SoundEffect::Correct => self.correct.clone(),
            SoundEffect::Wrong => self.wrong.clone(),
            SoundEffect::Victory => self.victory.clone(),
            SoundEffect::Click => self.click.clone(),
            SoundEffect::BossDefeat => self.boss_defeat.clone(),
        }
    }

    fn track(&self, track: BackgroundTrack) -> Handle<AudioSource> {
        match track {
            BackgroundTrack::Start => self.bgm_start.clone(),
            BackgroundTrack::Transition => self.bgm_transition.clone(),
            BackgroundTrack::Level1 => self.bgm_levels[0].clone(),
            BackgroundTrack::Level2 => self.bgm_levels[1].clone(),
            BackgroundTrack::Level3 => self.bgm_levels[2].clone(),
            BackgroundTrack::Level4 => self.bgm_levels[3].clone(),
            BackgroundTrack::Victory => self.bgm_victory.clone(),
        }
    }
}

/// The single background music entity.
#[derive(Component, Debug)]
struct BackgroundMusic {
    track: BackgroundTrack,
    paused: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicAction {
    Keep,
    Play(BackgroundTrack),
    Resume,
    Pause,
}

/// Decide what to do with the music given what is loaded and what the screen wants.
/// Returns `Keep` whenever the right track is already playing.
pub fn plan_music(
    current: Option<(BackgroundTrack, bool)>,
    target: Option<BackgroundTrack>,
) -> MusicAction {
    match (current, target) {
        (None, None) => MusicAction::Keep,
        (None, Some(track)) => MusicAction::Play(track),
        (Some((loaded, paused)), Some(track)) if loaded == track => {
            if paused {
                MusicAction::Resume
            } else {
                MusicAction::Keep
            }
        }
        (Some(_), Some(track)) => MusicAction::Play(track),
        (Some((_, false)), None) => MusicAction::Pause,
        (Some((_, true)), None) => MusicAction::Keep,
    }
}

/// Volume for a one-shot effect, or `None` while audio is still locked.
/// Locked audio drops effects instead of queueing them.
pub fn effect_volume(effect: SoundEffect, unlocked: bool, config: &GameConfig) -> Option<f32> {
    if !unlocked {
        return None;
    }
    Some(match effect {
        SoundEffect::Click => config.click_volume,
        SoundEffect::Correct
        | SoundEffect::Wrong
        | SoundEffect::Victory
        | SoundEffect::BossDefeat => config.effect_volume,
    })
}

fn load_sounds(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(GameSounds {
        correct: asset_server.load("sounds/correct.ogg"),
        wrong: asset_server.load("sounds/wrong.ogg"),
        victory: asset_server.load("sounds/victory.ogg"),
        click: asset_server.load("sounds/blip.ogg"),
        boss_defeat: asset_server.load("sounds/boss-defeat.ogg"),
        bgm_start: asset_server.load("sounds/bgm-start.ogg"),
        bgm_transition: asset_server.load("sounds/bgm-transition.ogg"),
        bgm_levels: [
            asset_server.load("sounds/bgm-level1.ogg"),
            asset_server.load("sounds/bgm-level2.ogg"),
            asset_server.load("sounds/bgm-level3.ogg"),
            asset_server.load("sounds/bgm-level4.ogg"),
        ],
        bgm_victory: asset_server.load("sounds/wins.ogg"),
    });
}

fn play_effects(
    mut commands: Commands,
    mut events: MessageReader<PlayEffect>,
    session: Res<Session>,
    sounds: Option<Res<GameSounds>>,
    config: Res<GameConfig>,
) {
    let Some(sounds) = sounds else {
        return;
    };

    let unlocked = session.state().is_audio_unlocked;
    for PlayEffect(effect) in events.read() {
        let Some(volume) = effect_volume(*effect, unlocked, &config) else {
            continue;
        };
        commands.spawn((
            AudioPlayer::new(sounds.effect(*effect)),
            PlaybackSettings::DESPAWN.with_volume(Volume::Linear(volume)),
        ));
    }
}

fn reconcile_music(
    mut commands: Commands,
    session: Res<Session>,
    sounds: Option<Res<GameSounds>>,
    config: Res<GameConfig>,
    mut music: Query<(Entity, &mut BackgroundMusic, Option<&AudioSink>)>,
) {
    if !session.state().is_audio_unlocked {
        return;
    }
    let Some(sounds) = sounds else {
        return;
    };

    let current = music.iter().next().map(|(_, m, _)| (m.track, m.paused));
    let target = BackgroundTrack::for_screen(session.screen());

    match plan_music(current, target) {
        MusicAction::Keep => {}
        MusicAction::Play(track) => {
            for (entity, _, _) in &music {
                commands.entity(entity).despawn();
            }
            debug!("Background track -> {:?}", track);
            commands.spawn((
                BackgroundMusic {
                    track,
                    paused: false,
                },
                AudioPlayer::new(sounds.track(track)),
                PlaybackSettings::LOOP.with_volume(Volume::Linear(config.music_volume)),
            ));
        }
        MusicAction::Pause => {
            for (entity, mut bgm, sink) in &mut music {
                match sink {
                    Some(sink) => {
                        sink.pause();
                        bgm.paused = true;
                    }
                    // Never started; nothing to keep.
                    None => commands.entity(entity).despawn(),
                }
            }
        }
        MusicAction::Resume => {
            for (_, mut bgm, sink) in &mut music {
                if let Some(sink) = sink {
                    sink.play();
                }
                bgm.paused = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_track_table() {
        use BackgroundTrack as T;
        let expected = [
            (Screen::Start, Some(T::Start)),
            (Screen::Intro, Some(T::Start)),
            (Screen::Level1, Some(T::Level1)),
            (Screen::Level2, Some(T::Level2)),
            (Screen::Level3, Some(T::Level3)),
            (Screen::Level4, Some(T::Level4)),
            (Screen::InterLevel, Some(T::Transition)),
            (Screen::Summary, Some(T::Victory)),
            (Screen::Ending, None),
            (Screen::Victory, Some(T::Victory)),
        ];
        assert_eq!(expected.len(), Screen::iter().count());
        for (screen, track) in expected {
            assert_eq!(BackgroundTrack::for_screen(screen), track, "{screen:?}");
        }
    }

    #[test]
    fn test_same_track_is_left_alone() {
        let action = plan_music(
            Some((BackgroundTrack::Start, false)),
            BackgroundTrack::for_screen(Screen::Intro),
        );
        assert_eq!(action, MusicAction::Keep);
    }

    #[test]
    fn test_new_track_replaces_old() {
        let action = plan_music(
            Some((BackgroundTrack::Start, false)),
            Some(BackgroundTrack::Level1),
        );
        assert_eq!(action, MusicAction::Play(BackgroundTrack::Level1));
        assert_eq!(
            plan_music(None, Some(BackgroundTrack::Start)),
            MusicAction::Play(BackgroundTrack::Start)
        );
    }

    #[test]
    fn test_ending_pauses_and_victory_resumes() {
        let summary = Some((BackgroundTrack::Victory, false));
        assert_eq!(plan_music(summary, None), MusicAction::Pause);

        let paused = Some((BackgroundTrack::Victory, true));
        assert_eq!(plan_music(paused, None), MusicAction::Keep);
        assert_eq!(
            plan_music(paused, Some(BackgroundTrack::Victory)),
            MusicAction::Resume
        );
    }

    #[test]
    fn test_paused_track_replaced_by_different_one() {
        let paused = Some((BackgroundTrack::Victory, true));
        assert_eq!(
            plan_music(paused, Some(BackgroundTrack::Start)),
            MusicAction::Play(BackgroundTrack::Start)
        );
    }

    #[test]
    fn test_locked_audio_drops_every_effect() {
        let config = GameConfig::default();
        for effect in [
            SoundEffect::Correct,
            SoundEffect::Wrong,
            SoundEffect::Victory,
            SoundEffect::Click,
            SoundEffect::BossDefeat,
        ] {
            assert_eq!(effect_volume(effect, false, &config), None, "{effect:?}");
        }
    }

    #[test]
    fn test_unlocked_audio_uses_configured_volumes() {
        let config = GameConfig {
            click_volume: 0.25,
            effect_volume: 0.75,
            ..GameConfig::default()
        };
        assert_eq!(effect_volume(SoundEffect::Click, true, &config), Some(0.25));
        assert_eq!(effect_volume(SoundEffect::Wrong, true, &config), Some(0.75));
        assert_eq!(effect_volume(SoundEffect::BossDefeat, true, &config), Some(0.75));
    }

    #[test]
    fn test_silence_with_nothing_loaded_is_a_no_op() {
        assert_eq!(plan_music(None, None), MusicAction::Keep);
    }
}
