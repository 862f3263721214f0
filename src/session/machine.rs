// Session domain: the presentation state machine.
//
// `Session` is the only writer of `SessionState`. Every command and every timer
// firing goes through it, and anything audible comes back out as a list of
// `SoundEffect`s for the audio director to play.

use std::time::Duration;

use bevy::prelude::*;

use super::commands::GameCommand;
use crate::audio::SoundEffect;
use crate::config::GameConfig;
use crate::content::{LEVELS, QuizLevel, STORY_SCRIPT, level_for};
use crate::screens::{Inventory, Screen};

const LAST_STORY_INDEX: usize = STORY_SCRIPT.len() - 1;

/// Read-only snapshot handed to the view layer and the audio director.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub screen: Screen,
    /// Armed while the inter-level card is showing.
    pub pending_screen: Option<Screen>,
    pub story_index: usize,
    pub is_answer_locked: bool,
    pub is_answer_failed: bool,
    pub is_reward_shown: bool,
    /// Sticky: survives `reset`.
    pub is_audio_unlocked: bool,
    /// Only meaningful on `Victory`.
    pub countdown_seconds: u32,
    pub inventory: Inventory,
}

impl SessionState {
    fn initial(is_audio_unlocked: bool) -> Self {
        Self {
            screen: Screen::Start,
            pending_screen: None,
            story_index: 0,
            is_answer_locked: false,
            is_answer_failed: false,
            is_reward_shown: false,
            is_audio_unlocked,
            countdown_seconds: 0,
            inventory: Inventory::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timings {
    pub answer_cooldown: Duration,
    pub inter_level_delay: Duration,
    pub victory_sting_delay: Duration,
    pub countdown_start: u32,
}

impl From<&GameConfig> for Timings {
    fn from(config: &GameConfig) -> Self {
        Self {
            answer_cooldown: config.answer_cooldown(),
            inter_level_delay: config.inter_level_delay(),
            victory_sting_delay: config.victory_sting_delay(),
            countdown_start: config.victory_countdown_secs,
        }
    }
}

/// Named, independently cancelable timers. `None` means disarmed.
#[derive(Debug, Default)]
struct SessionTimers {
    inter_level: Option<Timer>,
    answer_lock: Option<Timer>,
    victory_sting: Option<Timer>,
    countdown: Option<Timer>,
}

#[derive(Resource, Debug)]
pub struct Session {
    state: SessionState,
    timers: SessionTimers,
    timings: Timings,
}

impl Session {
    pub fn new(timings: Timings) -> Self {
        Self {
            state: SessionState::initial(false),
            timers: SessionTimers::default(),
            timings,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn screen(&self) -> Screen {
        self.state.screen
    }

    pub fn current_level(&self) -> Option<&'static QuizLevel> {
        level_for(self.state.screen)
    }

    /// Apply one command. Commands whose guard fails are dropped without effect.
    pub fn apply(&mut self, command: GameCommand) -> Vec<SoundEffect> {
        let mut effects = Vec::new();
        let handled = match command {
            GameCommand::InitAudio => self.init_audio(),
            GameCommand::Start => self.start(),
            GameCommand::AdvanceStory => self.advance_story(&mut effects),
            GameCommand::Answer { correct: true } => self.answer_correct(&mut effects),
            GameCommand::Answer { correct: false } => self.answer_incorrect(&mut effects),
            GameCommand::Retry => self.retry(),
            GameCommand::AcknowledgeReward => self.acknowledge_reward(),
            GameCommand::FinishSummary => self.finish_summary(&mut effects),
            GameCommand::VideoEnded => self.video_ended(),
            GameCommand::ResetNow => self.reset_now(),
            GameCommand::Purchase => {
                info!("Purchase requested on {:?}, checkout is not wired up", self.state.screen);
                true
            }
        };
        if !handled {
            debug!("Dropped {:?} on {:?}", command, self.state.screen);
        }
        effects
    }

    /// One frame: time first, then this frame's commands. A timer armed by a command
    /// starts counting on the next frame, so it never loses the frame it was armed in.
    pub fn step(
        &mut self,
        delta: Duration,
        commands: impl IntoIterator<Item = GameCommand>,
    ) -> Vec<SoundEffect> {
        let mut effects = self.tick(delta);
        for command in commands {
            effects.extend(self.apply(command));
        }
        effects
    }

    /// Advance every armed timer by `delta` and run whatever fires.
    pub fn tick(&mut self, delta: Duration) -> Vec<SoundEffect> {
        let mut effects = Vec::new();

        if tick_once(&mut self.timers.answer_lock, delta) {
            debug!("Answer lock released");
            self.state.is_answer_locked = false;
        }

        if tick_once(&mut self.timers.victory_sting, delta) {
            effects.push(SoundEffect::Victory);
        }

        if tick_once(&mut self.timers.inter_level, delta) {
            if let Some(next) = self.state.pending_screen.take() {
                self.enter(next);
            }
        }

        if let Some(countdown) = self.timers.countdown.as_mut() {
            countdown.tick(delta);
            let ticks = countdown.times_finished_this_tick();
            for _ in 0..ticks {
                if self.state.countdown_seconds == 0 {
                    break;
                }
                self.state.countdown_seconds -= 1;
            }
            if self.state.countdown_seconds == 0 {
                info!("Offer countdown expired");
                self.reset();
            }
        }

        effects
    }

    /// Back to `Start` with every timer disarmed. Audio stays unlocked.
    pub fn reset(&mut self) {
        self.timers = SessionTimers::default();
        self.state = SessionState::initial(self.state.is_audio_unlocked);
        info!("Session reset");
    }

    fn init_audio(&mut self) -> bool {
        if self.state.is_audio_unlocked {
            return false;
        }
        self.state.is_audio_unlocked = true;
        info!("Audio unlocked");
        true
    }

    fn start(&mut self) -> bool {
        if self.state.screen != Screen::Start {
            return false;
        }
        self.state.story_index = 0;
        self.enter(Screen::Intro);
        true
    }

    fn advance_story(&mut self, effects: &mut Vec<SoundEffect>) -> bool {
        if self.state.screen != Screen::Intro {
            return false;
        }
        if self.state.story_index < LAST_STORY_INDEX {
            self.state.story_index += 1;
            effects.push(SoundEffect::Click);
        } else {
            self.enter(Screen::Level1);
        }
        true
    }

    fn accepts_answer(&self) -> bool {
        self.state.screen.is_level()
            && !self.state.is_answer_locked
            && !self.state.is_answer_failed
            && !self.state.is_reward_shown
    }

    fn answer_correct(&mut self, effects: &mut Vec<SoundEffect>) -> bool {
        if !self.accepts_answer() {
            return false;
        }
        self.state.is_answer_locked = true;
        self.timers.answer_lock = Some(Timer::new(self.timings.answer_cooldown, TimerMode::Once));

        if self.state.screen == Screen::Level4 {
            effects.push(SoundEffect::BossDefeat);
        } else {
            effects.push(SoundEffect::Correct);
            self.timers.victory_sting =
                Some(Timer::new(self.timings.victory_sting_delay, TimerMode::Once));
        }
        self.state.is_reward_shown = true;
        true
    }

    fn answer_incorrect(&mut self, effects: &mut Vec<SoundEffect>) -> bool {
        if !self.accepts_answer() {
            return false;
        }
        effects.push(SoundEffect::Wrong);
        self.state.is_answer_failed = true;
        true
    }

    fn retry(&mut self) -> bool {
        if !self.state.is_answer_failed {
            return false;
        }
        self.state.is_answer_failed = false;
        true
    }

    fn acknowledge_reward(&mut self) -> bool {
        let Some(level) = self.current_level() else {
            return false;
        };
        if !self.state.is_reward_shown {
            return false;
        }
        self.state.inventory.grant(level.reward_item);
        self.state.is_reward_shown = false;
        self.state.is_answer_locked = false;
        self.timers.answer_lock = None;

        if level.next_screen.is_level() {
            self.state.pending_screen = Some(level.next_screen);
            self.enter(Screen::InterLevel);
        } else {
            self.enter(level.next_screen);
        }
        true
    }

    fn finish_summary(&mut self, effects: &mut Vec<SoundEffect>) -> bool {
        if self.state.screen != Screen::Summary {
            return false;
        }
        effects.push(SoundEffect::Click);
        self.enter(Screen::Ending);
        true
    }

    fn video_ended(&mut self) -> bool {
        if self.state.screen != Screen::Ending {
            return false;
        }
        self.enter(Screen::Victory);
        true
    }

    fn reset_now(&mut self) -> bool {
        if self.state.screen != Screen::Victory {
            return false;
        }
        self.reset();
        true
    }

    /// Switch screens and arm or disarm the screen-bound timers.
    fn enter(&mut self, screen: Screen) {
        info!("Screen {:?} -> {:?}", self.state.screen, screen);
        self.state.screen = screen;

        match screen {
            Screen::InterLevel => {
                self.timers.inter_level =
                    Some(Timer::new(self.timings.inter_level_delay, TimerMode::Once));
                self.timers.countdown = None;
            }
            Screen::Victory => {
                self.state.countdown_seconds = self.timings.countdown_start;
                self.timers.countdown =
                    Some(Timer::new(Duration::from_secs(1), TimerMode::Repeating));
                self.timers.inter_level = None;
                self.state.pending_screen = None;
            }
            Screen::Start
            | Screen::Intro
            | Screen::Level1
            | Screen::Level2
            | Screen::Level3
            | Screen::Level4
            | Screen::Summary
            | Screen::Ending => {
                self.timers.inter_level = None;
                self.timers.countdown = None;
                self.state.pending_screen = None;
            }
        }
    }
}

/// Tick a one-shot timer slot; disarms it and returns true when it fires.
fn tick_once(slot: &mut Option<Timer>, delta: Duration) -> bool {
    let Some(timer) = slot.as_mut() else {
        return false;
    };
    timer.tick(delta);
    if timer.is_finished() {
        *slot = None;
        true
    } else {
        false
    }
}

/// Number of quiz levels, for the view layer's "LEVEL n" badge.
pub const LEVEL_COUNT: usize = LEVELS.len();
