// Session domain: tests for transitions, guards and timers.

use std::time::Duration;

use super::{GameCommand, Session, Timings};
use crate::audio::SoundEffect;
use crate::screens::{Inventory, ItemKey, Screen};

const IDLE: [GameCommand; 0] = [];

fn timings() -> Timings {
    Timings {
        answer_cooldown: Duration::from_millis(500),
        inter_level_delay: Duration::from_secs(3),
        victory_sting_delay: Duration::from_millis(300),
        countdown_start: 40,
    }
}

fn session_on(screen: Screen) -> Session {
    let mut session = Session::new(timings());
    session.apply(GameCommand::Start);
    for _ in 0..5 {
        session.apply(GameCommand::AdvanceStory);
    }
    while session.screen() != screen {
        assert!(session.screen().is_level(), "cannot reach {screen:?}");
        session.apply(GameCommand::Answer { correct: true });
        session.apply(GameCommand::AcknowledgeReward);
        if session.screen() == Screen::InterLevel {
            session.tick(Duration::from_secs(3));
        }
    }
    session
}

fn session_on_victory() -> Session {
    let mut session = session_on(Screen::Level4);
    session.apply(GameCommand::Answer { correct: true });
    session.apply(GameCommand::AcknowledgeReward);
    session.apply(GameCommand::FinishSummary);
    session.apply(GameCommand::VideoEnded);
    assert_eq!(session.screen(), Screen::Victory);
    session
}

// -----------------------------------------------------------------------------
// Initial state and intro
// -----------------------------------------------------------------------------

#[test]
fn test_new_session_starts_blank() {
    let session = Session::new(timings());
    let state = session.state();
    assert_eq!(state.screen, Screen::Start);
    assert!(state.pending_screen.is_none());
    assert_eq!(state.story_index, 0);
    assert!(!state.is_answer_locked);
    assert!(!state.is_answer_failed);
    assert!(!state.is_reward_shown);
    assert!(!state.is_audio_unlocked);
    assert_eq!(state.inventory, Inventory::default());
}

#[test]
fn test_start_does_not_need_audio() {
    let mut session = Session::new(timings());
    session.apply(GameCommand::Start);
    assert_eq!(session.screen(), Screen::Intro);
    assert_eq!(session.state().story_index, 0);
}

#[test]
fn test_story_clicks_until_last_line() {
    let mut session = Session::new(timings());
    session.apply(GameCommand::Start);

    for expected in 1..5 {
        let effects = session.apply(GameCommand::AdvanceStory);
        assert_eq!(effects, vec![SoundEffect::Click]);
        assert_eq!(session.state().story_index, expected);
        assert_eq!(session.screen(), Screen::Intro);
    }

    let effects = session.apply(GameCommand::AdvanceStory);
    assert!(effects.is_empty());
    assert_eq!(session.screen(), Screen::Level1);
}

#[test]
fn test_commands_for_other_screens_are_dropped() {
    let mut session = Session::new(timings());
    for command in [
        GameCommand::AdvanceStory,
        GameCommand::Answer { correct: true },
        GameCommand::Retry,
        GameCommand::AcknowledgeReward,
        GameCommand::FinishSummary,
        GameCommand::VideoEnded,
        GameCommand::ResetNow,
    ] {
        assert!(session.apply(command).is_empty());
        assert_eq!(session.screen(), Screen::Start);
    }
}

// -----------------------------------------------------------------------------
// Quiz levels
// -----------------------------------------------------------------------------

#[test]
fn test_happy_path_into_level_two() {
    let mut session = session_on(Screen::Level1);

    session.apply(GameCommand::Answer { correct: true });
    assert!(session.state().is_reward_shown);
    assert!(!session.state().inventory.blue_crystal);

    session.apply(GameCommand::AcknowledgeReward);
    assert!(session.state().inventory.blue_crystal);
    assert_eq!(session.screen(), Screen::InterLevel);
    assert_eq!(session.state().pending_screen, Some(Screen::Level2));

    session.tick(Duration::from_millis(2999));
    assert_eq!(session.screen(), Screen::InterLevel);

    session.tick(Duration::from_millis(1));
    assert_eq!(session.screen(), Screen::Level2);
    assert!(session.state().pending_screen.is_none());
}

#[test]
fn test_correct_answer_plays_correct_then_victory_sting() {
    let mut session = session_on(Screen::Level1);

    let effects = session.apply(GameCommand::Answer { correct: true });
    assert_eq!(effects, vec![SoundEffect::Correct]);

    assert!(session.tick(Duration::from_millis(200)).is_empty());
    assert_eq!(
        session.tick(Duration::from_millis(100)),
        vec![SoundEffect::Victory]
    );
    assert!(session.tick(Duration::from_secs(1)).is_empty());
}

#[test]
fn test_boss_level_plays_boss_defeat_only() {
    let mut session = session_on(Screen::Level4);

    let effects = session.apply(GameCommand::Answer { correct: true });
    assert_eq!(effects, vec![SoundEffect::BossDefeat]);
    assert!(session.tick(Duration::from_secs(1)).is_empty());
}

#[test]
fn test_double_correct_answer_rewards_once() {
    let mut session = session_on(Screen::Level1);

    let first = session.apply(GameCommand::Answer { correct: true });
    let second = session.apply(GameCommand::Answer { correct: true });
    assert_eq!(first, vec![SoundEffect::Correct]);
    assert!(second.is_empty());

    session.apply(GameCommand::AcknowledgeReward);
    session.apply(GameCommand::AcknowledgeReward);
    assert_eq!(session.state().inventory.collected(), 1);
    assert_eq!(session.screen(), Screen::InterLevel);
}

#[test]
fn test_reward_overlay_ignores_answers_after_lock_expires() {
    let mut session = session_on(Screen::Level2);

    session.apply(GameCommand::Answer { correct: true });
    session.tick(Duration::from_millis(500));
    assert!(!session.state().is_answer_locked);
    assert!(session.state().is_reward_shown);

    assert!(session.apply(GameCommand::Answer { correct: true }).is_empty());
    assert!(session.apply(GameCommand::Answer { correct: false }).is_empty());
    assert!(!session.state().is_answer_failed);
}

#[test]
fn test_answer_lock_releases_after_cooldown() {
    let mut session = session_on(Screen::Level1);

    session.apply(GameCommand::Answer { correct: true });
    assert!(session.state().is_answer_locked);

    session.tick(Duration::from_millis(499));
    assert!(session.state().is_answer_locked);
    session.tick(Duration::from_millis(1));
    assert!(!session.state().is_answer_locked);
}

#[test]
fn test_acknowledge_clears_lock_for_next_level() {
    let mut session = session_on(Screen::Level1);

    session.apply(GameCommand::Answer { correct: true });
    session.apply(GameCommand::AcknowledgeReward);
    assert!(!session.state().is_answer_locked);

    session.tick(Duration::from_secs(3));
    assert_eq!(session.screen(), Screen::Level2);
    let effects = session.apply(GameCommand::Answer { correct: true });
    assert_eq!(effects, vec![SoundEffect::Correct]);
}

#[test]
fn test_wrong_answer_then_retry() {
    let mut session = session_on(Screen::Level3);
    let before = session.state().inventory;

    let effects = session.apply(GameCommand::Answer { correct: false });
    assert_eq!(effects, vec![SoundEffect::Wrong]);
    assert!(session.state().is_answer_failed);
    assert_eq!(session.screen(), Screen::Level3);

    // The failure overlay blocks the quiz.
    assert!(session.apply(GameCommand::Answer { correct: true }).is_empty());
    assert!(!session.state().is_reward_shown);

    session.apply(GameCommand::Retry);
    assert!(!session.state().is_answer_failed);
    assert_eq!(session.screen(), Screen::Level3);
    assert_eq!(session.state().inventory, before);
}

#[test]
fn test_retry_is_unlimited() {
    let mut session = session_on(Screen::Level2);
    for _ in 0..10 {
        session.apply(GameCommand::Answer { correct: false });
        session.apply(GameCommand::Retry);
    }
    session.apply(GameCommand::Answer { correct: true });
    assert!(session.state().is_reward_shown);
}

#[test]
fn test_last_level_routes_to_summary() {
    let mut session = session_on(Screen::Level4);

    session.apply(GameCommand::Answer { correct: true });
    session.apply(GameCommand::AcknowledgeReward);

    assert_eq!(session.screen(), Screen::Summary);
    assert!(session.state().pending_screen.is_none());
    assert!(session.state().inventory.certificate);
    assert_eq!(session.state().inventory.collected(), 4);

    session.tick(Duration::from_secs(10));
    assert_eq!(session.screen(), Screen::Summary);
}

#[test]
fn test_each_level_grants_its_own_item() {
    let mut session = session_on(Screen::Level1);
    let order = [
        ItemKey::BlueCrystal,
        ItemKey::GoldenRope,
        ItemKey::ShinyShield,
        ItemKey::Certificate,
    ];
    for key in order {
        assert!(!session.state().inventory.has(key));
        session.apply(GameCommand::Answer { correct: true });
        session.apply(GameCommand::AcknowledgeReward);
        assert!(session.state().inventory.has(key));
        session.tick(Duration::from_secs(3));
    }
}

// -----------------------------------------------------------------------------
// Summary, ending and victory
// -----------------------------------------------------------------------------

#[test]
fn test_summary_to_ending_to_victory() {
    let mut session = session_on(Screen::Level4);
    session.apply(GameCommand::Answer { correct: true });
    session.apply(GameCommand::AcknowledgeReward);

    let effects = session.apply(GameCommand::FinishSummary);
    assert_eq!(effects, vec![SoundEffect::Click]);
    assert_eq!(session.screen(), Screen::Ending);

    session.apply(GameCommand::VideoEnded);
    assert_eq!(session.screen(), Screen::Victory);
    assert_eq!(session.state().countdown_seconds, 40);
}

#[test]
fn test_victory_countdown_ticks_once_per_second() {
    let mut session = session_on_victory();

    session.tick(Duration::from_millis(999));
    assert_eq!(session.state().countdown_seconds, 40);
    session.tick(Duration::from_millis(1));
    assert_eq!(session.state().countdown_seconds, 39);
    session.tick(Duration::from_secs(9));
    assert_eq!(session.state().countdown_seconds, 30);
}

#[test]
fn test_victory_countdown_loops_back_to_start() {
    let mut session = session_on_victory();

    for _ in 0..39 {
        session.tick(Duration::from_secs(1));
        assert_eq!(session.screen(), Screen::Victory);
    }
    session.tick(Duration::from_secs(1));

    assert_eq!(session.screen(), Screen::Start);
    assert_eq!(session.state().inventory, Inventory::default());
}

#[test]
fn test_large_frame_delta_still_resets_once() {
    let mut session = session_on_victory();
    session.tick(Duration::from_secs(120));
    assert_eq!(session.screen(), Screen::Start);

    // The countdown is gone; more time changes nothing.
    session.tick(Duration::from_secs(120));
    assert_eq!(session.screen(), Screen::Start);
}

#[test]
fn test_reset_now_from_victory() {
    let mut session = session_on_victory();
    session.apply(GameCommand::ResetNow);
    assert_eq!(session.screen(), Screen::Start);
    assert_eq!(session.state().countdown_seconds, 0);

    session.tick(Duration::from_secs(60));
    assert_eq!(session.screen(), Screen::Start);
}

#[test]
fn test_purchase_is_a_no_op() {
    let mut session = session_on_victory();
    let before = session.state().clone();
    assert!(session.apply(GameCommand::Purchase).is_empty());
    assert_eq!(session.state(), &before);
}

// -----------------------------------------------------------------------------
// Reset and timer isolation
// -----------------------------------------------------------------------------

#[test]
fn test_reset_cancels_pending_inter_level() {
    let mut session = session_on(Screen::Level1);
    session.apply(GameCommand::Answer { correct: true });
    session.apply(GameCommand::AcknowledgeReward);
    assert_eq!(session.screen(), Screen::InterLevel);

    session.reset();
    assert_eq!(session.screen(), Screen::Start);
    assert!(session.state().pending_screen.is_none());

    session.tick(Duration::from_secs(5));
    assert_eq!(session.screen(), Screen::Start);
}

#[test]
fn test_reset_cancels_victory_sting() {
    let mut session = session_on(Screen::Level1);
    session.apply(GameCommand::Answer { correct: true });
    session.reset();
    assert!(session.tick(Duration::from_secs(1)).is_empty());
}

#[test]
fn test_reset_keeps_audio_unlocked() {
    let mut session = session_on_victory();
    session.apply(GameCommand::InitAudio);
    session.reset();
    assert!(session.state().is_audio_unlocked);
    assert_eq!(session.screen(), Screen::Start);
}

#[test]
fn test_init_audio_is_one_shot_and_keeps_screen() {
    let mut session = session_on(Screen::Level2);
    session.apply(GameCommand::InitAudio);
    assert!(session.state().is_audio_unlocked);
    assert_eq!(session.screen(), Screen::Level2);

    session.apply(GameCommand::InitAudio);
    assert!(session.state().is_audio_unlocked);
}

#[test]
fn test_replay_after_reset_starts_fresh() {
    let mut session = session_on_victory();
    session.reset();

    session.apply(GameCommand::Start);
    assert_eq!(session.screen(), Screen::Intro);
    assert_eq!(session.state().story_index, 0);
    assert_eq!(session.state().inventory.collected(), 0);
}

// -----------------------------------------------------------------------------
// Frame stepping
// -----------------------------------------------------------------------------

#[test]
fn test_step_does_not_charge_the_arming_frame_to_the_lock() {
    let mut session = session_on(Screen::Level1);

    let effects = session.step(
        Duration::from_millis(600),
        [GameCommand::Answer { correct: true }],
    );
    assert_eq!(effects, vec![SoundEffect::Correct]);
    assert!(session.state().is_answer_locked);

    session.step(Duration::from_millis(499), IDLE);
    assert!(session.state().is_answer_locked);
    session.step(Duration::from_millis(1), IDLE);
    assert!(!session.state().is_answer_locked);
}

#[test]
fn test_step_waits_full_inter_level_delay() {
    let mut session = session_on(Screen::Level1);
    session.apply(GameCommand::Answer { correct: true });

    session.step(Duration::from_secs(5), [GameCommand::AcknowledgeReward]);
    assert_eq!(session.screen(), Screen::InterLevel);

    session.step(Duration::from_millis(2999), IDLE);
    assert_eq!(session.screen(), Screen::InterLevel);
    session.step(Duration::from_millis(1), IDLE);
    assert_eq!(session.screen(), Screen::Level2);
}

#[test]
fn test_step_starts_countdown_with_a_full_second() {
    let mut session = session_on(Screen::Level4);
    session.apply(GameCommand::Answer { correct: true });
    session.apply(GameCommand::AcknowledgeReward);
    session.apply(GameCommand::FinishSummary);

    session.step(Duration::from_secs(2), [GameCommand::VideoEnded]);
    assert_eq!(session.screen(), Screen::Victory);
    assert_eq!(session.state().countdown_seconds, 40);

    session.step(Duration::from_secs(1), IDLE);
    assert_eq!(session.state().countdown_seconds, 39);
}

#[test]
fn test_step_applies_commands_in_order() {
    let mut session = session_on(Screen::Level2);
    let effects = session.step(
        Duration::ZERO,
        [
            GameCommand::Answer { correct: false },
            GameCommand::Retry,
            GameCommand::Answer { correct: true },
        ],
    );
    assert_eq!(effects, vec![SoundEffect::Wrong, SoundEffect::Correct]);
    assert!(session.state().is_reward_shown);
}
