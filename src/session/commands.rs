// Session domain: the commands the input layer can issue.

use bevy::prelude::*;

/// One discrete player (or media) event. Applied strictly in arrival order.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCommand {
    /// First user gesture; unlocks sound for the rest of the process.
    InitAudio,
    Start,
    AdvanceStory,
    Answer { correct: bool },
    Retry,
    AcknowledgeReward,
    FinishSummary,
    VideoEnded,
    ResetNow,
    /// "Go to purchase" on the offer screen. Intentionally does nothing.
    Purchase,
}
