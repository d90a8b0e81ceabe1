//! Turn steps and the two-slot step machine

use crate::core::PlayerId;
use serde::{Deserialize, Serialize};

/// Named stages of the game and of each turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    // Game setup
    BeginFirst,
    BeginMulligan,

    // Turn loop
    MainReady,
    MainStartTriggers,
    MainStart,
    MainAction,
    MainEnd,
    MainCleanup,
    MainNext,

    FinalGameover,
}

impl Step {
    /// The step that follows this one
    ///
    /// `MainNext` loops back to `MainReady` for the other player.
    pub fn successor(&self) -> Step {
        match self {
            Step::BeginFirst => Step::BeginMulligan,
            Step::BeginMulligan => Step::MainReady,
            Step::MainReady => Step::MainStartTriggers,
            Step::MainStartTriggers => Step::MainStart,
            Step::MainStart => Step::MainAction,
            Step::MainAction => Step::MainEnd,
            Step::MainEnd => Step::MainCleanup,
            Step::MainCleanup => Step::MainNext,
            Step::MainNext => Step::MainReady,
            Step::FinalGameover => Step::FinalGameover,
        }
    }

    /// Can players act in this step?
    pub fn is_action_step(&self) -> bool {
        matches!(self, Step::MainAction)
    }
}

/// Turn counters and step tracking
///
/// `step` is the current step and `next_step` the one entered at the next
/// boundary, so mid-step logic can see what comes next before committing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnStructure {
    /// Turns begun so far (0 before the first turn)
    pub turn: u32,

    pub step: Step,
    pub next_step: Step,

    /// Active player (whose turn it is)
    pub current_player: Option<PlayerId>,
}

impl TurnStructure {
    pub fn new() -> Self {
        TurnStructure {
            turn: 0,
            step: Step::BeginFirst,
            next_step: Step::BeginFirst.successor(),
            current_player: None,
        }
    }

    /// Move into `next_step` and queue up its successor
    pub fn advance(&mut self) -> Step {
        self.step = self.next_step;
        self.next_step = self.step.successor();
        self.step
    }

    /// Jump to the terminal step
    pub fn finish(&mut self) {
        self.step = Step::FinalGameover;
        self.next_step = Step::FinalGameover;
    }
}

impl Default for TurnStructure {
    fn default() -> Self {
        Self::new()
    }
}
